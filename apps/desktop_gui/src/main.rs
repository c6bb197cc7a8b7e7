use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, SubmissionService};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{AnagramsApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured API base URL.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let settings = load_settings().with_base_url_override(args.base_url);
    let endpoint = match settings.endpoint() {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::warn!("{err}");
            settings.api_base_url.clone()
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(SubmissionService::new(settings)));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Anagram Search")
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Anagram Search",
        options,
        Box::new(|_cc| {
            Ok(Box::new(AnagramsApp::new(
                cmd_tx,
                ui_rx,
                StartupConfig { endpoint },
            )))
        }),
    )
}
