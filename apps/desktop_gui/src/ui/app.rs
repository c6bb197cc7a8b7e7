use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::protocol::AnagramResult;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, reducer::FormController};

pub struct StartupConfig {
    pub endpoint: String,
}

pub struct AnagramsApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: FormController,
    words_input: String,
    startup: StartupConfig,
}

impl AnagramsApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: FormController::default(),
            words_input: String::new(),
            startup,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.reduce(event);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let busy = self.controller.form.is_loading();

        ui.horizontal(|ui| {
            let pick = ui.add_enabled(
                !busy && !self.controller.loading_dictionary,
                egui::Button::new("Choose dictionary..."),
            );
            if pick.clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_file() {
                    self.controller.pick_dictionary(&self.cmd_tx, path);
                }
            }
            match self.controller.form.dictionary_file() {
                Some(file) => ui.label(format!("{} ({} bytes)", file.name(), file.len())),
                None => ui.weak("No dictionary selected"),
            };
        });

        ui.add_space(6.0);
        let mut submit_requested = false;
        ui.horizontal(|ui| {
            ui.label("Words:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.words_input)
                    .hint_text("word or phrase")
                    .desired_width(280.0),
            );
            if response.changed() {
                self.controller.form.set_words(self.words_input.clone());
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit_requested = true;
            }

            let search = ui.add_enabled(
                self.controller.form.can_submit(),
                egui::Button::new("Search anagrams"),
            );
            submit_requested |= search.clicked();
        });
        if submit_requested && self.controller.form.can_submit() {
            self.controller.submit(&self.cmd_tx);
        }

        ui.add_space(6.0);
        if busy {
            ui.horizontal(|ui| {
                ui.spinner();
                match self.controller.progress {
                    Some(progress) => {
                        ui.add(
                            egui::ProgressBar::new(progress.fraction())
                                .show_percentage()
                                .desired_width(240.0),
                        );
                    }
                    None => {
                        ui.label("Waiting for upload to start...");
                    }
                }
            });
        }

        if let Some(err) = &self.controller.error {
            ui.colored_label(egui::Color32::from_rgb(0xd0, 0x4a, 0x4a), err.message());
        }

        ui.separator();
        if let Some(result) = self.controller.form.result() {
            show_result(ui, result);
        }
    }
}

fn show_result(ui: &mut egui::Ui, result: &AnagramResult) {
    egui::ScrollArea::vertical().show(ui, |ui| match result.report() {
        Some(report) => {
            ui.label(format!(
                "{} anagram(s) of '{}' found in {} s",
                report.anagrams.len(),
                report.word,
                report.seconds
            ));
            for anagram in &report.anagrams {
                ui.monospace(anagram.as_str());
            }
        }
        None => {
            let pretty = serde_json::to_string_pretty(result.value())
                .unwrap_or_else(|_| result.value().to_string());
            ui.monospace(pretty);
        }
    });
}

impl eframe::App for AnagramsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Anagram search");
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(self.startup.endpoint.as_str());
                ui.separator();
                ui.label(self.controller.status.as_str());
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| self.show_form(ui));

        if self.controller.form.is_loading() || self.controller.loading_dictionary {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
