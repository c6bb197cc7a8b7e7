use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    load_dictionary_file, load_settings, AnagramSubmitter, SubmissionService, UploadForm,
};
use futures::StreamExt;
use shared::protocol::SubmissionEvent;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Search a dictionary for anagrams of the given words")]
struct Args {
    /// Dictionary file uploaded to the anagram server.
    #[arg(long)]
    dictionary: PathBuf,
    /// Word or phrase to search anagrams for.
    #[arg(long)]
    words: String,
    /// Overrides the configured API base URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings().with_base_url_override(args.base_url);
    let service = SubmissionService::new(settings);

    let mut form = UploadForm::new();
    form.select_file([load_dictionary_file(&args.dictionary).await?]);
    form.set_words(args.words);

    let request = form.begin_submit()?;
    let mut events = service.submit(request);
    while let Some(event) = events.next().await {
        if let SubmissionEvent::Progress(progress) = &event {
            tracing::info!(
                "uploaded {}/{} bytes ({:.0}%)",
                progress.bytes_sent,
                progress.total_bytes,
                progress.fraction() * 100.0
            );
        }
        form.apply(event);
    }

    if let Some(err) = form.last_error() {
        return Err(anyhow!(err.clone())).context("anagram search failed");
    }
    let result = form
        .result()
        .ok_or_else(|| anyhow!("anagram search ended without a response"))?;
    println!("{}", result.raw());

    Ok(())
}
