//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{load_dictionary_file, AnagramSubmitter};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use futures::StreamExt;
use shared::{domain::SubmissionRequest, error::TransportError, protocol::SubmissionEvent};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    submitter: Arc<dyn AnagramSubmitter>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Ready; choose a dictionary file".to_string()));
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::LoadDictionary { path } => {
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let event = match load_dictionary_file(&path).await {
                            Ok(file) => UiEvent::DictionaryLoaded(file),
                            Err(err) => {
                                tracing::warn!("{err:#}");
                                UiEvent::Error(UiError::dictionary_unreadable(
                                    &path,
                                    format!("{err:#}"),
                                ))
                            }
                        };
                        deliver(&ui_tx, event).await;
                    });
                }
                BackendCommand::SearchAnagrams { request } => {
                    let ui_tx = ui_tx.clone();
                    let submitter = Arc::clone(&submitter);
                    runtime.spawn(async move {
                        forward_submission_events(submitter.as_ref(), request, &ui_tx).await;
                    });
                }
            }
        }
        tracing::info!("ui command channel closed; backend worker exiting");
    });
}

/// Relays one submission's events to the UI. A stream that ends without a
/// terminal event is reported as a transport failure so the form never stays
/// stuck in the loading state.
///
/// Progress is best effort and is dropped while the UI queue is full. Terminal
/// events always get through.
pub async fn forward_submission_events(
    submitter: &dyn AnagramSubmitter,
    request: SubmissionRequest,
    ui_tx: &Sender<UiEvent>,
) {
    let mut events = submitter.submit(request);
    while let Some(event) = events.next().await {
        if event.is_terminal() {
            deliver(ui_tx, UiEvent::Submission(event)).await;
            return;
        }
        match ui_tx.try_send(UiEvent::Submission(event)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::debug!("ui queue full; dropping upload progress");
            }
            Err(TrySendError::Disconnected(_)) => return,
        }
    }

    deliver(
        ui_tx,
        UiEvent::Submission(SubmissionEvent::TransportError {
            cause: TransportError::network("submission ended without a response"),
        }),
    )
    .await;
}

/// Waits for room in the UI queue off the async workers.
async fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let ui_tx = ui_tx.clone();
    match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(_)) => tracing::debug!("ui event channel closed"),
        Err(err) => tracing::warn!("ui delivery task failed: {err}"),
    }
}
