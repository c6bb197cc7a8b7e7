//! Reducer-like state transitions for the upload form window.

use std::path::PathBuf;

use client_core::{FormPhase, UploadForm};
use crossbeam_channel::Sender;
use shared::{
    error::TransportError,
    protocol::{SubmissionEvent, UploadProgress},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
};

#[derive(Debug, Default)]
pub struct FormController {
    pub form: UploadForm,
    /// Display-only; the form itself never records progress.
    pub progress: Option<UploadProgress>,
    pub status: String,
    pub error: Option<UiError>,
    pub loading_dictionary: bool,
}

impl FormController {
    pub fn reduce(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::DictionaryLoaded(file) => {
                self.loading_dictionary = false;
                self.status = format!("Dictionary '{}' ready ({} bytes)", file.name(), file.len());
                self.error = None;
                self.form.select_file([file]);
            }
            UiEvent::Submission(event) => self.reduce_submission(event),
            UiEvent::Error(err) => {
                self.loading_dictionary = false;
                tracing::warn!(
                    context = ?err.context(),
                    category = ?err.category(),
                    "{}",
                    err.message()
                );
                self.status = err.message().to_string();
                self.error = Some(err);
            }
        }
    }

    fn reduce_submission(&mut self, event: SubmissionEvent) {
        if self.form.phase() != FormPhase::Submitting {
            tracing::debug!(?event, "dropping submission event with no search in flight");
            return;
        }
        if let SubmissionEvent::Progress(progress) = &event {
            self.progress = Some(*progress);
        }

        self.form.apply(event);
        match self.form.phase() {
            FormPhase::Submitting => {}
            FormPhase::Idle => {
                self.progress = None;
                self.status = "Search finished".to_string();
            }
            FormPhase::Failed => {
                self.progress = None;
                if let Some(cause) = self.form.last_error() {
                    let err = UiError::from_transport(cause);
                    self.status = err.message().to_string();
                    self.error = Some(err);
                }
            }
        }
    }

    pub fn pick_dictionary(&mut self, cmd_tx: &Sender<BackendCommand>, path: PathBuf) {
        self.status = format!("Reading {}...", path.display());
        self.loading_dictionary = dispatch_backend_command(
            cmd_tx,
            BackendCommand::LoadDictionary { path },
            &mut self.status,
        );
    }

    pub fn submit(&mut self, cmd_tx: &Sender<BackendCommand>) {
        let request = match self.form.begin_submit() {
            Ok(request) => request,
            Err(rejection) => {
                let err = UiError::from_rejection(rejection);
                self.status = err.message().to_string();
                self.error = Some(err);
                return;
            }
        };

        self.error = None;
        self.progress = None;
        self.status = "Searching anagrams...".to_string();
        if !dispatch_backend_command(
            cmd_tx,
            BackendCommand::SearchAnagrams { request },
            &mut self.status,
        ) {
            // The worker never saw the request; fail the cycle locally.
            let reason = self.status.clone();
            self.reduce_submission(SubmissionEvent::TransportError {
                cause: TransportError::network(reason),
            });
        }
    }
}
