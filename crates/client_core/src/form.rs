//! Upload form state: selected dictionary, query words, and the outcome of the
//! latest submission.

use futures::StreamExt;
use shared::{
    domain::{DictionaryFile, QueryWords, SubmissionRequest},
    error::{SubmitRejected, TransportError},
    protocol::{AnagramResult, SubmissionEvent},
};
use tracing::{debug, info};

use crate::AnagramSubmitter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    phase: FormPhase,
    dictionary_file: Option<DictionaryFile>,
    words: QueryWords,
    result: Option<AnagramResult>,
    loading: bool,
    last_error: Option<TransportError>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first candidate; an empty selection clears the file.
    pub fn select_file<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = DictionaryFile>,
    {
        self.dictionary_file = candidates.into_iter().next();
    }

    pub fn set_words(&mut self, text: impl Into<String>) {
        self.words = QueryWords(text.into());
    }

    /// Starts a submission cycle. The previous result is dropped before the
    /// loading flag is raised.
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitRejected::InFlight);
        }
        let Some(dictionary_file) = self.dictionary_file.clone() else {
            return Err(SubmitRejected::MissingDictionary);
        };

        self.result = None;
        self.last_error = None;
        self.loading = true;
        self.phase = FormPhase::Submitting;
        info!(
            dictionary = dictionary_file.name(),
            words = self.words.as_str(),
            "anagram submission started"
        );
        Ok(SubmissionRequest::new(dictionary_file, self.words.clone()))
    }

    pub fn apply(&mut self, event: SubmissionEvent) {
        if self.phase != FormPhase::Submitting {
            debug!(?event, "ignoring submission event outside of a submission");
            return;
        }

        match event {
            SubmissionEvent::Progress(_) => {}
            SubmissionEvent::Response { body } => {
                self.result = Some(body);
                self.loading = false;
                self.phase = FormPhase::Idle;
            }
            SubmissionEvent::TransportError { cause } => {
                self.last_error = Some(cause);
                self.loading = false;
                self.phase = FormPhase::Failed;
            }
        }
    }

    /// Runs a whole submission cycle against `submitter`.
    pub async fn submit<S>(&mut self, submitter: &S) -> Result<(), SubmitRejected>
    where
        S: AnagramSubmitter + ?Sized,
    {
        let request = self.begin_submit()?;
        let mut events = submitter.submit(request);
        while let Some(event) = events.next().await {
            self.apply(event);
        }

        if self.phase == FormPhase::Submitting {
            self.apply(SubmissionEvent::TransportError {
                cause: TransportError::network("submission ended without a response"),
            });
        }
        Ok(())
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn dictionary_file(&self) -> Option<&DictionaryFile> {
        self.dictionary_file.as_ref()
    }

    pub fn words(&self) -> &QueryWords {
        &self.words
    }

    pub fn result(&self) -> Option<&AnagramResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.phase != FormPhase::Submitting && self.dictionary_file.is_some()
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
