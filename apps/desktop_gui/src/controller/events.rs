//! UI/backend events and error modeling for the upload form.

use std::path::Path;

use shared::{
    domain::DictionaryFile,
    error::{SubmitRejected, TransportError},
    protocol::SubmissionEvent,
};

pub enum UiEvent {
    Info(String),
    DictionaryLoaded(DictionaryFile),
    Submission(SubmissionEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadDictionary,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("no dictionary")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_transport(err: &TransportError) -> Self {
        let (category, message) = match err {
            TransportError::InvalidEndpoint(_) => (
                UiErrorCategory::Validation,
                format!("{err}; check the configured API base URL"),
            ),
            TransportError::Network(_) => (
                UiErrorCategory::Transport,
                format!("Anagram server unreachable; check URL/network and retry: {err}"),
            ),
            TransportError::Status { status, .. } => (
                UiErrorCategory::Server,
                format!("Anagram server rejected the search (HTTP {status}): {err}"),
            ),
        };
        Self {
            category,
            context: UiErrorContext::Submit,
            message,
        }
    }

    pub fn from_rejection(rejection: SubmitRejected) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context: UiErrorContext::Submit,
            message: match rejection {
                SubmitRejected::InFlight => {
                    "A search is already running; wait for it to finish".to_string()
                }
                SubmitRejected::MissingDictionary => {
                    "Choose a dictionary file before searching".to_string()
                }
            },
        }
    }

    pub fn dictionary_unreadable(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context: UiErrorContext::LoadDictionary,
            message: format!("Could not read dictionary '{}': {reason}", path.display()),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_backend_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn status_errors_are_attributed_to_the_server() {
        let err = UiError::from_transport(&TransportError::Status {
            status: 400,
            body: "Required request part 'dictionaryFile' is not present".to_string(),
        });
        assert_eq!(err.category(), UiErrorCategory::Server);
        assert_eq!(err.context(), UiErrorContext::Submit);
        assert!(err.message().contains("HTTP 400"));
    }

    #[test]
    fn network_errors_are_transport_errors() {
        let err = UiError::from_transport(&TransportError::network("network down"));
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(err.message().contains("network down"));
    }

    #[test]
    fn missing_dictionary_rejection_is_validation() {
        let err = UiError::from_rejection(SubmitRejected::MissingDictionary);
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert!(err.message().contains("dictionary"));
    }
}
