use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid anagram endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl TransportError {
    pub fn network(cause: impl Into<String>) -> Self {
        Self::Network(cause.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("no dictionary file selected")]
    MissingDictionary,
}
