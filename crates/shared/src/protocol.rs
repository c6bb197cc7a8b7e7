use serde::Deserialize;
use serde_json::Value;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    pub fn new(bytes_sent: u64, total_bytes: u64) -> Self {
        Self {
            bytes_sent,
            total_bytes,
        }
    }

    /// Fraction in `0.0..=1.0`; an empty upload counts as complete.
    pub fn fraction(&self) -> f32 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_sent as f64 / self.total_bytes as f64).clamp(0.0, 1.0) as f32
    }
}

/// Response payload as the server produced it. `raw` is the body text
/// byte-for-byte; `value` is its JSON reading, or the raw text as a JSON
/// string when the body is not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct AnagramResult {
    raw: String,
    value: Value,
}

impl AnagramResult {
    pub fn from_body(raw: &str) -> Self {
        let value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => Value::String(raw.to_string()),
        };
        Self {
            raw: raw.to_string(),
            value,
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            raw: value.to_string(),
            value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn report(&self) -> Option<AnagramReport> {
        serde_json::from_value(self.value.clone()).ok()
    }
}

/// Payload shape produced by the reference anagram server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnagramReport {
    pub word: String,
    pub anagrams: Vec<String>,
    pub seconds: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    Progress(UploadProgress),
    Response { body: AnagramResult },
    TransportError { cause: TransportError },
}

impl SubmissionEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}
