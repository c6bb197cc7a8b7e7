use std::{
    path::Path,
    pin::Pin,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use reqwest::{
    multipart::{Form, Part},
    Body, Client,
};
use shared::{
    domain::{DictionaryFile, QueryWords, SubmissionRequest},
    error::TransportError,
    protocol::{AnagramResult, SubmissionEvent, UploadProgress},
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

pub mod config;
pub mod form;
pub use config::{load_settings, ClientSettings};
pub use form::{FormPhase, UploadForm};

const DICTIONARY_FIELD: &str = "dictionaryFile";
const WORDS_FIELD: &str = "words";
const DICTIONARY_MIME_TYPE: &str = "application/octet-stream";

/// Finite, ordered event sequence for one submission: progress first, then
/// exactly one terminal event.
pub type SubmissionStream = Pin<Box<dyn Stream<Item = SubmissionEvent> + Send>>;

pub trait AnagramSubmitter: Send + Sync {
    fn submit(&self, request: SubmissionRequest) -> SubmissionStream;
}

impl<T: AnagramSubmitter + ?Sized> AnagramSubmitter for Arc<T> {
    fn submit(&self, request: SubmissionRequest) -> SubmissionStream {
        (**self).submit(request)
    }
}

pub struct SubmissionService {
    http: Client,
    settings: ClientSettings,
}

impl SubmissionService {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: ClientSettings) -> Self {
        Self { http, settings }
    }
}

impl AnagramSubmitter for SubmissionService {
    fn submit(&self, request: SubmissionRequest) -> SubmissionStream {
        let http = self.http.clone();
        let settings = self.settings.clone();

        // Nothing touches the network until the stream is first polled.
        stream::once(async move {
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(run_submission(http, settings, request, EventSink::new(tx)));
            UnboundedReceiverStream::new(rx)
        })
        .flatten()
        .boxed()
    }
}

/// Delivers events for one submission. Once the terminal event is sent the
/// sender is dropped, so late progress from the transport is discarded and the
/// stream ends.
#[derive(Clone)]
struct EventSink {
    tx: Arc<Mutex<Option<mpsc::UnboundedSender<SubmissionEvent>>>>,
}

impl EventSink {
    fn new(tx: mpsc::UnboundedSender<SubmissionEvent>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    fn progress(&self, progress: UploadProgress) {
        let guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(tx) = guard.as_ref() {
            debug!(
                bytes_sent = progress.bytes_sent,
                total_bytes = progress.total_bytes,
                "dictionary upload progress"
            );
            let _ = tx.send(SubmissionEvent::Progress(progress));
        }
    }

    fn finish(&self, event: SubmissionEvent) {
        let tx = match self.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(tx) = tx {
            let _ = tx.send(event);
        }
    }
}

async fn run_submission(
    http: Client,
    settings: ClientSettings,
    request: SubmissionRequest,
    sink: EventSink,
) {
    let terminal = match send_request(&http, &settings, request, &sink).await {
        Ok(body) => {
            info!("anagram search completed");
            SubmissionEvent::Response { body }
        }
        Err(cause) => {
            warn!("anagram search failed: {cause}");
            SubmissionEvent::TransportError { cause }
        }
    };
    sink.finish(terminal);
}

async fn send_request(
    http: &Client,
    settings: &ClientSettings,
    request: SubmissionRequest,
    sink: &EventSink,
) -> Result<AnagramResult, TransportError> {
    let endpoint = settings.endpoint()?;
    let SubmissionRequest {
        dictionary_file,
        words,
    } = request;
    info!(
        endpoint = %endpoint,
        dictionary = dictionary_file.name(),
        bytes = dictionary_file.len(),
        "submitting anagram search"
    );

    let form = multipart_form(dictionary_file, words, settings.chunk_size(), sink.clone())?;
    let response = http
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| TransportError::network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::network(e.to_string()))?;
    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(AnagramResult::from_body(&body))
}

fn multipart_form(
    dictionary_file: DictionaryFile,
    words: QueryWords,
    chunk_size: usize,
    sink: EventSink,
) -> Result<Form, TransportError> {
    let total_bytes = dictionary_file.len();
    let mut bytes_sent = 0u64;
    let body = stream::iter(dictionary_chunks(&dictionary_file, chunk_size)).map(move |chunk| {
        bytes_sent += chunk.len() as u64;
        sink.progress(UploadProgress::new(bytes_sent, total_bytes));
        Ok::<_, std::io::Error>(chunk)
    });

    let file_part = Part::stream_with_length(Body::wrap_stream(body), total_bytes)
        .file_name(dictionary_file.name().to_string())
        .mime_str(DICTIONARY_MIME_TYPE)
        .map_err(|e| TransportError::network(format!("failed to build dictionary part: {e}")))?;

    Ok(Form::new()
        .part(DICTIONARY_FIELD, file_part)
        .text(WORDS_FIELD, words.0))
}

/// Splits the dictionary into `chunk_size` views of its shared buffer.
fn dictionary_chunks(dictionary_file: &DictionaryFile, chunk_size: usize) -> Vec<Bytes> {
    let contents = Bytes::from_owner(dictionary_file.shared_contents());
    (0..contents.len())
        .step_by(chunk_size)
        .map(|start| contents.slice(start..contents.len().min(start + chunk_size)))
        .collect()
}

/// Reads a dictionary from disk, naming it after the file.
pub async fn load_dictionary_file(path: impl AsRef<Path>) -> Result<DictionaryFile> {
    let path = path.as_ref();
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read dictionary file '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dictionary".to_string());
    Ok(DictionaryFile::new(name, contents))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
