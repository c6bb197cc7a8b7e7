//! Backend commands queued from UI to backend worker.

use shared::domain::SubmissionRequest;
use std::path::PathBuf;

pub enum BackendCommand {
    LoadDictionary { path: PathBuf },
    SearchAnagrams { request: SubmissionRequest },
}
