use std::{fmt, sync::Arc};

/// Dictionary uploaded alongside the query words. Contents are shared, so
/// cloning a selected file into a request does not copy the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct DictionaryFile {
    name: String,
    contents: Arc<[u8]>,
}

impl DictionaryFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let contents: Vec<u8> = contents.into();
        Self {
            name: name.into(),
            contents: Arc::from(contents),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Shares the underlying buffer without copying it.
    pub fn shared_contents(&self) -> Arc<[u8]> {
        Arc::clone(&self.contents)
    }

    pub fn len(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl fmt::Debug for DictionaryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryFile")
            .field("name", &self.name)
            .field("len", &self.contents.len())
            .finish()
    }
}

/// Free-form query text, kept verbatim. The server decides how to split it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryWords(pub String);

impl QueryWords {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for QueryWords {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for QueryWords {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub dictionary_file: DictionaryFile,
    pub words: QueryWords,
}

impl SubmissionRequest {
    pub fn new(dictionary_file: DictionaryFile, words: impl Into<QueryWords>) -> Self {
        Self {
            dictionary_file,
            words: words.into(),
        }
    }
}
