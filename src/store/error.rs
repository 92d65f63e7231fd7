use std::path::PathBuf;
use thiserror::Error;

use crate::core::{NoteError, NoteId};

/// Errors that can occur during note storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Notes file path has no parent directory.
    #[error("Notes path has no parent directory: {0}")]
    NoParentDir(PathBuf),
    /// Notes file exists but is not a valid JSON array of records.
    #[error("Notes file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A record in the notes file or an import cannot become a note.
    #[error("Invalid note record at position {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: NoteError,
    },
    /// Two records share an id.
    #[error("Duplicate note id: {0}")]
    DuplicateId(NoteId),
    /// No note with the requested id.
    #[error("Note not found: {0}")]
    NotFound(NoteId),
    /// Every id up to `u64::MAX` is taken, so no new note can be numbered.
    #[error("No note ids left after {0}")]
    IdSpaceExhausted(NoteId),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
