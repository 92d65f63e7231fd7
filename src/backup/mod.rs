// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Backing notes up to a user-chosen JSON file
//!
//! The helper encodes the notes and hands the bytes to a [`SavePrompt`]:
//! the host asks the user where to save, writes the file, and reports the
//! chosen path (or `None` if the user cancelled). GTK's file dialog, a
//! terminal prompt and a fixed CLI path all implement the same trait.
//!
//! # Flow
//!
//! ```text
//! records ──► empty? ──yes──► EmptyInput (no prompt shown)
//!               │no
//!               ▼
//!          JSON encode ──► SaveRequest ──► SavePrompt ──► Some(path) ──► Ok(path)
//!                                                    ├──► None ───────► Cancelled
//!                                                    └──► Err ────────► Prompt
//! ```
//!
//! There are no retries; callers re-invoke on failure.

pub mod prompt;
pub mod restore;

pub use prompt::{FixedPathPrompt, TerminalPrompt};
pub use restore::{read_backup, RestoreError};

use chrono::{Local, NaiveDate};
use std::{backtrace::Backtrace, io, path::PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::core::NoteRecord;

/// Title shown on the save dialog
pub const DIALOG_TITLE: &str = "Save notes backup";

/// Extensions the save dialog accepts
pub const ALLOWED_EXTENSIONS: [&str; 1] = ["json"];

/// What the host needs to show a save prompt and write the result
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaveRequest {
    /// Dialog title
    pub dialog_title: String,
    /// Pre-filled file name, e.g. `notes_backup_2025-10-15.json`
    pub file_name: String,
    /// Extensions (without dot) the user may pick
    pub allowed_extensions: Vec<String>,
    /// Payload to write at the chosen location
    pub bytes: Vec<u8>,
}

impl SaveRequest {
    /// Whether `path` carries one of the allowed extensions
    pub fn allows(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// Errors a host can report from a save prompt
#[derive(Debug, Error)]
pub enum PromptError {
    /// The chosen location was refused (wrong extension, not a file, ...)
    #[error("Rejected save location: {0}")]
    Rejected(String),
    /// The host dialog itself failed
    #[error("Save dialog failed: {0}")]
    Host(String),
    /// Writing the payload failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Completion callback for [`SavePrompt::prompt_save`]
///
/// - `Ok(Some(path))`: the payload was fully written to `path`
/// - `Ok(None)`: the user cancelled; nothing was written
/// - `Err(_)`: the host failed; nothing was written
pub type SaveCallback = Box<dyn FnOnce(Result<Option<PathBuf>, PromptError>)>;

/// Host capability: ask the user for a location and write bytes there
///
/// Implementations may complete synchronously (terminal, fixed path) or
/// later from the main loop (GTK dialog). Writes must be all-or-nothing.
pub trait SavePrompt {
    /// Shows the prompt and calls `on_done` exactly once
    fn prompt_save(&self, request: SaveRequest, on_done: SaveCallback);
}

/// The two ways a backup can fail, as seen by callers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackupErrorKind {
    /// Nothing to back up
    EmptyInput,
    /// Encoding, the host prompt, or the user stopped the backup
    OperationFailed,
}

/// Errors that can occur while backing notes up
#[derive(Debug, Error)]
pub enum BackupError {
    /// Notes list was empty; no prompt was shown
    #[error("No notes to back up")]
    EmptyInput,
    /// The user dismissed the save prompt
    #[error("Backup cancelled by user")]
    Cancelled,
    /// Records could not be encoded as JSON
    #[error("Failed to encode notes: {0}")]
    Encode(#[from] serde_json::Error),
    /// The host prompt failed
    #[error("Save prompt failed: {0}")]
    Prompt(#[from] PromptError),
}

impl BackupError {
    /// Collapses the error into its caller-facing kind
    pub fn kind(&self) -> BackupErrorKind {
        match self {
            BackupError::EmptyInput => BackupErrorKind::EmptyInput,
            BackupError::Cancelled | BackupError::Encode(_) | BackupError::Prompt(_) => {
                BackupErrorKind::OperationFailed
            }
        }
    }

    /// True when the user backed out rather than something breaking
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BackupError::Cancelled)
    }
}

/// Suggested backup file name for `date`
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use notes_manager::backup::suggested_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
/// assert_eq!(suggested_file_name(date), "notes_backup_2025-10-15.json");
/// ```
pub fn suggested_file_name(date: NaiveDate) -> String {
    format!("notes_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Encodes records as UTF-8 JSON bytes
pub fn encode_payload(records: &[NoteRecord]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(records)
}

/// Builds the save request for `records` without showing anything
///
/// # Errors
///
/// Returns `BackupError::EmptyInput` for an empty list and
/// `BackupError::Encode` if encoding fails.
pub fn prepare_request(records: &[NoteRecord], date: NaiveDate) -> Result<SaveRequest, BackupError> {
    if records.is_empty() {
        return Err(BackupError::EmptyInput);
    }

    Ok(SaveRequest {
        dialog_title: DIALOG_TITLE.to_string(),
        file_name: suggested_file_name(date),
        allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        bytes: encode_payload(records)?,
    })
}

/// Backs `records` up through `prompt`, reporting the detailed outcome
///
/// `on_complete` runs exactly once: immediately for empty input or
/// encoding failures, otherwise whenever the prompt finishes.
pub fn run_backup<F>(records: &[NoteRecord], prompt: &dyn SavePrompt, on_complete: F)
where
    F: FnOnce(Result<PathBuf, BackupError>) + 'static,
{
    let request = match prepare_request(records, Local::now().date_naive()) {
        Ok(request) => request,
        Err(e) => {
            on_complete(Err(e));
            return;
        }
    };

    prompt.prompt_save(
        request,
        Box::new(move |result| {
            let outcome = match result {
                Ok(Some(path)) => Ok(path),
                Ok(None) => Err(BackupError::Cancelled),
                Err(e) => Err(BackupError::Prompt(e)),
            };
            on_complete(outcome);
        }),
    );
}

/// Backs `records` up through `prompt`, reporting only success or failure
///
/// The cause of a failure is logged, not returned.
///
/// # Example
///
/// ```no_run
/// use notes_manager::backup::{backup_notes, FixedPathPrompt};
/// use notes_manager::store::NoteStore;
///
/// let store = NoteStore::open("notes.json".into())?;
/// let prompt = FixedPathPrompt::new("/tmp".into());
/// backup_notes(&store.records(), &prompt, |ok| {
///     println!("backup {}", if ok { "saved" } else { "failed" });
/// });
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn backup_notes<F>(records: &[NoteRecord], prompt: &dyn SavePrompt, on_complete: F)
where
    F: FnOnce(bool) + 'static,
{
    run_logged_backup(records, prompt, move |outcome| on_complete(outcome.is_ok()));
}

/// Like [`run_backup`], logging each stage before handing on the outcome
///
/// For callers that log like [`backup_notes`] but still need to tell a
/// cancellation from a failure.
pub fn run_logged_backup<F>(records: &[NoteRecord], prompt: &dyn SavePrompt, on_complete: F)
where
    F: FnOnce(Result<PathBuf, BackupError>) + 'static,
{
    info!(count = records.len(), "Starting notes backup");

    run_backup(records, prompt, move |outcome| {
        match &outcome {
            Ok(path) => info!(path = %path.display(), "Notes backup saved"),
            Err(BackupError::EmptyInput) => warn!("No notes to back up; skipping save prompt"),
            Err(BackupError::Cancelled) => info!("Notes backup cancelled"),
            Err(e) => error!(
                error = %e,
                backtrace = %failure_backtrace(),
                "Notes backup failed"
            ),
        }
        on_complete(outcome);
    });
}

/// Stack trace for failure logs, captured whatever `RUST_BACKTRACE` says
fn failure_backtrace() -> Backtrace {
    Backtrace::force_capture()
}

#[cfg(test)]
mod tests;
