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

use std::{
    backtrace::BacktraceStatus,
    cell::{Cell, RefCell},
    path::PathBuf,
    rc::Rc,
};

use chrono::NaiveDate;

use crate::backup::{
    backup_notes, failure_backtrace, prepare_request, run_backup, run_logged_backup, BackupError,
    BackupErrorKind, PromptError, SaveCallback, SavePrompt, SaveRequest,
};
use crate::core::{Note, NoteRecord};

/// What the fake host answers
enum Answer {
    Path(&'static str),
    Cancel,
    Fail,
    /// Hold on to the callback; the test completes it
    Defer,
}

/// Fake host prompt that records every request
struct FakePrompt {
    answer: Answer,
    requests: RefCell<Vec<SaveRequest>>,
    pending: RefCell<Option<SaveCallback>>,
}

impl FakePrompt {
    fn new(answer: Answer) -> Self {
        Self {
            answer,
            requests: RefCell::new(Vec::new()),
            pending: RefCell::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    fn last_request(&self) -> SaveRequest {
        self.requests.borrow().last().cloned().unwrap()
    }

    fn complete_pending(&self, result: Result<Option<PathBuf>, PromptError>) {
        let callback = self.pending.borrow_mut().take().unwrap();
        callback(result);
    }
}

impl SavePrompt for FakePrompt {
    fn prompt_save(&self, request: SaveRequest, on_done: SaveCallback) {
        self.requests.borrow_mut().push(request);
        match self.answer {
            Answer::Path(path) => on_done(Ok(Some(PathBuf::from(path)))),
            Answer::Cancel => on_done(Ok(None)),
            Answer::Fail => on_done(Err(PromptError::Host("portal unavailable".to_string()))),
            Answer::Defer => *self.pending.borrow_mut() = Some(on_done),
        }
    }
}

/// Helper: records for a couple of notes
fn sample_records() -> Vec<NoteRecord> {
    let mut pinned = Note::new(2, "Ideas", "ünïcödé ✓\n\"quoted\"", "2025-10-15T14:30:25+02:00");
    pinned.extra.insert("pinned".to_string(), "yes".to_string());

    vec![
        Note::new(1, "Groceries", "milk", "2025-10-14T08:00:00+02:00").to_record(),
        pinned.to_record(),
    ]
}

/// Helper: runs `backup_notes` and returns the boolean it reported
fn run_bool(records: &[NoteRecord], prompt: &FakePrompt) -> Option<bool> {
    let result = Rc::new(Cell::new(None));
    let result_clone = result.clone();
    backup_notes(records, prompt, move |ok| result_clone.set(Some(ok)));
    result.get()
}

// ============================================================================
// Empty input
// ============================================================================

#[test]
fn test_empty_input_fails_without_prompt() {
    let prompt = FakePrompt::new(Answer::Path("/tmp/x.json"));

    assert_eq!(run_bool(&[], &prompt), Some(false));
    assert_eq!(prompt.calls(), 0, "No dialog may be shown for empty input");
}

#[test]
fn test_empty_input_kind() {
    let prompt = FakePrompt::new(Answer::Path("/tmp/x.json"));
    let outcome = Rc::new(RefCell::new(None));
    let outcome_clone = outcome.clone();

    run_backup(&[], &prompt, move |result| *outcome_clone.borrow_mut() = Some(result));

    let result = outcome.borrow_mut().take().unwrap();
    let error = result.unwrap_err();
    assert!(matches!(error, BackupError::EmptyInput));
    assert_eq!(error.kind(), BackupErrorKind::EmptyInput);
}

// ============================================================================
// Payload
// ============================================================================

#[test]
fn test_payload_is_exact_json_of_input() {
    let records = sample_records();
    let prompt = FakePrompt::new(Answer::Path("/tmp/x.json"));

    assert_eq!(run_bool(&records, &prompt), Some(true));

    let request = prompt.last_request();
    let text = std::str::from_utf8(&request.bytes).expect("payload must be UTF-8");
    let decoded: Vec<NoteRecord> = serde_json::from_str(text).unwrap();
    assert_eq!(decoded, records, "Decoding the payload must yield the input");
}

#[test]
fn test_request_metadata() {
    let records = sample_records();
    let prompt = FakePrompt::new(Answer::Path("/tmp/x.json"));

    run_bool(&records, &prompt);

    let request = prompt.last_request();
    assert_eq!(request.dialog_title, "Save notes backup");
    assert_eq!(request.allowed_extensions, vec!["json".to_string()]);
    assert!(request.file_name.starts_with("notes_backup_"));
    assert!(request.file_name.ends_with(".json"));

    // File name embeds an ISO date
    let date_part = request
        .file_name
        .trim_start_matches("notes_backup_")
        .trim_end_matches(".json");
    assert!(NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok());
}

#[test]
fn test_prepare_request_uses_given_date() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let request = prepare_request(&sample_records(), date).unwrap();
    assert_eq!(request.file_name, "notes_backup_2024-12-31.json");
}

#[test]
fn test_request_allows_only_json() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let request = prepare_request(&sample_records(), date).unwrap();

    assert!(request.allows(std::path::Path::new("/a/b.json")));
    assert!(request.allows(std::path::Path::new("/a/b.JSON")));
    assert!(!request.allows(std::path::Path::new("/a/b.txt")));
    assert!(!request.allows(std::path::Path::new("/a/b")));
}

// ============================================================================
// Host outcomes
// ============================================================================

#[test]
fn test_cancel_is_failure() {
    let prompt = FakePrompt::new(Answer::Cancel);
    assert_eq!(run_bool(&sample_records(), &prompt), Some(false));
    assert_eq!(prompt.calls(), 1);
}

#[test]
fn test_cancel_kind_is_operation_failed() {
    let prompt = FakePrompt::new(Answer::Cancel);
    let outcome = Rc::new(RefCell::new(None));
    let outcome_clone = outcome.clone();

    run_backup(&sample_records(), &prompt, move |result| {
        *outcome_clone.borrow_mut() = Some(result)
    });

    let error = outcome.borrow_mut().take().unwrap().unwrap_err();
    assert!(matches!(error, BackupError::Cancelled));
    assert_eq!(error.kind(), BackupErrorKind::OperationFailed);
}

#[test]
fn test_host_failure_is_failure() {
    let prompt = FakePrompt::new(Answer::Fail);
    assert_eq!(run_bool(&sample_records(), &prompt), Some(false));
}

#[test]
fn test_any_path_is_success() {
    for path in ["/tmp/backup.json", "", "relative/odd name.json"] {
        let prompt = FakePrompt::new(Answer::Path(path));
        assert_eq!(
            run_bool(&sample_records(), &prompt),
            Some(true),
            "Path {:?} should count as success",
            path
        );
    }
}

#[test]
fn test_success_reports_chosen_path() {
    let prompt = FakePrompt::new(Answer::Path("/backups/notes.json"));
    let outcome = Rc::new(RefCell::new(None));
    let outcome_clone = outcome.clone();

    run_backup(&sample_records(), &prompt, move |result| {
        *outcome_clone.borrow_mut() = Some(result)
    });

    let path = outcome.borrow_mut().take().unwrap().unwrap();
    assert_eq!(path, PathBuf::from("/backups/notes.json"));
}

#[test]
fn test_deferred_prompt_completes_later() {
    let prompt = FakePrompt::new(Answer::Defer);
    let result = Rc::new(Cell::new(None));
    let result_clone = result.clone();

    backup_notes(&sample_records(), &prompt, move |ok| result_clone.set(Some(ok)));
    assert_eq!(result.get(), None, "Nothing reported until the host answers");

    prompt.complete_pending(Ok(Some(PathBuf::from("/later.json"))));
    assert_eq!(result.get(), Some(true));
}

// ============================================================================
// Logged backup: telling cancellation from failure
// ============================================================================

/// Helper: runs the logged backup and returns the detailed outcome
fn run_logged(records: &[NoteRecord], prompt: &FakePrompt) -> Result<PathBuf, BackupError> {
    let outcome = Rc::new(RefCell::new(None));
    let outcome_clone = outcome.clone();
    run_logged_backup(records, prompt, move |result| {
        *outcome_clone.borrow_mut() = Some(result)
    });
    let result = outcome.borrow_mut().take();
    result.unwrap()
}

#[test]
fn test_logged_backup_reports_cancel_as_cancelled() {
    let prompt = FakePrompt::new(Answer::Cancel);
    let error = run_logged(&sample_records(), &prompt).unwrap_err();

    assert!(error.is_cancelled());
    assert_eq!(prompt.calls(), 1);
}

#[test]
fn test_logged_backup_reports_host_failure_as_not_cancelled() {
    let prompt = FakePrompt::new(Answer::Fail);
    let error = run_logged(&sample_records(), &prompt).unwrap_err();

    assert!(!error.is_cancelled(), "A broken host is a failure, not a cancel");
    assert!(matches!(error, BackupError::Prompt(PromptError::Host(_))));
    assert!(error.to_string().contains("portal unavailable"));
}

#[test]
fn test_logged_backup_passes_path_through() {
    let prompt = FakePrompt::new(Answer::Path("/backups/notes.json"));
    let path = run_logged(&sample_records(), &prompt).unwrap();

    assert_eq!(path, PathBuf::from("/backups/notes.json"));
}

#[test]
fn test_empty_input_is_not_cancelled() {
    let prompt = FakePrompt::new(Answer::Cancel);
    let error = run_logged(&[], &prompt).unwrap_err();

    assert!(!error.is_cancelled());
    assert_eq!(prompt.calls(), 0);
}

#[test]
fn test_failure_backtrace_ignores_environment() {
    // Captured even when RUST_BACKTRACE is unset or 0
    assert_eq!(failure_backtrace().status(), BacktraceStatus::Captured);
}
