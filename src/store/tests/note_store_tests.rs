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

use super::super::*;
use std::fs;
use tempfile::TempDir;

/// Helper: Creates a notes file with two known notes
fn create_test_store() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");

    let content = r#"[
  {"id": "1", "title": "Groceries", "content": "milk", "created_at": "", "updated_at": ""},
  {"id": "4", "title": "Ideas", "content": "write a\nnotes app", "pinned": "yes"}
]"#;

    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_open_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("notes.json");

    let store = NoteStore::open(path.clone()).unwrap();

    assert!(store.notes().is_empty());
    assert!(path.parent().unwrap().exists(), "Parent dir should be created");
    assert!(!path.exists(), "File is only created on first write");
}

#[test]
fn test_open_existing_file() {
    let (_temp_dir, path) = create_test_store();
    let store = NoteStore::open(path).unwrap();

    assert_eq!(store.notes().len(), 2);
    assert_eq!(store.get(4).unwrap().title, "Ideas");
    assert_eq!(store.get(4).unwrap().extra["pinned"], "yes");
}

#[test]
fn test_open_empty_file_is_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");
    fs::write(&path, "  \n").unwrap();

    let store = NoteStore::open(path).unwrap();
    assert!(store.notes().is_empty());
}

#[test]
fn test_open_malformed_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");
    fs::write(&path, "{ not json").unwrap();

    let result = NoteStore::open(path);
    assert!(matches!(result, Err(StoreError::Malformed(_))));
}

#[test]
fn test_open_rejects_duplicate_ids() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");
    fs::write(&path, r#"[{"id": "1"}, {"id": "1"}]"#).unwrap();

    let result = NoteStore::open(path);
    assert!(matches!(result, Err(StoreError::DuplicateId(1))));
}

#[test]
fn test_open_reports_bad_record_position() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");
    fs::write(&path, r#"[{"id": "1"}, {"title": "no id"}]"#).unwrap();

    let result = NoteStore::open(path);
    assert!(matches!(result, Err(StoreError::InvalidRecord { index: 1, .. })));
}

#[test]
fn test_changes_persist_across_open() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");

    {
        let mut store = NoteStore::open(path.clone()).unwrap();
        store.add("First", "one").unwrap();
        store.add("Second", "two").unwrap();
    }

    let store = NoteStore::open(path).unwrap();
    let titles: Vec<_> = store.notes().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[test]
fn test_extra_keys_survive_rewrite() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path.clone()).unwrap();

    store.update(1, "Groceries", "milk, eggs").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#""pinned": "yes""#), "Unknown keys must be kept");
}

#[test]
fn test_reload_picks_up_external_changes() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path.clone()).unwrap();

    fs::write(&path, r#"[{"id": "9", "title": "From elsewhere"}]"#).unwrap();

    assert_eq!(store.reload().unwrap(), 1);
    assert_eq!(store.get(9).unwrap().title, "From elsewhere");
    assert!(store.get(1).is_none());
}

// ============================================================================
// CRUD
// ============================================================================

#[test]
fn test_add_assigns_next_id() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path).unwrap();

    let note = store.add("  Padded title  ", "body").unwrap();

    assert_eq!(note.id, 5, "Next id is one past the largest");
    assert_eq!(note.title, "Padded title");
    assert!(!note.created_at.is_empty());
    assert_eq!(note.created_at, note.updated_at);
}

#[test]
fn test_ids_do_not_reuse_after_delete_of_middle() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = NoteStore::open(temp_dir.path().join("notes.json")).unwrap();

    let a = store.add("a", "").unwrap();
    let b = store.add("b", "").unwrap();
    store.delete(a.id).unwrap();
    let c = store.add("c", "").unwrap();

    assert_eq!(c.id, b.id + 1);
}

#[test]
fn test_update_changes_content_and_timestamp() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path).unwrap();

    let updated = store.update(1, "Shopping", "bread").unwrap();

    assert_eq!(updated.title, "Shopping");
    assert_eq!(updated.content, "bread");
    assert!(!updated.updated_at.is_empty());
    assert_eq!(store.get(1).unwrap(), &updated);
}

#[test]
fn test_update_unknown_id() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path).unwrap();

    let result = store.update(99, "x", "y");
    assert!(matches!(result, Err(StoreError::NotFound(99))));
}

#[test]
fn test_delete_removes_note() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path.clone()).unwrap();

    store.delete(1).unwrap();

    assert!(store.get(1).is_none());
    let reopened = NoteStore::open(path).unwrap();
    assert_eq!(reopened.notes().len(), 1);
}

#[test]
fn test_delete_unknown_id() {
    let (_temp_dir, path) = create_test_store();
    let mut store = NoteStore::open(path).unwrap();

    assert!(matches!(store.delete(42), Err(StoreError::NotFound(42))));
    assert_eq!(store.notes().len(), 2, "Nothing should be removed");
}

#[test]
fn test_records_match_notes() {
    let (_temp_dir, path) = create_test_store();
    let store = NoteStore::open(path).unwrap();

    let records = store.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "1");
    assert_eq!(records[1]["pinned"], "yes");
}

// ============================================================================
// Write failures
// ============================================================================

/// Helper: Opens the two-note store, then puts a non-empty directory where
/// the notes file was so every later rename onto it fails
fn open_with_blocked_target() -> (TempDir, PathBuf, NoteStore) {
    let (temp_dir, path) = create_test_store();
    let store = NoteStore::open(path.clone()).unwrap();

    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "untouched").unwrap();

    (temp_dir, path, store)
}

fn assert_target_untouched(path: &Path) {
    assert!(path.is_dir());
    let entries: Vec<_> = fs::read_dir(path).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "untouched");
}

#[test]
fn test_failed_writes_leave_memory_and_disk_unchanged() {
    let (_temp_dir, path, mut store) = open_with_blocked_target();
    let before = store.notes().to_vec();

    let added = store.add("new", "never stored");
    assert!(matches!(added, Err(StoreError::WriteFailed(_))));

    let updated = store.update(1, "Changed", "changed");
    assert!(matches!(updated, Err(StoreError::WriteFailed(_))));

    let deleted = store.delete(4);
    assert!(matches!(deleted, Err(StoreError::WriteFailed(_))));

    let mut incoming = NoteRecord::new();
    incoming.insert("id".to_string(), "9".to_string());
    let imported = store.import_records(&[incoming]);
    assert!(matches!(imported, Err(StoreError::WriteFailed(_))));

    assert_eq!(store.notes(), before.as_slice());
    assert_target_untouched(&path);
}

#[test]
fn test_write_failure_when_parent_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "plain file").unwrap();

    let mut store = NoteStore::open(blocker.join("notes.json")).unwrap();
    let result = store.add("lost", "");

    assert!(matches!(result, Err(StoreError::WriteFailed(_))));
    assert!(store.notes().is_empty());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "plain file");
}
