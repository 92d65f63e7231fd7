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

//! Note persistence with atomic writes.
//!
//! The notes file is a JSON array of flat records, the same format as a
//! backup, so a backup can be dropped in place of the notes file.
//!
//! - **Atomic writes**: every mutation rewrites the whole file via temp-file-then-rename
//! - **Consistency**: a failed write leaves both the file and the in-memory list unchanged
//! - **Lossless**: unknown record keys survive load/save cycles
//!
//! # Example
//!
//! ```no_run
//! use notes_manager::store::NoteStore;
//!
//! let mut store = NoteStore::open("/home/user/.local/share/notes-manager/notes.json".into())?;
//! let note = store.add("Groceries", "milk")?;
//! store.update(note.id, "Groceries", "milk\neggs")?;
//! println!("{} notes", store.notes().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod atomic;
mod error;

pub use atomic::write_atomic;
pub use error::StoreError;

use chrono::Local;
use std::{collections::HashSet, fs, path::{Path, PathBuf}};
use tracing::{debug, info, warn};

use crate::core::{Note, NoteId, NoteRecord};

/// Outcome of merging backup records into the store
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImportSummary {
    /// Records whose id was not in the store
    pub added: usize,
    /// Records that overwrote an existing note with the same id
    pub replaced: usize,
}

/// Manages the notes file.
///
/// Holds the notes in memory; every mutating call persists the complete
/// list before updating the in-memory copy.
#[derive(Debug)]
pub struct NoteStore {
    /// Path to the notes file.
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Opens the store at `path`, loading existing notes.
    ///
    /// A missing file is an empty store; the file is created on the first
    /// write. Missing parent directories are created immediately.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` or `StoreError::InvalidRecord` if the
    /// file exists but cannot be decoded, and `StoreError::Io` if it cannot
    /// be read.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let parent = path
            .parent()
            .ok_or_else(|| StoreError::NoParentDir(path.clone()))?;

        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(dir = %parent.display(), "Creating notes directory");
            fs::create_dir_all(parent)?;
        }

        // Warn if the notes file is a symlink (allowed, but worth knowing)
        if path.read_link().is_ok() {
            warn!(path = %path.display(), "Notes file is a symlink");
        }

        let notes = Self::read_notes(&path)?;
        info!(path = %path.display(), count = notes.len(), "Opened note store");

        Ok(Self { path, notes })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All notes in file order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up a note by id
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Every note as a flat record, ready for backup
    pub fn records(&self) -> Vec<NoteRecord> {
        self.notes.iter().map(Note::to_record).collect()
    }

    /// Re-reads the notes file, discarding the in-memory list.
    ///
    /// Used when the file changes on disk behind our back.
    pub fn reload(&mut self) -> Result<usize, StoreError> {
        self.notes = Self::read_notes(&self.path)?;
        debug!(count = self.notes.len(), "Reloaded notes");
        Ok(self.notes.len())
    }

    /// Creates a note with the next free id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IdSpaceExhausted` if a note already holds the
    /// largest possible id.
    pub fn add(&mut self, title: &str, content: &str) -> Result<Note, StoreError> {
        let note = Note::new(self.next_id()?, title.trim(), content, &now());

        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit(next)?;

        info!(id = note.id, "Added note");
        Ok(note)
    }

    /// Replaces the title and content of an existing note.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no note has `id`.
    pub fn update(&mut self, id: NoteId, title: &str, content: &str) -> Result<Note, StoreError> {
        let mut next = self.notes.clone();
        let note = next
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))?;

        note.title = title.trim().to_string();
        note.content = content.to_string();
        note.updated_at = now();
        let updated = note.clone();

        self.commit(next)?;

        info!(id, "Updated note");
        Ok(updated)
    }

    /// Removes a note.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no note has `id`.
    pub fn delete(&mut self, id: NoteId) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        let next = self.notes.iter().filter(|note| note.id != id).cloned().collect();
        self.commit(next)?;

        info!(id, "Deleted note");
        Ok(())
    }

    /// Merges backup records into the store.
    ///
    /// Records whose id matches an existing note replace it in place; the
    /// rest are appended in record order. Every record is validated before
    /// anything is written, so a bad record leaves the store unchanged.
    pub fn import_records(&mut self, records: &[NoteRecord]) -> Result<ImportSummary, StoreError> {
        let incoming = decode_records(records)?;

        let mut next = self.notes.clone();
        let mut summary = ImportSummary::default();

        for note in incoming {
            match next.iter_mut().find(|existing| existing.id == note.id) {
                Some(existing) => {
                    *existing = note;
                    summary.replaced += 1;
                }
                None => {
                    next.push(note);
                    summary.added += 1;
                }
            }
        }

        self.commit(next)?;

        info!(added = summary.added, replaced = summary.replaced, "Imported notes");
        Ok(summary)
    }

    /// Ids grow monotonically: one past the largest id present
    fn next_id(&self) -> Result<NoteId, StoreError> {
        let max = self.notes.iter().map(|note| note.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(StoreError::IdSpaceExhausted(max))
    }

    /// Persists `next` atomically, then adopts it as the in-memory list
    fn commit(&mut self, next: Vec<Note>) -> Result<(), StoreError> {
        let records: Vec<NoteRecord> = next.iter().map(Note::to_record).collect();
        let bytes = serde_json::to_vec_pretty(&records)?;

        write_atomic(&self.path, &bytes)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {}", self.path.display(), e)))?;

        self.notes = next;
        Ok(())
    }

    fn read_notes(path: &Path) -> Result<Vec<Note>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<NoteRecord> = serde_json::from_str(&content)?;
        decode_records(&records)
    }
}

/// Converts records to notes, rejecting bad records and duplicate ids
fn decode_records(records: &[NoteRecord]) -> Result<Vec<Note>, StoreError> {
    let mut seen = HashSet::new();

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let note = Note::from_record(record)
                .map_err(|source| StoreError::InvalidRecord { index, source })?;
            if !seen.insert(note.id) {
                return Err(StoreError::DuplicateId(note.id));
            }
            Ok(note)
        })
        .collect()
}

fn now() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests;
