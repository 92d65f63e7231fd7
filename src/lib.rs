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

//! Notes Manager
//!
//! A small notes application: a JSON-backed note store, one-shot JSON
//! backups through a host-provided save prompt, and a two-tab main screen
//! (Home / Settings) with a GTK4 front end.
//!
//! # Features
//!
//! - **Notes:** Create, read, update, and delete notes
//! - **Backups:** Save all notes as a dated JSON file; restore by merging
//! - **Atomic Operations:** Every write goes through a temp file and rename
//! - **Toolkit-free Controller:** Tab and navigation state is testable
//!   without a display server
//! - **GTK4 Interface:** Behind the `gui` cargo feature
//!
//! # Architecture
//!
//! - **`core`:** Note types, navigation types and the observable notes feed
//! - **`store`:** The notes file (reading, atomic writes, import)
//! - **`backup`:** Backup helper, save prompts and restore
//! - **`ui`:** Main-screen Controller and, with `gui`, the GTK4 shell
//!
//! # Examples
//!
//! ## Working with the store
//!
//! ```no_run
//! use notes_manager::store::NoteStore;
//!
//! let mut store = NoteStore::open("/tmp/notes.json".into())?;
//! let note = store.add("Groceries", "milk\neggs")?;
//! println!("Saved {}", note);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Backing up
//!
//! ```no_run
//! use notes_manager::backup::{backup_notes, FixedPathPrompt};
//! use notes_manager::store::NoteStore;
//!
//! let store = NoteStore::open("/tmp/notes.json".into())?;
//! let prompt = FixedPathPrompt::new("/tmp".into());
//! backup_notes(&store.records(), &prompt, |saved| println!("saved: {saved}"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backup;
pub mod core;
pub mod store;
pub mod ui;

// Re-export commonly used types for convenience
pub use core::{Note, NoteId, NoteRecord, NotesFeed, NotesState, Route, Tab, Transition};
