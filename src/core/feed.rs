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

//! Observable notes collection
//!
//! The notes shown by the UI arrive asynchronously (loaded off the main
//! thread, reloaded when the file changes). `NotesFeed` holds the latest
//! state and tells subscribers whenever it changes.

use std::cell::RefCell;

use crate::core::types::Note;

/// Load state of the notes collection
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum NotesState {
    /// Notes are being read
    #[default]
    Loading,
    /// Notes are available
    Data(Vec<Note>),
    /// Loading failed; the message is shown to the user as-is
    Error(String),
}

type Subscriber = Box<dyn Fn(&NotesState)>;

/// Single-threaded holder for the current `NotesState`
///
/// Subscribers run synchronously, in subscription order, on every change.
/// They must not subscribe to the same feed from inside the callback.
#[derive(Default)]
pub struct NotesFeed {
    state: RefCell<NotesState>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl NotesFeed {
    /// Creates a feed in the `Loading` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state
    pub fn state(&self) -> NotesState {
        self.state.borrow().clone()
    }

    /// Returns the notes if the feed holds data
    pub fn notes(&self) -> Option<Vec<Note>> {
        match &*self.state.borrow() {
            NotesState::Data(notes) => Some(notes.clone()),
            _ => None,
        }
    }

    /// Registers a callback invoked after each state change
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&NotesState) + 'static,
    {
        self.subscribers.borrow_mut().push(Box::new(callback));
    }

    /// Marks the collection as loading
    pub fn set_loading(&self) {
        self.replace(NotesState::Loading);
    }

    /// Publishes a freshly loaded list
    pub fn set_data(&self, notes: Vec<Note>) {
        self.replace(NotesState::Data(notes));
    }

    /// Publishes a load failure
    pub fn set_error(&self, message: impl Into<String>) {
        self.replace(NotesState::Error(message.into()));
    }

    fn replace(&self, next: NotesState) {
        // Release the state borrow before notifying so subscribers may read it
        *self.state.borrow_mut() = next;
        let snapshot = self.state();

        for subscriber in self.subscribers.borrow().iter() {
            subscriber(&snapshot);
        }
    }
}
