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

//! GTK4 implementations of the Controller's and backup helper's host traits
//!
//! - `StackNavigator` - transient screens as pages of the root `Stack`
//! - `WindowFocus` - focus clearing and parking on the main window
//! - `GtkSavePrompt` - `gtk4::FileDialog` save prompt

use gtk4::{
    gio, prelude::*, ApplicationWindow, FileDialog, FileFilter, Stack, StackTransitionType,
    Widget,
};
use std::{cell::Cell, rc::Rc, time::Duration};
use tracing::{debug, error, info, warn};

use crate::backup::{
    prompt::{check_extension, write_payload},
    PromptError, SaveCallback, SavePrompt, SaveRequest,
};
use crate::core::{NoteId, NotesFeed, Route, Transition};
use crate::store::StoreError;
use crate::ui::app::{publish_notes, SharedStore, SHELL_PAGE};
use crate::ui::components::{EditorOutcome, NoteEditor};
use crate::ui::{DismissCallback, FocusHost, Navigator};

/// Duration of the host's default (crossfade) transition, in milliseconds
const PLATFORM_TRANSITION_MS: u32 = 200;

/// Presents transient screens as pages of the window's root `Stack`
pub struct StackNavigator {
    window: ApplicationWindow,
    /// Root stack: the `shell` page plus any open transient pages
    root: Stack,
    store: SharedStore,
    feed: Rc<NotesFeed>,
    /// Source of unique page names
    pushed: Cell<u64>,
}

impl StackNavigator {
    pub fn new(window: ApplicationWindow, root: Stack, store: SharedStore, feed: Rc<NotesFeed>) -> Self {
        Self {
            window,
            root,
            store,
            feed,
            pushed: Cell::new(0),
        }
    }

    fn apply_transition(&self, transition: Transition) {
        match transition {
            Transition::SlideFromRight { duration } => {
                self.root.set_transition_type(StackTransitionType::SlideLeft);
                self.root
                    .set_transition_duration(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX));
            }
            Transition::Platform => {
                self.root.set_transition_type(StackTransitionType::Crossfade);
                self.root.set_transition_duration(PLATFORM_TRANSITION_MS);
            }
        }
    }
}

impl Navigator for StackNavigator {
    fn push(&self, route: Route, transition: Transition, on_dismissed: DismissCallback) {
        let note = match &route {
            Route::AddNote => None,
            Route::EditNote { id, .. } => {
                let found = self
                    .store
                    .borrow()
                    .as_ref()
                    .and_then(|store| store.get(*id).cloned());
                match found {
                    Some(note) => Some(note),
                    None => {
                        warn!(id, "Note to edit no longer exists");
                        on_dismissed();
                        return;
                    }
                }
            }
        };

        let editor = NoteEditor::new(note.as_ref());
        let page: Widget = editor.widget().clone().upcast();

        let page_name = format!("transient-{}", self.pushed.get());
        self.pushed.set(self.pushed.get() + 1);

        self.root.add_named(&page, Some(page_name.as_str()));
        self.apply_transition(transition);
        self.root.set_visible_child_name(&page_name);
        editor.focus_title();
        debug!(page = %page_name, ?route, "Pushed transient screen");

        let edited_id = note.as_ref().map(|note| note.id);
        let pending = Rc::new(Cell::new(Some(on_dismissed)));
        let root = self.root.clone();
        let store = self.store.clone();
        let feed = self.feed.clone();
        let window = self.window.clone();

        editor.connect_finished(move |outcome| {
            if let Err(e) = apply_outcome(&store, edited_id, &outcome) {
                // Keep the editor open so nothing typed is lost
                error!(error = %e, "Failed to save note");
                gtk4::AlertDialog::builder()
                    .modal(true)
                    .message("Could not save note")
                    .detail(e.to_string())
                    .buttons(vec!["OK"])
                    .build()
                    .show(Some(&window));
                return;
            }

            publish_notes(&store, &feed);

            root.set_transition_type(StackTransitionType::SlideRight);
            root.set_visible_child_name(SHELL_PAGE);

            // Remove the page once it has slid away
            let root_for_cleanup = root.clone();
            let page_for_cleanup = page.clone();
            glib::timeout_add_local_once(
                Duration::from_millis(u64::from(root.transition_duration())),
                move || root_for_cleanup.remove(&page_for_cleanup),
            );

            if let Some(on_dismissed) = pending.take() {
                on_dismissed();
            }
        });
    }
}

/// Writes the editor's outcome to the store
fn apply_outcome(
    store: &SharedStore,
    edited_id: Option<NoteId>,
    outcome: &EditorOutcome,
) -> Result<(), StoreError> {
    let mut guard = store.borrow_mut();
    let Some(store) = guard.as_mut() else {
        warn!("Editor closed before notes finished loading; change dropped");
        return Ok(());
    };

    match (outcome, edited_id) {
        (EditorOutcome::Cancel, _) => Ok(()),
        (EditorOutcome::Save { title, content }, None) => {
            if title.trim().is_empty() && content.trim().is_empty() {
                info!("Discarding empty new note");
                return Ok(());
            }
            store.add(title, content).map(|_| ())
        }
        (EditorOutcome::Save { title, content }, Some(id)) => {
            store.update(id, title, content).map(|_| ())
        }
        (EditorOutcome::Delete, Some(id)) => store.delete(id),
        (EditorOutcome::Delete, None) => Ok(()),
    }
}

/// Focus management on the main window
pub struct WindowFocus {
    window: ApplicationWindow,
    /// Empty focusable widget that soaks up focus after tab switches
    sink: Widget,
}

impl WindowFocus {
    pub fn new(window: ApplicationWindow, sink: Widget) -> Self {
        Self { window, sink }
    }
}

impl FocusHost for WindowFocus {
    fn clear_focus(&self) {
        self.window.set_focus(None::<&Widget>);
    }

    fn park_focus_after_frame(&self) {
        let sink = self.sink.clone();
        glib::idle_add_local_once(move || {
            sink.grab_focus();
        });
    }
}

/// Save prompt backed by the portal-aware `gtk4::FileDialog`
pub struct GtkSavePrompt {
    window: ApplicationWindow,
}

impl GtkSavePrompt {
    pub fn new(window: ApplicationWindow) -> Self {
        Self { window }
    }
}

impl SavePrompt for GtkSavePrompt {
    fn prompt_save(&self, request: SaveRequest, on_done: SaveCallback) {
        let filter = FileFilter::new();
        filter.set_name(Some("JSON files"));
        for extension in &request.allowed_extensions {
            filter.add_suffix(extension);
        }

        let filters = gio::ListStore::new::<FileFilter>();
        filters.append(&filter);

        let file_dialog = FileDialog::builder()
            .title(request.dialog_title.as_str())
            .initial_name(request.file_name.as_str())
            .filters(&filters)
            .default_filter(&filter)
            .modal(true)
            .build();

        file_dialog.save(Some(&self.window), None::<&gio::Cancellable>, move |result| {
            let outcome = match result {
                Ok(file) => match file.path() {
                    Some(path) => check_extension(&path, &request)
                        .and_then(|()| write_payload(&path, &request.bytes))
                        .map(|()| Some(path)),
                    None => Err(PromptError::Rejected(
                        "Chosen location is not a local file".to_string(),
                    )),
                },
                Err(e)
                    if e.matches(gtk4::DialogError::Dismissed)
                        || e.matches(gtk4::DialogError::Cancelled) =>
                {
                    Ok(None)
                }
                Err(e) => Err(PromptError::Host(e.to_string())),
            };
            on_done(outcome);
        });
    }
}
