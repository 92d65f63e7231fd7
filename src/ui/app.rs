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

//! GTK4 Application wrapper
//!
//! This module sets up the GTK4 application lifecycle and creates
//! the main window.
//!
//! # Architecture
//!
//! ```text
//! App (GTK4 Application)
//!   ├─ Builds header and layout
//!   ├─ Creates Controller with GTK hosts
//!   ├─ Binds the notes feed to the shell view
//!   └─ Loads the store off the main thread
//! ```

use gtk4::prelude::*;
use gtk4::{gdk, gio, Application, ApplicationWindow, CssProvider};
use std::{cell::RefCell, path::PathBuf, rc::Rc, time::Duration};
use tracing::{debug, error, info, warn};

use crate::core::NotesFeed;
use crate::store::NoteStore;
use crate::ui::builders::{build_header_bar, build_main_layout};
use crate::ui::file_watcher::FileWatcher;
use crate::ui::hosts::{StackNavigator, WindowFocus};
use crate::ui::{actions, Controller};

/// Store shared by the window's handlers; `None` until loading finishes
pub type SharedStore = Rc<RefCell<Option<NoteStore>>>;

/// Name of the main screen page in the root stack
pub const SHELL_PAGE: &str = "shell";

/// How often the file watcher is polled
const WATCH_INTERVAL: Duration = Duration::from_millis(500);

/// GTK4 Application for managing notes
pub struct App {
    /// GTK4 Application instance
    app: Application,
    notes_path: PathBuf,
}

impl App {
    /// Creates a new App for the notes file at `notes_path`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use notes_manager::ui::App;
    /// use std::path::PathBuf;
    ///
    /// let app = App::new(PathBuf::from("/tmp/notes.json"));
    /// app.run();
    /// ```
    pub fn new(notes_path: PathBuf) -> Self {
        let app = Application::builder()
            .application_id("com.tidynest.notes-manager")
            .build();

        Self { app, notes_path }
    }

    /// Runs the GTK4 application
    ///
    /// Blocks until the application exits.
    pub fn run(self) -> glib::ExitCode {
        let notes_path = self.notes_path.clone();

        self.app.connect_activate(move |app| {
            Self::build_ui(app, notes_path.clone());
        });

        self.app.run_with_args::<&str>(&[])
    }

    /// Loads custom CSS styling for the application
    fn load_css() {
        let Some(display) = gdk::Display::default() else {
            warn!("No display available; skipping custom styling");
            return;
        };

        let provider = CssProvider::new();
        provider.load_from_string(include_str!("style.css"));

        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    /// Builds the main window UI
    fn build_ui(app: &Application, notes_path: PathBuf) {
        Self::load_css();

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Notes")
            .default_width(480)
            .default_height(720)
            .build();

        let (header_bar, add_button) = build_header_bar();
        window.set_titlebar(Some(&header_bar));

        let layout = build_main_layout(&notes_path, add_button.clone());
        window.set_child(Some(&layout.root));

        let feed = Rc::new(NotesFeed::new());
        let store: SharedStore = Rc::new(RefCell::new(None));

        let navigator = Rc::new(StackNavigator::new(
            window.clone(),
            layout.root.clone(),
            store.clone(),
            feed.clone(),
        ));
        let focus = Rc::new(WindowFocus::new(window.clone(), layout.focus_sink.clone().upcast()));
        let controller = Controller::new(navigator, focus);

        // Nav bar <-> Controller
        let nav_bar = layout.nav_bar.clone();
        controller.connect_nav_bar_visibility(move |visible| nav_bar.set_revealed(visible));

        let controller_for_nav = controller.clone();
        layout.nav_bar.connect_selected(move |index| {
            if let Err(e) = controller_for_nav.select_tab(index) {
                warn!(error = %e, "Ignoring tab tap");
            }
        });

        // Transient screens
        let controller_for_add = controller.clone();
        add_button.connect_clicked(move |_| controller_for_add.open_add_note());

        let controller_for_edit = controller.clone();
        layout
            .note_list
            .connect_note_activated(move |note| controller_for_edit.open_edit_note(note));

        controller.bind_feed(&feed, layout.view.clone());

        actions::setup_quit_action(app);
        actions::setup_backup_action(app, &window, store.clone());
        actions::setup_restore_action(app, &window, store.clone(), feed.clone());

        Self::load_notes(notes_path, store, feed);

        window.present();
    }

    /// Opens the store on a worker thread and publishes the result
    fn load_notes(notes_path: PathBuf, store: SharedStore, feed: Rc<NotesFeed>) {
        feed.set_loading();

        glib::spawn_future_local(async move {
            let path_for_open = notes_path.clone();
            let opened = gio::spawn_blocking(move || NoteStore::open(path_for_open)).await;

            match opened {
                Ok(Ok(opened)) => {
                    info!(count = opened.notes().len(), "Notes loaded");
                    *store.borrow_mut() = Some(opened);
                    publish_notes(&store, &feed);
                    Self::start_watching(&notes_path, store, feed);
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Failed to load notes");
                    feed.set_error(format!("Could not load notes:\n{e}"));
                }
                Err(_) => {
                    error!("Note loader thread panicked");
                    feed.set_error("Could not load notes");
                }
            }
        });
    }

    /// Reloads the store when the notes file changes on disk
    fn start_watching(notes_path: &std::path::Path, store: SharedStore, feed: Rc<NotesFeed>) {
        let watcher = match FileWatcher::new(notes_path) {
            Ok(watcher) => watcher,
            Err(e) => {
                warn!(error = %e, "File watching unavailable; external edits need a restart");
                return;
            }
        };

        glib::timeout_add_local(WATCH_INTERVAL, move || {
            if watcher.check_for_changes() {
                debug!("Notes file changed on disk");
                let reloaded = store.borrow_mut().as_mut().map(NoteStore::reload);
                match reloaded {
                    Some(Ok(_)) => publish_notes(&store, &feed),
                    Some(Err(e)) => warn!(error = %e, "Ignoring unreadable notes file"),
                    None => {}
                }
            }
            glib::ControlFlow::Continue
        });
    }
}

/// Pushes the store's current notes to the feed
///
/// The store borrow is released before subscribers run.
pub fn publish_notes(store: &SharedStore, feed: &NotesFeed) {
    let notes = store.borrow().as_ref().map(|store| store.notes().to_vec());
    if let Some(notes) = notes {
        feed.set_data(notes);
    }
}
