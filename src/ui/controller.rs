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

//! MVC Controller - Owns main-screen state and mediates between the notes
//! feed (Model) and the shell widgets (View)
//!
//! # Responsibilities
//!
//! - Track the active tab (Home / Settings)
//! - Track whether the bottom nav bar is visible
//! - Push the add-note and edit-note screens and restore the nav bar when
//!   they are dismissed
//! - Decide what the shell shows for each notes load state
//!
//! # Architecture
//!
//! The Controller talks to its hosts only through the traits below, so it
//! never touches a GTK widget. The GTK shell implements them in
//! `ui::hosts` and `ui::builders`; tests implement them with recording fakes.
//!
//! ```text
//! nav tap ──► select_tab ──► FocusHost (clear, park after frame) ──► tab listeners
//! "+" tap ──► open_add_note ──► nav bar hidden ──► Navigator::push
//!                                                      │ (screen dismissed)
//!                                                      ▼
//!                                              nav bar shown again
//! ```

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{Note, NotesFeed, NotesState, Route, Tab, Transition};

/// Slide-in duration of the add-note screen
pub const ADD_NOTE_TRANSITION: Duration = Duration::from_millis(300);

/// Called by the navigator once a pushed screen has been dismissed
pub type DismissCallback = Box<dyn FnOnce()>;

/// Host capability: present transient screens over the main shell
pub trait Navigator {
    /// Shows `route` using `transition`, calling `on_dismissed` exactly once
    /// when the screen goes away
    fn push(&self, route: Route, transition: Transition, on_dismissed: DismissCallback);
}

/// Host capability: keyboard focus management
pub trait FocusHost {
    /// Removes focus from any text input
    fn clear_focus(&self);
    /// After the next frame, moves focus to an empty placeholder so no
    /// input on the previous tab keeps it
    fn park_focus_after_frame(&self);
}

/// Host capability: draws the main shell
///
/// Tab contents are only built once notes are available.
pub trait ShellView {
    /// Shows a loading indicator in place of the tabs
    fn show_loading(&self);
    /// Shows a load error in place of the tabs
    fn show_error(&self, message: &str);
    /// Builds the Home tab from `notes`
    fn build_home(&self, notes: &[Note]);
    /// Builds the Settings tab
    fn build_settings(&self);
    /// Makes `tab` visible; `show_add_action` toggles the "add note" button
    fn show_tab(&self, tab: Tab, show_add_action: bool);
}

/// Errors reported by the Controller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// Tab index outside the nav bar
    #[error("Invalid tab index: {0}")]
    InvalidTab(usize),
}

type TabListener = Box<dyn Fn(Tab)>;
type VisibilityListener = Box<dyn Fn(bool)>;

/// Main screen controller
///
/// Always handled through `Rc`: dismissal callbacks hold a `Weak` back
/// reference, so a navigator outliving the controller is harmless.
pub struct Controller {
    /// Transient screen presenter
    navigator: Rc<dyn Navigator>,
    /// Focus management
    focus: Rc<dyn FocusHost>,
    /// Active primary tab
    selected: Cell<Tab>,
    /// Bottom nav bar visibility
    nav_bar_visible: Cell<bool>,
    /// Transient screens currently on top of the shell
    open_screens: Cell<usize>,
    tab_listeners: RefCell<Vec<TabListener>>,
    visibility_listeners: RefCell<Vec<VisibilityListener>>,
}

impl Controller {
    /// Creates a Controller showing the Home tab with the nav bar visible
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use notes_manager::ui::{Controller, FocusHost, Navigator};
    /// # use std::rc::Rc;
    /// # fn hosts() -> (Rc<dyn Navigator>, Rc<dyn FocusHost>) { unimplemented!() }
    /// let (navigator, focus) = hosts();
    /// let controller = Controller::new(navigator, focus);
    /// controller.select_tab(1)?;
    /// controller.open_add_note();
    /// # Ok::<(), notes_manager::ui::ControllerError>(())
    /// ```
    pub fn new(navigator: Rc<dyn Navigator>, focus: Rc<dyn FocusHost>) -> Rc<Self> {
        Rc::new(Self {
            navigator,
            focus,
            selected: Cell::new(Tab::Home),
            nav_bar_visible: Cell::new(true),
            open_screens: Cell::new(0),
            tab_listeners: RefCell::new(Vec::new()),
            visibility_listeners: RefCell::new(Vec::new()),
        })
    }

    /// Currently visible tab
    pub fn selected_tab(&self) -> Tab {
        self.selected.get()
    }

    /// Whether the nav bar is currently shown
    pub fn nav_bar_visible(&self) -> bool {
        self.nav_bar_visible.get()
    }

    /// Registers a callback for tab changes
    pub fn connect_tab_changed<F>(&self, callback: F)
    where
        F: Fn(Tab) + 'static,
    {
        self.tab_listeners.borrow_mut().push(Box::new(callback));
    }

    /// Registers a callback for nav bar visibility changes
    pub fn connect_nav_bar_visibility<F>(&self, callback: F)
    where
        F: Fn(bool) + 'static,
    {
        self.visibility_listeners.borrow_mut().push(Box::new(callback));
    }

    /// Handles a tap on nav bar item `index`
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Tab changed
    /// * `Ok(false)` - `index` is already active; nothing happened
    /// * `Err(ControllerError::InvalidTab)` - `index` is not a tab
    pub fn select_tab(&self, index: usize) -> Result<bool, ControllerError> {
        let tab = Tab::from_index(index).ok_or(ControllerError::InvalidTab(index))?;

        if tab == self.selected.get() {
            return Ok(false);
        }

        debug!(from = %self.selected.get(), to = %tab, "Switching tab");
        self.selected.set(tab);

        // Stop the previous tab's inputs from keeping focus
        self.focus.clear_focus();
        self.focus.park_focus_after_frame();

        for listener in self.tab_listeners.borrow().iter() {
            listener(tab);
        }

        Ok(true)
    }

    /// Opens the add-note screen, sliding in from the right
    ///
    /// The nav bar is hidden immediately and shown again once the screen
    /// is dismissed.
    pub fn open_add_note(self: &Rc<Self>) {
        info!("Opening add-note screen");
        self.push_transient(
            Route::AddNote,
            Transition::SlideFromRight {
                duration: ADD_NOTE_TRANSITION,
            },
        );
    }

    /// Opens the edit screen for `note` with the host's default transition
    pub fn open_edit_note(self: &Rc<Self>, note: &Note) {
        info!(id = note.id, "Opening edit-note screen");
        self.push_transient(
            Route::EditNote {
                id: note.id,
                hero_tag: note.hero_tag(),
            },
            Transition::Platform,
        );
    }

    /// Draws the shell for the given notes state
    ///
    /// Tabs are only built from `Data`; `Loading` and `Error` replace them.
    pub fn render(&self, state: &NotesState, view: &dyn ShellView) {
        match state {
            NotesState::Loading => view.show_loading(),
            NotesState::Error(message) => view.show_error(message),
            NotesState::Data(notes) => {
                view.build_home(notes);
                view.build_settings();
                let tab = self.selected.get();
                view.show_tab(tab, tab == Tab::Home);
            }
        }
    }

    /// Renders `feed` now and after every change
    ///
    /// Tab switches re-show the current tab without rebuilding contents.
    pub fn bind_feed(self: &Rc<Self>, feed: &NotesFeed, view: Rc<dyn ShellView>) {
        self.render(&feed.state(), view.as_ref());

        let weak = Rc::downgrade(self);
        let view_for_feed = view.clone();
        feed.subscribe(move |state| {
            if let Some(controller) = weak.upgrade() {
                controller.render(state, view_for_feed.as_ref());
            }
        });

        self.connect_tab_changed(move |tab| view.show_tab(tab, tab == Tab::Home));
    }

    fn push_transient(self: &Rc<Self>, route: Route, transition: Transition) {
        self.focus.clear_focus();
        self.open_screens.set(self.open_screens.get() + 1);
        self.set_nav_bar_visible(false);

        let weak: Weak<Self> = Rc::downgrade(self);
        self.navigator.push(
            route,
            transition,
            Box::new(move || {
                if let Some(controller) = weak.upgrade() {
                    controller.on_transient_dismissed();
                }
            }),
        );
    }

    fn on_transient_dismissed(&self) {
        let remaining = self.open_screens.get().saturating_sub(1);
        self.open_screens.set(remaining);
        debug!(remaining, "Transient screen dismissed");

        if remaining == 0 {
            self.set_nav_bar_visible(true);
        }
    }

    fn set_nav_bar_visible(&self, visible: bool) {
        if self.nav_bar_visible.replace(visible) == visible {
            return;
        }

        for listener in self.visibility_listeners.borrow().iter() {
            listener(visible);
        }
    }
}
