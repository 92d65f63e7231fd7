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

//! Layout builder
//!
//! Creates the main application layout structure:
//!
//! ```text
//! root Stack
//! ├── "shell"            main screen
//! │   ├── content Stack  "loading" | "error" | "tabs"
//! │   │   └── tabs Stack "home" (NoteList) | "settings" (SettingsPage)
//! │   └── NavBar
//! └── "transient-N"      pushed editor pages (see `ui::hosts`)
//! ```

use gtk4::{
    prelude::*, Align, Box as GtkBox, Button, Label, Orientation, Spinner, Stack,
    StackTransitionType,
};
use std::{path::Path, rc::Rc};

use crate::core::{Note, Tab};
use crate::ui::app::SHELL_PAGE;
use crate::ui::components::{NavBar, NoteList, SettingsPage};
use crate::ui::ShellView;

const LOADING_PAGE: &str = "loading";
const ERROR_PAGE: &str = "error";
const TABS_PAGE: &str = "tabs";

/// Widgets the app wires to the Controller after building the layout
pub struct ShellLayout {
    /// Root stack; the Navigator pushes pages onto it
    pub root: Stack,
    pub view: Rc<GtkShellView>,
    pub nav_bar: Rc<NavBar>,
    pub note_list: Rc<NoteList>,
    /// Invisible focus target used after tab switches
    pub focus_sink: GtkBox,
}

/// Builds the main application layout
///
/// `add_button` lives in the header bar but is shown and hidden by the view
/// together with the Home tab.
pub fn build_main_layout(notes_path: &Path, add_button: Button) -> ShellLayout {
    let shell = GtkBox::new(Orientation::Vertical, 0);

    // Loading page
    let spinner = Spinner::builder()
        .spinning(true)
        .width_request(32)
        .height_request(32)
        .halign(Align::Center)
        .valign(Align::Center)
        .build();

    // Error page
    let error_label = Label::builder()
        .wrap(true)
        .justify(gtk4::Justification::Center)
        .halign(Align::Center)
        .valign(Align::Center)
        .margin_start(24)
        .margin_end(24)
        .build();
    error_label.add_css_class("error");

    // Tabs
    let note_list = Rc::new(NoteList::new());
    let settings = SettingsPage::new(notes_path);

    let tabs = Stack::builder()
        .transition_type(StackTransitionType::Crossfade)
        .vexpand(true)
        .build();
    tabs.add_named(note_list.widget(), Some(Tab::Home.name()));
    tabs.add_named(settings.widget(), Some(Tab::Settings.name()));

    let content = Stack::builder().vexpand(true).build();
    content.add_named(&spinner, Some(LOADING_PAGE));
    content.add_named(&error_label, Some(ERROR_PAGE));
    content.add_named(&tabs, Some(TABS_PAGE));

    let nav_bar = Rc::new(NavBar::new());

    let focus_sink = GtkBox::builder().focusable(true).build();

    shell.append(&focus_sink);
    shell.append(&content);
    shell.append(nav_bar.widget());

    let root = Stack::new();
    root.add_named(&shell, Some(SHELL_PAGE));
    root.set_visible_child_name(SHELL_PAGE);

    let view = Rc::new(GtkShellView {
        content,
        error_label,
        tabs,
        note_list: note_list.clone(),
        settings,
        add_button,
        nav_bar: nav_bar.clone(),
    });

    ShellLayout {
        root,
        view,
        nav_bar,
        note_list,
        focus_sink,
    }
}

/// GTK rendering of the main screen
pub struct GtkShellView {
    content: Stack,
    error_label: Label,
    tabs: Stack,
    note_list: Rc<NoteList>,
    settings: SettingsPage,
    add_button: Button,
    nav_bar: Rc<NavBar>,
}

impl ShellView for GtkShellView {
    fn show_loading(&self) {
        self.add_button.set_visible(false);
        self.content.set_visible_child_name(LOADING_PAGE);
    }

    fn show_error(&self, message: &str) {
        self.add_button.set_visible(false);
        self.error_label.set_text(message);
        self.content.set_visible_child_name(ERROR_PAGE);
    }

    fn build_home(&self, notes: &[Note]) {
        self.note_list.update_with_notes(notes);
        self.settings.refresh(notes.len());
    }

    fn build_settings(&self) {
        // Settings only depends on the note count, refreshed in build_home
    }

    fn show_tab(&self, tab: Tab, show_add_action: bool) {
        self.content.set_visible_child_name(TABS_PAGE);
        self.tabs.set_visible_child_name(tab.name());
        self.nav_bar.set_active(tab);
        self.add_button.set_visible(show_add_action);
    }
}
