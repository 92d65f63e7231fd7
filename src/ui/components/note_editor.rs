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

//! Note editor page
//!
//! Full-window page used for both the add-note and edit-note screens. It is
//! pushed on top of the main shell and reports a single outcome when the
//! user leaves it.

use gtk4::{
    prelude::*, Align, Box as GtkBox, Button, Entry, Label, Orientation, ScrolledWindow, TextView,
    WrapMode,
};
use std::rc::Rc;

use crate::core::Note;

/// How the user left the editor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Save the entered title and content
    Save { title: String, content: String },
    /// Delete the note being edited
    Delete,
    /// Leave without changes
    Cancel,
}

/// Title + content form with Save / Cancel (and Delete when editing)
pub struct NoteEditor {
    /// Root widget
    widget: GtkBox,
    title_entry: Entry,
    content_view: TextView,
    save_button: Button,
    cancel_button: Button,
    delete_button: Option<Button>,
}

impl NoteEditor {
    /// Creates an editor, pre-filled from `note` when editing
    pub fn new(note: Option<&Note>) -> Self {
        let widget = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(12)
            .margin_start(16)
            .margin_end(16)
            .margin_top(16)
            .margin_bottom(16)
            .build();

        if let Some(note) = note {
            widget.set_widget_name(&note.hero_tag());
        }

        let heading = Label::builder()
            .label(if note.is_some() { "Edit note" } else { "New note" })
            .halign(Align::Start)
            .build();
        heading.add_css_class("title-2");

        let title_entry = Entry::builder()
            .placeholder_text("Title")
            .text(note.map(|n| n.title.as_str()).unwrap_or(""))
            .hexpand(true)
            .build();

        let content_view = TextView::builder()
            .wrap_mode(WrapMode::WordChar)
            .vexpand(true)
            .build();
        if let Some(note) = note {
            content_view.buffer().set_text(&note.content);
        }

        let scrolled = ScrolledWindow::builder()
            .vexpand(true)
            .child(&content_view)
            .build();
        scrolled.add_css_class("frame");

        // Button row
        let button_box = GtkBox::new(Orientation::Horizontal, 12);
        button_box.set_halign(Align::End);

        let delete_button = note.map(|_| {
            let button = Button::builder().label("Delete").build();
            button.add_css_class("destructive-action");
            button_box.append(&button);
            button
        });

        let cancel_button = Button::builder().label("Cancel").build();
        let save_button = Button::builder().label("Save").build();
        save_button.add_css_class("suggested-action");

        button_box.append(&cancel_button);
        button_box.append(&save_button);

        widget.append(&heading);
        widget.append(&title_entry);
        widget.append(&scrolled);
        widget.append(&button_box);

        Self {
            widget,
            title_entry,
            content_view,
            save_button,
            cancel_button,
            delete_button,
        }
    }

    /// Returns the root widget
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    /// Moves keyboard focus to the title field
    pub fn focus_title(&self) {
        self.title_entry.grab_focus();
    }

    /// Calls `callback` when the user saves, deletes or cancels
    pub fn connect_finished<F>(&self, callback: F)
    where
        F: Fn(EditorOutcome) + 'static,
    {
        let callback = Rc::new(callback);

        let title_entry = self.title_entry.clone();
        let content_view = self.content_view.clone();
        let on_save = callback.clone();
        self.save_button.connect_clicked(move |_| {
            let buffer = content_view.buffer();
            let (start, end) = buffer.bounds();
            on_save(EditorOutcome::Save {
                title: title_entry.text().to_string(),
                content: buffer.text(&start, &end, false).to_string(),
            });
        });

        let on_cancel = callback.clone();
        self.cancel_button
            .connect_clicked(move |_| on_cancel(EditorOutcome::Cancel));

        if let Some(delete_button) = &self.delete_button {
            let on_delete = callback.clone();
            delete_button.connect_clicked(move |_| on_delete(EditorOutcome::Delete));
        }
    }
}
