//! Note list component
//!
//! Displays all notes in a scrollable list view.
//! Each row shows the title and the first line of the content.

use gtk4::{prelude::*, Align, Box as GtkBox, Label, ListBox, Orientation, ScrolledWindow};
use std::{cell::RefCell, rc::Rc};

use crate::core::Note;

/// Displays a scrollable list of notes
pub struct NoteList {
    /// Root widget (scrollable container)
    widget: ScrolledWindow,
    /// List box containing rows
    list_box: ListBox,
    /// Cache of currently displayed notes
    current_notes: Rc<RefCell<Vec<Note>>>,
}

impl NoteList {
    /// Creates an empty note list
    pub fn new() -> Self {
        // Create scrollable container
        let scrolled_window = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .build();

        let list_box = ListBox::builder()
            .selection_mode(gtk4::SelectionMode::None)
            .activate_on_single_click(true)
            .build();
        list_box.add_css_class("boxed-list");

        // Shown by the list box whenever it has no rows
        let empty_label = Label::builder()
            .label("No notes yet. Press + to write one.")
            .margin_top(24)
            .build();
        empty_label.add_css_class("dim-label");
        list_box.set_placeholder(Some(&empty_label));

        scrolled_window.set_child(Some(&list_box));

        Self {
            widget: scrolled_window,
            list_box,
            current_notes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns the root widget
    pub fn widget(&self) -> &ScrolledWindow {
        &self.widget
    }

    /// Replaces all rows with `notes`
    pub fn update_with_notes(&self, notes: &[Note]) {
        self.list_box.remove_all();
        *self.current_notes.borrow_mut() = notes.to_vec();

        for note in notes {
            self.list_box.append(&Self::create_row(note));
        }
    }

    /// Calls `callback` with the note of an activated row
    pub fn connect_note_activated<F>(&self, callback: F)
    where
        F: Fn(&Note) + 'static,
    {
        let current_notes = self.current_notes.clone();

        self.list_box.connect_row_activated(move |_list, row| {
            // Clone out of the cache so no borrow is held during the callback
            let note = usize::try_from(row.index())
                .ok()
                .and_then(|index| current_notes.borrow().get(index).cloned());

            if let Some(note) = note {
                callback(&note);
            }
        });
    }

    /// Create a single row widget for a note
    fn create_row(note: &Note) -> GtkBox {
        let row = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(2)
            .margin_start(12)
            .margin_end(12)
            .margin_top(8)
            .margin_bottom(8)
            .build();

        // Hero tag lets the edit screen find its source row
        row.set_widget_name(&note.hero_tag());

        let title_text = if note.title.is_empty() { "Untitled" } else { note.title.as_str() };
        let title = Label::builder()
            .label(title_text)
            .halign(Align::Start)
            .ellipsize(gtk4::pango::EllipsizeMode::End)
            .build();
        title.add_css_class("heading");

        let preview = Label::builder()
            .label(note.preview())
            .halign(Align::Start)
            .ellipsize(gtk4::pango::EllipsizeMode::End)
            .build();
        preview.add_css_class("dim-label");

        row.append(&title);
        row.append(&preview);
        row
    }
}

impl Default for NoteList {
    fn default() -> Self {
        Self::new()
    }
}
