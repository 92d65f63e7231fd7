//! Settings tab
//!
//! Shows where notes are stored and offers backup / restore. The buttons
//! trigger the `app.backup` and `app.restore` actions, so the header menu
//! and this page share one implementation.

use gtk4::{prelude::*, Align, Box as GtkBox, Button, Frame, Grid, Label, Orientation};
use std::path::Path;

/// Settings tab contents
pub struct SettingsPage {
    /// Root widget
    widget: GtkBox,
    /// Number of notes currently stored
    count_label: Label,
}

impl SettingsPage {
    /// Creates the page for the notes file at `notes_path`
    pub fn new(notes_path: &Path) -> Self {
        let widget = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(16)
            .margin_start(16)
            .margin_end(16)
            .margin_top(16)
            .margin_bottom(16)
            .build();

        let grid = Grid::builder()
            .row_spacing(8)
            .column_spacing(12)
            .margin_start(12)
            .margin_end(12)
            .margin_top(12)
            .margin_bottom(12)
            .build();

        let (path_header, path_value) = Self::create_label_row("Notes file:", &notes_path.display().to_string());
        let (count_header, count_label) = Self::create_label_row("Notes:", "0");
        grid.attach(&path_header, 0, 0, 1, 1);
        grid.attach(&path_value, 1, 0, 1, 1);
        grid.attach(&count_header, 0, 1, 1, 1);
        grid.attach(&count_label, 1, 1, 1, 1);

        let storage_frame = Frame::builder().label("Storage").child(&grid).build();

        let button_box = GtkBox::new(Orientation::Horizontal, 12);
        let backup_button = Button::builder()
            .label("Back up notes…")
            .action_name("app.backup")
            .build();
        backup_button.add_css_class("suggested-action");
        let restore_button = Button::builder()
            .label("Restore from backup…")
            .action_name("app.restore")
            .build();
        button_box.append(&backup_button);
        button_box.append(&restore_button);

        widget.append(&storage_frame);
        widget.append(&button_box);

        Self {
            widget,
            count_label,
        }
    }

    /// Returns the root widget
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    /// Updates the note count
    pub fn refresh(&self, note_count: usize) {
        self.count_label.set_text(&note_count.to_string());
    }

    /// Header/value label pair for the storage grid
    fn create_label_row(header_text: &str, value: &str) -> (Label, Label) {
        let header = Label::builder()
            .label(header_text)
            .halign(Align::End)
            .build();
        header.add_css_class("dim-label");

        let value = Label::builder()
            .label(value)
            .halign(Align::Start)
            .selectable(true)
            .wrap(true)
            .build();

        (header, value)
    }
}
