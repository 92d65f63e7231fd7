//! UI Components
//!
//! Reusable GTK4 widgets for the notes shell.
//!
//! # Components
//!
//! - `nav_bar.rs` - Bottom Home/Settings switcher that slides out of view
//! - `note_list.rs` - Scrollable list of notes (Home tab)
//! - `note_editor.rs` - Add/edit note page
//! - `settings_page.rs` - Storage info and backup/restore (Settings tab)

mod nav_bar;
mod note_editor;
mod note_list;
mod settings_page;

pub use nav_bar::NavBar;
pub use note_editor::{EditorOutcome, NoteEditor};
pub use note_list::NoteList;
pub use settings_page::SettingsPage;
