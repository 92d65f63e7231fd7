//! GTK Action setup for the application
//!
//! This module contains all GTK action definitions (quit, backup, restore)
//! and their setup functions

use gtk4::{gio, prelude::*, Application, ApplicationWindow, FileDialog, FileFilter};
use std::rc::Rc;
use tracing::{error, info};

use crate::backup::{read_backup, run_logged_backup, ALLOWED_EXTENSIONS};
use crate::core::NotesFeed;
use crate::ui::app::{publish_notes, SharedStore};
use crate::ui::hosts::GtkSavePrompt;

/// Sets up the quit action
pub fn setup_quit_action(app: &Application) {
    let quit_action = gio::SimpleAction::new("quit", None);
    let app_for_quit = app.clone();

    quit_action.connect_activate(move |_, _| {
        app_for_quit.quit();
    });

    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<Control>q"]);
}

/// Sets up the backup action
///
/// Snapshots the stored notes and hands them to the backup helper with a
/// `FileDialog` save prompt. Success and failure are reported in an alert;
/// a cancelled dialog is not.
pub fn setup_backup_action(app: &Application, window: &ApplicationWindow, store: SharedStore) {
    let backup_action = gio::SimpleAction::new("backup", None);
    let window_for_backup = window.clone();

    backup_action.connect_activate(move |_, _| {
        let records = store
            .borrow()
            .as_ref()
            .map(|store| store.records())
            .unwrap_or_default();

        if records.is_empty() {
            show_alert(&window_for_backup, "Nothing to back up", "There are no notes yet.");
            return;
        }

        let prompt = GtkSavePrompt::new(window_for_backup.clone());
        let window_for_result = window_for_backup.clone();
        run_logged_backup(&records, &prompt, move |outcome| match outcome {
            Ok(path) => show_alert(
                &window_for_result,
                "Backup saved",
                &format!("Your notes were written to {}.", path.display()),
            ),
            Err(e) if e.is_cancelled() => {}
            Err(e) => show_alert(&window_for_result, "Backup failed", &e.to_string()),
        });
    });

    app.add_action(&backup_action);
}

/// Sets up the restore action
///
/// Opens a backup file, merges its records into the store by id and
/// republishes the notes.
pub fn setup_restore_action(
    app: &Application,
    window: &ApplicationWindow,
    store: SharedStore,
    feed: Rc<NotesFeed>,
) {
    let restore_action = gio::SimpleAction::new("restore", None);
    let window_for_restore = window.clone();

    restore_action.connect_activate(move |_, _| {
        let filter = FileFilter::new();
        filter.set_name(Some("JSON files"));
        for extension in ALLOWED_EXTENSIONS {
            filter.add_suffix(extension);
        }
        let filters = gio::ListStore::new::<FileFilter>();
        filters.append(&filter);

        let file_dialog = FileDialog::builder()
            .title("Restore notes backup")
            .filters(&filters)
            .default_filter(&filter)
            .modal(true)
            .build();

        let store = store.clone();
        let feed = feed.clone();
        let window = window_for_restore.clone();

        file_dialog.open(Some(&window_for_restore), None::<&gio::Cancellable>, move |result| {
            let Some(path) = result.ok().and_then(|file| file.path()) else {
                info!("Restore cancelled");
                return;
            };

            let records = match read_backup(&path) {
                Ok(records) => records,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to read backup");
                    show_alert(&window, "Restore failed", &e.to_string());
                    return;
                }
            };

            let outcome = match store.borrow_mut().as_mut() {
                Some(store) => store.import_records(&records),
                None => {
                    show_alert(&window, "Restore failed", "Notes are still loading.");
                    return;
                }
            };

            match outcome {
                Ok(summary) => {
                    info!(added = summary.added, replaced = summary.replaced, "Backup restored");
                    publish_notes(&store, &feed);
                    show_alert(
                        &window,
                        "Backup restored",
                        &format!("{} added, {} replaced", summary.added, summary.replaced),
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to import backup");
                    show_alert(&window, "Restore failed", &e.to_string());
                }
            }
        });
    });

    app.add_action(&restore_action);
}

fn show_alert(window: &ApplicationWindow, message: &str, detail: &str) {
    gtk4::AlertDialog::builder()
        .modal(true)
        .message(message)
        .detail(detail)
        .buttons(vec!["OK"])
        .build()
        .show(Some(window));
}
