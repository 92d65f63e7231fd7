//! CLI entry point for notes-manager
//!
//! Provides command-line access to the note store (list, add, delete),
//! backup and restore, and launches the GUI.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::*;
use notes_manager::backup::{read_backup, run_backup, BackupError, FixedPathPrompt, TerminalPrompt};
use notes_manager::core::NoteId;
use notes_manager::store::NoteStore;
use std::{
    cell::RefCell,
    io,
    path::{Path, PathBuf},
    rc::Rc,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const DEFAULT_NOTES_PATH: &str = "~/.local/share/notes-manager/notes.json";

#[derive(Parser)]
#[command(name = "notes-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the notes file
    #[arg(short, long, global = true, default_value = DEFAULT_NOTES_PATH)]
    notes: PathBuf,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all notes
    List,

    /// Add a note
    Add {
        /// Note title
        #[arg(short, long)]
        title: String,

        /// Note body
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Delete a note by id
    Delete {
        /// Id shown by `list`
        #[arg(long)]
        id: NoteId,
    },

    /// Back up all notes to a JSON file
    Backup {
        /// File or directory to write; asks on the terminal when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge notes from a backup file, replacing notes with the same id
    Restore {
        /// Backup file to read
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Launch the GUI
    Gui,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let notes_path = expand_path(&cli.notes)?;

    match cli.command {
        Commands::List => list_notes(&notes_path)?,
        Commands::Add { title, content } => add_note(&notes_path, &title, &content)?,
        Commands::Delete { id } => delete_note(&notes_path, id)?,
        Commands::Backup { output } => backup(&notes_path, output.as_deref())?,
        Commands::Restore { file } => restore(&notes_path, &expand_path(&file)?)?,
        Commands::Gui => launch_gui(notes_path)?,
    }

    Ok(())
}

/// Logs to stderr; `-v` raises the crate's level and `RUST_LOG` can add more
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("notes_manager={level}").parse()?),
        )
        .init();

    Ok(())
}

/// Expands a leading `~` in `path`
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path encoding: {}", path.display()))?;
    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

fn open_store(notes_path: &Path) -> anyhow::Result<NoteStore> {
    NoteStore::open(notes_path.to_path_buf())
        .with_context(|| format!("Failed to open notes file {}", notes_path.display()))
}

/// Print every note with its id and first line
fn list_notes(notes_path: &Path) -> anyhow::Result<()> {
    let store = open_store(notes_path)?;

    println!("{}", format!("Notes from: {}\n", notes_path.display()).bold());

    for note in store.notes() {
        let id = format!("#{}", note.id).cyan().bold();
        let title = if note.title.is_empty() {
            "(untitled)".dimmed()
        } else {
            note.title.as_str().green()
        };
        println!("{} {} {}", id, title, note.preview().dimmed());
    }

    println!("\n{} Total: {} notes", "✓".green(), store.notes().len());

    Ok(())
}

fn add_note(notes_path: &Path, title: &str, content: &str) -> anyhow::Result<()> {
    let mut store = open_store(notes_path)?;
    let note = store.add(title, content).context("Failed to add note")?;

    println!("{} Added {}", "✓".green(), note.to_string().cyan());
    Ok(())
}

fn delete_note(notes_path: &Path, id: NoteId) -> anyhow::Result<()> {
    let mut store = open_store(notes_path)?;
    store
        .delete(id)
        .with_context(|| format!("Failed to delete note #{id}"))?;

    println!("{} Deleted note #{}", "✓".green(), id);
    Ok(())
}

/// Back up through a fixed path or a terminal prompt
///
/// Both prompts finish before `run_backup` returns, so the outcome is read
/// straight back out of the shared slot.
fn backup(notes_path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(notes_path)?;
    let records = store.records();

    let outcome: Rc<RefCell<Option<Result<PathBuf, BackupError>>>> = Rc::new(RefCell::new(None));
    let slot = outcome.clone();
    let on_complete = move |result| {
        *slot.borrow_mut() = Some(result);
    };

    match output {
        Some(output) => {
            let prompt = FixedPathPrompt::new(expand_path(output)?);
            run_backup(&records, &prompt, on_complete);
        }
        None => {
            let stdin = io::stdin();
            let prompt = TerminalPrompt::new(stdin.lock(), io::stderr());
            run_backup(&records, &prompt, on_complete);
        }
    }

    let result = outcome.borrow_mut().take();
    match result {
        Some(Ok(path)) => {
            println!(
                "{} Backed up {} notes to {}",
                "✓".green(),
                records.len(),
                path.display()
            );
            Ok(())
        }
        Some(Err(BackupError::Cancelled)) => bail!("Backup cancelled"),
        Some(Err(e)) => Err(e).context("Backup failed"),
        None => bail!("Backup did not complete"),
    }
}

fn restore(notes_path: &Path, file: &Path) -> anyhow::Result<()> {
    let records = read_backup(file)
        .with_context(|| format!("Failed to read backup {}", file.display()))?;

    let mut store = open_store(notes_path)?;
    let summary = store
        .import_records(&records)
        .context("Failed to import backup")?;

    println!(
        "{} Restored from {}: {} added, {} replaced",
        "✓".green(),
        file.display(),
        summary.added,
        summary.replaced
    );
    Ok(())
}

#[cfg(feature = "gui")]
fn launch_gui(notes_path: PathBuf) -> anyhow::Result<()> {
    let exit_code = notes_manager::ui::App::new(notes_path).run();
    if exit_code != glib::ExitCode::SUCCESS {
        bail!("GUI exited with an error");
    }
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_notes_path: PathBuf) -> anyhow::Result<()> {
    println!("{}", "GUI not available in this build".yellow());
    println!("Rebuild with `--features gui` to enable it.");
    Ok(())
}
