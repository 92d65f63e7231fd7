//! src/core/types.rs
//!
//! Core type definitions for note management
//!
//! This module defines the fundamental types used throughout the application:
//! - `NoteRecord`: The flat string-keyed mapping written to backups and the notes file
//! - `Note`: A typed note with identifier, title, content and timestamps
//! - `Tab`: The two primary screens of the main shell
//! - `Route` / `Transition`: What a transient screen shows and how it slides in
//!
//! Conversions between `Note` and `NoteRecord` are lossless: keys the
//! application does not know about are carried in `Note::extra`.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, time::Duration};
use thiserror::Error;

/// A note as it appears in a backup: flat string keys to string values
///
/// `BTreeMap` keeps key order stable so identical notes encode to identical JSON.
pub type NoteRecord = BTreeMap<String, String>;

/// Identifier of a note, unique within a store
pub type NoteId = u64;

/// Reserved record keys
pub const KEY_ID: &str = "id";
pub const KEY_TITLE: &str = "title";
pub const KEY_CONTENT: &str = "content";
pub const KEY_CREATED_AT: &str = "created_at";
pub const KEY_UPDATED_AT: &str = "updated_at";

const RESERVED_KEYS: [&str; 5] = [KEY_ID, KEY_TITLE, KEY_CONTENT, KEY_CREATED_AT, KEY_UPDATED_AT];

/// Errors converting a record into a note
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    /// Record has no `id` key
    #[error("Note record has no id")]
    MissingId,
    /// `id` is present but not a non-negative integer
    #[error("Invalid note id: {0:?}")]
    InvalidId(String),
}

/// A single note
///
/// # Example
/// ```
/// use notes_manager::core::Note;
///
/// let note = Note::new(7, "Groceries", "milk\neggs", "2025-10-15T14:30:25+00:00");
/// let record = note.to_record();
/// assert_eq!(record["id"], "7");
/// assert_eq!(Note::from_record(&record), Ok(note));
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,
    /// Single-line title
    pub title: String,
    /// Free-form body
    pub content: String,
    /// RFC 3339 creation time (empty if unknown)
    pub created_at: String,
    /// RFC 3339 time of last edit (empty if unknown)
    pub updated_at: String,
    /// Record keys not understood by this version, kept for round trips
    pub extra: BTreeMap<String, String>,
}

impl Note {
    /// Creates a note whose created and updated times are both `timestamp`
    pub fn new(id: NoteId, title: &str, content: &str, timestamp: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Tag correlating a list row with its edit screen for shared transitions
    pub fn hero_tag(&self) -> String {
        format!("note-hero-{}", self.id)
    }

    /// First non-empty line of the content, used as a list preview
    pub fn preview(&self) -> &str {
        self.content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }

    /// Flattens the note into its backup representation
    pub fn to_record(&self) -> NoteRecord {
        let mut record = self.extra.clone();
        record.insert(KEY_ID.to_string(), self.id.to_string());
        record.insert(KEY_TITLE.to_string(), self.title.clone());
        record.insert(KEY_CONTENT.to_string(), self.content.clone());
        record.insert(KEY_CREATED_AT.to_string(), self.created_at.clone());
        record.insert(KEY_UPDATED_AT.to_string(), self.updated_at.clone());
        record
    }

    /// Rebuilds a note from a record
    ///
    /// Only `id` is mandatory. Missing text fields become empty strings and
    /// unknown keys are preserved in `extra`.
    pub fn from_record(record: &NoteRecord) -> Result<Self, NoteError> {
        let raw_id = record.get(KEY_ID).ok_or(NoteError::MissingId)?;
        let id = raw_id
            .trim()
            .parse::<NoteId>()
            .map_err(|_| NoteError::InvalidId(raw_id.clone()))?;

        let field = |key: &str| record.get(key).cloned().unwrap_or_default();

        let extra = record
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            title: field(KEY_TITLE),
            content: field(KEY_CONTENT),
            created_at: field(KEY_CREATED_AT),
            updated_at: field(KEY_UPDATED_AT),
            extra,
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "#{} (untitled)", self.id)
        } else {
            write!(f, "#{} {}", self.id, self.title)
        }
    }
}

/// Primary tabs of the main shell
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Tab {
    /// Note list (index 0)
    #[default]
    Home,
    /// Application settings (index 1)
    Settings,
}

impl Tab {
    /// Every tab in nav bar order
    pub const ALL: [Tab; 2] = [Tab::Home, Tab::Settings];

    /// Maps a nav bar index to a tab, rejecting anything outside {0, 1}
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this tab in the nav bar
    pub fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Settings => 1,
        }
    }

    /// Stack page name
    pub fn name(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Settings => "settings",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Home => write!(f, "Home"),
            Tab::Settings => write!(f, "Settings"),
        }
    }
}

/// A transient screen pushed over the main shell
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    /// Blank editor for a new note
    AddNote,
    /// Editor pre-filled with an existing note
    EditNote {
        /// Note being edited
        id: NoteId,
        /// Animation-correlation tag (see `Note::hero_tag`)
        hero_tag: String,
    },
}

/// How a transient screen enters
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Slides in from the right edge over `duration`
    SlideFromRight {
        /// Animation length
        duration: Duration,
    },
    /// Whatever the host uses by default
    Platform,
}
