//! Reading backups back in
//!
//! A backup is the same JSON array of flat records the store writes, so
//! restoring is decode + [`NoteStore::import_records`](crate::store::NoteStore::import_records).

use std::{fs, path::Path};
use thiserror::Error;
use tracing::info;

use crate::core::NoteRecord;

/// Errors reading a backup file
#[derive(Debug, Error)]
pub enum RestoreError {
    /// File could not be read
    #[error("Failed to read backup: {0}")]
    Io(#[from] std::io::Error),
    /// File is not a JSON array of string-to-string objects
    #[error("Backup is not a valid notes file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decodes a backup file into note records
///
/// Record contents are not validated here; the store does that on import.
pub fn read_backup(path: &Path) -> Result<Vec<NoteRecord>, RestoreError> {
    let bytes = fs::read(path)?;
    let records: Vec<NoteRecord> = serde_json::from_slice(&bytes)?;

    info!(path = %path.display(), count = records.len(), "Read backup");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_valid_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes_backup_2025-10-15.json");
        fs::write(&path, r#"[{"id": "1", "title": "a"}, {"id": "2"}]"#).unwrap();

        let records = read_backup(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "a");
    }

    #[test]
    fn test_non_string_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, r#"[{"id": 1}]"#).unwrap();

        assert!(matches!(read_backup(&path), Err(RestoreError::Malformed(_))));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_backup(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(RestoreError::Io(_))));
    }
}
