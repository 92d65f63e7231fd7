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

//! All-or-nothing file writes
//!
//! Content goes to a temporary file in the target directory, which is then
//! renamed over the target. Readers see either the old file or the new one,
//! never a partial write.

use atomic_write_file::AtomicWriteFile;
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// Atomically replaces `path` with `bytes`, creating parent directories first
///
/// If any step fails the temporary file is discarded and `path` is untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = AtomicWriteFile::options().open(path)?;
    file.write_all(bytes)?;
    // Dropping without commit discards the temp file
    file.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("notes.json");

        write_atomic(&path, b"[]").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"[]");
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.json");
        fs::write(&path, "old content that is longer").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.json");

        write_atomic(&path, b"[]").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "Only the target file should remain");
    }
}
