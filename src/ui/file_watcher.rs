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

//! File system watcher for the notes file
//!
//! Picks up edits made outside the app (the CLI, a restore from another
//! instance) so the open window can reload. The parent directory is watched
//! rather than the file itself: atomic writes replace the file by rename,
//! which would silently end a watch on the old inode.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{channel, Receiver},
};

/// Watches one file for creation and modification
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    target: PathBuf,
    rx: Receiver<notify::Result<Event>>,
}

impl FileWatcher {
    pub fn new(path: &Path) -> notify::Result<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        let directory = path.parent().unwrap_or(Path::new("."));
        watcher.watch(directory, RecursiveMode::NonRecursive)?;

        Ok(FileWatcher {
            _watcher: watcher,
            target: path.to_path_buf(),
            rx,
        })
    }

    /// Drains pending events; true if any touched the watched file (non-blocking)
    pub fn check_for_changes(&self) -> bool {
        let mut changed = false;
        while let Ok(event_result) = self.rx.try_recv() {
            if let Ok(event) = event_result {
                if is_relevant(&event, &self.target) {
                    changed = true;
                }
            }
        }
        changed
    }
}

fn is_relevant(event: &Event, target: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|path| path.file_name() == target.file_name())
}
