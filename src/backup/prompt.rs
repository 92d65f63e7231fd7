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

//! Save prompts for the command line
//!
//! - `FixedPathPrompt`: non-interactive, target given up front (`--output`)
//! - `TerminalPrompt`: asks on the terminal, empty answer cancels
//!
//! Both complete synchronously and write through [`write_payload`].

use std::{
    cell::RefCell,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::backup::{PromptError, SaveCallback, SavePrompt, SaveRequest};
use crate::store::write_atomic;

/// Writes a backup payload atomically: the file ends up complete or untouched
pub fn write_payload(path: &Path, bytes: &[u8]) -> Result<(), PromptError> {
    if path.is_dir() {
        return Err(PromptError::Rejected(format!(
            "{} is a directory",
            path.display()
        )));
    }

    write_atomic(path, bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote backup payload");
    Ok(())
}

/// Refuses a path whose extension the request does not allow
///
/// A bare name is refused too; the extension is never appended after the
/// host has confirmed the name.
pub fn check_extension(path: &Path, request: &SaveRequest) -> Result<(), PromptError> {
    if request.allows(path) {
        return Ok(());
    }

    Err(PromptError::Rejected(format!(
        "{} must end in .{}",
        path.display(),
        request.allowed_extensions.join(" or .")
    )))
}

/// Resolves a user-supplied location: directories get the suggested name
fn resolve_target(target: &Path, request: &SaveRequest) -> Result<PathBuf, PromptError> {
    let path = if target.is_dir() {
        target.join(&request.file_name)
    } else {
        target.to_path_buf()
    };

    check_extension(&path, request)?;

    Ok(path)
}

/// Saves to a location chosen ahead of time
///
/// If the target is an existing directory, the suggested file name is
/// appended. Never cancels.
#[derive(Clone, Debug)]
pub struct FixedPathPrompt {
    target: PathBuf,
}

impl FixedPathPrompt {
    /// Creates a prompt that always answers `target`
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }
}

impl SavePrompt for FixedPathPrompt {
    fn prompt_save(&self, request: SaveRequest, on_done: SaveCallback) {
        let result = resolve_target(&self.target, &request).and_then(|path| {
            write_payload(&path, &request.bytes)?;
            Ok(Some(path))
        });
        on_done(result);
    }
}

/// Asks for a location on a terminal
///
/// Prints the dialog title and suggested name to `output`, then reads one
/// line from `input`. An empty line or end of input cancels. `~` is
/// expanded; a directory answer gets the suggested name appended.
pub struct TerminalPrompt<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Creates a prompt reading answers from `input` and writing questions to `output`
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Returns the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.input.into_inner(), self.output.into_inner())
    }

    fn ask(&self, request: &SaveRequest) -> Result<Option<PathBuf>, PromptError> {
        {
            let mut output = self.output.borrow_mut();
            writeln!(output, "{}", request.dialog_title)?;
            write!(
                output,
                "Save as (.{}) [empty to cancel, directory for {}]: ",
                request.allowed_extensions.join(", ."),
                request.file_name
            )?;
            output.flush()?;
        }

        let mut line = String::new();
        self.input.borrow_mut().read_line(&mut line)?;

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        let expanded = shellexpand::tilde(answer);
        let path = resolve_target(Path::new(expanded.as_ref()), request)?;
        write_payload(&path, &request.bytes)?;

        Ok(Some(path))
    }
}

impl<R: BufRead, W: Write> SavePrompt for TerminalPrompt<R, W> {
    fn prompt_save(&self, request: SaveRequest, on_done: SaveCallback) {
        let result = self.ask(&request);
        on_done(result);
    }
}
