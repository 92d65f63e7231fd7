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

//! src/core/mod.rs
//!
//! Core domain module
//!
//! This module contains the fundamental data structures for note management:
//! - Note and record types, plus the lossless conversion between them
//! - Screen selection and navigation types shared by the controller and hosts
//! - The observable notes feed the UI renders from
//!
//! Nothing here touches the filesystem or GTK, so it is fully unit-testable
//! without a display server.

pub mod feed;
pub mod types;

pub use feed::{NotesFeed, NotesState};
pub use types::*;

#[cfg(test)]
mod tests;
