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

//! User interface with MVC architecture
//!
//! # Architecture
//!
//! - **Model**: `NoteStore` and `NotesFeed` (in `store` and `core` modules)
//! - **View**: GTK4 components (in `components/` submodule)
//! - **Controller**: Main-screen state machine (in `controller.rs`)
//!
//! The Controller is toolkit-free and always compiled. Everything that
//! touches GTK sits behind the `gui` feature.
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs          // This file - exports
//! ├── controller.rs   // MVC Controller and its host traits
//! ├── app.rs          // GTK4 Application setup          (gui)
//! ├── hosts.rs        // GTK implementations of the hosts (gui)
//! ├── actions.rs      // GTK actions (quit, backup, restore) (gui)
//! ├── file_watcher.rs // Notes file watcher              (gui)
//! ├── builders/       // Header and layout builders      (gui)
//! └── components/     // Reusable UI widgets             (gui)
//! ```

pub mod controller;

#[cfg(feature = "gui")]
mod actions;
#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
mod builders;
#[cfg(feature = "gui")]
pub mod components;
#[cfg(feature = "gui")]
pub mod file_watcher;
#[cfg(feature = "gui")]
pub mod hosts;

pub use controller::{
    Controller, ControllerError, DismissCallback, FocusHost, Navigator, ShellView,
    ADD_NOTE_TRANSITION,
};

#[cfg(feature = "gui")]
pub use app::App;
