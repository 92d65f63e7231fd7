//! Note store tests
//!
//! - Store lifecycle (open, persist, reload)
//! - CRUD operations and id assignment
//! - Importing backup records

#[cfg(test)]
mod note_store_tests;
