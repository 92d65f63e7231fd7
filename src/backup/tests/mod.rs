//! Backup helper tests
//!
//! Tests for the backup flow against a fake host prompt:
//! - Empty input short-circuits without a prompt
//! - Payload bytes are the exact JSON of the input
//! - Cancellation and host failures collapse to `false`
//! - Deferred prompts complete later, exactly once

#[cfg(test)]
mod backup_helper_tests;
