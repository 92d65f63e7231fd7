//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Note/record conversion tests
//! - Notes feed tests

#[cfg(test)]
mod types_tests;
