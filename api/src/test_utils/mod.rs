//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repositories count writes so tests can assert that a
//! rejected request left the stores untouched.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
