//! Autify CLI - a command-line client for the Autify test automation API
//!
//! Starts test plan runs, waits for them to finish, and fetches scenario and
//! result metadata.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod runner;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use runner::{Coordinator, Outcome, PollConfig};
