//! Common utilities shared by all commands

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
