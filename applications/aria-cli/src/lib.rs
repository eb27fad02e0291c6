//! Aria CLI Library
//!
//! Terminal front end for the Aria player: catalog search, queue editing and
//! silent playback against the persisted queue.
//!
//! This library exposes the command implementations for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

// Re-export commonly used types for convenience
pub use config::AriaSettings;
pub use error::{CliError, Result};
pub use session::Session;
