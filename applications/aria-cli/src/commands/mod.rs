//! Subcommand implementations
//!
//! Each command writes its human-readable output to the given writer so the
//! binary can pass stdout and tests can pass a buffer.

pub mod play;
pub mod queue;
pub mod search;

pub use play::{PlaySummary, RepeatArg};
pub use queue::QueueAction;
pub use search::SearchKind;
