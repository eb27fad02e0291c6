/// `aria queue`
use std::io::Write;

use clap::Subcommand;
use tracing::debug;

use crate::error::{CliError, Result};
use crate::output;
use crate::session::Session;

/// Queue edits; positions are 1-based as printed by `list`
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum QueueAction {
    /// Show the queue
    List,
    /// Append a song by catalog id
    Add { id: String },
    /// Insert a song right after the current one
    Next { id: String },
    /// Remove the entry at a position
    Remove { position: usize },
    /// Move an entry to another position
    Move { from: usize, to: usize },
    /// Remove everything
    Clear,
}

pub async fn run(session: &Session, action: QueueAction, out: &mut impl Write) -> Result<()> {
    let player = session.player();
    debug!(?action, "Queue command");

    match action {
        QueueAction::List => {}
        QueueAction::Add { id } => {
            let track = session.resolve_track(&id).await?;
            let line = output::track_line(&track);
            if player.add_to_queue(track).await {
                writeln!(out, "Added: {line}")?;
            } else {
                writeln!(out, "Already queued: {line}")?;
            }
        }
        QueueAction::Next { id } => {
            let track = session.resolve_track(&id).await?;
            let line = output::track_line(&track);
            if player.enqueue_next(track).await {
                writeln!(out, "Playing next: {line}")?;
            } else {
                writeln!(out, "Already queued: {line}")?;
            }
        }
        QueueAction::Remove { position } => {
            let removed = player.remove_from_queue(to_index(position)?).await?;
            writeln!(out, "Removed: {}", output::track_line(&removed))?;
        }
        QueueAction::Move { from, to } => {
            player.reorder_queue(to_index(from)?, to_index(to)?).await?;
            writeln!(out, "Moved {from} to {to}")?;
        }
        QueueAction::Clear => {
            player.clear_queue().await?;
            writeln!(out, "Queue cleared")?;
            return Ok(());
        }
    }

    for line in output::queue_listing(&player.state()) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| CliError::InvalidArgument("queue positions start at 1".to_string()))
}
