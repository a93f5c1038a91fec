//! Interactive REPL for PackSmart
//!
//! Plans trips, edits the active list and runs "did you forget" passes
//! through slash commands.

mod session;

pub use session::ReplSession;

use eyre::{Context, Result};
use tracing::warn;

use crate::collab::create_collaborators;
use crate::config::Config;
use crate::history::open_history;

/// Run the interactive REPL
///
/// This is the main entry point for `ps repl`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    config.validate()?;

    let collaborators = create_collaborators(config).context("Failed to set up collaborators")?;

    // History is best-effort; the REPL still works without it
    let history = match open_history(config) {
        Ok(history) => Some(history),
        Err(e) => {
            warn!(error = %e, "run_interactive: history unavailable");
            None
        }
    };

    let mut session = ReplSession::new(&collaborators, history);
    session.run().await
}
