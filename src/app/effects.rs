use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::editor::{SystemClipboard, paste, read_text_file};
use crate::error::Result;

/// Session of the editor an operation was started from. A completion is
/// only applied to the same session.
pub type Session = u64;

/// Asynchronous platform operation requested by the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReadFile(PathBuf),
    ReadClipboard,
}

/// The single result of an `Effect`, posted back to the UI loop
#[derive(Debug)]
pub struct Completion {
    pub session: Session,
    pub result: Result<String>,
}

/// Run `effect` on its own task and post its completion on `tx`
pub fn spawn(effect: Effect, session: Session, tx: UnboundedSender<Completion>) {
    tokio::spawn(async move {
        let result = run(effect).await;
        // The loop may already be gone on shutdown
        if tx.send(Completion { session, result }).is_err() {
            debug!(session, "completion dropped, receiver closed");
        }
    });
}

async fn run(effect: Effect) -> Result<String> {
    match effect {
        Effect::ReadFile(path) => read_text_file(&path).await,
        Effect::ReadClipboard => paste(SystemClipboard).await,
    }
}
