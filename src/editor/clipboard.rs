use tracing::warn;

use crate::error::{Error, Result};

/// Text-only read access to the OS clipboard
pub trait ClipboardSource: Send + 'static {
    fn read_text(&mut self) -> Result<String>;
}

/// The system clipboard. A connection is opened per read since reads are
/// rare and a long-lived handle can go stale on some platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| {
            warn!(error = %e, "clipboard unavailable");
            Error::Clipboard(e.to_string())
        })?;
        let text = clipboard.get_text().map_err(|e| match e {
            arboard::Error::ContentNotAvailable => Error::ClipboardEmpty,
            e => {
                warn!(error = %e, "failed to read clipboard");
                Error::Clipboard(e.to_string())
            }
        })?;
        non_empty(text)
    }
}

fn non_empty(text: String) -> Result<String> {
    if text.is_empty() {
        Err(Error::ClipboardEmpty)
    } else {
        Ok(text)
    }
}

/// Read the clipboard off the UI task; the read may block on the platform
pub async fn paste(mut source: impl ClipboardSource) -> Result<String> {
    tokio::task::spawn_blocking(move || source.read_text())
        .await
        .map_err(|e| Error::Clipboard(e.to_string()))?
}
