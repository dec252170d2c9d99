use std::io::{self, Write};

use crossterm::{execute, style::Print};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Exclusive full-screen presentation, granted or refused by the platform
pub trait FullscreenHost {
    fn request(&mut self) -> Result<()>;
    fn exit(&mut self) -> Result<()>;
    /// Platform notification hook: the terminal was resized. Returns the
    /// new full-screen state when the resize means it changed.
    fn observe_resize(&mut self, width: u16, height: u16) -> Option<bool>;
}

/// xterm window operations: `CSI 10;1 t` enters full screen, `CSI 10;0 t`
/// leaves it
const ENTER_FULLSCREEN: &str = "\x1b[10;1t";
const EXIT_FULLSCREEN: &str = "\x1b[10;0t";

/// Full screen for xterm-compatible terminal windows
pub struct TerminalFullscreen<W: Write> {
    out: W,
    unsupported: Option<String>,
    size: (u16, u16),
    /// Window size before entering full screen
    windowed: Option<(u16, u16)>,
}

impl TerminalFullscreen<io::Stdout> {
    /// Probe the environment once at start-up
    pub fn detect(size: (u16, u16)) -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let multiplexed = std::env::var_os("TMUX").is_some() || std::env::var_os("STY").is_some();
        Self::new(io::stdout(), support(&term, multiplexed), size)
    }
}

/// Why full screen cannot be requested here, if it cannot
fn support(term: &str, multiplexed: bool) -> Option<String> {
    if multiplexed {
        return Some("not available inside a terminal multiplexer".to_string());
    }
    let compatible = ["xterm", "kitty", "alacritty", "foot", "wezterm", "rxvt"]
        .iter()
        .any(|name| term.contains(name));
    if compatible {
        None
    } else if term.is_empty() {
        Some("terminal type unknown".to_string())
    } else {
        Some(format!("not supported by terminal '{}'", term))
    }
}

impl<W: Write> TerminalFullscreen<W> {
    pub fn new(out: W, unsupported: Option<String>, size: (u16, u16)) -> Self {
        Self {
            out,
            unsupported,
            size,
            windowed: None,
        }
    }
}

impl<W: Write> FullscreenHost for TerminalFullscreen<W> {
    fn request(&mut self) -> Result<()> {
        if let Some(reason) = &self.unsupported {
            warn!(%reason, "full-screen request refused");
            return Err(Error::Fullscreen(reason.clone()));
        }
        execute!(self.out, Print(ENTER_FULLSCREEN))
            .map_err(|e| Error::Fullscreen(e.to_string()))?;
        self.windowed = Some(self.size);
        debug!(size = ?self.size, "requested full screen");
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        // Keep the windowed size: the shrink back to it reports the exit
        execute!(self.out, Print(EXIT_FULLSCREEN))?;
        debug!("requested leaving full screen");
        Ok(())
    }

    fn observe_resize(&mut self, width: u16, height: u16) -> Option<bool> {
        self.size = (width, height);
        let (w, h) = self.windowed?;
        if width > w || height > h {
            return Some(true);
        }
        // Back to the windowed size, whoever asked for it
        self.windowed = None;
        Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_requires_xterm_compatible_terminal() {
        assert_eq!(support("xterm-256color", false), None);
        assert!(support("linux", false).is_some());
        assert!(support("", false).is_some());
        assert!(support("xterm-256color", true).is_some());
    }

    #[test]
    fn request_writes_the_window_operation() {
        let mut host = TerminalFullscreen::new(Vec::new(), None, (80, 24));
        host.request().unwrap();
        assert_eq!(host.out, ENTER_FULLSCREEN.as_bytes());
    }

    #[test]
    fn refused_request_is_an_error_and_writes_nothing() {
        let mut host = TerminalFullscreen::new(Vec::new(), Some("nope".to_string()), (80, 24));
        assert!(matches!(host.request(), Err(Error::Fullscreen(_))));
        assert!(host.out.is_empty());
    }

    #[test]
    fn resize_notifications_mirror_the_platform_state() {
        let mut host = TerminalFullscreen::new(Vec::new(), None, (80, 24));
        assert_eq!(host.observe_resize(100, 30), None); // not requested yet

        host.request().unwrap();
        assert_eq!(host.observe_resize(200, 60), Some(true));
        // Left full screen with the window manager's own shortcut
        assert_eq!(host.observe_resize(100, 30), Some(false));
        assert_eq!(host.observe_resize(120, 40), None);
    }

    #[test]
    fn exit_is_reported_by_the_shrink_that_follows() {
        let mut host = TerminalFullscreen::new(Vec::new(), None, (80, 24));
        host.request().unwrap();
        assert_eq!(host.observe_resize(200, 60), Some(true));

        host.exit().unwrap();
        assert!(host.out.ends_with(EXIT_FULLSCREEN.as_bytes()));
        assert_eq!(host.observe_resize(80, 24), Some(false));
        assert_eq!(host.observe_resize(90, 30), None);
    }
}
