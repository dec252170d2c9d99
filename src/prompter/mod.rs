//! Playback: auto-scrolling of a script at the configured speed

mod frames;
mod fullscreen;
mod idle;
mod layout;
mod markup;
mod panel;
mod playback;
mod surface;
mod timing;
mod view;

pub use frames::{FrameId, FrameScheduler, IntervalFrames};
#[cfg(test)]
pub use frames::ManualFrames;
pub use fullscreen::{FullscreenHost, TerminalFullscreen};
pub use layout::{Row, mirror, row_width};
pub use markup::Emphasis;
pub use panel::{PanelField, SettingsPanel};
pub use playback::FrameOutcome;
pub use timing::format_time;
pub use view::{PrompterView, side_margin};
