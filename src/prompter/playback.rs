use tracing::debug;

use super::frames::{FrameId, FrameScheduler};
use super::surface::ScrollSurface;

/// Scroll distance per frame for a font size (rem) and a speed (words per
/// minute). An approximation kept as is: saved speeds were tuned against it.
pub fn distance_per_frame(font_size: f64, speed: f64) -> f64 {
    font_size * (speed / 60.0) / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Scrolled and re-armed for the next frame
    Advanced,
    /// Reached the end; playback stopped and nothing is scheduled
    Finished,
    /// The frame belonged to a cancelled or superseded request
    Stale,
}

/// The auto-scroll loop. While playing, exactly one frame request is
/// outstanding; while paused, none is.
#[derive(Debug, Default)]
pub struct Playback {
    playing: bool,
    pending: Option<FrameId>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start the loop. Content with nothing left to scroll does not start.
    /// Returns whether playback is now running.
    pub fn play(&mut self, surface: &impl ScrollSurface, frames: &mut dyn FrameScheduler) -> bool {
        if surface.is_at_end() {
            self.playing = false;
            return false;
        }
        self.playing = true;
        if self.pending.is_none() {
            self.pending = Some(frames.request_frame());
            debug!("playback started");
        }
        true
    }

    /// Stop the loop and drop the outstanding frame request
    pub fn pause(&mut self, frames: &mut dyn FrameScheduler) {
        self.playing = false;
        if let Some(id) = self.pending.take() {
            frames.cancel_frame(id);
            debug!("playback paused");
        }
    }

    pub fn toggle(&mut self, surface: &impl ScrollSurface, frames: &mut dyn FrameScheduler) -> bool {
        if self.playing {
            self.pause(frames);
            false
        } else {
            self.play(surface, frames)
        }
    }

    /// Frame callback: advance by `distance` and re-arm, or stop at the end
    pub fn on_frame(
        &mut self,
        id: FrameId,
        distance: f64,
        surface: &mut impl ScrollSurface,
        frames: &mut dyn FrameScheduler,
    ) -> FrameOutcome {
        if self.pending != Some(id) || !self.playing {
            return FrameOutcome::Stale;
        }
        self.pending = None;

        if !surface.is_at_end() {
            let top = surface.scroll_top();
            surface.set_scroll_top(top + distance);
        }

        if surface.is_at_end() {
            self.playing = false;
            debug!("playback reached the end");
            return FrameOutcome::Finished;
        }

        self.pending = Some(frames.request_frame());
        FrameOutcome::Advanced
    }
}
