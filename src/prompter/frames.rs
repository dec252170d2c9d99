use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

pub type FrameId = u64;

/// Per-frame callback scheduling, in the manner of a display refresh
/// callback: a request fires once, on the next frame, unless cancelled.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
}

/// Frames paced by a tokio interval at a fixed refresh rate. The main loop
/// only polls `next_frame` while a request is pending, so an idle prompter
/// costs nothing.
pub struct IntervalFrames {
    interval: Interval,
    next_id: FrameId,
    pending: Option<FrameId>,
}

impl IntervalFrames {
    pub fn new(frame_rate: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            next_id: 0,
            pending: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the next frame and hand out the request it fulfils
    pub async fn next_frame(&mut self) -> Option<FrameId> {
        self.interval.tick().await;
        self.pending.take()
    }
}

impl FrameScheduler for IntervalFrames {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        self.pending = Some(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

/// Deterministic scheduler for tests: frames fire only when told to
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: FrameId,
    pub pending: Option<FrameId>,
    pub requests: usize,
}

#[cfg(test)]
impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&mut self) -> Option<FrameId> {
        self.pending.take()
    }
}

#[cfg(test)]
impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        self.requests += 1;
        self.pending = Some(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn interval_frames_fire_pending_request_once() {
        let mut frames = IntervalFrames::new(1000);
        assert!(!frames.is_armed());

        let id = frames.request_frame();
        assert!(frames.is_armed());
        assert_eq!(frames.next_frame().await, Some(id));
        assert!(!frames.is_armed());
    }

    #[tokio::test]
    async fn cancelled_request_does_not_fire() {
        let mut frames = IntervalFrames::new(1000);
        let id = frames.request_frame();
        frames.cancel_frame(id);
        assert!(!frames.is_armed());
        assert_eq!(frames.next_frame().await, None);
    }

    #[test]
    fn cancelling_an_old_id_keeps_the_new_request() {
        let mut frames = ManualFrames::new();
        let old = frames.request_frame();
        let new = frames.request_frame();
        frames.cancel_frame(old);
        assert_eq!(frames.fire(), Some(new));
    }
}
