use std::time::{Duration, Instant};

/// How long the overlay stays up after the last pointer or key activity
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(3);

/// Visibility of the prompter overlay controls. Hiding is purely visual and
/// only ever happens while playing.
#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    visible: bool,
    deadline: Option<Instant>,
}

impl ControlsVisibility {
    pub fn new(now: Instant) -> Self {
        Self {
            visible: true,
            deadline: Some(now + IDLE_TIMEOUT),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Show the controls and restart the countdown
    pub fn on_activity(&mut self, now: Instant) {
        self.visible = true;
        self.deadline = Some(now + IDLE_TIMEOUT);
    }

    /// Expire the countdown if its time has come
    pub fn tick(&mut self, now: Instant, playing: bool) {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if playing {
                    self.visible = false;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_after_timeout_while_playing() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(start);
        controls.tick(start + Duration::from_millis(2999), true);
        assert!(controls.is_visible());
        controls.tick(start + IDLE_TIMEOUT, true);
        assert!(!controls.is_visible());
        assert_eq!(controls.deadline(), None);
    }

    #[test]
    fn never_hides_while_paused() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(start);
        controls.tick(start + Duration::from_secs(10), false);
        assert!(controls.is_visible());
    }

    #[test]
    fn activity_restarts_the_countdown() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(start);
        controls.on_activity(start + Duration::from_secs(2));
        controls.tick(start + Duration::from_secs(4), true);
        assert!(controls.is_visible());
        controls.tick(start + Duration::from_secs(5), true);
        assert!(!controls.is_visible());
    }

    #[test]
    fn activity_reveals_hidden_controls() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(start);
        controls.tick(start + IDLE_TIMEOUT, true);
        controls.on_activity(start + Duration::from_secs(4));
        assert!(controls.is_visible());
    }
}
