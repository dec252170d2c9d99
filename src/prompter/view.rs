use std::time::Instant;

use super::frames::{FrameId, FrameScheduler};
use super::idle::ControlsVisibility;
use super::layout::{self, Row};
use super::markup;
use super::panel::SettingsPanel;
use super::playback::{FrameOutcome, Playback, distance_per_frame};
use super::surface::{ScrollSurface, Viewport};
use super::timing;
use crate::library::{Script, ScriptId};
use crate::settings::Settings;

/// Horizontal margin on each side of the text block
pub fn side_margin(columns: u16) -> usize {
    (columns as usize / 10).max(2)
}

fn text_width(columns: u16) -> usize {
    (columns as usize).saturating_sub(2 * side_margin(columns)).max(1)
}

/// State of the prompter screen for one script
pub struct PrompterView {
    script_id: ScriptId,
    lines: Vec<markup::Line>,
    rows: Vec<Row>,
    word_count: usize,
    size: (u16, u16),
    viewport: Viewport,
    playback: Playback,
    controls: ControlsVisibility,
    panel: Option<SettingsPanel>,
    fullscreen: bool,
}

impl PrompterView {
    pub fn open(script: &Script, settings: &Settings, size: (u16, u16), now: Instant) -> Self {
        let lines = markup::parse(&script.content);
        let rows = layout::wrap(&lines, text_width(size.0));
        let viewport = Viewport::new(rows.len(), size.1 as usize, settings.font_size);
        Self {
            script_id: script.id.clone(),
            lines,
            rows,
            word_count: timing::word_count(&script.content),
            size,
            viewport,
            playback: Playback::new(),
            controls: ControlsVisibility::new(now),
            panel: None,
            fullscreen: false,
        }
    }

    pub fn script_id(&self) -> &str {
        &self.script_id
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn controls_deadline(&self) -> Option<Instant> {
        self.controls.deadline()
    }

    pub fn panel(&self) -> Option<&SettingsPanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut SettingsPanel> {
        self.panel.as_mut()
    }

    pub fn toggle_panel(&mut self) {
        self.panel = match self.panel {
            Some(_) => None,
            None => Some(SettingsPanel::new()),
        };
    }

    pub fn close_panel(&mut self) -> bool {
        self.panel.take().is_some()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn activity(&mut self, now: Instant) {
        self.controls.on_activity(now);
    }

    pub fn tick_controls(&mut self, now: Instant) {
        self.controls.tick(now, self.playback.is_playing());
    }

    pub fn toggle_play(&mut self, now: Instant, frames: &mut dyn FrameScheduler) {
        self.playback.toggle(&self.viewport, frames);
        self.controls.on_activity(now);
    }

    pub fn pause(&mut self, frames: &mut dyn FrameScheduler) {
        self.playback.pause(frames);
    }

    /// Frame callback. Speed is read from the settings on every frame so a
    /// change applies immediately.
    pub fn on_frame(
        &mut self,
        id: FrameId,
        settings: &Settings,
        frames: &mut dyn FrameScheduler,
        now: Instant,
    ) -> FrameOutcome {
        let distance = distance_per_frame(settings.font_size, settings.speed);
        let outcome = self
            .playback
            .on_frame(id, distance, &mut self.viewport, frames);
        if outcome == FrameOutcome::Finished {
            self.controls.on_activity(now);
        }
        outcome
    }

    /// Move the scroll position directly. Playback is not paused.
    pub fn seek_rows(&mut self, rows: f64) {
        self.viewport.scroll_rows(rows);
    }

    pub fn seek_page(&mut self, pages: f64) {
        let rows = self.viewport.visible_rows() as f64 * pages;
        self.viewport.scroll_rows(rows);
    }

    pub fn seek_start(&mut self) {
        self.viewport.set_scroll_top(0.0);
    }

    pub fn seek_end(&mut self) {
        let max = self.viewport.max_scroll_top();
        self.viewport.set_scroll_top(max);
    }

    pub fn resize(&mut self, size: (u16, u16), settings: &Settings) {
        if size.0 != self.size.0 {
            self.rows = layout::wrap(&self.lines, text_width(size.0));
        }
        self.size = size;
        self.relayout(settings);
    }

    /// Pick up a font size change
    pub fn relayout(&mut self, settings: &Settings) {
        self.viewport
            .relayout(self.rows.len(), self.size.1 as usize, settings.font_size);
    }

    pub fn progress(&self) -> f64 {
        timing::progress(&self.viewport)
    }

    /// Elapsed and total reading time, in seconds
    pub fn times(&self, settings: &Settings) -> (f64, f64) {
        let total = timing::estimated_total_secs(self.word_count, settings.speed);
        (timing::elapsed_secs(self.progress(), total), total)
    }
}
