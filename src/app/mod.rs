//! View routing and the glue between the library, the editor and the
//! prompter

mod effects;

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

pub use effects::{Completion, Effect, Session, spawn};

use crate::editor::Editor;
use crate::library::{LibraryView, ScriptRepository};
use crate::prompter::{FrameId, FrameOutcome, FrameScheduler, FullscreenHost, PrompterView};
use crate::settings::{Settings, SettingsPatch};
use crate::store::{SETTINGS_KEY, Store};

/// The screen currently shown, with its state. A prompter route only ever
/// holds a script that resolved when it was built.
pub enum Route {
    Library(LibraryView),
    Editor(Editor),
    Prompter(PrompterView),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Library(_) => "library",
            Route::Editor(_) => "editor",
            Route::Prompter(_) => "prompter",
        }
    }
}

pub struct App {
    store: Store,
    pub repo: ScriptRepository,
    settings: Settings,
    pub route: Route,
    fullscreen: Box<dyn FullscreenHost>,
    pub message: Option<String>,
    pub running: bool,
    effects: Vec<Effect>,
    session: Session,
    size: (u16, u16),
}

impl App {
    /// `defaults` seed the settings only when none were persisted yet
    pub fn new(
        store: Store,
        defaults: Settings,
        fullscreen: Box<dyn FullscreenHost>,
        size: (u16, u16),
    ) -> Self {
        let repo = ScriptRepository::load(store.clone());
        let settings = store.get(SETTINGS_KEY, defaults);
        Self {
            store,
            repo,
            settings,
            route: Route::Library(LibraryView::new()),
            fullscreen,
            message: None,
            running: true,
            effects: Vec::new(),
            session: 0,
            size,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Operations queued since the last call, for the loop to spawn
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn go_to(&mut self, route: Route) {
        debug!(from = self.route.name(), to = route.name(), "route change");
        if matches!(route, Route::Editor(_)) {
            self.session += 1;
        }
        self.route = route;
    }

    pub fn show_library(&mut self) {
        let mut view = LibraryView::new();
        view.clamp(&self.repo);
        self.go_to(Route::Library(view));
    }

    pub fn new_script(&mut self) {
        self.go_to(Route::Editor(Editor::new()));
    }

    pub fn edit_script(&mut self, id: &str) {
        match self.repo.get(id) {
            Some(script) => {
                let editor = Editor::edit(script);
                self.go_to(Route::Editor(editor));
            }
            None => self.show_library(),
        }
    }

    /// Open the prompter for `id`, or the library when it does not resolve
    pub fn play_script(&mut self, id: &str, now: Instant) {
        match self.repo.get(id) {
            Some(script) => {
                info!(%id, "opening prompter");
                let view = PrompterView::open(script, &self.settings, self.size, now);
                self.go_to(Route::Prompter(view));
            }
            None => {
                warn!(%id, "no such script, showing library");
                self.show_library();
            }
        }
    }

    // Editor

    pub fn save_editor(&mut self) {
        let Route::Editor(editor) = &self.route else {
            return;
        };
        match editor.save() {
            Ok(script) => {
                self.repo.save(script);
                self.clear_message();
                self.show_library();
            }
            Err(e) => self.set_message(e.to_string()),
        }
    }

    pub fn cancel_editor(&mut self) {
        if matches!(self.route, Route::Editor(_)) {
            self.show_library();
        }
    }

    pub fn request_import(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "import requested");
        self.effects.push(Effect::ReadFile(path));
    }

    pub fn request_paste(&mut self) {
        self.effects.push(Effect::ReadClipboard);
    }

    /// Apply the result of an import or clipboard read. Results for an
    /// editor that has since been left are dropped.
    pub fn complete(&mut self, completion: Completion) {
        let Route::Editor(editor) = &mut self.route else {
            debug!(session = completion.session, "editor closed, dropping completion");
            return;
        };
        if completion.session != self.session {
            debug!(session = completion.session, "stale completion dropped");
            return;
        }
        match completion.result {
            Ok(text) => {
                editor.append_block(&text);
                self.message = None;
            }
            Err(e) => {
                warn!(error = %e, "import failed");
                self.message = Some(e.to_string());
            }
        }
    }

    // Settings

    /// Merge a partial update, persist the whole record and re-layout the
    /// prompter if it is open
    pub fn apply_settings(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
        self.store.set(SETTINGS_KEY, &self.settings);
        if let Route::Prompter(view) = &mut self.route {
            view.relayout(&self.settings);
        }
    }

    // Prompter

    pub fn toggle_play(&mut self, frames: &mut dyn FrameScheduler, now: Instant) {
        if let Route::Prompter(view) = &mut self.route {
            view.toggle_play(now, frames);
            debug!(playing = view.is_playing(), "play toggled");
        }
    }

    /// Frame callback. The script is re-resolved first: if it is gone the
    /// prompter closes.
    pub fn on_frame(&mut self, id: FrameId, frames: &mut dyn FrameScheduler, now: Instant) {
        let Route::Prompter(view) = &mut self.route else {
            return;
        };
        if !self.repo.contains(view.script_id()) {
            view.pause(frames);
            self.show_library();
            return;
        }
        if view.on_frame(id, &self.settings, frames, now) == FrameOutcome::Finished {
            info!(id = %view.script_id(), "reached the end");
        }
    }

    pub fn exit_prompter(&mut self, frames: &mut dyn FrameScheduler) {
        let Route::Prompter(view) = &mut self.route else {
            return;
        };
        view.pause(frames);
        if view.is_fullscreen() {
            if let Err(e) = self.fullscreen.exit() {
                warn!(error = %e, "failed to leave full screen");
            }
        }
        self.show_library();
    }

    /// Request or leave full screen. The shown state follows the terminal's
    /// resize notifications rather than the request itself.
    pub fn toggle_fullscreen(&mut self) {
        let Route::Prompter(view) = &self.route else {
            return;
        };
        let result = if view.is_fullscreen() {
            self.fullscreen.exit()
        } else {
            self.fullscreen.request()
        };
        if let Err(e) = result {
            self.set_message(e.to_string());
        }
    }

    /// Esc in the prompter: close the panel, else leave full screen, else
    /// go back to the library
    pub fn prompter_escape(&mut self, frames: &mut dyn FrameScheduler) {
        let Route::Prompter(view) = &mut self.route else {
            return;
        };
        if view.close_panel() {
            return;
        }
        if view.is_fullscreen() {
            self.toggle_fullscreen();
            return;
        }
        self.exit_prompter(frames);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let change = self.fullscreen.observe_resize(width, height);
        if let Route::Prompter(view) = &mut self.route {
            if let Some(fullscreen) = change {
                view.set_fullscreen(fullscreen);
            }
            view.resize(self.size, &self.settings);
        }
    }

    /// Earliest instant at which the loop must wake to hide the controls
    pub fn controls_deadline(&self) -> Option<Instant> {
        match &self.route {
            Route::Prompter(view) => view.controls_deadline(),
            _ => None,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Route::Prompter(view) = &mut self.route {
            view.tick_controls(now);
        }
    }

    // Library

    pub fn confirm_delete(&mut self) {
        if let Route::Library(view) = &mut self.route {
            view.confirm_delete(&mut self.repo);
        }
    }
}
