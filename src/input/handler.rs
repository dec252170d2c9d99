use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Route};
use crate::editor::{Editor, EditorCommand, Mode};
use crate::library::{LibraryView, ScriptRepository};
use crate::prompter::FrameScheduler;
use crate::settings::{SettingsPatch, step_speed};

pub fn handle_event(app: &mut App, frames: &mut dyn FrameScheduler, event: Event, now: Instant) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            // Clear any message on keypress
            app.clear_message();
            handle_key(app, frames, key, now);
        }
        Event::Mouse(mouse) => handle_mouse(app, frames, mouse, now),
        Event::Paste(text) => handle_paste(app, &text),
        Event::Resize(width, height) => app.resize(width, height),
        _ => {}
    }
}

fn handle_key(app: &mut App, frames: &mut dyn FrameScheduler, key: KeyEvent, now: Instant) {
    // Ctrl-C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match &app.route {
        Route::Library(_) => handle_library_key(app, key, now),
        Route::Editor(_) => handle_editor_key(app, key),
        Route::Prompter(_) => handle_prompter_key(app, frames, key, now),
    }
}

/// What a library key asks for once the view is no longer borrowed
enum LibraryAction {
    New,
    Edit(String),
    Play(String),
    ConfirmDelete,
    Quit,
}

fn handle_library_key(app: &mut App, key: KeyEvent, now: Instant) {
    let Route::Library(view) = &mut app.route else {
        return;
    };
    let action = library_action(view, &app.repo, key);
    match action {
        Some(LibraryAction::New) => app.new_script(),
        Some(LibraryAction::Edit(id)) => app.edit_script(&id),
        Some(LibraryAction::Play(id)) => app.play_script(&id, now),
        Some(LibraryAction::ConfirmDelete) => app.confirm_delete(),
        Some(LibraryAction::Quit) => app.quit(),
        None => {}
    }
}

fn library_action(
    view: &mut LibraryView,
    repo: &ScriptRepository,
    key: KeyEvent,
) -> Option<LibraryAction> {
    if view.pending_delete().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => return Some(LibraryAction::ConfirmDelete),
            _ => view.cancel_delete(),
        }
        return None;
    }

    if view.searching {
        match key.code {
            KeyCode::Esc => view.clear_search(),
            KeyCode::Enter | KeyCode::Down | KeyCode::Up => view.finish_search(),
            KeyCode::Backspace => view.pop_search(),
            KeyCode::Char(c) => view.push_search(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view.move_down(repo),
        KeyCode::Char('k') | KeyCode::Up => view.move_up(),
        KeyCode::Char('/') => view.start_search(),
        KeyCode::Esc => view.clear_search(),
        KeyCode::Char('n') => return Some(LibraryAction::New),
        KeyCode::Char('e') => return view.selected_id(repo).map(LibraryAction::Edit),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char(' ') => {
            return view.selected_id(repo).map(LibraryAction::Play);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = view.selected_id(repo) {
                view.request_delete(id);
            }
        }
        KeyCode::Char('q') => return Some(LibraryAction::Quit),
        _ => {}
    }
    None
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let Route::Editor(editor) = &mut app.route else {
        return;
    };

    // Chords that work in every mode but the picker
    if editor.mode != Mode::FilePicker && key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => return app.save_editor(),
            KeyCode::Char('v') => return app.request_paste(),
            KeyCode::Char('o') => return editor.open_picker(),
            _ => {}
        }
    }

    match editor.mode {
        Mode::Normal => handle_normal_mode(editor, key),
        Mode::Insert => handle_insert_mode(editor, key),
        Mode::Command => {
            if let Some(command) = handle_command_mode(editor, key) {
                run_editor_command(app, command);
            }
        }
        Mode::FilePicker => {
            if let Some(path) = handle_file_picker_mode(editor, key) {
                app.request_import(path);
            }
        }
    }
}

fn run_editor_command(app: &mut App, command: EditorCommand) {
    match command {
        EditorCommand::Save => app.save_editor(),
        EditorCommand::Cancel => app.cancel_editor(),
        EditorCommand::Import(path) => app.request_import(path),
        EditorCommand::Paste => app.request_paste(),
        EditorCommand::Nothing => {}
    }
}

fn handle_file_picker_mode(editor: &mut Editor, key: KeyEvent) -> Option<std::path::PathBuf> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => editor.close_picker(),
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(picker) = editor.picker.as_mut() {
                picker.move_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(picker) = editor.picker.as_mut() {
                picker.move_up();
            }
        }
        KeyCode::Enter | KeyCode::Char('l') => return editor.pick_selected(),
        _ => {}
    }
    None
}

fn handle_normal_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        // Basic movement
        KeyCode::Char('h') | KeyCode::Left => editor.move_left(),
        KeyCode::Char('j') | KeyCode::Down => editor.move_down(),
        KeyCode::Char('k') | KeyCode::Up => editor.move_up(),
        KeyCode::Char('l') | KeyCode::Right => editor.move_right(),

        // Line motions
        KeyCode::Char('0') | KeyCode::Home => editor.move_to_line_start(),
        KeyCode::Char('$') | KeyCode::End => editor.move_to_line_end(),
        KeyCode::Char('g') => editor.move_to_first_line(),
        KeyCode::Char('G') => editor.move_to_last_line(),

        // Insert mode entry
        KeyCode::Char('i') => editor.enter_insert_mode(),
        KeyCode::Char('a') => editor.append(),
        KeyCode::Char('A') => editor.append_end_of_line(),
        KeyCode::Char('o') => editor.open_line_below(),

        KeyCode::Char('x') | KeyCode::Delete => editor.delete_char_forward(),
        KeyCode::Tab => editor.toggle_focus(),
        KeyCode::Char(':') => editor.enter_command_mode(),

        _ => {}
    }
}

fn handle_insert_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => editor.enter_normal_mode(),
        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Backspace => editor.delete_char_backward(),
        KeyCode::Delete => editor.delete_char_forward(),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Tab => editor.toggle_focus(),

        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_to_line_start(),
        KeyCode::End => editor.move_to_line_end(),

        _ => {}
    }
}

fn handle_command_mode(editor: &mut Editor, key: KeyEvent) -> Option<EditorCommand> {
    match key.code {
        KeyCode::Esc => editor.enter_normal_mode(),
        KeyCode::Enter => return Some(editor.execute_command()),
        KeyCode::Backspace => {
            editor.command_buffer.pop();
            if editor.command_buffer.is_empty() {
                editor.enter_normal_mode();
            }
        }
        KeyCode::Char(c) => editor.command_buffer.push(c),
        _ => {}
    }
    None
}

fn handle_paste(app: &mut App, text: &str) {
    if let Route::Editor(editor) = &mut app.route {
        match editor.mode {
            Mode::Command => editor.command_buffer.push_str(text.lines().next().unwrap_or("")),
            Mode::FilePicker => {}
            Mode::Normal | Mode::Insert => editor.insert_text(text),
        }
    }
}

fn handle_prompter_key(
    app: &mut App,
    frames: &mut dyn FrameScheduler,
    key: KeyEvent,
    now: Instant,
) {
    let settings = app.settings().clone();
    let Route::Prompter(view) = &mut app.route else {
        return;
    };
    view.activity(now);

    // Settings panel takes the arrows while open
    if let Some(panel) = view.panel_mut() {
        let patch = match key.code {
            KeyCode::Char('k') | KeyCode::Up => {
                panel.move_up();
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                panel.move_down();
                None
            }
            KeyCode::Char('h') | KeyCode::Left => Some(panel.adjust(&settings, -1)),
            KeyCode::Char('l') | KeyCode::Right => Some(panel.adjust(&settings, 1)),
            KeyCode::Enter => panel.activate(&settings),
            KeyCode::Char('s') => {
                view.toggle_panel();
                None
            }
            KeyCode::Esc => return app.prompter_escape(frames),
            _ => None,
        };
        if let Some(patch) = patch {
            app.apply_settings(patch);
        }
        return;
    }

    match key.code {
        KeyCode::Char(' ') => app.toggle_play(frames, now),
        KeyCode::Char('q') | KeyCode::Backspace => app.exit_prompter(frames),
        KeyCode::Esc => app.prompter_escape(frames),
        KeyCode::Char('f') => app.toggle_fullscreen(),
        KeyCode::Char('s') => view.toggle_panel(),
        KeyCode::Char('m') => app.apply_settings(SettingsPatch::mirrored(!settings.is_mirrored)),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
            app.apply_settings(SettingsPatch::speed(step_speed(settings.speed, 1)))
        }
        KeyCode::Char('-') | KeyCode::Char('[') => {
            app.apply_settings(SettingsPatch::speed(step_speed(settings.speed, -1)))
        }

        // Seeking moves the position without pausing
        KeyCode::Up | KeyCode::Char('k') => view.seek_rows(-1.0),
        KeyCode::Down | KeyCode::Char('j') => view.seek_rows(1.0),
        KeyCode::PageUp => view.seek_page(-1.0),
        KeyCode::PageDown => view.seek_page(1.0),
        KeyCode::Home => view.seek_start(),
        KeyCode::End => view.seek_end(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, frames: &mut dyn FrameScheduler, mouse: MouseEvent, now: Instant) {
    match &mut app.route {
        Route::Prompter(view) => {
            view.activity(now);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if view.panel().is_none() => {
                    app.toggle_play(frames, now)
                }
                MouseEventKind::ScrollUp => view.seek_rows(-1.0),
                MouseEventKind::ScrollDown => view.seek_rows(1.0),
                _ => {}
            }
        }
        Route::Library(view) => match mouse.kind {
            MouseEventKind::ScrollUp => view.move_up(),
            MouseEventKind::ScrollDown => view.move_down(&app.repo),
            _ => {}
        },
        Route::Editor(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::library::Script;
    use crate::prompter::{FullscreenHost, ManualFrames};
    use crate::settings::Settings;
    use crate::store::Store;

    struct NoFullscreen;

    impl FullscreenHost for NoFullscreen {
        fn request(&mut self) -> Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> Result<()> {
            Ok(())
        }

        fn observe_resize(&mut self, _width: u16, _height: u16) -> Option<bool> {
            None
        }
    }

    fn app() -> App {
        let mut app = App::new(
            Store::in_memory(),
            Settings::default(),
            Box::new(NoFullscreen),
            (80, 24),
        );
        app.repo.save(Script {
            id: "a".to_string(),
            title: "Keynote".to_string(),
            content: "word ".repeat(500),
            created_at: 1,
        });
        app
    }

    fn press(app: &mut App, frames: &mut ManualFrames, code: KeyCode) {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        handle_event(app, frames, event, Instant::now());
    }

    fn type_text(app: &mut App, frames: &mut ManualFrames, text: &str) {
        for c in text.chars() {
            press(app, frames, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_in_library_plays_selected_script() {
        let mut app = app();
        let mut frames = ManualFrames::new();
        press(&mut app, &mut frames, KeyCode::Enter);
        assert!(matches!(app.route, Route::Prompter(_)));

        press(&mut app, &mut frames, KeyCode::Char(' '));
        assert!(frames.pending.is_some());
        press(&mut app, &mut frames, KeyCode::Char('q'));
        assert!(matches!(app.route, Route::Library(_)));
        assert!(frames.pending.is_none());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut app = app();
        let mut frames = ManualFrames::new();
        press(&mut app, &mut frames, KeyCode::Char('d'));
        press(&mut app, &mut frames, KeyCode::Char('n'));
        assert_eq!(app.repo.len(), 1);

        press(&mut app, &mut frames, KeyCode::Char('d'));
        press(&mut app, &mut frames, KeyCode::Char('y'));
        assert!(app.repo.is_empty());
    }

    #[test]
    fn new_script_typed_and_saved_with_command() {
        let mut app = app();
        let mut frames = ManualFrames::new();
        press(&mut app, &mut frames, KeyCode::Char('n'));
        type_text(&mut app, &mut frames, "Toast");
        press(&mut app, &mut frames, KeyCode::Enter);
        type_text(&mut app, &mut frames, "Cheers");
        press(&mut app, &mut frames, KeyCode::Esc);
        type_text(&mut app, &mut frames, ":w");
        press(&mut app, &mut frames, KeyCode::Enter);

        assert!(matches!(app.route, Route::Library(_)));
        let saved = app.repo.list("toast");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].content, "Cheers");
    }

    #[test]
    fn bracketed_paste_inserts_into_editor() {
        let mut app = app();
        let mut frames = ManualFrames::new();
        press(&mut app, &mut frames, KeyCode::Char('n'));
        press(&mut app, &mut frames, KeyCode::Tab);
        handle_event(
            &mut app,
            &mut frames,
            Event::Paste("line one\r\nline two".to_string()),
            Instant::now(),
        );

        let Route::Editor(editor) = &app.route else {
            panic!("expected the editor");
        };
        assert_eq!(editor.body.text(), "line one\nline two");
    }

    #[test]
    fn speed_keys_persist_a_patch() {
        let mut app = app();
        let mut frames = ManualFrames::new();
        press(&mut app, &mut frames, KeyCode::Enter);
        press(&mut app, &mut frames, KeyCode::Char('+'));
        assert_eq!(app.settings().speed, 125.0);
        press(&mut app, &mut frames, KeyCode::Char('-'));
        press(&mut app, &mut frames, KeyCode::Char('-'));
        assert_eq!(app.settings().speed, 115.0);
    }

    #[test]
    fn search_filters_before_selection() {
        let mut app = app();
        let mut frames = ManualFrames::new();
        press(&mut app, &mut frames, KeyCode::Char('/'));
        type_text(&mut app, &mut frames, "zzz");
        press(&mut app, &mut frames, KeyCode::Enter);
        press(&mut app, &mut frames, KeyCode::Enter);
        // Nothing matches, so nothing opens
        assert!(matches!(app.route, Route::Library(_)));
    }
}
