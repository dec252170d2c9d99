use std::io::{self, Write};

use crossterm::{
    cursor::{MoveTo, SetCursorStyle, Show},
    queue,
    style::{Attribute, SetAttribute},
};
use unicode_width::UnicodeWidthChar;

use super::Renderer;
use super::renderer::split_line;
use crate::app::App;
use crate::editor::{Editor, FilePicker, Focus, Mode};

/// First row of the body text
pub(super) const BODY_TOP: u16 = 3;
const TITLE_LABEL: &str = " Title: ";
/// Left margin of the body text
const BODY_LEFT: u16 = 1;

fn display_width(text: impl Iterator<Item = char>) -> u16 {
    text.map(|c| c.width().unwrap_or(0) as u16).sum()
}

impl Renderer {
    pub(super) fn render_editor(
        &self,
        stdout: &mut impl Write,
        app: &App,
        editor: &Editor,
    ) -> io::Result<()> {
        let theme = &self.theme;
        let width = self.width as usize;

        let heading = if editor.is_new() {
            " New script"
        } else {
            " Edit script"
        };
        queue!(stdout, SetAttribute(Attribute::Bold))?;
        self.fill_row(stdout, 0, heading, theme.accent, theme.surface)?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;

        let title_fg = if editor.focus == Focus::Title {
            theme.foreground
        } else {
            theme.muted
        };
        let title = format!("{}{}", TITLE_LABEL, editor.title.text());
        self.fill_row(stdout, 1, &title, title_fg, theme.background)?;
        self.fill_row(stdout, 2, &"─".repeat(width), theme.muted, theme.background)?;

        if let (Mode::FilePicker, Some(picker)) = (editor.mode, editor.picker.as_ref()) {
            self.render_picker(stdout, picker)?;
        } else {
            self.render_body(stdout, editor)?;
        }

        self.render_editor_status(stdout, app, editor)?;
        self.position_editor_cursor(stdout, editor)
    }

    fn render_body(&self, stdout: &mut impl Write, editor: &Editor) -> io::Result<()> {
        let theme = &self.theme;
        let line_count = editor.body.line_count();

        for row in 0..self.text_height() {
            let y = BODY_TOP + row as u16;
            let line_idx = row + editor.scroll_offset;

            if line_idx < line_count {
                let line: String = editor.body.line(line_idx).chars().collect();
                let content = line.trim_end_matches(['\n', '\r']);
                let text = format!("{}{}", " ".repeat(BODY_LEFT as usize), content);
                self.fill_row(stdout, y, &text, theme.foreground, theme.background)?;
            } else if line_idx == 0 {
                self.fill_row(
                    stdout,
                    y,
                    " Write or paste your script here. **bold** and *light* are highlighted.",
                    theme.muted,
                    theme.background,
                )?;
            } else {
                self.fill_row(stdout, y, "", theme.foreground, theme.background)?;
            }
        }
        Ok(())
    }

    fn render_picker(&self, stdout: &mut impl Write, picker: &FilePicker) -> io::Result<()> {
        let theme = &self.theme;
        let height = self.text_height();
        let first = (picker.selected + 1).saturating_sub(height);

        for row in 0..height {
            let y = BODY_TOP + row as u16;
            let idx = first + row;
            let Some(entry) = picker.entries.get(idx) else {
                self.fill_row(stdout, y, "", theme.foreground, theme.background)?;
                continue;
            };

            let icon = match (entry.is_dir, picker.is_expanded(&entry.path)) {
                (true, true) => "▾ ",
                (true, false) => "▸ ",
                (false, _) => "  ",
            };
            let text = format!(" {}{}{}", "  ".repeat(entry.depth), icon, entry.name);

            if idx == picker.selected {
                self.fill_row(stdout, y, &text, theme.selection_fg, theme.selection_bg)?;
            } else if entry.is_dir {
                self.fill_row(stdout, y, &text, theme.accent, theme.background)?;
            } else if entry.is_text {
                self.fill_row(stdout, y, &text, theme.foreground, theme.background)?;
            } else {
                // Only .txt files can be imported
                self.fill_row(stdout, y, &text, theme.muted, theme.background)?;
            }
        }
        Ok(())
    }

    fn render_editor_status(
        &self,
        stdout: &mut impl Write,
        app: &App,
        editor: &Editor,
    ) -> io::Result<()> {
        let row = self.height.saturating_sub(1);

        // Command mode - just show the command
        if editor.mode == Mode::Command {
            let line = format!(":{}", editor.command_buffer);
            return self.fill_row(stdout, row, &line, self.theme.foreground, self.theme.background);
        }

        if app.message.is_some() {
            return self.render_status_line(stdout, app, "");
        }

        let hints = match editor.mode {
            Mode::FilePicker => "enter open  j/k move  esc back",
            Mode::Insert => "esc normal  tab switch field  ctrl-s save",
            _ => ":w save  :q cancel  :import <file>  :paste  i insert",
        };
        let left = format!(" {} | {} ", editor.mode.display(), hints);
        let position = format!(" {}:{} ", editor.cursor.line + 1, editor.cursor.col + 1);
        let line = split_line(&left, &position, self.width as usize);
        self.fill_row(
            stdout,
            row,
            &line,
            self.theme.status_bar_fg,
            self.theme.status_bar_bg,
        )
    }

    fn position_editor_cursor(&self, stdout: &mut impl Write, editor: &Editor) -> io::Result<()> {
        let (x, y) = match (editor.mode, editor.focus) {
            (Mode::FilePicker, _) => return Ok(()),
            (Mode::Command, _) => (
                1 + display_width(editor.command_buffer.chars()),
                self.height.saturating_sub(1),
            ),
            (_, Focus::Title) => (
                TITLE_LABEL.len() as u16
                    + display_width(editor.title.text().chars().take(editor.title.cursor())),
                1,
            ),
            (_, Focus::Body) => {
                if editor.cursor.line < editor.scroll_offset {
                    return Ok(());
                }
                let row = (editor.cursor.line - editor.scroll_offset) as u16;
                let line = editor.body.line(editor.cursor.line);
                (
                    BODY_LEFT + display_width(line.chars().take(editor.cursor.col)),
                    BODY_TOP + row,
                )
            }
        };

        let style = match editor.mode {
            Mode::Normal => SetCursorStyle::SteadyBlock,
            _ => SetCursorStyle::BlinkingBar,
        };
        queue!(stdout, MoveTo(x, y), style, Show)?;
        Ok(())
    }
}
