use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Route};
use crate::theme::{Color, Theme};

pub struct Renderer {
    pub width: u16,
    pub height: u16,
    pub(super) theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            width,
            height,
            theme,
        })
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(
            stdout(),
            SetCursorStyle::DefaultUserShape,
            Show,
            EnableLineWrap,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Rows available to the editor body, for scroll adjustment
    pub fn text_height(&self) -> usize {
        self.height.saturating_sub(super::editor::BODY_TOP + 1) as usize
    }

    pub fn render(&self, app: &App) -> io::Result<()> {
        let mut stdout = stdout();

        // Hide cursor during redraw to prevent flicker
        queue!(stdout, Hide)?;

        match &app.route {
            Route::Library(view) => self.render_library(&mut stdout, app, view)?,
            Route::Editor(editor) => self.render_editor(&mut stdout, app, editor)?,
            Route::Prompter(view) => self.render_prompter(&mut stdout, app, view)?,
        }

        stdout.flush()?;
        Ok(())
    }

    /// Fill a whole row with `text`, cut or padded to the terminal width
    pub(super) fn fill_row(
        &self,
        stdout: &mut impl Write,
        row: u16,
        text: &str,
        fg: Color,
        bg: Color,
    ) -> io::Result<()> {
        queue!(
            stdout,
            MoveTo(0, row),
            SetBackgroundColor(bg.to_crossterm()),
            SetForegroundColor(fg.to_crossterm()),
            Print(fit(text, self.width as usize))
        )?;
        Ok(())
    }

    /// The bottom line: a message if there is one, otherwise `hints`
    pub(super) fn render_status_line(
        &self,
        stdout: &mut impl Write,
        app: &App,
        hints: &str,
    ) -> io::Result<()> {
        let row = self.height.saturating_sub(1);
        match &app.message {
            Some(msg) => self.fill_row(
                stdout,
                row,
                &format!(" {}", msg),
                self.theme.danger,
                self.theme.background,
            ),
            None => self.fill_row(
                stdout,
                row,
                &format!(" {}", hints),
                self.theme.status_bar_fg,
                self.theme.status_bar_bg,
            ),
        }
    }
}

/// `text` cut or padded with spaces to exactly `width` columns
pub(super) fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Left and right parts on one line of `width` columns, right-aligned
/// part winning when they collide
pub(super) fn split_line(left: &str, right: &str, width: usize) -> String {
    let right_width: usize = right.chars().map(|c| c.width().unwrap_or(0)).sum();
    let left = fit(left, width.saturating_sub(right_width));
    fit(&format!("{}{}", left, right), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_cuts() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn fit_counts_wide_characters() {
        assert_eq!(fit("日本語", 5), "日本 ");
    }

    #[test]
    fn split_line_right_aligns() {
        assert_eq!(split_line("left", "right", 12), "left   right");
        assert_eq!(split_line("a long left part", "R", 6), "a lonR");
    }
}
