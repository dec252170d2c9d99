use std::io::{self, Write};

use crossterm::{
    cursor::{MoveTo, SetCursorStyle, Show},
    queue,
    style::{Attribute, SetAttribute},
};

use super::Renderer;
use super::renderer::split_line;
use crate::app::App;
use crate::library::LibraryView;

/// First row of the script list
const LIST_TOP: u16 = 3;

impl Renderer {
    pub(super) fn render_library(
        &self,
        stdout: &mut impl Write,
        app: &App,
        view: &LibraryView,
    ) -> io::Result<()> {
        let theme = &self.theme;
        let width = self.width as usize;
        let scripts = app.repo.list(&view.search);

        // Header
        queue!(stdout, SetAttribute(Attribute::Bold))?;
        let count = format!("{} scripts ", app.repo.len());
        self.fill_row(
            stdout,
            0,
            &split_line(" Teleprompter", &count, width),
            theme.accent,
            theme.surface,
        )?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;

        // Search box
        let search = if view.searching || !view.search.is_empty() {
            format!(" / {}", view.search)
        } else {
            " / to search".to_string()
        };
        let search_fg = if view.searching {
            theme.foreground
        } else {
            theme.muted
        };
        self.fill_row(stdout, 1, &search, search_fg, theme.background)?;
        self.fill_row(stdout, 2, "", theme.foreground, theme.background)?;

        let list_height = self.height.saturating_sub(LIST_TOP + 1);
        // Keep the selection on screen
        let first = (view.selected + 1).saturating_sub(list_height as usize);

        for row in 0..list_height {
            let y = LIST_TOP + row;
            let idx = first + row as usize;

            if scripts.is_empty() && row == 0 {
                let hint = if view.search.is_empty() {
                    "  No scripts yet. Press n to write one.".to_string()
                } else {
                    format!("  No scripts match \"{}\"", view.search)
                };
                self.fill_row(stdout, y, &hint, theme.muted, theme.background)?;
                continue;
            }

            match scripts.get(idx) {
                Some(script) => {
                    let date = format!("{}  ", script.created_display());
                    let line = split_line(&format!("  {}", script.title), &date, width);
                    if idx == view.selected {
                        self.fill_row(stdout, y, &line, theme.selection_fg, theme.selection_bg)?;
                    } else {
                        self.fill_row(stdout, y, &line, theme.foreground, theme.background)?;
                    }
                }
                None => self.fill_row(stdout, y, "", theme.foreground, theme.background)?,
            }
        }

        // Delete confirmation replaces the hints
        if let Some(id) = view.pending_delete() {
            let title = app.repo.get(id).map(|s| s.title.as_str()).unwrap_or("");
            let prompt = format!(" Delete \"{}\"? This cannot be undone. (y/n)", title);
            self.fill_row(
                stdout,
                self.height.saturating_sub(1),
                &prompt,
                theme.danger,
                theme.surface,
            )?;
            return Ok(());
        }

        self.render_status_line(
            stdout,
            app,
            "n new  e edit  enter play  d delete  / search  q quit",
        )?;

        if view.searching {
            let col = 3 + view.search.chars().count() as u16;
            queue!(stdout, MoveTo(col, 1), SetCursorStyle::BlinkingBar, Show)?;
        }
        Ok(())
    }
}
