use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use super::Renderer;
use super::renderer::fit;
use crate::app::App;
use crate::prompter::{
    Emphasis, PanelField, PrompterView, Row, SettingsPanel, format_time, mirror, row_width,
    side_margin,
};
use crate::settings::{DARK, Settings};
use crate::theme::Color;

const PANEL_WIDTH: u16 = 44;

impl Renderer {
    pub(super) fn render_prompter(
        &self,
        stdout: &mut impl Write,
        app: &App,
        view: &PrompterView,
    ) -> io::Result<()> {
        let settings = app.settings();
        let fg = Color::from_hex_or(
            &settings.text_color,
            Color::from_hex_or(DARK.text, Color::WHITE),
        );
        let bg = Color::from_hex_or(
            &settings.background_color,
            Color::from_hex_or(DARK.background, Color::BLACK),
        );

        self.render_script(stdout, view, settings, fg, bg)?;

        if view.controls_visible() {
            self.render_top_bar(stdout, view, settings)?;
            self.render_bottom_bar(stdout, app, view, settings)?;
        }
        if let Some(panel) = view.panel() {
            self.render_panel(stdout, panel, settings)?;
        }
        Ok(())
    }

    fn render_script(
        &self,
        stdout: &mut impl Write,
        view: &PrompterView,
        settings: &Settings,
        fg: Color,
        bg: Color,
    ) -> io::Result<()> {
        let width = self.width as usize;
        let margin = side_margin(self.width);
        let text_width = width.saturating_sub(2 * margin);

        queue!(stdout, SetBackgroundColor(bg.to_crossterm()))?;
        for y in 0..self.height {
            queue!(
                stdout,
                MoveTo(0, y),
                SetForegroundColor(fg.to_crossterm()),
                Print(" ".repeat(margin))
            )?;

            let row: Row = match view.viewport().content_row_at(y as usize) {
                Some(idx) if settings.is_mirrored => mirror(&view.rows()[idx], text_width),
                Some(idx) => view.rows()[idx].clone(),
                None => Vec::new(),
            };

            for span in &row {
                let attr = match span.emphasis {
                    Emphasis::None => Attribute::NormalIntensity,
                    Emphasis::Strong => Attribute::Bold,
                    Emphasis::Light => Attribute::Italic,
                };
                queue!(stdout, SetAttribute(attr), Print(&span.text))?;
                queue!(stdout, SetAttribute(Attribute::Reset))?;
                queue!(
                    stdout,
                    SetBackgroundColor(bg.to_crossterm()),
                    SetForegroundColor(fg.to_crossterm())
                )?;
            }

            let rest = width.saturating_sub(margin + row_width(&row));
            queue!(stdout, Print(" ".repeat(rest)))?;
        }
        Ok(())
    }

    fn render_top_bar(
        &self,
        stdout: &mut impl Write,
        view: &PrompterView,
        settings: &Settings,
    ) -> io::Result<()> {
        let (elapsed, total) = view.times(settings);
        let times = format!("{} / {}", format_time(elapsed), format_time(total));
        let screen = if view.is_fullscreen() {
            "f exit full screen"
        } else {
            "f full screen"
        };
        let right = format!("s settings  {} ", screen);
        let line = three_part(" ← q Library", &times, &right, self.width as usize);
        self.fill_row(stdout, 0, &line, self.theme.overlay_fg, self.theme.overlay_bg)
    }

    fn render_bottom_bar(
        &self,
        stdout: &mut impl Write,
        app: &App,
        view: &PrompterView,
        settings: &Settings,
    ) -> io::Result<()> {
        let width = self.width as usize;
        let filled = progress_cells(view.progress(), width);
        queue!(
            stdout,
            MoveTo(0, self.height.saturating_sub(2)),
            SetBackgroundColor(self.theme.overlay_bg.to_crossterm()),
            SetForegroundColor(self.theme.progress.to_crossterm()),
            Print("━".repeat(filled)),
            SetForegroundColor(self.theme.progress_track.to_crossterm()),
            Print("─".repeat(width - filled))
        )?;

        if app.message.is_some() {
            return self.render_status_line(stdout, app, "");
        }

        let play = if view.is_playing() {
            "❚❚ Pause"
        } else {
            "▶ Play"
        };
        let mirrored = if settings.is_mirrored { "  mirrored" } else { "" };
        let controls = format!(
            " {} wpm  -/+ speed   space {}{}",
            settings.speed.round(),
            play,
            mirrored
        );
        self.fill_row(
            stdout,
            self.height.saturating_sub(1),
            &controls,
            self.theme.overlay_fg,
            self.theme.overlay_bg,
        )
    }

    fn render_panel(
        &self,
        stdout: &mut impl Write,
        panel: &SettingsPanel,
        settings: &Settings,
    ) -> io::Result<()> {
        let theme = &self.theme;
        let width = PANEL_WIDTH.min(self.width);
        let height = PanelField::ALL.len() as u16 + 4;
        let x = (self.width - width) / 2;
        let y = self.height.saturating_sub(height) / 2;
        let inner = width as usize;

        let mut lines = vec![(" Display settings".to_string(), false)];
        lines.push((String::new(), false));
        for field in PanelField::ALL {
            let value = format!("‹ {} › ", field.value(settings));
            let label = format!("  {}", field.label());
            let pad = inner.saturating_sub(label.chars().count() + value.chars().count());
            lines.push((
                format!("{}{}{}", label, " ".repeat(pad), value),
                field == panel.selected(),
            ));
        }
        lines.push((String::new(), false));
        lines.push((" ↑↓ choose  ←→ change  enter toggle  esc close".to_string(), false));

        for (i, (text, selected)) in lines.iter().enumerate() {
            let (fg, bg) = if *selected {
                (theme.selection_fg, theme.selection_bg)
            } else {
                (theme.overlay_fg, theme.surface)
            };
            queue!(
                stdout,
                MoveTo(x, y + i as u16),
                SetBackgroundColor(bg.to_crossterm()),
                SetForegroundColor(fg.to_crossterm()),
                Print(fit(text, inner))
            )?;
        }
        Ok(())
    }
}

/// Cells of a `width`-wide bar covered at `progress`
fn progress_cells(progress: f64, width: usize) -> usize {
    ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
}

/// `left` and `right` at the edges with `center` centred between them
fn three_part(left: &str, center: &str, right: &str, width: usize) -> String {
    let mut line: Vec<char> = fit(left, width).chars().collect();
    let place = |line: &mut Vec<char>, text: &str, start: usize| {
        for (i, ch) in text.chars().enumerate() {
            if let Some(slot) = line.get_mut(start + i) {
                *slot = ch;
            }
        }
    };
    let center_len = center.chars().count();
    place(&mut line, center, width.saturating_sub(center_len) / 2);
    let right_len = right.chars().count();
    place(&mut line, right, width.saturating_sub(right_len));
    line.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_cells(0.0, 40), 0);
        assert_eq!(progress_cells(0.5, 40), 20);
        assert_eq!(progress_cells(1.0, 40), 40);
        assert_eq!(progress_cells(1.5, 40), 40);
    }

    #[test]
    fn three_part_places_center_and_right() {
        assert_eq!(three_part("L", "mid", "R", 11), "L   mid   R");
    }
}
