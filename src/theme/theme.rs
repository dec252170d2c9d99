use super::Color;

/// Colours of the library and editor screens. The prompter screen takes its
/// text and background colours from the persisted settings instead.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub danger: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub overlay_bg: Color,
    pub overlay_fg: Color,
    pub progress: Color,
    pub progress_track: Color,
}

impl Theme {
    /// Slate background with cyan accents
    pub fn slate() -> Self {
        Self {
            background: Color::rgb(0x11, 0x18, 0x27),
            surface: Color::rgb(0x1f, 0x29, 0x37),
            foreground: Color::WHITE,
            muted: Color::rgb(0x9c, 0xa3, 0xaf),
            accent: Color::rgb(0x22, 0xd3, 0xee),
            danger: Color::rgb(0xf8, 0x71, 0x71),
            selection_bg: Color::rgb(0x08, 0x91, 0xb2),
            selection_fg: Color::WHITE,
            status_bar_bg: Color::rgb(0x37, 0x41, 0x51),
            status_bar_fg: Color::rgb(0xe5, 0xe7, 0xeb),
            overlay_bg: Color::rgb(0x1f, 0x29, 0x37),
            overlay_fg: Color::WHITE,
            progress: Color::rgb(0x22, 0xd3, 0xee),
            progress_track: Color::rgb(0x4b, 0x55, 0x63),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}
