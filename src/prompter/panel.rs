use crate::settings::{
    DARK, FontFamily, LIGHT, Settings, SettingsPatch, step_font_size, step_speed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    Speed,
    FontSize,
    FontFamily,
    Colors,
    Mirror,
}

impl PanelField {
    pub const ALL: [PanelField; 5] = [
        PanelField::Speed,
        PanelField::FontSize,
        PanelField::FontFamily,
        PanelField::Colors,
        PanelField::Mirror,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PanelField::Speed => "Speed (words per minute)",
            PanelField::FontSize => "Font size",
            PanelField::FontFamily => "Font style",
            PanelField::Colors => "Colour mode",
            PanelField::Mirror => "Mirror mode",
        }
    }

    pub fn value(&self, settings: &Settings) -> String {
        match self {
            PanelField::Speed => format!("{} wpm", settings.speed.round()),
            PanelField::FontSize => format!("{:.1} rem", settings.font_size),
            PanelField::FontFamily => settings.font_family.display().to_string(),
            PanelField::Colors => settings
                .color_preset()
                .map(|p| p.name.to_string())
                .unwrap_or_else(|| "Custom".to_string()),
            PanelField::Mirror => if settings.is_mirrored { "On" } else { "Off" }.to_string(),
        }
    }
}

/// The display settings overlay of the prompter
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    selected: usize,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> PanelField {
        PanelField::ALL[self.selected]
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < PanelField::ALL.len() {
            self.selected += 1;
        }
    }

    /// Patch for nudging the selected field one step in `direction`
    /// (negative is left/down)
    pub fn adjust(&self, settings: &Settings, direction: i32) -> SettingsPatch {
        match self.selected() {
            PanelField::Speed => SettingsPatch::speed(step_speed(settings.speed, direction)),
            PanelField::FontSize => {
                SettingsPatch::font_size(step_font_size(settings.font_size, direction))
            }
            PanelField::FontFamily => SettingsPatch::font_family(if direction < 0 {
                FontFamily::Sans
            } else {
                FontFamily::Serif
            }),
            PanelField::Colors => SettingsPatch::colors(if direction < 0 { DARK } else { LIGHT }),
            PanelField::Mirror => SettingsPatch::mirrored(!settings.is_mirrored),
        }
    }

    /// Patch for activating the selected field (Enter)
    pub fn activate(&self, settings: &Settings) -> Option<SettingsPatch> {
        match self.selected() {
            PanelField::FontFamily => Some(SettingsPatch::font_family(match settings.font_family {
                FontFamily::Sans => FontFamily::Serif,
                FontFamily::Serif => FontFamily::Sans,
            })),
            PanelField::Colors => Some(SettingsPatch::colors(
                if settings.color_preset() == Some(DARK) { LIGHT } else { DARK },
            )),
            PanelField::Mirror => Some(SettingsPatch::mirrored(!settings.is_mirrored)),
            PanelField::Speed | PanelField::FontSize => None,
        }
    }
}
