use serde::{Deserialize, Serialize};

pub const MIN_SPEED: f64 = 20.0;
pub const MAX_SPEED: f64 = 300.0;
pub const SPEED_STEP: f64 = 5.0;

pub const MIN_FONT_SIZE: f64 = 1.0;
pub const MAX_FONT_SIZE: f64 = 10.0;
pub const FONT_SIZE_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
}

impl FontFamily {
    pub fn display(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Sans-Serif",
            FontFamily::Serif => "Serif",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sans" => Some(FontFamily::Sans),
            "serif" => Some(FontFamily::Serif),
            _ => None,
        }
    }
}

/// Text and background colours of a colour preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub text: &'static str,
    pub background: &'static str,
}

pub const DARK: ColorPreset = ColorPreset {
    name: "Dark",
    text: "#e2e8f0",
    background: "#0f172a",
};

pub const LIGHT: ColorPreset = ColorPreset {
    name: "Light",
    text: "#000000",
    background: "#ffffff",
};

/// Display settings applied during playback. Persisted as one record.
///
/// Fields missing from a stored record take their default value, so older
/// records keep loading when fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Words per minute
    pub speed: f64,
    /// Relative text size, in rem
    pub font_size: f64,
    pub font_family: FontFamily,
    pub text_color: String,
    pub background_color: String,
    pub is_mirrored: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 120.0,
            font_size: 4.0,
            font_family: FontFamily::Sans,
            text_color: DARK.text.to_string(),
            background_color: DARK.background.to_string(),
            is_mirrored: false,
        }
    }
}

impl Settings {
    /// Merge a partial update over the current values
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(font_family) = patch.font_family {
            self.font_family = font_family;
        }
        if let Some(text_color) = patch.text_color {
            self.text_color = text_color;
        }
        if let Some(background_color) = patch.background_color {
            self.background_color = background_color;
        }
        if let Some(is_mirrored) = patch.is_mirrored {
            self.is_mirrored = is_mirrored;
        }
    }

    pub fn color_preset(&self) -> Option<ColorPreset> {
        [DARK, LIGHT].into_iter().find(|preset| {
            preset.text.eq_ignore_ascii_case(&self.text_color)
                && preset.background.eq_ignore_ascii_case(&self.background_color)
        })
    }
}

/// A partial settings update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub speed: Option<f64>,
    pub font_size: Option<f64>,
    pub font_family: Option<FontFamily>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub is_mirrored: Option<bool>,
}

impl SettingsPatch {
    pub fn speed(speed: f64) -> Self {
        Self {
            speed: Some(speed),
            ..Self::default()
        }
    }

    pub fn font_size(font_size: f64) -> Self {
        Self {
            font_size: Some(font_size),
            ..Self::default()
        }
    }

    pub fn font_family(font_family: FontFamily) -> Self {
        Self {
            font_family: Some(font_family),
            ..Self::default()
        }
    }

    pub fn colors(preset: ColorPreset) -> Self {
        Self {
            text_color: Some(preset.text.to_string()),
            background_color: Some(preset.background.to_string()),
            ..Self::default()
        }
    }

    pub fn mirrored(is_mirrored: bool) -> Self {
        Self {
            is_mirrored: Some(is_mirrored),
            ..Self::default()
        }
    }
}

/// Next speed one step up or down, kept inside the slider range
pub fn step_speed(speed: f64, steps: i32) -> f64 {
    (speed + SPEED_STEP * steps as f64).clamp(MIN_SPEED, MAX_SPEED)
}

/// Next font size one step up or down, kept inside the slider range and
/// rounded to one decimal so repeated steps do not drift
pub fn step_font_size(font_size: f64, steps: i32) -> f64 {
    let next = (font_size + FONT_SIZE_STEP * steps as f64).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    (next * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_patch_leaves_other_fields() {
        let mut settings = Settings {
            font_size: 6.5,
            font_family: FontFamily::Serif,
            is_mirrored: true,
            ..Settings::default()
        };
        let before = settings.clone();
        settings.apply(SettingsPatch::speed(90.0));

        assert_eq!(settings.speed, 90.0);
        assert_eq!(settings.font_size, before.font_size);
        assert_eq!(settings.font_family, before.font_family);
        assert_eq!(settings.text_color, before.text_color);
        assert_eq!(settings.background_color, before.background_color);
        assert_eq!(settings.is_mirrored, before.is_mirrored);
    }

    #[test]
    fn colour_patch_sets_both_colours() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch::colors(LIGHT));
        assert_eq!(settings.text_color, "#000000");
        assert_eq!(settings.background_color, "#ffffff");
        assert_eq!(settings.color_preset(), Some(LIGHT));
    }

    #[test]
    fn serializes_with_original_field_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["speed"], 120.0);
        assert_eq!(json["fontSize"], 4.0);
        assert_eq!(json["fontFamily"], "sans");
        assert_eq!(json["textColor"], "#e2e8f0");
        assert_eq!(json["backgroundColor"], "#0f172a");
        assert_eq!(json["isMirrored"], false);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"speed": 200}"#).unwrap();
        assert_eq!(settings.speed, 200.0);
        assert_eq!(settings.font_size, 4.0);
        assert_eq!(settings.font_family, FontFamily::Sans);
    }

    #[test]
    fn step_speed_clamps_to_range() {
        assert_eq!(step_speed(120.0, 1), 125.0);
        assert_eq!(step_speed(22.0, -1), MIN_SPEED);
        assert_eq!(step_speed(299.0, 2), MAX_SPEED);
    }

    #[test]
    fn step_font_size_does_not_drift() {
        let mut size = 4.0;
        for _ in 0..3 {
            size = step_font_size(size, 1);
        }
        assert_eq!(size, 4.3);
        assert_eq!(step_font_size(1.0, -1), MIN_FONT_SIZE);
    }
}
