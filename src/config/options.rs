use std::path::PathBuf;

use crate::settings::Settings;

pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const MAX_FRAME_RATE: u32 = 240;

/// Start-up configuration, customizable via the Rhai config file
#[derive(Debug, Clone)]
pub struct Config {
    /// Where scripts, settings and the log live
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    /// Display refresh rate the scroll loop is driven at
    pub frame_rate: u32,
    /// Settings used the first time the app runs, before any are persisted
    pub defaults: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            defaults: Settings::default(),
        }
    }
}

impl Config {
    /// Configured data directory, else the platform data dir
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("cue")))
    }
}
