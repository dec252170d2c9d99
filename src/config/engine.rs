use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};
use tracing::debug;

use super::Config;
use super::options::MAX_FRAME_RATE;
use crate::error::{Error, Result};
use crate::settings::{FontFamily, MAX_FONT_SIZE, MAX_SPEED, MIN_FONT_SIZE, MIN_SPEED};
use crate::theme::Color;

/// The Rhai scripting engine for configuration
pub struct ConfigEngine {
    engine: Engine,
    config: Arc<RwLock<Config>>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let config = Arc::new(RwLock::new(Config::default()));
        let engine = Self::create_engine(Arc::clone(&config));

        Self { engine, config }
    }

    fn create_engine(config: Arc<RwLock<Config>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        {
            let c = Arc::clone(&config);
            engine.register_fn("set_data_dir", move |path: &str| {
                if let Ok(mut config) = c.write() {
                    config.data_dir = Some(expand_home(path));
                }
            });
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn("set_log_level", move |level: &str| {
                if let Ok(mut config) = c.write() {
                    config.log_level = level.to_string();
                }
            });
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn("set_frame_rate", move |fps: i64| {
                if let Ok(mut config) = c.write() {
                    config.frame_rate = fps.clamp(1, MAX_FRAME_RATE as i64) as u32;
                }
            });
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn("set_default_speed", move |wpm: i64| {
                if let Ok(mut config) = c.write() {
                    config.defaults.speed = (wpm as f64).clamp(MIN_SPEED, MAX_SPEED);
                }
            });
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn("set_default_font_size", move |size: f64| {
                if let Ok(mut config) = c.write() {
                    config.defaults.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                }
            });
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn(
                "set_default_font_family",
                move |name: &str| -> std::result::Result<(), Box<rhai::EvalAltResult>> {
                    let family = FontFamily::parse(name)
                        .ok_or_else(|| format!("unknown font family '{}'", name))?;
                    if let Ok(mut config) = c.write() {
                        config.defaults.font_family = family;
                    }
                    Ok(())
                },
            );
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn(
                "set_default_colors",
                move |text: &str, background: &str| -> std::result::Result<(), Box<rhai::EvalAltResult>> {
                    for hex in [text, background] {
                        if Color::from_hex(hex).is_none() {
                            return Err(format!("invalid colour '{}'", hex).into());
                        }
                    }
                    if let Ok(mut config) = c.write() {
                        config.defaults.text_color = text.to_string();
                        config.defaults.background_color = background.to_string();
                    }
                    Ok(())
                },
            );
        }

        {
            let c = Arc::clone(&config);
            engine.register_fn("set_default_mirrored", move |enabled: bool| {
                if let Ok(mut config) = c.write() {
                    config.defaults.is_mirrored = enabled;
                }
            });
        }

        engine.register_fn("print", |msg: &str| {
            debug!(target: "config", "{}", msg);
        });

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;

        self.eval(&content)
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<()> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| Error::Config(format!("parse error: {}", e)))?;

        // A script that fails halfway leaves nothing behind
        let committed = self.config();
        let mut scope = Scope::new();
        if let Err(e) = self.engine.run_ast_with_scope(&mut scope, &ast) {
            if let Ok(mut config) = self.config.write() {
                *config = committed;
            }
            return Err(Error::Config(e.to_string()));
        }

        Ok(())
    }

    /// Get the current config (cloned)
    pub fn config(&self) -> Config {
        self.config.read().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cue"))
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<()> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
