use crate::presentation::config::{keybindings, palette};

use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;

use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: keybindings::KeyBindings,
    #[serde(default)]
    pub palette: palette::Palette,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub initial_index: usize,
}

impl Config {
    /// Built-in configuration shipped with the binary.
    pub fn default_config() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }

    /// Load the user configuration from the config directory, falling back
    /// to the built-in defaults for anything it leaves out.
    pub fn new() -> Result<Self, ConfigError> {
        let default_config = Self::default_config()?;
        let data_dir = utils::get_data_dir();
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("_config_dir", config_dir.to_string_lossy().into_owned())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        Ok(cfg.merge_defaults(default_config))
    }

    /// Fill everything `self` leaves unset from `defaults`.
    pub fn merge_defaults(mut self, defaults: Config) -> Self {
        for (key, action) in defaults.keybindings.iter() {
            self.keybindings
                .entry(*key)
                .or_insert_with(|| action.clone());
        }
        if self.segments.is_empty() {
            self.segments = defaults.segments;
            self.initial_index = defaults.initial_index;
        }
        self
    }
}
