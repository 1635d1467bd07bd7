use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tui::{RuntimeConfig, Scenario, Theme, ThemeVariant};

/// Environment variable that selects the scenario
pub const SCENARIO_ENV: &str = "STAPEL_SCENARIO";

const DEFAULT_TICK_RATE_MS: u64 = 16;
const DEFAULT_LOG_FILE: &str = "stapel.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StapelConfig {
    pub scenario: Scenario,
    pub theme: ThemeVariant,
    pub tick_rate_ms: u64,
    pub log_file: PathBuf,
}

impl Default for StapelConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            theme: ThemeVariant::default(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl StapelConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("stapel")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".stapel")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or from the default location when None
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StapelConfig = toml::from_str(content)?;
        if config.tick_rate_ms == 0 {
            warn!("tick_rate_ms = 0 would spin the event loop, using {}", DEFAULT_TICK_RATE_MS);
            return Ok(Self {
                tick_rate_ms: DEFAULT_TICK_RATE_MS,
                ..config
            });
        }
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };
        debug!("Saving config to: {:?}", config_path);

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
                info!("Created config directory: {:?}", parent);
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Apply `STAPEL_SCENARIO` from the environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_scenario_override(std::env::var(SCENARIO_ENV).ok())
    }

    pub fn apply_scenario_override(&mut self, value: Option<String>) -> Result<()> {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return Ok(());
        };
        self.scenario = value
            .parse()
            .with_context(|| format!("Invalid {} value", SCENARIO_ENV))?;
        debug!("Scenario overridden to {}", self.scenario);
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            theme: Theme::new(self.theme),
            tick_rate: self.tick_rate(),
        }
    }
}
