//! Folio configuration file handling
//!
//! Settings live in `folio.toml`. Every key is optional; omitted keys take
//! the defaults below.
//!
//! ```toml
//! [reveal]
//! threshold = 0.8
//! title_threshold = 0.5
//!
//! [navigation]
//! probe_offset = 100.0
//! header_height = 70.0
//! initial_section = "home"
//!
//! [contact]
//! service_id = "service_xxx"
//! template_id = "template_xxx"
//! public_key = "xxx"
//!
//! [loading]
//! tick_ms = 200
//! max_step = 10
//! completion_delay_ms = 500
//! max_duration_ms = 3000
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use folio_contact::EmailJsConfig;
use folio_layout::sections::{DEFAULT_HEADER_HEIGHT, DEFAULT_PROBE_OFFSET, NAV_SECTIONS};
use folio_layout::{DEFAULT_THRESHOLD, TITLE_THRESHOLD};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Configuration file name
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub contact: EmailJsConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
}

/// Reveal thresholds, as fractions of the viewport height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_title_threshold")]
    pub title_threshold: f32,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_title_threshold() -> f32 {
    TITLE_THRESHOLD
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            title_threshold: default_title_threshold(),
        }
    }
}

/// Active-section probe and anchor scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Probe line distance below the viewport top
    #[serde(default = "default_probe_offset")]
    pub probe_offset: f32,
    /// Fixed header height, kept clear when scrolling to an anchor
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    #[serde(default = "default_initial_section")]
    pub initial_section: String,
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

fn default_probe_offset() -> f32 {
    DEFAULT_PROBE_OFFSET
}

fn default_header_height() -> f32 {
    DEFAULT_HEADER_HEIGHT
}

fn default_initial_section() -> String {
    NAV_SECTIONS[0].to_string()
}

fn default_sections() -> Vec<String> {
    NAV_SECTIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            probe_offset: default_probe_offset(),
            header_height: default_header_height(),
            initial_section: default_initial_section(),
            sections: default_sections(),
        }
    }
}

/// Loading screen pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Largest random progress increment per tick
    #[serde(default = "default_max_step")]
    pub max_step: u8,
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,
    /// Hard cap from start to completion, whatever the progress; 0 disables it
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
}

fn default_tick_ms() -> u64 {
    200
}

fn default_max_step() -> u8 {
    10
}

fn default_completion_delay_ms() -> u64 {
    500
}

fn default_max_duration_ms() -> u64 {
    3000
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            max_step: default_max_step(),
            completion_delay_ms: default_completion_delay_ms(),
            max_duration_ms: default_max_duration_ms(),
        }
    }
}

impl LoadingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        (self.max_duration_ms > 0).then(|| Duration::from_millis(self.max_duration_ms))
    }
}

impl AppConfig {
    /// Parse and check configuration text
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).map_err(|source| AppError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load `folio.toml` from a directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(AppError::ConfigNotFound {
                dir: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(&config_path).map_err(|source| AppError::Io {
            path: config_path.clone(),
            source,
        })?;
        Self::from_toml_str(&content, &config_path)
    }

    /// Load `folio.toml` if present, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from_dir(path) {
            Err(AppError::ConfigNotFound { .. }) => {
                tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write `folio.toml` into a directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_path = path.join(CONFIG_FILE);
        fs::write(&config_path, self.to_toml()?).map_err(|source| AppError::Io {
            path: config_path,
            source,
        })
    }

    fn check(&self) -> Result<()> {
        for (name, ratio) in [
            ("reveal.threshold", self.reveal.threshold),
            ("reveal.title_threshold", self.reveal.title_threshold),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(AppError::InvalidConfig(format!("{name} must be within 0.0-1.0, got {ratio}")));
            }
        }
        if self.navigation.sections.is_empty() {
            return Err(AppError::InvalidConfig("navigation.sections is empty".to_string()));
        }
        if self.loading.max_step == 0 || self.loading.max_step > 100 {
            return Err(AppError::InvalidConfig(format!(
                "loading.max_step must be within 1-100, got {}",
                self.loading.max_step
            )));
        }
        Ok(())
    }
}
