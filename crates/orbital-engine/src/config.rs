//! Configuration for the orbital widget.
//!
//! Every field has a default, so a partial (or empty) JSON object is a valid
//! config file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunable constants for layout and animation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Orbit radius in widget pixels.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Radius items gather at while converging.
    #[serde(default = "default_converge_radius")]
    pub converge_radius: f64,

    /// Degrees added to the global angle per rotation tick.
    #[serde(default = "default_rotation_step_deg")]
    pub rotation_step_deg: f64,

    /// Milliseconds between rotation ticks.
    #[serde(default = "default_rotation_interval_ms")]
    pub rotation_interval_ms: u64,

    /// Delay from selection to the rearranging phase.
    #[serde(default = "default_rearrange_delay_ms")]
    pub rearrange_delay_ms: u64,

    /// Delay from selection to the detail card reveal.
    #[serde(default = "default_card_delay_ms")]
    pub card_delay_ms: u64,

    /// Title shown on the widget border.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_radius() -> f64 {
    265.0
}

fn default_converge_radius() -> f64 {
    50.0
}

fn default_rotation_step_deg() -> f64 {
    0.2
}

fn default_rotation_interval_ms() -> u64 {
    50
}

fn default_rearrange_delay_ms() -> u64 {
    600
}

fn default_card_delay_ms() -> u64 {
    1200
}

fn default_title() -> String {
    "Timeline".into()
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            converge_radius: default_converge_radius(),
            rotation_step_deg: default_rotation_step_deg(),
            rotation_interval_ms: default_rotation_interval_ms(),
            rearrange_delay_ms: default_rearrange_delay_ms(),
            card_delay_ms: default_card_delay_ms(),
            title: default_title(),
        }
    }
}

impl OrbitConfig {
    /// Load configuration from a file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reject values the widget cannot animate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if self.converge_radius.is_nan()
            || self.converge_radius < 0.0
            || self.converge_radius >= self.radius
        {
            return Err(ConfigError::Invalid(format!(
                "converge_radius must be in [0, radius), got {}",
                self.converge_radius
            )));
        }
        if self.rotation_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "rotation_interval_ms must be non-zero".into(),
            ));
        }
        if self.card_delay_ms < self.rearrange_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "card_delay_ms ({}) must not be shorter than rearrange_delay_ms ({})",
                self.card_delay_ms, self.rearrange_delay_ms
            )));
        }
        Ok(())
    }

    /// Interval between rotation ticks.
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }

    /// Delay from selection to the rearranging phase.
    pub fn rearrange_delay(&self) -> Duration {
        Duration::from_millis(self.rearrange_delay_ms)
    }

    /// Delay from selection to the card reveal.
    pub fn card_delay(&self) -> Duration {
        Duration::from_millis(self.card_delay_ms)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
