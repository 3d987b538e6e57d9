//! Shim configuration.
//!
//! # TOML Format
//!
//! ```toml
//! timer_hz = 50
//! fallback_width = 1000
//! fallback_height = 800
//! resizable = false
//! background = [0, 0, 0]
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Size;

/// Highest accepted event-pump rate.
const MAX_TIMER_HZ: u32 = 1000;

/// Tunables for an [`EditorShim`](crate::EditorShim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    /// Rate of the host timer that pumps the toolkit queue, in Hz.
    pub timer_hz: u32,
    /// Width reported by a size query when no editor exists.
    pub fallback_width: u32,
    /// Height reported by a size query when no editor exists.
    pub fallback_height: u32,
    /// Whether the host may resize the editor.
    pub resizable: bool,
    /// Colour painted behind the editor.
    pub background: [u8; 3],
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            timer_hz: 50,
            fallback_width: 1000,
            fallback_height: 800,
            resizable: false,
            background: [0, 0, 0],
        }
    }
}

impl ShimConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer_hz == 0 || self.timer_hz > MAX_TIMER_HZ {
            return Err(ConfigError::Invalid {
                field: "timer_hz",
                reason: format!("must be between 1 and {MAX_TIMER_HZ}, got {}", self.timer_hz),
            });
        }
        if self.fallback_width == 0 || self.fallback_height == 0 {
            return Err(ConfigError::Invalid {
                field: "fallback_width/fallback_height",
                reason: "fallback size must be non-zero".to_owned(),
            });
        }
        Ok(())
    }

    /// Period of the event-pump timer (20 ms at the default 50 Hz).
    pub fn timer_period(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.timer_hz.clamp(1, MAX_TIMER_HZ)))
    }

    /// Size reported when there is no editor.
    pub fn fallback_size(&self) -> Size {
        Size::new(self.fallback_width, self.fallback_height)
    }
}
