//! Runtime options for the pilot.
//!
//! Fixed tuning lives in [`crate::constants`]; the values here are the ones a
//! player or host may reasonably change, and can be read from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weights applied to the roll selector's score terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollWeights {
    /// Per degree between the candidate and the massed enemies.
    pub away_from_enemies: f32,
    /// Per unit between the roll end and the nearest projectile.
    pub bullet_distance: f32,
    /// Per degree of crossing angle against dangerous bullets.
    pub perpendicular: f32,
    /// Per projectile congesting the roll end.
    pub congestion: f32,
    /// Upper bound of the congestion penalty.
    pub congestion_cap: f32,
}

impl Default for RollWeights {
    fn default() -> Self {
        Self {
            away_from_enemies: 0.2,
            bullet_distance: 2.0,
            perpendicular: 0.2,
            congestion: 2.0,
            congestion_cap: 5.0,
        }
    }
}

/// Host-facing pilot options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PilotConfig {
    /// Mirrors the game's "increase speed out of combat" option.
    pub increase_speed_out_of_combat: bool,
    /// Emit the combat-area border for debug overlays.
    pub draw_combat_area: bool,
    pub roll_weights: RollWeights,
}

/// Failures while loading a [`PilotConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PilotConfig {
    /// Parses a configuration from JSON text. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns the underlying [`serde_json::Error`] for malformed input.
    ///
    /// # Examples
    /// ```
    /// use cursor_pilot::config::PilotConfig;
    /// let config = PilotConfig::from_json(r#"{"increase_speed_out_of_combat": true}"#)
    ///     .expect("valid json");
    /// assert!(config.increase_speed_out_of_combat);
    /// assert!(!config.draw_combat_area);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
