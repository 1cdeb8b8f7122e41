//! Data-driven game balance
//!
//! Spawn odds, bonus and soul quotas. Loaded from `tuning.json` in the asset
//! directory when present, otherwise the built-in defaults apply.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up inside the asset directory
pub const TUNING_FILE: &str = "tuning.json";

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Level-scaled spawn roll: one chance in `size(level)` per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnWindow {
    pub base: i32,
    /// Added once per level (negative = more frequent at higher levels)
    pub per_level: i32,
    pub floor: i32,
}

impl SpawnWindow {
    pub const fn new(base: i32, per_level: i32, floor: i32) -> Self {
        Self {
            base,
            per_level,
            floor,
        }
    }

    /// Window size for a level, clamped to the floor
    pub fn size(&self, level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        self.base
            .saturating_add(self.per_level.saturating_mul(level))
            .max(self.floor)
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Level-completion bonus at the start of each level
    pub start_bonus: u32,
    /// Souls to rescue on level 0
    pub souls_base: u32,
    /// Extra souls per level
    pub souls_per_level: u32,
    /// Killed zombies and cabs drop a pickup one time in this many
    pub drop_odds: i32,

    // === Spawn windows ===
    pub human: SpawnWindow,
    pub zombie: SpawnWindow,
    pub cab: SpawnWindow,
    pub oil: SpawnWindow,
    pub holy_water: SpawnWindow,
    pub soul: SpawnWindow,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_bonus: 5000,
            souls_base: 5,
            souls_per_level: 2,
            drop_odds: 5,

            human: SpawnWindow::new(200, -10, 30),
            zombie: SpawnWindow::new(100, -10, 30),
            cab: SpawnWindow::new(100, -10, 20),
            oil: SpawnWindow::new(150, -10, 40),
            holy_water: SpawnWindow::new(100, 10, 1),
            soul: SpawnWindow::new(100, 0, 1),
        }
    }
}

impl Tuning {
    /// Souls that must be rescued to finish `level`
    pub fn souls_required(&self, level: u32) -> u32 {
        self.souls_base
            .saturating_add(self.souls_per_level.saturating_mul(level))
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load tuning, falling back to defaults if the file is absent or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No tuning at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file: {e}");
                Self::default()
            }
        }
    }

    /// Every spawn window must be at least one tick wide
    pub fn validate(&self) -> Result<(), TuningError> {
        let windows = [
            ("human", &self.human),
            ("zombie", &self.zombie),
            ("cab", &self.cab),
            ("oil", &self.oil),
            ("holy_water", &self.holy_water),
            ("soul", &self.soul),
        ];
        for (name, window) in windows {
            if window.floor < 1 {
                return Err(TuningError::Invalid(format!(
                    "{name} spawn window floor must be >= 1, got {}",
                    window.floor
                )));
            }
        }
        if self.drop_odds < 1 {
            return Err(TuningError::Invalid(format!(
                "drop_odds must be >= 1, got {}",
                self.drop_odds
            )));
        }
        Ok(())
    }
}
