//! Runner settings
//!
//! Stored as JSON next to the binary. Everything is optional in the file;
//! missing keys fall back to the defaults.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Why settings could not be loaded or saved
#[derive(Debug)]
pub enum SettingsError {
    /// Reading or writing the file failed
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid settings JSON
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "settings file {}: {}", path.display(), source)
            }
            SettingsError::Parse(e) => write!(f, "invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// How the session runner behaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (time-derived when absent)
    pub seed: Option<u64>,
    /// Let the demo bot fire at dangerous targets
    pub autopilot_shoots: bool,
    /// Pace ticks at wall-clock speed instead of running flat out
    pub realtime: bool,
    /// Rounds to play before exiting
    pub rounds: u32,
    /// Hard cap on simulated ticks across all rounds
    pub max_ticks: u64,
    /// Log a JSON snapshot every N ticks (0 disables)
    pub snapshot_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            autopilot_shoots: true,
            realtime: false,
            rounds: 3,
            max_ticks: 20_000,
            snapshot_every: 120,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values that would make the runner do nothing useful
    pub fn validate(&mut self) {
        if self.rounds == 0 {
            log::warn!("rounds = 0 makes no sense, playing 1");
            self.rounds = 1;
        }
        if self.max_ticks == 0 {
            log::warn!("max_ticks = 0 makes no sense, using the default");
            self.max_ticks = Self::default().max_ticks;
        }
    }

    /// The configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
