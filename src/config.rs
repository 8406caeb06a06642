use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

const DEFAULT_CAPACITY: usize = 20;

/// Non-zero number of snapshots a history may retain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Converts a raw value, falling back to the default capacity when it is zero.
    pub fn normalize(value: usize) -> Self {
        match Self::try_from(value) {
            Ok(capacity) => capacity,
            Err(err) => {
                log::warn!("Invalid history capacity: {err}");
                Self::default()
            }
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        // SAFETY: constant is non-zero.
        Self(NonZeroUsize::new(DEFAULT_CAPACITY).expect("non-zero default capacity"))
    }
}

impl TryFrom<usize> for Capacity {
    type Error = HistoryError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        let Some(capacity) = NonZeroUsize::new(value) else {
            return Err(HistoryError::InvalidConfig(
                "History capacity must be greater than 0".to_string(),
            ));
        };
        Ok(Self(capacity))
    }
}

/// Settings for a deck history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept; the oldest are evicted past this.
    pub capacity: usize,
    /// Where a file-backed snapshot log lives, if any.
    pub log_path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            log_path: None,
        }
    }
}

impl HistoryConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, HistoryError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        Capacity::try_from(self.capacity).map(|_| ())
    }

    pub fn capacity(&self) -> Capacity {
        Capacity::normalize(self.capacity)
    }
}

/// Reads a TOML config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<HistoryConfig, HistoryError> {
    match fs::read_to_string(path) {
        Ok(contents) => HistoryConfig::from_toml_str(&contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HistoryConfig::default()),
        Err(err) => Err(HistoryError::Io(err)),
    }
}
