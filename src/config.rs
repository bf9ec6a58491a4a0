//! Session Configuration
//!
//! Player-facing settings and the normalized parameters handed to the
//! simulation. Normalization happens once, before a session starts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::dictionary::{list_dictionaries, DictionaryError, DICT_EXTENSION};

/// Lowest accepted tempo/frequency.
pub const MIN_RATE: u32 = 50;

/// Highest accepted tempo/frequency.
pub const MAX_RATE: u32 = 500;

/// Seeds drawn from the clock stay below this (six digits).
pub const SEED_MODULUS: i64 = 1_000_000;

/// Default ticks between movement steps.
pub const DEFAULT_TEMPO: u32 = 80;

/// Default ticks between spawn attempts.
pub const DEFAULT_FREQUENCY: u32 = 280;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Named dictionary is neither a file nor in the dictionary directory.
    #[error("unknown dictionary '{name}' (available: {available})")]
    UnknownDictionary {
        /// Name as given
        name: String,
        /// Comma-separated names that do exist
        available: String,
    },

    /// Dictionary discovery failed.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// Settings as chosen by the player (possibly out of range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    /// Level seed; 0 means "pick one from the clock".
    pub seed: u32,
    /// How quickly words move (ticks per column).
    pub tempo: u32,
    /// How quickly words appear (ticks per spawn attempt).
    pub frequency: u32,
    /// Dictionary file to load; `None` picks the first discovered.
    pub dictionary: Option<PathBuf>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            tempo: DEFAULT_TEMPO,
            frequency: DEFAULT_FREQUENCY,
            dictionary: None,
        }
    }
}

impl GameSettings {
    /// Normalize into session parameters.
    ///
    /// A zero seed becomes `now` in milliseconds modulo one million.
    pub fn session_params(&self, now: DateTime<Utc>) -> SessionParams {
        let seed = if self.seed == 0 {
            time_seed(now)
        } else {
            self.seed
        };
        SessionParams::new(seed, self.tempo, self.frequency)
    }

    /// Pick the dictionary file to load.
    ///
    /// An existing file path is used as is. Anything else is looked up by
    /// name (with or without extension) in `dict_dir`. No choice at all
    /// takes the first dictionary in sorted order.
    pub fn resolve_dictionary(&self, dict_dir: &Path) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.dictionary {
            if path.is_file() {
                return Ok(path.clone());
            }
        }

        let available = list_dictionaries(dict_dir)?;
        let Some(wanted) = &self.dictionary else {
            // list_dictionaries never returns an empty list
            return available
                .into_iter()
                .next()
                .ok_or_else(|| DictionaryError::NoDictionaries(dict_dir.to_path_buf()).into());
        };

        let wanted = wanted.to_string_lossy();
        let wanted = wanted.strip_suffix(DICT_EXTENSION).unwrap_or(&wanted);
        available
            .iter()
            .find(|path| dictionary_name(path) == wanted)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownDictionary {
                name: wanted.to_string(),
                available: available
                    .iter()
                    .map(|path| dictionary_name(path))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Dictionaries offered by the settings menu and the index of the
    /// one these settings select.
    ///
    /// A file outside `dict_dir` is offered first.
    pub fn dictionary_choices(&self, dict_dir: &Path) -> Result<(Vec<PathBuf>, usize), ConfigError> {
        let chosen = self.resolve_dictionary(dict_dir)?;
        let mut choices = list_dictionaries(dict_dir)?;

        let index = match choices.iter().position(|path| *path == chosen) {
            Some(index) => index,
            None => {
                choices.insert(0, chosen);
                0
            }
        };
        Ok((choices, index))
    }
}

/// Display name of a dictionary file (file name minus extension).
pub fn dictionary_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive a seed from wall-clock time.
pub fn time_seed(now: DateTime<Utc>) -> u32 {
    now.timestamp_millis().rem_euclid(SEED_MODULUS) as u32
}

/// Normalized parameters of one session.
///
/// Tempo and frequency are always within `[MIN_RATE, MAX_RATE]`, so the
/// tick loop can take them as moduli.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    seed: u32,
    tempo: u32,
    frequency: u32,
}

impl SessionParams {
    /// Build parameters, clamping tempo and frequency.
    pub fn new(seed: u32, tempo: u32, frequency: u32) -> Self {
        Self {
            seed,
            tempo: tempo.clamp(MIN_RATE, MAX_RATE),
            frequency: frequency.clamp(MIN_RATE, MAX_RATE),
        }
    }

    /// Initial generator seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Ticks between movement steps.
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Ticks between spawn attempts.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Same tempo and frequency, different seed.
    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }
}

impl Default for SessionParams {
    fn default() -> Self {
        Self::new(1, DEFAULT_TEMPO, DEFAULT_FREQUENCY)
    }
}
