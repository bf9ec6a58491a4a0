//! Word Source
//!
//! Dictionary discovery and loading. A `Dictionary` is an ordered,
//! non-empty list of words; the simulation only ever reads it by a
//! random index.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::rng::DeterministicRng;

/// Longest word a dictionary may contain.
pub const MAX_WORD_LEN: usize = 24;

/// Environment variable overriding the dictionary directory.
pub const DICT_DIR_ENV: &str = "TR_DIC";

/// System-wide dictionary directory.
pub const SYSTEM_DICT_DIR: &str = "/usr/share/typeracer-dict";

/// Dictionary directory relative to the working directory.
pub const LOCAL_DICT_DIR: &str = "typeracer-dict";

/// Dictionary file extension.
pub const DICT_EXTENSION: &str = ".dic";

/// Dictionary errors.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// No dictionary directory could be found.
    #[error("could not find typeracer dictionaries ({0})")]
    NotFound(String),

    /// The directory holds no `.dic` files.
    #[error("could not find any typeracer dictionaries in {}", .0.display())]
    NoDictionaries(PathBuf),

    /// The dictionary has no words.
    #[error("dictionary {} contains no words", .0.display())]
    Empty(PathBuf),

    /// A word exceeds `MAX_WORD_LEN`.
    #[error("dictionary word too long: {word} in {}", .path.display())]
    WordTooLong {
        /// Offending word.
        word: String,
        /// File it came from.
        path: PathBuf,
    },

    /// Filesystem error.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Ordered, non-empty list of candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from words already in memory.
    ///
    /// `origin` is only used in error messages.
    pub fn new<I, S>(words: I, origin: &Path) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for word in words {
            let word = word.into();
            if word.chars().count() > MAX_WORD_LEN {
                return Err(DictionaryError::WordTooLong {
                    word,
                    path: origin.to_path_buf(),
                });
            }
            list.push(word);
        }

        if list.is_empty() {
            return Err(DictionaryError::Empty(origin.to_path_buf()));
        }

        Ok(Self { words: list })
    }

    /// Parse dictionary text: one word per line, blank lines skipped.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, DictionaryError> {
        let words = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty());
        Self::new(words, origin)
    }

    /// Load a dictionary file.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::parse(&text, path)?;
        info!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// Draw a word: `words[rng.next_bounded(len)]`.
    pub fn pick(&self, rng: &mut DeterministicRng) -> &str {
        let idx = rng.next_bounded(self.words.len() as u32) as usize;
        &self.words[idx]
    }

    /// Number of words (never zero).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Locate the dictionary directory.
///
/// `TR_DIC` wins when set; otherwise the system directory, then the
/// local one.
pub fn find_dictionary_dir(env_override: Option<&Path>) -> Result<PathBuf, DictionaryError> {
    if let Some(dir) = env_override {
        return if dir.is_dir() {
            Ok(dir.to_path_buf())
        } else {
            Err(DictionaryError::NotFound(format!(
                "{}: {}",
                DICT_DIR_ENV,
                dir.display()
            )))
        };
    }

    [SYSTEM_DICT_DIR, LOCAL_DICT_DIR]
        .iter()
        .map(PathBuf::from)
        .find(|dir| dir.is_dir())
        .ok_or_else(|| {
            DictionaryError::NotFound(format!("{} or ./{}", SYSTEM_DICT_DIR, LOCAL_DICT_DIR))
        })
}

/// List `.dic` files in a directory, sorted by name.
///
/// Hidden files are skipped, as are names that are nothing but the
/// extension.
pub fn list_dictionaries(dir: &Path) -> Result<Vec<PathBuf>, DictionaryError> {
    let entries = fs::read_dir(dir).map_err(|source| DictionaryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DictionaryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_dictionary_name(&name) {
            names.push(name);
        }
    }

    if names.is_empty() {
        return Err(DictionaryError::NoDictionaries(dir.to_path_buf()));
    }

    names.sort();
    debug!("Found dictionaries in {}: {:?}", dir.display(), names);
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

fn is_dictionary_name(name: &str) -> bool {
    !name.starts_with('.')
        && name.len() > DICT_EXTENSION.len()
        && name.ends_with(DICT_EXTENSION)
}
