// File: src/error.rs
use crate::core::types::HardModeViolation;
use thiserror::Error;

/// Why a submitted row was rejected. The row stays editable after any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("word needs {expected} syllables, got {actual}")]
    WordTooShort { expected: usize, actual: usize },
    #[error("'{0}' is not a complete syllable")]
    InvalidCharacter(char),
    #[error("'{0}' is not in the word list")]
    NotInDictionary(String),
    #[error("hard mode: {0}")]
    HardModeViolation(HardModeViolation),
    #[error("the game is already over")]
    GameFinished,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not replace blob file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("binary blob is corrupt: {0}")]
    Binary(#[from] bincode::Error),
    #[error("JSON blob is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("failed to read word list: {0}")]
    Dictionary(#[source] std::io::Error),
    #[error("word list has no words")]
    EmptyDictionary,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
