// File: src/persistence.rs
use crate::config::StorageFormat;
use crate::core::engine::SavedGame;
use crate::error::StorageError;
use crate::stats::Statistics;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const GAME_KEY: &str = "hangul-wordle/state";
pub const STATS_KEY: &str = "hangul-wordle/stats";

/// Opaque key -> blob storage.
pub trait BlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError>;
}

/// One file per key under a directory. Writes go through a temp file in the
/// same directory and are renamed into place, so a crash never leaves a
/// half-written blob.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Bytes outside `[A-Za-z0-9_-]` are written as `%XX`, so distinct keys
    /// never share a file.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.blob"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let file = match File::open(self.path_for(key)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut blob = Vec::new();
        BufReader::new(file).read_to_end(&mut blob)?;
        Ok(Some(blob))
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let temp_file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(blob)?;
            writer.flush()?;
        }
        temp_file.persist(self.path_for(key))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}

/// Typed access to the saved game and statistics on top of a blob store.
pub struct GameStore<S: BlobStore> {
    store: S,
    format: StorageFormat,
}

impl<S: BlobStore> GameStore<S> {
    pub fn new(store: S, format: StorageFormat) -> Self {
        Self { store, format }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// The saved game, only if it belongs to `day`. Corrupt blobs count as absent.
    pub fn load_game(&self, day: i64) -> Result<Option<SavedGame>, StorageError> {
        let saved: Option<SavedGame> = self.load_value(GAME_KEY)?;
        Ok(saved.filter(|game| {
            let current = game.day_index == day;
            if !current {
                log::info!("discarding saved game from day {} (today is {})", game.day_index, day);
            }
            current
        }))
    }

    pub fn save_game(&mut self, game: &SavedGame) -> Result<(), StorageError> {
        self.save_value(GAME_KEY, game)
    }

    pub fn load_stats(&self) -> Result<Option<Statistics>, StorageError> {
        self.load_value(STATS_KEY)
    }

    pub fn save_stats(&mut self, stats: &Statistics) -> Result<(), StorageError> {
        self.save_value(STATS_KEY, stats)
    }

    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(blob) = self.store.load(key)? else {
            return Ok(None);
        };
        match decode(self.format, &blob) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("ignoring unreadable blob {}: {}", key, e);
                Ok(None)
            }
        }
    }

    fn save_value<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let blob = encode(self.format, value)?;
        self.store.save(key, &blob)?;
        log::debug!("saved {} ({} bytes)", key, blob.len());
        Ok(())
    }
}

fn encode<T: Serialize>(format: StorageFormat, value: &T) -> Result<Vec<u8>, StorageError> {
    Ok(match format {
        StorageFormat::Binary => bincode::serialize(value)?,
        StorageFormat::Json => serde_json::to_vec(value)?,
    })
}

fn decode<T: DeserializeOwned>(format: StorageFormat, blob: &[u8]) -> Result<T, StorageError> {
    Ok(match format {
        StorageFormat::Binary => bincode::deserialize(blob)?,
        StorageFormat::Json => serde_json::from_slice(blob)?,
    })
}
