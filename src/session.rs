// File: src/session.rs
use crate::config::GameConfig;
use crate::core::engine::{Game, GameStatus, Guess, Key};
use crate::core::types::{Feedback, KeyboardStatus};
use crate::dictionary::{today_index, Dictionary};
use crate::error::{OpenError, StorageError, SubmitError};
use crate::persistence::{BlobStore, FileBlobStore, GameStore};
use crate::stats::Statistics;
use serde::Serialize;
use std::sync::Arc;

/// Today's game wired to its storage. Progress is saved after every accepted
/// guess, and statistics are recorded once when the game ends.
pub struct Session<S: BlobStore> {
    game: Game,
    stats: Statistics,
    store: GameStore<S>,
}

impl Session<FileBlobStore> {
    /// Today's session with the on-disk store the config points at.
    pub fn open_default(config: &GameConfig) -> Result<Self, OpenError> {
        let dir = config.storage.resolved_dir();
        log::info!("using storage directory {}", dir.display());
        Self::open(config, FileBlobStore::new(dir), today_index(config.epoch))
    }
}

impl<S: BlobStore> Session<S> {
    pub fn open(config: &GameConfig, store: S, day: i64) -> Result<Self, OpenError> {
        let dictionary = match &config.dictionary {
            Some(path) => Dictionary::load(path).map_err(OpenError::Dictionary)?,
            None => Dictionary::builtin(),
        };
        let dictionary = Arc::new(dictionary);
        let store = GameStore::new(store, config.storage.format);

        let restored = store
            .load_game(day)?
            .and_then(|saved| Game::restore(dictionary.clone(), &saved, config));
        let game = match restored {
            Some(game) => {
                log::info!("resumed day {} with {} guesses", day, game.guesses().len());
                game
            }
            None => Game::for_day(dictionary, day, config).ok_or(OpenError::EmptyDictionary)?,
        };
        let stats = store
            .load_stats()?
            .unwrap_or_else(|| Statistics::new(config.max_guesses));

        Ok(Self { game, stats, store })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn press(&mut self, key: Key) -> Result<(), SubmitError> {
        match key {
            Key::Enter => self.submit(),
            other => self.game.press(other),
        }
    }

    pub fn submit(&mut self) -> Result<(), SubmitError> {
        self.game.submit()?;
        if self.game.status() != GameStatus::Playing {
            let day = self.game.day_index();
            match self.game.status() {
                GameStatus::Won => self.stats.record_win(day, self.game.guesses().len()),
                _ => self.stats.record_loss(day),
            };
        }
        if let Err(e) = self.save() {
            log::error!("failed to save progress: {}", e);
        }
        Ok(())
    }

    pub fn set_hard_mode(&mut self, on: bool) -> bool {
        let applied = self.game.set_hard_mode(on);
        if applied {
            if let Err(e) = self.save() {
                log::error!("failed to save progress: {}", e);
            }
        }
        applied
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        self.store.save_game(&self.game.snapshot())?;
        self.store.save_stats(&self.stats)?;
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    /// Everything a UI needs to draw the board.
    pub fn view(&self) -> SessionView {
        let game = &self.game;
        let finished = game.status() != GameStatus::Playing;
        SessionView {
            day: game.day_index(),
            status: game.status(),
            hard_mode: game.hard_mode(),
            max_guesses: game.max_guesses(),
            guesses: game.guesses().to_vec(),
            current_text: game.current_text(),
            current_row: game.current_row(),
            keyboard: game.keyboard_status(),
            stats: self.stats.clone(),
            answer: finished.then(|| game.answer().to_string()),
            share: finished.then(|| game.share_text()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub day: i64,
    pub status: GameStatus,
    pub hard_mode: bool,
    pub max_guesses: usize,
    pub guesses: Vec<Guess>,
    pub current_text: String,
    pub current_row: Feedback,
    pub keyboard: KeyboardStatus,
    pub stats: Statistics,
    pub answer: Option<String>,
    pub share: Option<String>,
}
