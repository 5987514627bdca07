use crate::config::GameConfig;
use crate::core::composer::{Composer, ComposerState};
use crate::core::evaluator::Evaluator;
use crate::core::syllable::is_syllable;
use crate::core::types::{Feedback, JamoCell, JamoStatus, KeyboardStatus};
use crate::dictionary::Dictionary;
use crate::error::SubmitError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// What gets persisted for the current day. Feedback is re-derived on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub day_index: i64,
    pub guesses: Vec<String>,
    pub status: GameStatus,
    pub hard_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guess {
    pub word: String,
    pub feedback: Feedback,
}

impl Guess {
    pub fn is_solved(&self) -> bool {
        self.feedback
            .iter()
            .flatten()
            .all(|cell| cell.status == JamoStatus::Correct)
    }
}

/// A discrete input event from the keyboard layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Jamo(char),
    Enter,
    Backspace,
}

/// One day's game: guess history plus the row being typed.
// The composer and evaluator are pure; this is the only place state lives.
#[derive(Debug, Clone)]
pub struct Game {
    dictionary: Arc<Dictionary>,
    composer: Composer<'static>,
    evaluator: Evaluator<'static>,
    answer: String,
    day_index: i64,
    max_guesses: usize,
    word_length: usize,
    hard_mode: bool,
    guesses: Vec<Guess>,
    input: ComposerState,
    status: GameStatus,
}

impl Game {
    pub fn new(dictionary: Arc<Dictionary>, answer: impl Into<String>, day_index: i64, config: &GameConfig) -> Self {
        Self {
            dictionary,
            composer: Composer::standard(),
            evaluator: Evaluator::standard(),
            answer: answer.into(),
            day_index,
            max_guesses: config.max_guesses,
            word_length: config.word_length,
            hard_mode: config.hard_mode,
            guesses: Vec::new(),
            input: ComposerState::new(),
            status: GameStatus::Playing,
        }
    }

    /// A fresh game with the dictionary's answer for `day_index`.
    pub fn for_day(dictionary: Arc<Dictionary>, day_index: i64, config: &GameConfig) -> Option<Self> {
        let answer = dictionary.answer_for_day(day_index)?.to_string();
        Some(Self::new(dictionary, answer, day_index, config))
    }

    /// Rebuilds a saved game. Saved guesses are replayed without validation.
    pub fn restore(dictionary: Arc<Dictionary>, saved: &SavedGame, config: &GameConfig) -> Option<Self> {
        let mut game = Self::for_day(dictionary, saved.day_index, config)?;
        game.hard_mode = saved.hard_mode;
        for word in &saved.guesses {
            if game.status != GameStatus::Playing {
                log::warn!("saved game has guesses past the end, dropping {}", word);
                break;
            }
            game.record(word.clone());
        }
        if game.status != saved.status {
            log::warn!("saved status {:?} disagrees with replay {:?}", saved.status, game.status);
        }
        Some(game)
    }

    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            day_index: self.day_index,
            guesses: self.guesses.iter().map(|g| g.word.clone()).collect(),
            status: self.status,
            hard_mode: self.hard_mode,
        }
    }

    pub fn press(&mut self, key: Key) -> Result<(), SubmitError> {
        match key {
            Key::Jamo(jamo) => self.type_jamo(jamo),
            Key::Backspace => self.backspace(),
            Key::Enter => {
                self.submit()?;
            }
        }
        Ok(())
    }

    /// Adds a jamo to the current row. Input that would overflow the row is dropped.
    pub fn type_jamo(&mut self, jamo: char) {
        if self.status != GameStatus::Playing {
            return;
        }
        let next = self.composer.add(self.input.clone(), jamo);
        if self.composer.current_text(&next).chars().count() > self.word_length {
            log::trace!("row full, dropping {:?}", jamo);
            return;
        }
        self.input = next;
    }

    pub fn backspace(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.input = self.composer.remove_last_jamo(std::mem::take(&mut self.input));
    }

    /// Validates and scores the current row. On error the row is left as typed.
    pub fn submit(&mut self) -> Result<&Guess, SubmitError> {
        if self.status != GameStatus::Playing {
            return Err(SubmitError::GameFinished);
        }
        let word: String = self.composer.flush(self.input.clone()).chars.into_iter().collect();
        if let Err(e) = self.validate(&word) {
            log::warn!("rejected {:?}: {}", word, e);
            return Err(e);
        }
        self.input = ComposerState::new();
        Ok(self.record(word))
    }

    fn validate(&self, word: &str) -> Result<(), SubmitError> {
        let actual = word.chars().count();
        if actual != self.word_length {
            return Err(SubmitError::WordTooShort { expected: self.word_length, actual });
        }
        if let Some(c) = word.chars().find(|&c| !is_syllable(c)) {
            return Err(SubmitError::InvalidCharacter(c));
        }
        if !self.dictionary.contains(word) {
            return Err(SubmitError::NotInDictionary(word.to_string()));
        }
        if self.hard_mode {
            // only the most recent guess constrains the next one
            if let Some(last) = self.guesses.last() {
                if let Some(violation) = self.evaluator.hard_mode_validate(&last.feedback, word) {
                    return Err(SubmitError::HardModeViolation(violation));
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, word: String) -> &Guess {
        let feedback = self.evaluator.evaluate_guess(&word, &self.answer);
        let guess = Guess { word, feedback };
        log::debug!("guess {} -> {:?}", guess.word, guess.feedback);

        if guess.is_solved() {
            self.status = GameStatus::Won;
        } else if self.guesses.len() + 1 >= self.max_guesses {
            self.status = GameStatus::Lost;
        }
        if self.status != GameStatus::Playing {
            log::info!("day {} finished: {:?} after {} guesses", self.day_index, self.status, self.guesses.len() + 1);
        }

        self.guesses.push(guess);
        &self.guesses[self.guesses.len() - 1]
    }

    /// Hard mode can only change before the first guess.
    pub fn set_hard_mode(&mut self, on: bool) -> bool {
        if !self.guesses.is_empty() && on != self.hard_mode {
            log::warn!("hard mode is locked once guessing has started");
            return false;
        }
        self.hard_mode = on;
        true
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn day_index(&self) -> i64 {
        self.day_index
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn input(&self) -> &ComposerState {
        &self.input
    }

    /// Only meaningful to show once the game is over.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Live text of the row being typed.
    pub fn current_text(&self) -> String {
        self.composer.current_text(&self.input)
    }

    /// The row being typed, as unevaluated cells.
    pub fn current_row(&self) -> Feedback {
        let text = self.current_text();
        let mut row: Feedback = vec![Vec::new(); text.chars().count()];
        for slot in self.evaluator.slots(&text) {
            row[slot.syllable].push(JamoCell { jamo: slot.jamo, status: JamoStatus::Empty });
        }
        row
    }

    pub fn keyboard_status(&self) -> KeyboardStatus {
        let words: Vec<&str> = self.guesses.iter().map(|g| g.word.as_str()).collect();
        self.evaluator.keyboard_status_aggregate(&words, &self.answer)
    }

    /// Emoji board for sharing, e.g. `한글 워들 12 3/6*`.
    pub fn share_text(&self) -> String {
        let score = match self.status {
            GameStatus::Won => self.guesses.len().to_string(),
            _ => "X".to_string(),
        };
        let mut out = format!(
            "한글 워들 {} {}/{}{}",
            self.day_index,
            score,
            self.max_guesses,
            if self.hard_mode { "*" } else { "" }
        );
        for guess in &self.guesses {
            let row: Vec<String> = guess
                .feedback
                .iter()
                .map(|syllable| syllable.iter().map(|cell| cell.status.emoji()).collect())
                .collect();
            out.push('\n');
            out.push_str(&row.join(" "));
        }
        out
    }
}
