// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod dictionary;
pub mod error;
pub mod keymap;
pub mod persistence;
pub mod session;
pub mod stats;

pub use crate::core::composer::{Composer, ComposerState};
pub use crate::core::engine::{Game, GameStatus, Guess, Key, SavedGame};
pub use crate::core::evaluator::Evaluator;
pub use crate::core::tables::JamoTables;
pub use crate::core::types::{Feedback, HardModeViolation, JamoCell, JamoStatus, KeyboardStatus};
