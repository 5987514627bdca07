// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Feedback for one jamo of a guess.
///
/// Variants are declared in priority order, so the derived `Ord` is the
/// ranking used for keyboard colouring: `Empty < Absent < Present < Correct`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JamoStatus {
    /// Not evaluated yet (rows still being typed).
    #[default]
    Empty,
    Absent,
    Present,
    Correct,
}

impl JamoStatus {
    /// The higher-priority of two statuses.
    pub fn best(self, other: JamoStatus) -> JamoStatus {
        self.max(other)
    }

    pub fn emoji(self) -> &'static str {
        match self {
            JamoStatus::Empty => "⬛",
            JamoStatus::Absent => "⬜",
            JamoStatus::Present => "🟨",
            JamoStatus::Correct => "🟩",
        }
    }
}

impl fmt::Display for JamoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JamoStatus::Empty => "empty",
            JamoStatus::Absent => "absent",
            JamoStatus::Present => "present",
            JamoStatus::Correct => "correct",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JamoCell {
    pub jamo: char,
    pub status: JamoStatus,
}

/// Per-syllable, per-jamo feedback for one guess, in guess order.
pub type Feedback = Vec<Vec<JamoCell>>;

/// Best status seen per jamo symbol, for colouring the virtual keyboard.
pub type KeyboardStatus = BTreeMap<char, JamoStatus>;

/// One jamo of a word with its place in the word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JamoSlot {
    pub jamo: char,
    pub syllable: usize,
    pub position: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// The jamo must sit at this syllable and position.
    At { syllable: usize, position: usize },
    /// The jamo must appear somewhere.
    Anywhere,
}

/// A hard-mode constraint the candidate word broke.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardModeViolation {
    pub jamo: char,
    pub requirement: Requirement,
}

impl fmt::Display for HardModeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.requirement {
            Requirement::At { syllable, position } => write!(
                f,
                "{} must be jamo {} of syllable {}",
                self.jamo,
                position + 1,
                syllable + 1
            ),
            Requirement::Anywhere => write!(f, "guess must contain {}", self.jamo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_order() {
        assert!(JamoStatus::Empty < JamoStatus::Absent);
        assert!(JamoStatus::Absent < JamoStatus::Present);
        assert!(JamoStatus::Present < JamoStatus::Correct);
        assert_eq!(JamoStatus::Correct.best(JamoStatus::Absent), JamoStatus::Correct);
        assert_eq!(JamoStatus::Absent.best(JamoStatus::Present), JamoStatus::Present);
        assert_eq!(JamoStatus::default(), JamoStatus::Empty);
    }

    #[test]
    fn violation_messages() {
        let at = HardModeViolation {
            jamo: 'ㄱ',
            requirement: Requirement::At { syllable: 0, position: 0 },
        };
        assert_eq!(at.to_string(), "ㄱ must be jamo 1 of syllable 1");
        let anywhere = HardModeViolation { jamo: 'ㅏ', requirement: Requirement::Anywhere };
        assert_eq!(anywhere.to_string(), "guess must contain ㅏ");
    }
}
