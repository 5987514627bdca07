// File: src/core/evaluator.rs
use crate::core::syllable::Syllable;
use crate::core::tables::JamoTables;
use crate::core::types::{
    Feedback, HardModeViolation, JamoCell, JamoSlot, JamoStatus, KeyboardStatus, Requirement,
};

/// Scores guesses against an answer at jamo granularity.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'t> {
    tables: &'t JamoTables,
}

impl Evaluator<'static> {
    pub fn standard() -> Self {
        Self::new(JamoTables::standard())
    }
}

impl<'t> Evaluator<'t> {
    pub fn new(tables: &'t JamoTables) -> Self {
        Self { tables }
    }

    /// Flattens a word into its jamo, tagged with syllable index and position.
    /// A character that is not a syllable block counts as one jamo.
    pub fn slots(&self, word: &str) -> Vec<JamoSlot> {
        let mut slots = Vec::with_capacity(word.chars().count() * 3);
        for (syllable, c) in word.chars().enumerate() {
            let jamo = match Syllable::decompose(c) {
                Some(s) => s.jamo(self.tables),
                None => vec![c],
            };
            slots.extend(jamo.into_iter().enumerate().map(|(position, jamo)| JamoSlot {
                jamo,
                syllable,
                position,
            }));
        }
        slots
    }

    /// Two passes over the whole word: exact slot matches first, then
    /// presence anywhere. Each answer jamo satisfies at most one guess jamo.
    pub fn evaluate_guess(&self, guess: &str, answer: &str) -> Feedback {
        let guess_slots = self.slots(guess);
        let answer_slots = self.slots(answer);
        let mut statuses = vec![JamoStatus::Absent; guess_slots.len()];
        let mut matched = vec![false; guess_slots.len()];
        let mut consumed = vec![false; answer_slots.len()];

        for (i, g) in guess_slots.iter().enumerate() {
            let hit = answer_slots.iter().enumerate().position(|(j, a)| {
                !consumed[j] && a.jamo == g.jamo && a.syllable == g.syllable && a.position == g.position
            });
            if let Some(j) = hit {
                statuses[i] = JamoStatus::Correct;
                matched[i] = true;
                consumed[j] = true;
            }
        }

        for (i, g) in guess_slots.iter().enumerate() {
            if matched[i] {
                continue;
            }
            let hit = answer_slots
                .iter()
                .enumerate()
                .position(|(j, a)| !consumed[j] && a.jamo == g.jamo);
            if let Some(j) = hit {
                statuses[i] = JamoStatus::Present;
                matched[i] = true;
                consumed[j] = true;
            }
        }

        let mut feedback: Feedback = vec![Vec::new(); guess.chars().count()];
        for (slot, status) in guess_slots.iter().zip(statuses) {
            feedback[slot.syllable].push(JamoCell { jamo: slot.jamo, status });
        }
        feedback
    }

    /// Best status per jamo symbol across every guess so far.
    pub fn keyboard_status_aggregate<S: AsRef<str>>(&self, guesses: &[S], answer: &str) -> KeyboardStatus {
        let mut keyboard = KeyboardStatus::new();
        for guess in guesses {
            for cell in self.evaluate_guess(guess.as_ref(), answer).iter().flatten() {
                let entry = keyboard.entry(cell.jamo).or_default();
                *entry = entry.best(cell.status);
            }
        }
        keyboard
    }

    /// Checks a candidate against the constraints revealed by one previous guess.
    ///
    /// Correct jamo must stay at their exact slot; present jamo must appear
    /// somewhere. Correct constraints are checked first and the first broken
    /// one is returned.
    pub fn hard_mode_validate(&self, previous: &Feedback, candidate: &str) -> Option<HardModeViolation> {
        let slots = self.slots(candidate);

        for (syllable, row) in previous.iter().enumerate() {
            for (position, cell) in row.iter().enumerate() {
                if cell.status != JamoStatus::Correct {
                    continue;
                }
                let kept = slots
                    .iter()
                    .any(|s| s.syllable == syllable && s.position == position && s.jamo == cell.jamo);
                if !kept {
                    return Some(HardModeViolation {
                        jamo: cell.jamo,
                        requirement: Requirement::At { syllable, position },
                    });
                }
            }
        }

        previous
            .iter()
            .flatten()
            .filter(|cell| cell.status == JamoStatus::Present)
            .find(|cell| !slots.iter().any(|s| s.jamo == cell.jamo))
            .map(|cell| HardModeViolation {
                jamo: cell.jamo,
                requirement: Requirement::Anywhere,
            })
    }

    /// Re-derives the previous guess's feedback, then validates `candidate`.
    pub fn hard_mode_validate_guess(
        &self,
        previous_guess: &str,
        answer: &str,
        candidate: &str,
    ) -> Option<HardModeViolation> {
        let previous = self.evaluate_guess(previous_guess, answer);
        self.hard_mode_validate(&previous, candidate)
    }
}
