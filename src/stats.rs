// File: src/stats.rs
use serde::{Deserialize, Serialize};

/// Lifetime play statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub played: u32,
    pub wins: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// `histogram[n - 1]` counts wins in `n` guesses.
    pub histogram: Vec<u32>,
    /// Day of the last recorded game, so a day is never counted twice.
    pub last_day: Option<i64>,
}

impl Statistics {
    pub fn new(max_guesses: usize) -> Self {
        Self {
            played: 0,
            wins: 0,
            current_streak: 0,
            max_streak: 0,
            histogram: vec![0; max_guesses],
            last_day: None,
        }
    }

    /// Returns false if `day` was already recorded.
    pub fn record_win(&mut self, day: i64, guess_count: usize) -> bool {
        if !self.start_record(day) {
            return false;
        }
        self.wins += 1;
        self.current_streak += 1;
        self.max_streak = self.max_streak.max(self.current_streak);
        if guess_count > self.histogram.len() {
            self.histogram.resize(guess_count, 0);
        }
        if let Some(bucket) = guess_count.checked_sub(1).and_then(|i| self.histogram.get_mut(i)) {
            *bucket += 1;
        }
        true
    }

    pub fn record_loss(&mut self, day: i64) -> bool {
        if !self.start_record(day) {
            return false;
        }
        self.current_streak = 0;
        true
    }

    fn start_record(&mut self, day: i64) -> bool {
        if self.last_day == Some(day) {
            return false;
        }
        // a skipped day breaks the streak
        if self.last_day.is_some_and(|last| day != last + 1) {
            self.current_streak = 0;
        }
        self.last_day = Some(day);
        self.played += 1;
        true
    }

    /// Whole-number percentage, 0 when nothing was played.
    pub fn win_rate(&self) -> u32 {
        if self.played == 0 {
            0
        } else {
            self.wins * 100 / self.played
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaks_and_histogram() {
        let mut stats = Statistics::new(6);
        assert!(stats.record_win(10, 3));
        assert!(stats.record_win(11, 1));
        assert!(!stats.record_win(11, 2));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.histogram, vec![1, 0, 1, 0, 0, 0]);

        assert!(stats.record_loss(12));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);

        assert!(stats.record_win(13, 6));
        assert!(stats.record_win(15, 2));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.played, 5);
        assert_eq!(stats.wins, 4);
        assert_eq!(stats.win_rate(), 80);
        assert_eq!(stats.histogram, vec![1, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn empty_win_rate() {
        assert_eq!(Statistics::new(6).win_rate(), 0);
    }
}
