// File: src/dictionary.rs
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_WORDS: &str = include_str!("../data/words.txt");

/// Read-only word list: valid guesses, and the pool daily answers come from.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Dictionary {
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_WORDS)
    }

    /// One word per line. Blank lines and `#` comments are skipped, duplicates dropped.
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        let mut index = HashSet::new();
        for word in words {
            let word = word.into();
            if index.insert(word.clone()) {
                list.push(word);
            }
        }
        Self { words: list, index }
    }

    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let text = fs::read_to_string(path)?;
        let dictionary = Self::parse(&text);
        log::info!("loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The answer for a day. Same list and day always give the same word.
    pub fn answer_for_day(&self, day: i64) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        let slot = mix(day as u64) % self.words.len() as u64;
        self.words.get(slot as usize).map(String::as_str)
    }
}

/// splitmix64 finaliser; spreads consecutive days across the list.
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Whole days from `epoch` to `date`; negative before the epoch.
pub fn day_index(epoch: NaiveDate, date: NaiveDate) -> i64 {
    (date - epoch).num_days()
}

pub fn today_index(epoch: NaiveDate) -> i64 {
    day_index(epoch, Local::now().date_naive())
}
