// File: src/core/composer.rs
use crate::core::syllable::Syllable;
use crate::core::tables::JamoTables;
use serde::{Deserialize, Serialize};

/// Composition state of one guess row.
///
/// `chars` holds finished characters (syllable blocks, or bare jamo that were
/// abandoned before forming a syllable). `cho`/`jung`/`jong` are the table
/// indices of the syllable still being typed. A partial syllable is one of
/// cho, cho+jung or cho+jung+jong, never anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerState {
    pub chars: Vec<char>,
    pub cho: Option<usize>,
    pub jung: Option<usize>,
    /// Index into the jongseong table, always >= 1 when set.
    pub jong: Option<usize>,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.cho.is_none()
    }

    pub fn has_partial(&self) -> bool {
        self.cho.is_some()
    }

    fn clear_partial(&mut self) {
        self.cho = None;
        self.jung = None;
        self.jong = None;
    }
}

/// Hangul input state machine over a fixed set of jamo tables.
///
/// Every operation takes the state by value and returns the next one, so a
/// caller can keep any intermediate state around as a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'t> {
    tables: &'t JamoTables,
}

impl Composer<'static> {
    pub fn standard() -> Self {
        Self::new(JamoTables::standard())
    }
}

impl<'t> Composer<'t> {
    pub fn new(tables: &'t JamoTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t JamoTables {
        self.tables
    }

    /// Feeds one jamo. Symbols outside the consonant and vowel tables are ignored.
    pub fn add(&self, state: ComposerState, jamo: char) -> ComposerState {
        if let Some(index) = self.tables.choseong_index(jamo) {
            self.add_consonant(state, jamo, index)
        } else if let Some(index) = self.tables.jungseong_index(jamo) {
            self.add_vowel(state, jamo, index)
        } else {
            log::trace!("ignoring non-jamo input {:?}", jamo);
            state
        }
    }

    fn add_consonant(&self, mut state: ComposerState, jamo: char, cho: usize) -> ComposerState {
        match (state.cho, state.jung, state.jong) {
            (None, _, _) => {
                state.cho = Some(cho);
            }
            (Some(_), None, _) => {
                state = self.flush(state);
                state.cho = Some(cho);
            }
            (Some(_), Some(_), None) => match self.tables.jongseong_index(jamo) {
                Some(jong) => state.jong = Some(jong),
                None => {
                    state = self.flush(state);
                    state.cho = Some(cho);
                }
            },
            (Some(_), Some(_), Some(jong)) => {
                let merged = self
                    .tables
                    .jongseong(jong)
                    .and_then(|current| self.tables.merge_final(current, jamo))
                    .and_then(|compound| self.tables.jongseong_index(compound));
                match merged {
                    Some(compound) => state.jong = Some(compound),
                    None => {
                        state = self.flush(state);
                        state.cho = Some(cho);
                    }
                }
            }
        }
        state
    }

    fn add_vowel(&self, mut state: ComposerState, jamo: char, jung: usize) -> ComposerState {
        match (state.cho, state.jung, state.jong) {
            (None, _, _) => {
                state.chars.push(jamo);
            }
            (Some(_), None, _) => {
                state.jung = Some(jung);
            }
            (Some(_), Some(current), None) => {
                let merged = self
                    .tables
                    .jungseong(current)
                    .and_then(|base| self.tables.merge_vowel(base, jamo))
                    .and_then(|compound| self.tables.jungseong_index(compound));
                match merged {
                    Some(compound) => state.jung = Some(compound),
                    None => {
                        state = self.flush(state);
                        state.chars.push(jamo);
                    }
                }
            }
            (Some(_), Some(_), Some(jong)) => {
                // The final consonant moves over to start the next syllable.
                let final_jamo = self.tables.jongseong(jong);
                let (kept, moved) = match final_jamo.and_then(|j| self.tables.split_final(j)) {
                    Some((first, second)) => (self.tables.jongseong_index(first), Some(second)),
                    None => (None, final_jamo),
                };
                match moved.and_then(|j| self.tables.choseong_index(j)) {
                    Some(next_cho) => {
                        state.jong = kept;
                        state = self.flush(state);
                        state.cho = Some(next_cho);
                        state.jung = Some(jung);
                    }
                    None => {
                        state = self.flush(state);
                        state.chars.push(jamo);
                    }
                }
            }
        }
        state
    }

    /// Backspace: removes the most recently added jamo layer.
    ///
    /// Order is final consonant, vowel, initial consonant, then the last
    /// finished character. A finished syllable is decomposed back into the
    /// partial syllable and loses its last layer in the same call; a bare
    /// jamo character is dropped whole.
    pub fn remove_last_jamo(&self, mut state: ComposerState) -> ComposerState {
        if state.cho.is_some() {
            self.peel(&mut state);
            return state;
        }
        if let Some(last) = state.chars.pop() {
            if let Some(syllable) = Syllable::decompose(last) {
                state.cho = Some(syllable.cho);
                state.jung = Some(syllable.jung);
                state.jong = (syllable.jong != 0).then_some(syllable.jong);
                self.peel(&mut state);
            }
        }
        state
    }

    fn peel(&self, state: &mut ComposerState) {
        if let Some(jong) = state.jong {
            state.jong = self
                .tables
                .jongseong(jong)
                .and_then(|j| self.tables.split_final(j))
                .and_then(|(first, _)| self.tables.jongseong_index(first));
        } else if let Some(jung) = state.jung {
            state.jung = self
                .tables
                .jungseong(jung)
                .and_then(|v| self.tables.split_vowel(v))
                .and_then(|(first, _)| self.tables.jungseong_index(first));
        } else {
            state.cho = None;
        }
    }

    /// Finalizes the partial syllable, if any, into `chars`.
    pub fn flush(&self, mut state: ComposerState) -> ComposerState {
        if let Some(c) = self.preview(&state) {
            state.chars.push(c);
        }
        state.clear_partial();
        state
    }

    /// Finished characters followed by the partial syllable as it would flush.
    pub fn current_text(&self, state: &ComposerState) -> String {
        state.chars.iter().copied().chain(self.preview(state)).collect()
    }

    fn preview(&self, state: &ComposerState) -> Option<char> {
        match (state.cho, state.jung) {
            (Some(cho), Some(jung)) => Syllable::compose(cho, jung, state.jong.unwrap_or(0)),
            (Some(cho), None) => self.tables.choseong(cho),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_jamo(jamo: &[char]) -> ComposerState {
        let composer = Composer::standard();
        jamo.iter()
            .fold(ComposerState::new(), |state, &j| composer.add(state, j))
    }

    fn text(jamo: &[char]) -> String {
        Composer::standard().current_text(&type_jamo(jamo))
    }

    #[test]
    fn simple_syllables() {
        assert_eq!(text(&['ㄱ']), "ㄱ");
        assert_eq!(text(&['ㄱ', 'ㅏ']), "가");
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㄱ']), "각");
        assert_eq!(text(&['ㅎ', 'ㅏ', 'ㄴ', 'ㄱ', 'ㅡ', 'ㄹ']), "한글");
    }

    #[test]
    fn compound_vowel_needs_an_initial() {
        assert_eq!(text(&['ㅗ', 'ㅏ']), "ㅗㅏ");
        let state = type_jamo(&['ㄱ', 'ㅗ', 'ㅏ']);
        assert_eq!(state.cho, Some(0));
        assert_eq!(state.jung, Some(9));
        assert_eq!(Composer::standard().current_text(&state), "과");
    }

    #[test]
    fn vowel_that_cannot_merge_stands_alone() {
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㅓ']), "가ㅓ");
    }

    #[test]
    fn consonant_without_vowel_is_abandoned() {
        let state = type_jamo(&['ㄱ', 'ㄴ']);
        assert_eq!(state.chars, vec!['ㄱ']);
        assert_eq!(state.cho, Some(2));
        assert_eq!(text(&['ㄱ', 'ㄴ', 'ㅏ']), "ㄱ나");
    }

    #[test]
    fn consonant_that_cannot_be_final_starts_new_syllable() {
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㄸ']), "가ㄸ");
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㄸ', 'ㅏ']), "가따");
    }

    #[test]
    fn compound_final() {
        assert_eq!(text(&['ㄷ', 'ㅏ', 'ㄹ', 'ㄱ']), "닭");
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㅂ', 'ㅅ']), "값");
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㄱ', 'ㄱ']), "각ㄱ");
    }

    #[test]
    fn vowel_after_full_syllable_splits_final() {
        let state = type_jamo(&['ㅇ', 'ㅏ', 'ㄴ', 'ㅏ']);
        assert_eq!(state.chars, vec!['아']);
        assert_eq!(Composer::standard().current_text(&state), "아나");
        assert_eq!(text(&['ㄷ', 'ㅏ', 'ㄹ', 'ㄱ', 'ㅏ']), "달가");
        assert_eq!(text(&['ㄱ', 'ㅏ', 'ㅂ', 'ㅅ', 'ㅣ']), "갑시");
    }

    #[test]
    fn every_final_splits_on_vowel() {
        let composer = Composer::standard();
        let tables = composer.tables();
        for jong in 1..tables.jongseong_count() {
            let mut state = ComposerState::new();
            state.cho = Some(0);
            state.jung = Some(0);
            state.jong = Some(jong);
            let state = composer.add(state, 'ㅏ');

            let final_jamo = tables.jongseong(jong).unwrap();
            let (kept, moved) = match tables.split_final(final_jamo) {
                Some((first, second)) => (tables.jongseong_index(first).unwrap(), second),
                None => (0, final_jamo),
            };
            assert_eq!(state.chars, vec![Syllable::compose(0, 0, kept).unwrap()]);
            assert_eq!(state.cho, tables.choseong_index(moved));
            assert_eq!(state.jung, Some(0));
            assert_eq!(state.jong, None);
        }
    }

    #[test]
    fn unknown_input_is_ignored() {
        let composer = Composer::standard();
        let state = type_jamo(&['ㄱ', 'ㅏ']);
        assert_eq!(composer.add(state.clone(), 'x'), state);
        assert_eq!(composer.add(state.clone(), 'ㄳ'), state);
    }

    #[test]
    fn flush_finalizes_partial() {
        let composer = Composer::standard();
        let state = composer.flush(type_jamo(&['ㄱ', 'ㅏ', 'ㄴ', 'ㄷ']));
        assert_eq!(state.chars, vec!['간', 'ㄷ']);
        assert!(!state.has_partial());

        let state = composer.flush(type_jamo(&['ㄴ', 'ㅏ', 'ㄹ', 'ㄱ']));
        assert_eq!(state.chars, vec!['낡']);

        assert_eq!(composer.flush(ComposerState::new()), ComposerState::new());
    }

    #[test]
    fn backspace_peels_layers() {
        let composer = Composer::standard();
        let mut state = type_jamo(&['ㄷ', 'ㅏ', 'ㄹ', 'ㄱ']);
        let mut seen = vec![composer.current_text(&state)];
        while !state.is_empty() {
            state = composer.remove_last_jamo(state);
            seen.push(composer.current_text(&state));
        }
        assert_eq!(seen, vec!["닭", "달", "다", "ㄷ", ""]);
    }

    #[test]
    fn backspace_reopens_finished_syllable() {
        let composer = Composer::standard();
        let state = type_jamo(&['ㄱ', 'ㅘ', 'ㄴ', 'ㅏ']);
        assert_eq!(composer.current_text(&state), "과나");
        let state = composer.remove_last_jamo(state);
        let state = composer.remove_last_jamo(state);
        assert_eq!(composer.current_text(&state), "과");
        let state = composer.remove_last_jamo(state);
        assert_eq!(state.chars, Vec::<char>::new());
        assert_eq!(state.cho, Some(0));
        assert_eq!(state.jung, Some(8));
        assert_eq!(composer.current_text(&state), "고");
        // the reopened syllable keeps composing
        let state = composer.add(state, 'ㅏ');
        assert_eq!(composer.current_text(&state), "과");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let composer = Composer::standard();
        assert_eq!(composer.remove_last_jamo(ComposerState::new()), ComposerState::new());
    }

    const KEYBOARD: [char; 33] = [
        'ㅂ', 'ㅈ', 'ㄷ', 'ㄱ', 'ㅅ', 'ㅛ', 'ㅕ', 'ㅑ', 'ㅐ', 'ㅔ', 'ㅁ', 'ㄴ', 'ㅇ', 'ㄹ', 'ㅎ', 'ㅗ',
        'ㅓ', 'ㅏ', 'ㅣ', 'ㅋ', 'ㅌ', 'ㅊ', 'ㅍ', 'ㅠ', 'ㅜ', 'ㅡ', 'ㅃ', 'ㅉ', 'ㄸ', 'ㄲ', 'ㅆ',
        'ㅒ', 'ㅖ',
    ];

    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }
    }

    fn random_sequences() -> Vec<Vec<char>> {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        (0..500)
            .map(|_| {
                let len = (rng.next() % 12) as usize + 1;
                (0..len)
                    .map(|_| KEYBOARD[(rng.next() % KEYBOARD.len() as u64) as usize])
                    .collect()
            })
            .collect()
    }

    #[test]
    fn composition_is_deterministic() {
        for seq in random_sequences() {
            assert_eq!(type_jamo(&seq), type_jamo(&seq));
        }
    }

    #[test]
    fn one_backspace_per_keystroke_empties_state() {
        let composer = Composer::standard();
        for seq in random_sequences() {
            let mut state = type_jamo(&seq);
            for _ in 0..seq.len() {
                assert!(!state.is_empty(), "emptied too early for {:?}", seq);
                state = composer.remove_last_jamo(state);
            }
            assert_eq!(state, ComposerState::new(), "leftover state for {:?}", seq);
        }
    }
}
