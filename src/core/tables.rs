// File: src/core/tables.rs

/// Initial consonants in syllable-formula order.
const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in syllable-formula order, compounds included.
const JUNGSEONG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Final consonants. Slot 0 is "no final consonant".
const JONGSEONG: [Option<char>; 28] = [
    None,
    Some('ㄱ'), Some('ㄲ'), Some('ㄳ'), Some('ㄴ'), Some('ㄵ'), Some('ㄶ'), Some('ㄷ'),
    Some('ㄹ'), Some('ㄺ'), Some('ㄻ'), Some('ㄼ'), Some('ㄽ'), Some('ㄾ'), Some('ㄿ'),
    Some('ㅀ'), Some('ㅁ'), Some('ㅂ'), Some('ㅄ'), Some('ㅅ'), Some('ㅆ'), Some('ㅇ'),
    Some('ㅈ'), Some('ㅊ'), Some('ㅋ'), Some('ㅌ'), Some('ㅍ'), Some('ㅎ'),
];

/// (first, second, compound)
const VOWEL_MERGES: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

/// (first, second, compound)
const FINAL_MERGES: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

/// The fixed jamo tables and compound rules the composer and evaluator run on.
///
/// Table position is what the syllable formula multiplies, so the order of
/// every table is part of the contract. Jamo are compatibility jamo
/// (U+3131..U+3163), the same symbols a keyboard emits.
#[derive(Debug)]
pub struct JamoTables {
    choseong: &'static [char],
    jungseong: &'static [char],
    jongseong: &'static [Option<char>],
    vowel_merges: &'static [(char, char, char)],
    final_merges: &'static [(char, char, char)],
}

static STANDARD: JamoTables = JamoTables {
    choseong: &CHOSEONG,
    jungseong: &JUNGSEONG,
    jongseong: &JONGSEONG,
    vowel_merges: &VOWEL_MERGES,
    final_merges: &FINAL_MERGES,
};

impl JamoTables {
    /// Standard modern Hangul tables.
    pub fn standard() -> &'static JamoTables {
        &STANDARD
    }

    pub fn choseong_count(&self) -> usize {
        self.choseong.len()
    }

    pub fn jungseong_count(&self) -> usize {
        self.jungseong.len()
    }

    /// Includes the empty slot 0.
    pub fn jongseong_count(&self) -> usize {
        self.jongseong.len()
    }

    pub fn choseong_index(&self, jamo: char) -> Option<usize> {
        self.choseong.iter().position(|&c| c == jamo)
    }

    pub fn jungseong_index(&self, jamo: char) -> Option<usize> {
        self.jungseong.iter().position(|&c| c == jamo)
    }

    /// Index of a real final consonant, never 0.
    pub fn jongseong_index(&self, jamo: char) -> Option<usize> {
        self.jongseong.iter().position(|&c| c == Some(jamo))
    }

    pub fn choseong(&self, index: usize) -> Option<char> {
        self.choseong.get(index).copied()
    }

    pub fn jungseong(&self, index: usize) -> Option<char> {
        self.jungseong.get(index).copied()
    }

    /// `None` for index 0 and for out-of-range indices.
    pub fn jongseong(&self, index: usize) -> Option<char> {
        self.jongseong.get(index).copied().flatten()
    }

    pub fn is_consonant(&self, jamo: char) -> bool {
        self.choseong_index(jamo).is_some()
    }

    pub fn is_vowel(&self, jamo: char) -> bool {
        self.jungseong_index(jamo).is_some()
    }

    /// ㅗ + ㅏ -> ㅘ
    pub fn merge_vowel(&self, first: char, second: char) -> Option<char> {
        merge(self.vowel_merges, first, second)
    }

    /// ㄱ + ㅅ -> ㄳ
    pub fn merge_final(&self, first: char, second: char) -> Option<char> {
        merge(self.final_merges, first, second)
    }

    /// ㅘ -> (ㅗ, ㅏ); `None` for simple vowels.
    pub fn split_vowel(&self, compound: char) -> Option<(char, char)> {
        split(self.vowel_merges, compound)
    }

    /// ㄳ -> (ㄱ, ㅅ); `None` for simple finals.
    pub fn split_final(&self, compound: char) -> Option<(char, char)> {
        split(self.final_merges, compound)
    }
}

fn merge(rules: &[(char, char, char)], first: char, second: char) -> Option<char> {
    rules
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, compound)| compound)
}

fn split(rules: &[(char, char, char)], compound: char) -> Option<(char, char)> {
    rules
        .iter()
        .find(|&&(_, _, c)| c == compound)
        .map(|&(a, b, _)| (a, b))
}
