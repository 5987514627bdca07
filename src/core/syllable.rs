// File: src/core/syllable.rs
use crate::core::tables::JamoTables;
use serde::{Deserialize, Serialize};

/// First codepoint of the precomposed Hangul syllable range (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Last codepoint of the range (힣).
pub const SYLLABLE_LAST: u32 = 0xD7A3;

const JUNGSEONG_COUNT: u32 = 21;
const JONGSEONG_COUNT: u32 = 28;

/// Table indices of a precomposed syllable. `jong == 0` means no final consonant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Syllable {
    pub cho: usize,
    pub jung: usize,
    pub jong: usize,
}

impl Syllable {
    /// `base + (cho * 21 + jung) * 28 + jong`. `None` if any index is out of range.
    pub fn compose(cho: usize, jung: usize, jong: usize) -> Option<char> {
        if cho >= 19 || jung >= JUNGSEONG_COUNT as usize || jong >= JONGSEONG_COUNT as usize {
            return None;
        }
        let code = SYLLABLE_BASE
            + (cho as u32 * JUNGSEONG_COUNT + jung as u32) * JONGSEONG_COUNT
            + jong as u32;
        char::from_u32(code)
    }

    pub fn decompose(c: char) -> Option<Syllable> {
        let code = c as u32;
        if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
            return None;
        }
        let offset = code - SYLLABLE_BASE;
        Some(Syllable {
            cho: (offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT)) as usize,
            jung: (offset / JONGSEONG_COUNT % JUNGSEONG_COUNT) as usize,
            jong: (offset % JONGSEONG_COUNT) as usize,
        })
    }

    pub fn to_char(&self) -> Option<char> {
        Syllable::compose(self.cho, self.jung, self.jong)
    }

    /// The 2 or 3 jamo symbols of this syllable, compounds kept whole.
    pub fn jamo(&self, tables: &JamoTables) -> Vec<char> {
        let mut result = Vec::with_capacity(3);
        result.extend(tables.choseong(self.cho));
        result.extend(tables.jungseong(self.jung));
        result.extend(tables.jongseong(self.jong));
        result
    }
}

pub fn is_syllable(c: char) -> bool {
    Syllable::decompose(c).is_some()
}
