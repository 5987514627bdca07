// File: src/keymap.rs

/// Latin key -> jamo on the standard two-set (dubeolsik) layout.
const DUBEOLSIK: [(char, char); 26] = [
    ('q', 'ㅂ'), ('w', 'ㅈ'), ('e', 'ㄷ'), ('r', 'ㄱ'), ('t', 'ㅅ'),
    ('y', 'ㅛ'), ('u', 'ㅕ'), ('i', 'ㅑ'), ('o', 'ㅐ'), ('p', 'ㅔ'),
    ('a', 'ㅁ'), ('s', 'ㄴ'), ('d', 'ㅇ'), ('f', 'ㄹ'), ('g', 'ㅎ'),
    ('h', 'ㅗ'), ('j', 'ㅓ'), ('k', 'ㅏ'), ('l', 'ㅣ'),
    ('z', 'ㅋ'), ('x', 'ㅌ'), ('c', 'ㅊ'), ('v', 'ㅍ'), ('b', 'ㅠ'),
    ('n', 'ㅜ'), ('m', 'ㅡ'),
];

/// Keys whose shifted form is a different jamo.
const DUBEOLSIK_SHIFT: [(char, char); 7] = [
    ('Q', 'ㅃ'), ('W', 'ㅉ'), ('E', 'ㄸ'), ('R', 'ㄲ'), ('T', 'ㅆ'),
    ('O', 'ㅒ'), ('P', 'ㅖ'),
];

/// On-screen keyboard rows, unshifted.
pub const KEYBOARD_ROWS: [&str; 3] = ["ㅂㅈㄷㄱㅅㅛㅕㅑㅐㅔ", "ㅁㄴㅇㄹㅎㅗㅓㅏㅣ", "ㅋㅌㅊㅍㅠㅜㅡ"];

/// Other uppercase letters fall back to their lowercase jamo.
pub fn jamo_for_key(key: char) -> Option<char> {
    if let Some(&(_, jamo)) = DUBEOLSIK_SHIFT.iter().find(|(k, _)| *k == key) {
        return Some(jamo);
    }
    let key = key.to_ascii_lowercase();
    DUBEOLSIK.iter().find(|(k, _)| *k == key).map(|&(_, jamo)| jamo)
}

/// Maps a whole typed string, dropping unmapped keys.
pub fn jamo_for_keys(keys: &str) -> Vec<char> {
    keys.chars().filter_map(jamo_for_key).collect()
}
