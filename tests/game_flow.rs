use hangul_core::config::{GameConfig, StorageFormat};
use hangul_core::keymap::jamo_for_keys;
use hangul_core::persistence::{FileBlobStore, GameStore};
use hangul_core::session::Session;
use hangul_core::{Composer, ComposerState, Evaluator, GameStatus, JamoStatus, Key};
use std::sync::Arc;

fn compose(jamo: &[char]) -> ComposerState {
    let composer = Composer::standard();
    jamo.iter().fold(ComposerState::new(), |s, &j| composer.add(s, j))
}

#[test]
fn compound_vowel_scenarios() {
    let composer = Composer::standard();
    assert_eq!(composer.current_text(&compose(&['ㅗ', 'ㅏ'])), "ㅗㅏ");
    assert_eq!(composer.current_text(&compose(&['ㄱ', 'ㅗ', 'ㅏ'])), "과");
}

#[test]
fn syllable_split_scenario() {
    let composer = Composer::standard();
    let state = composer.flush(compose(&['ㅇ', 'ㅏ', 'ㄴ', 'ㅏ']));
    assert_eq!(state.chars, vec!['아', '나']);
}

#[test]
fn swapped_syllable_feedback() {
    let feedback = Evaluator::standard().evaluate_guess("나가", "가나");
    let statuses: Vec<Vec<JamoStatus>> = feedback
        .iter()
        .map(|row| row.iter().map(|c| c.status).collect())
        .collect();
    assert_eq!(
        statuses,
        vec![
            vec![JamoStatus::Present, JamoStatus::Correct],
            vec![JamoStatus::Present, JamoStatus::Correct],
        ]
    );
}

fn config_in(dir: &std::path::Path, format: StorageFormat) -> GameConfig {
    let mut config = GameConfig::default();
    config.storage.dir = Some(dir.to_path_buf());
    config.storage.format = format;
    config
}

#[test]
fn played_day_is_restored_from_disk() {
    for format in [StorageFormat::Binary, StorageFormat::Json] {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), format);

        let mut session = Session::open(&config, FileBlobStore::new(dir.path()), 400).unwrap();
        // 사랑 is typed as t k f k d
        for jamo in jamo_for_keys("tkfkd") {
            session.press(Key::Jamo(jamo)).unwrap();
        }
        assert_eq!(session.game().current_text(), "사랑");
        session.press(Key::Enter).unwrap();
        let before = session.game().guesses().to_vec();
        drop(session);

        let session = Session::open(&config, FileBlobStore::new(dir.path()), 400).unwrap();
        assert_eq!(session.game().guesses(), &before[..]);
        assert_eq!(session.game().current_text(), "");

        let store = GameStore::new(FileBlobStore::new(dir.path()), format);
        assert!(store.load_game(401).unwrap().is_none());
        assert_eq!(store.load_game(400).unwrap().unwrap().guesses, vec!["사랑".to_string()]);
    }
}

#[test]
fn custom_word_list_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "# only one word\n나비\n").unwrap();
    let mut config = config_in(dir.path(), StorageFormat::Binary);
    config.dictionary = Some(words);
    config.max_guesses = 3;

    let mut session = Session::open(&config, FileBlobStore::new(dir.path()), 9).unwrap();
    assert_eq!(session.game().answer(), "나비");
    for jamo in jamo_for_keys("skql") {
        session.press(Key::Jamo(jamo)).unwrap();
    }
    session.press(Key::Enter).unwrap();
    assert_eq!(session.game().status(), GameStatus::Won);
    assert_eq!(session.stats().histogram, vec![1, 0, 0]);
    assert_eq!(session.game().share_text(), "한글 워들 9 1/3\n🟩🟩 🟩🟩");
}

#[test]
fn empty_word_list_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "# nothing\n").unwrap();
    let mut config = config_in(dir.path(), StorageFormat::Binary);
    config.dictionary = Some(words);
    assert!(Session::open(&config, FileBlobStore::new(dir.path()), 0).is_err());
}

#[test]
fn keyboard_colours_follow_guesses() {
    let dictionary = Arc::new(hangul_core::dictionary::Dictionary::from_words(["가방", "가위", "악기"]));
    let mut game = hangul_core::Game::new(dictionary, "가방", 0, &GameConfig::default());
    for word in ["rkdnl", "dkrrl"] {
        for jamo in jamo_for_keys(word) {
            game.type_jamo(jamo);
        }
        game.submit().unwrap();
    }
    let keyboard = game.keyboard_status();
    assert_eq!(keyboard[&'ㄱ'], JamoStatus::Correct);
    assert_eq!(keyboard[&'ㅣ'], JamoStatus::Absent);
}
