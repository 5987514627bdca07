// Line protocol driver for a host UI. Commands arrive on stdin, one per line;
// replies go to stdout. Logs go to stderr.
use env_logger::{Builder, Env};
use hangul_core::config::GameConfig;
use hangul_core::core::types::{Feedback, JamoStatus};
use hangul_core::keymap::jamo_for_key;
use hangul_core::persistence::FileBlobStore;
use hangul_core::session::Session;
use hangul_core::{GameStatus, Key};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load_default();
    let mut session = match Session::open_default(&config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("cannot start: {}", e);
            writeln!(io::stdout(), "ERROR {}", e)?;
            return Ok(());
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write_state(&session, &mut stdout)?;

    for line in stdin.lock().lines() {
        let input = line?;
        log::debug!("<- {:?}", input);
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or("");
        let arg = parts.next();

        let result = match (command, arg) {
            ("KEY", Some(keys)) => keys
                .chars()
                .filter_map(jamo_for_key)
                .try_for_each(|jamo| session.press(Key::Jamo(jamo))),
            ("JAMO", Some(jamo)) => jamo
                .chars()
                .try_for_each(|jamo| session.press(Key::Jamo(jamo))),
            ("BACKSPACE", _) => session.press(Key::Backspace),
            ("ENTER", _) => session.press(Key::Enter),
            ("HARD", Some(flag)) => {
                if !session.set_hard_mode(flag == "on") {
                    writeln!(stdout, "ERROR hard mode is locked")?;
                }
                Ok(())
            }
            ("STATE", _) => {
                writeln!(stdout, "STATE {}", serde_json::to_string(&session.view())?)?;
                Ok(())
            }
            ("EXIT", _) => break,
            _ => {
                writeln!(stdout, "ERROR unknown command {:?}", input)?;
                continue;
            }
        };

        match result {
            Ok(()) => write_state(&session, &mut stdout)?,
            Err(e) => writeln!(stdout, "ERROR {}", e)?,
        }
        stdout.flush()?;
    }

    if let Err(e) = session.save() {
        log::error!("failed to save progress: {}", e);
    }
    Ok(())
}

fn write_state(session: &Session<FileBlobStore>, out: &mut impl Write) -> io::Result<()> {
    let game = session.game();
    writeln!(out, "PREEDIT {}", game.current_text())?;
    for (i, guess) in game.guesses().iter().enumerate() {
        writeln!(out, "ROW {} {} {}", i, guess.word, row_code(&guess.feedback))?;
    }
    let keyboard: Vec<String> = game
        .keyboard_status()
        .into_iter()
        .map(|(jamo, status)| format!("{}:{}", jamo, status))
        .collect();
    writeln!(out, "KEYBOARD {}", keyboard.join(" "))?;
    if game.status() != GameStatus::Playing {
        writeln!(out, "RESULT {:?} {}", game.status(), game.answer())?;
    }
    out.flush()
}

/// `G`, `Y`, `.` per jamo, syllables separated by `/`.
fn row_code(feedback: &Feedback) -> String {
    let syllables: Vec<String> = feedback
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| match cell.status {
                    JamoStatus::Correct => 'G',
                    JamoStatus::Present => 'Y',
                    JamoStatus::Absent => '.',
                    JamoStatus::Empty => '_',
                })
                .collect()
        })
        .collect();
    syllables.join("/")
}
