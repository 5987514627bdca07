// Interactive terminal game. Type on the Latin keyboard as if it were a
// two-set Hangul layout; an empty line submits.
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{StyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use env_logger::{Builder, Env};
use hangul_core::config::GameConfig;
use hangul_core::core::types::{JamoCell, JamoStatus};
use hangul_core::keymap::{jamo_for_key, KEYBOARD_ROWS};
use hangul_core::persistence::FileBlobStore;
use hangul_core::session::Session;
use hangul_core::{GameStatus, Key};
use std::io::{self, stdin, stdout, Write};

fn main() -> io::Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_default();
    let mut session = match Session::open_default(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return Ok(());
        }
    };
    let mut message = String::new();

    loop {
        print_ui(&session, &message)?;
        message.clear();

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => {
                if let Err(e) = session.press(Key::Enter) {
                    message = e.to_string();
                }
            }
            ":stats" => {
                let stats = session.stats();
                message = format!(
                    "played {}  win {}%  streak {}  best {}  histogram {:?}",
                    stats.played,
                    stats.win_rate(),
                    stats.current_streak,
                    stats.max_streak,
                    stats.histogram
                );
            }
            s if s.starts_with(":hard") => {
                let on = !s.ends_with("off");
                if !session.set_hard_mode(on) {
                    message = "hard mode can only change before the first guess".to_string();
                }
            }
            s => {
                // '-' is backspace, everything else goes through the keymap
                for c in s.chars() {
                    let key = match c {
                        '-' => Key::Backspace,
                        c => match jamo_for_key(c) {
                            Some(jamo) => Key::Jamo(jamo),
                            None => continue,
                        },
                    };
                    if let Err(e) = session.press(key) {
                        message = e.to_string();
                    }
                }
            }
        }
    }

    println!("\nSaving progress...");
    if let Err(e) = session.save() {
        eprintln!("[ERROR] Could not save progress: {}", e);
    }
    Ok(())
}

fn paint(text: String, status: JamoStatus) -> StyledContent<String> {
    match status {
        JamoStatus::Correct => text.black().on_green(),
        JamoStatus::Present => text.black().on_yellow(),
        JamoStatus::Absent => text.white().on_dark_grey(),
        JamoStatus::Empty => text.stylize(),
    }
}

fn print_cells(out: &mut impl Write, cells: &[JamoCell]) -> io::Result<()> {
    for cell in cells {
        write!(out, "{}", paint(format!(" {} ", cell.jamo), cell.status))?;
    }
    write!(out, "  ")
}

fn print_ui(session: &Session<FileBlobStore>, message: &str) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    let game = session.game();

    writeln!(out, "Hangul Wordle - day {}{}", game.day_index(), if game.hard_mode() { " (hard)" } else { "" })?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Type keys (rk = 가), '-' to erase, empty line to submit.")?;
    writeln!(out, "':hard on|off', ':stats', 'exit' to save and quit.\n")?;

    for guess in game.guesses() {
        write!(out, "{}  ", guess.word)?;
        for syllable in &guess.feedback {
            print_cells(&mut out, syllable)?;
        }
        writeln!(out)?;
    }
    if game.status() == GameStatus::Playing {
        let text = game.current_text();
        write!(out, "{:<4}", text)?;
        for syllable in &game.current_row() {
            print_cells(&mut out, syllable)?;
        }
        writeln!(out)?;
        for _ in game.guesses().len() + 1..game.max_guesses() {
            writeln!(out, "..")?;
        }
    }

    writeln!(out)?;
    let keyboard = game.keyboard_status();
    for row in KEYBOARD_ROWS {
        for jamo in row.chars() {
            let status = keyboard.get(&jamo).copied().unwrap_or_default();
            write!(out, "{}", paint(format!(" {} ", jamo), status))?;
        }
        writeln!(out)?;
    }

    match game.status() {
        GameStatus::Won => writeln!(out, "\nSolved!\n{}", game.share_text())?,
        GameStatus::Lost => writeln!(out, "\nThe answer was {}\n{}", game.answer(), game.share_text())?,
        GameStatus::Playing => {}
    }
    if !message.is_empty() {
        writeln!(out, "\n[{}]", message)?;
    }
    write!(out, "\n> ")?;
    out.flush()
}
