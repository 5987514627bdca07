// C ABI for embedding the game in a host UI. Every call that returns a string
// returns JSON that the host must release with `hangul_wordle_free_string`.
use crate::config::GameConfig;
use crate::core::engine::Key;
use crate::core::evaluator::Evaluator;
use crate::persistence::FileBlobStore;
use crate::session::Session;
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::ptr;
use std::sync::{Mutex, MutexGuard};

static SESSION: Mutex<Option<Session<FileBlobStore>>> = Mutex::new(None);

#[derive(Serialize)]
struct Reply<T: Serialize> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn lock() -> MutexGuard<'static, Option<Session<FileBlobStore>>> {
    SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_c_string(json: String) -> *mut c_char {
    CString::new(json).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

fn reply<T: Serialize>(result: Result<T, String>) -> *mut c_char {
    let reply = match result {
        Ok(data) => Reply { ok: true, error: None, data: Some(data) },
        Err(e) => Reply { ok: false, error: Some(e), data: None },
    };
    let json = serde_json::to_string(&reply)
        .unwrap_or_else(|_| r#"{"ok":false,"error":"serialization failed"}"#.to_string());
    to_c_string(json)
}

/// Runs `f` against the open session and replies with the resulting view.
fn with_session<F>(f: F) -> *mut c_char
where
    F: FnOnce(&mut Session<FileBlobStore>) -> Result<(), String>,
{
    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut guard = lock();
        let Some(session) = guard.as_mut() else {
            return Err("engine not initialised".to_string());
        };
        let outcome = f(session);
        let view = session.view();
        outcome.map(|_| view)
    }));
    match result {
        Ok(result) => reply(result),
        Err(_) => {
            log::error!("panic inside the C API");
            reply::<()>(Err("internal error".to_string()))
        }
    }
}

unsafe fn str_arg<'a>(p: *const c_char) -> Option<&'a str> {
    if p.is_null() {
        return None;
    }
    CStr::from_ptr(p).to_str().ok()
}

/// Opens today's game. `storage_dir` may be null to use the configured directory.
/// A session that is already open is kept as is.
///
/// # Safety
/// `storage_dir` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn hangul_wordle_init(storage_dir: *const c_char) -> bool {
    if lock().is_some() {
        log::warn!("engine already initialised");
        return true;
    }
    let mut config = GameConfig::load_default();
    if let Some(dir) = str_arg(storage_dir).filter(|d| !d.is_empty()) {
        config.storage.dir = Some(PathBuf::from(dir));
    }
    let opened = catch_unwind(AssertUnwindSafe(|| Session::open_default(&config)));
    match opened {
        Ok(Ok(session)) => {
            *lock() = Some(session);
            log::info!("engine initialised");
            true
        }
        Ok(Err(e)) => {
            log::error!("failed to open game: {}", e);
            false
        }
        Err(_) => {
            log::error!("panic during engine initialisation");
            false
        }
    }
}

/// Saves and closes the session.
#[no_mangle]
pub extern "C" fn hangul_wordle_destroy() {
    if let Some(mut session) = lock().take() {
        match session.save() {
            Ok(()) => log::info!("progress saved"),
            Err(e) => log::error!("failed to save progress: {}", e),
        }
    }
}

/// Feeds one jamo (a Unicode scalar value).
#[no_mangle]
pub extern "C" fn hangul_wordle_press_jamo(jamo: u32) -> *mut c_char {
    with_session(|session| {
        let jamo = char::from_u32(jamo).ok_or_else(|| format!("invalid code point {jamo}"))?;
        session.press(Key::Jamo(jamo)).map_err(|e| e.to_string())
    })
}

#[no_mangle]
pub extern "C" fn hangul_wordle_backspace() -> *mut c_char {
    with_session(|session| session.press(Key::Backspace).map_err(|e| e.to_string()))
}

/// Submits the current row. Rejections come back with `ok: false`.
#[no_mangle]
pub extern "C" fn hangul_wordle_enter() -> *mut c_char {
    with_session(|session| session.press(Key::Enter).map_err(|e| e.to_string()))
}

#[no_mangle]
pub extern "C" fn hangul_wordle_set_hard_mode(on: bool) -> *mut c_char {
    with_session(|session| {
        if session.set_hard_mode(on) {
            Ok(())
        } else {
            Err("hard mode can only change before the first guess".to_string())
        }
    })
}

#[no_mangle]
pub extern "C" fn hangul_wordle_state() -> *mut c_char {
    with_session(|_| Ok(()))
}

/// Scores any guess against any answer without touching the session.
///
/// # Safety
/// Both arguments must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn hangul_wordle_evaluate(guess: *const c_char, answer: *const c_char) -> *mut c_char {
    let (Some(guess), Some(answer)) = (str_arg(guess), str_arg(answer)) else {
        return reply::<()>(Err("guess and answer must be UTF-8 strings".to_string()));
    };
    reply(Ok(Evaluator::standard().evaluate_guess(guess, answer)))
}

/// # Safety
/// `s` must be null or a pointer returned by this library, released only once.
#[no_mangle]
pub unsafe extern "C" fn hangul_wordle_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{BlobStore, GAME_KEY};
    use serde_json::Value;

    // tests below share the global session
    static SESSION_TESTS: Mutex<()> = Mutex::new(());

    fn take_json(out: *mut c_char) -> Value {
        assert!(!out.is_null());
        let json = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        unsafe { hangul_wordle_free_string(out) };
        serde_json::from_str(&json).unwrap()
    }

    fn init_in(dir: &std::path::Path) -> bool {
        let dir = CString::new(dir.to_str().unwrap()).unwrap();
        unsafe { hangul_wordle_init(dir.as_ptr()) }
    }

    fn press_all(jamo: &str) -> Value {
        let mut last = Value::Null;
        for j in jamo.chars() {
            last = take_json(hangul_wordle_press_jamo(j as u32));
            assert_eq!(last["ok"], true);
        }
        last
    }

    #[test]
    fn full_round_through_the_c_abi() {
        let _guard = SESSION_TESTS.lock().unwrap_or_else(|p| p.into_inner());
        hangul_wordle_destroy();
        let dir = tempfile::tempdir().unwrap();

        let before = take_json(hangul_wordle_state());
        assert_eq!(before["ok"], false);
        assert_eq!(before["error"], "engine not initialised");

        assert!(init_in(dir.path()));
        let typed = press_all("ㅅㅏㄹㅏㅇ");
        assert_eq!(typed["data"]["current_text"], "사랑");
        let typed = take_json(hangul_wordle_backspace());
        assert_eq!(typed["data"]["current_text"], "사라");
        let typed = press_all("ㅇ");
        assert_eq!(typed["data"]["current_text"], "사랑");

        let entered = take_json(hangul_wordle_enter());
        assert_eq!(entered["ok"], true);
        assert_eq!(entered["data"]["guesses"][0]["word"], "사랑");
        assert_eq!(entered["data"]["current_text"], "");

        let locked = take_json(hangul_wordle_set_hard_mode(true));
        assert_eq!(locked["ok"], false);

        hangul_wordle_destroy();
        assert!(FileBlobStore::new(dir.path()).load(GAME_KEY).unwrap().is_some());
        assert_eq!(take_json(hangul_wordle_state())["ok"], false);

        assert!(init_in(dir.path()));
        let restored = take_json(hangul_wordle_state());
        assert_eq!(restored["ok"], true);
        assert_eq!(restored["data"]["guesses"].as_array().unwrap().len(), 1);
        assert_eq!(restored["data"]["guesses"][0]["word"], "사랑");
        hangul_wordle_destroy();
    }

    #[test]
    fn second_init_keeps_the_open_session() {
        let _guard = SESSION_TESTS.lock().unwrap_or_else(|p| p.into_inner());
        hangul_wordle_destroy();
        let dir = tempfile::tempdir().unwrap();

        assert!(init_in(dir.path()));
        press_all("ㄱㅏ");
        assert!(init_in(dir.path()));
        let state = take_json(hangul_wordle_state());
        assert_eq!(state["data"]["current_text"], "가");
        hangul_wordle_destroy();
    }

    #[test]
    fn evaluate_returns_json() {
        let guess = CString::new("나가").unwrap();
        let answer = CString::new("가나").unwrap();
        unsafe {
            let out = hangul_wordle_evaluate(guess.as_ptr(), answer.as_ptr());
            let json = CStr::from_ptr(out).to_str().unwrap().to_string();
            hangul_wordle_free_string(out);
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["ok"], true);
            assert_eq!(value["data"][1][1]["status"], "correct");
            assert_eq!(value["data"][0][0]["jamo"], "ㄴ");
        }
    }

    #[test]
    fn null_arguments_are_rejected() {
        unsafe {
            let out = hangul_wordle_evaluate(ptr::null(), ptr::null());
            let json = CStr::from_ptr(out).to_str().unwrap().to_string();
            hangul_wordle_free_string(out);
            assert!(json.contains("\"ok\":false"));
        }
    }
}
