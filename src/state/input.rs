//! Input Module - Event conversion and the reader thread
//!
//! Bridges crossterm's event system with our keyboard and mouse types.
//!
//! # API
//!
//! - `convert_key_event` - crossterm KeyEvent to our KeyboardEvent
//! - `convert_mouse_event` - crossterm MouseEvent to our MouseEvent
//! - `convert_event` - Any crossterm event to an [`InputEvent`]
//! - `InputReader::spawn` - Background thread feeding the event loop channel
//!
//! Keypad digits are reported with a `NumpadN` code when the terminal
//! flags them (kitty keyboard protocol); otherwise they look like the
//! top-row digits, which route to the same action anyway.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyEventState, KeyModifiers, MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};
use super::mouse::{MouseAction, MouseButton, MouseEvent};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyboardEvent),
    Mouse(MouseEvent),
    /// Terminal resize (new width, height)
    Resize(u16, u16),
    /// Unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let keypad = event.state.contains(KeyEventState::KEYPAD);
    let code = match event.code {
        KeyCode::Char(c) if keypad && c.is_ascii_digit() => format!("Numpad{c}"),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{c}"),
        KeyCode::Enter if keypad => "NumpadEnter".to_string(),
        _ => key.clone(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        code,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert crossterm MouseEvent to our MouseEvent
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> MouseEvent {
    let (action, button) = match event.kind {
        MouseEventKind::Down(btn) => (MouseAction::Down, convert_mouse_button(btn)),
        MouseEventKind::Up(btn) => (MouseAction::Up, convert_mouse_button(btn)),
        MouseEventKind::Drag(btn) => (MouseAction::Drag, convert_mouse_button(btn)),
        MouseEventKind::Moved => (MouseAction::Move, MouseButton::None),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => (MouseAction::Scroll, MouseButton::None),
    };

    MouseEvent::new(action, button, event.column, event.row)
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Mouse(mouse) => InputEvent::Mouse(convert_mouse_event(mouse)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// READER THREAD
// =============================================================================

/// How long the reader waits for input before re-checking its flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Background thread that reads terminal input and forwards it.
///
/// The thread stops when dropped, when the receiver hangs up, or when
/// reading fails. A read failure is forwarded as `map(Err(..))` first.
pub struct InputReader {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    pub fn spawn<M, F>(tx: Sender<M>, map: F) -> io::Result<Self>
    where
        M: Send + 'static,
        F: Fn(io::Result<InputEvent>) -> M + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = thread::Builder::new()
            .name("kiosk-input".to_string())
            .spawn(move || {
                while running_clone.load(Ordering::SeqCst) {
                    let next = match event::poll(POLL_INTERVAL) {
                        Ok(false) => continue,
                        Ok(true) => event::read().map(convert_event),
                        Err(err) => Err(err),
                    };

                    if matches!(next, Ok(InputEvent::None)) {
                        continue;
                    }
                    let failed = next.is_err();
                    if tx.send(map(next)).is_err() || failed {
                        break;
                    }
                }
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
