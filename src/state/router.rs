//! Input Router - physical keys to abstract actions
//!
//! A stateless mapping: one keyboard event in, at most one [`Action`] out.
//! Screens never look at raw keys; they only see actions.
//!
//! | Input                         | Action              |
//! |-------------------------------|---------------------|
//! | `0`-`9`, `Numpad0`-`Numpad9`  | `SelectByIndex(n)`  |
//! | `Enter` / `NumpadEnter`       | `Confirm`           |
//! | `ArrowUp`                     | `MoveUp`            |
//! | `ArrowDown`                   | `MoveDown`          |
//! | `Escape`                      | `Cancel`            |
//!
//! Anything else, and any chord with Ctrl or Alt held, yields `None`.

use super::keyboard::KeyboardEvent;

/// Normalized navigation/selection command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Digit hotkey. Zero is passed through; screens decide what it means.
    SelectByIndex(u8),
    Confirm,
    MoveUp,
    MoveDown,
    Cancel,
}

/// Map a keyboard event to an action.
pub fn route(event: &KeyboardEvent) -> Option<Action> {
    if !event.is_press() || event.modifiers.ctrl || event.modifiers.alt {
        return None;
    }

    if let Some(digit) = digit_of(event) {
        return Some(Action::SelectByIndex(digit));
    }

    match event.key.as_str() {
        "Enter" => Some(Action::Confirm),
        "ArrowUp" => Some(Action::MoveUp),
        "ArrowDown" => Some(Action::MoveDown),
        "Escape" => Some(Action::Cancel),
        _ => None,
    }
}

fn digit_of(event: &KeyboardEvent) -> Option<u8> {
    if let Some(rest) = event.code.strip_prefix("Numpad") {
        if let Some(d) = single_digit(rest) {
            return Some(d);
        }
    }
    single_digit(&event.key)
}

fn single_digit(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}
