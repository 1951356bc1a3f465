//! Terminal setup and teardown.
//!
//! Handles entering/exiting raw mode, the alternate screen, mouse capture
//! and the kitty keyboard protocol (which is what lets keypad digits be told
//! apart from the top row). Every feature that was switched on is switched
//! off again by [`TerminalGuard::exit`], which also runs on drop.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, warn};

/// Terminal setup/teardown handle.
#[derive(Debug, Default)]
pub struct TerminalGuard {
    is_fullscreen: bool,
    is_raw: bool,
    mouse_enabled: bool,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor,
    /// mouse capture. Keyboard enhancement is best effort.
    pub fn enter() -> io::Result<Self> {
        let mut guard = Self::default();
        let mut out = io::stdout();

        terminal::enable_raw_mode()?;
        guard.is_raw = true;

        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        guard.is_fullscreen = true;

        execute!(out, EnableMouseCapture)?;
        guard.mouse_enabled = true;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES;
            match execute!(out, PushKeyboardEnhancementFlags(flags)) {
                Ok(()) => guard.keyboard_enhanced = true,
                Err(err) => warn!(%err, "keyboard enhancement unavailable"),
            }
        }

        debug!(keyboard_enhanced = guard.keyboard_enhanced, "terminal ready");
        Ok(guard)
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> io::Result<()> {
        let mut out = io::stdout();

        if self.keyboard_enhanced {
            queue!(out, PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        if self.mouse_enabled {
            queue!(out, DisableMouseCapture)?;
            self.mouse_enabled = false;
        }
        if self.is_fullscreen {
            queue!(out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
            self.is_fullscreen = false;
        }
        out.flush()?;

        if self.is_raw {
            terminal::disable_raw_mode()?;
            self.is_raw = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            warn!(%err, "failed to restore terminal");
        }
    }
}

/// Current terminal size, falling back to 80x24.
pub fn terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or((80, 24))
}
