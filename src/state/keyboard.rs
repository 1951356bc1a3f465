//! Keyboard Module - Keyboard event types and handler registry
//!
//! The registry is an owned value, not a global: whoever drives the event
//! loop creates one and hands out subscriptions from it.
//!
//! # API
//!
//! - `KeyboardRegistry::on(handler)` - Subscribe to key presses
//! - `KeyboardRegistry::dispatch(event)` - Deliver an event to subscribers
//! - `Subscription` - Guard that unsubscribes when dropped
//!
//! # Example
//!
//! ```ignore
//! use kiosk_tui::state::keyboard::{KeyboardRegistry, KeyboardEvent};
//!
//! let registry = KeyboardRegistry::new();
//! let subscription = registry.on(|event| {
//!     println!("Key: {}", event.key);
//!     true // Consume
//! });
//!
//! registry.dispatch(KeyboardEvent::new("Enter"));
//! drop(subscription); // handler removed
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
///
/// `key` is the logical value ("5", "Enter", "ArrowUp"); `code` names the
/// physical key ("Digit5", "Numpad5", "Enter").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: String,
    pub code: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A plain press where the physical code mirrors the key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let code = match key.chars().next() {
            Some(c) if c.is_ascii_digit() && key.len() == 1 => format!("Digit{c}"),
            _ => key.clone(),
        };
        Self {
            key,
            code,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// A press on the numeric keypad.
    pub fn numpad(digit: u8) -> Self {
        Self {
            key: digit.to_string(),
            code: format!("Numpad{digit}"),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { modifiers, ..Self::new(key) }
    }

    pub fn with_state(mut self, state: KeyState) -> Self {
        self.state = state;
        self
    }

    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Rc<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

#[derive(Default)]
struct HandlerRegistry {
    handlers: Vec<(usize, KeyHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Owned keyboard handler registry.
#[derive(Clone)]
pub struct KeyboardRegistry {
    inner: Rc<RefCell<HandlerRegistry>>,
}

impl KeyboardRegistry {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HandlerRegistry::default())),
        }
    }

    /// Subscribe to key presses, newest last.
    /// The handler stays registered until the returned guard is dropped.
    pub fn on<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&KeyboardEvent) -> bool + 'static,
    {
        let handler: KeyHandler = Rc::new(handler);
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id();
        reg.handlers.push((id, handler));
        Subscription {
            registry: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Dispatch a keyboard event to all registered handlers.
    /// Returns true if any handler consumed the event.
    ///
    /// Only presses reach handlers.
    pub fn dispatch(&self, event: KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }

        // Snapshot so a handler may subscribe or unsubscribe while running.
        let handlers: Vec<KeyHandler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        handlers.iter().any(|handler| handler(&event))
    }

    /// Number of live subscriptions.
    pub fn handler_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

impl Default for KeyboardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes its handler from the registry when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<RefCell<HandlerRegistry>>,
    id: Option<usize>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else { return };
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .handlers
                .retain(|(handler_id, _)| *handler_id != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// TESTS
// =============================================================================
