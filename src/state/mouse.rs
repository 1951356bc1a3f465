//! Mouse Module - Pointer events and click targets
//!
//! Screens register clickable regions in a [`HitMap`] while they draw. A
//! click is a left press followed by a left release over the same target;
//! the map reports that target and the caller turns it into an intent.
//!
//! # Example
//!
//! ```ignore
//! use kiosk_tui::state::mouse::{HitMap, MouseEvent, MouseButton};
//!
//! let mut hits = HitMap::new();
//! hits.push(Rect::new(2, 4, 20, 1), "start");
//!
//! hits.handle(&MouseEvent::down(MouseButton::Left, 5, 4));
//! assert_eq!(hits.handle(&MouseEvent::up(MouseButton::Left, 5, 4)), Some("start"));
//! ```

use crate::types::Rect;

// =============================================================================
// TYPES
// =============================================================================

/// Mouse action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

/// Mouse button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    /// X coordinate (0-indexed)
    pub x: u16,
    /// Y coordinate (0-indexed)
    pub y: u16,
}

impl MouseEvent {
    pub fn new(action: MouseAction, button: MouseButton, x: u16, y: u16) -> Self {
        Self { action, button, x, y }
    }

    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Down, button, x, y)
    }

    pub fn up(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Up, button, x, y)
    }
}

// =============================================================================
// HIT MAP
// =============================================================================

/// Clickable regions for the current frame.
///
/// Regions pushed later sit on top of earlier ones.
#[derive(Debug, Clone)]
pub struct HitMap<T> {
    regions: Vec<(Rect, T)>,
    pressed: Option<T>,
}

impl<T: Clone + PartialEq> HitMap<T> {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            pressed: None,
        }
    }

    /// Register a region for this frame.
    pub fn push(&mut self, rect: Rect, target: T) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, target));
        }
    }

    /// Forget all regions (start of a new frame). A press in progress is
    /// kept; the release still has to land on an equal target.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Forget regions and any press in progress.
    pub fn reset(&mut self) {
        self.regions.clear();
        self.pressed = None;
    }

    /// Topmost target at a position.
    pub fn target_at(&self, x: u16, y: u16) -> Option<&T> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| target)
    }

    /// Feed a pointer event; returns the clicked target on release.
    pub fn handle(&mut self, event: &MouseEvent) -> Option<T> {
        if event.button != MouseButton::Left {
            return None;
        }

        match event.action {
            MouseAction::Down => {
                self.pressed = self.target_at(event.x, event.y).cloned();
                None
            }
            MouseAction::Up => {
                let pressed = self.pressed.take()?;
                let released = self.target_at(event.x, event.y)?;
                (*released == pressed).then_some(pressed)
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &T> {
        self.regions.iter().map(|(_, target)| target)
    }
}

impl<T: Clone + PartialEq> Default for HitMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
