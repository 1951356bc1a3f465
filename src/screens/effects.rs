//! Side effects requested by the screen machine.
//!
//! The machine never plays sounds, draws toasts or prints. It queues an
//! [`Effect`] and the event loop hands each one to the collaborator that
//! owns it.

use std::time::Duration;

use crate::order::Receipt;
use crate::state::countdown::TimerToken;

/// Feedback tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Navigation and no-op key presses.
    Acknowledge,
    /// Item added, order confirmed.
    Confirm,
    /// Item removed.
    Error,
}

/// Transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub duration: Duration,
}

impl Toast {
    pub fn new(title: impl Into<String>, body: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Sound(SoundCue),
    Toast(Toast),
    PrintReceipt(Receipt),
    /// Begin sending ticks tagged with `token` every `interval`.
    StartCountdown { token: TimerToken, interval: Duration },
    /// Stop the ticker started with `token`.
    CancelCountdown { token: TimerToken },
}
