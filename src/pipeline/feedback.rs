//! Feedback collaborators.
//!
//! The screen machine says *when* a tone, notification or receipt is due;
//! a [`Feedback`] implementation decides what that looks like. On a
//! terminal a tone is the bell, a receipt goes to the log, and the toast
//! text is drawn by the view from the [`ToastSlot`].

use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::order::Receipt;
use crate::screens::{SoundCue, Toast};

/// Output side of the kiosk.
pub trait Feedback {
    fn play(&mut self, cue: SoundCue);

    fn notify(&mut self, toast: &Toast);

    fn print_receipt(&mut self, receipt: &Receipt);
}

// =============================================================================
// Terminal
// =============================================================================

/// Terminal bell for tones, tracing for everything else.
pub struct TerminalFeedback<W: Write = io::Stdout> {
    out: W,
    sound: bool,
}

impl TerminalFeedback {
    pub fn stdout(sound: bool) -> Self {
        Self::new(io::stdout(), sound)
    }
}

impl<W: Write> TerminalFeedback<W> {
    pub fn new(out: W, sound: bool) -> Self {
        Self { out, sound }
    }

    fn bell(&mut self, times: usize) {
        let bells = "\x07".repeat(times);
        if let Err(err) = self.out.write_all(bells.as_bytes()).and_then(|()| self.out.flush()) {
            debug!(%err, "bell failed");
        }
    }
}

impl<W: Write> Feedback for TerminalFeedback<W> {
    fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "tone");
        if !self.sound {
            return;
        }
        match cue {
            SoundCue::Acknowledge | SoundCue::Confirm => self.bell(1),
            SoundCue::Error => self.bell(2),
        }
    }

    fn notify(&mut self, toast: &Toast) {
        debug!(title = %toast.title, body = %toast.body, "toast");
    }

    fn print_receipt(&mut self, receipt: &Receipt) {
        for line in receipt.lines() {
            info!(target: "kiosk::receipt", "{line}");
        }
    }
}

// =============================================================================
// Recording
// =============================================================================

/// Keeps everything it is given. For headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub sounds: Vec<SoundCue>,
    pub toasts: Vec<Toast>,
    pub receipts: Vec<Receipt>,
}

impl Feedback for RecordingFeedback {
    fn play(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn notify(&mut self, toast: &Toast) {
        self.toasts.push(toast.clone());
    }

    fn print_receipt(&mut self, receipt: &Receipt) {
        self.receipts.push(receipt.clone());
    }
}

// =============================================================================
// Toast slot
// =============================================================================

/// The notification on display. A newer toast replaces the current one.
#[derive(Debug, Clone, Default)]
pub struct ToastSlot {
    current: Option<(Toast, Instant)>,
}

impl ToastSlot {
    pub fn show(&mut self, toast: Toast, now: Instant) {
        let until = now + toast.duration;
        self.current = Some((toast, until));
    }

    /// Toast still on display at `now`.
    pub fn current(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|(_, until)| now < *until)
            .map(|(toast, _)| toast)
    }

    /// Time until the current toast expires.
    pub fn deadline(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|(_, until)| until.saturating_duration_since(now))
            .filter(|left| !left.is_zero())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
