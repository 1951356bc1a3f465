//! Countdown ticker - a cancellable periodic task
//!
//! The confirmation screen returns to the start on its own after a fixed
//! number of seconds. The ticker only keeps time: it sends `(token)` into
//! the event loop channel once per interval, and the screen machine decides
//! what a tick means. State changes never happen on the ticker thread.
//!
//! # Pattern
//!
//! - One thread per ticker, named `kiosk-countdown`
//! - An `Arc<AtomicBool>` running flag is the cancellation token
//! - `cancel()` or dropping the ticker clears the flag; the thread exits on
//!   its next wake without sending
//! - Ticks carry the token they were started with, so a tick that was
//!   already in flight when the ticker was cancelled can be recognized and
//!   discarded by the receiver
//!
//! # Example
//!
//! ```ignore
//! use kiosk_tui::state::countdown::{Ticker, TimerToken};
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! let ticker = Ticker::start(TimerToken(1), Duration::from_secs(1), tx, |t| t)?;
//! // ... rx yields TimerToken(1) once per second ...
//! ticker.cancel();
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Identifies one scheduled countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl TimerToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Running periodic ticker.
pub struct Ticker {
    token: TimerToken,
    running: Arc<AtomicBool>,
}

impl Ticker {
    /// Spawn a ticker that sends `map(token)` on `tx` every `interval`.
    ///
    /// The first tick arrives one interval after start.
    pub fn start<M, F>(token: TimerToken, interval: Duration, tx: Sender<M>, map: F) -> io::Result<Self>
    where
        M: Send + 'static,
        F: Fn(TimerToken) -> M + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Detached: the flag stops it.
        thread::Builder::new()
            .name("kiosk-countdown".to_string())
            .spawn(move || {
                while running_clone.load(Ordering::SeqCst) {
                    thread::sleep(interval);
                    if !running_clone.load(Ordering::SeqCst) {
                        break;
                    }
                    if tx.send(map(token)).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self { token, running })
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    /// Stop ticking. Does not wait for the thread; it exits on its next wake.
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// TESTS
// =============================================================================
