//! Pipeline
//!
//! Connects the screen machine to the terminal.
//!
//! ```text
//! stdin ─> InputReader ─┐
//!                       ├─> Session ─> Kiosk ─> Effect ─> Feedback
//! Ticker ───────────────┘                 └──> view::draw ─> DiffRenderer ─> stdout
//! ```
//!
//! - **terminal** - raw mode, alternate screen and mouse capture, restored on drop
//! - **feedback** - where tones, toasts and receipts end up
//! - **mount** - the event loop

pub mod feedback;
pub mod mount;
pub mod terminal;

pub use feedback::{Feedback, RecordingFeedback, TerminalFeedback, ToastSlot};
pub use mount::{run, Flow, LoopMessage, Session};
pub use terminal::{terminal_size, TerminalGuard};
