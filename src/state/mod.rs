//! State Module - Input and timing systems
//!
//! - **Keyboard** - Event types, owned handler registry, subscriptions
//! - **Router** - Keys to abstract actions
//! - **Mouse** - Pointer events and per-frame click targets
//! - **Input** - crossterm conversion and the reader thread
//! - **Countdown** - Cancellable periodic ticker

pub mod countdown;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod router;

pub use countdown::{Ticker, TimerToken};
pub use input::{InputEvent, InputReader};
pub use keyboard::{KeyState, KeyboardEvent, KeyboardRegistry, Modifiers, Subscription};
pub use mouse::{HitMap, MouseAction, MouseButton, MouseEvent};
pub use router::{route, Action};
