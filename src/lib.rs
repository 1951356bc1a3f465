//! # kiosk-tui
//!
//! Self-service ordering kiosk for the terminal.
//!
//! A customer walks through four screens (welcome, menu, cart,
//! confirmation) with the keyboard, the numeric keypad or the mouse. The
//! ordering core is plain data and never fails; the terminal, the
//! configuration file and the log file are the only fallible edges.
//!
//! ## Architecture
//!
//! ```text
//! key ─> router::route ─> Action ─┐
//!                                 ├─> Kiosk ─> Cart / Screen ─> Effect
//! click ─> HitMap ─────> Intent ──┘      └─> view::draw ─> FrameBuffer ─> DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - the menu the kiosk sells
//! - [`cart`] - the cart ledger
//! - [`order`] - finalized orders and receipts
//! - [`screens`] - the screen state machine
//! - [`state`] - input plumbing: keys, mouse, countdown
//! - [`view`] - draws the active screen
//! - [`renderer`] - frame buffer and terminal diff output
//! - [`pipeline`] - terminal setup and the event loop
//!
//! ## Example
//!
//! ```
//! use kiosk_tui::catalog::{Catalog, ItemId};
//! use kiosk_tui::screens::{Intent, Kiosk, ScreenKind, Settings};
//! use kiosk_tui::state::Action;
//!
//! let mut kiosk = Kiosk::with_system_clock(Catalog::builtin(), Settings::default());
//! kiosk.handle_intent(Intent::StartOrder);
//! kiosk.handle_action(Action::SelectByIndex(1));
//! kiosk.handle_intent(Intent::ViewCart);
//! kiosk.handle_intent(Intent::ConfirmOrder);
//!
//! assert_eq!(kiosk.screen().kind(), ScreenKind::Confirmation);
//! assert_eq!(kiosk.order().unwrap().lines()[0].item.id, ItemId::new(1));
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod money;
pub mod order;
pub mod pipeline;
pub mod renderer;
pub mod screens;
pub mod state;
pub mod types;
pub mod view;

pub use cart::{Cart, CartEvent, CartLine};
pub use catalog::{Catalog, Category, ItemId, MenuItem};
pub use config::KioskConfig;
pub use error::{CatalogError, KioskError, Result};
pub use money::{Money, MoneyFormat};
pub use order::{finalize, Clock, Order, OrderId, Receipt, ReceiptFormat, SystemClock};
pub use screens::{Effect, Intent, Kiosk, Screen, ScreenKind, Settings, SoundCue, Toast};
pub use state::{route, Action};
