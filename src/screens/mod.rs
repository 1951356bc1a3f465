//! Screens - the kiosk's state machine
//!
//! ```text
//!   Welcome ──StartOrder──▶ Menu ──ViewCart──▶ Cart ──ConfirmOrder──▶ Confirmation
//!      ▲                  ◀──Cancel/Back───  ◀──Cancel/ContinueShopping──    │
//!      └──────────────────────NewOrder (explicit or countdown)───────────────┘
//! ```
//!
//! Keyboard input arrives as router [`Action`](crate::state::Action)s;
//! pointer input arrives as [`Intent`]s recorded by the view while drawing.
//! Both go through [`Kiosk`], which owns the cart and the current screen.

mod cursor;
mod effects;
mod machine;

use std::time::Duration;

pub use cursor::SelectionCursor;
pub use effects::{Effect, SoundCue, Toast};
pub use machine::Kiosk;

use crate::catalog::{Category, ItemId};
use crate::money::MoneyFormat;
use crate::order::{Order, ReceiptFormat};
use crate::state::countdown::TimerToken;

// =============================================================================
// SCREEN
// =============================================================================

/// The active screen and its local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Menu {
        category: Category,
        cursor: SelectionCursor,
    },
    Cart {
        cursor: SelectionCursor,
    },
    /// Only ever built from a finalized order.
    Confirmation {
        order: Order,
        remaining: u32,
        token: TimerToken,
    },
}

/// Which screen, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Welcome,
    Menu,
    Cart,
    Confirmation,
}

impl Screen {
    pub fn menu(category: Category) -> Self {
        Screen::Menu {
            category,
            cursor: SelectionCursor::new(),
        }
    }

    pub fn cart() -> Self {
        Screen::Cart {
            cursor: SelectionCursor::new(),
        }
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Welcome => ScreenKind::Welcome,
            Screen::Menu { .. } => ScreenKind::Menu,
            Screen::Cart { .. } => ScreenKind::Cart,
            Screen::Confirmation { .. } => ScreenKind::Confirmation,
        }
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            Screen::Confirmation { order, .. } => Some(order),
            _ => None,
        }
    }

    /// Seconds left before the confirmation screen returns on its own.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Screen::Confirmation { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    pub fn cursor(&self) -> Option<SelectionCursor> {
        match self {
            Screen::Menu { cursor, .. } | Screen::Cart { cursor } => Some(*cursor),
            _ => None,
        }
    }
}

// =============================================================================
// INTENT
// =============================================================================

/// Screen-level request, usually from a click on a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    StartOrder,
    SelectItem(ItemId),
    SelectCategory(Category),
    ViewCart,
    /// Finalize the cart. Distinct from `Action::Confirm`, which on the
    /// cart screen removes the highlighted line.
    ConfirmOrder,
    ContinueShopping,
    Back,
    NewOrder,
    PrintReceipt,
    IncrementLine(ItemId),
    DecrementLine(ItemId),
    RemoveLine(ItemId),
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Tunables the machine reads while running.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_name: String,
    pub tagline: String,
    pub money: MoneyFormat,
    /// Seconds the confirmation screen stays up.
    pub countdown_secs: u32,
    pub tick_interval: Duration,
    pub toast_short: Duration,
    pub toast_long: Duration,
    pub receipt: ReceiptFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_name: "Padoca da Kamila".to_string(),
            tagline: "Padaria e Confeitaria".to_string(),
            money: MoneyFormat::default(),
            countdown_secs: 10,
            tick_interval: Duration::from_secs(1),
            toast_short: Duration::from_millis(2000),
            toast_long: Duration::from_millis(3000),
            receipt: ReceiptFormat::default(),
        }
    }
}
