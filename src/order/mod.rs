//! Order Finalizer - freezes the cart into an order record.
//!
//! An [`Order`] is created exactly once per confirmation and is read-only
//! afterwards. Its lines are an owned snapshot, so later cart mutations
//! cannot reach it.

pub mod receipt;

use std::fmt;

use chrono::{DateTime, Local};

use crate::cart::{Cart, CartLine};
use crate::money::Money;

pub use receipt::{Receipt, ReceiptFormat};

// =============================================================================
// CLOCK
// =============================================================================

/// Source of order timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

// =============================================================================
// ORDER
// =============================================================================

/// Short order number shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Last six digits of the Unix time in milliseconds, zero padded.
    pub fn from_timestamp(at: DateTime<Local>) -> Self {
        let millis = at.timestamp_millis().rem_euclid(1_000_000);
        Self(format!("{millis:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confirmed, immutable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    lines: Vec<CartLine>,
    total: Money,
    created_at: DateTime<Local>,
}

impl Order {
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}

/// Snapshot `cart` into an order stamped by `clock`.
pub fn finalize(cart: &Cart, clock: &dyn Clock) -> Order {
    let created_at = clock.now();
    Order {
        id: OrderId::from_timestamp(created_at),
        lines: cart.lines().to_vec(),
        total: cart.total(),
        created_at,
    }
}

// =============================================================================
// TESTS
// =============================================================================
