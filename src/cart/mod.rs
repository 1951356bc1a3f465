//! Cart Ledger - quantity per item for the order in progress.
//!
//! Invariants:
//! - at most one line per item id
//! - every line has quantity >= 1 (a line that would reach 0 is deleted)
//! - lines keep first-selection order
//! - `total()` is recomputed from the lines on every call
//!
//! Every operation is infallible. Unknown ids and non-positive quantities
//! are no-ops or removals, never errors. Mutating operations return a
//! [`CartEvent`] describing what happened so the caller can raise the
//! matching notification.

use crate::catalog::{ItemId, MenuItem};
use crate::money::Money;

// =============================================================================
// TYPES
// =============================================================================

/// One item and how many of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Money {
        self.item.price.times(self.quantity)
    }
}

/// What a ledger mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A unit was added; `quantity` is the line's new quantity.
    Added { id: ItemId, name: String, quantity: u32 },
    /// The line's quantity was set to a new positive value.
    QuantityChanged { id: ItemId, quantity: u32 },
    /// The line was deleted.
    Removed { id: ItemId, name: String },
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`, appending a new line on first selection.
    pub fn add(&mut self, item: &MenuItem) -> CartEvent {
        let quantity = match self.position(item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine { item: item.clone(), quantity: 1 });
                1
            }
        };

        CartEvent::Added {
            id: item.id,
            name: item.name.clone(),
            quantity,
        }
    }

    /// Set a line's quantity. `quantity <= 0` removes the line.
    ///
    /// Never creates a line; returns `None` when `id` is not in the cart.
    pub fn set_quantity(&mut self, id: ItemId, quantity: i64) -> Option<CartEvent> {
        let index = self.position(id)?;
        if quantity <= 0 {
            return self.remove(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.lines[index].quantity = quantity;
        Some(CartEvent::QuantityChanged { id, quantity })
    }

    /// Delete a line. `None` if absent.
    pub fn remove(&mut self, id: ItemId) -> Option<CartEvent> {
        let index = self.position(id)?;
        let line = self.lines.remove(index);
        Some(CartEvent::Removed { id, name: line.item.name })
    }

    /// Sum of price x quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities, for the cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    pub fn quantity_of(&self, id: ItemId) -> Option<u32> {
        self.position(id).map(|index| self.lines[index].quantity)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item.id == id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn item(id: u32) -> MenuItem {
        Catalog::builtin().get(ItemId::new(id)).cloned().unwrap()
    }

    fn recomputed_total(cart: &Cart) -> Money {
        cart.lines()
            .iter()
            .fold(Money::ZERO, |acc, line| acc + line.item.price.times(line.quantity))
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_merges_by_id() {
        let mut cart = Cart::new();
        let ids = [1, 12, 1, 3, 12, 1];
        for id in ids {
            cart.add(&item(id));
        }

        assert_eq!(cart.len(), 3);
        // First-selection order
        let order: Vec<u32> = cart.lines().iter().map(|l| l.item.id.get()).collect();
        assert_eq!(order, vec![1, 12, 3]);

        for id in [1, 12, 3] {
            let expected = ids.iter().filter(|&&i| i == id).count() as u32;
            assert_eq!(cart.quantity_of(ItemId::new(id)), Some(expected));
        }
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_add_reports_new_quantity() {
        let mut cart = Cart::new();
        let first = cart.add(&item(5));
        let second = cart.add(&item(5));

        assert!(matches!(first, CartEvent::Added { quantity: 1, .. }));
        assert!(matches!(second, CartEvent::Added { quantity: 2, .. }));
    }

    #[test]
    fn test_scenario_total() {
        let mut cart = Cart::new();
        cart.add(&item(1));
        cart.add(&item(1));
        cart.add(&item(12));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Money::from_cents(3480));
        assert_eq!(cart.total().to_string(), "34.80");
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        for q in [0, -1, -50] {
            let mut cart = Cart::new();
            cart.add(&item(2));
            cart.add(&item(2));

            let event = cart.set_quantity(ItemId::new(2), q);
            assert!(matches!(event, Some(CartEvent::Removed { .. })));
            assert_eq!(cart.quantity_of(ItemId::new(2)), None);
        }
    }

    #[test]
    fn test_set_quantity_never_creates() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity(ItemId::new(7), 3), None);
        assert_eq!(cart.set_quantity(ItemId::new(7), 0), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_positive() {
        let mut cart = Cart::new();
        cart.add(&item(15));
        let event = cart.set_quantity(ItemId::new(15), 4);

        assert_eq!(
            event,
            Some(CartEvent::QuantityChanged { id: ItemId::new(15), quantity: 4 })
        );
        assert_eq!(cart.total(), Money::from_cents(2000));
    }

    #[test]
    fn test_huge_quantity_saturates_counts() {
        let mut cart = Cart::new();
        cart.add(&item(1));
        cart.add(&item(2));
        cart.set_quantity(ItemId::new(1), i64::MAX);
        cart.set_quantity(ItemId::new(2), 5);

        assert_eq!(cart.quantity_of(ItemId::new(1)), Some(u32::MAX));
        assert_eq!(cart.item_count(), u32::MAX);
        assert_eq!(
            cart.total(),
            Money::from_cents(1590 * u64::from(u32::MAX) + 5 * 1690)
        );
        assert_eq!(cart.total(), recomputed_total(&cart));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item(1));
        assert_eq!(cart.remove(ItemId::new(9)), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_never_drifts() {
        let mut cart = Cart::new();
        let steps: [(u32, i64); 10] = [
            (1, 1), (12, 1), (3, 1), (1, 3), (12, 0),
            (8, 1), (3, -2), (15, 1), (15, 7), (1, 1),
        ];

        for (id, q) in steps {
            if q == 1 {
                cart.add(&item(id));
            } else {
                cart.set_quantity(ItemId::new(id), q);
            }
            assert_eq!(cart.total(), recomputed_total(&cart));
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }

        cart.remove(ItemId::new(8));
        assert_eq!(cart.total(), recomputed_total(&cart));
    }
}
