//! Catalog Provider - the read-only table of purchasable items.
//!
//! The catalog is supplied once at startup and never changes afterwards.
//! Items keep the order they were supplied in; that order is the display
//! order inside each category.
//!
//! # Example
//!
//! ```ignore
//! use kiosk_tui::catalog::{Catalog, Category, ItemId};
//!
//! let catalog = Catalog::builtin();
//! let dish = catalog.get(ItemId::new(1)).unwrap();
//! let extras: Vec<_> = catalog.in_category(Category::AddOn).collect();
//! ```

mod menu;

use std::collections::HashSet;
use std::fmt;

use crate::error::CatalogError;
use crate::money::Money;

// =============================================================================
// TYPES
// =============================================================================

/// Catalog-wide item identifier. Also the numeric hotkey on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Menu partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Main dishes.
    #[default]
    Primary,
    /// Extras sold alongside a dish.
    AddOn,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Primary, Category::AddOn];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Primary => "Executive Dishes",
            Category::AddOn => "Extras",
        }
    }
}

/// A purchasable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub category: Category,
    pub description: Option<String>,
}

impl MenuItem {
    pub fn new(id: u32, name: impl Into<String>, price_cents: u64, category: Category) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            price: Money::from_cents(price_cents),
            category,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Immutable, validated item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Validate and freeze a list of items.
    ///
    /// Ids must be positive and unique; names must be non-empty.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.id.get() == 0 {
                return Err(CatalogError::ZeroId);
            }
            if item.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(item.id));
            }
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// The menu the kiosk ships with.
    pub fn builtin() -> Self {
        Self { items: menu::builtin_items() }
    }

    /// Look up by id.
    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one category, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Item at `index` within a category.
    pub fn nth_in_category(&self, category: Category, index: usize) -> Option<&MenuItem> {
        self.in_category(category).nth(index)
    }

    /// Number of items in a category.
    pub fn category_len(&self, category: Category) -> usize {
        self.in_category(category).count()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
