//! Canonical tenant menu
//!
//! A [`Menu`] is derived from exactly one tenant configuration and is never
//! mutated in place; a reload replaces it wholesale.

mod normalize;

use rust_decimal::Decimal;

pub use normalize::{MenuStrategy, normalize};

/// Id of the synthetic category used for flat and free-text menus
pub const MAIN_CATEGORY_ID: &str = "main_menu";

/// Id of the placeholder item emitted when a tenant has no menu yet
pub const PLACEHOLDER_ITEM_ID: &str = "menu_not_configured";

/// A single orderable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Zero means "price on request"
    pub price: Decimal,
    pub image_ref: Option<String>,
}

impl MenuItem {
    /// Whether the tenant quotes this item on request instead of a fixed price
    #[must_use]
    pub fn is_price_on_request(&self) -> bool {
        self.price.is_zero()
    }
}

/// An ordered group of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Ordered categories of one tenant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    categories: Vec<MenuCategory>,
}

impl Menu {
    /// Build a menu from already-normalized categories
    #[must_use]
    pub const fn new(categories: Vec<MenuCategory>) -> Self {
        Self { categories }
    }

    /// Categories in display order
    #[must_use]
    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    /// Find a category by id
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find an item by id across all categories
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.id == id)
    }

    /// Total number of items across all categories
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
