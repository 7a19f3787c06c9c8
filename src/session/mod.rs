//! Per-chat conversation state
//!
//! Sessions live in process memory only and are lost on restart.

mod store;

use rust_decimal::Decimal;

use crate::menu::MenuItem;

pub use store::{ChatLock, SessionStore};

/// Position in the checkout flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Idle,
    AskName,
    AskPhone,
    AskAddress,
}

/// One distinct item in the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    /// Always at least 1
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Whether the line is quoted on request
    #[must_use]
    pub fn is_price_on_request(&self) -> bool {
        self.unit_price.is_zero()
    }
}

/// Ordered cart lines, at most one per item id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add one unit of `item`, returning the line's new quantity
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        });
        1
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all priced subtotals
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

/// Customer details collected during checkout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Conversation state of one chat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSession {
    pub state: CheckoutState,
    pub cart: Cart,
    pub customer: CustomerInfo,
}

impl ChatSession {
    /// Return to the initial state, dropping any checkout in progress
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
