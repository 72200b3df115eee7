//! Cart
//!
//! [`Cart`] is the plain value: an ordered set of lines keyed by catalog id,
//! with totals derived on every read. [`CartStore`] is the shared handle the
//! storefront surfaces hold on to; it owns a cart, applies mutations and tells
//! subscribers about them.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::prices::STORE_CURRENCY;

mod line;
mod store;

pub use line::{CartItem, CartLine};
pub use store::{CartStore, Subscription};

/// Errors related to adding items to the cart.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The item has no identifier.
    #[error("cart item id must not be empty")]
    EmptyId,

    /// The item has a negative unit price (item id, price in minor units).
    #[error("item {0} has negative price {1}")]
    NegativePrice(String, i64),

    /// The item currency differs from the cart currency (item id, item currency, cart currency).
    #[error("item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `item`.
    ///
    /// A line with the same id has its quantity bumped by one and keeps the
    /// name and price it was first added with. Otherwise a new line with a
    /// quantity of one is appended.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the id is empty, the price is negative or
    /// the price currency does not match the cart.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.id.is_empty() {
            return Err(CartError::EmptyId);
        }

        let price_minor = item.unit_price.to_minor_units();

        if price_minor < 0 {
            return Err(CartError::NegativePrice(item.id, price_minor));
        }

        let item_currency = item.unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.id,
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        match self.lines.iter_mut().find(|line| line.id() == item.id) {
            Some(line) => line.increment(),
            None => self.lines.push(CartLine::from_item(item)),
        }

        Ok(())
    }

    /// Remove the line with `id`. Returns `false` if there was no such line.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.id() != id);

        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Ids not in the cart are
    /// ignored rather than re-added. Returns whether the cart changed.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.lines.iter_mut().find(|line| line.id() == id) {
            Some(line) if line.quantity() != quantity => {
                line.set_quantity(quantity);
                true
            }
            Some(_) | None => false,
        }
    }

    /// Add one unit to an existing line. Returns `false` if there was no such line.
    pub fn increment(&mut self, id: &str) -> bool {
        match self.lines.iter_mut().find(|line| line.id() == id) {
            Some(line) => {
                line.increment();
                true
            }
            None => false,
        }
    }

    /// Take one unit off an existing line, removing it when it reaches zero.
    pub fn decrement(&mut self, id: &str) -> bool {
        let Some(quantity) = self.line(id).map(CartLine::quantity) else {
            return false;
        };

        self.set_quantity(id, i64::from(quantity) - 1)
    }

    /// Remove every line. Returns `false` if the cart was already empty.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }

        self.lines.clear();

        true
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Clamps at `i64::MAX` minor units instead of overflowing.
    pub fn total(&self) -> Money<'static, Currency> {
        let minor_units = self
            .lines
            .iter()
            .map(|line| line.subtotal().to_minor_units())
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor_units, self.currency)
    }

    /// Sum of quantities over all lines.
    pub fn line_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Get the line with `id`.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(STORE_CURRENCY)
    }
}
