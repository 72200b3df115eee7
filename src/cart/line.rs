//! Cart lines

use rusty_money::{Money, iso::Currency};

use crate::prices::line_subtotal;

/// Payload for adding a catalog entry to the cart.
///
/// Name, price, category and description are copied into the cart line when
/// the item is first added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Catalog identifier, used as the line key.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price of a single unit.
    pub unit_price: Money<'static, Currency>,

    /// Display/grouping label.
    pub category: String,

    /// Optional description.
    pub description: Option<String>,
}

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: String,
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: u32,
    category: String,
    description: Option<String>,
}

impl CartLine {
    /// New line holding a single unit of `item`.
    pub(super) fn from_item(item: CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            unit_price: item.unit_price,
            quantity: 1,
            category: item.category,
            description: item.description,
        }
    }

    /// Catalog identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name captured at add-time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured at add-time.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Number of units, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Display/grouping label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        line_subtotal(&self.unit_price, self.quantity)
    }

    pub(super) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Callers guarantee `quantity >= 1`.
    pub(super) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity >= 1, "cart lines never hold zero units");

        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;

    use super::*;

    fn esfiha() -> CartItem {
        CartItem {
            id: "1".to_string(),
            name: "Esfiha de Carne".to_string(),
            unit_price: Money::from_minor(790, BRL),
            category: "carne".to_string(),
            description: None,
        }
    }

    #[test]
    fn from_item_starts_with_one_unit() {
        let line = CartLine::from_item(esfiha());

        assert_eq!(line.quantity(), 1);
        assert_eq!(line.subtotal(), Money::from_minor(790, BRL));
    }

    #[test]
    fn increment_saturates() {
        let mut line = CartLine::from_item(esfiha());
        line.set_quantity(u32::MAX);

        line.increment();

        assert_eq!(line.quantity(), u32::MAX);
    }
}
