//! Order Drafts

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartLine},
    catalog::MenuItemId,
    orders::{Fulfilment, OrderInput, OrderItemInput},
    validation::{ValidationError, validate_order},
};

/// Customer-entered details for a new order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Customer name.
    pub name: String,

    /// Contact phone.
    pub phone: String,

    /// Delivery address.
    pub address: Option<String>,

    /// Pickup or delivery.
    pub fulfilment: Fulfilment,

    /// Free-form notes.
    pub notes: Option<String>,
}

/// Validated order payload built from a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    input: OrderInput,
    total: Money<'static, Currency>,
}

impl OrderDraft {
    /// Build an order from the cart lines and the customer's details.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a cart line is not a menu item, or the
    /// resulting order fails [`validate_order`].
    pub fn from_cart(cart: &Cart, customer: CustomerDetails) -> Result<Self, ValidationError> {
        let items = cart
            .iter()
            .map(order_item)
            .collect::<Result<Vec<_>, _>>()?;

        let input = OrderInput {
            customer_name: customer.name.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            address: trimmed(customer.address),
            fulfilment: customer.fulfilment,
            notes: trimmed(customer.notes),
            items,
        };

        validate_order(&input)?;

        Ok(Self {
            input,
            total: cart.total(),
        })
    }

    /// Payload to send to the backend.
    pub fn input(&self) -> &OrderInput {
        &self.input
    }

    /// Cart total at the time the draft was built.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Take the payload.
    pub fn into_input(self) -> OrderInput {
        self.input
    }
}

fn order_item(line: &CartLine) -> Result<OrderItemInput, ValidationError> {
    let menu_item_id = line
        .id()
        .parse::<MenuItemId>()
        .ok()
        .ok_or_else(|| ValidationError::InvalidItemId(line.id().to_string()))?;

    Ok(OrderItemInput {
        menu_item_id,
        quantity: line.quantity(),
        notes: None,
    })
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
