//! Validation
//!
//! Form checks that run before anything is sent to the backend.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    catalog::{MenuItemId, MenuItemInput, MenuItemUpdate},
    orders::{Fulfilment, OrderInput},
};

/// Client-side validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// A price of zero or less.
    #[error("price must be greater than zero, got {0}")]
    NonPositivePrice(Decimal),

    /// An order without items.
    #[error("order must contain at least one item")]
    NoItems,

    /// An order line with a zero quantity.
    #[error("quantity for item {0} must be at least one")]
    ZeroQuantity(MenuItemId),

    /// A cart line whose id is not a menu item id.
    #[error("cart item {0} is not a menu item")]
    InvalidItemId(String),

    /// A delivery order without an address.
    #[error("address is required for delivery")]
    MissingAddress,
}

/// Check a menu item form before creating or replacing an item.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the name is blank or the price is not
/// positive.
pub fn validate_menu_item(input: &MenuItemInput) -> Result<(), ValidationError> {
    require("name", &input.name)?;
    positive_price(input.price)
}

/// Check the fields a partial update sets.
///
/// # Errors
///
/// Returns a [`ValidationError`] if a provided name is blank or a provided
/// price is not positive.
pub fn validate_menu_item_update(update: &MenuItemUpdate) -> Result<(), ValidationError> {
    if let Some(name) = &update.name {
        require("name", name)?;
    }

    update.price.map_or(Ok(()), positive_price)
}

/// Check an order before it is placed.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the first problem found.
pub fn validate_order(input: &OrderInput) -> Result<(), ValidationError> {
    require("customer name", &input.customer_name)?;
    require("phone", &input.phone)?;

    if input.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    if let Some(item) = input.items.iter().find(|item| item.quantity == 0) {
        return Err(ValidationError::ZeroQuantity(item.menu_item_id));
    }

    let has_address = input
        .address
        .as_deref()
        .is_some_and(|address| !address.trim().is_empty());

    if input.fulfilment == Fulfilment::Delivery && !has_address {
        return Err(ValidationError::MissingAddress);
    }

    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn positive_price(price: Decimal) -> Result<(), ValidationError> {
    if price > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::NonPositivePrice(price))
    }
}

#[cfg(test)]
mod tests {
    use crate::orders::OrderItemInput;

    use super::*;

    fn menu_input(name: &str, price: Decimal) -> MenuItemInput {
        MenuItemInput {
            name: name.to_string(),
            description: None,
            price,
            category: Some("carne".to_string()),
            available: true,
            image_url: None,
        }
    }

    fn order(items: Vec<OrderItemInput>) -> OrderInput {
        OrderInput {
            customer_name: "Ana".to_string(),
            phone: "11999990000".to_string(),
            address: None,
            fulfilment: Fulfilment::Pickup,
            notes: None,
            items,
        }
    }

    fn line(menu_item_id: MenuItemId, quantity: u32) -> OrderItemInput {
        OrderItemInput {
            menu_item_id,
            quantity,
            notes: None,
        }
    }

    #[test]
    fn accepts_complete_menu_item() {
        assert_eq!(validate_menu_item(&menu_input("Carne", Decimal::new(790, 2))), Ok(()));
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            validate_menu_item(&menu_input("  ", Decimal::ONE)),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        assert_eq!(
            validate_menu_item(&menu_input("Carne", Decimal::ZERO)),
            Err(ValidationError::NonPositivePrice(Decimal::ZERO))
        );
        assert!(validate_menu_item(&menu_input("Carne", Decimal::NEGATIVE_ONE)).is_err());
    }

    #[test]
    fn update_checks_only_provided_fields() {
        assert_eq!(validate_menu_item_update(&MenuItemUpdate::availability(false)), Ok(()));

        let update = MenuItemUpdate {
            price: Some(Decimal::ZERO),
            ..MenuItemUpdate::default()
        };

        assert!(validate_menu_item_update(&update).is_err());
    }

    #[test]
    fn accepts_pickup_order_without_address() {
        assert_eq!(validate_order(&order(vec![line(1, 2)])), Ok(()));
    }

    #[test]
    fn rejects_order_without_phone() {
        let mut input = order(vec![line(1, 1)]);
        input.phone = String::new();

        assert_eq!(validate_order(&input), Err(ValidationError::Required("phone")));
    }

    #[test]
    fn rejects_empty_order_and_zero_quantity() {
        assert_eq!(validate_order(&order(Vec::new())), Err(ValidationError::NoItems));
        assert_eq!(
            validate_order(&order(vec![line(1, 1), line(4, 0)])),
            Err(ValidationError::ZeroQuantity(4))
        );
    }

    #[test]
    fn delivery_requires_address() {
        let mut input = order(vec![line(1, 1)]);
        input.fulfilment = Fulfilment::Delivery;

        assert_eq!(validate_order(&input), Err(ValidationError::MissingAddress));

        input.address = Some("Rua A, 10".to_string());

        assert_eq!(validate_order(&input), Ok(()));
    }
}
