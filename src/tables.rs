//! Tables
//!
//! Terminal renderings of the menu, the cart panel and the admin order list.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::MenuItem,
    checkout::cart_caption,
    orders::Order,
    prices::{PriceError, STORE_CURRENCY, format_price, money_from_decimal},
};

/// Errors that can occur when rendering a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A price could not be converted for display.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Writing to the output failed.
    #[error("failed to write table: {0}")]
    Io(#[from] io::Error),
}

/// Render menu items, one row each.
///
/// # Errors
///
/// Returns an error if a price is invalid or the output cannot be written.
pub fn write_menu<'a>(
    mut out: impl io::Write,
    items: impl IntoIterator<Item = &'a MenuItem>,
) -> Result<(), TableError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Category", "Price", "Available"]);

    for item in items {
        let price = money_from_decimal(item.price, STORE_CURRENCY)?;

        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            item.category.clone().unwrap_or_default(),
            format_price(&price),
            if item.available { "yes" } else { "no" }.to_string(),
        ]);
    }

    write_table(&mut out, builder, 3)
}

/// Render the cart panel: one row per line, then the caption and total.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), TableError> {
    writeln!(out, "{}", cart_caption(cart.line_count()))?;

    if cart.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Subtotal"]);

    for line in cart.iter() {
        builder.push_record([
            line.name().to_string(),
            line.quantity().to_string(),
            format_price(&line.unit_price()),
            format_price(&line.subtotal()),
        ]);
    }

    write_table(&mut out, builder, 1)?;

    writeln!(out, "Total: {}", format_price(&cart.total()))?;

    Ok(())
}

/// Render orders, newest data as the backend sent it.
///
/// # Errors
///
/// Returns an error if a total is invalid or the output cannot be written.
pub fn write_orders<'a>(
    mut out: impl io::Write,
    orders: impl IntoIterator<Item = &'a Order>,
) -> Result<(), TableError> {
    let mut builder = Builder::default();

    builder.push_record([
        "ID", "Customer", "Phone", "Delivery", "Status", "Items", "Total", "Placed",
    ]);

    for order in orders {
        builder.push_record([
            order.id.map(|id| id.to_string()).unwrap_or_default(),
            order.customer_name.clone(),
            order.phone.clone(),
            order.fulfilment.as_str().to_string(),
            order
                .status
                .map(|status| status.name().to_string())
                .unwrap_or_default(),
            order.item_count().to_string(),
            format_price(&order.total_money()?),
            order
                .created_at
                .map(|created| created.strftime("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_default(),
        ]);
    }

    write_table(&mut out, builder, 6)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned_from: usize,
) -> Result<(), TableError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(right_aligned_from..), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::BRL};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{cart::CartItem, catalog::fixtures::MenuFixture};

    use super::*;

    #[test]
    fn menu_table_lists_every_item() -> TestResult {
        let items = MenuFixture::bundled()?;
        let mut out = Vec::new();

        write_menu(&mut out, &items)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Esfiha de Carne"));
        assert!(rendered.contains("R$ 7,90"));
        assert_eq!(rendered.matches("R$ ").count(), items.len());

        Ok(())
    }

    #[test]
    fn empty_cart_prints_caption_only() -> TestResult {
        let mut out = Vec::new();

        write_cart(&mut out, &Cart::new(BRL))?;

        assert_eq!(String::from_utf8(out)?, "Seu carrinho está vazio\n");

        Ok(())
    }

    #[test]
    fn cart_table_ends_with_total() -> TestResult {
        let mut cart = Cart::new(BRL);
        for _ in 0..2 {
            cart.add_item(CartItem {
                id: "1".to_string(),
                name: "Esfiha de Carne".to_string(),
                unit_price: Money::from_minor(790, BRL),
                category: "carne".to_string(),
                description: None,
            })?;
        }
        let mut out = Vec::new();

        write_cart(&mut out, &cart)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.starts_with("2 itens no carrinho\n"));
        assert!(rendered.contains("R$ 15,80"));
        assert!(rendered.ends_with("Total: R$ 15,80\n"));

        Ok(())
    }

    #[test]
    fn order_table_shows_status_and_total() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "id": 9,
            "nome_cliente": "Ana",
            "telefone": "11999990000",
            "forma_entrega": "entrega",
            "status": "a_caminho",
            "valor_total": 25.7,
            "data_criacao": "2025-03-01T19:02:11"
        }))?;
        let mut out = Vec::new();

        write_orders(&mut out, [&order])?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("out-for-delivery"));
        assert!(rendered.contains("R$ 25,70"));
        assert!(rendered.contains("01/03/2025 19:02"));

        Ok(())
    }

    #[test]
    fn invalid_menu_price_is_reported() {
        let item = MenuItem {
            id: 1,
            name: "Broken".to_string(),
            description: None,
            price: Decimal::NEGATIVE_ONE,
            category: None,
            available: true,
            image_url: None,
            created_at: None,
            updated_at: None,
        };

        assert!(matches!(
            write_menu(Vec::new(), [&item]),
            Err(TableError::Price(_))
        ));
    }
}
