//! Catalog
//!
//! Menu items as the backend serves them, plus the storefront-side helpers for
//! browsing them: category filtering, the category list and conversion into a
//! cart payload.

use std::{convert::Infallible, fmt, str::FromStr};

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartItem,
    prices::{PriceError, STORE_CURRENCY, money_from_decimal},
};

pub mod fixtures;

/// Menu item identifier assigned by the backend.
pub type MenuItemId = u64;

/// Menu item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Backend identifier.
    pub id: MenuItemId,

    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,

    /// Optional description.
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,

    /// Unit price in major units of the store currency.
    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Optional category label.
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,

    /// Whether the item can currently be ordered.
    #[serde(rename = "disponivel", default = "available_by_default")]
    pub available: bool,

    /// Optional image location.
    #[serde(rename = "imagem_url", default)]
    pub image_url: Option<String>,

    /// Creation time, as recorded by the backend.
    #[serde(rename = "data_criacao", default)]
    pub created_at: Option<DateTime>,

    /// Last update time, as recorded by the backend.
    #[serde(rename = "data_atualizacao", default)]
    pub updated_at: Option<DateTime>,
}

impl MenuItem {
    /// Build the payload for adding one unit of this item to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the price is negative or out of range.
    pub fn to_cart_item(&self) -> Result<CartItem, PriceError> {
        Ok(CartItem {
            id: self.id.to_string(),
            name: self.name.clone(),
            unit_price: money_from_decimal(self.price, STORE_CURRENCY)?,
            category: self.category.clone().unwrap_or_default(),
            description: self.description.clone(),
        })
    }
}

fn available_by_default() -> bool {
    true
}

/// Menu item form data for creating or replacing an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemInput {
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,

    /// Optional description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price in major units.
    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Optional category label.
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Whether the item can be ordered.
    #[serde(rename = "disponivel")]
    pub available: bool,

    /// Optional image location.
    #[serde(rename = "imagem_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MenuItemInput {
    /// Blank optional text fields become `None`, the way the admin form submits them.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.description = non_blank(self.description);
        self.category = non_blank(self.category);
        self.image_url = non_blank(self.image_url);
        self
    }
}

impl From<&MenuItem> for MenuItemInput {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: item.category.clone(),
            available: item.available,
            image_url: item.image_url.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Partial update for a menu item; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MenuItemUpdate {
    /// New display name.
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New unit price.
    #[serde(
        rename = "preco",
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,

    /// New category label.
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// New availability.
    #[serde(rename = "disponivel", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,

    /// New image location.
    #[serde(rename = "imagem_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MenuItemUpdate {
    /// Update that only flips availability.
    pub fn availability(available: bool) -> Self {
        Self {
            available: Some(available),
            ..Self::default()
        }
    }
}

impl From<MenuItemInput> for MenuItemUpdate {
    fn from(input: MenuItemInput) -> Self {
        Self {
            name: Some(input.name),
            description: input.description,
            price: Some(input.price),
            category: input.category,
            available: Some(input.available),
            image_url: input.image_url,
        }
    }
}

/// Category selection for browsing the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,

    /// A single category.
    Only(String),
}

impl CategoryFilter {
    /// Check whether an item with `category` passes the filter.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    /// Category to send to the backend, if any.
    pub fn as_query(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" | "todos" => Self::All,
            category => Self::Only(category.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// Items that pass `filter`, in menu order.
pub fn filter_by_category<'a>(items: &'a [MenuItem], filter: &CategoryFilter) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| filter.matches(item.category.as_deref()))
        .collect()
}

/// Items that can currently be ordered, in menu order.
pub fn available(items: &[MenuItem]) -> impl Iterator<Item = &MenuItem> {
    items.iter().filter(|item| item.available)
}

/// Distinct categories in order of first appearance.
pub fn categories(items: &[MenuItem]) -> Vec<&str> {
    let mut seen = FxHashSet::default();

    items
        .iter()
        .filter_map(|item| item.category.as_deref())
        .filter(|category| seen.insert(*category))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::BRL};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn menu_item(id: MenuItemId, category: Option<&str>) -> MenuItem {
        MenuItem {
            id,
            name: format!("Esfiha {id}"),
            description: None,
            price: Decimal::new(790, 2),
            category: category.map(str::to_string),
            available: true,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn deserializes_backend_item() -> TestResult {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 3,
            "nome": "Esfiha de Frango",
            "descricao": "Frango desfiado",
            "preco": 8.5,
            "categoria": "frango",
            "disponivel": false,
            "imagem_url": null,
            "data_criacao": "2025-03-01T12:30:00.123456",
            "data_atualizacao": null
        }))?;

        assert_eq!(item.id, 3);
        assert_eq!(item.price, Decimal::new(85, 1));
        assert_eq!(item.category.as_deref(), Some("frango"));
        assert!(!item.available);
        assert!(item.created_at.is_some());

        Ok(())
    }

    #[test]
    fn missing_optional_fields_use_defaults() -> TestResult {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 1,
            "nome": "Esfiha",
            "preco": 7.9
        }))?;

        assert!(item.available);
        assert!(item.category.is_none());

        Ok(())
    }

    #[test]
    fn input_skips_absent_optionals() -> TestResult {
        let input = MenuItemInput {
            name: "Quatro Queijos".to_string(),
            description: Some("  ".to_string()),
            price: Decimal::new(990, 2),
            category: None,
            available: true,
            image_url: None,
        }
        .normalized();

        assert_eq!(
            serde_json::to_value(&input)?,
            json!({ "nome": "Quatro Queijos", "preco": 9.9, "disponivel": true })
        );

        Ok(())
    }

    #[test]
    fn availability_update_sends_only_the_flag() -> TestResult {
        assert_eq!(
            serde_json::to_value(MenuItemUpdate::availability(false))?,
            json!({ "disponivel": false })
        );

        Ok(())
    }

    #[test]
    fn to_cart_item_snapshots_price_and_labels() -> TestResult {
        let item = menu_item(1, None);

        let cart_item = item.to_cart_item()?;

        assert_eq!(cart_item.id, "1");
        assert_eq!(cart_item.unit_price, Money::from_minor(790, BRL));
        assert_eq!(cart_item.category, "");

        Ok(())
    }

    #[test]
    fn to_cart_item_rejects_negative_price() {
        let mut item = menu_item(1, None);
        item.price = Decimal::new(-1, 0);

        assert!(matches!(item.to_cart_item(), Err(PriceError::Negative(_))));
    }

    #[test]
    fn filter_by_category_keeps_menu_order() {
        let items = [
            menu_item(1, Some("carne")),
            menu_item(2, Some("doce")),
            menu_item(3, Some("carne")),
            menu_item(4, None),
        ];

        let ids: Vec<MenuItemId> = filter_by_category(&items, &CategoryFilter::Only("carne".into()))
            .iter()
            .map(|item| item.id)
            .collect();

        assert_eq!(ids, [1, 3]);
        assert_eq!(filter_by_category(&items, &CategoryFilter::All).len(), 4);
    }

    #[test]
    fn category_filter_parses_all_aliases() {
        assert_eq!("todos".parse(), Ok(CategoryFilter::All));
        assert_eq!("".parse(), Ok(CategoryFilter::All));
        assert_eq!("doce".parse(), Ok(CategoryFilter::Only("doce".to_string())));
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let items = [
            menu_item(1, Some("doce")),
            menu_item(2, Some("carne")),
            menu_item(3, None),
            menu_item(4, Some("doce")),
        ];

        assert_eq!(categories(&items), ["doce", "carne"]);
    }

    #[test]
    fn available_skips_disabled_items() {
        let mut disabled = menu_item(2, None);
        disabled.available = false;
        let items = [menu_item(1, None), disabled];

        let ids: Vec<MenuItemId> = available(&items).map(|item| item.id).collect();

        assert_eq!(ids, [1]);
    }
}
