//! Menu Fixtures
//!
//! YAML menus for browsing without a backend. Prices are written as
//! `"AMOUNT CURRENCY"` strings and must be in the store currency.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{MenuItem, MenuItemId},
    prices::{PriceError, STORE_CURRENCY, money_to_decimal, parse_price},
};

const DEFAULT_MENU: &str = include_str!("../../fixtures/menu.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price
    #[error("Invalid price for item {0}: {1}")]
    InvalidPrice(MenuItemId, #[source] PriceError),

    /// Price is not in the store currency
    #[error("Currency mismatch for item {id}: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Item with the offending price
        id: MenuItemId,
        /// Store currency code
        expected: &'static str,
        /// Currency code found in the fixture
        found: &'static str,
    },

    /// The same id appears twice
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(MenuItemId),
}

/// Wrapper for menu items in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Menu entries in display order
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Menu item id
    pub id: MenuItemId,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Price (e.g., "7.90 BRL")
    pub price: String,

    /// Optional category
    #[serde(default)]
    pub category: Option<String>,

    /// Availability, defaults to available
    #[serde(default)]
    pub available: Option<bool>,

    /// Optional image location
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<MenuItemFixture> for MenuItem {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        let price =
            parse_price(&fixture.price).map_err(|error| FixtureError::InvalidPrice(fixture.id, error))?;

        if price.currency() != STORE_CURRENCY {
            return Err(FixtureError::CurrencyMismatch {
                id: fixture.id,
                expected: STORE_CURRENCY.iso_alpha_code,
                found: price.currency().iso_alpha_code,
            });
        }

        Ok(MenuItem {
            id: fixture.id,
            name: fixture.name,
            description: fixture.description,
            price: money_to_decimal(&price),
            category: fixture.category,
            available: fixture.available.unwrap_or(true),
            image_url: fixture.image_url,
            created_at: None,
            updated_at: None,
        })
    }
}

impl MenuFixture {
    /// Parse a menu from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid or in the
    /// wrong currency, or an id is repeated.
    pub fn from_yaml(yaml: &str) -> Result<Vec<MenuItem>, FixtureError> {
        let fixture: MenuFixture = serde_norway::from_str(yaml)?;
        let mut seen = FxHashSet::default();

        fixture
            .items
            .into_iter()
            .map(|item| {
                if seen.insert(item.id) {
                    MenuItem::try_from(item)
                } else {
                    Err(FixtureError::DuplicateId(item.id))
                }
            })
            .collect()
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<MenuItem>, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// The menu bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn bundled() -> Result<Vec<MenuItem>, FixtureError> {
        Self::from_yaml(DEFAULT_MENU)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::catalog::categories;

    use super::*;

    #[test]
    fn bundled_menu_loads() -> TestResult {
        let items = MenuFixture::bundled()?;

        assert_eq!(items.len(), 9);
        assert_eq!(items.first().map(|item| item.price), Some(Decimal::new(790, 2)));
        assert_eq!(
            categories(&items),
            ["carne", "frango", "queijo", "vegetariana", "doce"]
        );

        Ok(())
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            "items:\n  - id: 7\n    name: Esfiha de Queijo\n    price: 6.50 BRL\n    available: false"
        )?;

        let items = MenuFixture::load(file.path())?;
        let item = items.first().ok_or("expected one item")?;

        assert_eq!(item.id, 7);
        assert_eq!(item.price, Decimal::new(650, 2));
        assert!(!item.available);

        Ok(())
    }

    #[test]
    fn rejects_foreign_currency() {
        let result = MenuFixture::from_yaml("items:\n  - id: 1\n    name: Pie\n    price: 2.99 GBP\n");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch { id: 1, found: "GBP", .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = MenuFixture::from_yaml(
            "items:\n  - id: 1\n    name: A\n    price: 1.00 BRL\n  - id: 1\n    name: B\n    price: 1.00 BRL\n",
        );

        assert!(matches!(result, Err(FixtureError::DuplicateId(1))));
    }

    #[test]
    fn rejects_malformed_price() {
        let result = MenuFixture::from_yaml("items:\n  - id: 1\n    name: A\n    price: cheap\n");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(1, _))));
    }
}
