//! Read-only menu service over a fixture, for browsing without a backend.

use async_trait::async_trait;

use crate::{
    api::{ApiError, MenuService},
    catalog::{
        CategoryFilter, MenuItem, MenuItemId, MenuItemInput, MenuItemUpdate, categories,
        filter_by_category,
        fixtures::{FixtureError, MenuFixture},
    },
};

/// Menu service answering from an in-memory menu.
///
/// Lookups behave like the backend's, including 404s for unknown ids. Admin
/// operations are rejected with a 405.
#[derive(Debug, Clone, Default)]
pub struct FixtureMenuService {
    items: Vec<MenuItem>,
}

impl FixtureMenuService {
    /// Serve `items`.
    #[must_use]
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Serve the menu bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn bundled() -> Result<Self, FixtureError> {
        Ok(Self::new(MenuFixture::bundled()?))
    }
}

#[async_trait]
impl MenuService for FixtureMenuService {
    async fn list_items(&self, filter: CategoryFilter) -> Result<Vec<MenuItem>, ApiError> {
        Ok(filter_by_category(&self.items, &filter)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn get_item(&self, id: MenuItemId) -> Result<MenuItem, ApiError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: format!("menu item {id} not found"),
            })
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        Ok(categories(&self.items)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    async fn create_item(&self, _input: MenuItemInput) -> Result<MenuItem, ApiError> {
        Err(read_only())
    }

    async fn update_item(&self, _id: MenuItemId, _update: MenuItemUpdate) -> Result<MenuItem, ApiError> {
        Err(read_only())
    }

    async fn delete_item(&self, _id: MenuItemId) -> Result<(), ApiError> {
        Err(read_only())
    }
}

fn read_only() -> ApiError {
    ApiError::Status {
        status: 405,
        message: "menu fixtures are read-only".to_string(),
    }
}
