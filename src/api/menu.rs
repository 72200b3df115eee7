//! Menu service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    catalog::{CategoryFilter, MenuItem, MenuItemId, MenuItemInput, MenuItemUpdate},
    validation::{validate_menu_item, validate_menu_item_update},
};

/// Menu service backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpMenuService {
    client: ApiClient,
}

impl HttpMenuService {
    /// Create a service sending requests through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuService for HttpMenuService {
    async fn list_items(&self, filter: CategoryFilter) -> Result<Vec<MenuItem>, ApiError> {
        let query: Vec<(&str, &str)> = filter
            .as_query()
            .map(|category| ("categoria", category))
            .into_iter()
            .collect();

        self.client.get("/esfihas", &query).await
    }

    async fn get_item(&self, id: MenuItemId) -> Result<MenuItem, ApiError> {
        self.client.get(&format!("/esfihas/{id}"), &[]).await
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.client.get("/esfihas/categorias", &[]).await
    }

    async fn create_item(&self, input: MenuItemInput) -> Result<MenuItem, ApiError> {
        let input = input.normalized();

        validate_menu_item(&input)?;

        let created: MenuItem = self.client.post("/esfihas/admin", &input).await?;

        info!(id = created.id, name = %created.name, "created menu item");

        Ok(created)
    }

    async fn update_item(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, ApiError> {
        validate_menu_item_update(&update)?;

        let updated: MenuItem = self
            .client
            .put(&format!("/esfihas/admin/{id}"), &update)
            .await?;

        info!(id, "updated menu item");

        Ok(updated)
    }

    async fn delete_item(&self, id: MenuItemId) -> Result<(), ApiError> {
        self.client.delete(&format!("/esfihas/admin/{id}")).await?;

        info!(id, "deleted menu item");

        Ok(())
    }
}

/// Browsing and administration of the menu.
#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Menu items passing `filter`, filtered by the backend.
    async fn list_items(&self, filter: CategoryFilter) -> Result<Vec<MenuItem>, ApiError>;

    /// A single menu item.
    async fn get_item(&self, id: MenuItemId) -> Result<MenuItem, ApiError>;

    /// Category labels known to the backend.
    async fn categories(&self) -> Result<Vec<String>, ApiError>;

    /// Create a menu item after validating the form.
    async fn create_item(&self, input: MenuItemInput) -> Result<MenuItem, ApiError>;

    /// Update the fields set in `update`.
    async fn update_item(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, ApiError>;

    /// Delete a menu item.
    async fn delete_item(&self, id: MenuItemId) -> Result<(), ApiError>;
}
