//! API
//!
//! Typed access to the restaurant backend. [`ApiClient`] owns the HTTP
//! plumbing; the services translate method calls into requests for menu
//! items, orders and accounts.

use std::{fmt, sync::Arc};

use crate::config::ApiConfig;

pub mod accounts;
mod client;
mod errors;
mod fixture;
pub mod menu;
pub mod orders;

pub use accounts::{AccountService, HttpAccountService};
pub use client::ApiClient;
pub use errors::ApiError;
pub use fixture::FixtureMenuService;
pub use menu::{HttpMenuService, MenuService};
pub use orders::{HttpOrdersService, OrdersService};

/// Services for one backend, sharing a client and its session token.
#[derive(Clone)]
pub struct ApiContext {
    /// Menu items.
    pub menu: Arc<dyn MenuService>,

    /// Orders.
    pub orders: Arc<dyn OrdersService>,

    /// Accounts.
    pub accounts: Arc<dyn AccountService>,
}

impl ApiContext {
    /// Build every service on top of `client`.
    pub fn new(client: &ApiClient) -> Self {
        Self {
            menu: Arc::new(HttpMenuService::new(client.clone())),
            orders: Arc::new(HttpOrdersService::new(client.clone())),
            accounts: Arc::new(HttpAccountService::new(client.clone())),
        }
    }

    /// Build a client from `config` and every service on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be created.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::new(&ApiClient::new(config)?))
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext").finish_non_exhaustive()
    }
}
