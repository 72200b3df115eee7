//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    orders::{Order, OrderId, OrderInput, OrderStatus, PaymentIntent},
    validation::validate_order,
};

#[derive(Debug, Serialize)]
struct StatusChange {
    status: OrderStatus,
}

/// Orders service backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    /// Create a service sending requests through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_payment_intent(&self, order: OrderInput) -> Result<PaymentIntent, ApiError> {
        validate_order(&order)?;

        let intent: PaymentIntent = self
            .client
            .post("/pedidos/criar-intent-pagamento", &order)
            .await?;

        info!(order = intent.order_id, total = %intent.total, "created payment intent");

        Ok(intent)
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/pedidos/me", &[]).await
    }

    async fn my_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.client.get(&format!("/pedidos/me/{id}"), &[]).await
    }

    async fn cancel_my_order(&self, id: OrderId) -> Result<Order, ApiError> {
        let order: Order = self
            .client
            .patch::<(), _>(&format!("/pedidos/me/cancelar/{id}"), None)
            .await?;

        info!(order = id, "canceled order");

        Ok(order)
    }

    async fn admin_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/pedidos/admin", &[]).await
    }

    async fn admin_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.client.get(&format!("/pedidos/admin/{id}"), &[]).await
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, ApiError> {
        let order: Order = self
            .client
            .patch(
                &format!("/pedidos/admin/atualizar-status/{id}"),
                Some(&StatusChange { status }),
            )
            .await?;

        info!(order = id, status = status.as_str(), "updated order status");

        Ok(order)
    }
}

/// Placing, tracking and managing orders.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate and place an order, returning the payment intent for it.
    async fn create_payment_intent(&self, order: OrderInput) -> Result<PaymentIntent, ApiError>;

    /// Orders placed by the signed-in customer.
    async fn my_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// One order placed by the signed-in customer.
    async fn my_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Cancel one of the signed-in customer's orders.
    async fn cancel_my_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Every order (admin).
    async fn admin_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// One order (admin).
    async fn admin_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Move an order to `status` (admin). The backend decides whether the
    /// transition is allowed.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, ApiError>;
}
