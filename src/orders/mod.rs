//! Orders
//!
//! Orders as the backend stores them, the payload for placing one and the
//! helpers the admin panel uses to list and move them along.

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::MenuItemId,
    prices::{PriceError, STORE_CURRENCY, money_from_decimal},
};

mod draft;
mod status;

pub use draft::{CustomerDetails, OrderDraft};
pub use status::{OrderStatus, StatusFilter, UnknownStatus, filter_by_status};

/// Order identifier assigned by the backend.
pub type OrderId = u64;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fulfilment {
    /// Collected at the counter.
    #[default]
    #[serde(rename = "retirada")]
    Pickup,

    /// Delivered to the customer's address.
    #[serde(rename = "entrega")]
    Delivery,
}

impl Fulfilment {
    /// Backend wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "retirada",
            Self::Delivery => "entrega",
        }
    }
}

/// Order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Backend identifier.
    #[serde(default)]
    pub id: Option<OrderId>,

    /// Account that placed the order.
    #[serde(rename = "cliente_id", default)]
    pub customer_id: Option<u64>,

    /// Customer name.
    #[serde(rename = "nome_cliente")]
    pub customer_name: String,

    /// Contact phone.
    #[serde(rename = "telefone")]
    pub phone: String,

    /// Delivery address.
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,

    /// Pickup or delivery.
    #[serde(rename = "forma_entrega", default)]
    pub fulfilment: Fulfilment,

    /// Free-form notes.
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,

    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<OrderStatus>,

    /// Total in major units, computed by the backend.
    #[serde(
        rename = "valor_total",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub total: Option<Decimal>,

    /// Creation time.
    #[serde(rename = "data_criacao", default)]
    pub created_at: Option<DateTime>,

    /// Last update time.
    #[serde(rename = "data_atualizacao", default)]
    pub updated_at: Option<DateTime>,

    /// Payment provider reference.
    #[serde(rename = "stripe_payment_intent_id", default)]
    pub payment_intent_id: Option<String>,

    /// Ordered items.
    #[serde(rename = "itens", default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Order total as money; a missing total counts as zero.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the backend total is negative or out of range.
    pub fn total_money(&self) -> Result<Money<'static, Currency>, PriceError> {
        money_from_decimal(self.total.unwrap_or_default(), STORE_CURRENCY)
    }

    /// Sum of item quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// One line of a stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Backend identifier.
    #[serde(default)]
    pub id: Option<u64>,

    /// Owning order.
    #[serde(rename = "pedido_id", default)]
    pub order_id: Option<OrderId>,

    /// Ordered menu item.
    #[serde(rename = "esfiha_id")]
    pub menu_item_id: MenuItemId,

    /// Menu item name at the time of ordering.
    #[serde(rename = "esfiha", default)]
    pub menu_item_name: Option<String>,

    /// Ordered quantity.
    #[serde(rename = "quantidade")]
    pub quantity: u32,

    /// Unit price charged.
    #[serde(
        rename = "preco_unitario",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub unit_price: Option<Decimal>,

    /// Line subtotal.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,

    /// Line notes.
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

/// Payload for placing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    /// Customer name.
    #[serde(rename = "nome_cliente")]
    pub customer_name: String,

    /// Contact phone.
    #[serde(rename = "telefone")]
    pub phone: String,

    /// Delivery address.
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,

    /// Pickup or delivery.
    #[serde(rename = "forma_entrega")]
    pub fulfilment: Fulfilment,

    /// Free-form notes.
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,

    /// Requested items.
    #[serde(rename = "itens")]
    pub items: Vec<OrderItemInput>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Menu item to order.
    #[serde(rename = "esfiha_id")]
    pub menu_item_id: MenuItemId,

    /// Quantity to order.
    #[serde(rename = "quantidade")]
    pub quantity: u32,

    /// Line notes.
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

/// Payment intent created alongside a new order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentIntent {
    /// Secret handed to the payment provider's client library.
    pub client_secret: String,

    /// Order created for this payment.
    #[serde(rename = "pedido_id")]
    pub order_id: OrderId,

    /// Amount to be charged, in major units.
    #[serde(rename = "valor_total", with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
