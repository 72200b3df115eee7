//! Order Status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orders::Order;

/// Unknown order status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

/// Lifecycle status of an order.
///
/// Serialized with the backend's wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created, waiting for the payment provider.
    #[serde(rename = "pagamento_pendente")]
    PaymentPending,

    /// Paid, waiting for the restaurant.
    #[serde(rename = "pendente")]
    Pending,

    /// Accepted by the restaurant.
    #[serde(rename = "aprovado")]
    Approved,

    /// Turned down by the restaurant.
    #[serde(rename = "recusado")]
    Refused,

    /// In the kitchen.
    #[serde(rename = "em_preparacao")]
    InPreparation,

    /// With the courier.
    #[serde(rename = "a_caminho")]
    OutForDelivery,

    /// Waiting at the counter.
    #[serde(rename = "pronto_retirada")]
    ReadyForPickup,

    /// Handed to the customer.
    #[serde(rename = "entregue")]
    Delivered,

    /// Canceled by the customer or the restaurant.
    #[serde(rename = "cancelado")]
    Canceled,

    /// The payment provider rejected the payment.
    #[serde(rename = "falha_pagamento")]
    PaymentFailed,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 10] = [
        Self::PaymentPending,
        Self::Pending,
        Self::Approved,
        Self::Refused,
        Self::InPreparation,
        Self::OutForDelivery,
        Self::ReadyForPickup,
        Self::Delivered,
        Self::Canceled,
        Self::PaymentFailed,
    ];

    const ADMIN_CHOICES: [OrderStatus; 8] = [
        Self::Pending,
        Self::Approved,
        Self::Refused,
        Self::InPreparation,
        Self::OutForDelivery,
        Self::ReadyForPickup,
        Self::Delivered,
        Self::Canceled,
    ];

    /// Backend wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PaymentPending => "pagamento_pendente",
            Self::Pending => "pendente",
            Self::Approved => "aprovado",
            Self::Refused => "recusado",
            Self::InPreparation => "em_preparacao",
            Self::OutForDelivery => "a_caminho",
            Self::ReadyForPickup => "pronto_retirada",
            Self::Delivered => "entregue",
            Self::Canceled => "cancelado",
            Self::PaymentFailed => "falha_pagamento",
        }
    }

    /// Kebab-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::PaymentPending => "payment-pending",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Refused => "refused",
            Self::InPreparation => "in-preparation",
            Self::OutForDelivery => "out-for-delivery",
            Self::ReadyForPickup => "ready-for-pickup",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::PaymentFailed => "payment-failed",
        }
    }

    /// No further admin transitions are offered from this status.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Canceled | Self::Refused | Self::PaymentFailed
        )
    }

    /// Statuses the admin panel offers as the next step.
    ///
    /// This only narrows the choices shown; the backend decides whether a
    /// transition is legal.
    pub fn admin_transitions(self) -> &'static [OrderStatus] {
        if self.is_final() {
            &[]
        } else {
            &Self::ADMIN_CHOICES
        }
    }

    /// The customer may still cancel an order in this status.
    pub fn customer_can_cancel(self) -> bool {
        matches!(self, Self::PaymentPending | Self::Pending | Self::Approved)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Accepts either the wire string or the kebab-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.name() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Status selection for the admin order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every order.
    #[default]
    All,

    /// Orders in one status.
    Only(OrderStatus),
}

impl StatusFilter {
    /// Check whether an order with `status` passes the filter.
    pub fn matches(self, status: Option<OrderStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(wanted),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" | "todos" => Ok(Self::All),
            status => status.parse().map(Self::Only),
        }
    }
}

/// Orders that pass `filter`, in the order given.
pub fn filter_by_status(orders: &[Order], filter: StatusFilter) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order.status))
        .collect()
}
