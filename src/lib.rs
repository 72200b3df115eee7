//! Esfiharia
//!
//! Client library for a restaurant ordering site: a shared session cart with
//! derived totals, checkout through a `WhatsApp` link and a typed client for
//! the ordering backend's menu, order and account endpoints.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod observability;
pub mod orders;
pub mod prices;
pub mod tables;
pub mod validation;
