//! Prices
//!
//! Money amounts are carried as [`Money`] in minor units of their currency. The
//! storefront prices everything in BRL and renders amounts the way a pt-BR
//! locale does (`R$ 1.234,56`).

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Formatter, Money, Params, Position,
    iso::{self, BRL, Currency},
};
use thiserror::Error;

/// Currency used by the storefront unless configured otherwise.
pub const STORE_CURRENCY: &Currency = BRL;

/// Errors that can occur while building or parsing prices.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Amount is below zero.
    #[error("price must not be negative, got {0}")]
    Negative(Decimal),

    /// Amount does not fit in minor units.
    #[error("price {0} is out of range")]
    OutOfRange(Decimal),

    /// Input is not in the `AMOUNT CURRENCY` format.
    #[error("invalid price format: {0}")]
    InvalidFormat(String),

    /// Currency code is not one the store understands.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Convert a decimal amount into money, rounding to the currency's minor unit
/// with halves rounded away from zero.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::OutOfRange`]: the amount cannot be represented in minor units.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    let minor_units = amount
        .checked_mul(minor_unit_factor(currency))
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or(PriceError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Convert money back into a decimal amount in major units.
pub fn money_to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Parse a price string (e.g. `"7.90 BRL"`) into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, the
/// amount is not a decimal, is negative, or the currency code is unknown.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidFormat(format!(
            "expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidFormat(s.to_string()))?;

    let currency =
        find_currency(code).ok_or_else(|| PriceError::UnknownCurrency(code.to_string()))?;

    money_from_decimal(amount, currency)
}

/// Price of `quantity` units at `unit_price`.
///
/// Clamps at `i64::MAX` minor units instead of overflowing.
pub fn line_subtotal(unit_price: &Money<'static, Currency>, quantity: u32) -> Money<'static, Currency> {
    Money::from_minor(
        unit_price.to_minor_units().saturating_mul(i64::from(quantity)),
        unit_price.currency(),
    )
}

/// Separators and layout of a pt-BR price, e.g. `-R$ 1.234,56`.
const PT_BR: Params<'static> = Params {
    digit_separator: '.',
    exponent_separator: ',',
    separator_pattern: &[3, 3, 3, 3, 3, 3],
    positions: &[Position::Sign, Position::Symbol, Position::Space, Position::Amount],
    rounding: None,
    symbol: None,
    code: None,
};

/// Format money for display, e.g. `R$ 1.234,56`.
pub fn format_price(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();

    Formatter::money(
        money,
        Params {
            rounding: Some(currency.exponent),
            symbol: Some(currency.symbol),
            ..PT_BR
        },
    )
}

/// Format a minor-unit amount for display in the given currency.
pub fn format_minor(minor_units: i64, currency: &Currency) -> String {
    format_price(&Money::from_minor(minor_units, currency))
}

fn minor_unit_factor(currency: &Currency) -> Decimal {
    Decimal::from(10_u64.pow(currency.exponent))
}

/// Look up one of the currencies the store accepts by ISO code.
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    iso::find(code).filter(|currency| matches!(currency.iso_alpha_code, "BRL" | "USD" | "EUR" | "GBP"))
}
