//! Checkout
//!
//! Turns the cart into a plain-text order summary and hands it to the
//! restaurant through a `WhatsApp` click-to-chat link.

use mockall::automock;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{ApiError, MenuService},
    cart::{Cart, CartError, CartStore},
    catalog::MenuItemId,
    config::CheckoutConfig,
    prices::{PriceError, format_price},
};

const WHATSAPP_URL: &str = "https://wa.me/";

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Checkout Errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The destination is not a phone number.
    #[error("invalid destination number: {0:?}")]
    InvalidNumber(String),

    /// The channel refused the hand-off.
    #[error("failed to hand off order: {0}")]
    Channel(#[from] ChannelError),

    /// A menu item cannot be ordered right now.
    #[error("menu item {0} is not available")]
    Unavailable(MenuItemId),

    /// Backend lookup failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A menu price could not be converted.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The cart rejected an item.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Failure reported by a [`Channel`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ChannelError(pub String);

/// Destination for a composed order link, e.g. a browser or a terminal.
#[automock]
pub trait Channel {
    /// Deliver `link` to the customer.
    ///
    /// # Errors
    ///
    /// Returns a [`ChannelError`] if the link could not be delivered.
    fn open(&self, link: &str) -> Result<(), ChannelError>;
}

/// Composes order summaries and checkout links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutComposer {
    number: String,
    greeting: String,
}

impl CheckoutComposer {
    /// Create a composer for the configured destination.
    ///
    /// Spaces, dashes, parentheses and a leading `+` are stripped from the
    /// number.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidNumber`] if anything but digits remains,
    /// or nothing does.
    pub fn new(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        let number: String = config
            .whatsapp_number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
            .collect();

        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidNumber(config.whatsapp_number.clone()));
        }

        Ok(Self {
            number,
            greeting: config.greeting.clone(),
        })
    }

    /// Destination number, digits only.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Plain-text order summary.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn summary(&self, cart: &Cart) -> Result<String, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines: String = cart
            .iter()
            .map(|line| {
                format!(
                    "{}x {} - {}\n",
                    line.quantity(),
                    line.name(),
                    format_price(&line.subtotal())
                )
            })
            .collect();

        Ok(format!(
            "{}\n\n{lines}\nTotal: {}",
            self.greeting,
            format_price(&cart.total())
        ))
    }

    /// Click-to-chat link carrying the order summary.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn link(&self, cart: &Cart) -> Result<String, CheckoutError> {
        let summary = self.summary(cart)?;

        Ok(format!(
            "{WHATSAPP_URL}{}?text={}",
            self.number,
            utf8_percent_encode(&summary, URI_COMPONENT)
        ))
    }

    /// Hand the cart to `channel` and empty it once the hand-off succeeds.
    ///
    /// Returns the link that was handed off.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or the channel fails; the cart is
    /// left untouched in both cases.
    pub fn checkout(&self, store: &CartStore, channel: &dyn Channel) -> Result<String, CheckoutError> {
        let cart = store.snapshot();
        let link = self.link(&cart)?;

        channel
            .open(&link)
            .inspect_err(|error| warn!(%error, "checkout hand-off failed"))?;

        info!(
            lines = cart.len(),
            items = cart.line_count(),
            total = %format_price(&cart.total()),
            "checked out cart"
        );

        store.clear();

        Ok(link)
    }
}

/// Add one unit of each listed menu item to the cart, looking items up in
/// `menu`. Repeated ids add more units.
///
/// # Errors
///
/// Returns an error if a lookup fails or an item is unavailable. Items added
/// before the failing one stay in the cart.
pub async fn add_menu_items(
    menu: &dyn MenuService,
    store: &CartStore,
    ids: &[MenuItemId],
) -> Result<(), CheckoutError> {
    for &id in ids {
        let item = menu.get_item(id).await?;

        if !item.available {
            return Err(CheckoutError::Unavailable(id));
        }

        store.add_item(item.to_cart_item()?)?;
    }

    Ok(())
}

/// Cart panel caption, e.g. `3 itens no carrinho`.
pub fn cart_caption(line_count: u64) -> String {
    match line_count {
        0 => "Seu carrinho está vazio".to_string(),
        1 => "1 item no carrinho".to_string(),
        count => format!("{count} itens no carrinho"),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use mockall::predicate::{always, eq};
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::BRL};
    use testresult::TestResult;

    use crate::{
        api::menu::MockMenuService,
        cart::CartItem,
        catalog::MenuItem,
    };

    use super::*;

    fn item(id: &str, name: &str, price_minor: i64) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: Money::from_minor(price_minor, BRL),
            category: "carne".to_string(),
            description: None,
        }
    }

    fn composer() -> TestResult<CheckoutComposer> {
        Ok(CheckoutComposer::new(&CheckoutConfig::default())?)
    }

    fn filled_store() -> TestResult<CartStore> {
        let store = CartStore::new(BRL);
        store.add_item(item("1", "Esfiha de Carne", 790))?;
        store.add_item(item("1", "Esfiha de Carne", 790))?;
        store.add_item(item("2", "Esfiha de Queijo", 990))?;

        Ok(store)
    }

    fn menu_item(id: MenuItemId, available: bool) -> MenuItem {
        MenuItem {
            id,
            name: format!("Esfiha {id}"),
            description: None,
            price: Decimal::new(850, 2),
            category: Some("frango".to_string()),
            available,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn summary_lists_lines_and_total() -> TestResult {
        let store = filled_store()?;

        let summary = composer()?.summary(&store.snapshot())?;

        assert_eq!(
            summary,
            "Olá! Gostaria de fazer o seguinte pedido:\n\n\
             2x Esfiha de Carne - R$ 15,80\n\
             1x Esfiha de Queijo - R$ 9,90\n\
             \nTotal: R$ 25,70"
        );

        Ok(())
    }

    #[test]
    fn empty_cart_is_refused() -> TestResult {
        let result = composer()?.summary(&Cart::new(BRL));

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));

        Ok(())
    }

    #[test]
    fn link_encodes_like_uri_component() -> TestResult {
        let config = CheckoutConfig {
            whatsapp_number: "+55 (11) 98765-4321".to_string(),
            greeting: "Olá! (pedido)".to_string(),
        };
        let store = CartStore::new(BRL);
        store.add_item(item("1", "Carne & Queijo", 790))?;

        let link = CheckoutComposer::new(&config)?.link(&store.snapshot())?;

        assert_eq!(
            link,
            "https://wa.me/5511987654321?text=Ol%C3%A1!%20(pedido)%0A%0A\
             1x%20Carne%20%26%20Queijo%20-%20R%24%207%2C90%0A%0ATotal%3A%20R%24%207%2C90"
        );

        Ok(())
    }

    #[test]
    fn rejects_non_numeric_destination() {
        let config = CheckoutConfig {
            whatsapp_number: "call me".to_string(),
            ..CheckoutConfig::default()
        };

        assert!(matches!(
            CheckoutComposer::new(&config),
            Err(CheckoutError::InvalidNumber(_))
        ));
    }

    #[test]
    fn successful_hand_off_clears_cart() -> TestResult {
        let store = filled_store()?;
        let composer = composer()?;
        let expected = composer.link(&store.snapshot())?;

        let mut channel = MockChannel::new();
        channel
            .expect_open()
            .with(eq(expected.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let notified = Rc::new(Cell::new(false));
        let seen = Rc::clone(&notified);
        let _subscription = store.subscribe(move |cart| seen.set(cart.is_empty()));

        let link = composer.checkout(&store, &channel)?;

        assert_eq!(link, expected);
        assert!(store.is_empty());
        assert!(notified.get());

        Ok(())
    }

    #[test]
    fn failed_hand_off_keeps_cart() -> TestResult {
        let store = filled_store()?;
        let mut channel = MockChannel::new();
        channel
            .expect_open()
            .with(always())
            .returning(|_| Err(ChannelError("popup blocked".to_string())));

        let result = composer()?.checkout(&store, &channel);

        assert!(matches!(result, Err(CheckoutError::Channel(_))));
        assert_eq!(store.line_count(), 3);

        Ok(())
    }

    #[test]
    fn empty_cart_never_reaches_the_channel() -> TestResult {
        let mut channel = MockChannel::new();
        channel.expect_open().never();

        let result = composer()?.checkout(&CartStore::new(BRL), &channel);

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));

        Ok(())
    }

    #[tokio::test]
    async fn add_menu_items_looks_up_each_id() -> TestResult {
        let mut menu = MockMenuService::new();
        menu.expect_get_item()
            .returning(|id| Ok(menu_item(id, true)));

        let store = CartStore::new(BRL);

        add_menu_items(&menu, &store, &[3, 4, 3]).await?;

        assert_eq!(store.len(), 2);
        assert_eq!(store.line_count(), 3);
        assert_eq!(store.total(), Money::from_minor(2_550, BRL));

        Ok(())
    }

    #[tokio::test]
    async fn add_menu_items_stops_at_unavailable_item() -> TestResult {
        let mut menu = MockMenuService::new();
        menu.expect_get_item()
            .returning(|id| Ok(menu_item(id, id != 2)));

        let store = CartStore::new(BRL);

        let result = add_menu_items(&menu, &store, &[1, 2, 3]).await;

        assert!(matches!(result, Err(CheckoutError::Unavailable(2))));
        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[test]
    fn caption_pluralizes() {
        assert_eq!(cart_caption(0), "Seu carrinho está vazio");
        assert_eq!(cart_caption(1), "1 item no carrinho");
        assert_eq!(cart_caption(3), "3 itens no carrinho");
    }
}
