//! Storefront scenarios: catalog to cart to checkout.

use std::{cell::RefCell, rc::Rc};

use esfiharia::{
    cart::{CartItem, CartLine, CartStore},
    catalog::{CategoryFilter, filter_by_category, fixtures::MenuFixture},
    checkout::{CheckoutComposer, MockChannel},
    config::CheckoutConfig,
    orders::{CustomerDetails, OrderDraft},
    prices::{STORE_CURRENCY, format_price},
};
use rusty_money::{Money, iso::BRL};
use testresult::TestResult;

fn item(id: &str, price_minor: i64) -> CartItem {
    CartItem {
        id: id.to_string(),
        name: format!("Esfiha {id}"),
        unit_price: Money::from_minor(price_minor, BRL),
        category: "carne".to_string(),
        description: None,
    }
}

#[test]
fn two_of_a_and_one_of_b() -> TestResult {
    let store = CartStore::new(BRL);

    store.add_item(item("A", 790))?;
    store.add_item(item("A", 790))?;
    store.add_item(item("B", 990))?;

    assert_eq!(store.line_count(), 3);
    assert_eq!(store.total(), Money::from_minor(2_570, BRL));
    assert_eq!(format_price(&store.total()), "R$ 25,70");

    Ok(())
}

#[test]
fn add_set_remove_leaves_nothing() -> TestResult {
    let store = CartStore::new(BRL);

    store.add_item(item("A", 790))?;
    store.set_quantity("A", 5);
    assert_eq!(store.total(), Money::from_minor(3_950, BRL));

    store.remove_item("A");

    assert!(store.line("A").is_none());
    assert_eq!(store.total(), Money::from_minor(0, BRL));

    Ok(())
}

#[test]
fn n_adds_give_quantity_n() -> TestResult {
    for n in 1..=12_u32 {
        let store = CartStore::new(BRL);

        for _ in 0..n {
            store.add_item(item("A", 850))?;
        }

        assert_eq!(store.line("A").as_ref().map(CartLine::quantity), Some(n));
        assert_eq!(store.total(), Money::from_minor(850 * i64::from(n), BRL));
    }

    Ok(())
}

#[test]
fn remove_then_add_starts_fresh() -> TestResult {
    let store = CartStore::new(BRL);

    store.add_item(item("A", 790))?;
    store.add_item(item("A", 790))?;
    store.remove_item("A");
    store.add_item(item("A", 790))?;

    assert_eq!(store.line("A").as_ref().map(CartLine::quantity), Some(1));

    Ok(())
}

#[test]
fn clear_resets_aggregates() -> TestResult {
    let store = CartStore::new(BRL);

    store.add_item(item("A", 790))?;
    store.add_item(item("B", 990))?;
    store.clear();

    assert!(store.lines().is_empty());
    assert_eq!(store.line_count(), 0);
    assert_eq!(store.total(), Money::from_minor(0, BRL));

    Ok(())
}

#[test]
fn every_surface_sees_the_same_cart() -> TestResult {
    let store = CartStore::new(STORE_CURRENCY);
    let catalog = store.clone();
    let panel = store.clone();

    let badge = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&badge);
    let _subscription = panel.subscribe(move |cart| seen.borrow_mut().push(cart.line_count()));

    let menu = MenuFixture::bundled()?;
    for entry in filter_by_category(&menu, &CategoryFilter::Only("carne".to_string())) {
        catalog.add_item(entry.to_cart_item()?)?;
    }
    panel.increment("1");
    panel.decrement("2");

    assert_eq!(*badge.borrow(), [1, 2, 3, 2]);
    assert_eq!(store.lines().len(), 1);
    assert_eq!(format_price(&store.total()), "R$ 15,80");

    Ok(())
}

#[test]
fn checkout_then_order_draft_from_same_cart() -> TestResult {
    let store = CartStore::default();
    let menu = MenuFixture::bundled()?;

    for entry in menu.iter().filter(|entry| entry.id == 1 || entry.id == 5) {
        store.add_item(entry.to_cart_item()?)?;
    }
    store.increment("1");

    let draft = OrderDraft::from_cart(
        &store.snapshot(),
        CustomerDetails {
            name: "Ana".to_string(),
            phone: "11999990000".to_string(),
            ..CustomerDetails::default()
        },
    )?;

    assert_eq!(draft.input().items.len(), 2);
    assert_eq!(format_price(&draft.total()), "R$ 25,70");

    let mut channel = MockChannel::new();
    channel
        .expect_open()
        .withf(|link| link.starts_with("https://wa.me/5511987654321?text="))
        .times(1)
        .returning(|_| Ok(()));

    CheckoutComposer::new(&CheckoutConfig::default())?.checkout(&store, &channel)?;

    assert!(store.is_empty());

    Ok(())
}
