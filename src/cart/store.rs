//! Cart Store

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::prices::STORE_CURRENCY;

use super::{Cart, CartError, CartItem, CartLine};

new_key_type! {
    /// Listener Key
    struct ListenerKey;
}

type Listener = Rc<dyn Fn(&Cart)>;

struct Shared {
    cart: RefCell<Cart>,
    listeners: RefCell<SlotMap<ListenerKey, Listener>>,
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Shared handle to the session cart.
///
/// Clones point at the same cart, so the catalog, the cart panel and checkout
/// can each hold one and always agree on its contents. Every state-changing
/// call notifies all subscribers before it returns; calls that leave the cart
/// as it was do not.
///
/// The store is single-threaded by construction (`!Send`).
#[derive(Debug, Clone)]
pub struct CartStore {
    shared: Rc<Shared>,
}

impl CartStore {
    /// Create a store holding an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            shared: Rc::new(Shared {
                cart: RefCell::new(Cart::new(currency)),
                listeners: RefCell::new(SlotMap::with_key()),
            }),
        }
    }

    /// Add one unit of `item`, see [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the item is rejected; the cart is unchanged
    /// and nobody is notified.
    pub fn add_item(&self, item: CartItem) -> Result<(), CartError> {
        let id = item.id.clone();

        self.shared.cart.borrow_mut().add_item(item)?;

        debug!(item = %id, "added item to cart");

        self.notify();

        Ok(())
    }

    /// Remove the line with `id`, if any.
    pub fn remove_item(&self, id: &str) {
        if self.mutate(|cart| cart.remove_item(id)) {
            debug!(item = %id, "removed item from cart");
        }
    }

    /// Set the quantity of an existing line, see [`Cart::set_quantity`].
    pub fn set_quantity(&self, id: &str, quantity: i64) {
        if self.mutate(|cart| cart.set_quantity(id, quantity)) {
            debug!(item = %id, quantity, "set cart item quantity");
        }
    }

    /// Add one unit to an existing line.
    pub fn increment(&self, id: &str) {
        if self.mutate(|cart| cart.increment(id)) {
            debug!(item = %id, "incremented cart item");
        }
    }

    /// Take one unit off an existing line.
    pub fn decrement(&self, id: &str) {
        if self.mutate(|cart| cart.decrement(id)) {
            debug!(item = %id, "decremented cart item");
        }
    }

    /// Empty the cart.
    pub fn clear(&self) {
        if self.mutate(Cart::clear) {
            debug!("cleared cart");
        }
    }

    /// Current total.
    pub fn total(&self) -> Money<'static, Currency> {
        self.shared.cart.borrow().total()
    }

    /// Current sum of quantities.
    pub fn line_count(&self) -> u64 {
        self.shared.cart.borrow().line_count()
    }

    /// Copy of the line with `id`.
    pub fn line(&self, id: &str) -> Option<CartLine> {
        self.shared.cart.borrow().line(id).cloned()
    }

    /// Copy of every line in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.shared.cart.borrow().lines().to_vec()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.shared.cart.borrow().len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.shared.cart.borrow().is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.shared.cart.borrow().currency()
    }

    /// Copy of the whole cart.
    pub fn snapshot(&self) -> Cart {
        self.shared.cart.borrow().clone()
    }

    /// Register `listener` to be called with the cart after every change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&Cart) + 'static) -> Subscription {
        let key = self.shared.listeners.borrow_mut().insert(Rc::new(listener));

        Subscription {
            shared: Rc::downgrade(&self.shared),
            key,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    fn mutate(&self, apply: impl FnOnce(&mut Cart) -> bool) -> bool {
        let changed = {
            let mut cart = self.shared.cart.borrow_mut();
            apply(&mut *cart)
        };

        if changed {
            self.notify();
        }

        changed
    }

    // Listeners get a snapshot and no borrow is held while they run, so they
    // may read or mutate the store themselves.
    fn notify(&self) {
        let snapshot = self.snapshot();

        let listeners: Vec<Listener> = self.shared.listeners.borrow().values().cloned().collect();

        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(STORE_CURRENCY)
    }
}

/// Handle for a registered cart listener.
#[derive(Debug)]
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    shared: Weak<Shared>,
    key: ListenerKey,
}

impl Subscription {
    /// Stop receiving cart updates.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.listeners.borrow_mut().remove(self.key);
        }
    }
}
