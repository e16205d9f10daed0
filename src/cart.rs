//! Session scoped cart state.
//!
//! A [`CartStore`] is owned by exactly one session. Presentation code reads it
//! through [`CartStore::cart`] and learns about changes by subscribing an
//! observer; it never mutates the items directly.

use crate::data::{CartItem, Dish};

/// The ordered cart contents, in first-add order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities, used for the cart badge.
    pub fn total_item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

pub type Observer = Box<dyn FnMut(&Cart) + Send>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<(Subscription, Observer)>,
    next_subscription: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put one unit of `dish` into the cart.
    ///
    /// A repeat add of the same id bumps its quantity by one, anything else is
    /// appended with a quantity of one. The dish is not checked against the
    /// catalog. Every observer is notified once before this returns.
    pub fn add_to_cart(&mut self, dish: Dish) -> &CartItem {
        let index = match self.cart.items.iter().position(|item| item.dish.id == dish.id) {
            Some(index) => {
                self.cart.items[index].quantity += 1;
                index
            }
            None => {
                self.cart.items.push(CartItem::first(dish));
                self.cart.items.len() - 1
            }
        };

        for (_, observer) in self.observers.iter_mut() {
            observer(&self.cart);
        }

        &self.cart.items[index]
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total_item_count(&self) -> u32 {
        self.cart.total_item_count()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&Cart) + Send + 'static) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((subscription, Box::new(observer)));
        subscription
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}
