//! One visitor's cart and gallery over the shared catalog.

use crate::{
    cart::{Cart, CartStore, Subscription},
    catalog::Catalog,
    data::CartItem,
    pager::{DishPager, NavKey},
    view::{cart_badge, DishCard, PageView, NO_DISHES},
};
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Debug)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    cart: CartStore,
    pager: DishPager,
}

impl Storefront {
    pub fn new(catalog: Arc<Catalog>, page_size: NonZeroUsize) -> Self {
        Self {
            pager: DishPager::new(catalog.clone(), page_size),
            cart: CartStore::new(),
            catalog,
        }
    }

    /// Resolve `id` in the catalog and add it. Unknown ids add nothing.
    pub fn add_to_cart_by_id(&mut self, id: &str) -> Option<&CartItem> {
        let Some(dish) = self.catalog.get(id) else {
            tracing::warn!("ignore unknown dish {id}");
            return None;
        };

        let item = self.cart.add_to_cart(dish.clone());
        tracing::info!("added {id} to cart");
        Some(item)
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn previous(&mut self) {
        self.pager.previous();
    }

    pub fn handle_key(&mut self, key: NavKey) {
        self.pager.handle_key(key);
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&Cart) + Send + 'static) -> Subscription {
        self.cart.subscribe(observer)
    }

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn pager(&self) -> &DishPager {
        &self.pager
    }

    pub fn view(&self) -> PageView {
        let dishes = self
            .pager
            .visible_slice()
            .iter()
            .map(DishCard::from)
            .collect::<Vec<_>>();
        let cart_count = self.cart.total_item_count();

        PageView {
            fallback: dishes.is_empty().then_some(NO_DISHES),
            dishes,
            current_index: self.pager.current_index(),
            can_go_previous: self.pager.can_go_previous(),
            can_go_next: self.pager.can_go_next(),
            cart_count,
            cart_badge: cart_badge(cart_count),
        }
    }
}
