use crate::data::{Dish, MAX_RATING};
use serde::Serialize;

/// Shown instead of the dish grid when there is nothing to page through.
pub const NO_DISHES: &str = "No dishes available.";

/// Everything a dish card displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub rating: String,
}

impl From<&Dish> for DishCard {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            description: dish.description.clone(),
            image: dish.image.clone(),
            price: format_price(dish.price),
            rating: rating_label(dish.rating),
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// A zero rating gets five empty stars so it never reads like a missing one.
pub fn rating_label(rating: Option<u8>) -> String {
    match rating {
        Some(stars) => {
            let stars = stars.min(MAX_RATING) as usize;
            let empty = MAX_RATING as usize - stars;
            format!("{}{}", "★".repeat(stars), "☆".repeat(empty))
        }
        None => "No rating".to_string(),
    }
}

/// Badge text for the cart button, hidden while the cart is empty.
pub fn cart_badge(total_items: u32) -> Option<String> {
    (total_items > 0).then(|| total_items.to_string())
}

/// Snapshot handed to presentation after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub dishes: Vec<DishCard>,
    pub current_index: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Set when `dishes` is empty.
    pub fallback: Option<&'static str>,
    pub cart_count: u32,
    pub cart_badge: Option<String>,
}
