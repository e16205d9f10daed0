use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Highest value a dish rating can take.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct Dish {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub name: String,
    #[builder(setter(into), default)]
    #[serde(default)]
    pub description: String,
    /// path to image, or an external url
    #[builder(setter(into), default)]
    #[serde(default)]
    pub image: String,
    pub price: f64,
    #[builder(setter(strip_option), default)]
    #[serde(default)]
    pub rating: Option<u8>,
}

/// A dish together with how many times it was put into the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub dish: Dish,
    pub quantity: u32,
}

impl CartItem {
    pub(crate) fn first(dish: Dish) -> Self {
        Self { dish, quantity: 1 }
    }

    pub fn id(&self) -> &str {
        &self.dish.id
    }
}
