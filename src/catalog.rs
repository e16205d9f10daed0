use crate::data::{Dish, MAX_RATING};
use anyhow::Context;
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};
use std::collections::HashSet;
use std::path::Path;

/// The fixed, ordered list of dishes offered for a session.
///
/// Order is significant: the pager walks the catalog in the order given here.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    pub fn new(dishes: Vec<Dish>) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        for dish in &dishes {
            if !seen.insert(dish.id.as_str()) {
                anyhow::bail!("duplicate dish id {}", dish.id);
            }
            if !dish.price.is_finite() || dish.price < 0.0 {
                anyhow::bail!("dish {} has invalid price {}", dish.id, dish.price);
            }
            if let Some(rating) = dish.rating {
                if rating > MAX_RATING {
                    anyhow::bail!("dish {} has rating {rating}, max is {MAX_RATING}", dish.id);
                }
            }
        }

        Ok(Self { dishes })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("fail to read catalog {}", path.display()))?;
        let dishes: Vec<Dish> = serde_json::from_str(&raw)
            .with_context(|| format!("fail to parse catalog {}", path.display()))?;
        Self::new(dishes).with_context(|| format!("invalid catalog {}", path.display()))
    }

    /// The menu served when no catalog file is configured.
    pub fn builtin() -> Self {
        let dish = |id: &str, name: &str, image: &str, description: &str, price: f64| Dish {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            price,
            rating: Some(5),
        };
        let pexels = |photo: &str| {
            format!("https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=200&h=200&fit=crop")
        };

        let dishes = vec![
            dish(
                "vegetable-fried-rice",
                "Delicious Vegetable Fried Rice",
                "/delicious-homemade-vegetable-fried-rice.jpg",
                "A vibrant plate of vegetable fried rice, featuring fluffy rice, scrambled eggs, and colorful veggies.",
                28.00,
            ),
            dish(
                "pasta",
                "Pasta",
                &pexels("1279330"),
                "Pasta is a type of food typically made from an unleavened dough.",
                35.00,
            ),
            dish(
                "french-fries",
                "French Fries",
                &pexels("1583884"),
                "Crispy golden french fries made from fresh potatoes.",
                55.00,
            ),
            dish(
                "chicken-shawarma",
                "Chicken Shawarma",
                &pexels("2474661"),
                "Delicious chicken shawarma with authentic Middle Eastern spices.",
                35.00,
            ),
            dish(
                "fish-curry",
                "Fish Curry",
                &pexels("725991"),
                "Aromatic fish curry with rich spices and coconut milk.",
                35.00,
            ),
        ];

        Self { dishes }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.id == id)
    }

    /// Fuzzy match dish names against `pattern`, best match first.
    pub fn search(&self, pattern: &str) -> Vec<&Dish> {
        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .dishes
            .iter()
            .filter_map(|dish| matcher.fuzzy_match(&dish.name, pattern).map(|score| (score, dish)))
            .collect::<Vec<_>>();
        // stable sort keeps catalog order between equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, dish)| dish).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DishBuilder;

    fn dish(id: &str) -> Dish {
        DishBuilder::default().id(id).name(id).price(1.5).build().unwrap()
    }

    #[test]
    fn builtin_has_the_five_house_dishes_in_order() {
        let catalog = Catalog::builtin();
        let ids = catalog.dishes().iter().map(|d| d.id.as_str()).collect::<Vec<_>>();
        assert_eq!(
            ids,
            ["vegetable-fried-rice", "pasta", "french-fries", "chicken-shawarma", "fish-curry"]
        );
        assert!(Catalog::new(catalog.dishes().to_vec()).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![dish("pasta"), dish("fries"), dish("pasta")]).unwrap_err();
        assert!(err.to_string().contains("duplicate dish id pasta"));
    }

    #[test]
    fn rejects_bad_price_and_rating() {
        let mut cheap = dish("pasta");
        cheap.price = -1.0;
        assert!(Catalog::new(vec![cheap]).is_err());

        let mut starry = dish("pasta");
        starry.rating = Some(6);
        assert!(Catalog::new(vec![starry]).is_err());

        let mut unrated = dish("pasta");
        unrated.rating = Some(0);
        assert!(Catalog::new(vec![unrated]).is_ok());
    }

    #[test]
    fn get_looks_up_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("fish-curry").map(|d| d.name.as_str()), Some("Fish Curry"));
        assert!(catalog.get("sushi").is_none());
    }

    #[test]
    fn search_matches_names() {
        let catalog = Catalog::builtin();
        let found = catalog.search("fries");
        assert_eq!(found.first().map(|d| d.id.as_str()), Some("french-fries"));
        assert!(catalog.search("zzzz").is_empty());
    }

    #[test]
    fn loads_json_with_missing_optional_fields() {
        let path = std::env::temp_dir().join(format!("bites-catalog-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"id":"pasta","name":"Pasta","price":35.0,"rating":4},{"id":"tea","name":"Tea","price":2.0}]"#,
        )
        .unwrap();

        let catalog = Catalog::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("pasta").unwrap().rating, Some(4));
        assert_eq!(catalog.get("tea").unwrap().rating, None);
        assert_eq!(catalog.get("tea").unwrap().image, "");
    }
}
