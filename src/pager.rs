//! Fixed size sliding window over the catalog.

use crate::{catalog::Catalog, data::Dish};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

/// Number of dishes shown at once unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(size) => size,
    None => unreachable!(),
};

/// Keys the gallery reacts to while it has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

impl FromStr for NavKey {
    type Err = ();

    /// Parses DOM style key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowLeft" => Ok(Self::ArrowLeft),
            "ArrowRight" => Ok(Self::ArrowRight),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DishPager {
    catalog: Arc<Catalog>,
    page_size: NonZeroUsize,
    current_index: usize,
}

impl DishPager {
    pub fn new(catalog: Arc<Catalog>, page_size: NonZeroUsize) -> Self {
        Self {
            catalog,
            page_size,
            current_index: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Furthest offset the window may start at.
    fn last_index(&self) -> usize {
        self.catalog.len().saturating_sub(self.page_size())
    }

    pub fn next(&mut self) {
        let next = (self.current_index + self.page_size()).min(self.last_index());
        if next != self.current_index {
            tracing::debug!(from = self.current_index, to = next, "pager moved forward");
        }
        self.current_index = next;
    }

    pub fn previous(&mut self) {
        let previous = self.current_index.saturating_sub(self.page_size());
        if previous != self.current_index {
            tracing::debug!(from = self.current_index, to = previous, "pager moved back");
        }
        self.current_index = previous;
    }

    pub fn handle_key(&mut self, key: NavKey) {
        match key {
            NavKey::ArrowLeft => self.previous(),
            NavKey::ArrowRight => self.next(),
        }
    }

    /// The dishes currently in view. Empty only when the catalog is empty.
    pub fn visible_slice(&self) -> &[Dish] {
        let dishes = self.catalog.dishes();
        let end = (self.current_index + self.page_size()).min(dishes.len());
        &dishes[self.current_index.min(end)..end]
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + self.page_size() < self.catalog.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DishBuilder;

    fn catalog(len: usize) -> Arc<Catalog> {
        let dishes = (0..len)
            .map(|i| {
                DishBuilder::default()
                    .id(format!("dish-{i}"))
                    .name(format!("Dish {i}"))
                    .price(10.0)
                    .build()
                    .unwrap()
            })
            .collect();
        Arc::new(Catalog::new(dishes).unwrap())
    }

    fn pager(len: usize, page_size: usize) -> DishPager {
        DishPager::new(catalog(len), NonZeroUsize::new(page_size).unwrap())
    }

    fn visible_ids(pager: &DishPager) -> Vec<&str> {
        pager.visible_slice().iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn five_dishes_four_per_page() {
        let mut pager = pager(5, 4);
        assert_eq!(visible_ids(&pager), ["dish-0", "dish-1", "dish-2", "dish-3"]);
        assert!(pager.can_go_next());
        assert!(!pager.can_go_previous());

        pager.next();
        assert_eq!(pager.current_index(), 1);
        assert_eq!(visible_ids(&pager), ["dish-1", "dish-2", "dish-3", "dish-4"]);
        assert!(!pager.can_go_next());
        assert!(pager.can_go_previous());

        pager.previous();
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn empty_catalog() {
        let mut pager = pager(0, 4);
        assert!(pager.visible_slice().is_empty());
        assert!(!pager.can_go_next());
        assert!(!pager.can_go_previous());

        pager.next();
        pager.previous();
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn previous_at_start_stays_at_zero() {
        let mut pager = pager(9, 4);
        pager.previous();
        pager.previous();
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn next_converges_to_last_window() {
        for (len, page_size) in [(0, 4), (3, 4), (4, 4), (5, 4), (8, 4), (9, 4), (10, 3), (7, 1)] {
            let mut pager = pager(len, page_size);
            let last = len.saturating_sub(page_size);
            for _ in 0..len + 2 {
                pager.next();
            }
            assert_eq!(pager.current_index(), last, "len {len} page {page_size}");
            pager.next();
            assert_eq!(pager.current_index(), last);
            assert!(!pager.can_go_next());
        }
    }

    #[test]
    fn slice_never_exceeds_page_size() {
        for (len, page_size) in [(2, 4), (9, 4), (10, 3), (12, 4)] {
            let mut pager = pager(len, page_size);
            loop {
                let visible = pager.visible_slice().len();
                assert!(visible <= page_size);
                if pager.can_go_next() {
                    assert_eq!(visible, page_size);
                    pager.next();
                } else {
                    assert_eq!(visible, page_size.min(len));
                    break;
                }
            }
        }
    }

    #[test]
    fn arrow_keys_step_the_window() {
        let mut pager = pager(12, 4);
        pager.handle_key(NavKey::ArrowRight);
        assert_eq!(pager.current_index(), 4);
        pager.handle_key(NavKey::ArrowRight);
        pager.handle_key(NavKey::ArrowRight);
        assert_eq!(pager.current_index(), 8);
        pager.handle_key(NavKey::ArrowLeft);
        assert_eq!(pager.current_index(), 4);

        assert_eq!("ArrowLeft".parse(), Ok(NavKey::ArrowLeft));
        assert_eq!("ArrowRight".parse(), Ok(NavKey::ArrowRight));
        assert!("Enter".parse::<NavKey>().is_err());
    }
}
