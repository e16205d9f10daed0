use crate::{catalog::Catalog, storefront::Storefront};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Sessions kept before the least recently used one is dropped.
pub const DEFAULT_MAX_SESSIONS: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug)]
struct Entry {
    storefront: Storefront,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Registry {
    entries: HashMap<String, Entry>,
    clock: u64,
}

/// Storefronts keyed by visitor, created the first time a key shows up.
///
/// A session ends when it is ended explicitly or when it is the least
/// recently used one and the registry is full. Nothing here outlives the
/// process.
#[derive(Debug)]
pub struct Sessions {
    catalog: Arc<Catalog>,
    page_size: NonZeroUsize,
    max_sessions: NonZeroUsize,
    registry: Mutex<Registry>,
}

impl Sessions {
    pub fn new(catalog: Arc<Catalog>, page_size: NonZeroUsize) -> Self {
        Self {
            catalog,
            page_size,
            max_sessions: DEFAULT_MAX_SESSIONS,
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn with_capacity(mut self, max_sessions: NonZeroUsize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // a panicking caller only poisons the lock, the map itself is intact
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` against the storefront of `key`.
    ///
    /// The registry stays locked while `f` runs, so `f` must not block.
    pub fn with_session<T>(&self, key: &str, f: impl FnOnce(&mut Storefront) -> T) -> T {
        let mut registry = self.lock();
        registry.clock += 1;
        let now = registry.clock;

        if !registry.entries.contains_key(key) && registry.entries.len() >= self.max_sessions.get() {
            let oldest = registry
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                registry.entries.remove(&oldest);
                tracing::info!("evict idle session {oldest}");
            }
        }

        let entry = registry.entries.entry(key.to_string()).or_insert_with(|| {
            tracing::info!("new session {key}");
            Entry {
                storefront: self.open(key),
                last_used: now,
            }
        });
        entry.last_used = now;

        f(&mut entry.storefront)
    }

    fn open(&self, key: &str) -> Storefront {
        let mut storefront = Storefront::new(self.catalog.clone(), self.page_size);
        let session = key.to_string();
        storefront.subscribe(move |cart| {
            tracing::debug!(
                session = session.as_str(),
                items = cart.total_item_count(),
                "cart updated"
            )
        });
        storefront
    }

    /// Drop the storefront of `key`. The next use of `key` starts over.
    pub fn end_session(&self, key: &str) -> bool {
        let ended = self.lock().entries.remove(key).is_some();
        if ended {
            tracing::info!("end session {key}");
        }
        ended
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::DEFAULT_PAGE_SIZE;

    #[test]
    fn sessions_do_not_share_carts() {
        let sessions = Sessions::new(Arc::new(Catalog::builtin()), DEFAULT_PAGE_SIZE);
        assert!(sessions.is_empty());

        sessions.with_session("alice", |shop| {
            shop.add_to_cart_by_id("pasta");
            shop.add_to_cart_by_id("pasta");
        });
        sessions.with_session("bob", |shop| shop.next());

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.with_session("alice", |shop| shop.view().cart_count), 2);
        assert_eq!(sessions.with_session("alice", |shop| shop.pager().current_index()), 0);
        assert_eq!(sessions.with_session("bob", |shop| shop.view().cart_count), 0);
        assert_eq!(sessions.with_session("bob", |shop| shop.pager().current_index()), 1);
    }

    fn pasta_on_second_page(sessions: &Sessions, key: &str) {
        sessions.with_session(key, |shop| {
            shop.add_to_cart_by_id("pasta");
            shop.next();
        });
    }

    fn is_fresh(sessions: &Sessions, key: &str) -> bool {
        sessions.with_session(key, |shop| {
            shop.cart().is_empty() && shop.pager().current_index() == 0
        })
    }

    #[test]
    fn ended_session_starts_over() {
        let sessions = Sessions::new(Arc::new(Catalog::builtin()), DEFAULT_PAGE_SIZE);
        pasta_on_second_page(&sessions, "alice");

        assert!(sessions.end_session("alice"));
        assert!(!sessions.end_session("alice"));
        assert!(sessions.is_empty());
        assert!(is_fresh(&sessions, "alice"));
    }

    #[test]
    fn full_registry_evicts_least_recently_used() {
        let sessions = Sessions::new(Arc::new(Catalog::builtin()), DEFAULT_PAGE_SIZE)
            .with_capacity(NonZeroUsize::new(2).unwrap());
        pasta_on_second_page(&sessions, "alice");
        pasta_on_second_page(&sessions, "bob");
        // alice is now more recent than bob
        sessions.with_session("alice", |_| ());

        pasta_on_second_page(&sessions, "carol");
        assert_eq!(sessions.len(), 2);
        assert!(!is_fresh(&sessions, "alice"));
        assert!(!is_fresh(&sessions, "carol"));

        // bob was dropped and comes back empty, pushing out alice
        assert!(is_fresh(&sessions, "bob"));
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn many_keys_stay_within_capacity() {
        let sessions = Sessions::new(Arc::new(Catalog::builtin()), DEFAULT_PAGE_SIZE)
            .with_capacity(NonZeroUsize::new(16).unwrap());
        for i in 0..10_000 {
            sessions.with_session(&format!("visitor-{i}"), |shop| shop.next());
        }
        assert_eq!(sessions.len(), 16);
    }
}
