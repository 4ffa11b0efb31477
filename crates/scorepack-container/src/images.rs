//! Shared image cache keyed by name
//!
//! Loads insert every embedded image they encounter; scores reference the
//! images by name afterwards. The store is append-only and concurrent loads
//! may insert the same name, so inserts are idempotent per name without any
//! external synchronization.

use dashmap::DashMap;

/// Process-wide image cache, injected explicitly into each load.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: DashMap<String, Vec<u8>>,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an image under `name`. Idempotent: the first value inserted
    /// under a name wins, later inserts are ignored.
    pub fn add(&self, name: impl Into<String>, data: Vec<u8>) {
        self.images.entry(name.into()).or_insert(data);
    }

    /// Look up an image by name.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.images.get(name).map(|entry| entry.value().clone())
    }

    /// Whether an image with this name is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_keeps_first_value() {
        let store = ImageStore::new();
        store.add("logo.png", vec![1, 2, 3]);
        store.add("logo.png", vec![9, 9, 9]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("logo.png"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn lookup_of_unknown_name_is_none() {
        let store = ImageStore::new();
        assert!(store.get("missing.png").is_none());
        assert!(store.is_empty());
    }
}
