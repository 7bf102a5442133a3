//! In-memory arena of declarative resources keyed by identifier.

use std::collections::HashMap;

/// Insertion-ordered collection of declarative resources.
///
/// Populated once by the loader and never mutated afterwards; stores wrap it
/// in an `Arc` and share it across request workers without locking.
/// Hierarchical kinds keep their parent as an identifier field on `T`, so
/// the collection stays a flat arena.
#[derive(Debug, Clone)]
pub struct DeclarativeCollection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for DeclarativeCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> DeclarativeCollection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource. Returns the rejected value if `id` is already present.
    ///
    /// # Errors
    /// Returns `Err(value)` when the identifier is taken.
    pub fn insert(&mut self, id: impl Into<String>, value: T) -> Result<(), T> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(value);
        }
        self.index.insert(id, self.items.len());
        self.items.push(value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|&i| self.items.get(i))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_rejects_duplicates() {
        let mut c = DeclarativeCollection::new();
        c.insert("b", 2).unwrap();
        c.insert("a", 1).unwrap();
        assert_eq!(c.insert("b", 3), Err(3));

        assert_eq!(c.len(), 2);
        assert_eq!(c.get("b"), Some(&2));
        assert!(c.contains("a"));
        assert!(!c.contains("z"));
        assert_eq!(c.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn empty_collection() {
        let c: DeclarativeCollection<u8> = DeclarativeCollection::default();
        assert!(c.is_empty());
        assert!(c.get("x").is_none());
    }
}
