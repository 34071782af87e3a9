//! Content-addressed pools that share one instance per distinct value.
//!
//! Large catalogs repeat the same group names and versions many times over.
//! Interning them means every [`DependencyModel`](crate::DependencyModel)
//! holding `"org.example"` points at the same allocation.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

/// A strong interner: pooled values live as long as the pool or any holder.
#[derive(Debug)]
pub struct Interner<T: ?Sized + Eq + Hash> {
    pool: HashSet<Arc<T>>,
}

impl<T: ?Sized + Eq + Hash> Default for Interner<T> {
    fn default() -> Self {
        Self {
            pool: HashSet::new(),
        }
    }
}

impl<T: ?Sized + Eq + Hash> Interner<T> {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pooled instance equal to `value`, pooling `value` if absent.
    pub fn intern<V>(&mut self, value: V) -> Arc<T>
    where
        V: Borrow<T> + Into<Arc<T>>,
    {
        if let Some(existing) = self.pool.get(value.borrow()) {
            return Arc::clone(existing);
        }
        let pooled: Arc<T> = value.into();
        self.pool.insert(Arc::clone(&pooled));
        pooled
    }

    /// Number of distinct values in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Returns true if nothing has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
