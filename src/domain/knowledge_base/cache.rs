//! Memoization of knowledge base queries.
//!
//! A cache entry is one of three states: never computed, computed with an
//! empty result, or computed with a result. Entries are written once and never
//! evicted, so a constraint set always resolves to the same answer for the
//! lifetime of the engine.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Canonical form of a constraint set: sorted, deduplicated `(slot, value)`
/// pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintKey(Vec<(String, String)>);

impl ConstraintKey {
    /// Canonicalizes a set of constraint pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(slot, value)| (slot.clone(), value.clone()))
            .collect();
        pairs.sort();
        pairs.dedup();
        Self(pairs)
    }

    /// The canonical pairs.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// True for the unconstrained query.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// State of one cached query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry<T> {
    /// The query has never been computed.
    Absent,
    /// The query was computed and matched nothing.
    Empty,
    /// The query was computed and produced a result.
    Present(T),
}

impl<T> CacheEntry<T> {
    /// True once the query has been computed.
    pub fn is_computed(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Write-once query cache, safe to share between threads.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: RwLock<HashMap<ConstraintKey, CacheEntry<T>>>,
}

impl<T: Clone> QueryCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Looks up a query.
    pub fn get(&self, key: &ConstraintKey) -> CacheEntry<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned().unwrap_or(CacheEntry::Absent)
    }

    /// Stores a computed entry unless one already exists, returning the entry
    /// that is now cached.
    ///
    /// `Absent` is never stored.
    pub fn insert(&self, key: ConstraintKey, entry: CacheEntry<T>) -> CacheEntry<T> {
        if !entry.is_computed() {
            return self.get(&key);
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(key).or_insert(entry).clone()
    }

    /// Number of computed queries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
