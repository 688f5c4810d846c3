use crate::color::Rgb;
use crate::io::error::Result;
use std::collections::HashMap;

/// Memoization cache for nearest-element queries
///
/// Templates repeat colors heavily, so each distinct cell color is matched
/// against the library only once per build.
#[derive(Default, Debug)]
pub struct MatchCache {
    /// Target color to element index mapping
    matches: HashMap<Rgb, usize>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl CacheStats {
    /// Combine statistics gathered by separate caches
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
        }
    }
}

impl MatchCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve cached index or compute and store a new one
    ///
    /// Failed computations are not cached.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `compute_fn`
    pub fn get_or_compute<F>(&mut self, target: Rgb, compute_fn: F) -> Result<usize>
    where
        F: FnOnce() -> Result<usize>,
    {
        use std::collections::hash_map::Entry;

        match self.matches.entry(target) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(*entry.get())
            }
            Entry::Vacant(entry) => {
                let index = compute_fn()?;
                self.stats.misses += 1;
                Ok(*entry.insert(index))
            }
        }
    }

    /// Number of distinct colors stored
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
