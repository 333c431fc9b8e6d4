//! Stamp-validated memoization of expensive derived structures.
//!
//! A [`MutantCache`] pairs a cached value with the version stamp of its
//! source at build time. The cache is valid iff the stamp matches the
//! current source version; any staleness triggers one synchronous full
//! rebuild. There is no partial invalidation: rebuild cost is traded for
//! query-time simplicity, which is acceptable because the stamp is checked
//! once per frame before a batch of queries, not before every query.

use bevy_ecs::prelude::Resource;

/// Monotonic version stamp of the authoritative object population.
///
/// Bumped whenever the set of spatially-registered simulants changes in a
/// way the incremental insert/remove path does not cover (bulk churn such as
/// screen teardown).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldVersion(pub u64);

impl WorldVersion {
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Cached derived value plus the source stamp it was built against.
#[derive(Debug, Default)]
pub struct MutantCache<T> {
    stamp: Option<u64>,
    value: Option<T>,
}

impl<T> MutantCache<T> {
    pub fn new() -> Self {
        MutantCache {
            stamp: None,
            value: None,
        }
    }

    /// Whether the cached value matches the given source version.
    pub fn is_fresh(&self, version: u64) -> bool {
        self.stamp == Some(version) && self.value.is_some()
    }

    /// Return the cached value if fresh, otherwise rebuild it with
    /// `rebuild`, store it against `version`, and return it.
    pub fn get_or_rebuild(&mut self, version: u64, rebuild: impl FnOnce() -> T) -> &mut T {
        if self.stamp != Some(version) {
            self.value = None;
            self.stamp = Some(version);
        }
        self.value.get_or_insert_with(rebuild)
    }

    /// Access the cached value without validating freshness, for callers
    /// that maintain it incrementally between rebuilds.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Drop the cached value so the next access rebuilds.
    pub fn invalidate(&mut self) {
        self.stamp = None;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stamp_skips_rebuild() {
        let mut cache: MutantCache<Vec<u32>> = MutantCache::new();
        let mut rebuilds = 0;

        let first = cache.get_or_rebuild(1, || {
            rebuilds += 1;
            vec![1, 2, 3]
        }) as *const Vec<u32>;
        let second = cache.get_or_rebuild(1, || {
            rebuilds += 1;
            vec![9]
        }) as *const Vec<u32>;

        assert_eq!(rebuilds, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn stale_stamp_rebuilds_exactly_once() {
        let mut cache: MutantCache<u32> = MutantCache::new();
        let mut rebuilds = 0;

        cache.get_or_rebuild(1, || {
            rebuilds += 1;
            10
        });
        let value = *cache.get_or_rebuild(2, || {
            rebuilds += 1;
            20
        });

        assert_eq!(rebuilds, 2);
        assert_eq!(value, 20);
    }

    #[test]
    fn invalidate_forces_rebuild_on_same_stamp() {
        let mut cache: MutantCache<u32> = MutantCache::new();
        cache.get_or_rebuild(1, || 10);
        cache.invalidate();
        let value = *cache.get_or_rebuild(1, || 11);
        assert_eq!(value, 11);
    }
}
