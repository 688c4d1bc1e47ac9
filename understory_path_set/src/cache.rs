// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A bounded, least-recently-used cache of derived [`PathSet`]s.
//!
//! Building a path set from its inputs (a list of render pass names, the
//! members of an organisational set, and so on) can be costly when it happens
//! on every redraw. [`PathSetCache`] memoizes the result keyed by a hashable
//! description of those inputs. It is an ordinary owned value: whichever
//! component needs memoization holds one, and there is no process-wide state.
//!
//! ```rust
//! use understory_path_set::{PathSet, PathSetCache};
//!
//! // Key: the flat names plus whether they are grouped.
//! let mut cache = PathSetCache::<(Vec<String>, bool)>::new(2);
//!
//! let names = vec!["beauty".to_string(), "shadow".to_string()];
//! let set = cache.get_or_insert_with((names.clone(), false), |(names, _)| {
//!     PathSet::from_grouped_names(names, None).unwrap_or_default()
//! });
//! assert_eq!(set.len(), 2);
//!
//! // Same inputs: served from the cache without rebuilding.
//! cache.get_or_insert_with((names, false), |_| unreachable!());
//! assert_eq!(cache.hits(), 1);
//! assert_eq!(cache.misses(), 1);
//! ```

use core::hash::Hash;

use hashbrown::HashMap;

use crate::set::PathSet;

/// Capacity used by hierarchy browsers that cache one set per input list.
pub const DEFAULT_CAPACITY: usize = 25;

#[derive(Clone, Debug)]
struct Entry {
    set: PathSet,
    last_used: u64,
}

/// Bounded LRU cache from input keys to derived [`PathSet`]s.
///
/// On a miss at capacity, the entry used least recently (looked up or
/// inserted) is evicted before the new one is stored. Evicting clones the
/// victim's key once.
#[derive(Clone, Debug)]
pub struct PathSetCache<K> {
    entries: HashMap<K, Entry>,
    capacity: usize,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl<K> Default for PathSetCache<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K> PathSetCache<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` sets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "PathSetCache capacity must be non-zero");
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the maximum number of cached sets.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of cached sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many lookups were served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns how many lookups had to build a new set.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Returns `true` if `key` is cached. Does not affect recency.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the set cached for `key`, marking it as recently used.
    pub fn get(&mut self, key: &K) -> Option<&PathSet> {
        let now = self.tick();
        let entry = self.entries.get_mut(key)?;
        entry.last_used = now;
        Some(&entry.set)
    }

    /// Returns the set for `key`, calling `build` to create it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, build: F) -> &PathSet
    where
        F: FnOnce(&K) -> PathSet,
    {
        let now = self.tick();
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            if self.entries.len() >= self.capacity {
                self.evict_least_recent();
            }
        }
        let entry = self.entries.entry(key).or_insert_with_key(|key| Entry {
            set: build(key),
            last_used: now,
        });
        entry.last_used = now;
        &entry.set
    }

    /// Removes and returns the set cached for `key`.
    pub fn remove(&mut self, key: &K) -> Option<PathSet> {
        self.entries.remove(key).map(|entry| entry.set)
    }

    /// Drops every cached set. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn tick(&mut self) -> u64 {
        self.clock = self.clock.wrapping_add(1);
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone())
        else {
            return;
        };
        if let Some(entry) = self.entries.remove(&oldest) {
            tracing::debug!(
                capacity = self.capacity,
                last_used = entry.last_used,
                "evicted least recently used path set"
            );
        }
    }
}
