// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Expansion`]: expanded, pinned, and locked locations for a hierarchy browser.

use understory_path_set::{MatchResult, Path, PathQuery, PathSet};

use crate::source::{PathSource, Visit, walk, walk_from};

/// Expansion state shared by hierarchy views and viewers.
///
/// Three path sets are tracked:
///
/// - **Expanded** locations show their immediate children. This is usually
///   what the user toggled in a hierarchy view.
/// - **Pinned** locations are expanded together with all of their
///   descendants, independently of the expanded set. This lets a viewer show
///   a branch without also expanding it in the hierarchy view.
/// - **Locked** locations and their descendants are never expanded. Locks
///   override both expansion and pins.
///
/// All edits are idempotent. The state is owned by one editor session; for
/// shared access, wrap it in whatever lock the session already uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: PathSet,
    pinned: PathSet,
    locked: PathSet,
}

impl Expansion {
    /// Creates an expansion with nothing expanded, pinned, or locked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands `paths`.
    ///
    /// With `expand_ancestors`, every ancestor of each path is expanded as
    /// well, including the root; otherwise only the given paths are added.
    pub fn expand(&mut self, paths: &PathSet, expand_ancestors: bool) {
        if expand_ancestors {
            if paths.is_empty() {
                return;
            }
            for path in paths.raw_iter() {
                self.expanded.add_path(&path);
            }
        } else {
            self.expanded.add_paths(paths);
        }
        tracing::trace!(
            requested = paths.len(),
            expand_ancestors,
            expanded = self.expanded.len(),
            "expand"
        );
    }

    /// Expands `paths` and their descendants in `source`, down to `depth`
    /// levels below each path.
    ///
    /// Every visited location that has children is expanded. The returned set
    /// holds the new leaves of the expansion: locations exactly `depth + 1`
    /// levels below a requested path, and locations within reach that have no
    /// children. A `depth` of `Some(0)` expands only the given paths; `None`
    /// expands whole subtrees, so it needs a finite `source`.
    pub fn expand_descendants<S>(
        &mut self,
        paths: &PathSet,
        source: &S,
        depth: Option<usize>,
    ) -> PathSet
    where
        S: PathSource + ?Sized,
    {
        let mut leaves = PathSet::new();
        for start in paths {
            let base = start.len();
            let within = |path: &Path| depth.is_none_or(|depth| path.len() - base <= depth);
            let visited = walk_from(source, start, None, |path| Visit {
                include: true,
                descend: within(path),
            });
            for path in &visited {
                if within(&path) && !visited.children(&path).is_empty() {
                    self.expanded.add_path(&path);
                } else {
                    leaves.add_path(&path);
                }
            }
        }
        tracing::trace!(
            requested = paths.len(),
            ?depth,
            leaves = leaves.len(),
            expanded = self.expanded.len(),
            "expand descendants"
        );
        leaves
    }

    /// Replaces the expanded set.
    pub fn set_expanded_paths(&mut self, paths: PathSet) {
        self.expanded = paths;
        tracing::trace!(expanded = self.expanded.len(), "set expanded paths");
    }

    /// Returns the effective expanded locations.
    ///
    /// This is the union of the pinned locations (minus locked subtrees) and
    /// the expanded locations that are neither locked nor below a lock.
    /// Without pins or locks it equals the expanded set.
    #[must_use]
    pub fn expanded_paths(&self) -> PathSet {
        let mut result = self.pinned.clone();
        if self.locked.is_empty() {
            result.add_paths(&self.expanded);
            return result;
        }

        result.prune_paths(&self.locked);
        let mut expanded = self.expanded.iter();
        while let Some(path) = expanded.next() {
            if self.locked.match_path(&path).is_exact_or_ancestor() {
                // Everything below a locked location is locked too.
                expanded.prune();
                continue;
            }
            result.add_path(&path);
        }
        result
    }

    /// Collapses everything.
    pub fn clear_expansion(&mut self) {
        self.expanded.clear();
    }

    /// Pins `paths`, expanding them and all their descendants.
    pub fn pin(&mut self, paths: &PathSet) {
        self.pinned.add_paths(paths);
        tracing::trace!(requested = paths.len(), pinned = self.pinned.len(), "pin");
    }

    /// Removes the pins on `paths`. Pins on their descendants are kept.
    pub fn unpin(&mut self, paths: &PathSet) {
        if self.pinned.is_empty() {
            return;
        }
        self.pinned.remove_paths(paths);
        tracing::trace!(requested = paths.len(), pinned = self.pinned.len(), "unpin");
    }

    /// Replaces the pinned set.
    pub fn set_pinned_paths(&mut self, paths: PathSet) {
        self.pinned = paths;
    }

    /// Returns the pinned locations.
    #[must_use]
    pub fn pinned_paths(&self) -> &PathSet {
        &self.pinned
    }

    /// Removes all pins.
    pub fn clear_pinning(&mut self) {
        if self.pinned.is_empty() {
            return;
        }
        self.pinned.clear();
    }

    /// Locks `paths`, preventing them and their descendants from expanding.
    pub fn lock(&mut self, paths: &PathSet) {
        self.locked.add_paths(paths);
        tracing::trace!(requested = paths.len(), locked = self.locked.len(), "lock");
    }

    /// Removes the locks on `paths`. Locks on their descendants are kept.
    pub fn unlock(&mut self, paths: &PathSet) {
        if self.locked.is_empty() {
            return;
        }
        self.locked.remove_paths(paths);
        tracing::trace!(requested = paths.len(), locked = self.locked.len(), "unlock");
    }

    /// Replaces the locked set.
    pub fn set_locked_paths(&mut self, paths: PathSet) {
        self.locked = paths;
    }

    /// Returns the locked locations.
    #[must_use]
    pub fn locked_paths(&self) -> &PathSet {
        &self.locked
    }

    /// Removes all locks.
    pub fn clear_locking(&mut self) {
        if self.locked.is_empty() {
            return;
        }
        self.locked.clear();
    }

    /// Returns `true` if the children of `path` should be shown.
    ///
    /// A location expands when it is in the expanded set, or is pinned or
    /// below a pin, unless it is locked or below a lock.
    #[must_use]
    pub fn should_expand<Q: PathQuery + ?Sized>(&self, path: &Q) -> bool {
        if self.is_locked(path) {
            return false;
        }
        self.expanded.match_path(path).contains(MatchResult::EXACT)
            || self.pinned.match_path(path).is_exact_or_ancestor()
    }

    /// Returns `true` if some location below `path` should expand.
    ///
    /// This holds when the expanded set has members below `path`, or `path`
    /// is pinned or has pins below it, unless `path` is locked or below a
    /// lock.
    #[must_use]
    pub fn has_expanded_descendants<Q: PathQuery + ?Sized>(&self, path: &Q) -> bool {
        if self.is_locked(path) {
            return false;
        }
        self.expanded
            .match_path(path)
            .contains(MatchResult::DESCENDANT)
            || self.pinned.match_path(path).is_exact_or_descendant()
    }

    /// Collects the locations a hierarchy view would display for `source`.
    ///
    /// The root and its children are always listed. Below that, the children
    /// of a listed location are listed when [`Expansion::should_expand`]
    /// holds for it. At most `limit` locations are collected.
    pub fn visible_paths<S>(&self, source: &S, limit: Option<usize>) -> PathSet
    where
        S: PathSource + ?Sized,
    {
        walk(source, limit, |path| Visit {
            include: true,
            descend: path.is_root() || self.should_expand(path),
        })
    }

    fn is_locked<Q: PathQuery + ?Sized>(&self, path: &Q) -> bool {
        !self.locked.is_empty() && self.locked.match_path(path).is_exact_or_ancestor()
    }
}
