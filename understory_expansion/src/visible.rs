// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`VisibleSet`]: a per-query visibility verdict from three path sets.

use smallvec::SmallVec;
use understory_path_set::{MatchResult, PathQuery, PathSet};

use crate::source::{PathSource, Visit, walk};

/// Inline capacity for the segments of a queried path.
const INLINE_SEGMENTS: usize = 16;

/// Visibility of scene locations derived from expansions, inclusions, and
/// exclusions.
///
/// - **Expansions** disclose the children of a location, provided the
///   location's parent is itself expanded. The root is implicitly expanded.
/// - **Inclusions** make a location and everything below it visible.
/// - **Exclusions** hide a location and everything below it, overriding the
///   other two sets and the minimum expansion depth.
///
/// The sets are plain values supplied by the caller; `VisibleSet` only
/// combines them. Equality and hashing cover all three sets, so a
/// `VisibleSet` can key caches of derived results.
///
/// ```rust
/// use understory_expansion::VisibleSet;
/// use understory_path_set::MatchResult;
///
/// let mut visible = VisibleSet::new();
/// visible.expansions = ["/a", "/a/b"].into_iter().collect();
/// visible.exclusions = ["/a/b/hidden"].into_iter().collect();
///
/// // "/a/b" is shown (its parent is expanded) and shows its children.
/// assert_eq!(visible.match_path("/a/b", 0), MatchResult::EVERY);
/// // "/a/b/c" is shown, but not expanded.
/// assert_eq!(
///     visible.match_path("/a/b/c", 0),
///     MatchResult::EXACT | MatchResult::ANCESTOR
/// );
/// // Exclusions win.
/// assert!(visible.match_path("/a/b/hidden", 0).is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibleSet {
    /// Locations whose children are disclosed.
    pub expansions: PathSet,
    /// Locations that are visible together with all their descendants.
    pub inclusions: PathSet,
    /// Locations that are hidden together with all their descendants.
    pub exclusions: PathSet,
}

impl VisibleSet {
    /// Creates a visible set with all three path sets empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the visibility verdict for `path`.
    ///
    /// Locations at depth `minimum_expansion_depth` or shallower are visible
    /// and show their children; locations exactly one level deeper are
    /// visible. Use `0` when only the root should be implicitly expanded.
    ///
    /// The result reads as follows:
    /// - [`MatchResult::EXACT`]: `path` itself is visible.
    /// - [`MatchResult::DESCENDANT`]: some locations below `path` may be
    ///   visible, so a traversal should descend.
    /// - [`MatchResult::ANCESTOR`]: `path` is visible through an ancestor
    ///   (an expanded parent or an included ancestor).
    /// - Empty: neither `path` nor anything below it is visible.
    ///
    /// Expansion only checks the immediate parent, not the whole ancestor
    /// chain: a location whose parent is in `expansions` reports as visible
    /// even if a higher ancestor is not. Sets built with
    /// [`Expansion::expand`](crate::Expansion::expand) and `expand_ancestors`
    /// never hit this case.
    #[must_use]
    pub fn match_path<Q: PathQuery + ?Sized>(
        &self,
        path: &Q,
        minimum_expansion_depth: usize,
    ) -> MatchResult {
        let segments: SmallVec<[&str; INLINE_SEGMENTS]> = path.segments().collect();
        let segments = segments.as_slice();

        if self.exclusions.match_path(segments).is_exact_or_ancestor() {
            return MatchResult::empty();
        }

        let depth = segments.len();
        let mut result = MatchResult::empty();
        if minimum_expansion_depth >= depth {
            result |= MatchResult::EXACT | MatchResult::DESCENDANT;
        } else if minimum_expansion_depth + 1 == depth {
            result |= MatchResult::EXACT;
        }

        let inclusions = self.inclusions.match_path(segments);
        result |= inclusions;
        if inclusions.is_exact_or_ancestor() {
            result |= MatchResult::EXACT | MatchResult::DESCENDANT;
        }

        let expansions = self.expansions.match_path(segments);
        if depth > 1 {
            let parent = &segments[..depth - 1];
            if self.expansions.match_path(parent).contains(MatchResult::EXACT) {
                result |= MatchResult::EXACT | MatchResult::ANCESTOR;
                if expansions.contains(MatchResult::EXACT) {
                    result |= MatchResult::DESCENDANT;
                }
            }
        } else if depth == 1 && expansions.contains(MatchResult::EXACT) {
            result |= MatchResult::DESCENDANT;
        }

        result
    }

    /// Collects every visible location of `source`.
    ///
    /// The walk starts at the root, records each location whose verdict
    /// includes [`MatchResult::EXACT`], and only asks `source` for the
    /// children of locations whose verdict includes
    /// [`MatchResult::DESCENDANT`]. At most `limit` locations are collected.
    pub fn visible_paths<S>(
        &self,
        source: &S,
        minimum_expansion_depth: usize,
        limit: Option<usize>,
    ) -> PathSet
    where
        S: PathSource + ?Sized,
    {
        walk(source, limit, |path| {
            let verdict = self.match_path(path, minimum_expansion_depth);
            Visit {
                include: verdict.contains(MatchResult::EXACT),
                descend: verdict.contains(MatchResult::DESCENDANT),
            }
        })
    }
}
