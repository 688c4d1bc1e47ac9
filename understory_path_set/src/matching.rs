// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Match results for hierarchical membership queries.

bitflags::bitflags! {
    /// Independent facets of a membership query against a [`PathSet`](crate::PathSet).
    ///
    /// Several facets can hold at once: a location that is a member and also
    /// has members below it reports `EXACT | DESCENDANT`. The empty set means
    /// no match.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MatchResult: u8 {
        /// The queried location is itself a member.
        const EXACT      = 0b0000_0001;
        /// Some member lies strictly below the queried location.
        const DESCENDANT = 0b0000_0010;
        /// Some member lies strictly above the queried location.
        const ANCESTOR   = 0b0000_0100;
        /// All facets.
        const EVERY      = Self::EXACT.bits() | Self::DESCENDANT.bits() | Self::ANCESTOR.bits();
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl MatchResult {
    /// Returns `true` if the location is a member or lies below one.
    #[must_use]
    pub const fn is_exact_or_ancestor(self) -> bool {
        self.intersects(Self::EXACT.union(Self::ANCESTOR))
    }

    /// Returns `true` if the location is a member or has members below it.
    #[must_use]
    pub const fn is_exact_or_descendant(self) -> bool {
        self.intersects(Self::EXACT.union(Self::DESCENDANT))
    }
}
