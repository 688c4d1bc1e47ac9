// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_path_set --heading-base-level=0

//! Understory Path Set: hierarchical path sets with ancestor and descendant matching.
//!
//! Hierarchy browsers over large scenes need to describe state such as "these
//! locations are expanded" or "everything under here is hidden" without ever
//! enumerating the scene. This crate provides the primitive for that:
//!
//! - [`Path`] and [`Name`]: a location as a sequence of validated segments,
//!   with a `/`-separated string form.
//! - [`PathSet`]: a prefix trie of paths. [`PathSet::match_path`] answers, in
//!   one walk down the trie, whether a location is a member, lies below a
//!   member, or has members below it.
//! - [`MatchResult`]: the bitflags returned by matching.
//! - [`Iter`]: depth-first iteration with [`Iter::prune`] to skip subtrees.
//! - [`PathSetCache`]: a bounded LRU cache for sets derived from other inputs.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_path_set::{MatchResult, Path, PathSet};
//!
//! let mut expanded = PathSet::new();
//! expanded.add_path(&Path::parse("/world/characters"));
//! expanded.add_path(&Path::parse("/world/characters/hero"));
//!
//! // Any proper prefix of a member reports a descendant match.
//! assert_eq!(expanded.match_path("/world"), MatchResult::DESCENDANT);
//!
//! // Members can have members below them.
//! assert_eq!(
//!     expanded.match_path("/world/characters"),
//!     MatchResult::EXACT | MatchResult::DESCENDANT
//! );
//!
//! // Strings and pre-split segments are interchangeable.
//! assert_eq!(
//!     expanded.match_path(&["world", "characters", "hero", "body"]),
//!     MatchResult::ANCESTOR
//! );
//! ```
//!
//! ## Iteration and pruning
//!
//! Iteration is depth-first with children in name order, so parents always
//! precede their descendants. Calling [`Iter::prune`] right after a path is
//! yielded skips that path's subtree, which is how bulk operations avoid
//! revisiting locations they have already dealt with:
//!
//! ```rust
//! use understory_path_set::PathSet;
//!
//! let set: PathSet = ["/a", "/a/b", "/a/b/c", "/d"].into_iter().collect();
//!
//! let mut tops = Vec::new();
//! let mut it = set.iter();
//! while let Some(path) = it.next() {
//!     tops.push(path.to_string());
//!     it.prune();
//! }
//! assert_eq!(tops, ["/a", "/d"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod matching;
mod path;
mod set;

pub use cache::{DEFAULT_CAPACITY, PathSetCache};
pub use matching::MatchResult;
pub use path::{Name, NameError, Path, PathQuery, SEPARATOR};
pub use set::{Iter, PathSet};
