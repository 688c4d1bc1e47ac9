// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_expansion --heading-base-level=0

//! Understory Expansion: visibility and expansion state for hierarchy browsers.
//!
//! Scene hierarchies can hold millions of locations that are only evaluated
//! on demand, so "what is expanded" and "what is visible" have to be answered
//! per location from compact state rather than by enumerating the scene. This
//! crate provides two such state types, both built on
//! [`understory_path_set::PathSet`]:
//!
//! - [`Expansion`]: mutable expanded, pinned, and locked sets, as edited by a
//!   hierarchy view. Precedence is locks, then pins, then expansion.
//! - [`VisibleSet`]: expansions, inclusions, and exclusions supplied by the
//!   caller, combined into a single [`MatchResult`](understory_path_set::MatchResult)
//!   verdict per location, with a minimum expansion depth below which
//!   everything is disclosed.
//!
//! Both can drive a walk over a [`PathSource`], the capability a scene
//! exposes to list the children of a location.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_expansion::Expansion;
//! use understory_path_set::PathSet;
//!
//! let mut expansion = Expansion::new();
//!
//! // Expanding "/a/b/c" together with its ancestors.
//! let paths: PathSet = ["/a/b/c"].into_iter().collect();
//! expansion.expand(&paths, true);
//! assert!(expansion.should_expand("/a"));
//! assert!(expansion.should_expand("/a/b/c"));
//!
//! // Pins expand a whole branch; locks override both.
//! expansion.pin(&["/x"].into_iter().collect());
//! expansion.lock(&["/x/secret"].into_iter().collect());
//! assert!(expansion.should_expand("/x/y/z"));
//! assert!(!expansion.should_expand("/x/secret/deeper"));
//! ```
//!
//! ## Walking a scene
//!
//! ```rust
//! use understory_expansion::VisibleSet;
//! use understory_path_set::PathSet;
//!
//! // A static scene; real embedders implement `PathSource` over their
//! // evaluation engine instead.
//! let scene: PathSet = ["/world/props/chair", "/world/lights/key"]
//!     .into_iter()
//!     .collect();
//!
//! let mut visible = VisibleSet::new();
//! visible.inclusions = ["/world/lights"].into_iter().collect();
//!
//! let shown: Vec<_> = visible
//!     .visible_paths(&scene, 0, None)
//!     .iter()
//!     .map(|path| path.to_string())
//!     .collect();
//! assert_eq!(shown, ["/", "/world", "/world/lights", "/world/lights/key"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod expansion;
mod source;
mod visible;

pub use expansion::Expansion;
pub use source::{FnPathSource, PathSource};
pub use visible::VisibleSet;
