// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`PathSource`] capability and the walker shared by the visibility types.

use alloc::vec::Vec;
use core::fmt;

use understory_path_set::{Name, Path, PathSet};

/// Supplies the child names of locations in a hierarchy, on demand.
///
/// This is the only thing the walkers need from a scene. Implement it for
/// whatever evaluates your hierarchy lazily; [`PathSet`] implements it by
/// reporting its own trie nodes, which is handy for tests and for static
/// hierarchies such as grouped render passes.
pub trait PathSource {
    /// Returns the names of the children of `path`, in display order.
    ///
    /// Unknown locations and leaves return an empty list.
    fn child_names(&self, path: &Path) -> Vec<Name>;
}

impl PathSource for PathSet {
    fn child_names(&self, path: &Path) -> Vec<Name> {
        self.children(path)
    }
}

impl<T: PathSource + ?Sized> PathSource for &T {
    fn child_names(&self, path: &Path) -> Vec<Name> {
        (**self).child_names(path)
    }
}

/// Adapts a closure into a [`PathSource`].
///
/// ```rust
/// use understory_expansion::{FnPathSource, PathSource};
/// use understory_path_set::{Name, Path};
///
/// // Every location has two children, down to depth 3.
/// let source = FnPathSource(|path: &Path| {
///     if path.len() >= 3 {
///         return Vec::new();
///     }
///     ["l", "r"].into_iter().map(|n| Name::new(n).unwrap()).collect()
/// });
/// assert_eq!(source.child_names(&Path::parse("/l")).len(), 2);
/// assert!(source.child_names(&Path::parse("/l/r/l")).is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct FnPathSource<F>(pub F);

impl<F> PathSource for FnPathSource<F>
where
    F: Fn(&Path) -> Vec<Name>,
{
    fn child_names(&self, path: &Path) -> Vec<Name> {
        (self.0)(path)
    }
}

impl<F> fmt::Debug for FnPathSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnPathSource").finish_non_exhaustive()
    }
}

/// Decision for one location during a walk.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Visit {
    /// Add the location to the output.
    pub(crate) include: bool,
    /// Ask the source for the location's children and visit them.
    pub(crate) descend: bool,
}

/// Walks `source` from the root in depth-first, source order.
///
/// Uses an explicit work list rather than recursion, so deep hierarchies do
/// not grow the call stack. Stops once `limit` locations have been collected.
pub(crate) fn walk<S, F>(source: &S, limit: Option<usize>, visit: F) -> PathSet
where
    S: PathSource + ?Sized,
    F: FnMut(&Path) -> Visit,
{
    walk_from(source, Path::root(), limit, visit)
}

/// Like [`walk`], but starts at `start` instead of the root.
pub(crate) fn walk_from<S, F>(
    source: &S,
    start: Path,
    limit: Option<usize>,
    mut visit: F,
) -> PathSet
where
    S: PathSource + ?Sized,
    F: FnMut(&Path) -> Visit,
{
    let mut out = PathSet::new();
    let mut pending = Vec::from([start]);
    let mut visited = 0_usize;
    while let Some(path) = pending.pop() {
        if limit.is_some_and(|limit| out.len() >= limit) {
            break;
        }
        visited += 1;
        let Visit { include, descend } = visit(&path);
        if include {
            out.add_path(&path);
        }
        if descend {
            let children = source.child_names(&path);
            // Reversed so the first child is popped first.
            pending.extend(children.into_iter().rev().map(|name| path.child(name)));
        }
    }
    tracing::trace!(visited, collected = out.len(), "walked path source");
    out
}
