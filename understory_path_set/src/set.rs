// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hierarchical path set: a prefix trie over [`Name`]s.

use alloc::collections::btree_map::{self, BTreeMap};
use alloc::vec::Vec;
use core::fmt;

use crate::matching::MatchResult;
use crate::path::{Name, NameError, Path, PathQuery};

/// A trie node. Children are kept in name order.
///
/// Invariant: every node other than the root is either a member or has at
/// least one child. Removals prune branches that would violate this, which
/// keeps the structure canonical for a given membership.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
struct Node {
    member: bool,
    children: BTreeMap<Name, Node>,
}

impl Node {
    fn is_vacant(&self) -> bool {
        !self.member && self.children.is_empty()
    }

    fn count_members(&self) -> usize {
        let mut count = 0;
        let mut stack = Vec::from([self]);
        while let Some(node) = stack.pop() {
            count += usize::from(node.member);
            stack.extend(node.children.values());
        }
        count
    }

    /// Unions `other` into `self`, returning the number of new members.
    fn merge(&mut self, other: &Self) -> usize {
        let mut added = 0;
        if other.member && !self.member {
            self.member = true;
            added += 1;
        }
        for (name, theirs) in &other.children {
            match self.children.get_mut(name.as_str()) {
                Some(ours) => added += ours.merge(theirs),
                None => {
                    added += theirs.count_members();
                    self.children.insert(name.clone(), theirs.clone());
                }
            }
        }
        added
    }
}

/// A set of hierarchical [`Path`]s with ancestor and descendant queries.
///
/// Membership tests cost one map lookup per path segment, regardless of how
/// many paths are stored, and [`PathSet::match_path`] also reports whether a
/// member lies above or below the queried location. This makes the set
/// suitable for describing state (expanded, pinned, excluded locations) over
/// scene hierarchies far too large to enumerate.
///
/// Sets compare and hash by membership only: two sets holding the same paths
/// are equal and hash identically regardless of the order of edits that
/// produced them.
///
/// ```rust
/// use understory_path_set::{MatchResult, PathSet};
///
/// let set: PathSet = ["/a/b", "/c"].into_iter().collect();
///
/// assert_eq!(set.match_path("/a/b"), MatchResult::EXACT);
/// assert_eq!(set.match_path("/a"), MatchResult::DESCENDANT);
/// assert_eq!(set.match_path("/a/b/c"), MatchResult::ANCESTOR);
/// assert_eq!(set.match_path(&["c", "d"]), MatchResult::ANCESTOR);
/// assert!(set.match_path("/d").is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PathSet {
    root: Node,
    len: usize,
}

impl PathSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of member paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.root = Node::default();
        self.len = 0;
    }

    /// Returns `true` if `path` is a member.
    #[must_use]
    pub fn contains<Q: PathQuery + ?Sized>(&self, path: &Q) -> bool {
        self.find(path).is_some_and(|node| node.member)
    }

    /// Adds `path`, returning `true` if it was not already a member.
    pub fn add_path(&mut self, path: &Path) -> bool {
        let mut node = &mut self.root;
        for name in path.names() {
            node = node.children.entry(name.clone()).or_default();
        }
        if node.member {
            return false;
        }
        node.member = true;
        self.len += 1;
        true
    }

    /// Adds every member of `other`.
    pub fn add_paths(&mut self, other: &Self) {
        self.len += self.root.merge(&other.root);
    }

    /// Removes `path`, returning `true` if it was a member.
    ///
    /// Members below `path` are unaffected.
    pub fn remove_path(&mut self, path: &Path) -> bool {
        let removed = remove_in(&mut self.root, path.names());
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Removes every member of `other`.
    pub fn remove_paths(&mut self, other: &Self) {
        for path in other {
            if self.is_empty() {
                return;
            }
            self.remove_path(&path);
        }
    }

    /// Removes `path` and every member below it.
    ///
    /// Returns `true` if anything was removed.
    pub fn prune(&mut self, path: &Path) -> bool {
        let removed = match path.names().split_first() {
            None => {
                self.root = Node::default();
                self.len
            }
            Some((first, rest)) => prune_in(&mut self.root, first, rest),
        };
        self.len -= removed;
        removed > 0
    }

    /// Prunes every member of `other`, together with its subtree.
    pub fn prune_paths(&mut self, other: &Self) {
        let mut paths = other.iter();
        while let Some(path) = paths.next() {
            if self.is_empty() {
                return;
            }
            self.prune(&path);
            // Everything below `path` is already gone.
            paths.prune();
        }
    }

    /// Matches `path` against the set.
    ///
    /// - [`MatchResult::EXACT`]: `path` is a member.
    /// - [`MatchResult::ANCESTOR`]: a proper prefix of `path` is a member.
    /// - [`MatchResult::DESCENDANT`]: `path` is a proper prefix of a member.
    ///
    /// The root has no proper prefix, so it never reports `ANCESTOR`.
    #[must_use]
    pub fn match_path<Q: PathQuery + ?Sized>(&self, path: &Q) -> MatchResult {
        let mut result = MatchResult::empty();
        let mut node = &self.root;
        for segment in path.segments() {
            if node.member {
                result |= MatchResult::ANCESTOR;
            }
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return result,
            }
        }
        if node.member {
            result |= MatchResult::EXACT;
        }
        // Canonical nodes only have children when members lie below them.
        if !node.children.is_empty() {
            result |= MatchResult::DESCENDANT;
        }
        result
    }

    /// Returns the names of the nodes directly below `path`, in name order.
    ///
    /// This includes intermediate locations that are not members themselves
    /// but lead to members. Unknown locations have no children.
    #[must_use]
    pub fn children<Q: PathQuery + ?Sized>(&self, path: &Q) -> Vec<Name> {
        self.find(path)
            .map(|node| node.children.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the members at or below `path`, keeping their full paths.
    #[must_use]
    pub fn subtree(&self, path: &Path) -> Self {
        let Some(found) = self.find(path) else {
            return Self::new();
        };
        let mut out = Self::new();
        let mut node = &mut out.root;
        for name in path.names() {
            node = node.children.entry(name.clone()).or_default();
        }
        *node = found.clone();
        out.len = found.count_members();
        out
    }

    /// Iterates over members in depth-first, name-ordered sequence.
    ///
    /// Parents are yielded before their descendants. See [`Iter::prune`] for
    /// skipping subtrees.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root, false)
    }

    /// Iterates over every node of the trie, members or not.
    ///
    /// The root always comes first, followed by each intermediate location on
    /// the way to a member. For a non-empty set this is exactly the set of
    /// members plus all of their ancestors.
    #[must_use]
    pub fn raw_iter(&self) -> Iter<'_> {
        Iter::new(&self.root, true)
    }

    /// Builds a set from flat leaf names.
    ///
    /// Without a grouping function each name is parsed as a path, so a name
    /// such as `"lighting/key"` becomes `/lighting/key`. With one, each name
    /// becomes a single segment placed below the group path the function
    /// returns for it; names containing the separator are rejected in that
    /// mode.
    pub fn from_grouped_names<I, S>(
        names: I,
        grouping: Option<&dyn Fn(&str) -> Path>,
    ) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.as_ref();
            let path = match grouping {
                Some(group) => group(name).child(Name::new(name)?),
                None => Path::parse(name),
            };
            set.add_path(&path);
        }
        Ok(set)
    }

    fn find<Q: PathQuery + ?Sized>(&self, path: &Q) -> Option<&Node> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.children.get(segment)?;
        }
        Some(node)
    }
}

fn remove_in(node: &mut Node, names: &[Name]) -> bool {
    let Some((first, rest)) = names.split_first() else {
        return core::mem::take(&mut node.member);
    };
    let Some(child) = node.children.get_mut(first.as_str()) else {
        return false;
    };
    let removed = remove_in(child, rest);
    if removed && child.is_vacant() {
        node.children.remove(first.as_str());
    }
    removed
}

fn prune_in(node: &mut Node, first: &Name, rest: &[Name]) -> usize {
    let Some((next, rest)) = rest.split_first() else {
        return node
            .children
            .remove(first.as_str())
            .map_or(0, |child| child.count_members());
    };
    let Some(child) = node.children.get_mut(first.as_str()) else {
        return 0;
    };
    let removed = prune_in(child, next, rest);
    if removed > 0 && child.is_vacant() {
        node.children.remove(first.as_str());
    }
    removed
}

impl fmt::Debug for PathSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for PathSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, path) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{path}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<Path> for PathSet {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> FromIterator<&'a str> for PathSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Path::parse).collect()
    }
}

impl Extend<Path> for PathSet {
    fn extend<I: IntoIterator<Item = Path>>(&mut self, iter: I) {
        for path in iter {
            self.add_path(&path);
        }
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = Path;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first iterator over a [`PathSet`].
///
/// Created by [`PathSet::iter`] (members only) and [`PathSet::raw_iter`]
/// (every trie node).
pub struct Iter<'a> {
    root: Option<&'a Node>,
    stack: Vec<btree_map::Iter<'a, Name, Node>>,
    /// Node most recently visited whose children have not been entered yet.
    pending: Option<&'a Node>,
    path: Path,
    raw: bool,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Node, raw: bool) -> Self {
        Self {
            root: Some(root),
            stack: Vec::new(),
            pending: None,
            path: Path::root(),
            raw,
        }
    }

    /// Skips the descendants of the path most recently yielded.
    ///
    /// Iteration continues with the next sibling (or the next sibling of an
    /// ancestor). Calling this before the first item, or twice in a row, has
    /// no further effect.
    pub fn prune(&mut self) {
        self.pending = None;
    }
}

impl Iterator for Iter<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if let Some(root) = self.root.take() {
            self.pending = Some(root);
            if self.raw || root.member {
                return Some(Path::root());
            }
        }
        loop {
            if let Some(node) = self.pending.take()
                && !node.children.is_empty()
            {
                self.stack.push(node.children.iter());
            }
            let depth = self.stack.len();
            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some((name, child)) => {
                    self.path.truncate(depth - 1);
                    self.path.push(name.clone());
                    self.pending = Some(child);
                    if self.raw || child.member {
                        return Some(self.path.clone());
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("path", &self.path)
            .field("depth", &self.stack.len())
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}
