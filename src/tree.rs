//! A persistent BST. Operations that one would expect to modify the tree
//! (e.g. `insert` or `remove`) instead return a new tree that shares every
//! untouched subtree with the original.
//!
//! The tree never rebalances, so its shape depends on insertion order: sorted
//! input degrades it into a chain whose height is one less than its length.
//!
//! # Examples
//!
//! ```
//! use persistent_bst::Tree;
//!
//! let tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! // This `insert` returns a new tree!
//! let new_tree = tree.insert(1);
//!
//! // The new tree has this new element but the old one doesn't.
//! assert_eq!(new_tree.find(&1), Some(&1));
//! assert_eq!(tree.find(&1), None);
//!
//! // And remove it for good measure.
//! let newest_tree = new_tree.remove(&1);
//!
//! // All history is preserved.
//! assert_eq!(newest_tree.find(&1), None);
//! assert_eq!(new_tree.find(&1), Some(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::comparator::{self, Comparator};
use crate::node::{self, Link, Node};
use crate::util::Edit;

/// An immutable Binary Search Tree ordered by a caller-supplied comparator.
///
/// Cloning a `Tree` is O(1): the clone shares the root. A `Tree` is `Send` and
/// `Sync` whenever `T` is, so any number of threads can read one snapshot
/// while others build new snapshots from it.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
    comparator: Comparator<T>,
}

/// Manual implementation of `Clone` so we don't need `T: Clone`.
impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            root: node::share(&self.root),
            len: self.len,
            comparator: Arc::clone(&self.comparator),
        }
    }
}

impl<T> Default for Tree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

/// Two trees are equal when they hold equal elements in the same order. Their
/// shapes may differ.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.to_list() == other.to_list()
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Generates a new, empty `Tree` ordered by `T`'s [`Ord`] impl.
    pub fn new() -> Self {
        Self::with_comparator_arc(comparator::natural())
    }

    /// A tree holding just `element`.
    pub fn singleton(element: T) -> Self {
        Self::new().insert(element)
    }

    /// Builds a tree by inserting `elements` one at a time, in order. Later
    /// duplicates replace earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let tree = Tree::from_elements(vec![0, 1]);
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(root.element(), &0);
    /// assert!(root.left().is_none());
    /// assert_eq!(root.right().unwrap().element(), &1);
    /// ```
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new().insert_all(elements)
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` ordered by `cmp`.
    ///
    /// `cmp` must be a total order; equal elements collapse into one node.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a))
    ///     .insert(1)
    ///     .insert(3)
    ///     .insert(2);
    ///
    /// assert_eq!(tree.to_list(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator<C>(cmp: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::with_comparator_arc(comparator::three_way(cmp))
    }

    /// Generates a new, empty `Tree` ordered by a "less-or-equal" predicate.
    pub fn with_less_or_equal<L>(le: L) -> Self
    where
        L: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::with_comparator_arc(comparator::from_less_or_equal(le))
    }

    /// Builds a tree ordered by `cmp` by inserting `elements` one at a time.
    pub fn from_elements_with<I, C>(elements: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = T>,
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::with_comparator(cmp).insert_all(elements)
    }

    fn with_comparator_arc(comparator: Comparator<T>) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
        }
    }

    fn insert_all<I>(self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        elements
            .into_iter()
            .fold(self, |tree, element| tree.insert(element))
    }

    /// The comparator this tree, and every tree derived from it, is ordered by.
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// How many elements are in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, for inspecting the tree's shape.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Whether both trees share the same root node (or are both empty). Trees
    /// returned by operations that found nothing to change share their root
    /// with the original.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns a new tree that includes `element`. An existing element the
    /// comparator considers equal is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let tree = Tree::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
    /// let new_tree = tree.insert((1, 'a'));
    /// let newer_tree = new_tree.insert((1, 'b'));
    ///
    /// // All history is preserved.
    /// assert_eq!(newer_tree.find(&(1, ' ')), Some(&(1, 'b')));
    /// assert_eq!(new_tree.find(&(1, ' ')), Some(&(1, 'a')));
    /// assert_eq!(tree.find(&(1, ' ')), None);
    /// ```
    pub fn insert(&self, element: T) -> Self {
        self.insert_with(element, |_, new| new)
    }

    /// Returns a new tree that includes `element`. If the comparator considers
    /// an existing element equal, the tree instead stores
    /// `conflict(existing, element)` in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let tree = Tree::with_comparator(|a: &(char, u32), b: &(char, u32)| a.0.cmp(&b.0))
    ///     .insert(('a', 1))
    ///     .insert_with(('a', 2), |old, new| (new.0, old.1 + new.1));
    ///
    /// assert_eq!(tree.find(&('a', 0)), Some(&('a', 3)));
    /// ```
    pub fn insert_with<F>(&self, element: T, conflict: F) -> Self
    where
        F: FnOnce(&T, T) -> T,
    {
        self.apply(node::insert(
            &self.root,
            element,
            &*self.comparator,
            conflict,
        ))
    }

    /// Returns a new tree without the element the comparator considers equal
    /// to `element`. Removing an absent element returns a tree sharing this
    /// tree's root.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let tree = Tree::from_elements(vec![0, 5, 3, 7, 2, 4, 6, 8]);
    /// let removed = tree.remove(&5);
    ///
    /// // 5's successor takes its place.
    /// assert_eq!(removed.root().unwrap().right().unwrap().element(), &6);
    /// assert_eq!(removed.len(), 7);
    /// assert_eq!(tree.len(), 8);
    ///
    /// assert!(removed.remove(&42).ptr_eq(&removed));
    /// ```
    pub fn remove(&self, element: &T) -> Self {
        let cmp = &*self.comparator;
        self.remove_by(element, |existing, element| {
            cmp(existing, element) == Ordering::Equal
        })
    }

    /// Like [`remove`][Self::remove], but a node is removed when
    /// `matches(existing, element)` holds. The search still descends by the
    /// comparator, and gives up at a node the comparator considers equal that
    /// `matches` rejects.
    pub fn remove_by<M>(&self, element: &T, matches: M) -> Self
    where
        M: Fn(&T, &T) -> bool,
    {
        self.apply(node::remove(
            &self.root,
            element,
            &*self.comparator,
            &matches,
        ))
    }

    /// Finds the element the comparator considers equal to `element` and
    /// replaces it with `merge(existing, element)`. When `merge` returns `None`
    /// the element is removed instead, exactly as [`remove`][Self::remove]
    /// would. If no element matches, returns a tree sharing this tree's root.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let counts = Tree::with_comparator(|a: &(char, u32), b: &(char, u32)| a.0.cmp(&b.0))
    ///     .insert(('a', 1))
    ///     .insert(('b', 1));
    ///
    /// let decrement = |old: &(char, u32), _| match old.1 {
    ///     1 => None,
    ///     n => Some((old.0, n - 1)),
    /// };
    /// let counts = counts.update(('a', 0), decrement);
    ///
    /// assert_eq!(counts.find(&('a', 0)), None);
    /// assert_eq!(counts.len(), 1);
    /// ```
    pub fn update<F>(&self, element: T, merge: F) -> Self
    where
        F: FnOnce(&T, T) -> Option<T>,
    {
        self.apply(node::update(&self.root, element, &*self.comparator, merge))
    }

    /// Potentially finds the stored element the comparator considers equal to
    /// `element`. If there is none, `None` is returned.
    pub fn find(&self, element: &T) -> Option<&T> {
        let cmp = &*self.comparator;
        self.find_by(element, |existing, element| {
            cmp(existing, element) == Ordering::Equal
        })
    }

    /// Like [`find`][Self::find], but returns the first element on the search
    /// path for which `matches(existing, element)` holds.
    pub fn find_by<M>(&self, element: &T, matches: M) -> Option<&T>
    where
        M: Fn(&T, &T) -> bool,
    {
        node::find(&self.root, element, &*self.comparator, &matches)
    }

    /// Whether an element the comparator considers equal to `element` is stored.
    pub fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    /// Every element in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// let tree = Tree::from_elements(vec![3, 1, 2, 3]);
    /// assert_eq!(tree.to_list(), vec![&1, &2, &3]);
    /// ```
    pub fn to_list(&self) -> Vec<&T> {
        self.to_list_with(|element| element)
    }

    /// Every element in ascending order, passed through `transform`.
    pub fn to_list_with<'a, U, F>(&'a self, mut transform: F) -> Vec<U>
    where
        F: FnMut(&'a T) -> U,
    {
        let mut out = Vec::with_capacity(self.len);
        node::in_order(&self.root, &mut transform, &mut out);
        out
    }

    /// The smallest element, if any.
    pub fn min(&self) -> Option<&T> {
        node::min(&self.root)
    }

    /// The largest element, if any.
    pub fn max(&self) -> Option<&T> {
        node::max(&self.root)
    }

    /// The depth of the deepest node, where the root has depth 0. An empty
    /// tree has a height of -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::Tree;
    ///
    /// assert_eq!(Tree::<i32>::new().height(), -1);
    /// assert_eq!(Tree::from_elements(vec![2, 1, 3]).height(), 1);
    /// assert_eq!(Tree::from_elements(vec![1, 2, 3]).height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        let mut depths = Vec::with_capacity(self.len);
        node::depths(&self.root, 0, &mut depths);
        depths.into_iter().max().map_or(-1, |depth| depth as isize)
    }

    /// An empty tree with the same comparator.
    pub fn clear(&self) -> Self {
        Self::with_comparator_arc(Arc::clone(&self.comparator))
    }

    fn apply(&self, edit: Edit<T>) -> Self {
        let (root, len) = match edit {
            Edit::NotFound => return self.clone(),
            Edit::Replaced(root) => (root, self.len),
            Edit::Grown(root) => (root, self.len + 1),
            Edit::Shrunk(root) => (root, self.len - 1),
        };
        Self {
            root,
            len,
            comparator: Arc::clone(&self.comparator),
        }
    }
}
