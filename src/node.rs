//! Nodes and the algorithms that rebuild them.
//!
//! A [`Node`] is never changed once built. Each algorithm here walks down from
//! a subtree root and, if it changes anything, builds new nodes for exactly the
//! path it walked. Every subtree off that path is shared with the old tree by
//! cloning its `Arc`.
//!
//! The tree is never rebalanced, so a path can be as long as the tree itself.
//! Every walk is a loop over an explicit path or stack rather than recursion.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::util::Edit;

/// An optional, shared child subtree.
pub(crate) type Link<T> = Option<Arc<Node<T>>>;

/// A tree cell holding one element and up to two children. Everything in the
/// left subtree orders strictly before the element and everything in the
/// right subtree orders strictly after it.
pub struct Node<T> {
    element: Arc<T>,
    left: Link<T>,
    right: Link<T>,
}

/// Which child of its parent a node on a walked path is.
#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// The ancestors visited on the way down, each with the side that was taken.
type Path<'a, T> = Vec<(&'a Node<T>, Side)>;

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

/// Dropping a chain of nodes would otherwise recurse once per level.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut stack: Vec<Arc<Node<T>>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());

        while let Some(node) = stack.pop() {
            // Subtrees still shared with another tree are left to their other owner.
            if let Ok(mut node) = Arc::try_unwrap(node) {
                stack.extend(node.left.take());
                stack.extend(node.right.take());
            }
        }
    }
}

impl<T> Node<T> {
    fn leaf(element: T) -> Self {
        Self {
            element: Arc::new(element),
            left: None,
            right: None,
        }
    }

    /// The element stored in this node.
    pub fn element(&self) -> &T {
        &self.element
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// A copy of this node with a different element and the same children.
    fn with_element(&self, element: Arc<T>) -> Link<T> {
        Some(Arc::new(Self {
            element,
            left: share(&self.left),
            right: share(&self.right),
        }))
    }

    /// A copy of this node with a different left subtree.
    fn with_left(&self, left: Link<T>) -> Link<T> {
        Some(Arc::new(Self {
            element: Arc::clone(&self.element),
            left,
            right: share(&self.right),
        }))
    }

    /// A copy of this node with a different right subtree.
    fn with_right(&self, right: Link<T>) -> Link<T> {
        Some(Arc::new(Self {
            element: Arc::clone(&self.element),
            left: share(&self.left),
            right,
        }))
    }
}

/// Shares a subtree with another parent.
pub(crate) fn share<T>(link: &Link<T>) -> Link<T> {
    link.as_ref().map(Arc::clone)
}

/// Copies every node on `path`, bottom-up, hanging `child` where the walk
/// ended and sharing every sibling subtree.
fn rebuild<T>(path: Path<'_, T>, child: Link<T>) -> Link<T> {
    path.into_iter()
        .rev()
        .fold(child, |child, (parent, side)| match side {
            Side::Left => parent.with_left(child),
            Side::Right => parent.with_right(child),
        })
}

/// Inserts `element` below `link`. An element the comparator calls equal to an
/// existing one replaces it with `conflict(existing, element)`.
pub(crate) fn insert<T, C, F>(link: &Link<T>, element: T, cmp: &C, conflict: F) -> Edit<T>
where
    C: Fn(&T, &T) -> Ordering + ?Sized,
    F: FnOnce(&T, T) -> T,
{
    let mut path = Path::new();
    let mut link = link;

    let edit = loop {
        let node = match link {
            None => break Edit::Grown(Some(Arc::new(Node::leaf(element)))),
            Some(node) => node,
        };

        match cmp(&element, node.element()) {
            Ordering::Less => {
                path.push((&**node, Side::Left));
                link = &node.left;
            }
            Ordering::Equal => {
                let resolved = conflict(node.element(), element);
                break Edit::Replaced(node.with_element(Arc::new(resolved)));
            }
            Ordering::Greater => {
                path.push((&**node, Side::Right));
                link = &node.right;
            }
        }
    };

    edit.map(|child| rebuild(path, child))
}

/// Removes the first node on the search path for `element` that `matches`
/// accepts. Descent follows the comparator, so a node the comparator calls
/// equal but `matches` rejects ends the search.
pub(crate) fn remove<T, C, M>(link: &Link<T>, element: &T, cmp: &C, matches: &M) -> Edit<T>
where
    C: Fn(&T, &T) -> Ordering + ?Sized,
    M: Fn(&T, &T) -> bool + ?Sized,
{
    let mut path = Path::new();
    let mut link = link;

    let edit = loop {
        let node = match link {
            None => break Edit::NotFound,
            Some(node) => node,
        };

        if matches(node.element(), element) {
            break Edit::Shrunk(promote(node));
        }

        match cmp(element, node.element()) {
            Ordering::Less => {
                path.push((&**node, Side::Left));
                link = &node.left;
            }
            Ordering::Equal => break Edit::NotFound,
            Ordering::Greater => {
                path.push((&**node, Side::Right));
                link = &node.right;
            }
        }
    };

    edit.map(|child| rebuild(path, child))
}

/// Finds the node the comparator calls equal to `element` and replaces its
/// element with `merge(existing, element)`, or removes the node when `merge`
/// returns `None`.
pub(crate) fn update<T, C, F>(link: &Link<T>, element: T, cmp: &C, merge: F) -> Edit<T>
where
    C: Fn(&T, &T) -> Ordering + ?Sized,
    F: FnOnce(&T, T) -> Option<T>,
{
    let mut path = Path::new();
    let mut link = link;

    let edit = loop {
        let node = match link {
            None => break Edit::NotFound,
            Some(node) => node,
        };

        match cmp(&element, node.element()) {
            Ordering::Less => {
                path.push((&**node, Side::Left));
                link = &node.left;
            }
            Ordering::Equal => {
                break match merge(node.element(), element) {
                    Some(merged) => Edit::Replaced(node.with_element(Arc::new(merged))),
                    None => Edit::Shrunk(promote(node)),
                };
            }
            Ordering::Greater => {
                path.push((&**node, Side::Right));
                link = &node.right;
            }
        }
    };

    edit.map(|child| rebuild(path, child))
}

/// Returns the subtree that takes the place of `node` once its element is
/// gone.
///
/// A node with at most one child is replaced by that child (or nothing). A
/// node with two children is replaced by a new node holding its in-order
/// successor, the leftmost element of the right subtree, with the successor
/// removed from the right subtree.
fn promote<T>(node: &Node<T>) -> Link<T> {
    match (&node.left, &node.right) {
        (None, None) => None,
        (Some(left), None) => Some(Arc::clone(left)),
        (None, Some(right)) => Some(Arc::clone(right)),
        (Some(left), Some(right)) => {
            let (successor, new_right) = remove_leftmost(right);
            Some(Arc::new(Node {
                element: successor,
                left: Some(Arc::clone(left)),
                right: new_right,
            }))
        }
    }
}

/// Returns the leftmost element of the subtree rooted at `node` and a new
/// subtree without it. The leftmost node has no left child so it is always
/// promoted through the at-most-one-child case.
fn remove_leftmost<T>(node: &Node<T>) -> (Arc<T>, Link<T>) {
    let mut path = Path::new();
    let mut node = node;
    while let Some(left) = &node.left {
        path.push((node, Side::Left));
        node = &**left;
    }

    (Arc::clone(&node.element), rebuild(path, promote(node)))
}

/// Binary search for the element `matches` accepts, guided by the comparator.
pub(crate) fn find<'a, T, C, M>(
    link: &'a Link<T>,
    element: &T,
    cmp: &C,
    matches: &M,
) -> Option<&'a T>
where
    C: Fn(&T, &T) -> Ordering + ?Sized,
    M: Fn(&T, &T) -> bool + ?Sized,
{
    let mut link = link;
    while let Some(node) = link {
        if matches(node.element(), element) {
            return Some(node.element());
        }

        link = match cmp(element, node.element()) {
            Ordering::Less => &node.left,
            Ordering::Equal => return None,
            Ordering::Greater => &node.right,
        };
    }
    None
}

/// In-order traversal pushing `visit(element)` for every element.
pub(crate) fn in_order<'a, T, U, F>(link: &'a Link<T>, visit: &mut F, out: &mut Vec<U>)
where
    F: FnMut(&'a T) -> U,
{
    let mut stack: Vec<&'a Node<T>> = Vec::new();
    let mut current = link.as_deref();

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left();
        }
        match stack.pop() {
            None => break,
            Some(node) => {
                out.push(visit(node.element()));
                current = node.right();
            }
        }
    }
}

pub(crate) fn min<T>(link: &Link<T>) -> Option<&T> {
    let mut node = link.as_ref()?;
    while let Some(left) = &node.left {
        node = left;
    }
    Some(node.element())
}

pub(crate) fn max<T>(link: &Link<T>) -> Option<&T> {
    let mut node = link.as_ref()?;
    while let Some(right) = &node.right {
        node = right;
    }
    Some(node.element())
}

/// Pushes the depth of every node below `link`, counting `depth` for `link`
/// itself.
pub(crate) fn depths<T>(link: &Link<T>, depth: usize, out: &mut Vec<usize>) {
    let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
    stack.extend(link.as_deref().map(|n| (n, depth)));

    while let Some((node, depth)) = stack.pop() {
        out.push(depth);
        stack.extend(node.left().map(|n| (n, depth + 1)));
        stack.extend(node.right().map(|n| (n, depth + 1)));
    }
}

/// A tree that only ever goes right, built directly instead of through
/// `insert`, which would copy the whole chain once per element.
#[cfg(test)]
pub(crate) fn right_spine<T, I>(elements: I) -> Link<T>
where
    I: DoubleEndedIterator<Item = T>,
{
    elements.rev().fold(None, |right, element| {
        Some(Arc::new(Node {
            element: Arc::new(element),
            left: None,
            right,
        }))
    })
}
