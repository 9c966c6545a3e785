//! This crate exposes a persistent Binary Search Tree (BST) ordered by a
//! caller-supplied comparator.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an element and
//! will sometimes have child `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an
//!    element ordered before its own element.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an
//!    element ordered after its own element.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for an element takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). The [`Tree`] here does no
//! rebalancing, so its height depends on the order elements were inserted in:
//! random order gives `O(lg N)` on average while sorted order gives `N - 1`.
//! BSTs also naturally support sorted iteration by visiting the left subtree,
//! then the subtree root, then the right subtree.
//!
//! ## Persistence
//!
//! A [`Tree`] is never modified. `insert`, `remove`, `update` and `clear`
//! return a new [`Tree`] that rebuilds only the nodes on the path from the root
//! to the change and shares every other subtree with the original, so every
//! earlier version stays valid and readable from any thread.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod comparator;
mod node;
mod tree;
mod util;

pub use comparator::Comparator;
pub use node::Node;
pub use tree::Tree;
