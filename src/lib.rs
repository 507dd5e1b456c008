//! A linked (pointer-based) Binary Search Tree (BST) with ordered-value
//! storage, range queries, neighbor lookups, and explicit rebalancing.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one value
//! and sometimes has child `Node`s. The most important invariants of
//! this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value (duplicates are
//!    allowed and always routed right).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching the tree takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). Nothing rebalances
//! on insert, so a sorted insertion order degrades the tree into a chain
//! with `O(N)` searches. [`Tree::rebalance`] rebuilds the tree at minimal
//! height on request, restoring `O(lg N)` searches. BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree (see [`Tree::inorder`]).
//!
//! [`Tree::rebalance`]: linked::Tree::rebalance
//! [`Tree::inorder`]: linked::Tree::inorder

#![deny(missing_docs)]

pub mod linked;
pub mod stack;

#[cfg(test)]
mod test;
