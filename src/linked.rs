//! A linked BST. Nodes own their children through `Option<Box<..>>` links,
//! so the structure is a strict tree by construction. Nothing rebalances on
//! insert; [`Tree::rebalance`] restores minimal height on request.
//!
//! # Examples
//!
//! ```
//! use linked_bst::linked::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//! assert!(tree.contains(&1));
//!
//! // Removing a value returns it.
//! let removed = tree.remove(&1);
//!
//! assert_eq!(removed, Ok(1));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use thiserror::Error;

use crate::stack::Stack;

type Link<T> = Option<Box<Node<T>>>;

/// The error returned by fallible tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// [`Tree::remove`] was asked for an item the tree does not contain.
    #[error("item not in tree")]
    ItemNotFound,
}

/// A node of the tree: one stored value and two optional children.
///
/// Nodes are created by [`Tree::add`] and only ever handed out as shared
/// references (see [`Tree::root`]), so the structural queries here cannot
/// violate the tree's invariants.
#[derive(Debug)]
pub struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// This node's left child, if present.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// This node's right child, if present.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns `true` if both children are absent.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// A lazy iterator over the children that are present (0, 1, or 2
    /// nodes), left before right.
    pub fn children(&self) -> Children<'_, T> {
        Children {
            left: self.left(),
            right: self.right(),
        }
    }

    /// The height of the subtree rooted at this node. A leaf has height 0;
    /// otherwise it is one more than the tallest child.
    ///
    /// Recurses proportionally to the subtree height.
    pub fn height(&self) -> usize {
        match self.children().map(Self::height).max() {
            Some(tallest_child) => 1 + tallest_child,
            None => 0,
        }
    }

    /// The smallest value in the subtree rooted at this node: the leftmost
    /// reachable value, found by pure iteration.
    pub fn minimum(&self) -> &T {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        &current.data
    }

    /// The largest value in the subtree rooted at this node: the rightmost
    /// reachable value, found by pure iteration.
    pub fn maximum(&self) -> &T {
        let mut current = self;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        &current.data
    }

    /// Unlinks and returns the maximum node reachable from `link`,
    /// reattaching that node's left child (if any) in its place.
    fn unlink_max(mut link: &mut Link<T>) -> Link<T> {
        if link.is_none() {
            return None;
        }
        while link.as_ref().map_or(false, |node| node.right.is_some()) {
            link = &mut link.as_mut().expect("checked by the loop guard").right;
        }
        let mut max = link.take();
        *link = max.as_mut().and_then(|node| node.left.take());
        max
    }

    fn collect_inorder<'a>(&'a self, items: &mut Vec<&'a T>) {
        if let Some(left) = self.left.as_deref() {
            left.collect_inorder(items);
        }
        items.push(&self.data);
        if let Some(right) = self.right.as_deref() {
            right.collect_inorder(items);
        }
    }

    /// Consumes a subtree, pushing its values into `items` in sorted order.
    fn drain_inorder(link: Link<T>, items: &mut Vec<T>) {
        if let Some(node) = link {
            let Node { data, left, right } = *node;
            Self::drain_inorder(left, items);
            items.push(data);
            Self::drain_inorder(right, items);
        }
    }

    fn range_find<'a>(&'a self, low: &T, high: &T, items: &mut Vec<&'a T>)
    where
        T: Ord,
    {
        if let Some(left) = self.left.as_deref() {
            left.range_find(low, high, items);
        }
        if low <= &self.data && &self.data <= high {
            items.push(&self.data);
        }
        if let Some(right) = self.right.as_deref() {
            right.range_find(low, high, items);
        }
    }

    fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        // This node is the tight answer when it beats `item` and nothing in
        // its left subtree does.
        if self.data > *item && self.left.as_deref().map_or(true, |left| left.maximum() <= item) {
            return Some(&self.data);
        }
        if self.data <= *item {
            self.right.as_deref().and_then(|right| right.successor(item))
        } else {
            self.left.as_deref().and_then(|left| left.successor(item))
        }
    }

    fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        if self.data < *item && self.right.as_deref().map_or(true, |right| right.minimum() >= item)
        {
            return Some(&self.data);
        }
        if self.data >= *item {
            self.left.as_deref().and_then(|left| left.predecessor(item))
        } else {
            self.right
                .as_deref()
                .and_then(|right| right.predecessor(item))
        }
    }

    fn render(&self, level: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Some(right) = self.right.as_deref() {
            right.render(level + 1, f)?;
        }
        for _ in 0..level {
            f.write_str("| ")?;
        }
        writeln!(f, "{}", self.data)?;
        if let Some(left) = self.left.as_deref() {
            left.render(level + 1, f)?;
        }
        Ok(())
    }
}

/// A linked Binary Search Tree storing values with a total order.
///
/// Duplicates are allowed; an equal value is always inserted into the right
/// subtree of the node it ties with, and each copy counts toward
/// [`len`](Tree::len).
#[derive(Debug)]
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // Unlink node by node so dropping a degenerate (chain-shaped) tree
    // can't recurse through the whole `Box` chain.
    fn drop(&mut self) {
        let mut stack = Stack::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of stored values, duplicates included.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Read-only access to the root node, as an entry point for the
    /// node-level structural queries ([`Node::is_leaf`], [`Node::children`],
    /// [`Node::height`]).
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Makes the tree empty.
    pub fn clear(&mut self) {
        // Replacing self routes the old nodes through the iterative
        // teardown in `Drop`.
        *self = Self::new();
    }

    /// Potentially finds the stored value matching `item`. If no node
    /// matches, `None` is returned.
    ///
    /// Walks from the root without recursing: equal stops, less descends
    /// left, greater descends right. With duplicates present the topmost
    /// match is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match item.cmp(&node.data) {
                Ordering::Equal => return Some(&node.data),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Returns `true` if `item` matches a stored value. This is the boolean
    /// projection of [`find`](Tree::find).
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds `item` to the tree.
    ///
    /// Descends to an absent child slot and attaches a new leaf there; an
    /// empty tree stores `item` at the root. Duplicates always go into the
    /// right subtree of an equal node and increase [`len`](Tree::len).
    /// Nothing rebalances here, so sorted insertion orders degrade the tree
    /// into a chain until [`rebalance`](Tree::rebalance) is called.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        // Less goes left; greater or equal goes right. Routing ties right
        // gives duplicates a stable home in the right subtree. The descent
        // is iterative so a degenerate chain cannot overflow the call
        // stack.
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(Node::new(item)));
        self.size += 1;
    }

    /// Removes one occurrence of `item` from the tree and returns the
    /// stored value.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::ItemNotFound`] if the tree does not contain
    /// `item` (an empty tree trivially does not). The tree is left
    /// unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.remove(&1), Ok(1));
    /// assert_eq!(tree.remove(&1), Err(TreeError::ItemNotFound));
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T, TreeError>
    where
        T: Ord,
    {
        // Walk to the link that owns the target node. Starting from the
        // root link makes removing the root the same case as removing any
        // child.
        let mut link = &mut self.root;
        while link.as_ref().map_or(false, |node| *item != node.data) {
            let node = link.as_mut().expect("checked by the loop guard");
            link = if *item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        let Some(node) = link.as_deref_mut() else {
            return Err(TreeError::ItemNotFound);
        };
        if node.left.is_some() && node.right.is_some() {
            // Both children: lift the maximum of the left subtree into
            // this node instead of unlinking it.
            let max = Node::unlink_max(&mut node.left)
                .expect("two-child case implies a left subtree");
            let removed = mem::replace(&mut node.data, max.data);
            self.size -= 1;
            return Ok(removed);
        }
        // At most one child: splice it into the owning link.
        let child = if node.left.is_some() {
            node.left.take()
        } else {
            node.right.take()
        };
        let target = mem::replace(link, child).expect("the walk stopped at a filled link");
        self.size -= 1;
        Ok(target.data)
    }

    /// If `item` matches a stored value, overwrites it with `new_item` in
    /// place and returns the old value, or returns `None` otherwise.
    ///
    /// The node is not re-sorted: the caller must guarantee that `new_item`
    /// keeps the order invariant relative to the node's position, otherwise
    /// later searches may miss values. This is not enforced.
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match item.cmp(&node.data) {
                Ordering::Equal => return Some(mem::replace(&mut node.data, new_item)),
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// A lazy preorder traversal (node, then left subtree, then right
    /// subtree). This is also the tree's default iteration order.
    ///
    /// One value is produced per step, driven by an explicit stack rather
    /// than recursion, so consuming only a prefix does no further work.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
    /// let preorder: Vec<&i32> = tree.preorder().collect();
    ///
    /// assert_eq!(preorder, [&2, &1, &3]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, T> {
        let mut stack = Stack::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(root);
        }
        Preorder { stack }
    }

    /// An alias for [`preorder`](Tree::preorder), the default traversal.
    pub fn iter(&self) -> Preorder<'_, T> {
        self.preorder()
    }

    /// An inorder traversal (left subtree, then node, then right subtree),
    /// which yields the values in sorted order.
    ///
    /// Unlike [`preorder`](Tree::preorder) this is eager: the full ordered
    /// sequence is materialized before the iterator is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 3, 1].into_iter().collect();
    /// let inorder: Vec<&i32> = tree.inorder().collect();
    ///
    /// assert_eq!(inorder, [&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> std::vec::IntoIter<&T> {
        let mut items = Vec::with_capacity(self.size);
        if let Some(root) = self.root.as_deref() {
            root.collect_inorder(&mut items);
        }
        items.into_iter()
    }

    /// The height of the tree, or `None` if it is empty. A single node has
    /// height 0.
    pub fn height(&self) -> Option<usize> {
        self.root.as_deref().map(Node::height)
    }

    /// Returns `true` if `height < 2 * log2(len)`.
    ///
    /// This is a diagnostic heuristic, not an AVL-style guarantee. An empty
    /// tree reports balanced; note that the strict inequality makes a
    /// single-node tree report unbalanced.
    pub fn is_balanced(&self) -> bool {
        match self.height() {
            None => true,
            Some(height) => (height as f64) < 2.0 * (self.size as f64).log2(),
        }
    }

    /// Collects every stored value `v` with `low <= v <= high`, in sorted
    /// order.
    ///
    /// The walk recurses into both subtrees unconditionally rather than
    /// pruning with the order invariant, trading speed for simplicity.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 4, 6, 8, 10].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&4, &8), [&4, &6, &8]);
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        let mut items = Vec::new();
        if let Some(root) = self.root.as_deref() {
            root.range_find(low, high, &mut items);
        }
        items
    }

    /// The smallest stored value strictly greater than `item`, or `None` if
    /// there is no such value. `item` itself need not be stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<i32> = [1, 3, 5, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&7));
    /// assert_eq!(tree.successor(&7), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.root.as_deref().and_then(|root| root.successor(item))
    }

    /// The largest stored value strictly less than `item`, or `None` if
    /// there is no such value. `item` itself need not be stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<i32> = [1, 3, 5, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&3), Some(&1));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.root
            .as_deref()
            .and_then(|root| root.predecessor(item))
    }

    /// The smallest stored value, or `None` if the tree is empty.
    pub fn minimum(&self) -> Option<&T> {
        self.root.as_deref().map(Node::minimum)
    }

    /// The largest stored value, or `None` if the tree is empty.
    pub fn maximum(&self) -> Option<&T> {
        self.root.as_deref().map(Node::maximum)
    }

    /// Rebuilds the tree to minimize its height for the current contents
    /// and returns the stored values in sorted order.
    ///
    /// All values are drained inorder (no node of the old structure is
    /// kept), then re-inserted through [`add`](Tree::add) in an order that
    /// places the lower median of each subrange first. For distinct
    /// values, inserting each median before its halves builds a tree of
    /// height `ceil(log2(n + 1)) - 1` with no restructuring. Runs of equal
    /// values still chain into one another's right subtrees, since ties
    /// route right on insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// // A worst-case chain of height 6.
    /// let mut tree: Tree<i32> = (1..=7).collect();
    /// assert_eq!(tree.height(), Some(6));
    ///
    /// let sorted = tree.rebalance();
    ///
    /// assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(tree.height(), Some(2));
    /// ```
    pub fn rebalance(&mut self) -> Vec<T>
    where
        T: Ord + Clone,
    {
        // Inorder of a valid BST is already sorted.
        let mut items = Vec::with_capacity(self.size);
        Node::drain_inorder(self.root.take(), &mut items);
        self.size = 0;

        let mut insertion_order = Vec::with_capacity(items.len());
        Self::median_first(&items, &mut insertion_order);
        for item in insertion_order {
            self.add(item);
        }
        items
    }

    /// Pushes the lower median of `items`, then recurses on the left and
    /// right halves.
    fn median_first(items: &[T], order: &mut Vec<T>)
    where
        T: Clone,
    {
        if items.is_empty() {
            return;
        }
        let mid = items.len() / 2;
        order.push(items[mid].clone());
        Self::median_first(&items[..mid], order);
        Self::median_first(&items[mid + 1..], order);
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    /// Builds a tree by [`add`](Tree::add)ing each value in iteration
    /// order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Preorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.preorder()
    }
}

impl<T: PartialEq> PartialEq for Tree<T> {
    /// Two trees are equal when they have the same size and yield equal
    /// values in default (preorder) iteration order.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    /// Renders the tree rotated 90 degrees counterclockwise: the right
    /// subtree above, the left subtree below, one `"| "` per level of
    /// depth.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(root) = self.root.as_deref() {
            root.render(0, f)?;
        }
        Ok(())
    }
}

/// The lazy iterator returned by [`Tree::preorder`]. Yields one value per
/// step by popping a node and pushing its right child before its left, so
/// the left subtree is visited first.
pub struct Preorder<'a, T> {
    stack: Stack<&'a Node<T>>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(&node.data)
    }
}

/// The lazy iterator returned by [`Node::children`]. Yields the present
/// children only, left before right.
pub struct Children<'a, T> {
    left: Option<&'a Node<T>>,
    right: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.left.take().or_else(|| self.right.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(items: &[i32]) -> Tree<i32> {
        items.iter().copied().collect()
    }

    #[test]
    fn find_and_contains_agree() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);

        for present in [5, 3, 8, 1, 4, 7, 9] {
            assert_eq!(tree.find(&present), Some(&present));
            assert!(tree.contains(&present));
        }
        for absent in [0, 2, 6, 10] {
            assert_eq!(tree.find(&absent), None);
            assert!(!tree.contains(&absent));
        }
    }

    #[test]
    fn add_routes_duplicates_right() {
        let tree = tree_of(&[5, 5, 5]);

        assert_eq!(tree.len(), 3);
        let root = tree.root().unwrap();
        assert!(root.left().is_none());
        let second = root.right().unwrap();
        assert!(second.left().is_none());
        assert!(second.right().unwrap().is_leaf());
    }

    #[test]
    fn inorder_is_sorted_after_any_insertion_order() {
        let tree = tree_of(&[8, 3, 10, 1, 6, 14, 4, 7, 13]);

        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
    }

    #[test]
    fn preorder_visits_node_before_subtrees() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);

        let preorder: Vec<i32> = tree.preorder().copied().collect();
        assert_eq!(preorder, vec![5, 3, 1, 4, 8, 7, 9]);
    }

    #[test]
    fn preorder_is_the_default_iteration() {
        let tree = tree_of(&[2, 1, 3]);

        let via_for: Vec<i32> = (&tree).into_iter().copied().collect();
        assert_eq!(via_for, vec![2, 1, 3]);

        // Consuming a prefix is enough to observe the first value.
        assert_eq!(tree.iter().next(), Some(&2));
    }

    #[test]
    fn remove_leaf() {
        let mut tree = tree_of(&[5, 3, 7]);

        assert_eq!(tree.remove(&7), Ok(7));
        assert_eq!(tree.find(&7), None);
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&5) && tree.contains(&3));
    }

    #[test]
    fn remove_node_with_only_right_child() {
        let mut tree = tree_of(&[5, 3, 7, 9]);

        assert_eq!(tree.remove(&7), Ok(7));
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![3, 5, 9]);
    }

    #[test]
    fn remove_node_with_only_left_child() {
        let mut tree = tree_of(&[5, 3, 7, 6]);

        assert_eq!(tree.remove(&7), Ok(7));
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![3, 5, 6]);
    }

    #[test]
    fn remove_node_with_two_children_lifts_left_maximum() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(tree.remove(&3), Ok(3));

        // 3 is replaced in place by 1, the maximum of its left subtree.
        assert_eq!(tree.root().unwrap().left().unwrap().data(), &1);
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![1, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn remove_reattaches_left_child_of_lifted_maximum() {
        // The maximum of 5's left subtree is 4, which has a left child (3)
        // that must be reattached to 4's parent.
        let mut tree = tree_of(&[5, 2, 8, 1, 4, 3]);

        assert_eq!(tree.remove(&5), Ok(5));
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![1, 2, 3, 4, 8]);
        assert_eq!(tree.root().unwrap().data(), &4);
    }

    #[test]
    fn remove_root() {
        let mut tree = tree_of(&[5]);

        assert_eq!(tree.remove(&5), Ok(5));
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn remove_absent_item_fails_and_leaves_tree_unchanged() {
        let mut tree = tree_of(&[5, 3, 7]);

        assert_eq!(tree.remove(&42), Err(TreeError::ItemNotFound));
        assert_eq!(tree.len(), 3);
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![3, 5, 7]);
    }

    #[test]
    fn remove_from_empty_tree_fails() {
        let mut tree: Tree<i32> = Tree::new();
        assert_eq!(tree.remove(&1), Err(TreeError::ItemNotFound));
    }

    #[test]
    fn remove_one_of_equal_items() {
        let mut tree = tree_of(&[5, 5, 5]);

        assert_eq!(tree.remove(&5), Ok(5));
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&5));
    }

    #[test]
    fn size_tracks_mutations() {
        let mut tree = Tree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());

        tree.add(2);
        tree.add(1);
        tree.add(3);
        assert_eq!(tree.len(), 3);

        tree.remove(&1).unwrap();
        assert_eq!(tree.len(), 2);

        tree.rebalance();
        assert_eq!(tree.len(), 2);

        tree.clear();
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut tree = tree_of(&[5, 3, 7]);

        assert_eq!(tree.replace(&3, 4), Some(3));
        assert_eq!(tree.replace(&42, 0), None);

        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![4, 5, 7]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn structural_queries() {
        let tree = tree_of(&[5, 3, 8, 1]);

        let root = tree.root().unwrap();
        assert!(!root.is_leaf());
        assert!(root.right().unwrap().is_leaf());

        let children: Vec<&i32> = root.children().map(Node::data).collect();
        assert_eq!(children, [&3, &8]);

        assert_eq!(root.height(), 2);
        assert_eq!(root.right().unwrap().height(), 0);
        assert_eq!(tree.height(), Some(2));
    }

    #[test]
    fn height_of_empty_tree_is_undefined() {
        let tree: Tree<i32> = Tree::new();
        assert_eq!(tree.height(), None);
    }

    #[test]
    fn children_of_node_with_one_child() {
        let tree = tree_of(&[5, 8]);

        let root = tree.root().unwrap();
        let children: Vec<&i32> = root.children().map(Node::data).collect();
        assert_eq!(children, [&8]);
    }

    #[test]
    fn is_balanced_heuristic() {
        // A sorted insertion order produces a chain of height 6.
        let mut tree: Tree<i32> = (1..=7).collect();
        assert!(!tree.is_balanced());

        tree.rebalance();
        assert!(tree.is_balanced());

        let empty: Tree<i32> = Tree::new();
        assert!(empty.is_balanced());
    }

    #[test]
    fn range_find_returns_sorted_inclusive_range() {
        let tree = tree_of(&[2, 4, 6, 8, 10]);

        assert_eq!(tree.range_find(&4, &8), [&4, &6, &8]);
        assert_eq!(tree.range_find(&0, &1), Vec::<&i32>::new());
        assert_eq!(tree.range_find(&0, &100).len(), 5);
    }

    #[test]
    fn successor_and_predecessor_boundaries() {
        let tree = tree_of(&[1, 3, 5, 7]);

        assert_eq!(tree.successor(&5), Some(&7));
        assert_eq!(tree.successor(&7), None);
        assert_eq!(tree.predecessor(&3), Some(&1));
        assert_eq!(tree.predecessor(&1), None);

        // The query value need not be stored.
        assert_eq!(tree.successor(&4), Some(&5));
        assert_eq!(tree.predecessor(&4), Some(&3));
    }

    #[test]
    fn minimum_and_maximum() {
        let tree = tree_of(&[5, 3, 8, 1, 9]);

        assert_eq!(tree.minimum(), Some(&1));
        assert_eq!(tree.maximum(), Some(&9));

        let empty: Tree<i32> = Tree::new();
        assert_eq!(empty.minimum(), None);
        assert_eq!(empty.maximum(), None);
    }

    #[test]
    fn rebalance_round_trips_contents() {
        let mut tree = tree_of(&[9, 1, 8, 2, 7, 3, 6, 4, 5, 5]);
        let before: Vec<i32> = tree.inorder().copied().collect();

        let sorted = tree.rebalance();

        assert_eq!(sorted, before);
        let after: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(after, before);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn rebalance_minimizes_height() {
        for n in [1usize, 2, 3, 7, 8, 15, 16, 100] {
            let mut tree: Tree<usize> = (0..n).collect();
            tree.rebalance();

            // ceil(log2(n + 1)) - 1, the minimum possible height.
            let bound = n.ilog2() as usize;
            assert!(tree.height().unwrap() <= bound, "n = {n}");
        }
    }

    #[test]
    fn rebalance_chains_equal_values_right() {
        let mut tree = tree_of(&[5, 5, 5]);

        assert_eq!(tree.rebalance(), vec![5, 5, 5]);
        // Each re-inserted 5 lands in the right subtree of the previous
        // one, so equal values rebuild a chain, not a minimal-height tree.
        assert_eq!(tree.height(), Some(2));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn rebalance_of_empty_tree_is_a_no_op() {
        let mut tree: Tree<i32> = Tree::new();
        assert_eq!(tree.rebalance(), Vec::<i32>::new());
        assert!(tree.is_empty());
    }

    // The worked example: insert, search, remove, rebalance.
    #[test]
    fn insert_search_remove_rebalance_scenario() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(tree.find(&4), Some(&4));

        assert_eq!(tree.remove(&5), Ok(5));
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(inorder, vec![1, 3, 4, 7, 8, 9]);

        tree.rebalance();
        assert_eq!(tree.height(), Some(2));
    }

    #[test]
    fn equal_trees_compare_equal() {
        let a = tree_of(&[2, 1, 3]);
        let b = tree_of(&[2, 1, 3]);
        let c = tree_of(&[1, 2, 3]);

        assert_eq!(a, b);
        // Same contents, different shape (and different preorder).
        assert_ne!(a, c);
    }

    #[test]
    fn display_renders_rotated_tree() {
        let tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");

        let empty: Tree<i32> = Tree::new();
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn remove_from_end_of_degenerate_chain() {
        let mut tree: Tree<u32> = (0..10_000).collect();

        assert_eq!(tree.remove(&9_999), Ok(9_999));
        assert_eq!(tree.remove(&0), Ok(0));
        assert_eq!(tree.len(), 9_998);
        assert!(!tree.contains(&9_999));
        assert!(tree.contains(&1));
    }

    #[test]
    fn drop_degenerate_chain() {
        // Sorted insertion builds a 10_000-deep chain; teardown must not
        // recurse through it.
        let tree: Tree<u32> = (0..10_000).collect();
        drop(tree);
    }

    #[test]
    fn clear_degenerate_chain() {
        let mut tree: Tree<u32> = (0..10_000).collect();
        tree.clear();
        assert!(tree.is_empty());
        tree.add(1);
        assert_eq!(tree.len(), 1);
    }
}
