//! A minimal linked LIFO stack.
//!
//! This exists to drive the external preorder iteration over a
//! [`Tree`](crate::linked::Tree) and the iterative teardown of deep trees.
//! It intentionally exposes nothing beyond push, pop, and an emptiness
//! check.
//!
//! # Examples
//!
//! ```
//! use linked_bst::stack::Stack;
//!
//! let mut stack = Stack::new();
//! assert!(stack.is_empty());
//!
//! stack.push(1);
//! stack.push(2);
//!
//! // Strict LIFO order.
//! assert_eq!(stack.pop(), Some(2));
//! assert_eq!(stack.pop(), Some(1));
//! assert_eq!(stack.pop(), None);
//! ```

/// A linked stack. Items are pushed onto and popped off of the top.
pub struct Stack<T> {
    top: Option<Box<Frame<T>>>,
}

struct Frame<T> {
    item: T,
    below: Option<Box<Frame<T>>>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Generates a new, empty `Stack`.
    pub fn new() -> Self {
        Self { top: None }
    }

    /// Returns `true` if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Pushes an item onto the top of the stack.
    pub fn push(&mut self, item: T) {
        let below = self.top.take();
        self.top = Some(Box::new(Frame { item, below }));
    }

    /// Removes and returns the top item, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        let frame = self.top.take()?;
        self.top = frame.below;
        Some(frame.item)
    }
}

impl<T> Drop for Stack<T> {
    // Unlink frame by frame so dropping a deep stack can't recurse through
    // the whole `Box` chain.
    fn drop(&mut self) {
        let mut top = self.top.take();
        while let Some(mut frame) = top {
            top = frame.below.take();
        }
    }
}
