use serde::{Deserialize, Serialize};

/// Bounded LIFO of undoable operation records.
///
/// The depth is an explicit constructor parameter rather than an implicit
/// convention; the cart instantiates it with capacity 1 for single-step
/// undo. Pushing onto a full stack drops the oldest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoStack<T> {
    capacity: usize,
    ops: Vec<T>,
}

impl<T> UndoStack<T> {
    pub fn new(capacity: usize) -> Self {
        UndoStack {
            capacity: capacity.max(1),
            ops: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, op: T) {
        if self.ops.len() == self.capacity {
            self.ops.remove(0);
        }
        self.ops.push(op);
    }

    /// Take the most recent record; `None` when empty or already consumed.
    pub fn pop(&mut self) -> Option<T> {
        self.ops.pop()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
