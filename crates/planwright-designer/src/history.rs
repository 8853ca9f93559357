//! Linear undo/redo over full-state snapshots.
//!
//! `past` is a bounded stack (oldest entry evicted at capacity); `future`
//! holds undone states, most recent first. Committing after an undo drops
//! the whole `future`, so history never branches.

use std::collections::VecDeque;

/// Fixed-capacity stack that evicts from the bottom.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Creates an empty stack. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes onto the top, returning the evicted bottom entry if full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Undo/redo manager over snapshots of `T`.
///
/// The current state is owned by the caller; `undo` and `redo` swap it in
/// place.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: BoundedStack<T>,
    future: VecDeque<T>,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            past: BoundedStack::new(capacity),
            future: VecDeque::new(),
        }
    }

    /// Records the state as it was before a mutation.
    pub fn commit(&mut self, before: T) {
        if self.past.push(before).is_some() {
            tracing::debug!("History full, evicted oldest entry");
        }
        self.future.clear();
    }

    /// Restores the previous state. Returns `false` when there is none.
    pub fn undo(&mut self, current: &mut T) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(current, previous);
        self.future.push_front(undone);
        true
    }

    /// Re-applies the most recently undone state. Returns `false` when there
    /// is none.
    pub fn redo(&mut self, current: &mut T) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let replaced = std::mem::replace(current, next);
        self.past.push(replaced);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.past.capacity()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
