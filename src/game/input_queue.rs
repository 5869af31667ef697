use std::collections::VecDeque;

use super::action::Direction;

/// Maximum number of pending turns
pub const INPUT_QUEUE_CAPACITY: usize = 2;

/// Bounded FIFO of direction changes waiting to be applied.
///
/// Every entry is a quarter turn from the one before it (or from the current
/// direction for the first entry), so the queue can never hold a reversal.
/// Anything that does not fit is dropped without complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(INPUT_QUEUE_CAPACITY),
        }
    }

    /// Queue a turn. Returns whether it was accepted.
    pub fn enqueue(&mut self, direction: Direction, current: Direction) -> bool {
        if self.pending.len() >= INPUT_QUEUE_CAPACITY {
            return false;
        }

        let last = self.pending.back().copied().unwrap_or(current);
        if !last.is_perpendicular(direction) {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    /// Pop the next turn, once per tick.
    ///
    /// The popped direction is returned only if it is still a quarter turn from
    /// `current`; otherwise it is discarded and `None` is returned.
    pub fn dequeue_if_ready(&mut self, current: Direction) -> Option<Direction> {
        let next = self.pending.pop_front()?;
        current.is_perpendicular(next).then_some(next)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}
