// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame move coalescing.
//!
//! Pointer moves arrive far faster than frames. Between two frames only the
//! latest position of each pointer matters, so moves are parked here and drained
//! once per frame. Each entry remembers the serial of the gesture it was queued
//! for; the engine drops entries whose gesture has since ended.

use kurbo::Point;
use smallvec::SmallVec;

use crate::types::PointerId;

/// A move waiting for the next frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingMove {
    /// Pointer that moved.
    pub pointer: PointerId,
    /// Serial of the gesture the move was queued for.
    pub serial: u64,
    /// Latest position.
    pub position: Point,
}

/// Latest-wins move buffer, one slot per pointer.
#[derive(Clone, Debug, Default)]
pub struct FrameCoalescer {
    pending: SmallVec<[PendingMove; 4]>,
}

impl FrameCoalescer {
    /// Create an empty coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a move, replacing any earlier one for the same pointer.
    ///
    /// Returns `true` if the buffer was empty, meaning a frame must be requested.
    pub fn push(&mut self, pointer: PointerId, serial: u64, position: Point) -> bool {
        let was_empty = self.pending.is_empty();
        let entry = PendingMove {
            pointer,
            serial,
            position,
        };
        match self.pending.iter_mut().find(|p| p.pointer == pointer) {
            Some(slot) => *slot = entry,
            None => self.pending.push(entry),
        }
        was_empty
    }

    /// Drop the parked move for `pointer`, if any.
    pub fn discard(&mut self, pointer: PointerId) -> Option<PendingMove> {
        let i = self.pending.iter().position(|p| p.pointer == pointer)?;
        Some(self.pending.remove(i))
    }

    /// Drain every parked move in first-arrival order.
    pub fn take(&mut self) -> SmallVec<[PendingMove; 4]> {
        core::mem::take(&mut self.pending)
    }

    /// Returns `true` if no move is parked.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of parked moves.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Drop every parked move.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_move_wins_per_pointer() {
        let mut c = FrameCoalescer::new();
        assert!(c.push(PointerId(1), 1, Point::new(1.0, 1.0)));
        assert!(!c.push(PointerId(2), 2, Point::new(5.0, 5.0)));
        assert!(!c.push(PointerId(1), 1, Point::new(2.0, 2.0)));
        assert_eq!(c.len(), 2);

        let drained = c.take();
        assert_eq!(drained[0].pointer, PointerId(1));
        assert_eq!(drained[0].position, Point::new(2.0, 2.0));
        assert_eq!(drained[1].pointer, PointerId(2));
        assert!(c.is_empty());
    }

    #[test]
    fn discard_removes_only_that_pointer() {
        let mut c = FrameCoalescer::new();
        c.push(PointerId(1), 1, Point::ZERO);
        c.push(PointerId(2), 2, Point::ZERO);
        assert!(c.discard(PointerId(1)).is_some());
        assert!(c.discard(PointerId(1)).is_none());
        assert_eq!(c.len(), 1);
        c.clear();
        assert!(c.is_empty());
    }
}
