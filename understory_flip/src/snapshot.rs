// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots: the "first" half of FLIP.
//!
//! A [`GeometrySnapshot`] records the on-screen origin of every tracked item
//! before a structural change. After the change, [`GeometrySnapshot::into_deltas`]
//! measures the items again and yields, for each item that moved, the offset from
//! its new origin back to its old one. The snapshot is consumed by that call, so it
//! can never be diffed against a later layout by accident.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_flip::GeometrySnapshot;
//!
//! let before = [(1_u32, Point::new(0.0, 0.0)), (2, Point::new(0.0, 40.0))];
//! let snapshot = GeometrySnapshot::capture([1, 2], |k| {
//!     before.iter().find(|(id, _)| *id == k).map(|(_, p)| *p)
//! });
//!
//! // Items swap places.
//! let after = [(1_u32, Point::new(0.0, 40.0)), (2, Point::new(0.0, 0.0))];
//! let deltas = snapshot.into_deltas(|k| {
//!     after.iter().find(|(id, _)| *id == k).map(|(_, p)| *p)
//! });
//! assert_eq!(deltas, vec![(1, Vec2::new(0.0, -40.0)), (2, Vec2::new(0.0, 40.0))]);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Lists are short (bounded by what is on screen), so keep them inline.
const INLINE_CAPACITY: usize = 16;

/// Pre-change origins for a set of items, in capture order.
#[derive(Clone, Debug)]
pub struct GeometrySnapshot<K> {
    entries: SmallVec<[(K, Point); INLINE_CAPACITY]>,
}

impl<K: Copy + PartialEq> GeometrySnapshot<K> {
    /// Capture the origin of each item.
    ///
    /// Items for which `measure` returns `None` (not laid out, already removed)
    /// are skipped and will never produce a delta.
    pub fn capture(
        items: impl IntoIterator<Item = K>,
        mut measure: impl FnMut(K) -> Option<Point>,
    ) -> Self {
        let entries = items
            .into_iter()
            .filter_map(|item| measure(item).map(|origin| (item, origin)))
            .collect();
        Self { entries }
    }

    /// Number of captured items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captured origin of `item`, if it was measured.
    pub fn origin(&self, item: K) -> Option<Point> {
        self.entries
            .iter()
            .find(|(k, _)| *k == item)
            .map(|(_, origin)| *origin)
    }

    /// Measure every captured item again and return the inverse offsets of the
    /// ones that moved, in capture order.
    ///
    /// The delta is `old - new`: translating the item by it puts it back where it
    /// was before the change. Items that did not move, or that can no longer be
    /// measured, are omitted.
    pub fn into_deltas(self, mut measure: impl FnMut(K) -> Option<Point>) -> Vec<(K, Vec2)> {
        self.entries
            .into_iter()
            .filter_map(|(item, old)| {
                let new = measure(item)?;
                let delta = old - new;
                (delta != Vec2::ZERO).then_some((item, delta))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn unmeasured_items_are_skipped() {
        let snap = GeometrySnapshot::capture([1_u32, 2, 3], |k| {
            (k != 2).then(|| Point::new(0.0, f64::from(k) * 10.0))
        });
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.origin(2), None);
        assert_eq!(snap.origin(3), Some(Point::new(0.0, 30.0)));
    }

    #[test]
    fn stationary_items_produce_no_delta() {
        let snap = GeometrySnapshot::capture([1_u32, 2], |k| Some(Point::new(0.0, f64::from(k))));
        let deltas = snap.into_deltas(|k| Some(Point::new(0.0, f64::from(k))));
        assert!(deltas.is_empty());
    }

    #[test]
    fn items_that_disappear_produce_no_delta() {
        let snap = GeometrySnapshot::capture([1_u32, 2], |_| Some(Point::ZERO));
        let deltas = snap.into_deltas(|k| (k == 1).then_some(Point::new(5.0, 0.0)));
        assert_eq!(deltas, vec![(1, Vec2::new(-5.0, 0.0))]);
    }

    #[test]
    fn empty_snapshot() {
        let snap = GeometrySnapshot::<u32>::capture([], |_| None);
        assert!(snap.is_empty());
        assert!(snap.into_deltas(|_| Some(Point::ZERO)).is_empty());
    }
}
