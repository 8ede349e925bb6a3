// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion index resolution for vertical lists.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

/// Slot at which an item dropped at vertical position `y` should be inserted.
///
/// `siblings` are the frames of the container's other items (the dragged item
/// excluded), in order. The sibling whose vertical center is nearest to `y`
/// wins, with ties kept by the earlier sibling. The result is that sibling's
/// index when `y` lies above its center and the index after it otherwise.
///
/// ```
/// use kurbo::Rect;
/// use understory_drag_drop::insertion_index;
///
/// let rows = [
///     Rect::new(0.0, 0.0, 100.0, 40.0),
///     Rect::new(0.0, 40.0, 100.0, 80.0),
/// ];
/// assert_eq!(insertion_index(rows, 5.0), 0);
/// assert_eq!(insertion_index(rows, 35.0), 1);
/// assert_eq!(insertion_index(rows, 500.0), 2);
/// assert_eq!(insertion_index(core::iter::empty(), 10.0), 0);
/// ```
pub fn insertion_index(siblings: impl IntoIterator<Item = Rect>, y: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    let mut len = 0;
    for (i, frame) in siblings.into_iter().enumerate() {
        len = i + 1;
        let center = frame.y0 + frame.height() * 0.5;
        let distance = (y - center).abs();
        if distance < best_distance {
            best_distance = distance;
            best = if y < center { i } else { i + 1 };
        }
    }
    best.min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn rows(n: usize) -> Vec<Rect> {
        (0..n)
            .map(|i| {
                let top = 40.0 * i as f64;
                Rect::new(0.0, top, 100.0, top + 40.0)
            })
            .collect()
    }

    #[test]
    fn above_and_below_each_center() {
        let r = rows(3);
        assert_eq!(insertion_index(r.iter().copied(), 19.0), 0);
        assert_eq!(insertion_index(r.iter().copied(), 21.0), 1);
        assert_eq!(insertion_index(r.iter().copied(), 59.0), 1);
        assert_eq!(insertion_index(r.iter().copied(), 61.0), 2);
        assert_eq!(insertion_index(r.iter().copied(), 101.0), 3);
    }

    #[test]
    fn exact_center_goes_after() {
        assert_eq!(insertion_index(rows(2), 20.0), 1);
    }

    #[test]
    fn equidistant_keeps_the_earlier_candidate() {
        // 40.0 is 20 away from both centers; the first row wins and 40 is below it.
        assert_eq!(insertion_index(rows(2), 40.0), 1);
    }

    #[test]
    fn far_outside_clamps() {
        assert_eq!(insertion_index(rows(3), -1_000.0), 0);
        assert_eq!(insertion_index(rows(3), 1_000.0), 3);
    }

    #[test]
    fn nan_resolves_to_the_front() {
        assert_eq!(insertion_index(rows(3), f64::NAN), 0);
    }
}
