// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder passes over arbitrary column orders.

use std::collections::BTreeSet;

use kurbo::Rect;
use proptest::prelude::*;
use understory_flip::{
    DEFAULT_GRAB_SCALE, FlipSurface, ItemTransform, ReorderAnimator, Transition,
};

const ROW: f64 = 40.0;

#[derive(Debug, Default)]
struct Column {
    order: Vec<u32>,
    animated: Vec<(u32, ItemTransform)>,
    settled: Vec<u32>,
}

impl FlipSurface<u32> for Column {
    fn bounding_box(&self, item: u32) -> Option<Rect> {
        let slot = self.order.iter().position(|&k| k == item)? as f64;
        Some(Rect::new(0.0, slot * ROW, 100.0, (slot + 1.0) * ROW))
    }

    fn splice(&mut self, _container: u32, item: u32, index: usize) {
        self.order.retain(|&k| k != item);
        let index = index.min(self.order.len());
        self.order.insert(index, item);
    }

    fn animate(&mut self, item: u32, from: ItemTransform, _: ItemTransform, _: Transition) {
        self.animated.push((item, from));
    }

    fn settle(&mut self, item: u32, _rest: ItemTransform) {
        self.settled.push(item);
    }
}

/// A shuffled column of 1 to 8 items, one of them, and a target index.
fn column() -> impl Strategy<Value = (Vec<u32>, usize, usize)> {
    (1_usize..=8).prop_flat_map(|n| {
        let items: Vec<u32> = (0_u32..).take(n).collect();
        (Just(items).prop_shuffle(), 0..n, 0..n)
    })
}

proptest! {
    #[test]
    fn dragged_item_lands_at_index_and_others_keep_order((order, from, to) in column()) {
        let dragged = order[from];
        let mut col = Column { order: order.clone(), ..Column::default() };
        let mut animator = ReorderAnimator::new();

        let moved = animator.reorder(&mut col, 0, &order, dragged, to, 0);

        prop_assert_eq!(col.order[to], dragged);
        let rest_before: Vec<u32> = order.iter().copied().filter(|&k| k != dragged).collect();
        let rest_after: Vec<u32> = col.order.iter().copied().filter(|&k| k != dragged).collect();
        prop_assert_eq!(rest_before, rest_after);

        // Exactly the items whose slot changed are animated, plus the dragged item.
        let changed = order
            .iter()
            .enumerate()
            .filter(|&(slot, &k)| col.order[slot] != k || k == dragged)
            .count();
        prop_assert_eq!(moved, changed);
        prop_assert_eq!(col.animated.len(), changed);
        prop_assert_eq!(animator.passes(), 1);

        // Each inversion points back at the item's previous slot.
        for &(item, from_transform) in &col.animated {
            let old = order.iter().position(|&k| k == item).unwrap() as f64;
            let new = col.order.iter().position(|&k| k == item).unwrap() as f64;
            prop_assert_eq!(from_transform.translate.y, (old - new) * ROW);
            let scale = if item == dragged { DEFAULT_GRAB_SCALE } else { 1.0 };
            prop_assert_eq!(from_transform.scale, scale);
        }

        prop_assert_eq!(animator.tick(&mut col, 299), 0);
        prop_assert_eq!(animator.tick(&mut col, 300), changed);
        prop_assert!(!animator.has_pending());
    }

    #[test]
    fn overlapping_passes_settle_each_item_once(
        (order, from, to) in column(),
        second in 0_usize..8,
    ) {
        let dragged = order[from];
        let mut col = Column { order: order.clone(), ..Column::default() };
        let mut animator = ReorderAnimator::new();

        animator.reorder(&mut col, 0, &order, dragged, to, 0);
        let second = second.min(order.len() - 1);
        let current = col.order.clone();
        animator.reorder(&mut col, 0, &current, dragged, second, 100);

        let touched: BTreeSet<u32> = col.animated.iter().map(|&(item, _)| item).collect();
        prop_assert_eq!(animator.tick(&mut col, u64::MAX), touched.len());
        let settled: BTreeSet<u32> = col.settled.iter().copied().collect();
        prop_assert_eq!(settled.len(), col.settled.len());
        prop_assert_eq!(settled, touched);
    }
}
