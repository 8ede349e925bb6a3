// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving points and nodes to registered draggables and drop targets.

use core::hash::Hash;

use kurbo::Point;

use crate::registry::Registry;
use crate::surface::Surface;

/// Longest parent chain walked before giving up.
const MAX_DEPTH: usize = 64;

/// Hit-testing view over a [`Registry`].
#[derive(Copy, Clone, Debug)]
pub struct HitTester<'a, K> {
    registry: &'a Registry<K>,
}

impl<'a, K: Copy + Eq + Hash> HitTester<'a, K> {
    /// Wrap a registry.
    pub fn new(registry: &'a Registry<K>) -> Self {
        Self { registry }
    }

    /// Nearest registered drop target at or above the topmost node under `point`.
    ///
    /// `excluding` (the dragged item) is transparent to the hit test.
    pub fn drop_target_at<S>(&self, surface: &S, point: Point, excluding: Option<K>) -> Option<K>
    where
        S: Surface<K> + ?Sized,
    {
        let hit = surface.hit_test(point, excluding)?;
        self.closest(surface, hit, |k| self.registry.target(k).is_some())
    }

    /// Nearest registered draggable at or above the topmost node under `point`.
    pub fn draggable_at<S>(&self, surface: &S, point: Point) -> Option<K>
    where
        S: Surface<K> + ?Sized,
    {
        let hit = surface.hit_test(point, None)?;
        self.closest(surface, hit, |k| self.registry.draggable(k).is_some())
    }

    /// Nearest sortable container strictly above `item`.
    pub fn sortable_ancestor<S>(&self, surface: &S, item: K) -> Option<K>
    where
        S: Surface<K> + ?Sized,
    {
        let parent = surface.parent(item)?;
        self.closest(surface, parent, |k| self.registry.is_sortable(k))
    }

    fn closest<S>(&self, surface: &S, start: K, accept: impl Fn(K) -> bool) -> Option<K>
    where
        S: Surface<K> + ?Sized,
    {
        let mut node = start;
        for _ in 0..MAX_DEPTH {
            if accept(node) {
                return Some(node);
            }
            node = surface.parent(node)?;
        }
        None
    }
}
