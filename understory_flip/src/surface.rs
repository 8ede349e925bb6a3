// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout capability the animator drives.

use kurbo::Rect;

use crate::easing::Transition;
use crate::transform::ItemTransform;

/// Layout and animation operations a host surface exposes to the animator.
///
/// `K` is the host's item handle (a node id, an entity, an index into a slab).
/// All geometry is in one shared coordinate space.
pub trait FlipSurface<K> {
    /// Laid-out bounds of `item`, or `None` if it is not currently laid out.
    ///
    /// This must reflect structural changes made through [`splice`](Self::splice)
    /// immediately, and must ignore any [`ItemTransform`] currently applied.
    fn bounding_box(&self, item: K) -> Option<Rect>;

    /// Move `item` so that it becomes the `index`-th item of `container`.
    ///
    /// `index` counts the container's items with `item` itself removed, so it
    /// ranges over `0..=len - 1` for an item already in the container.
    fn splice(&mut self, container: K, item: K, index: usize);

    /// Jump `item` to `from` without transition, then transition it to `to`.
    fn animate(&mut self, item: K, from: ItemTransform, to: ItemTransform, transition: Transition);

    /// Drop any transition styling on `item` and leave it at `rest`.
    fn settle(&mut self, item: K, rest: ItemTransform);
}
