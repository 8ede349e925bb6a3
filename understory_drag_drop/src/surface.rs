// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering-surface capability the engine consumes.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_flip::FlipSurface;

use crate::types::PointerId;

/// Everything the engine needs from a host toolkit.
///
/// The supertrait supplies geometry and the FLIP animation hooks. All geometry
/// is in one shared coordinate space, and `K` is the host's node handle
/// (draggable items, drop targets and placeholders all share it).
///
/// Implementations must be cheap to call: the engine hit-tests and measures on
/// every processed frame.
pub trait Surface<K>: FlipSurface<K> {
    /// Whether a pointer can be routed exclusively to one node.
    ///
    /// An engine created over a surface that returns `false` stays disabled.
    fn supports_pointer_capture(&self) -> bool {
        true
    }

    /// Topmost node under `point`, skipping `excluding` and its descendants.
    fn hit_test(&self, point: Point, excluding: Option<K>) -> Option<K>;

    /// Structural parent of `node`.
    fn parent(&self, node: K) -> Option<K>;

    /// Route every further event for `pointer` to `item`.
    fn capture_pointer(&mut self, pointer: PointerId, item: K);

    /// Undo [`capture_pointer`](Self::capture_pointer).
    fn release_pointer(&mut self, pointer: PointerId, item: K);

    /// Insert a visual marker in `item`'s slot, styled with `class`.
    ///
    /// The marker must not be returned by [`list_items`](Self::list_items) or
    /// by [`hit_test`](Self::hit_test).
    fn create_placeholder(&mut self, item: K, class: &str) -> Option<K>;

    /// Remove a marker created by [`create_placeholder`](Self::create_placeholder).
    fn remove_placeholder(&mut self, placeholder: K);

    /// Float `item` at `frame` above the layout, or return it to layout with `None`.
    ///
    /// While floating, [`bounding_box`](FlipSurface::bounding_box) reports `frame`.
    fn set_floating(&mut self, item: K, frame: Option<Rect>);

    /// Add or remove a style class.
    fn set_class(&mut self, node: K, class: &str, enabled: bool);

    /// Append the items of `container` to `out` in layout order.
    fn list_items(&self, container: K, out: &mut Vec<K>);

    /// Hand `item` over to `target` after a successful plain drop.
    fn accept_drop(&mut self, item: K, target: K);

    /// Ask the host to call [`DragDrop::frame`](crate::DragDrop::frame) on its next frame.
    fn request_frame(&mut self);
}
