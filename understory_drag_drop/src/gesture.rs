// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer gesture records.
//!
//! A [`PointerGesture`] is created when a pointer presses a registered draggable
//! and is deleted when that pointer releases, cancels, or is reset. Only the
//! engine mutates it; hosts read it through
//! [`DragDrop::gesture`](crate::DragDrop::gesture).

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::options::DragOptions;
use crate::types::PointerId;

/// Lifecycle state of a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No gesture; never observed on a live record.
    Idle,
    /// The item floats under the pointer.
    Dragging,
    /// The item floats and its container reorders live around it.
    Sorting,
    /// The pointer was released and the outcome is being applied.
    Settling,
    /// Cleanup has run.
    Terminated,
}

/// One pointer's drag.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerGesture<K> {
    pub(crate) pointer: PointerId,
    pub(crate) item: K,
    pub(crate) serial: u64,
    pub(crate) grab_offset: Vec2,
    pub(crate) original_frame: Rect,
    pub(crate) state: GestureState,
    pub(crate) current_target: Option<K>,
    pub(crate) sort_container: Option<K>,
    pub(crate) origin_container: Option<K>,
    pub(crate) original_index: Option<usize>,
    pub(crate) current_index: Option<usize>,
    /// Siblings ahead of the item when its live sort began.
    pub(crate) sort_preceding: Vec<K>,
    pub(crate) placeholder: Option<K>,
    pub(crate) options: DragOptions,
    /// Offset of the floating preview from the item's slot when it was restored.
    pub(crate) glide_from: Option<Vec2>,
    start: Point,
    last: Point,
    moved: bool,
}

impl<K: Copy> PointerGesture<K> {
    pub(crate) fn new(
        pointer: PointerId,
        item: K,
        serial: u64,
        press: Point,
        frame: Rect,
        options: DragOptions,
    ) -> Self {
        Self {
            pointer,
            item,
            serial,
            grab_offset: press - frame.origin(),
            original_frame: frame,
            state: GestureState::Dragging,
            current_target: None,
            sort_container: None,
            origin_container: None,
            original_index: None,
            current_index: None,
            sort_preceding: Vec::new(),
            placeholder: None,
            options,
            glide_from: None,
            start: press,
            last: press,
            moved: false,
        }
    }

    /// Record a pointer position and return the movement since the last one.
    pub(crate) fn track(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        if pos != self.start {
            self.moved = true;
        }
        delta
    }

    /// Frame the floating item occupies with the pointer at `pos`.
    pub(crate) fn floating_frame(&self, pos: Point) -> Rect {
        Rect::from_origin_size(pos - self.grab_offset, self.original_frame.size())
    }

    /// Pointer driving this gesture.
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// The dragged item.
    pub fn item(&self) -> K {
        self.item
    }

    /// Monotonic id distinguishing this gesture from earlier ones on the same pointer.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Offset from the item's top-left corner to the press position.
    pub fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    /// Size locked on the floating item.
    pub fn original_size(&self) -> Size {
        self.original_frame.size()
    }

    /// The item's bounding box at press.
    pub fn original_frame(&self) -> Rect {
        self.original_frame
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Drop target currently under the pointer.
    pub fn current_target(&self) -> Option<K> {
        self.current_target
    }

    /// Container being live-sorted; set only while [`GestureState::Sorting`].
    pub fn sort_container(&self) -> Option<K> {
        self.sort_container
    }

    /// Sortable container the item belonged to at press.
    pub fn origin_container(&self) -> Option<K> {
        self.origin_container
    }

    /// Index of the item in its origin container when its live sort began,
    /// or at press if it has not sorted yet.
    pub fn original_index(&self) -> Option<usize> {
        self.original_index
    }

    /// Index the item currently occupies during a live sort.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Position at press.
    pub fn start_position(&self) -> Point {
        self.start
    }

    /// Last tracked position.
    pub fn last_position(&self) -> Point {
        self.last
    }

    /// Cumulative offset of the last tracked position from the press.
    pub fn total_offset(&self) -> Vec2 {
        self.last - self.start
    }

    /// Returns `true` once the pointer has left the press position.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns `true` while the item floats.
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Dragging | GestureState::Sorting)
    }
}
