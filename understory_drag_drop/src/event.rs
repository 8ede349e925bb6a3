// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The high-level event vocabulary delivered to application code.
//!
//! Every gesture produces, in order:
//!
//! - one [`DragStart`](DragEvent::DragStart);
//! - per processed move, any target transitions
//!   ([`SortLeave`](DragEvent::SortLeave), [`DragLeave`](DragEvent::DragLeave),
//!   [`SortEnter`](DragEvent::SortEnter), [`DragEnter`](DragEvent::DragEnter)),
//!   then [`DragOver`](DragEvent::DragOver) while over a target, then
//!   [`Drag`](DragEvent::Drag);
//! - on release, optionally [`SortComplete`](DragEvent::SortComplete) or
//!   [`Drop`](DragEvent::Drop);
//! - exactly one [`DragEnd`](DragEvent::DragEnd).

use core::fmt;

use kurbo::{Point, Vec2};

use crate::types::PointerId;

/// Discriminant of a [`DragEvent`], used as the subscription key.
///
/// ```
/// use understory_drag_drop::EventKind;
///
/// assert_eq!(EventKind::SortComplete.name(), "sortcomplete");
/// assert_eq!(EventKind::from_name("dragend"), Some(EventKind::DragEnd));
/// assert_eq!(EventKind::from_name("click"), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A gesture began.
    DragStart,
    /// The dragged item moved.
    Drag,
    /// The pointer entered a drop target.
    DragEnter,
    /// The pointer left a drop target.
    DragLeave,
    /// The pointer is over a drop target.
    DragOver,
    /// The item was handed to a drop target.
    Drop,
    /// A gesture ended.
    DragEnd,
    /// A live sort started in the item's container.
    SortEnter,
    /// A live sort was abandoned and the order rolled back.
    SortLeave,
    /// A live sort was committed with a new order.
    SortComplete,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::DragStart,
        Self::Drag,
        Self::DragEnter,
        Self::DragLeave,
        Self::DragOver,
        Self::Drop,
        Self::DragEnd,
        Self::SortEnter,
        Self::SortLeave,
        Self::SortComplete,
    ];

    /// Stable lowercase name, matching the DOM drag-and-drop vocabulary.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::Drag => "drag",
            Self::DragEnter => "dragenter",
            Self::DragLeave => "dragleave",
            Self::DragOver => "dragover",
            Self::Drop => "drop",
            Self::DragEnd => "dragend",
            Self::SortEnter => "sortenter",
            Self::SortLeave => "sortleave",
            Self::SortComplete => "sortcomplete",
        }
    }

    /// Parse a name produced by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An interaction event.
///
/// `K` is the host's item handle. Every variant carries the pointer and the
/// dragged item; the rest is specific to the kind.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent<K> {
    /// A gesture began on `item`.
    DragStart {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Press position.
        position: Point,
        /// Whether the item started inside a sortable container.
        sortable: bool,
    },
    /// The dragged item followed the pointer.
    Drag {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Current pointer position.
        position: Point,
        /// Offset from the item's top-left corner to the pointer at press.
        grab_offset: Vec2,
    },
    /// The pointer entered `target`.
    DragEnter {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Entered drop target.
        target: K,
        /// Whether `target` is a sortable container.
        sortable: bool,
    },
    /// The pointer left `target`.
    DragLeave {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Drop target that was left.
        target: K,
    },
    /// The pointer is over `target`.
    DragOver {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Hovered drop target.
        target: K,
        /// Whether `target` is a sortable container.
        sortable: bool,
    },
    /// `item` was handed to `target`.
    Drop {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dropped item.
        item: K,
        /// Receiving drop target.
        target: K,
        /// Release position.
        position: Point,
    },
    /// The gesture ended.
    DragEnd {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Drop target under the pointer at release, if any.
        target: Option<K>,
        /// `true` if the item was dropped or its order changed.
        success: bool,
        /// `true` if the gesture was cancelled by the input system.
        cancelled: bool,
    },
    /// A live sort started inside `container`.
    SortEnter {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Sortable container.
        container: K,
    },
    /// The live sort in `container` was abandoned and rolled back.
    SortLeave {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Sortable container.
        container: K,
    },
    /// The live sort in `container` committed a new order.
    SortComplete {
        /// Pointer driving the gesture.
        pointer: PointerId,
        /// Dragged item.
        item: K,
        /// Sortable container.
        container: K,
        /// Index of `item` before the gesture.
        original_index: usize,
        /// Index of `item` after the gesture.
        new_index: usize,
    },
}

impl<K: Copy> DragEvent<K> {
    /// The discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DragStart { .. } => EventKind::DragStart,
            Self::Drag { .. } => EventKind::Drag,
            Self::DragEnter { .. } => EventKind::DragEnter,
            Self::DragLeave { .. } => EventKind::DragLeave,
            Self::DragOver { .. } => EventKind::DragOver,
            Self::Drop { .. } => EventKind::Drop,
            Self::DragEnd { .. } => EventKind::DragEnd,
            Self::SortEnter { .. } => EventKind::SortEnter,
            Self::SortLeave { .. } => EventKind::SortLeave,
            Self::SortComplete { .. } => EventKind::SortComplete,
        }
    }

    /// The pointer that drove the gesture.
    pub fn pointer(&self) -> PointerId {
        match *self {
            Self::DragStart { pointer, .. }
            | Self::Drag { pointer, .. }
            | Self::DragEnter { pointer, .. }
            | Self::DragLeave { pointer, .. }
            | Self::DragOver { pointer, .. }
            | Self::Drop { pointer, .. }
            | Self::DragEnd { pointer, .. }
            | Self::SortEnter { pointer, .. }
            | Self::SortLeave { pointer, .. }
            | Self::SortComplete { pointer, .. } => pointer,
        }
    }

    /// The dragged item.
    pub fn item(&self) -> K {
        match *self {
            Self::DragStart { item, .. }
            | Self::Drag { item, .. }
            | Self::DragEnter { item, .. }
            | Self::DragLeave { item, .. }
            | Self::DragOver { item, .. }
            | Self::Drop { item, .. }
            | Self::DragEnd { item, .. }
            | Self::SortEnter { item, .. }
            | Self::SortLeave { item, .. }
            | Self::SortComplete { item, .. } => item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn accessors_cover_every_variant() {
        let p = PointerId(7);
        let ev = DragEvent::SortComplete {
            pointer: p,
            item: 3_u32,
            container: 1,
            original_index: 0,
            new_index: 2,
        };
        assert_eq!(ev.kind(), EventKind::SortComplete);
        assert_eq!(ev.pointer(), p);
        assert_eq!(ev.item(), 3);

        let end = DragEvent::DragEnd {
            pointer: p,
            item: 3_u32,
            target: None,
            success: false,
            cancelled: true,
        };
        assert_eq!(end.kind().to_string(), "dragend");
    }
}
