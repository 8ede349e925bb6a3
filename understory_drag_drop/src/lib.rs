// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop --heading-base-level=0

//! Understory Drag Drop: pointer-driven drag, drop, and sortable lists.
//!
//! This crate turns a stream of raw pointer input (press, move, release, cancel)
//! into drag gestures over a host-owned scene:
//!
//! - One gesture per pointer, so several fingers can drag different items at once.
//! - Continuous hit-testing against registered drop targets, with enter/leave/over
//!   transitions and hover styling.
//! - Live reordering inside a sortable container, animated with
//!   [`understory_flip`]'s FLIP animator.
//! - A normalized event vocabulary ([`DragEvent`]) delivered through a
//!   subscription bus ([`EventBus`]).
//!
//! ## Integration
//!
//! Implement [`Surface`] over your scene. The engine never owns layout; it asks
//! the surface to hit-test, measure, float, splice, style and animate nodes, and
//! every input method takes the surface explicitly.
//!
//! Then feed input into a [`DragDrop`] engine:
//!
//! 1. [`DragDrop::pointer_down`] on press.
//! 2. [`DragDrop::pointer_move`] on every move. Moves are coalesced; the engine
//!    asks the surface for a frame with [`Surface::request_frame`].
//! 3. [`DragDrop::frame`] once per frame. This applies the latest move of every
//!    pointer and settles finished animations.
//! 4. [`DragDrop::pointer_up`] or [`DragDrop::pointer_cancel`] to finish.
//!
//! Hosts that lose track of a pointer can call [`DragDrop::reset`], and
//! [`DragDrop::destroy`] tears everything down.
//!
//! ## Outcomes
//!
//! A release resolves to exactly one of:
//!
//! - **Sort commit**: the item was live-sorted and ended at a new index;
//!   `sortcomplete` then `dragend { success: true }`.
//! - **Drop**: released over a drop target; the surface gets
//!   [`Surface::accept_drop`], then `drop` and `dragend { success: true }`.
//! - **Restore**: released outside every target, over its own container at its
//!   own index, or without moving; the item returns to its slot and
//!   `dragend { success: false }` is emitted.
//!
//! ## Features
//!
//! - `std` (default): handler panics are caught at the bus boundary, and Kurbo
//!   uses `std`.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod bus;
mod coalesce;
mod engine;
mod error;
mod event;
mod gesture;
mod hit;
mod insertion;
mod options;
mod registry;
mod surface;
mod types;

pub use bus::{EventBus, ListenerId};
pub use coalesce::{FrameCoalescer, PendingMove};
pub use engine::DragDrop;
pub use error::{BoxError, DragDropError, HandlerFailure};
pub use event::{DragEvent, EventKind};
pub use gesture::{GestureState, PointerGesture};
pub use hit::HitTester;
pub use insertion::insertion_index;
pub use options::{DragDropConfig, DragOptions};
pub use registry::{DropTarget, Registry};
pub use surface::Surface;
pub use types::{PointerId, Status};
