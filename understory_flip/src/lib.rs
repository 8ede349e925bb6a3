// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flip --heading-base-level=0

//! Understory FLIP: reorder animation primitives for UI lists.
//!
//! FLIP (First, Last, Invert, Play) animates a layout change without animating
//! layout itself:
//!
//! 1. **First**: record where every item is ([`GeometrySnapshot::capture`]).
//! 2. **Last**: apply the structural change (for lists, a splice).
//! 3. **Invert**: offset every moved item back to where it was, instantly.
//! 4. **Play**: transition that offset to zero.
//!
//! The viewer sees items slide into their new slots, while the layout engine only
//! ever sees the final order.
//!
//! ## Pieces
//!
//! - [`GeometrySnapshot`]: pre-change origins, consumed when diffed.
//! - [`ItemTransform`]: the translate/scale offset a surface applies on top of layout.
//! - [`Easing`] and [`Transition`]: timing handed to the surface with each animation.
//! - [`FlipSurface`]: the layout and animation capability of the host toolkit.
//! - [`ReorderAnimator`]: runs a complete reorder pass and schedules
//!   generation-guarded settles so stale cleanups never clobber live transitions.
//!
//! The crate does not own any layout. Hosts implement [`FlipSurface`] over their
//! scene (a DOM, a box tree, a retained widget tree) and call
//! [`ReorderAnimator::tick`] from their frame loop.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animator;
mod easing;
mod snapshot;
mod surface;
mod transform;

pub use animator::{DEFAULT_GRAB_SCALE, FlipConfig, ReorderAnimator};
pub use easing::{DEFAULT_DURATION_MS, Easing, Transition};
pub use snapshot::GeometrySnapshot;
pub use surface::FlipSurface;
pub use transform::ItemTransform;
