// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small shared types.

use crate::error::DragDropError;

/// Identity of one pointer (a mouse, a finger, a pen).
///
/// Hosts pass through whatever id their input layer reports; it only needs to
/// stay stable from press to release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// Operating status of a [`DragDrop`](crate::DragDrop) engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Accepting input.
    Active,
    /// Input is ignored because the surface lacks a required capability.
    Disabled(DragDropError),
    /// [`DragDrop::destroy`](crate::DragDrop::destroy) was called.
    Destroyed,
}

impl Status {
    /// Returns `true` if the engine processes input.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
