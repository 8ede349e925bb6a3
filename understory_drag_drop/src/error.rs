// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::boxed::Box;

use thiserror::Error;

/// Boxed error returned by event handlers.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Engine-level errors.
///
/// None of these are fatal to the process: a disabled or destroyed engine simply
/// ignores further input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DragDropError {
    /// The surface cannot route a pointer exclusively to one item.
    #[error("surface does not support pointer capture; drag and drop is disabled")]
    UnsupportedCapability,
    /// The engine was torn down with [`DragDrop::destroy`](crate::DragDrop::destroy).
    #[error("drag and drop engine has been destroyed")]
    Destroyed,
}

/// Why a handler failed to process an event.
#[derive(Debug, Error)]
pub enum HandlerFailure {
    /// The handler returned an error.
    #[error("handler returned an error: {0}")]
    Error(#[source] BoxError),
    /// The handler panicked; only detected with the `std` feature.
    #[error("handler panicked")]
    Panicked,
}
