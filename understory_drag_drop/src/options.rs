// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration options and engine configuration.

use alloc::borrow::Cow;

use understory_flip::FlipConfig;

/// Style classes the engine toggles on the surface.
///
/// Options registered with a draggable control how that item looks while
/// floating; options registered with a drop target control how the target looks
/// at rest, while hovered, and while hosting a live sort.
///
/// ```
/// use understory_drag_drop::DragOptions;
///
/// let options = DragOptions::default().with_drag_over_class("hover");
/// assert_eq!(options.drag_class, "dragging");
/// assert_eq!(options.drag_over_class, "hover");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragOptions {
    /// Applied to the dragged item while it floats.
    pub drag_class: Cow<'static, str>,
    /// Applied to the marker left in the item's original slot.
    pub placeholder_class: Cow<'static, str>,
    /// Applied to every registered drop target while registered.
    pub drop_zone_class: Cow<'static, str>,
    /// Applied to a drop target while an item hovers it.
    pub drag_over_class: Cow<'static, str>,
    /// Applied to a sortable container while it hosts a live sort.
    pub sorting_class: Cow<'static, str>,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            drag_class: Cow::Borrowed("dragging"),
            placeholder_class: Cow::Borrowed("placeholder"),
            drop_zone_class: Cow::Borrowed("drop-zone"),
            drag_over_class: Cow::Borrowed("drag-over"),
            sorting_class: Cow::Borrowed("sorting"),
        }
    }
}

impl DragOptions {
    /// Replace the floating class.
    #[must_use]
    pub fn with_drag_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.drag_class = class.into();
        self
    }

    /// Replace the placeholder class.
    #[must_use]
    pub fn with_placeholder_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.placeholder_class = class.into();
        self
    }

    /// Replace the idle drop-target class.
    #[must_use]
    pub fn with_drop_zone_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.drop_zone_class = class.into();
        self
    }

    /// Replace the hover class.
    #[must_use]
    pub fn with_drag_over_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.drag_over_class = class.into();
        self
    }

    /// Replace the live-sort class.
    #[must_use]
    pub fn with_sorting_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.sorting_class = class.into();
        self
    }
}

/// Configuration for a [`DragDrop`](crate::DragDrop) engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragDropConfig {
    /// Options used when a registration does not supply its own.
    pub options: DragOptions,
    /// Reorder animation settings.
    pub flip: FlipConfig,
}

impl DragDropConfig {
    /// Replace the default registration options.
    #[must_use]
    pub fn with_options(mut self, options: DragOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the reorder animation settings.
    #[must_use]
    pub fn with_flip(mut self, flip: FlipConfig) -> Self {
        self.flip = flip;
        self
    }
}
