// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder animator: snapshot, splice, invert, play.
//!
//! ## Usage
//!
//! 1) Call [`ReorderAnimator::reorder`] with the container's current item order,
//!    the item being moved, and its target index.
//! 2) Call [`ReorderAnimator::tick`] from your frame loop; transitions whose
//!    duration has elapsed are settled on the surface.
//! 3) Call [`ReorderAnimator::forget`] when an item leaves your control (for
//!    example when a drag ends) so a late settle cannot overwrite its styling.
//!
//! Each scheduled settle carries the item's generation at scheduling time. A newer
//! animation on the same item bumps the generation, and the older settle is then
//! dropped instead of clearing the newer transition half-way through.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Vec2;
use log::trace;

use crate::easing::Transition;
use crate::snapshot::GeometrySnapshot;
use crate::surface::FlipSurface;
use crate::transform::ItemTransform;

/// Scale kept on the moved item while it is held.
pub const DEFAULT_GRAB_SCALE: f64 = 1.02;

/// Animator configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlipConfig {
    /// Timing of every slide.
    pub transition: Transition,
    /// Scale applied to the moved item at both ends of its own slide.
    pub grab_scale: f64,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            transition: Transition::default(),
            grab_scale: DEFAULT_GRAB_SCALE,
        }
    }
}

impl FlipConfig {
    /// Replace the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Replace the grab scale.
    #[must_use]
    pub fn with_grab_scale(mut self, grab_scale: f64) -> Self {
        self.grab_scale = grab_scale;
        self
    }
}

#[derive(Copy, Clone, Debug)]
struct PendingSettle<K> {
    item: K,
    generation: u64,
    due_ms: u64,
    rest: ItemTransform,
}

/// Drives FLIP reorders against a [`FlipSurface`].
///
/// ## Minimal example
///
/// ```
/// use kurbo::Rect;
/// use understory_flip::{FlipSurface, ItemTransform, ReorderAnimator, Transition};
///
/// /// A vertical list of 40px rows.
/// struct Column {
///     order: Vec<u32>,
///     animated: Vec<u32>,
/// }
///
/// impl FlipSurface<u32> for Column {
///     fn bounding_box(&self, item: u32) -> Option<Rect> {
///         let slot = self.order.iter().position(|&k| k == item)? as f64;
///         Some(Rect::new(0.0, slot * 40.0, 100.0, slot * 40.0 + 40.0))
///     }
///     fn splice(&mut self, _container: u32, item: u32, index: usize) {
///         self.order.retain(|&k| k != item);
///         self.order.insert(index, item);
///     }
///     fn animate(&mut self, item: u32, _: ItemTransform, _: ItemTransform, _: Transition) {
///         self.animated.push(item);
///     }
///     fn settle(&mut self, _item: u32, _rest: ItemTransform) {}
/// }
///
/// let mut column = Column { order: vec![1, 2, 3], animated: vec![] };
/// let mut animator = ReorderAnimator::new();
///
/// // Move item 1 to the end: every item changes slot.
/// let items = column.order.clone();
/// let moved = animator.reorder(&mut column, 0, &items, 1, 2, 0);
/// assert_eq!(column.order, vec![2, 3, 1]);
/// assert_eq!(moved, 3);
///
/// // Settles run once the transition has elapsed.
/// assert_eq!(animator.tick(&mut column, 299), 0);
/// assert_eq!(animator.tick(&mut column, 300), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ReorderAnimator<K> {
    config: FlipConfig,
    generations: HashMap<K, u64>,
    pending: Vec<PendingSettle<K>>,
    next_generation: u64,
    passes: u64,
}

impl<K> Default for ReorderAnimator<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ReorderAnimator<K>
where
    K: Copy + Eq + Hash,
{
    /// Create an animator with [`FlipConfig::default`].
    pub fn new() -> Self {
        Self::with_config(FlipConfig::default())
    }

    /// Create an animator with the given configuration.
    pub fn with_config(config: FlipConfig) -> Self {
        Self {
            config,
            generations: HashMap::new(),
            pending: Vec::new(),
            next_generation: 0,
            passes: 0,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    /// Number of reorder passes executed so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Returns `true` while settles are scheduled.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest time a scheduled settle becomes due.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|p| p.due_ms).min()
    }

    /// Move `dragged` to `index` inside `container` and animate every displaced item.
    ///
    /// `items` is the container's item order before the move and must include
    /// `dragged`. Every item's origin is captured, the surface splices, and each
    /// item whose origin changed is inverted to its old position and transitioned
    /// back to zero offset. `dragged` is always animated, even when its own
    /// origin did not change (a floating drag preview, for example), and keeps
    /// [`grab_scale`](FlipConfig::grab_scale) throughout.
    ///
    /// Returns the number of items that were animated.
    ///
    /// This always performs a pass; callers are responsible for skipping
    /// reorders to the index the item already occupies.
    pub fn reorder<S>(
        &mut self,
        surface: &mut S,
        container: K,
        items: &[K],
        dragged: K,
        index: usize,
        now_ms: u64,
    ) -> usize
    where
        S: FlipSurface<K> + ?Sized,
    {
        let snapshot = GeometrySnapshot::capture(items.iter().copied(), |item| {
            surface.bounding_box(item).map(|r| r.origin())
        });
        surface.splice(container, dragged, index);
        let mut deltas =
            snapshot.into_deltas(|item| surface.bounding_box(item).map(|r| r.origin()));
        if !deltas.iter().any(|&(item, _)| item == dragged) {
            deltas.push((dragged, Vec2::ZERO));
        }
        self.passes += 1;

        let transition = self.config.transition;
        let due_ms = now_ms.saturating_add(u64::from(transition.duration_ms));
        for &(item, delta) in &deltas {
            let scale = if item == dragged {
                self.config.grab_scale
            } else {
                1.0
            };
            let from = ItemTransform::translate(delta).with_scale(scale);
            let to = ItemTransform::IDENTITY.with_scale(scale);
            surface.animate(item, from, to, transition);

            let generation = self.bump(item);
            self.pending.push(PendingSettle {
                item,
                generation,
                due_ms,
                rest: to,
            });
        }
        trace!(
            "reorder pass {} moved {} of {} items",
            self.passes,
            deltas.len(),
            items.len()
        );
        deltas.len()
    }

    /// Slide `item` from `offset` back to its laid-out position.
    ///
    /// Used to return an item that was displaced outside the layout (for
    /// example a floating drag preview) to its slot. Returns `false` and does
    /// nothing for a zero offset.
    pub fn glide<S>(&mut self, surface: &mut S, item: K, offset: Vec2, now_ms: u64) -> bool
    where
        S: FlipSurface<K> + ?Sized,
    {
        if offset == Vec2::ZERO {
            return false;
        }
        let transition = self.config.transition;
        let rest = ItemTransform::IDENTITY;
        surface.animate(item, ItemTransform::translate(offset), rest, transition);
        let generation = self.bump(item);
        self.pending.push(PendingSettle {
            item,
            generation,
            due_ms: now_ms.saturating_add(u64::from(transition.duration_ms)),
            rest,
        });
        true
    }

    /// Settle every transition that is due at `now_ms`.
    ///
    /// Settles whose generation is stale are discarded without touching the
    /// surface. Returns the number of items settled.
    pub fn tick<S>(&mut self, surface: &mut S, now_ms: u64) -> usize
    where
        S: FlipSurface<K> + ?Sized,
    {
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                due.push(*p);
                false
            } else {
                true
            }
        });

        let mut settled = 0;
        for p in due {
            if self.generations.get(&p.item) == Some(&p.generation) {
                self.generations.remove(&p.item);
                surface.settle(p.item, p.rest);
                settled += 1;
            } else {
                trace!("dropping stale settle (generation {})", p.generation);
            }
        }
        settled
    }

    /// Forget every scheduled settle for `item`.
    ///
    /// Any settle already queued for it becomes stale and will be dropped.
    pub fn forget(&mut self, item: K) {
        self.generations.remove(&item);
        self.pending.retain(|p| p.item != item);
    }

    /// Forget all scheduled settles.
    pub fn clear(&mut self) {
        self.generations.clear();
        self.pending.clear();
    }

    fn bump(&mut self, item: K) -> u64 {
        self.next_generation += 1;
        self.generations.insert(item, self.next_generation);
        self.next_generation
    }
}
