// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine.
//!
//! ## Lifecycle
//!
//! ```text
//!            pointer_down                    enter own sortable
//!   Idle ───────────────▶ Dragging ◀──────────────────────────▶ Sorting
//!                             │          leave (roll back)         │
//!                             │ pointer_up / pointer_cancel        │
//!                             ▼                                    │
//!                         Settling ◀───────────────────────────────┘
//!                             │ cleanup
//!                             ▼
//!                        Terminated (record deleted)
//! ```
//!
//! Moves are coalesced per frame: [`DragDrop::pointer_move`] only records the
//! latest position, and [`DragDrop::frame`] applies it.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use log::{debug, trace, warn};
use smallvec::SmallVec;
use understory_flip::{ItemTransform, ReorderAnimator};

use crate::bus::{EventBus, ListenerId};
use crate::coalesce::FrameCoalescer;
use crate::error::{BoxError, DragDropError};
use crate::event::{DragEvent, EventKind};
use crate::gesture::{GestureState, PointerGesture};
use crate::hit::HitTester;
use crate::insertion::insertion_index;
use crate::options::{DragDropConfig, DragOptions};
use crate::registry::{DropTarget, Registry};
use crate::surface::Surface;
use crate::types::{PointerId, Status};

#[derive(Copy, Clone, Debug)]
enum TargetClass {
    DropZone,
    DragOver,
    Sorting,
}

impl TargetClass {
    fn of(self, options: &DragOptions) -> &str {
        match self {
            Self::DropZone => &*options.drop_zone_class,
            Self::DragOver => &*options.drag_over_class,
            Self::Sorting => &*options.sorting_class,
        }
    }
}

/// Drag, drop, and live-sort engine.
///
/// One engine serves any number of simultaneous pointers; each pointer drives
/// at most one gesture, each item is dragged by at most one pointer, and each
/// sortable container is live-sorted by at most one gesture at a time.
///
/// The engine owns no layout. Every call that touches the scene takes the host
/// [`Surface`] explicitly.
///
/// ```
/// # use kurbo::{Point, Rect};
/// # use understory_drag_drop::{DragDrop, DragDropConfig, EventKind, PointerId, Surface};
/// # use understory_flip::{FlipSurface, ItemTransform, Transition};
/// # struct Scene;
/// # impl FlipSurface<u32> for Scene {
/// #     fn bounding_box(&self, item: u32) -> Option<Rect> {
/// #         (item == 1).then(|| Rect::new(0.0, 0.0, 100.0, 40.0))
/// #     }
/// #     fn splice(&mut self, _: u32, _: u32, _: usize) {}
/// #     fn animate(&mut self, _: u32, _: ItemTransform, _: ItemTransform, _: Transition) {}
/// #     fn settle(&mut self, _: u32, _: ItemTransform) {}
/// # }
/// # impl Surface<u32> for Scene {
/// #     fn hit_test(&self, p: Point, excluding: Option<u32>) -> Option<u32> {
/// #         (p.y < 40.0 && excluding != Some(1)).then_some(1)
/// #     }
/// #     fn parent(&self, _: u32) -> Option<u32> { None }
/// #     fn capture_pointer(&mut self, _: PointerId, _: u32) {}
/// #     fn release_pointer(&mut self, _: PointerId, _: u32) {}
/// #     fn create_placeholder(&mut self, _: u32, _: &str) -> Option<u32> { None }
/// #     fn remove_placeholder(&mut self, _: u32) {}
/// #     fn set_floating(&mut self, _: u32, _: Option<Rect>) {}
/// #     fn set_class(&mut self, _: u32, _: &str, _: bool) {}
/// #     fn list_items(&self, _: u32, _: &mut Vec<u32>) {}
/// #     fn accept_drop(&mut self, _: u32, _: u32) {}
/// #     fn request_frame(&mut self) {}
/// # }
/// let mut scene = Scene;
/// let mut dnd: DragDrop<u32> = DragDrop::new(&scene, DragDropConfig::default());
/// dnd.register_draggable(1, None).unwrap();
/// dnd.on(EventKind::DragEnd, |ev| {
///     println!("{ev:?}");
///     Ok(())
/// });
///
/// let finger = PointerId(0);
/// assert!(dnd.pointer_down(&mut scene, finger, Point::new(10.0, 10.0), 0));
/// dnd.pointer_move(&mut scene, finger, Point::new(10.0, 300.0));
/// dnd.frame(&mut scene, 16);
/// assert!(dnd.pointer_up(&mut scene, finger, Point::new(10.0, 300.0), 32));
/// assert_eq!(dnd.active_gestures(), 0);
/// ```
#[derive(Debug)]
pub struct DragDrop<K> {
    config: DragDropConfig,
    status: Status,
    registry: Registry<K>,
    gestures: HashMap<PointerId, PointerGesture<K>>,
    owners: HashMap<K, PointerId>,
    sorters: HashMap<K, PointerId>,
    coalescer: FrameCoalescer,
    animator: ReorderAnimator<K>,
    bus: EventBus<EventKind, DragEvent<K>>,
    next_serial: u64,
    last_now: u64,
    scratch: Vec<K>,
}

impl<K> DragDrop<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an engine for `surface`.
    ///
    /// If the surface cannot capture pointers the engine starts
    /// [`Disabled`](Status::Disabled) and ignores all input.
    pub fn new<S>(surface: &S, config: DragDropConfig) -> Self
    where
        S: Surface<K> + ?Sized,
    {
        let status = if surface.supports_pointer_capture() {
            Status::Active
        } else {
            let err = DragDropError::UnsupportedCapability;
            warn!("{err}");
            Status::Disabled(err)
        };
        Self {
            animator: ReorderAnimator::with_config(config.flip),
            config,
            status,
            registry: Registry::default(),
            gestures: HashMap::new(),
            owners: HashMap::new(),
            sorters: HashMap::new(),
            coalescer: FrameCoalescer::new(),
            bus: EventBus::new(),
            next_serial: 0,
            last_now: 0,
            scratch: Vec::new(),
        }
    }

    // --- registration ---

    /// Make `item` draggable.
    ///
    /// `None` uses the engine's default [`DragOptions`]. Registering an item
    /// again replaces its options.
    pub fn register_draggable(
        &mut self,
        item: K,
        options: Option<DragOptions>,
    ) -> Result<(), DragDropError> {
        self.ensure_alive()?;
        let options = options.unwrap_or_else(|| self.config.options.clone());
        self.registry.insert_draggable(item, options);
        Ok(())
    }

    /// Make `node` a drop target and style it with its drop-zone class.
    pub fn register_drop_target<S>(
        &mut self,
        surface: &mut S,
        node: K,
        options: Option<DragOptions>,
    ) -> Result<(), DragDropError>
    where
        S: Surface<K> + ?Sized,
    {
        self.insert_target(surface, node, false, options)
    }

    /// Make `node` a sortable container.
    ///
    /// A sortable container is also a drop target. Items whose parent chain
    /// reaches it can be reordered inside it live.
    pub fn register_sortable<S>(
        &mut self,
        surface: &mut S,
        node: K,
        options: Option<DragOptions>,
    ) -> Result<(), DragDropError>
    where
        S: Surface<K> + ?Sized,
    {
        self.insert_target(surface, node, true, options)
    }

    /// Remove every registration of `node`.
    ///
    /// Gestures dragging `node`, hovering it, or started inside it are reset
    /// first (without events). Returns `false` if `node` was not registered.
    pub fn unregister<S>(&mut self, surface: &mut S, node: K) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        let mut affected: SmallVec<[PointerId; 4]> = self
            .gestures
            .values()
            .filter(|g| {
                g.item == node || g.current_target == Some(node) || g.origin_container == Some(node)
            })
            .map(|g| g.pointer)
            .collect();
        affected.sort_unstable();
        for pointer in affected {
            self.reset(surface, pointer);
        }

        let mut found = self.registry.remove_draggable(node).is_some();
        if let Some(target) = self.registry.remove_target(node) {
            surface.set_class(node, TargetClass::DropZone.of(&target.options), false);
            found = true;
        }
        found
    }

    fn insert_target<S>(
        &mut self,
        surface: &mut S,
        node: K,
        sortable: bool,
        options: Option<DragOptions>,
    ) -> Result<(), DragDropError>
    where
        S: Surface<K> + ?Sized,
    {
        self.ensure_alive()?;
        let options = options.unwrap_or_else(|| self.config.options.clone());
        let class = options.drop_zone_class.clone();
        if let Some(previous) = self
            .registry
            .insert_target(node, DropTarget { sortable, options })
            && previous.options.drop_zone_class != class
        {
            surface.set_class(node, &previous.options.drop_zone_class, false);
        }
        surface.set_class(node, &class, true);
        Ok(())
    }

    fn ensure_alive(&self) -> Result<(), DragDropError> {
        match self.status {
            Status::Destroyed => Err(DragDropError::Destroyed),
            _ => Ok(()),
        }
    }

    // --- subscription ---

    /// Subscribe to one kind of event.
    ///
    /// Handlers run synchronously, in subscription order, from inside the
    /// input call that produced the event. A handler that fails is logged and
    /// does not affect the gesture or other handlers.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&DragEvent<K>) -> Result<(), BoxError> + 'static,
    {
        self.bus.subscribe(kind, handler)
    }

    /// Unsubscribe a handler. Returns `false` if it was not subscribed to `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.bus.unsubscribe(kind, id)
    }

    // --- input ---

    /// Handle a press.
    ///
    /// Starts a gesture if `position` is over a registered draggable that no
    /// other pointer is dragging and `pointer` has no gesture yet. Returns
    /// `true` if a gesture started.
    pub fn pointer_down<S>(
        &mut self,
        surface: &mut S,
        pointer: PointerId,
        position: Point,
        now_ms: u64,
    ) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        if !self.status.is_active() {
            trace!("ignoring press from {pointer:?}: engine is {:?}", self.status);
            return false;
        }
        self.last_now = now_ms;
        if self.gestures.contains_key(&pointer) {
            debug!("ignoring press: {pointer:?} already drives a gesture");
            return false;
        }
        let hit = HitTester::new(&self.registry);
        let Some(item) = hit.draggable_at(surface, position) else {
            return false;
        };
        if let Some(owner) = self.owners.get(&item) {
            debug!("ignoring press on {item:?}: already dragged by {owner:?}");
            return false;
        }
        let Some(frame) = surface.bounding_box(item) else {
            debug!("ignoring press on {item:?}: not laid out");
            return false;
        };
        let origin = hit.sortable_ancestor(surface, item);
        let options = match self.registry.draggable(item) {
            Some(options) => options.clone(),
            None => self.config.options.clone(),
        };

        self.next_serial += 1;
        let mut gesture =
            PointerGesture::new(pointer, item, self.next_serial, position, frame, options);
        if let Some(container) = origin {
            gesture.origin_container = Some(container);
            gesture.original_index = self.index_of(surface, container, item);
        }

        surface.capture_pointer(pointer, item);
        gesture.placeholder =
            surface.create_placeholder(item, &gesture.options.placeholder_class);
        surface.set_class(item, &gesture.options.drag_class, true);
        surface.set_floating(item, Some(frame));
        self.owners.insert(item, pointer);
        debug!(
            "{pointer:?} started dragging {item:?} (container {:?}, index {:?})",
            gesture.origin_container, gesture.original_index
        );
        self.gestures.insert(pointer, gesture);

        self.emit(DragEvent::DragStart {
            pointer,
            item,
            position,
            sortable: origin.is_some(),
        });
        true
    }

    /// Handle a move.
    ///
    /// The position is applied on the next [`frame`](Self::frame); only the
    /// latest move per pointer survives until then.
    pub fn pointer_move<S>(&mut self, surface: &mut S, pointer: PointerId, position: Point)
    where
        S: Surface<K> + ?Sized,
    {
        if !self.status.is_active() {
            return;
        }
        let Some(gesture) = self.gestures.get(&pointer) else {
            trace!("ignoring move from idle {pointer:?}");
            return;
        };
        if self.coalescer.push(pointer, gesture.serial, position) {
            surface.request_frame();
        }
    }

    /// Apply coalesced moves and run due animation settles.
    ///
    /// Returns the number of moves applied.
    pub fn frame<S>(&mut self, surface: &mut S, now_ms: u64) -> usize
    where
        S: Surface<K> + ?Sized,
    {
        if self.status == Status::Destroyed {
            return 0;
        }
        self.last_now = now_ms;
        let mut applied = 0;
        for pending in self.coalescer.take() {
            let Some(mut gesture) = self.gestures.remove(&pending.pointer) else {
                trace!("dropping move for ended gesture on {:?}", pending.pointer);
                continue;
            };
            if gesture.serial == pending.serial && gesture.is_active() {
                self.step(surface, &mut gesture, pending.position, now_ms);
                applied += 1;
            } else {
                trace!("dropping stale move for {:?}", pending.pointer);
            }
            self.gestures.insert(pending.pointer, gesture);
        }

        self.animator.tick(surface, now_ms);
        if self.animator.has_pending() {
            surface.request_frame();
        }
        applied
    }

    /// Handle a release.
    ///
    /// Resolves the gesture as a drop, a sort commit, or a restore, emits the
    /// outcome, and cleans up. Returns `true` if `pointer` had a gesture.
    pub fn pointer_up<S>(
        &mut self,
        surface: &mut S,
        pointer: PointerId,
        position: Point,
        now_ms: u64,
    ) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        if self.status == Status::Destroyed {
            return false;
        }
        self.last_now = now_ms;
        let Some(mut gesture) = self.gestures.remove(&pointer) else {
            trace!("ignoring release from idle {pointer:?}");
            return false;
        };
        self.coalescer.discard(pointer);
        gesture.track(position);

        let (target, success) = if gesture.has_moved() {
            surface.set_floating(gesture.item, Some(gesture.floating_frame(position)));
            let target = HitTester::new(&self.registry).drop_target_at(
                surface,
                position,
                Some(gesture.item),
            );
            self.update_target(surface, &mut gesture, target, position, now_ms);
            let success = self.resolve_release(surface, &mut gesture, target, position, now_ms);
            (target, success)
        } else {
            debug!("{pointer:?} released without moving");
            gesture.state = GestureState::Settling;
            self.restore(surface, &mut gesture, now_ms);
            (None, false)
        };

        let item = gesture.item;
        self.finish(surface, &mut gesture, now_ms);
        self.emit(DragEvent::DragEnd {
            pointer,
            item,
            target,
            success,
            cancelled: false,
        });
        true
    }

    /// Handle a cancel from the input system.
    ///
    /// Restores the item, including its original slot if it was being sorted,
    /// and emits only `dragend`. Returns `true` if `pointer` had a gesture.
    pub fn pointer_cancel<S>(&mut self, surface: &mut S, pointer: PointerId, now_ms: u64) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        if self.status == Status::Destroyed {
            return false;
        }
        self.last_now = now_ms;
        let Some(mut gesture) = self.gestures.remove(&pointer) else {
            trace!("ignoring cancel from idle {pointer:?}");
            return false;
        };
        debug!("{pointer:?} cancelled dragging {:?}", gesture.item);
        gesture.state = GestureState::Settling;
        self.restore(surface, &mut gesture, now_ms);
        let item = gesture.item;
        self.finish(surface, &mut gesture, now_ms);
        self.emit(DragEvent::DragEnd {
            pointer,
            item,
            target: None,
            success: false,
            cancelled: true,
        });
        true
    }

    /// Abandon `pointer`'s gesture without emitting any event.
    ///
    /// The item is restored exactly as for a cancel. Returns `false` if
    /// `pointer` had no gesture.
    pub fn reset<S>(&mut self, surface: &mut S, pointer: PointerId) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        let Some(mut gesture) = self.gestures.remove(&pointer) else {
            return false;
        };
        debug!("resetting gesture of {pointer:?}");
        let now_ms = self.last_now;
        gesture.state = GestureState::Settling;
        self.restore(surface, &mut gesture, now_ms);
        self.finish(surface, &mut gesture, now_ms);
        true
    }

    /// Tear the engine down.
    ///
    /// Resets every gesture, settles every animation, strips drop-zone
    /// classes, and drops all registrations and subscribers. Further input is
    /// ignored and registration fails with [`DragDropError::Destroyed`].
    /// Calling it again does nothing.
    pub fn destroy<S>(&mut self, surface: &mut S)
    where
        S: Surface<K> + ?Sized,
    {
        if self.status == Status::Destroyed {
            return;
        }
        let mut pointers: Vec<PointerId> = self.gestures.keys().copied().collect();
        pointers.sort_unstable();
        for pointer in pointers {
            self.reset(surface, pointer);
        }
        self.animator.tick(surface, u64::MAX);
        self.animator.clear();
        for (node, target) in self.registry.targets() {
            surface.set_class(node, TargetClass::DropZone.of(&target.options), false);
        }
        self.registry.clear();
        self.bus.clear();
        self.coalescer.clear();
        self.owners.clear();
        self.sorters.clear();
        self.status = Status::Destroyed;
        debug!("drag and drop engine destroyed");
    }

    // --- introspection ---

    /// Operating status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Configuration the engine was created with.
    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    /// The gesture driven by `pointer`.
    pub fn gesture(&self, pointer: PointerId) -> Option<&PointerGesture<K>> {
        self.gestures.get(&pointer)
    }

    /// Every live gesture, in no particular order.
    pub fn gestures(&self) -> impl Iterator<Item = &PointerGesture<K>> + '_ {
        self.gestures.values()
    }

    /// Number of live gestures.
    pub fn active_gestures(&self) -> usize {
        self.gestures.len()
    }

    /// Pointer currently dragging `item`.
    pub fn owner_of(&self, item: K) -> Option<PointerId> {
        self.owners.get(&item).copied()
    }

    /// Pointer currently live-sorting `container`.
    pub fn sorter_of(&self, container: K) -> Option<PointerId> {
        self.sorters.get(&container).copied()
    }

    /// Registration tables.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// The reorder animator, for pass counts and pending settles.
    pub fn animator(&self) -> &ReorderAnimator<K> {
        &self.animator
    }

    /// Handlers subscribed to `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.bus.listener_count(kind)
    }

    /// Handler failures logged so far.
    pub fn handler_failures(&self) -> u64 {
        self.bus.failures()
    }

    // --- internals ---

    fn emit(&mut self, event: DragEvent<K>) {
        self.bus.publish(event.kind(), &event);
    }

    fn index_of<S>(&mut self, surface: &S, container: K, item: K) -> Option<usize>
    where
        S: Surface<K> + ?Sized,
    {
        self.scratch.clear();
        surface.list_items(container, &mut self.scratch);
        self.scratch.iter().position(|&k| k == item)
    }

    fn set_target_class<S>(&self, surface: &mut S, node: K, class: TargetClass, enabled: bool)
    where
        S: Surface<K> + ?Sized,
    {
        let options = self
            .registry
            .target(node)
            .map_or(&self.config.options, |t| &t.options);
        surface.set_class(node, class.of(options), enabled);
    }

    /// Apply one coalesced move.
    fn step<S>(&mut self, surface: &mut S, g: &mut PointerGesture<K>, position: Point, now_ms: u64)
    where
        S: Surface<K> + ?Sized,
    {
        g.track(position);
        surface.set_floating(g.item, Some(g.floating_frame(position)));
        let target = HitTester::new(&self.registry).drop_target_at(surface, position, Some(g.item));
        self.update_target(surface, g, target, position, now_ms);
        self.emit(DragEvent::Drag {
            pointer: g.pointer,
            item: g.item,
            position,
            grab_offset: g.grab_offset,
        });
    }

    /// Transition between targets, drive the live sort, and emit `dragover`.
    fn update_target<S>(
        &mut self,
        surface: &mut S,
        g: &mut PointerGesture<K>,
        target: Option<K>,
        position: Point,
        now_ms: u64,
    ) where
        S: Surface<K> + ?Sized,
    {
        if g.current_target != target {
            if let Some(old) = g.current_target.take() {
                if g.sort_container == Some(old) {
                    self.leave_sort(surface, g, now_ms, true);
                }
                self.set_target_class(surface, old, TargetClass::DragOver, false);
                self.emit(DragEvent::DragLeave {
                    pointer: g.pointer,
                    item: g.item,
                    target: old,
                });
            }
            g.current_target = target;
            if let Some(new) = target {
                if !self.try_enter_sort(surface, g, new) {
                    self.set_target_class(surface, new, TargetClass::DragOver, true);
                }
                self.emit(DragEvent::DragEnter {
                    pointer: g.pointer,
                    item: g.item,
                    target: new,
                    sortable: self.registry.is_sortable(new),
                });
            }
        } else if let Some(current) = target
            && g.state == GestureState::Dragging
            && self.try_enter_sort(surface, g, current)
        {
            // Another gesture released the container since we entered it.
            self.set_target_class(surface, current, TargetClass::DragOver, false);
        }

        if let Some(container) = g.sort_container {
            self.sort_step(surface, g, container, position.y, now_ms);
        }
        if let Some(current) = target {
            self.emit(DragEvent::DragOver {
                pointer: g.pointer,
                item: g.item,
                target: current,
                sortable: self.registry.is_sortable(current),
            });
        }
    }

    /// Start a live sort if `container` is the item's own sortable container
    /// and nobody else is sorting it.
    fn try_enter_sort<S>(&mut self, surface: &mut S, g: &mut PointerGesture<K>, container: K) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        if !self.registry.is_sortable(container) || g.origin_container != Some(container) {
            return false;
        }
        if let Some(&holder) = self.sorters.get(&container)
            && holder != g.pointer
        {
            trace!("{container:?} is being sorted by {holder:?}");
            return false;
        }
        let Some(index) = self.index_of(surface, container, g.item) else {
            return false;
        };
        self.sorters.insert(container, g.pointer);
        g.state = GestureState::Sorting;
        g.sort_container = Some(container);
        g.original_index = Some(index);
        g.current_index = Some(index);
        g.sort_preceding.clear();
        g.sort_preceding.extend_from_slice(&self.scratch[..index]);
        self.set_target_class(surface, container, TargetClass::Sorting, true);
        debug!("{:?} began sorting {container:?} at {index}", g.pointer);
        self.emit(DragEvent::SortEnter {
            pointer: g.pointer,
            item: g.item,
            container,
        });
        true
    }

    /// Move the item to the slot nearest `y`, if that differs from its current slot.
    fn sort_step<S>(
        &mut self,
        surface: &mut S,
        g: &mut PointerGesture<K>,
        container: K,
        y: f64,
        now_ms: u64,
    ) where
        S: Surface<K> + ?Sized,
    {
        self.scratch.clear();
        surface.list_items(container, &mut self.scratch);

        let mut frames: SmallVec<[(usize, Rect); 16]> = SmallVec::new();
        let mut siblings = 0;
        for &k in &self.scratch {
            if k == g.item {
                continue;
            }
            if let Some(frame) = surface.bounding_box(k) {
                frames.push((siblings, frame));
            }
            siblings += 1;
        }
        let at = insertion_index(frames.iter().map(|&(_, frame)| frame), y);
        let index = frames.get(at).map_or(siblings, |&(i, _)| i);
        if g.current_index == Some(index) {
            return;
        }

        let items = core::mem::take(&mut self.scratch);
        self.animator
            .reorder(surface, container, &items, g.item, index, now_ms);
        self.scratch = items;
        trace!("{:?} moved {:?} to {index}", g.pointer, g.item);
        g.current_index = Some(index);
    }

    /// End the live sort, rolling the item back to its original slot.
    fn leave_sort<S>(
        &mut self,
        surface: &mut S,
        g: &mut PointerGesture<K>,
        now_ms: u64,
        announce: bool,
    ) where
        S: Surface<K> + ?Sized,
    {
        let Some(container) = g.sort_container.take() else {
            return;
        };
        self.scratch.clear();
        surface.list_items(container, &mut self.scratch);
        let home = self.home_index(g);
        if let Some(current) = self.scratch.iter().position(|&k| k == g.item)
            && current != home
        {
            let items = core::mem::take(&mut self.scratch);
            self.animator
                .reorder(surface, container, &items, g.item, home, now_ms);
            self.scratch = items;
        }
        g.current_index = None;
        g.sort_preceding.clear();
        if g.state == GestureState::Sorting {
            g.state = GestureState::Dragging;
        }
        if self.sorters.get(&container) == Some(&g.pointer) {
            self.sorters.remove(&container);
        }
        self.set_target_class(surface, container, TargetClass::Sorting, false);
        debug!("{:?} stopped sorting {container:?}", g.pointer);
        if announce {
            self.emit(DragEvent::SortLeave {
                pointer: g.pointer,
                item: g.item,
                container,
            });
        }
    }

    /// Slot `g.item` would hold in `self.scratch` had its live sort not moved it:
    /// right after the siblings that were ahead of it when the sort began.
    /// Items other gestures dropped into or out of the container keep their slots.
    fn home_index(&self, g: &PointerGesture<K>) -> usize {
        self.scratch
            .iter()
            .filter(|&&k| k != g.item && g.sort_preceding.contains(&k))
            .count()
    }

    /// Decide the outcome of a release that moved. Returns the `success` flag.
    fn resolve_release<S>(
        &mut self,
        surface: &mut S,
        g: &mut PointerGesture<K>,
        target: Option<K>,
        position: Point,
        now_ms: u64,
    ) -> bool
    where
        S: Surface<K> + ?Sized,
    {
        let sorting = g.state == GestureState::Sorting;
        g.state = GestureState::Settling;
        let Some(target) = target else {
            debug!("{:?} released {:?} outside any target", g.pointer, g.item);
            self.restore(surface, g, now_ms);
            return false;
        };

        if sorting && g.sort_container == Some(target) {
            let new_index = self.index_of(surface, target, g.item);
            let original_index = self.home_index(g);
            surface.set_floating(g.item, None);
            return match new_index {
                Some(new_index) if new_index != original_index => {
                    debug!(
                        "{:?} committed {:?} from {original_index} to {new_index}",
                        g.pointer, g.item
                    );
                    self.emit(DragEvent::SortComplete {
                        pointer: g.pointer,
                        item: g.item,
                        container: target,
                        original_index,
                        new_index,
                    });
                    true
                }
                _ => false,
            };
        }

        if g.origin_container == Some(target) && self.registry.is_sortable(target) {
            debug!(
                "{:?} released over {target:?} while another gesture sorts it",
                g.pointer
            );
            self.restore(surface, g, now_ms);
            return false;
        }

        surface.set_floating(g.item, None);
        surface.accept_drop(g.item, target);
        let dropped = g.item;
        for other in self.gestures.values_mut() {
            other.sort_preceding.retain(|&k| k != dropped);
        }
        debug!("{:?} dropped {:?} on {target:?}", g.pointer, g.item);
        self.emit(DragEvent::Drop {
            pointer: g.pointer,
            item: g.item,
            target,
            position,
        });
        true
    }

    /// Put the item back where it was at press.
    fn restore<S>(&mut self, surface: &mut S, g: &mut PointerGesture<K>, now_ms: u64)
    where
        S: Surface<K> + ?Sized,
    {
        self.leave_sort(surface, g, now_ms, false);
        let floating = g.floating_frame(g.last_position());
        surface.set_floating(g.item, None);
        if let Some(slot) = surface.bounding_box(g.item) {
            g.glide_from = Some(floating.origin() - slot.origin());
        }
    }

    /// Release every resource the gesture holds. Safe to call more than once.
    fn finish<S>(&mut self, surface: &mut S, g: &mut PointerGesture<K>, now_ms: u64)
    where
        S: Surface<K> + ?Sized,
    {
        if g.state == GestureState::Terminated {
            return;
        }
        let (pointer, item) = (g.pointer, g.item);
        surface.release_pointer(pointer, item);
        if let Some(placeholder) = g.placeholder.take() {
            surface.remove_placeholder(placeholder);
        }
        surface.set_class(item, &g.options.drag_class, false);
        surface.set_floating(item, None);
        if let Some(target) = g.current_target.take() {
            self.set_target_class(surface, target, TargetClass::DragOver, false);
        }
        if let Some(container) = g.sort_container.take() {
            self.set_target_class(surface, container, TargetClass::Sorting, false);
        }
        self.sorters.retain(|_, holder| *holder != pointer);
        g.current_index = None;

        self.animator.forget(item);
        surface.settle(item, ItemTransform::IDENTITY);
        if let Some(offset) = g.glide_from.take() {
            self.animator.glide(surface, item, offset, now_ms);
        }

        if self.owners.get(&item) == Some(&pointer) {
            self.owners.remove(&item);
        }
        self.coalescer.discard(pointer);
        g.state = GestureState::Terminated;
        trace!("{pointer:?} released {item:?}");
    }
}

