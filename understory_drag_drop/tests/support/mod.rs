// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory scene with one sortable column and one plain drop zone.
//!
//! ```text
//!  LIST (0,0)-(100,200)      ZONE (200,0)-(300,200)
//!  ┌──────────┐              ┌──────────┐
//!  │ X  0..40 │              │          │
//!  │ Y 40..80 │              │          │
//!  │ Z 80..120│              │          │
//!  └──────────┘              └──────────┘
//! ```
//!
//! Items are 40px rows stacked from the top of their region. A floating item
//! keeps its row reserved and reports its floating frame as its bounding box.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_drag_drop::{
    DragDrop, DragDropConfig, DragEvent, EventKind, PointerId, Surface,
};
use understory_flip::{FlipSurface, ItemTransform, Transition};

pub const X: u32 = 1;
pub const Y: u32 = 2;
pub const Z: u32 = 3;
pub const LIST: u32 = 100;
pub const ZONE: u32 = 200;
pub const ROW: f64 = 40.0;
pub const OUTSIDE: Point = Point::new(500.0, 500.0);

const FIRST_PLACEHOLDER: u32 = 1000;

#[derive(Debug)]
struct Region {
    id: u32,
    frame: Rect,
    items: Vec<u32>,
}

#[derive(Debug)]
pub struct MockSurface {
    regions: Vec<Region>,
    floating: BTreeMap<u32, Rect>,
    classes: BTreeSet<(u32, String)>,
    captures: BTreeMap<PointerId, u32>,
    placeholders: BTreeMap<u32, u32>,
    next_placeholder: u32,
    transforms: BTreeMap<u32, ItemTransform>,
    pub animations: Vec<(u32, ItemTransform, ItemTransform)>,
    pub settles: Vec<(u32, ItemTransform)>,
    pub drops: Vec<(u32, u32)>,
    pub frame_requests: usize,
    pub capture_supported: bool,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            regions: vec![
                Region {
                    id: LIST,
                    frame: Rect::new(0.0, 0.0, 100.0, 200.0),
                    items: vec![X, Y, Z],
                },
                Region {
                    id: ZONE,
                    frame: Rect::new(200.0, 0.0, 300.0, 200.0),
                    items: Vec::new(),
                },
            ],
            floating: BTreeMap::new(),
            classes: BTreeSet::new(),
            captures: BTreeMap::new(),
            placeholders: BTreeMap::new(),
            next_placeholder: FIRST_PLACEHOLDER,
            transforms: BTreeMap::new(),
            animations: Vec::new(),
            settles: Vec::new(),
            drops: Vec::new(),
            frame_requests: 0,
            capture_supported: true,
        }
    }

    pub fn order(&self, region: u32) -> Vec<u32> {
        self.region(region)
            .map(|r| r.items.clone())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: u32, class: &str) -> bool {
        self.classes.contains(&(node, class.to_owned()))
    }

    pub fn class_count(&self, class: &str) -> usize {
        self.classes.iter().filter(|(_, c)| c == class).count()
    }

    pub fn bounding_box_of(&self, item: u32) -> Option<Rect> {
        self.bounding_box(item)
    }

    pub fn is_floating(&self, item: u32) -> bool {
        self.floating.contains_key(&item)
    }

    pub fn floating_count(&self) -> usize {
        self.floating.len()
    }

    pub fn captured_by(&self, pointer: PointerId) -> Option<u32> {
        self.captures.get(&pointer).copied()
    }

    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    pub fn transform(&self, item: u32) -> ItemTransform {
        self.transforms
            .get(&item)
            .copied()
            .unwrap_or(ItemTransform::IDENTITY)
    }

    /// Centre of the row `item` occupies when laid out.
    pub fn row_center(&self, item: u32) -> Point {
        self.slot_frame(item)
            .map(|r| r.center())
            .unwrap_or(OUTSIDE)
    }

    fn region(&self, id: u32) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    fn region_of(&self, item: u32) -> Option<&Region> {
        self.regions.iter().find(|r| r.items.contains(&item))
    }

    fn slot_frame(&self, item: u32) -> Option<Rect> {
        let region = self.region_of(item)?;
        let slot = region.items.iter().position(|&k| k == item)?;
        let top = region.frame.y0 + ROW * slot as f64;
        Some(Rect::new(region.frame.x0, top, region.frame.x1, top + ROW))
    }
}

impl FlipSurface<u32> for MockSurface {
    fn bounding_box(&self, item: u32) -> Option<Rect> {
        if let Some(frame) = self.floating.get(&item) {
            return Some(*frame);
        }
        if let Some(region) = self.region(item) {
            return Some(region.frame);
        }
        self.slot_frame(item)
    }

    fn splice(&mut self, container: u32, item: u32, index: usize) {
        for region in &mut self.regions {
            region.items.retain(|&k| k != item);
        }
        if let Some(region) = self.regions.iter_mut().find(|r| r.id == container) {
            let index = index.min(region.items.len());
            region.items.insert(index, item);
        }
    }

    fn animate(&mut self, item: u32, from: ItemTransform, to: ItemTransform, _: Transition) {
        self.animations.push((item, from, to));
        self.transforms.insert(item, to);
    }

    fn settle(&mut self, item: u32, rest: ItemTransform) {
        self.settles.push((item, rest));
        self.transforms.insert(item, rest);
    }
}

impl Surface<u32> for MockSurface {
    fn supports_pointer_capture(&self) -> bool {
        self.capture_supported
    }

    fn hit_test(&self, point: Point, excluding: Option<u32>) -> Option<u32> {
        let floating = self
            .floating
            .iter()
            .find(|(item, frame)| Some(**item) != excluding && frame.contains(point))
            .map(|(item, _)| *item);
        if floating.is_some() {
            return floating;
        }
        for region in &self.regions {
            for &item in &region.items {
                if Some(item) == excluding || self.floating.contains_key(&item) {
                    continue;
                }
                if self.slot_frame(item).is_some_and(|r| r.contains(point)) {
                    return Some(item);
                }
            }
        }
        self.regions
            .iter()
            .find(|r| r.frame.contains(point))
            .map(|r| r.id)
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.region_of(node).map(|r| r.id)
    }

    fn capture_pointer(&mut self, pointer: PointerId, item: u32) {
        self.captures.insert(pointer, item);
    }

    fn release_pointer(&mut self, pointer: PointerId, item: u32) {
        if self.captures.get(&pointer) == Some(&item) {
            self.captures.remove(&pointer);
        }
    }

    fn create_placeholder(&mut self, item: u32, class: &str) -> Option<u32> {
        let id = self.next_placeholder;
        self.next_placeholder += 1;
        self.placeholders.insert(id, item);
        self.classes.insert((id, class.to_owned()));
        Some(id)
    }

    fn remove_placeholder(&mut self, placeholder: u32) {
        self.placeholders.remove(&placeholder);
        self.classes.retain(|(node, _)| *node != placeholder);
    }

    fn set_floating(&mut self, item: u32, frame: Option<Rect>) {
        match frame {
            Some(frame) => self.floating.insert(item, frame),
            None => self.floating.remove(&item),
        };
    }

    fn set_class(&mut self, node: u32, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert((node, class.to_owned()));
        } else {
            self.classes.remove(&(node, class.to_owned()));
        }
    }

    fn list_items(&self, container: u32, out: &mut Vec<u32>) {
        if let Some(region) = self.region(container) {
            out.extend_from_slice(&region.items);
        }
    }

    fn accept_drop(&mut self, item: u32, target: u32) {
        self.drops.push((item, target));
        if self.region(target).is_none() {
            return;
        }
        for region in &mut self.regions {
            region.items.retain(|&k| k != item);
        }
        if let Some(region) = self.regions.iter_mut().find(|r| r.id == target) {
            region.items.push(item);
        }
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }
}

pub type EventLog = Rc<RefCell<Vec<DragEvent<u32>>>>;

/// Subscribe to every event kind and collect deliveries in order.
pub fn record(dnd: &mut DragDrop<u32>) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let log = Rc::clone(&log);
        dnd.on(kind, move |event| {
            log.borrow_mut().push(event.clone());
            Ok(())
        });
    }
    log
}

pub fn kinds(log: &EventLog) -> Vec<EventKind> {
    log.borrow().iter().map(DragEvent::kind).collect()
}

pub fn kinds_for(log: &EventLog, pointer: PointerId) -> Vec<EventKind> {
    log.borrow()
        .iter()
        .filter(|e| e.pointer() == pointer)
        .map(DragEvent::kind)
        .collect()
}

/// The standard scene with X, Y, Z draggable, LIST sortable and ZONE a plain target.
pub fn setup() -> (MockSurface, DragDrop<u32>) {
    setup_with(MockSurface::new())
}

pub fn setup_with(mut surface: MockSurface) -> (MockSurface, DragDrop<u32>) {
    let mut dnd = DragDrop::new(&surface, DragDropConfig::default());
    for item in [X, Y, Z] {
        dnd.register_draggable(item, None).unwrap();
    }
    dnd.register_sortable(&mut surface, LIST, None).unwrap();
    dnd.register_drop_target(&mut surface, ZONE, None).unwrap();
    (surface, dnd)
}

/// Queue a move and run one frame.
pub fn drag_to(
    dnd: &mut DragDrop<u32>,
    surface: &mut MockSurface,
    pointer: PointerId,
    to: Point,
    now_ms: u64,
) {
    dnd.pointer_move(surface, pointer, to);
    dnd.frame(surface, now_ms);
}
