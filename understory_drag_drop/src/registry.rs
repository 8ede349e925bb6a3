// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registered draggables and drop targets.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::options::DragOptions;

/// A registered drop target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropTarget {
    /// Whether the target reorders its own items live.
    pub sortable: bool,
    /// Styling for the target.
    pub options: DragOptions,
}

/// Registration tables, keyed by node handle.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    draggables: HashMap<K, DragOptions>,
    targets: HashMap<K, DropTarget>,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            draggables: HashMap::new(),
            targets: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Registry<K> {
    /// Register or re-register `item` as draggable.
    pub fn insert_draggable(&mut self, item: K, options: DragOptions) {
        self.draggables.insert(item, options);
    }

    /// Register or re-register `node` as a drop target.
    ///
    /// Returns the previous registration.
    pub fn insert_target(&mut self, node: K, target: DropTarget) -> Option<DropTarget> {
        self.targets.insert(node, target)
    }

    /// Options of a registered draggable.
    pub fn draggable(&self, item: K) -> Option<&DragOptions> {
        self.draggables.get(&item)
    }

    /// A registered drop target.
    pub fn target(&self, node: K) -> Option<&DropTarget> {
        self.targets.get(&node)
    }

    /// Returns `true` if `node` is a sortable drop target.
    pub fn is_sortable(&self, node: K) -> bool {
        self.targets.get(&node).is_some_and(|t| t.sortable)
    }

    /// Forget `item` as a draggable.
    pub fn remove_draggable(&mut self, item: K) -> Option<DragOptions> {
        self.draggables.remove(&item)
    }

    /// Forget `node` as a drop target.
    pub fn remove_target(&mut self, node: K) -> Option<DropTarget> {
        self.targets.remove(&node)
    }

    /// Iterate registered drop targets.
    pub fn targets(&self) -> impl Iterator<Item = (K, &DropTarget)> + '_ {
        self.targets.iter().map(|(k, t)| (*k, t))
    }

    /// Number of registered draggables.
    pub fn draggable_count(&self) -> usize {
        self.draggables.len()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.draggables.clear();
        self.targets.clear();
    }
}
