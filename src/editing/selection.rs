// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! The currently selected point.
//!
//! The clip path editor selects at most one anchor at a time; the selection
//! drives the toolbar (segment type, coordinates) and the delete action.

use crate::model::EntityId;

/// At most one selected point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<EntityId>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the selection is empty
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Check if an entity is selected
    pub fn contains(&self, id: &EntityId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// The selected point, if any
    pub fn get(&self) -> Option<EntityId> {
        self.selected
    }

    /// Replace the selection with `id`
    pub fn select(&mut self, id: EntityId) {
        self.selected = Some(id);
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Deselect `id` if it is the selected point
    pub fn remove(&mut self, id: &EntityId) {
        if self.contains(id) {
            self.selected = None;
        }
    }
}
