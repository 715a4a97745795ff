// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Clip path tool: the pointer state machine for editing a clip path

use crate::editing::{EditSession, HitTarget, MouseDelegate, MouseEvent};
use crate::model::EntityId;
use crate::path::HandleRole;

// ===== Drag State =====

/// What the tool is currently dragging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// Dragging an anchor (snaps to guidelines)
    Point(EntityId),
    /// Dragging the first control handle of a point
    ControlA(EntityId),
    /// Dragging the second control handle of a point
    ControlB(EntityId),
}

impl DragState {
    fn for_hit(id: EntityId, role: HandleRole) -> Self {
        match role {
            HandleRole::Anchor => DragState::Point(id),
            HandleRole::ControlA => DragState::ControlA(id),
            HandleRole::ControlB => DragState::ControlB(id),
        }
    }
}

// ===== ClipPathTool =====

/// Turns pointer events into clip path edits
#[derive(Debug, Clone, Default)]
pub struct ClipPathTool {
    state: DragState,
}

impl ClipPathTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.state
    }

    fn set_state(&mut self, state: DragState) {
        if state != self.state {
            tracing::debug!("Clip path tool: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for ClipPathTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let local = session.screen_to_local(event.pos);

        match session.hit_test(local) {
            Some(HitTarget::Point(hit)) => {
                session.selection.select(hit.entity);
                self.set_state(DragState::for_hit(hit.entity, hit.role));
            }
            Some(HitTarget::Segment { info, .. }) => {
                session.toggle_segment(info.owner);
                self.set_state(DragState::Idle);
            }
            None => {
                session.selection.clear();
                self.set_state(DragState::Idle);
            }
        }
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut EditSession) {
        let local = session.screen_to_local(event.pos);

        match self.state {
            DragState::Idle => {}
            DragState::Point(id) => session.move_point_to(id, local),
            DragState::ControlA(id) => session.move_handle_to(id, HandleRole::ControlA, local),
            DragState::ControlB(id) => session.move_handle_to(id, HandleRole::ControlB, local),
        }
    }

    fn left_up(&mut self, _event: MouseEvent, session: &mut EditSession) {
        session.guides.clear_active();
        self.set_state(DragState::Idle);
    }

    fn double_click(&mut self, event: MouseEvent, session: &mut EditSession) {
        let local = session.screen_to_local(event.pos);
        let radius = session.settings.hit_radius;

        // Only anchors delete; a double click on a handle does nothing
        if let Some(hit) = session.hit_test_point(local, radius) {
            if hit.role == HandleRole::Anchor {
                session.delete_point(hit.entity);
            }
        } else if let Some((info, hit)) = session.hit_test_segments(local, radius) {
            session.insert_point_on_segment(&info, hit.point);
        }
        self.set_state(DragState::Idle);
    }

    fn cancel(&mut self, session: &mut EditSession) {
        session.guides.clear_active();
        self.set_state(DragState::Idle);
    }

    fn is_capturing(&self) -> bool {
        self.state != DragState::Idle
    }
}
