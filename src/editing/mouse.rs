// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer events as the editor sees them.
//!
//! The host translates its native pointer events into `MouseEvent`s and
//! forwards them to a `MouseDelegate`. While a delegate reports that it is
//! capturing, the host must forward move and up events from the whole window,
//! not just the editing surface, so a drag always sees its release.

use kurbo::Point;

/// A pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Pointer position in screen (client) pixels
    pub pos: Point,
    /// Modifier keys held during the event
    pub mods: Modifiers,
}

impl MouseEvent {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            mods: Modifiers::default(),
        }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y))
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

/// Receives pointer events for some piece of editable data
///
/// All methods default to doing nothing.
pub trait MouseDelegate {
    type Data;

    fn left_down(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    fn mouse_moved(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    fn left_up(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    fn double_click(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    /// Abandon any gesture in progress (Escape, focus loss)
    fn cancel(&mut self, _data: &mut Self::Data) {}

    /// Whether move/up events must be delivered from outside the surface
    fn is_capturing(&self) -> bool {
        false
    }
}
