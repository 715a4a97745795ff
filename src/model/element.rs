// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! The host element a clip path belongs to.
//!
//! The document store owns the element; the editor only reads its pixel
//! size and rotation while a session is open.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Geometry of the element whose clip path is being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFrame {
    /// Opaque id of the element in the document store
    pub element_id: String,
    /// Unrotated pixel width
    pub width: f64,
    /// Unrotated pixel height
    pub height: f64,
    /// Clockwise rotation in degrees
    #[serde(default)]
    pub rotation_degrees: f64,
}

impl ElementFrame {
    pub fn new(element_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            element_id: element_id.into(),
            width,
            height,
            rotation_degrees: 0.0,
        }
    }

    /// Set the rotation (builder style)
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Unrotated size in local pixels
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
