// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Moving clip paths between the editor and the document store.
//!
//! Two formats leave the editor. The CSS `polygon()` string is for
//! rendering: it is pushed on every edit and flattens curves. The stored
//! point list is the exact representation: percentages plus segment types
//! and handles, written once when the session closes. Loading prefers the
//! stored points and only falls back to parsing CSS for documents that never
//! had them.

use crate::model::{ElementFrame, EntityId};
use crate::path::{ClipPath, ClipPathError, Incoming, PathPoint, Percent, SegmentType};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

// ===== Stored format =====

/// A control handle in percentage space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredHandle {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for StoredHandle {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<StoredHandle> for Point {
    fn from(h: StoredHandle) -> Self {
        Point::new(h.x, h.y)
    }
}

/// One anchor of the durable point list, coordinates in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub segment_type: SegmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_a: Option<StoredHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_b: Option<StoredHandle>,
}

/// Durable point list for a percentage path
pub fn to_stored_points(path: &ClipPath<Percent>) -> Vec<StoredPoint> {
    path.points()
        .iter()
        .map(|pt| StoredPoint {
            id: pt.id.raw(),
            x: pt.point.x,
            y: pt.point.y,
            segment_type: pt.segment_type(),
            control_a: pt.control_a().map(StoredHandle::from),
            control_b: pt.control_b().map(StoredHandle::from),
        })
        .collect()
}

/// Rebuild a percentage path from its durable point list.
///
/// This is the lossless load path: ids, segment types and handles come back
/// exactly as stored.
pub fn from_stored_points(points: &[StoredPoint]) -> Result<ClipPath<Percent>, ClipPathError> {
    let points = points
        .iter()
        .map(|stored| {
            let incoming = Incoming::from_parts(
                stored.segment_type,
                stored.control_a.map(Point::from),
                stored.control_b.map(Point::from),
            )
            .ok_or(ClipPathError::MissingHandle(stored.id))?;
            Ok(PathPoint {
                id: EntityId::restore(stored.id),
                point: Point::new(stored.x, stored.y),
                incoming,
            })
        })
        .collect::<Result<Vec<_>, ClipPathError>>()?;
    ClipPath::from_points(points)
}

// ===== Session input =====

/// What the host hands over when a session opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(flatten)]
    pub frame: ElementFrame,
    #[serde(default)]
    pub stored_points: Option<Vec<StoredPoint>>,
    #[serde(default)]
    pub stored_clip_path_css: Option<String>,
}

impl SessionInput {
    pub fn new(frame: ElementFrame) -> Self {
        Self {
            frame,
            stored_points: None,
            stored_clip_path_css: None,
        }
    }

    pub fn with_stored_points(mut self, points: Vec<StoredPoint>) -> Self {
        self.stored_points = Some(points);
        self
    }

    pub fn with_stored_css(mut self, css: impl Into<String>) -> Self {
        self.stored_clip_path_css = Some(css.into());
        self
    }
}

/// Pick the best available starting path for a session.
///
/// Stored points win when present and non-empty, then stored CSS, then the
/// full-element rectangle. Broken data degrades to the next option.
pub fn restore_path(input: &SessionInput) -> ClipPath<Percent> {
    let element_id = &input.frame.element_id;

    if let Some(points) = input.stored_points.as_deref()
        && !points.is_empty()
    {
        match from_stored_points(points) {
            Ok(path) => {
                tracing::debug!("Restored {} stored points for {}", path.len(), element_id);
                return path;
            }
            Err(e) => {
                tracing::warn!("Ignoring stored points for {}: {}", element_id, e);
            }
        }
    }

    if let Some(css) = input.stored_clip_path_css.as_deref() {
        match ClipPath::<Percent>::from_polygon_css(css) {
            Ok(path) => {
                tracing::debug!("Restored {} polygon points for {}", path.len(), element_id);
                return path;
            }
            Err(e) => {
                tracing::warn!(
                    "Malformed clip-path for {}, using default rectangle: {}",
                    element_id,
                    e
                );
            }
        }
    }

    ClipPath::rectangle(100.0, 100.0)
}

// ===== Document store collaborator =====

/// Final result of an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPathCommit {
    pub element_id: String,
    /// Flattened CSS for rendering
    pub css: String,
    /// Exact percentage points for re-editing
    pub points: Vec<StoredPoint>,
}

/// Receives clip path updates from an editing session
pub trait ClipPathSink {
    /// Live preview after every edit
    fn preview(&mut self, element_id: &str, css: &str);

    /// Final CSS and point list when the session closes
    fn commit(&mut self, commit: &ClipPathCommit);
}

#[derive(Debug, Default)]
struct StoreState {
    live: BTreeMap<String, String>,
    committed: BTreeMap<String, ClipPathCommit>,
    preview_count: usize,
}

/// In-memory document store.
///
/// Clones share the same storage, so the host can keep one handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest CSS pushed for an element
    pub fn live_css(&self, element_id: &str) -> Option<String> {
        self.state.borrow().live.get(element_id).cloned()
    }

    /// Last committed result for an element
    pub fn committed(&self, element_id: &str) -> Option<ClipPathCommit> {
        self.state.borrow().committed.get(element_id).cloned()
    }

    /// Number of live previews received
    pub fn preview_count(&self) -> usize {
        self.state.borrow().preview_count
    }

    /// Stored points for an element, ready to seed the next session
    pub fn session_input(&self, frame: ElementFrame) -> SessionInput {
        let state = self.state.borrow();
        let mut input = SessionInput::new(frame);
        if let Some(commit) = state.committed.get(&input.frame.element_id) {
            input.stored_points = Some(commit.points.clone());
            input.stored_clip_path_css = Some(commit.css.clone());
        }
        input
    }

    /// All committed records as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let state = self.state.borrow();
        let records: Vec<&ClipPathCommit> = state.committed.values().collect();
        serde_json::to_string_pretty(&records)
    }
}

impl ClipPathSink for MemoryStore {
    fn preview(&mut self, element_id: &str, css: &str) {
        let mut state = self.state.borrow_mut();
        state.live.insert(element_id.to_string(), css.to_string());
        state.preview_count += 1;
    }

    fn commit(&mut self, commit: &ClipPathCommit) {
        let mut state = self.state.borrow_mut();
        state
            .live
            .insert(commit.element_id.clone(), commit.css.clone());
        state
            .committed
            .insert(commit.element_id.clone(), commit.clone());
    }
}
