// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - manages clip path editing state for a single element

mod hit_testing;
mod path_editing;

pub use hit_testing::HitTarget;

use super::selection::Selection;
use super::snap::SnapGuides;
use crate::mapping;
use crate::model::{ElementFrame, EntityId};
use crate::path::{ClipPath, Local, Percent, SegmentType};
use crate::persistence::{self, ClipPathCommit, ClipPathSink, SessionInput, StoredPoint};
use crate::settings::EditorSettings;
use kurbo::{Line, Point, Rect, Size};

/// Editing session for one element's clip path
///
/// The session owns the path for as long as the editor is open. The path is
/// kept in element-local pixels so hit testing and snapping work in the same
/// units as the pointer; it is converted to percentages for every preview and
/// once more when the session closes.
pub struct EditSession {
    /// The element being edited, as last reported by the host
    frame: ElementFrame,

    /// Axis-aligned screen bounds of the element, for pointer mapping
    screen_bounds: Rect,

    /// The editable path, in local pixels
    path: ClipPath<Local>,

    /// Currently selected point
    pub selection: Selection,

    /// Guidelines for point drags
    pub guides: SnapGuides,

    /// Tunables (hit radius, snap threshold, ...)
    pub settings: EditorSettings,

    /// Where previews and the final result go
    sink: Box<dyn ClipPathSink>,
}

/// What the overlay renderer needs to draw the editor
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// SVG path data of the outline in local pixels
    pub draw_command: String,
    /// Anchor-to-handle lines
    pub handle_lines: Vec<Line>,
    /// Engaged vertical guideline (x, local pixels)
    pub active_vertical: Option<f64>,
    /// Engaged horizontal guideline (y, local pixels)
    pub active_horizontal: Option<f64>,
    pub selected: Option<EntityId>,
}

impl EditSession {
    /// Open a session, seeding the path from the host's stored data
    pub fn open(
        input: SessionInput,
        settings: EditorSettings,
        sink: Box<dyn ClipPathSink>,
    ) -> Self {
        let size = input.frame.size();
        let path = persistence::restore_path(&input).to_local(size);
        tracing::info!(
            "Opened clip path session for {} ({} points, {}x{})",
            input.frame.element_id,
            path.len(),
            size.width,
            size.height
        );

        let mut session = Self {
            screen_bounds: Rect::from_origin_size(Point::ORIGIN, size),
            guides: SnapGuides::new(size),
            frame: input.frame,
            path,
            selection: Selection::new(),
            settings,
            sink,
        };
        session.notify_changed();
        session
    }

    pub fn frame(&self) -> &ElementFrame {
        &self.frame
    }

    pub fn path(&self) -> &ClipPath<Local> {
        &self.path
    }

    pub fn screen_bounds(&self) -> Rect {
        self.screen_bounds
    }

    /// Update where the element currently sits on screen
    pub fn set_screen_bounds(&mut self, bounds: Rect) {
        self.screen_bounds = bounds;
    }

    /// Update the element's rotation
    pub fn set_rotation(&mut self, degrees: f64) {
        self.frame.rotation_degrees = degrees;
    }

    /// Map a pointer position to local pixels using the latest frame
    pub fn screen_to_local(&self, pos: Point) -> Point {
        mapping::screen_to_local(
            pos,
            self.screen_bounds,
            self.frame.width,
            self.frame.height,
            self.frame.rotation_degrees,
        )
    }

    /// The path in percentage space
    pub fn percent_path(&self) -> ClipPath<Percent> {
        self.path.to_percent(self.frame.size())
    }

    /// Current CSS clip-path value
    pub fn live_css(&self) -> String {
        self.percent_path().to_clip_path_css()
    }

    /// Current durable point list
    pub fn stored_points(&self) -> Vec<StoredPoint> {
        persistence::to_stored_points(&self.percent_path())
    }

    /// Segment type of the selected point, for the toolbar
    pub fn selected_segment_type(&self) -> Option<SegmentType> {
        let id = self.selection.get()?;
        self.path.get(id).map(|pt| pt.segment_type())
    }

    /// Selected point's position in percent, for the coordinate read-out
    pub fn selected_point_percent(&self) -> Option<Point> {
        let id = self.selection.get()?;
        let pt = self.path.get(id)?;
        Some(mapping::local_to_percent(pt.point, self.frame.size()))
    }

    /// Everything the overlay needs to paint
    pub fn overlay(&self) -> Overlay {
        let points = self.path.points();
        let handle_lines = points
            .iter()
            .enumerate()
            .flat_map(|(i, pt)| {
                let prev = points[self.path.previous_index(i)].point;
                match (pt.control_a(), pt.control_b()) {
                    // Quadratic: one handle, drawn to both ends
                    (Some(a), None) => vec![Line::new(prev, a), Line::new(a, pt.point)],
                    (Some(a), Some(b)) => vec![Line::new(prev, a), Line::new(b, pt.point)],
                    _ => Vec::new(),
                }
            })
            .collect();

        Overlay {
            draw_command: self.path.to_draw_command(),
            handle_lines,
            active_vertical: self.guides.active_vertical(),
            active_horizontal: self.guides.active_horizontal(),
            selected: self.selection.get(),
        }
    }

    /// Close the session and hand the result to the document store
    pub fn close(mut self) -> ClipPathCommit {
        let commit = ClipPathCommit {
            element_id: self.frame.element_id.clone(),
            css: self.live_css(),
            points: self.stored_points(),
        };
        self.sink.commit(&commit);
        tracing::info!(
            "Closed clip path session for {} ({} points)",
            commit.element_id,
            commit.points.len()
        );
        commit
    }

    /// Push the live preview after an edit
    fn notify_changed(&mut self) {
        let css = self.live_css();
        tracing::trace!("[{}] clip-path: {}", self.frame.element_id, css);
        self.sink.preview(&self.frame.element_id, &css);
    }

    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("frame", &self.frame)
            .field("screen_bounds", &self.screen_bounds)
            .field("path", &self.path)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
