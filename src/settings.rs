// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and configuration constants.
//!
//! Compile-time defaults live in the constants below. The runtime-tunable
//! subset is collected in [`EditorSettings`], which can be overridden from a
//! TOML document.

use crate::path::SegmentType;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// HIT TESTING
// ============================================================================
/// Click radius for points, handles and segments (local pixels)
const HIT_RADIUS: f64 = 10.0;

/// Samples used when projecting onto a curved segment
const HIT_CURVE_SAMPLES: usize = 20;

// ============================================================================
// SNAP TO GUIDELINES
// ============================================================================
/// Whether dragged points snap to the quartile guidelines
const SNAP_ENABLED: bool = true;

/// Distance within which a dragged point snaps (local pixels)
const SNAP_THRESHOLD: f64 = 5.0;

/// Guideline positions as fractions of the element width/height
const SNAP_GUIDE_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

// ============================================================================
// CONTROL HANDLES
// ============================================================================
/// Distance new handles are pushed off their chord so they don't sit on it
const HANDLE_OFFSET: f64 = 20.0;

// ============================================================================
// CURVE FLATTENING
// ============================================================================
/// Line segments per quadratic when flattening for CSS
const FLATTEN_QUADRATIC_STEPS: usize = 4;

/// Line segments per cubic when flattening for CSS
const FLATTEN_CUBIC_STEPS: usize = 6;

// ============================================================================
// PATH LIMITS
// ============================================================================
/// A clip path never has fewer points than this
const MIN_POINTS: usize = 3;

/// Decimal places kept when writing percentages to CSS
const PERCENT_PRECISION: i32 = 4;

// ============================================================================
// NUDGE SETTINGS
// ============================================================================
/// Base nudge amount in local pixels (arrow key)
const NUDGE_BASE: f64 = 1.0;

/// Shift-arrow nudge amount in local pixels
const NUDGE_SHIFT: f64 = 10.0;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Hit-testing defaults
pub mod hit {
    /// Click radius (local pixels)
    pub const RADIUS: f64 = super::HIT_RADIUS;

    /// Samples along a curve for closest-point projection
    pub const CURVE_SAMPLES: usize = super::HIT_CURVE_SAMPLES;
}

/// Snap-to-guideline defaults
pub mod snap {
    pub const ENABLED: bool = super::SNAP_ENABLED;
    pub const THRESHOLD: f64 = super::SNAP_THRESHOLD;
    pub const GUIDE_FRACTIONS: [f64; 5] = super::SNAP_GUIDE_FRACTIONS;
}

/// Control handle synthesis
pub mod handles {
    pub const OFFSET: f64 = super::HANDLE_OFFSET;
}

/// Curve flattening for `polygon()` output
pub mod flatten {
    pub const QUADRATIC_STEPS: usize = super::FLATTEN_QUADRATIC_STEPS;
    pub const CUBIC_STEPS: usize = super::FLATTEN_CUBIC_STEPS;
}

/// Structural limits and output formatting
pub mod path {
    pub const MIN_POINTS: usize = super::MIN_POINTS;
    pub const PERCENT_PRECISION: i32 = super::PERCENT_PRECISION;
}

/// Nudge amounts for arrow key point movement
pub mod nudge {
    pub const BASE: f64 = super::NUDGE_BASE;
    pub const SHIFT: f64 = super::NUDGE_SHIFT;
}

// ============================================================================
// RUNTIME SETTINGS
// ============================================================================

/// Failure to load an [`EditorSettings`] document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunables for an editing session
///
/// Every field falls back to the compile-time default when missing from the
/// TOML document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub hit_radius: f64,
    pub hit_curve_samples: usize,
    pub snap_enabled: bool,
    pub snap_threshold: f64,
    pub handle_offset: f64,
    pub nudge_base: f64,
    pub nudge_shift: f64,
    /// Segment type a straight segment becomes when clicked
    pub toggle_curve: SegmentType,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            hit_radius: hit::RADIUS,
            hit_curve_samples: hit::CURVE_SAMPLES,
            snap_enabled: snap::ENABLED,
            snap_threshold: snap::THRESHOLD,
            handle_offset: handles::OFFSET,
            nudge_base: nudge::BASE,
            nudge_shift: nudge::SHIFT,
            toggle_curve: SegmentType::Cubic,
        }
    }
}

impl EditorSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    /// Replace values that would break hit testing or synthesis
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.hit_radius.is_finite() && self.hit_radius > 0.0) {
            self.hit_radius = defaults.hit_radius;
        }
        if self.hit_curve_samples < 2 {
            self.hit_curve_samples = defaults.hit_curve_samples;
        }
        if !(self.snap_threshold.is_finite() && self.snap_threshold >= 0.0) {
            self.snap_threshold = defaults.snap_threshold;
        }
        if !self.handle_offset.is_finite() {
            self.handle_offset = defaults.handle_offset;
        }
        if !self.nudge_base.is_finite() {
            self.nudge_base = defaults.nudge_base;
        }
        if !self.nudge_shift.is_finite() {
            self.nudge_shift = defaults.nudge_shift;
        }
        if self.toggle_curve == SegmentType::Line {
            self.toggle_curve = defaults.toggle_curve;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = EditorSettings::from_toml_str("").unwrap();
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let settings = EditorSettings::from_toml_str(
            "hit_radius = 6.0\nsnap_enabled = false\ntoggle_curve = \"quadratic\"\n",
        )
        .unwrap();
        assert_eq!(settings.hit_radius, 6.0);
        assert!(!settings.snap_enabled);
        assert_eq!(settings.toggle_curve, SegmentType::Quadratic);
        assert_eq!(settings.snap_threshold, snap::THRESHOLD);
    }

    #[test]
    fn nonsense_values_are_replaced() {
        let settings =
            EditorSettings::from_toml_str("hit_radius = -3.0\ntoggle_curve = \"line\"\n")
                .unwrap();
        assert_eq!(settings.hit_radius, hit::RADIUS);
        assert_eq!(settings.toggle_curve, SegmentType::Cubic);

        let settings =
            EditorSettings::from_toml_str("nudge_base = nan\nnudge_shift = inf\nhandle_offset = -inf\n")
                .unwrap();
        assert_eq!(settings.nudge_base, nudge::BASE);
        assert_eq!(settings.nudge_shift, nudge::SHIFT);
        assert_eq!(settings.handle_offset, handles::OFFSET);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = EditorSettings::from_toml_str("hit_radius = \"wide\"").unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }
}
