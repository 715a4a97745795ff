// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod mouse;
pub mod selection;
pub mod session;
pub mod snap;

pub use hit_test::HitTestResult;
pub use mouse::{Modifiers, MouseDelegate, MouseEvent};
pub use selection::Selection;
pub use session::{EditSession, HitTarget, Overlay};
pub use snap::SnapGuides;
