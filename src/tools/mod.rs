// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer tools that drive an edit session

pub mod clip_path;

pub use clip_path::{ClipPathTool, DragState};
