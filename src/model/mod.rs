// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Element data handed to the editor by the host

pub mod element;
pub mod entity_id;

pub use element::ElementFrame;
pub use entity_id::EntityId;
