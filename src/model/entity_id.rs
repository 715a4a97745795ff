// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Unique identifiers for path points.
//!
//! Each `EntityId` is a monotonically increasing `u64` generated from a global
//! atomic counter. IDs are used for selection, drag targets and the stored
//! point format. They are never reused within a session: restoring stored
//! points advances the counter past every restored id, so points inserted
//! afterwards cannot collide with them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a point in a clip path
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(u64);

static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Create a new unique entity ID
    pub fn next() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Adopt an id that came from stored data.
    ///
    /// The global counter is bumped past `raw` so `next()` never hands it
    /// out again.
    pub fn restore(raw: u64) -> Self {
        ENTITY_COUNTER.fetch_max(raw.saturating_add(1), Ordering::Relaxed);
        Self(raw)
    }

    /// The raw numeric value
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::next()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
