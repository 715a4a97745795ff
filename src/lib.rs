// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Clipmask: an interactive clip path editor core
//!
//! An element's clip mask is edited as a closed path of line, quadratic and
//! cubic segments. The editor works in element-local pixels, renders a
//! flattened CSS `polygon()` preview on every change, and stores the exact
//! path as percentages so curves survive resizing and reloading.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod editing;
pub mod geometry;
pub mod mapping;
pub mod model;
pub mod path;
pub mod persistence;
pub mod settings;
pub mod tools;

pub use editing::{EditSession, HitTarget, MouseDelegate, MouseEvent, Overlay};
pub use model::{ElementFrame, EntityId};
pub use path::{ClipPath, ClipPathError, Local, Percent, SegmentType};
pub use persistence::{ClipPathCommit, ClipPathSink, MemoryStore, SessionInput, StoredPoint};
pub use settings::EditorSettings;
pub use tools::ClipPathTool;

/// Entry point for the `clipmask` inspector
pub fn run() -> anyhow::Result<()> {
    // Can be controlled via the RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clipmask=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some((element_path, settings_path)) = handle_command_line_args() else {
        eprintln!("Usage: clipmask <element.json> [settings.toml]");
        return Ok(());
    };

    let settings = match settings_path {
        Some(path) => EditorSettings::load(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EditorSettings::default(),
    };

    let report = inspect(&element_path, &settings)?;
    println!("clip-path: {}", report.css);
    println!("path: {}", report.draw_command);
    println!("{}", report.points_json);
    Ok(())
}

/// Element file and optional settings file from the command line
fn handle_command_line_args() -> Option<(PathBuf, Option<PathBuf>)> {
    let mut args = std::env::args_os().skip(1);
    let element = PathBuf::from(args.next()?);
    let settings = args.next().map(PathBuf::from);
    Some((element, settings))
}

/// What the inspector prints for one element
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// CSS `clip-path` value
    pub css: String,
    /// SVG path data in local pixels
    pub draw_command: String,
    /// Stored point list as pretty JSON
    pub points_json: String,
}

/// Restore an element's clip path the way a session would and describe it
pub fn inspect(element_path: &Path, settings: &EditorSettings) -> anyhow::Result<Report> {
    let source = std::fs::read_to_string(element_path)
        .with_context(|| format!("reading {}", element_path.display()))?;
    let input: SessionInput = serde_json::from_str(&source)
        .with_context(|| format!("parsing element description {}", element_path.display()))?;
    tracing::info!("Inspecting clip path of {}", input.frame.element_id);

    let session = EditSession::open(input, settings.clone(), Box::new(MemoryStore::new()));
    let points_json = serde_json::to_string_pretty(&session.stored_points())
        .context("serializing stored points")?;

    Ok(Report {
        css: session.live_css(),
        draw_command: session.path().to_draw_command(),
        points_json,
    })
}
