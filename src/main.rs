// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Clipmask: print the clip path stored for an element

fn main() -> anyhow::Result<()> {
    clipmask::run()
}
