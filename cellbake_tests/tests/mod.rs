// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `cellbake`.
//!
//! - The `util` module contains a scratch directory helper and a small
//!   hand-drawn glyph source, so no test depends on a font being installed.
//! - The default test harness is replaced by this `mod.rs` entry point so the
//!   utilities can be shared between topic modules.
//! - Put the topic at the start of a test name (`icon_...`, `pipeline_...`);
//!   scratch directories are named after the test.

#![allow(missing_docs, reason = "we don't need docs for testing")]

#[macro_use]
mod util;
