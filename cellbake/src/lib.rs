// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cellbake turns fonts and icon images into fixed-size pixel tables for
//! environments that cannot load either at runtime.
//!
//! Each table is described by a profile (see [`BakeConfig`]). Glyph profiles
//! render a contiguous character range from a scalable font with swash; icon
//! profiles resize raster images and center them on a transparent canvas.
//! Every cell is then encoded into storage words ([`GlyphEncoding`],
//! [`IconEncoding`]) and emitted as a C declarations/data artifact pair.
//!
//! The whole batch is driven by [`run`]:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = cellbake::BakeConfig::discover(Path::new("."))?;
//! match cellbake::run(&config)? {
//!     cellbake::RunOutcome::Completed(tables) => {
//!         for table in tables {
//!             println!("{}: {} entries", table.name, table.entries);
//!         }
//!     }
//!     cellbake::RunOutcome::NotReady { created } => {
//!         println!("populate {created:?} and run again");
//!     }
//! }
//! # Ok::<(), cellbake::Error>(())
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

mod canvas;
mod config;
mod descriptor;
mod emit;
mod encode;
mod error;
mod glyph;
mod icon;
mod pipeline;
mod table;

pub use crate::canvas::{centered_offset, composite_centered, transparent_canvas};
pub use crate::config::{
    BakeConfig, GlyphProfile, IconEntry, IconProfile, DEFAULT_GLYPH_PADDING, MANIFEST_NAME,
    MAX_CELL_SIDE, MAX_GLYPH_PADDING,
};
pub use crate::descriptor::{char_label, AssetDescriptor, AssetKind};
pub use crate::emit::{
    render_data, render_declarations, render_table, write_artifacts, write_data,
    write_declarations, Artifact,
};
pub use crate::encode::{GlyphEncoding, IconEncoding, TRANSPARENT_SENTINEL};
pub use crate::error::{Error, ErrorKind};
pub use crate::glyph::{
    blank_glyph, rasterize_glyph, GlyphError, GlyphGeometry, GlyphMask, GlyphSource, SwashFont,
};
pub use crate::icon::{load_icon, rasterize_icon, resolve_icon_source, IconSource, RESIZE_FILTER};
pub use crate::pipeline::{bake_glyph_table, bake_icon_table, run, run_with, RunOutcome, TableSummary};
pub use crate::table::{
    ArrayLayout, ArrayShape, AssetTable, CellStatus, EncodedCell, TableEntry, WordFormat,
};
