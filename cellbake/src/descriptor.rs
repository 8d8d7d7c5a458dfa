// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use crate::encode::{GlyphEncoding, IconEncoding};

/// Everything needed to rasterize and encode one asset.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetDescriptor {
    /// Symbolic index of the asset in its table, e.g. `APP_ICON_EDITOR`.
    pub id: String,
    /// Annotation emitted next to the entry in the data artifact.
    pub label: String,
    /// Output cell width.
    pub cell_width: u32,
    /// Output cell height.
    pub cell_height: u32,
    /// What is rasterized and how it is encoded.
    pub kind: AssetKind,
}

/// The source and encoding of an asset.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetKind {
    /// A character rendered from the profile's font.
    Glyph {
        /// The character.
        ch: char,
        /// Coverage encoding.
        encoding: GlyphEncoding,
    },
    /// A raster image resized into the cell.
    Icon {
        /// The icon's own source file.
        path: PathBuf,
        /// Side length the source is resized to before centering.
        content_size: u32,
        /// Alpha classification.
        encoding: IconEncoding,
    },
}

/// Readable name of a character for data artifact annotations.
///
/// Characters that would break a C line comment are spelled out.
pub fn char_label(ch: char) -> String {
    match ch {
        ' ' => "Space".to_owned(),
        '\\' => "Backslash".to_owned(),
        '*' => "Asterisk".to_owned(),
        '/' => "Slash".to_owned(),
        ch if ch.is_control() => format!("U+{:04X}", u32::from(ch)),
        ch => ch.to_string(),
    }
}
