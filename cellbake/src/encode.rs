// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping of composited pixel buffers to storage words.
//!
//! Encoding is a pure function of the buffer and the configured threshold:
//! pixels are visited in row-major order and no state is carried between them.

use image::{GrayImage, Rgba, RgbaImage};
use serde::Deserialize;

use crate::table::EncodedCell;

/// Word emitted for icon pixels that must not be drawn.
///
/// Every opaque word has a cleared high byte, so this pattern can never
/// collide with a real color.
pub const TRANSPARENT_SENTINEL: u32 = 0xFF00_0000;

/// How glyph coverage samples become storage words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GlyphEncoding {
    /// `1` where coverage is at least `threshold`, `0` elsewhere.
    Binary {
        /// Lowest coverage classified as ink.
        threshold: u8,
    },
    /// The ink coverage itself, `0..=255`.
    #[default]
    Intensity,
}

impl GlyphEncoding {
    /// Encodes a single ink coverage sample.
    pub fn encode_sample(self, coverage: u8) -> u32 {
        match self {
            Self::Binary { threshold } => u32::from(coverage >= threshold),
            Self::Intensity => u32::from(coverage),
        }
    }

    /// Encodes a whole coverage buffer.
    pub fn encode(self, coverage: &GrayImage) -> EncodedCell {
        let words = coverage
            .pixels()
            .map(|sample| self.encode_sample(sample.0[0]))
            .collect();
        EncodedCell::from_words(coverage.width(), coverage.height(), words)
    }
}

/// How icon pixels become storage words.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IconEncoding {
    /// Pixels with an alpha strictly below this value become
    /// [`TRANSPARENT_SENTINEL`]; an alpha equal to the cutoff is opaque.
    pub alpha_cutoff: u8,
}

impl IconEncoding {
    /// Creates an encoding with the given alpha cutoff.
    pub const fn new(alpha_cutoff: u8) -> Self {
        Self { alpha_cutoff }
    }

    /// Encodes a single pixel as `0x00RRGGBB` or the transparency sentinel.
    pub fn encode_pixel(self, pixel: Rgba<u8>) -> u32 {
        let [r, g, b, a] = pixel.0;
        if a < self.alpha_cutoff {
            TRANSPARENT_SENTINEL
        } else {
            u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
        }
    }

    /// Encodes a whole composited icon.
    pub fn encode(self, image: &RgbaImage) -> EncodedCell {
        let words = image
            .pixels()
            .map(|pixel| self.encode_pixel(*pixel))
            .collect();
        EncodedCell::from_words(image.width(), image.height(), words)
    }
}
