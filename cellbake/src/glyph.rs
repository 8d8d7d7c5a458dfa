// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterization of single characters into fixed-size coverage cells.
//!
//! A glyph is rendered into an oversized canvas (the cell plus a padding
//! margin on every side), positioned so that its ink box is centered in the
//! cell, and the canvas is then cropped back to the cell. Ink that overshoots
//! the cell is discarded by the crop rather than shifting the placement.

use std::path::Path;

use image::{imageops, GrayImage, Luma};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use crate::canvas::centered_offset;
use crate::config::{MAX_CELL_SIDE, MAX_GLYPH_PADDING};
use crate::Error;

/// Largest side of the padded working canvas.
const MAX_CANVAS_SIDE: u32 = MAX_CELL_SIDE + 2 * MAX_GLYPH_PADDING;

/// Coverage mask of one rendered glyph.
///
/// `left` and `top` follow the usual bearing convention: the ink box starts
/// `left` pixels right of the pen and `top` pixels above the baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    /// Horizontal bearing.
    pub left: i32,
    /// Vertical bearing, positive upward.
    pub top: i32,
    /// Ink box width.
    pub width: u32,
    /// Ink box height.
    pub height: u32,
    /// Row-major coverage, `0` is paper and `255` full ink.
    pub data: Vec<u8>,
}

impl GlyphMask {
    /// A mask with no ink, as produced for blank characters such as space.
    pub fn empty() -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }
}

/// Why a single character could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlyphError {
    /// The font has no glyph for the character.
    Unsupported(char),
    /// The font driver produced no image for the character.
    RenderFailed(char),
    /// The rendered mask does not hold `width * height` samples.
    MalformedMask(char),
    /// The cell plus its padding exceeds the largest working canvas.
    CanvasTooLarge,
}

impl core::fmt::Display for GlyphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unsupported(ch) => write!(f, "no glyph for {ch:?}"),
            Self::RenderFailed(ch) => write!(f, "font driver failed to render {ch:?}"),
            Self::MalformedMask(ch) => write!(f, "malformed coverage mask for {ch:?}"),
            Self::CanvasTooLarge => write!(
                f,
                "cell plus padding exceeds {MAX_CANVAS_SIDE} pixels per side"
            ),
        }
    }
}

impl core::error::Error for GlyphError {}

/// Something that can render characters as coverage masks.
pub trait GlyphSource {
    /// Renders `ch` at `font_size` pixels per em.
    fn render(&mut self, ch: char, font_size: f32) -> Result<GlyphMask, GlyphError>;
}

/// Where and how big a glyph cell is rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphGeometry {
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Pixels per em.
    pub font_size: f32,
    /// Margin added on every side of the working canvas.
    pub padding: u32,
}

impl GlyphGeometry {
    /// Width and height of the padded working canvas, if it is not too large.
    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        let margin = self.padding.checked_mul(2)?;
        let width = self.cell_width.checked_add(margin)?;
        let height = self.cell_height.checked_add(margin)?;
        (width <= MAX_CANVAS_SIDE && height <= MAX_CANVAS_SIDE).then_some((width, height))
    }
}

/// Renders `ch` into a `cell_width × cell_height` coverage buffer.
pub fn rasterize_glyph<S: GlyphSource + ?Sized>(
    source: &mut S,
    ch: char,
    geometry: &GlyphGeometry,
) -> Result<GrayImage, GlyphError> {
    let (canvas_width, canvas_height) =
        geometry.canvas_size().ok_or(GlyphError::CanvasTooLarge)?;
    let mask = source.render(ch, geometry.font_size)?;
    if mask.data.len() != mask.width as usize * mask.height as usize {
        return Err(GlyphError::MalformedMask(ch));
    }

    let pad = geometry.padding;
    let mut canvas = GrayImage::new(canvas_width, canvas_height);
    if let Some(ink) = GrayImage::from_raw(mask.width, mask.height, mask.data) {
        // Ink box origin relative to the pen, y growing downward.
        let (ink_x, ink_y) = (i64::from(mask.left), -i64::from(mask.top));
        let pen_x = centered_offset(geometry.cell_width, mask.width) - ink_x;
        let pen_y = centered_offset(geometry.cell_height, mask.height) - ink_y;
        imageops::replace(
            &mut canvas,
            &ink,
            i64::from(pad) + pen_x + ink_x,
            i64::from(pad) + pen_y + ink_y,
        );
    }

    let cell = imageops::crop_imm(&canvas, pad, pad, geometry.cell_width, geometry.cell_height);
    Ok(cell.to_image())
}

/// A cell with no ink, used when a glyph fails to render.
pub fn blank_glyph(geometry: &GlyphGeometry) -> GrayImage {
    GrayImage::from_pixel(geometry.cell_width, geometry.cell_height, Luma([0]))
}

/// A scalable font loaded from disk and rendered with swash.
pub struct SwashFont {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    context: ScaleContext,
}

impl SwashFont {
    /// Reads and parses the first font in the file at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|err| Error::font_load(path, Some(err)))?;
        Self::from_bytes(data).ok_or_else(|| Error::font_load(path, None))
    }

    /// Parses the first font in `data`.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let font = FontRef::from_index(&data, 0)?;
        let (offset, key) = (font.offset, font.key);
        Some(Self {
            data,
            offset,
            key,
            context: ScaleContext::new(),
        })
    }
}

impl core::fmt::Debug for SwashFont {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwashFont")
            .field("len", &self.data.len())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl GlyphSource for SwashFont {
    fn render(&mut self, ch: char, font_size: f32) -> Result<GlyphMask, GlyphError> {
        // Built field by field so `context` can be borrowed mutably alongside.
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let glyph_id = font.charmap().map(ch);
        if glyph_id == 0 {
            return Err(GlyphError::Unsupported(ch));
        }

        let mut scaler = self.context.builder(font).size(font_size).hint(true).build();
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
            .ok_or(GlyphError::RenderFailed(ch))?;

        if image.placement.width == 0 || image.placement.height == 0 {
            return Ok(GlyphMask::empty());
        }
        Ok(GlyphMask {
            left: image.placement.left,
            top: image.placement.top,
            width: image.placement.width,
            height: image.placement.height,
            data: image.data,
        })
    }
}
