// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-size working surfaces and centered placement.

use image::{imageops, GenericImage, GenericImageView, Rgba, RgbaImage};

/// Offset that centers `content` pixels inside `cell` pixels along one axis.
///
/// Uses floor division, so an odd remainder leaves the extra pixel on the
/// bottom/right side and the content sits one pixel toward the top/left. The
/// result is negative when the content is larger than the cell.
pub fn centered_offset(cell: u32, content: u32) -> i64 {
    (i64::from(cell) - i64::from(content)).div_euclid(2)
}

/// A fully transparent `width × height` canvas.
pub fn transparent_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

/// Pastes `content` onto `canvas` so that it is centered on both axes.
///
/// Pixels are replaced rather than blended, and parts of `content` that fall
/// outside `canvas` are clipped. Returns the offset used.
pub fn composite_centered<I, J>(canvas: &mut I, content: &J) -> (i64, i64)
where
    I: GenericImage,
    J: GenericImageView<Pixel = I::Pixel>,
{
    let x = centered_offset(canvas.width(), content.width());
    let y = centered_offset(canvas.height(), content.height());
    imageops::replace(canvas, content, x, y);
    (x, y)
}
