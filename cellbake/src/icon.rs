// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rescaling of raster icons into fixed-size transparent cells.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::canvas::{composite_centered, transparent_canvas};
use crate::Error;

/// Resampling filter used to shrink icon sources.
///
/// Lanczos keeps thin strokes legible at small sizes where nearest-neighbor
/// drops them.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Resizes `source` to `content_size × content_size` and centers it in a
/// transparent `cell_size × cell_size` canvas, alpha included.
///
/// With an odd `cell_size - content_size` the content sits one pixel toward
/// the top/left corner.
pub fn rasterize_icon(source: &RgbaImage, cell_size: u32, content_size: u32) -> RgbaImage {
    let content = imageops::resize(source, content_size, content_size, RESIZE_FILTER);
    let mut canvas = transparent_canvas(cell_size, cell_size);
    composite_centered(&mut canvas, &content);
    canvas
}

/// Decodes the image at `path` into RGBA.
pub fn load_icon(path: &Path) -> Result<RgbaImage, Error> {
    let image = image::open(path).map_err(|err| Error::image_decode(path, err))?;
    Ok(image.to_rgba8())
}

/// Which file an icon slot is rasterized from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconSource {
    /// The icon's own file exists.
    Own(PathBuf),
    /// The icon's file is missing and the fallback exists.
    Fallback(PathBuf),
    /// Neither the icon's file nor a fallback exists.
    Missing,
}

/// Picks the file for an icon, falling back when its own file is absent.
pub fn resolve_icon_source(own: &Path, fallback: Option<&Path>) -> IconSource {
    if own.is_file() {
        return IconSource::Own(own.to_owned());
    }
    match fallback {
        Some(fallback) if fallback.is_file() => IconSource::Fallback(fallback.to_owned()),
        _ => IconSource::Missing,
    }
}
