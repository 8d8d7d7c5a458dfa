// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cellbake::{GlyphError, GlyphMask, GlyphSource};

/// Capital A, 6×10. `#` is full ink, `+` an antialiased edge.
const LETTER_A: [&str; 10] = [
    ".+##+.", //
    "..##..", //
    ".#..#.", //
    ".#..#.", //
    "#....#", //
    "######", //
    "#....#", //
    "#....#", //
    "#....#", //
    "#....#", //
];

/// Coverage of the antialiased `+` samples.
pub(crate) const EDGE_COVERAGE: u8 = 100;

/// A fixed, hand-drawn font with glyphs for space and `A` only.
///
/// The bearings are deliberately skewed to make sure placement ignores them.
#[derive(Debug, Default)]
pub(crate) struct SketchFont {
    /// Characters requested so far.
    pub(crate) rendered: Vec<char>,
}

impl GlyphSource for SketchFont {
    fn render(&mut self, ch: char, _font_size: f32) -> Result<GlyphMask, GlyphError> {
        self.rendered.push(ch);
        match ch {
            ' ' => Ok(GlyphMask::empty()),
            'A' => Ok(GlyphMask {
                left: -2,
                top: 11,
                width: 6,
                height: 10,
                data: LETTER_A
                    .iter()
                    .flat_map(|row| row.bytes())
                    .map(|sample| match sample {
                        b'#' => 255,
                        b'+' => EDGE_COVERAGE,
                        _ => 0,
                    })
                    .collect(),
            }),
            _ => Err(GlyphError::Unsupported(ch)),
        }
    }
}
