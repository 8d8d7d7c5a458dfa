// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal TrueType font assembled in memory.
//!
//! The font has 1000 units per em and two glyphs: `.notdef` (empty) and a
//! solid 400×800 unit bar mapped from [`STEM_CHAR`], drawn from x = 100 to
//! 500 on the baseline. At 10 pixels per em the bar covers exactly 4×8 pixels.

/// The only character the font maps.
pub(crate) const STEM_CHAR: char = 'I';

/// Big-endian table builder.
#[derive(Default)]
struct Table(Vec<u8>);

impl Table {
    fn u16(mut self, value: u16) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn i16(mut self, value: i16) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u8s(mut self, values: &[u8]) -> Self {
        self.0.extend_from_slice(values);
        self
    }

    fn zeros(mut self, len: usize) -> Self {
        self.0.resize(self.0.len() + len, 0);
        self
    }
}

fn cmap() -> Table {
    let code = STEM_CHAR as u16;
    Table::default()
        .u16(0)
        .u16(1)
        // Windows Unicode BMP subtable right after the header.
        .u16(3)
        .u16(1)
        .u32(12)
        // Format 4 with the stem's segment and the terminating one.
        .u16(4)
        .u16(32)
        .u16(0)
        .u16(4)
        .u16(4)
        .u16(1)
        .u16(0)
        .u16(code)
        .u16(0xFFFF)
        .u16(0)
        .u16(code)
        .u16(0xFFFF)
        .u16(1_u16.wrapping_sub(code))
        .u16(1)
        .u16(0)
        .u16(0)
}

fn glyf() -> Table {
    Table::default()
        .i16(1)
        .i16(100)
        .i16(0)
        .i16(500)
        .i16(800)
        .u16(3)
        .u16(0)
        // Four on-curve points with 16-bit deltas.
        .u8s(&[0x01; 4])
        .i16(100)
        .i16(0)
        .i16(400)
        .i16(0)
        .i16(0)
        .i16(800)
        .i16(0)
        .i16(-800)
}

fn head() -> Table {
    Table::default()
        .u32(0x0001_0000)
        .u32(0x0001_0000)
        .u32(0)
        .u32(0x5F0F_3CF5)
        .u16(0x0003)
        .u16(1000)
        .zeros(16)
        .i16(0)
        .i16(0)
        .i16(500)
        .i16(800)
        .u16(0)
        .u16(8)
        .i16(2)
        // Short loca offsets.
        .i16(0)
        .i16(0)
}

fn hhea() -> Table {
    Table::default()
        .u32(0x0001_0000)
        .i16(800)
        .i16(-200)
        .i16(0)
        .u16(600)
        .i16(0)
        .i16(100)
        .i16(500)
        .i16(1)
        .i16(0)
        .i16(0)
        .zeros(8)
        .i16(0)
        .u16(2)
}

fn hmtx() -> Table {
    Table::default().u16(600).i16(0).u16(600).i16(100)
}

fn loca() -> Table {
    // Halved offsets: `.notdef` is empty and the stem takes 34 bytes.
    Table::default().u16(0).u16(0).u16(17)
}

fn maxp() -> Table {
    Table::default()
        .u32(0x0001_0000)
        .u16(2)
        .u16(4)
        .u16(1)
        .u16(0)
        .u16(0)
        .u16(2)
        .zeros(16)
}

/// The complete font file.
pub(crate) fn stem_font() -> Vec<u8> {
    // Sorted by tag, as the table directory requires.
    let tables = [
        (*b"cmap", cmap()),
        (*b"glyf", glyf()),
        (*b"head", head()),
        (*b"hhea", hhea()),
        (*b"hmtx", hmtx()),
        (*b"loca", loca()),
        (*b"maxp", maxp()),
    ];
    let num_tables = tables.len() as u16;
    let mut directory = Table::default()
        .u32(0x0001_0000)
        .u16(num_tables)
        .u16(64)
        .u16(2)
        .u16(num_tables * 16 - 64);
    let mut body = Vec::new();
    let mut offset = 12 + 16 * u32::from(num_tables);
    for (tag, Table(data)) in tables {
        let len = data.len() as u32;
        directory = directory.u8s(&tag).u32(0).u32(offset).u32(len);
        body.extend_from_slice(&data);
        let padded = data.len().next_multiple_of(4);
        body.resize(body.len() + padded - data.len(), 0);
        offset += padded as u32;
    }
    let mut font = directory.0;
    font.extend_from_slice(&body);
    font
}
