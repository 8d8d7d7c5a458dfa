// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoded cells and the ordered tables that collect them.

use std::path::PathBuf;

use serde::Deserialize;

use crate::Error;

/// A rectangular grid of storage words, one per output pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedCell {
    width: u32,
    height: u32,
    words: Vec<u32>,
}

impl EncodedCell {
    /// Builds a cell from row-major words.
    ///
    /// # Panics
    ///
    /// If `words.len()` is not `width * height`.
    pub fn from_words(width: u32, height: u32, words: Vec<u32>) -> Self {
        assert_eq!(
            words.len(),
            width as usize * height as usize,
            "word count must match the cell dimensions"
        );
        Self {
            width,
            height,
            words,
        }
    }

    /// A cell where every word is `word`.
    pub fn filled(width: u32, height: u32, word: u32) -> Self {
        Self::from_words(width, height, vec![word; width as usize * height as usize])
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All words in row-major order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// The words of row `y`.
    pub fn row(&self, y: u32) -> &[u32] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.words[start..start + width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.words.chunks_exact(self.width.max(1) as usize)
    }

    /// The word at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.row(y)[x as usize]
    }
}

/// How a table entry came to hold its cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellStatus {
    /// The asset's own source was rasterized.
    Rendered,
    /// The source was missing; the profile's fallback image was used.
    Substituted {
        /// The image rasterized in place of the missing source.
        fallback: PathBuf,
    },
    /// Nothing could be rasterized; the cell holds the blank word.
    Degraded {
        /// Why the asset could not be rendered.
        reason: String,
    },
}

impl CellStatus {
    /// Whether the entry holds a blank cell.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// One asset of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableEntry {
    /// Symbolic index, already prefixed (e.g. `APP_ICON_TERMINAL`).
    pub id: String,
    /// Annotation emitted next to the entry in the data artifact.
    pub label: String,
    /// The encoded pixels.
    pub cell: EncodedCell,
    /// Whether the cell was rendered, substituted or left blank.
    pub status: CellStatus,
}

/// The storage type and literal style of a table's words.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WordFormat {
    /// Small decimal integers stored as bytes (glyph tables).
    Byte,
    /// `0x`-prefixed 32-bit literals (icon tables).
    Hex32,
}

/// How the data array indexes the pixels of one entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayLayout {
    /// `name[COUNT][HEIGHT][WIDTH]`, one braced row per pixel row.
    #[default]
    Grid,
    /// `name[COUNT][SIZE * SIZE]` (or `[HEIGHT * WIDTH]` for non-square
    /// cells), addressed as `name[id][y * SIZE + x]`.
    Flat,
}

/// The names and array shape a table is declared with.
///
/// Consumers compile against these symbols, so they are part of a table's
/// configuration rather than derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayShape {
    /// Array layout.
    pub layout: ArrayLayout,
    /// Suffix of the entry count constant, e.g. `COUNT` or `NUMBER`.
    pub count_name: String,
    /// The count constant exceeds the number of entries by this much; the
    /// array's first dimension subtracts it again.
    pub count_offset: u32,
    /// Suffix of the side length constant of square flat tables.
    pub size_name: String,
}

impl Default for ArrayShape {
    fn default() -> Self {
        Self {
            layout: ArrayLayout::Grid,
            count_name: "COUNT".to_owned(),
            count_offset: 0,
            size_name: "SIZE".to_owned(),
        }
    }
}

impl ArrayShape {
    /// A flat layout whose count constant is named `count_name`.
    pub fn flat(count_name: &str) -> Self {
        Self {
            layout: ArrayLayout::Flat,
            count_name: count_name.to_owned(),
            ..Self::default()
        }
    }
}

/// Ordered collection of uniformly sized encoded cells.
///
/// Entries keep the order in which they were pushed; the position of an entry
/// is the value of its symbolic index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetTable {
    name: String,
    prefix: String,
    cell_width: u32,
    cell_height: u32,
    format: WordFormat,
    shape: ArrayShape,
    defines: Vec<(String, String)>,
    entries: Vec<TableEntry>,
}

impl AssetTable {
    /// Creates an empty table.
    ///
    /// `name` becomes the data array symbol and `prefix` the prefix of every
    /// emitted constant.
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        cell_width: u32,
        cell_height: u32,
        format: WordFormat,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            cell_width,
            cell_height,
            format,
            shape: ArrayShape::default(),
            defines: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Replaces the declared array shape.
    pub fn with_shape(mut self, shape: ArrayShape) -> Self {
        self.shape = shape;
        self
    }

    /// The declared array shape.
    pub fn shape(&self) -> &ArrayShape {
        &self.shape
    }

    /// Adds a `<prefix>_<suffix>` constant to the declarations artifact.
    pub fn define(&mut self, suffix: &str, value: impl Into<String>) {
        self.defines
            .push((format!("{}_{suffix}", self.prefix), value.into()));
    }

    /// Extra constants in the order they were added.
    pub fn defines(&self) -> &[(String, String)] {
        &self.defines
    }

    /// Appends an entry and returns its index.
    ///
    /// Fails if the cell has the wrong dimensions or the identifier is taken.
    pub fn push(&mut self, entry: TableEntry) -> Result<usize, Error> {
        let found = (entry.cell.width(), entry.cell.height());
        let expected = (self.cell_width, self.cell_height);
        if found != expected {
            return Err(Error::cell_size_mismatch(&entry.id, expected, found));
        }
        if self.index_of(&entry.id).is_some() {
            return Err(Error::duplicate_identifier(&self.name, &entry.id));
        }
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// The data array symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The constant prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Width of every cell.
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Height of every cell.
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// The word storage format.
    pub fn format(&self) -> WordFormat {
        self.format
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Position of the entry with the given symbolic index.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Entry with the given symbolic index.
    pub fn get(&self, id: &str) -> Option<&TableEntry> {
        self.index_of(id).map(|index| &self.entries[index])
    }

    /// Entries that hold a blank cell.
    pub fn degraded(&self) -> impl Iterator<Item = &TableEntry> + '_ {
        self.entries.iter().filter(|entry| entry.status.is_degraded())
    }
}
