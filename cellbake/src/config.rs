// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bake profiles and the optional `cellbake.toml` manifest.
//!
//! A [`BakeConfig`] is an immutable record of every table a run produces. It
//! comes either from the manifest in the working directory or, when there is
//! none, from [`BakeConfig::default`]. Several profiles of the same kind can
//! coexist, each with its own cell size, thresholds and output paths.
//!
//! ```toml
//! [[glyphs]]
//! name = "character"
//! prefix = "CHARACTER"
//! font = "fonts/font.ttf"
//! font_size = 12.0
//! cell_width = 10
//! cell_height = 18
//! first_char = " "
//! count = 95
//! encoding = { mode = "binary", threshold = 128 }
//! declarations = "include/character.h"
//! data = "kernel/character.c"
//!
//! [[icons]]
//! name = "app_icons_data"
//! prefix = "APP_ICON"
//! source_dir = "app_icons"
//! fallback = "logo.png"
//! cell_size = 48
//! content_size = 32
//! alpha_cutoff = 128
//! declarations = "include/app_icons.h"
//! data = "kernel/app_icons_data.c"
//! shape = { layout = "flat", count_name = "COUNT", size_name = "SIZE" }
//! entries = [
//!     { id = "TERMINAL", file = "terminal.png" },
//!     { id = "CLOSE", file = "close.png", content_size = 20 },
//! ]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::descriptor::{char_label, AssetDescriptor, AssetKind};
use crate::encode::{GlyphEncoding, IconEncoding};
use crate::glyph::GlyphGeometry;
use crate::table::ArrayShape;
use crate::Error;

/// File name of the manifest looked up by [`BakeConfig::discover`].
pub const MANIFEST_NAME: &str = "cellbake.toml";

/// Default margin around the glyph working canvas.
pub const DEFAULT_GLYPH_PADDING: u32 = 4;

/// Largest accepted cell side, for glyphs and icons alike.
pub const MAX_CELL_SIDE: u32 = 4096;

/// Largest accepted glyph canvas margin.
pub const MAX_GLYPH_PADDING: u32 = 1024;

/// Constant suffixes the pipeline emits besides the shape's own names.
const RESERVED_SUFFIXES: [&str; 4] = ["WIDTH", "HEIGHT", "FIRST", "TRANSPARENT"];

/// Every table one run produces.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BakeConfig {
    /// Directory that relative paths are resolved against.
    #[serde(skip)]
    pub root: PathBuf,
    /// Font glyph tables.
    #[serde(default)]
    pub glyphs: Vec<GlyphProfile>,
    /// Icon tables.
    #[serde(default)]
    pub icons: Vec<IconProfile>,
}

impl BakeConfig {
    /// Parses and validates a manifest. Relative paths resolve against `root`.
    pub fn from_toml(text: &str, root: &Path) -> Result<Self, Error> {
        let mut config: Self = toml::from_str(text).map_err(|err| Error::config(err.to_string()))?;
        config.root = root.to_owned();
        config.validate()?;
        Ok(config)
    }

    /// Reads the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::manifest(path, err))?;
        let root = path.parent().unwrap_or(Path::new("."));
        Self::from_toml(&text, root).map_err(|err| err.with_path(path))
    }

    /// Loads `dir/cellbake.toml` when it exists, the built-in profiles otherwise.
    pub fn discover(dir: &Path) -> Result<Self, Error> {
        let manifest = dir.join(MANIFEST_NAME);
        if manifest.is_file() {
            log::info!("Using manifest '{}'", manifest.display());
            Self::load(&manifest)
        } else {
            log::info!("No {MANIFEST_NAME} in '{}', using built-in profiles", dir.display());
            Ok(Self {
                root: dir.to_owned(),
                ..Self::default()
            })
        }
    }

    /// Resolves a configured path against [`root`](Self::root).
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Checks every profile; see [`GlyphProfile::validate`] and
    /// [`IconProfile::validate`].
    pub fn validate(&self) -> Result<(), Error> {
        let mut names = Vec::new();
        for (name, prefix) in self
            .glyphs
            .iter()
            .map(|p| (&p.name, &p.prefix))
            .chain(self.icons.iter().map(|p| (&p.name, &p.prefix)))
        {
            if names.contains(&name) {
                return Err(Error::config(format!("table `{name}` is declared twice")));
            }
            names.push(name);
            check_identifier("table name", name)?;
            check_identifier("prefix", prefix)?;
        }
        let mut outputs: Vec<&Path> = Vec::new();
        for path in self
            .glyphs
            .iter()
            .flat_map(|p| [&p.declarations, &p.data])
            .chain(self.icons.iter().flat_map(|p| [&p.declarations, &p.data]))
        {
            if outputs.contains(&path.as_path()) {
                return Err(Error::config(format!(
                    "'{}' is the output of two artifacts",
                    path.display()
                )));
            }
            outputs.push(path);
        }
        for profile in &self.glyphs {
            profile.validate()?;
        }
        for profile in &self.icons {
            profile.validate()?;
        }
        Ok(())
    }
}

impl Default for BakeConfig {
    /// The built-in profiles: one font table and two icon tables.
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            glyphs: vec![GlyphProfile::default()],
            icons: vec![IconProfile::app_icons(), IconProfile::window_icons()],
        }
    }
}

/// One font glyph table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlyphProfile {
    /// Data array symbol.
    pub name: String,
    /// Prefix of every emitted constant and symbolic index.
    pub prefix: String,
    /// Scalable font file.
    pub font: PathBuf,
    /// Pixels per em.
    pub font_size: f32,
    /// Cell width.
    pub cell_width: u32,
    /// Cell height.
    pub cell_height: u32,
    /// Working canvas margin on every side of the cell.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// First character of the table.
    pub first_char: char,
    /// Number of consecutive characters.
    pub count: u32,
    /// How coverage becomes storage words.
    #[serde(default)]
    pub encoding: GlyphEncoding,
    /// Constant names and layout of the emitted array.
    #[serde(default)]
    pub shape: ArrayShape,
    /// Declarations artifact path.
    pub declarations: PathBuf,
    /// Data artifact path.
    pub data: PathBuf,
}

fn default_padding() -> u32 {
    DEFAULT_GLYPH_PADDING
}

impl Default for GlyphProfile {
    /// Printable ASCII at 12 px in a 10×18 cell, stored as coverage.
    ///
    /// `CHARACTER_NUMBER` is one more than the number of glyphs and the array
    /// is declared `character[CHARACTER_NUMBER - 1][CHARACTER_HEIGHT][CHARACTER_WIDTH]`.
    fn default() -> Self {
        Self {
            name: "character".to_owned(),
            prefix: "CHARACTER".to_owned(),
            font: PathBuf::from("fonts/font.ttf"),
            font_size: 12.0,
            cell_width: 10,
            cell_height: 18,
            padding: DEFAULT_GLYPH_PADDING,
            first_char: ' ',
            count: 95,
            encoding: GlyphEncoding::Intensity,
            shape: ArrayShape {
                count_name: "NUMBER".to_owned(),
                count_offset: 1,
                ..ArrayShape::default()
            },
            declarations: PathBuf::from("include/character.h"),
            data: PathBuf::from("kernel/character.c"),
        }
    }
}

impl GlyphProfile {
    /// The characters of the table, in index order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        let first = u32::from(self.first_char);
        (first..first.saturating_add(self.count)).filter_map(char::from_u32)
    }

    /// Cell geometry handed to the rasterizer.
    pub fn geometry(&self) -> GlyphGeometry {
        GlyphGeometry {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            font_size: self.font_size,
            padding: self.padding,
        }
    }

    /// One descriptor per character, in index order.
    pub fn descriptors(&self) -> Vec<AssetDescriptor> {
        self.chars()
            .map(|ch| AssetDescriptor {
                id: format!("{}_U{:04X}", self.prefix, u32::from(ch)),
                label: char_label(ch),
                cell_width: self.cell_width,
                cell_height: self.cell_height,
                kind: AssetKind::Glyph {
                    ch,
                    encoding: self.encoding,
                },
            })
            .collect()
    }

    /// Rejects empty or oversized cells, empty or non-character ranges and
    /// unusable sizes.
    pub fn validate(&self) -> Result<(), Error> {
        let name = &self.name;
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(Error::config(format!("`{name}`: cell dimensions must be non-zero")));
        }
        if self.cell_width > MAX_CELL_SIDE || self.cell_height > MAX_CELL_SIDE {
            return Err(Error::config(format!(
                "`{name}`: cell dimensions must not exceed {MAX_CELL_SIDE}"
            )));
        }
        if self.padding > MAX_GLYPH_PADDING {
            return Err(Error::config(format!(
                "`{name}`: padding must not exceed {MAX_GLYPH_PADDING}"
            )));
        }
        if self.count == 0 {
            return Err(Error::config(format!("`{name}`: count must be non-zero")));
        }
        if self.chars().count() != self.count as usize {
            return Err(Error::config(format!(
                "`{name}`: U+{:04X} plus {} does not stay within valid characters",
                u32::from(self.first_char),
                self.count
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::config(format!("`{name}`: font size must be positive")));
        }
        let ids = self.descriptors().into_iter().map(|d| d.id);
        check_shape(name, &self.prefix, &self.shape, ids)
    }
}

/// One icon table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconProfile {
    /// Data array symbol.
    pub name: String,
    /// Prefix of every emitted constant and symbolic index.
    pub prefix: String,
    /// Directory holding the icon sources.
    pub source_dir: PathBuf,
    /// Image in `source_dir` used for entries whose file is missing.
    #[serde(default)]
    pub fallback: Option<PathBuf>,
    /// Side length of every cell.
    pub cell_size: u32,
    /// Side length icons are resized to unless an entry overrides it.
    pub content_size: u32,
    /// Alpha below this value becomes the transparency sentinel.
    pub alpha_cutoff: u8,
    /// Icons in index order.
    pub entries: Vec<IconEntry>,
    /// Constant names and layout of the emitted array.
    #[serde(default)]
    pub shape: ArrayShape,
    /// Declarations artifact path.
    pub declarations: PathBuf,
    /// Data artifact path.
    pub data: PathBuf,
}

/// One icon of an [`IconProfile`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconEntry {
    /// Identifier, emitted as `<prefix>_<id>`.
    pub id: String,
    /// Source file inside the profile's `source_dir`.
    pub file: PathBuf,
    /// Per-icon content size.
    #[serde(default)]
    pub content_size: Option<u32>,
}

impl IconEntry {
    fn new(id: &str, file: &str, content_size: Option<u32>) -> Self {
        Self {
            id: id.to_owned(),
            file: PathBuf::from(file),
            content_size,
        }
    }
}

impl IconProfile {
    /// Desktop application icons: 32 px content in a 48 px cell, declared
    /// `app_icons_data[APP_ICON_COUNT][APP_ICON_SIZE * APP_ICON_SIZE]`.
    pub fn app_icons() -> Self {
        Self {
            name: "app_icons_data".to_owned(),
            prefix: "APP_ICON".to_owned(),
            source_dir: PathBuf::from("app_icons"),
            fallback: Some(PathBuf::from("logo.png")),
            cell_size: 48,
            content_size: 32,
            alpha_cutoff: 128,
            entries: vec![
                IconEntry::new("TERMINAL", "terminal.png", None),
                IconEntry::new("EDITOR", "editor.png", None),
                IconEntry::new("EXPLORER", "explorer.png", None),
                IconEntry::new("FLOPPYBIRD", "floppybird.png", None),
            ],
            shape: ArrayShape::flat("COUNT"),
            declarations: PathBuf::from("include/app_icons.h"),
            data: PathBuf::from("kernel/app_icons_data.c"),
        }
    }

    /// Window decoration icons: 30 px cells, window controls shrunk to 20 px,
    /// declared `icons_data[ICON_NUMBER][ICON_SIZE * ICON_SIZE]`.
    pub fn window_icons() -> Self {
        Self {
            name: "icons_data".to_owned(),
            prefix: "ICON".to_owned(),
            source_dir: PathBuf::from("icon"),
            fallback: Some(PathBuf::from("logo.png")),
            cell_size: 30,
            content_size: 30,
            alpha_cutoff: 150,
            entries: vec![
                IconEntry::new("CLOSE", "close.png", Some(20)),
                IconEntry::new("MINIMIZE", "minus.png", Some(20)),
                IconEntry::new("WINDOWS", "logo.png", None),
                IconEntry::new("FOLDER", "logo.png", None),
                IconEntry::new("CHESS", "logo.png", None),
            ],
            shape: ArrayShape::flat("NUMBER"),
            declarations: PathBuf::from("include/icons.h"),
            data: PathBuf::from("kernel/icons_data.c"),
        }
    }

    /// Alpha classification of the table.
    pub fn encoding(&self) -> IconEncoding {
        IconEncoding::new(self.alpha_cutoff)
    }

    /// One descriptor per entry, in index order; sources live in `source_dir`.
    pub fn descriptors(&self, source_dir: &Path) -> Vec<AssetDescriptor> {
        self.entries
            .iter()
            .map(|entry| AssetDescriptor {
                id: format!("{}_{}", self.prefix, entry.id),
                label: entry.file.display().to_string(),
                cell_width: self.cell_size,
                cell_height: self.cell_size,
                kind: AssetKind::Icon {
                    path: source_dir.join(&entry.file),
                    content_size: entry.content_size.unwrap_or(self.content_size),
                    encoding: self.encoding(),
                },
            })
            .collect()
    }

    /// Rejects empty tables, bad identifiers and content larger than the cell.
    pub fn validate(&self) -> Result<(), Error> {
        let name = &self.name;
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIDE {
            return Err(Error::config(format!(
                "`{name}`: cell size must be within 1..={MAX_CELL_SIDE}"
            )));
        }
        if self.entries.is_empty() {
            return Err(Error::config(format!("`{name}`: no icon entries")));
        }
        for (index, entry) in self.entries.iter().enumerate() {
            check_identifier("icon id", &entry.id)?;
            if self.entries[..index].iter().any(|prev| prev.id == entry.id) {
                return Err(Error::config(format!(
                    "`{name}`: icon id `{}` is declared twice",
                    entry.id
                )));
            }
            let content_size = entry.content_size.unwrap_or(self.content_size);
            if content_size == 0 || content_size > self.cell_size {
                return Err(Error::config(format!(
                    "`{name}`: content size {content_size} of `{}` must be within 1..={}",
                    entry.id, self.cell_size
                )));
            }
        }
        let ids = self.entries.iter().map(|entry| format!("{}_{}", self.prefix, entry.id));
        check_shape(name, &self.prefix, &self.shape, ids)
    }
}

/// Rejects shape constants that are not identifiers or that clash with
/// another emitted constant or index.
fn check_shape(
    table: &str,
    prefix: &str,
    shape: &ArrayShape,
    ids: impl Iterator<Item = String>,
) -> Result<(), Error> {
    check_identifier("count constant", &shape.count_name)?;
    check_identifier("size constant", &shape.size_name)?;
    let clash = if shape.count_name == shape.size_name {
        Some(&shape.count_name)
    } else {
        [&shape.count_name, &shape.size_name]
            .into_iter()
            .find(|suffix| RESERVED_SUFFIXES.contains(&suffix.as_str()))
    };
    if let Some(suffix) = clash {
        return Err(Error::config(format!(
            "`{table}`: constant `{prefix}_{suffix}` is emitted twice"
        )));
    }
    let constants: Vec<String> = RESERVED_SUFFIXES
        .iter()
        .copied()
        .chain([shape.count_name.as_str(), shape.size_name.as_str()])
        .map(|suffix| format!("{prefix}_{suffix}"))
        .collect();
    for id in ids {
        if constants.contains(&id) {
            return Err(Error::config(format!(
                "`{table}`: index `{id}` clashes with a constant"
            )));
        }
    }
    Ok(())
}

fn check_identifier(what: &str, ident: &str) -> Result<(), Error> {
    let mut chars = ident.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::config(format!("{what} `{ident}` is not a C identifier")))
    }
}
