// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The batch run: descriptors in, artifacts out.
//!
//! A run goes through four phases and only the last one touches the outputs:
//!
//! 1. Every icon source directory must exist. Missing ones are created and the
//!    run stops with [`RunOutcome::NotReady`].
//! 2. Every glyph profile's font is loaded; a failure aborts the run.
//! 3. Each table is baked in declaration order and rendered to text. Per-asset
//!    problems are recorded on the entry and never abort.
//! 4. All artifacts are written together (see [`write_artifacts`]).

use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::transparent_canvas;
use crate::config::{BakeConfig, GlyphProfile, IconProfile};
use crate::descriptor::{AssetDescriptor, AssetKind};
use crate::emit::{render_table, write_artifacts, Artifact};
use crate::encode::{GlyphEncoding, IconEncoding, TRANSPARENT_SENTINEL};
use crate::glyph::{blank_glyph, rasterize_glyph, GlyphGeometry, GlyphSource, SwashFont};
use crate::icon::{load_icon, rasterize_icon, resolve_icon_source, IconSource};
use crate::table::{AssetTable, CellStatus, TableEntry, WordFormat};
use crate::Error;

/// How a run ended when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// All tables were baked and written.
    Completed(Vec<TableSummary>),
    /// Icon source directories were missing and have been created. Nothing
    /// was written; run again once the images are in place.
    NotReady {
        /// The directories that were created.
        created: Vec<PathBuf>,
    },
}

/// What was produced for one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    /// Data array symbol of the table.
    pub name: String,
    /// Number of entries.
    pub entries: usize,
    /// Entries rasterized from the fallback image.
    pub substituted: usize,
    /// Entries left blank.
    pub degraded: usize,
    /// Declarations and data artifact paths.
    pub written: Vec<PathBuf>,
}

impl TableSummary {
    fn new(table: &AssetTable, artifacts: &[Artifact]) -> Self {
        Self {
            name: table.name().to_owned(),
            entries: table.len(),
            substituted: table
                .entries()
                .iter()
                .filter(|entry| matches!(entry.status, CellStatus::Substituted { .. }))
                .count(),
            degraded: table.degraded().count(),
            written: artifacts.iter().map(|a| a.path.clone()).collect(),
        }
    }
}

/// Runs every profile of `config`, rendering glyphs with swash.
pub fn run(config: &BakeConfig) -> Result<RunOutcome, Error> {
    run_with(config, SwashFont::load)
}

/// Runs every profile of `config`, loading fonts through `load_font`.
pub fn run_with<S, F>(config: &BakeConfig, mut load_font: F) -> Result<RunOutcome, Error>
where
    S: GlyphSource,
    F: FnMut(&Path) -> Result<S, Error>,
{
    config.validate()?;

    let mut created = Vec::new();
    for profile in &config.icons {
        let dir = config.resolve(&profile.source_dir);
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|err| Error::write(&dir, err))?;
            log::info!(
                "Created '{}'; add the icon images and run again",
                dir.display()
            );
            created.push(dir);
        }
    }
    if !created.is_empty() {
        return Ok(RunOutcome::NotReady { created });
    }

    let mut fonts = config
        .glyphs
        .iter()
        .map(|profile| load_font(&config.resolve(&profile.font)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut artifacts = Vec::new();
    let mut summaries = Vec::new();
    for (profile, font) in config.glyphs.iter().zip(&mut fonts) {
        let table = bake_glyph_table(profile, font)?;
        let rendered = render_table(
            &table,
            &config.resolve(&profile.declarations),
            &config.resolve(&profile.data),
        );
        summaries.push(TableSummary::new(&table, &rendered));
        artifacts.extend(rendered);
    }
    for profile in &config.icons {
        let table = bake_icon_table(profile, &config.resolve(&profile.source_dir))?;
        let rendered = render_table(
            &table,
            &config.resolve(&profile.declarations),
            &config.resolve(&profile.data),
        );
        summaries.push(TableSummary::new(&table, &rendered));
        artifacts.extend(rendered);
    }

    write_artifacts(&artifacts)?;
    for summary in &summaries {
        log::info!(
            "Baked `{}`: {} entries, {} substituted, {} blank",
            summary.name,
            summary.entries,
            summary.substituted,
            summary.degraded
        );
    }
    Ok(RunOutcome::Completed(summaries))
}

/// Bakes every character of `profile` with glyphs from `source`.
///
/// A character that fails to render becomes a blank cell with
/// [`CellStatus::Degraded`]; the table always has one entry per character.
pub fn bake_glyph_table<S: GlyphSource + ?Sized>(
    profile: &GlyphProfile,
    source: &mut S,
) -> Result<AssetTable, Error> {
    let mut table = AssetTable::new(
        &profile.name,
        &profile.prefix,
        profile.cell_width,
        profile.cell_height,
        WordFormat::Byte,
    )
    .with_shape(profile.shape.clone());
    table.define("FIRST", format!("0x{:02X}", u32::from(profile.first_char)));

    let geometry = profile.geometry();
    for descriptor in profile.descriptors() {
        let AssetKind::Glyph { ch, encoding } = &descriptor.kind else {
            return Err(not_a(&descriptor, "glyph"));
        };
        let entry = glyph_entry(
            source,
            descriptor.id.clone(),
            descriptor.label.clone(),
            *ch,
            *encoding,
            &geometry,
        );
        table.push(entry)?;
    }
    Ok(table)
}

fn glyph_entry<S: GlyphSource + ?Sized>(
    source: &mut S,
    id: String,
    label: String,
    ch: char,
    encoding: GlyphEncoding,
    geometry: &GlyphGeometry,
) -> TableEntry {
    let (coverage, status) = match rasterize_glyph(source, ch, geometry) {
        Ok(coverage) => (coverage, CellStatus::Rendered),
        Err(err) => {
            log::warn!("{id}: {err}; emitting a blank cell");
            let reason = err.to_string();
            (blank_glyph(geometry), CellStatus::Degraded { reason })
        }
    };
    log::debug!("{id}: baked {ch:?}");
    TableEntry {
        id,
        label,
        cell: encoding.encode(&coverage),
        status,
    }
}

/// Bakes every icon of `profile`, reading sources from `source_dir`.
///
/// An icon whose file is missing is rasterized from the profile's fallback
/// image, or left fully transparent when there is none; the slot is kept
/// either way. An existing file that cannot be decoded aborts.
pub fn bake_icon_table(profile: &IconProfile, source_dir: &Path) -> Result<AssetTable, Error> {
    let mut table = AssetTable::new(
        &profile.name,
        &profile.prefix,
        profile.cell_size,
        profile.cell_size,
        WordFormat::Hex32,
    )
    .with_shape(profile.shape.clone());
    table.define("TRANSPARENT", format!("0x{TRANSPARENT_SENTINEL:08X}u"));

    let fallback = profile.fallback.as_ref().map(|file| source_dir.join(file));
    for descriptor in profile.descriptors(source_dir) {
        let AssetKind::Icon {
            path,
            content_size,
            encoding,
        } = &descriptor.kind
        else {
            return Err(not_a(&descriptor, "icon"));
        };
        let entry = icon_entry(
            &descriptor,
            path,
            *content_size,
            *encoding,
            fallback.as_deref(),
        )?;
        table.push(entry)?;
    }
    Ok(table)
}

fn icon_entry(
    descriptor: &AssetDescriptor,
    path: &Path,
    content_size: u32,
    encoding: IconEncoding,
    fallback: Option<&Path>,
) -> Result<TableEntry, Error> {
    let id = &descriptor.id;
    let cell_size = descriptor.cell_width;
    let (image, status) = match resolve_icon_source(path, fallback) {
        IconSource::Own(path) => {
            let source = load_icon(&path)?;
            (rasterize_icon(&source, cell_size, content_size), CellStatus::Rendered)
        }
        IconSource::Fallback(fallback) => {
            log::warn!(
                "{id}: '{}' not found, using '{}'",
                path.display(),
                fallback.display()
            );
            let source = load_icon(&fallback)?;
            let image = rasterize_icon(&source, cell_size, content_size);
            (image, CellStatus::Substituted { fallback })
        }
        IconSource::Missing => {
            log::warn!(
                "{id}: '{}' not found and no fallback available; emitting a transparent cell",
                path.display()
            );
            let reason = format!("missing {}", path.display());
            (
                transparent_canvas(cell_size, cell_size),
                CellStatus::Degraded { reason },
            )
        }
    };
    log::debug!("{id}: baked from {:?}", status);
    Ok(TableEntry {
        id: id.clone(),
        label: descriptor.label.clone(),
        cell: encoding.encode(&image),
        status,
    })
}

fn not_a(descriptor: &AssetDescriptor, kind: &str) -> Error {
    Error::config(format!("`{}` is not a {kind} asset", descriptor.id))
}

#[cfg(test)]
mod tests {
    use super::bake_glyph_table;
    use crate::config::GlyphProfile;
    use crate::encode::GlyphEncoding;
    use crate::glyph::{GlyphError, GlyphMask, GlyphSource};
    use crate::table::CellStatus;

    /// Has ink only for ASCII digits.
    struct Digits;

    impl GlyphSource for Digits {
        fn render(&mut self, ch: char, _font_size: f32) -> Result<GlyphMask, GlyphError> {
            if !ch.is_ascii_digit() {
                return Err(GlyphError::Unsupported(ch));
            }
            Ok(GlyphMask {
                left: 0,
                top: 2,
                width: 2,
                height: 2,
                data: vec![200; 4],
            })
        }
    }

    #[test]
    fn failed_glyphs_keep_their_slot_as_blank_cells() {
        let profile = GlyphProfile {
            first_char: '/',
            count: 3,
            cell_width: 4,
            cell_height: 4,
            encoding: GlyphEncoding::Binary { threshold: 128 },
            ..GlyphProfile::default()
        };
        let table = bake_glyph_table(&profile, &mut Digits).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.index_of("CHARACTER_U002F"), Some(0));
        assert_eq!(table.index_of("CHARACTER_U0030"), Some(1));

        let slash = &table.entries()[0];
        assert!(slash.status.is_degraded(), "'/' has no glyph");
        assert!(slash.cell.words().iter().all(|&w| w == 0), "blank cell");

        let zero = &table.entries()[1];
        assert_eq!(zero.status, CellStatus::Rendered);
        assert_eq!(zero.cell.row(1), &[0, 1, 1, 0]);
        assert_eq!(zero.cell.row(2), &[0, 1, 1, 0]);
        assert_eq!(
            table.defines()[0],
            ("CHARACTER_FIRST".to_owned(), "0x2F".to_owned())
        );
    }
}
