// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering of tables as C declarations/data artifacts and staged writing.
//!
//! Every table becomes two files: a declarations artifact (dimension and count
//! constants, the symbolic index enumeration, the `extern` array) and a data
//! artifact (the array itself, one designated initializer per asset, one line
//! per pixel row). Artifacts are written to sibling temporary files first and
//! only renamed into place once all of them were written, so an aborted run
//! never leaves a truncated array behind.

use core::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::table::{ArrayLayout, AssetTable, CellStatus, WordFormat};
use crate::Error;

const GENERATED_HEADER: &str = "// Generated by cellbake. Do not edit.\n";

/// A rendered output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Destination path.
    pub path: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// Renders both artifacts of `table`.
pub fn render_table(table: &AssetTable, declarations: &Path, data: &Path) -> [Artifact; 2] {
    let header_name = declarations
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{}.h", table.name()));
    [
        Artifact {
            path: declarations.to_owned(),
            contents: render_declarations(table, &header_name),
        },
        Artifact {
            path: data.to_owned(),
            contents: render_data(table, &header_name),
        },
    ]
}

/// Renders the declarations artifact. `header_name` determines the include guard.
pub fn render_declarations(table: &AssetTable, header_name: &str) -> String {
    let mut out = String::new();
    // Formatting into a `String` is infallible.
    let _ = write_declarations(&mut out, table, header_name);
    out
}

/// Renders the data artifact, including `header_name`.
pub fn render_data(table: &AssetTable, header_name: &str) -> String {
    let mut out = String::new();
    let _ = write_data(&mut out, table, header_name);
    out
}

/// Writes the declarations artifact of `table` to `out`.
pub fn write_declarations(
    out: &mut impl core::fmt::Write,
    table: &AssetTable,
    header_name: &str,
) -> core::fmt::Result {
    let guard = include_guard(header_name);
    let prefix = table.prefix();
    let shape = table.shape();
    writeln!(out, "{GENERATED_HEADER}")?;
    writeln!(out, "#ifndef {guard}")?;
    writeln!(out, "#define {guard}\n")?;
    if uses_size_constant(table) {
        writeln!(out, "#define {prefix}_{} {}", shape.size_name, table.cell_width())?;
    } else {
        writeln!(out, "#define {prefix}_WIDTH {}", table.cell_width())?;
        writeln!(out, "#define {prefix}_HEIGHT {}", table.cell_height())?;
    }
    let count = table.len() as u64 + u64::from(shape.count_offset);
    writeln!(out, "#define {prefix}_{} {count}", shape.count_name)?;
    for (name, value) in table.defines() {
        writeln!(out, "#define {name} {value}")?;
    }
    writeln!(out, "\nenum {{")?;
    for (index, entry) in table.entries().iter().enumerate() {
        writeln!(out, "    {} = {index},", entry.id)?;
    }
    writeln!(out, "}};\n")?;
    writeln!(out, "extern {};\n", array_declarator(table))?;
    writeln!(out, "#endif")
}

/// Writes the data artifact of `table` to `out`.
pub fn write_data(
    out: &mut impl core::fmt::Write,
    table: &AssetTable,
    header_name: &str,
) -> core::fmt::Result {
    let (row_open, row_close) = match table.shape().layout {
        ArrayLayout::Grid => ("        {", "},\n"),
        ArrayLayout::Flat => ("        ", ",\n"),
    };
    writeln!(out, "{GENERATED_HEADER}")?;
    writeln!(out, "#include \"{header_name}\"\n")?;
    writeln!(out, "{} = {{", array_declarator(table))?;
    for (index, entry) in table.entries().iter().enumerate() {
        write!(out, "    [{}] = {{ // {index}: {}", entry.id, entry.label)?;
        match &entry.status {
            CellStatus::Rendered => {}
            CellStatus::Substituted { fallback } => {
                write!(out, " (fallback: {})", file_label(fallback))?;
            }
            CellStatus::Degraded { reason } => write!(out, " (blank: {reason})")?,
        }
        out.write_char('\n')?;
        for row in entry.cell.rows() {
            out.write_str(row_open)?;
            for (x, word) in row.iter().enumerate() {
                if x > 0 {
                    out.write_str(", ")?;
                }
                match table.format() {
                    WordFormat::Byte => write!(out, "{word}")?,
                    WordFormat::Hex32 => write!(out, "0x{word:08X}")?,
                }
            }
            out.write_str(row_close)?;
        }
        out.write_str("    },\n")?;
    }
    writeln!(out, "}};")
}

/// Square flat tables declare one side length instead of width and height.
fn uses_size_constant(table: &AssetTable) -> bool {
    table.shape().layout == ArrayLayout::Flat && table.cell_width() == table.cell_height()
}

fn array_declarator(table: &AssetTable) -> String {
    let element = match table.format() {
        WordFormat::Byte => "unsigned char",
        WordFormat::Hex32 => "unsigned int",
    };
    let prefix = table.prefix();
    let shape = table.shape();
    let count = match shape.count_offset {
        0 => format!("{prefix}_{}", shape.count_name),
        offset => format!("{prefix}_{} - {offset}", shape.count_name),
    };
    let cell = match shape.layout {
        ArrayLayout::Grid => format!("[{prefix}_HEIGHT][{prefix}_WIDTH]"),
        ArrayLayout::Flat if uses_size_constant(table) => {
            format!("[{prefix}_{size} * {prefix}_{size}]", size = shape.size_name)
        }
        ArrayLayout::Flat => format!("[{prefix}_HEIGHT * {prefix}_WIDTH]"),
    };
    format!("{element} {}[{count}]{cell}", table.name())
}

fn include_guard(header_name: &str) -> String {
    header_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Temporary files that are removed unless they were moved into place.
#[derive(Default)]
struct Staging {
    pending: Vec<PathBuf>,
}

impl Drop for Staging {
    fn drop(&mut self) {
        for path in self.pending.drain(..) {
            match fs::remove_file(&path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
                    log::warn!("Could not remove '{}': {err}", path.display());
                }
                _ => {}
            }
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    let file = writer.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()
}

/// Writes every artifact, all or nothing as far as the file system allows.
///
/// Each artifact is written and synced to `<path>.tmp`; once all of them are
/// on disk they are renamed over their destinations in reverse order, so a
/// table's data artifact is in place before its declarations artifact.
/// Temporary files left by a failure are removed before returning.
pub fn write_artifacts(artifacts: &[Artifact]) -> Result<(), Error> {
    let mut staging = Staging::default();
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| Error::write(parent, err))?;
        }
        let temp = staging_path(&artifact.path);
        staging.pending.push(temp.clone());
        write_file(&temp, &artifact.contents).map_err(|err| Error::write(&temp, err))?;
    }

    let temps = core::mem::take(&mut staging.pending);
    for (index, (temp, artifact)) in temps.iter().zip(artifacts).enumerate().rev() {
        if let Err(err) = fs::rename(temp, &artifact.path) {
            staging.pending.extend_from_slice(&temps[..=index]);
            return Err(Error::write(&artifact.path, err));
        }
        log::debug!("Wrote '{}'", artifact.path.display());
    }
    Ok(())
}
