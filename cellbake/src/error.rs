// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};

type BoxedSource = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Error that aborts a bake run.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the path involved, when there is
/// one, and the underlying cause. Per-asset problems that the pipeline can
/// recover from never surface as an `Error`; they are recorded on the table
/// entry instead (see [`CellStatus`](crate::CellStatus)).
#[derive(Debug)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The file or directory the failing operation touched.
    path: Option<PathBuf>,

    /// Human readable detail that is not captured by `source`.
    detail: Option<String>,

    /// The underlying cause, if any.
    source: Option<BoxedSource>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The path involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Attaches `path` unless the error already names one.
    pub(crate) fn with_path(mut self, path: &Path) -> Self {
        if self.path.is_none() {
            self.path = Some(path.to_owned());
        }
        self
    }

    pub(crate) fn config(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config,
            path: None,
            detail: Some(detail.into()),
            source: None,
        }
    }

    pub(crate) fn manifest(path: &Path, source: impl Into<BoxedSource>) -> Self {
        Self {
            kind: ErrorKind::Config,
            path: Some(path.to_owned()),
            detail: None,
            source: Some(source.into()),
        }
    }

    pub(crate) fn font_load(path: &Path, source: Option<std::io::Error>) -> Self {
        Self {
            kind: ErrorKind::FontLoad,
            path: Some(path.to_owned()),
            detail: source
                .is_none()
                .then(|| "not a readable font file".to_owned()),
            source: source.map(Into::into),
        }
    }

    pub(crate) fn image_decode(path: &Path, source: image::ImageError) -> Self {
        Self {
            kind: ErrorKind::ImageDecode,
            path: Some(path.to_owned()),
            detail: None,
            source: Some(source.into()),
        }
    }

    pub(crate) fn cell_size_mismatch(
        id: &str,
        expected: (u32, u32),
        found: (u32, u32),
    ) -> Self {
        Self {
            kind: ErrorKind::CellSizeMismatch,
            path: None,
            detail: Some(format!(
                "`{id}` is {}x{} but the table holds {}x{} cells",
                found.0, found.1, expected.0, expected.1
            )),
            source: None,
        }
    }

    pub(crate) fn duplicate_identifier(table: &str, id: &str) -> Self {
        Self {
            kind: ErrorKind::DuplicateIdentifier,
            path: None,
            detail: Some(format!("`{id}` appears twice in table `{table}`")),
            source: None,
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Write,
            path: Some(path.to_owned()),
            detail: None,
            source: Some(source.into()),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.kind {
            ErrorKind::Config => "invalid configuration",
            ErrorKind::FontLoad => "failed to load font",
            ErrorKind::ImageDecode => "failed to decode image",
            ErrorKind::CellSizeMismatch => "cell size mismatch",
            ErrorKind::DuplicateIdentifier => "duplicate asset identifier",
            ErrorKind::Write => "failed to write artifact",
        };
        f.write_str(what)?;
        if let Some(path) = &self.path {
            write!(f, " '{}'", path.display())?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        } else if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn core::error::Error + 'static))
    }
}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The manifest could not be read or a profile failed validation.
    Config,

    /// The font resource of a glyph profile is missing or unparseable.
    FontLoad,

    /// An icon source file exists but could not be decoded.
    ImageDecode,

    /// An encoded cell does not match the dimensions of its table.
    CellSizeMismatch,

    /// Two assets of one table share an identifier.
    DuplicateIdentifier,

    /// An output artifact could not be written or moved into place.
    Write,
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use std::path::Path;

    #[test]
    fn display_includes_path_and_cause() {
        let err = Error::write(
            Path::new("kernel/icons_data.c"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        );
        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(
            err.to_string(),
            "failed to write artifact 'kernel/icons_data.c': read-only"
        );
    }

    #[test]
    fn font_load_without_io_cause_explains_itself() {
        let err = Error::font_load(Path::new("fonts/font.ttf"), None);
        assert_eq!(
            err.to_string(),
            "failed to load font 'fonts/font.ttf': not a readable font file"
        );
        assert!(
            core::error::Error::source(&err).is_none(),
            "no io cause was attached"
        );
    }
}
