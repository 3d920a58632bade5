//! Error type shared by every pipeline stage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, gridding, separating, rendering or exporting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Input file '{path}' not found")]
    MissingInput { path: PathBuf },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Input has no header row")]
    EmptyInput,

    #[error("Missing column '{column}' (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}, column '{column}': cannot parse '{text}' as a number")]
    ParseNumber {
        line: usize,
        column: String,
        text: String,
    },

    #[error("{location}: non-finite value {value}")]
    NonFinite { location: String, value: f64 },

    #[error(
        "Insufficient data for interpolation: {count} distinct point(s), at least 3 required"
    )]
    InsufficientData { count: usize },

    #[error("Insufficient data for interpolation: all {count} points are collinear")]
    CollinearData { count: usize },

    #[error("Degenerate {axis} extent: every observation has {axis} = {value}")]
    DegenerateExtent { axis: &'static str, value: f64 },

    #[error("Interpolation produced no defined cells; widen the range filter or raise the resolution")]
    NoDefinedCells,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: common::SerdeFormatError,
    },

    #[error(transparent)]
    ConfigFormat(#[from] common::FileExtensionError),

    #[error("Failed to export image to '{path}': {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps a read failure, keeping "file not found" distinguishable.
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::MissingInput { path }
        } else {
            Error::Io { path, source }
        }
    }

    /// True for failures caused by the observation data rather than by I/O or settings.
    pub fn is_data_validation(&self) -> bool {
        matches!(
            self,
            Error::FieldCount { .. }
                | Error::ParseNumber { .. }
                | Error::NonFinite { .. }
                | Error::InsufficientData { .. }
                | Error::CollinearData { .. }
                | Error::DegenerateExtent { .. }
                | Error::NoDefinedCells
        )
    }
}
