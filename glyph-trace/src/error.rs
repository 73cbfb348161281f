use std::path::PathBuf;

use skrifa::{outline::DrawError, raw::ReadError};
use thiserror::Error;
use trace_path::{OptionsError, PointsError};

#[derive(Debug, Error)]
pub enum FontError {
    #[error("Unable to open font file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading font data: {0}")]
    ReadError(ReadError),

    #[error("Font index {index} is out of range, the file has {count} fonts")]
    InvalidIndex { index: u32, count: u32 },

    #[error("No glyph for {0:?} in the character map")]
    MissingGlyph(char),

    #[error("Failed to draw glyph for {ch:?}: {error}")]
    Draw { ch: char, error: DrawError },

    #[error("Outline of {0:?} is empty")]
    EmptyOutline(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("Letter name '{0}' cannot be used as a file name")]
    InvalidLetterName(String),

    #[error("Unknown letter '{0}'")]
    UnknownLetter(String),

    #[error("No letters selected")]
    NoLetters,
}

/// Failure to produce the outputs for one letter.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("Unable to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to encode or decode points: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Points(#[from] PointsError),
}
