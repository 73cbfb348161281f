//! Extraction of letter outlines from fonts for tracing exercises.
//!
//! Letters are drawn from a font with [skrifa], normalized into a Y-down
//! canvas with [trace_path] and written out as SVG, path data and sampled
//! trace points.

pub mod config;
mod error;
pub mod extract;
mod font;
mod pen;

pub use config::{Config, Letter, Overrides, Script};
pub use error::{ConfigError, ExtractError, FontError};
pub use extract::{read_points, svg_document, write_points, Extracted, Extractor, Failure, Report};
pub use font::Font;
pub use pen::PathPen;
