//! Normalization of glyph outline path data for tracing.
//!
//! Font outlines are drawn in a Y-up coordinate system measured in font
//! units. Tracing surfaces expect a Y-down canvas of fixed size with some
//! margin around the letter. This crate reads path data, flips it, fits it
//! into a padded square canvas and writes it back out, keeping the shape's
//! aspect ratio.
//!
//! ```
//! use trace_path::{Normalizer, Path};
//!
//! let glyph: Path = "M 0 800 L 1000 800 L 1000 0 L 0 0 Z".parse().unwrap();
//! let normalized = Normalizer::default().normalize(&glyph, 1000.0).unwrap();
//! assert_eq!(
//!     normalized.to_svg(),
//!     "M 100.00 100.00 L 900.00 100.00 L 900.00 740.00 L 100.00 740.00 Z"
//! );
//! ```
//!
//! Several glyphs can be combined into one outline with [`compose`] before
//! normalizing, and a normalized path can be thinned into trace points with
//! [`trace_points`].

#![forbid(unsafe_code)]

mod bounds;
mod command;
mod compose;
mod error;
mod parse;
mod path;
mod points;
mod transform;

pub use bounds::{bounding_box, BoundingBox, BoundsBuilder};
pub use command::{ArgRole, Axis, Cursor, Operand, PathCommand, Position, Verb};
pub use compose::{compose, translate, GlyphPlacement, GlyphPosition, PenPosition};
pub use error::{OptionsError, ParseError, PointsError, Warning};
pub use parse::parse;
pub use path::{format_number, Path, DEFAULT_PRECISION};
pub use points::{
    dotted_path, sample_indices, strokes, trace_points, Stroke, TracePoints, DEFAULT_SAMPLES,
};
pub use transform::{
    apply_params, flip_y, transform, NormalizeOptions, Normalized, Normalizer, TransformParams,
    DEFAULT_EM, DEFAULT_PADDING,
};
