//! Moving a font outline into a Y-down, fixed size canvas.
//!
//! Normalization runs in three passes over the command list:
//!
//! 1. the Y axis is flipped (`y' = em - y` for absolute values, `dy' = -dy`
//!    for relative ones),
//! 2. the bounding box of the flipped coordinates is measured, and
//! 3. every X and Y argument is scaled uniformly and offset so that the
//!    box's top left corner sits at the padding and the longer side spans
//!    the padded canvas.
//!
//! Arc rotation and flags are never touched. Relative arguments are scaled
//! but not offset, since they are distances from the current point.

use crate::{
    bounds::{bounding_box, BoundingBox},
    command::{Axis, Operand, PathCommand, Position},
    error::{OptionsError, Warning},
    path::{Path, DEFAULT_PRECISION},
};

/// Default canvas size.
pub const DEFAULT_EM: f64 = 1000.0;

/// Default margin on each side, as a fraction of the canvas.
pub const DEFAULT_PADDING: f64 = 0.1;

/// Settings for [`Normalizer`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizeOptions {
    /// Side length of the square output canvas.
    pub em: f64,
    /// Fraction of the canvas left empty on each side.
    pub padding: f64,
    /// Digits after the decimal point in the written path.
    pub precision: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            em: DEFAULT_EM,
            padding: DEFAULT_PADDING,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl NormalizeOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.em.is_finite() && self.em > 0.0) {
            return Err(OptionsError::InvalidEm(self.em));
        }
        if !(0.0..0.5).contains(&self.padding) {
            return Err(OptionsError::InvalidPadding(self.padding));
        }
        Ok(())
    }
}

/// Uniform scale and per-axis offset mapping flipped coordinates into the
/// canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformParams {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl TransformParams {
    /// Fits `bounds` into an `em` sized square leaving `padding` on each
    /// side.
    ///
    /// The smaller of the two axis scales is used so the shape is never
    /// distorted. An axis with zero extent is treated as `em` wide.
    pub fn fit(bounds: &BoundingBox, em: f64, padding: f64) -> Self {
        let width = non_zero_or(bounds.width(), em);
        let height = non_zero_or(bounds.height(), em);
        let available = em * (1.0 - 2.0 * padding);
        let scale = if width > 0.0 && height > 0.0 {
            (available / width).min(available / height)
        } else {
            1.0
        };
        Self {
            scale,
            offset_x: em * padding - bounds.min_x * scale,
            offset_y: em * padding - bounds.min_y * scale,
        }
    }

    /// Maps an absolute coordinate.
    pub fn apply(&self, axis: Axis, value: f64) -> f64 {
        let offset = match axis {
            Axis::X => self.offset_x,
            Axis::Y => self.offset_y,
        };
        value * self.scale + offset
    }
}

fn non_zero_or(extent: f64, fallback: f64) -> f64 {
    if extent == 0.0 {
        fallback
    } else {
        extent
    }
}

/// Result of normalizing a single path.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    /// The transformed path.
    pub path: Path,
    /// Box of the flipped path before scaling; `None` for a degenerate
    /// path.
    pub bounds: Option<BoundingBox>,
    /// Scale and offsets that were applied; `None` for a degenerate path.
    pub params: Option<TransformParams>,
    /// Problems that were worked around.
    pub warnings: Vec<Warning>,
    precision: usize,
}

impl Normalized {
    pub fn is_degenerate(&self) -> bool {
        self.params.is_none()
    }

    /// Writes the path at the configured precision.
    pub fn to_svg(&self) -> String {
        self.path.to_svg(self.precision)
    }
}

/// Flips, measures and fits paths according to a set of options.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalizes a path drawn in a Y-up space of `units_per_em`.
    pub fn normalize(&self, path: &Path, units_per_em: f64) -> Result<Normalized, OptionsError> {
        if !(units_per_em.is_finite() && units_per_em > 0.0) {
            return Err(OptionsError::InvalidUnitsPerEm(units_per_em));
        }
        let mut warnings = malformed_coordinates(path);
        let flipped = flip_y(path, units_per_em);
        let Some(bounds) = bounding_box(&flipped) else {
            log::warn!("path has no coordinates, leaving it unscaled");
            warnings.push(Warning::DegeneratePath);
            return Ok(Normalized {
                path: flipped,
                bounds: None,
                params: None,
                warnings,
                precision: self.options.precision,
            });
        };
        let params = TransformParams::fit(&bounds, self.options.em, self.options.padding);
        log::debug!(
            "bounding box ({:.2}, {:.2}) to ({:.2}, {:.2}), scale {:.4}, offset ({:.2}, {:.2})",
            bounds.min_x,
            bounds.min_y,
            bounds.max_x,
            bounds.max_y,
            params.scale,
            params.offset_x,
            params.offset_y
        );
        Ok(Normalized {
            path: apply_params(&flipped, &params),
            bounds: Some(bounds),
            params: Some(params),
            warnings,
            precision: self.options.precision,
        })
    }
}

/// Flips and fits `commands` into an `em` sized canvas, where `em` is also
/// the size of the source space.
pub fn transform(
    commands: &[PathCommand],
    em: f64,
    padding: f64,
) -> Result<Vec<PathCommand>, OptionsError> {
    let normalizer = Normalizer::new(NormalizeOptions {
        em,
        padding,
        ..Default::default()
    })?;
    let path = Path::from_commands(commands.to_vec());
    Ok(normalizer.normalize(&path, em)?.path.into_commands())
}

/// Mirrors `path` vertically within a space of height `em`.
pub fn flip_y(path: &Path, em: f64) -> Path {
    map_args(path, |axis, relative, value| match (axis, relative) {
        (Axis::X, _) => value,
        (Axis::Y, false) => em - value,
        (Axis::Y, true) => -value,
    })
}

/// Applies scale and offsets to every X and Y argument of `path`.
pub fn apply_params(path: &Path, params: &TransformParams) -> Path {
    map_args(path, |axis, relative, value| {
        if relative {
            value * params.scale
        } else {
            params.apply(axis, value)
        }
    })
}

/// Rewrites each X- or Y-bearing numeric argument.
///
/// A relative command at the very start of a path is measured from the
/// origin, which is the same as being absolute, and is handed to `f` as
/// such.
fn map_args(path: &Path, mut f: impl FnMut(Axis, bool, f64) -> f64) -> Path {
    path.commands()
        .iter()
        .enumerate()
        .map(|(ix, command)| {
            let relative = ix > 0 && command.position() == Position::Relative;
            let mut command = command.clone();
            let roles = command.verb().roles();
            for (role, arg) in roles.iter().zip(command.args_mut()) {
                if let Some(axis) = role.axis() {
                    arg.map_number(|value| f(axis, relative, value));
                }
            }
            command
        })
        .collect()
}

fn malformed_coordinates(path: &Path) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (ix, command) in path.commands().iter().enumerate() {
        for arg in command.args() {
            if let Operand::Malformed(token) = arg {
                warnings.push(Warning::MalformedCoordinate {
                    command: ix,
                    token: token.clone(),
                });
            }
        }
    }
    warnings
}
