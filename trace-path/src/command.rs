//! The path command model.
//!
//! A path is a sequence of [`PathCommand`]s. Each command has a [`Verb`]
//! (what it draws), a [`Position`] (whether its coordinates are absolute or
//! relative to the current point) and a list of [`Operand`]s whose length
//! is fixed by the verb.

use core::fmt;

use crate::error::ParseError;

/// The ten drawing verbs of the path mini-language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `M`: begin a new subpath.
    Move,
    /// `L`: straight line.
    Line,
    /// `H`: horizontal line, x only.
    Horizontal,
    /// `V`: vertical line, y only.
    Vertical,
    /// `C`: cubic bezier with two control points.
    CubicCurve,
    /// `S`: cubic bezier whose first control point is reflected.
    SmoothCubic,
    /// `Q`: quadratic bezier.
    QuadraticCurve,
    /// `T`: quadratic bezier whose control point is reflected.
    SmoothQuadratic,
    /// `A`: elliptical arc.
    Arc,
    /// `Z`: close the current subpath.
    Close,
}

/// How a command's coordinates relate to the current point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// Uppercase letter: coordinates are absolute.
    #[default]
    Absolute,
    /// Lowercase letter: coordinates are offsets from the current point.
    Relative,
}

/// The meaning of a single argument slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgRole {
    /// A horizontal position (or offset, in a relative command).
    X,
    /// A vertical position (or offset, in a relative command).
    Y,
    /// Horizontal arc radius.
    RadiusX,
    /// Vertical arc radius.
    RadiusY,
    /// Arc x-axis rotation in degrees.
    Angle,
    /// Arc large-arc or sweep flag.
    Flag,
}

/// The axis an argument lives on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

const POINT: &[ArgRole] = &[ArgRole::X, ArgRole::Y];
const TWO_POINTS: &[ArgRole] = &[ArgRole::X, ArgRole::Y, ArgRole::X, ArgRole::Y];
const THREE_POINTS: &[ArgRole] = &[
    ArgRole::X,
    ArgRole::Y,
    ArgRole::X,
    ArgRole::Y,
    ArgRole::X,
    ArgRole::Y,
];
const ARC: &[ArgRole] = &[
    ArgRole::RadiusX,
    ArgRole::RadiusY,
    ArgRole::Angle,
    ArgRole::Flag,
    ArgRole::Flag,
    ArgRole::X,
    ArgRole::Y,
];

impl Verb {
    /// Returns the verb and position for a command letter.
    pub fn from_letter(letter: char) -> Option<(Verb, Position)> {
        let verb = match letter.to_ascii_uppercase() {
            'M' => Verb::Move,
            'L' => Verb::Line,
            'H' => Verb::Horizontal,
            'V' => Verb::Vertical,
            'C' => Verb::CubicCurve,
            'S' => Verb::SmoothCubic,
            'Q' => Verb::QuadraticCurve,
            'T' => Verb::SmoothQuadratic,
            'A' => Verb::Arc,
            'Z' => Verb::Close,
            _ => return None,
        };
        let position = if letter.is_ascii_lowercase() {
            Position::Relative
        } else {
            Position::Absolute
        };
        Some((verb, position))
    }

    /// Returns the letter used to write this verb.
    pub const fn letter(self, position: Position) -> char {
        let upper = match self {
            Verb::Move => 'M',
            Verb::Line => 'L',
            Verb::Horizontal => 'H',
            Verb::Vertical => 'V',
            Verb::CubicCurve => 'C',
            Verb::SmoothCubic => 'S',
            Verb::QuadraticCurve => 'Q',
            Verb::SmoothQuadratic => 'T',
            Verb::Arc => 'A',
            Verb::Close => 'Z',
        };
        match position {
            Position::Absolute => upper,
            Position::Relative => upper.to_ascii_lowercase(),
        }
    }

    /// Returns the role of each argument, in order.
    ///
    /// The length of the slice is the arity of the verb.
    pub const fn roles(self) -> &'static [ArgRole] {
        match self {
            Verb::Move | Verb::Line | Verb::SmoothQuadratic => POINT,
            Verb::Horizontal => &[ArgRole::X],
            Verb::Vertical => &[ArgRole::Y],
            Verb::QuadraticCurve | Verb::SmoothCubic => TWO_POINTS,
            Verb::CubicCurve => THREE_POINTS,
            Verb::Arc => ARC,
            Verb::Close => &[],
        }
    }

    /// Number of arguments a single command of this verb takes.
    pub const fn arity(self) -> usize {
        self.roles().len()
    }
}

impl ArgRole {
    /// The axis this argument is measured on, or `None` for arguments
    /// that are never transformed.
    pub const fn axis(self) -> Option<Axis> {
        match self {
            ArgRole::X | ArgRole::RadiusX => Some(Axis::X),
            ArgRole::Y | ArgRole::RadiusY => Some(Axis::Y),
            ArgRole::Angle | ArgRole::Flag => None,
        }
    }

    /// True for arguments that name a location (an end or control point),
    /// as opposed to a length.
    pub const fn is_point(self) -> bool {
        matches!(self, ArgRole::X | ArgRole::Y)
    }

    /// True for arguments that are copied to the output untouched.
    pub const fn is_pass_through(self) -> bool {
        self.axis().is_none()
    }
}

/// A single argument as read from the source text.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A numeric value that takes part in the transform.
    Number(f64),
    /// Source text of an argument that is never transformed (arc rotation
    /// and flags), kept byte-for-byte.
    Literal(String),
    /// A token that could not be read as a number, kept byte-for-byte.
    Malformed(String),
}

impl Operand {
    /// Returns the numeric value, if this operand has one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Operand::Number(value) => Some(*value),
            Operand::Literal(text) => text.parse().ok(),
            Operand::Malformed(_) => None,
        }
    }

    pub(crate) fn map_number(&mut self, f: impl FnOnce(f64) -> f64) {
        if let Operand::Number(value) = self {
            *value = f(*value);
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

/// One drawing command with its arguments.
///
/// The number of arguments always matches [`Verb::arity`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    verb: Verb,
    position: Position,
    args: Vec<Operand>,
}

impl PathCommand {
    /// Creates a command, checking the argument count against the verb.
    pub fn new(
        verb: Verb,
        position: Position,
        args: impl IntoIterator<Item = impl Into<Operand>>,
    ) -> Result<Self, ParseError> {
        let args: Vec<Operand> = args.into_iter().map(Into::into).collect();
        if args.len() != verb.arity() {
            return Err(ParseError::ArgumentCount {
                letter: verb.letter(position),
                expected: verb.arity(),
                found: args.len(),
            });
        }
        Ok(Self {
            verb,
            position,
            args,
        })
    }

    /// Creates an absolute `Z` command.
    pub fn close() -> Self {
        Self {
            verb: Verb::Close,
            position: Position::Absolute,
            args: Vec::new(),
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::absolute(Verb::Move, &[x, y])
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Self::absolute(Verb::Line, &[x, y])
    }

    pub fn quad_to(cx0: f64, cy0: f64, x: f64, y: f64) -> Self {
        Self::absolute(Verb::QuadraticCurve, &[cx0, cy0, x, y])
    }

    pub fn curve_to(cx0: f64, cy0: f64, cx1: f64, cy1: f64, x: f64, y: f64) -> Self {
        Self::absolute(Verb::CubicCurve, &[cx0, cy0, cx1, cy1, x, y])
    }

    fn absolute(verb: Verb, values: &[f64]) -> Self {
        Self::from_parts(
            verb,
            Position::Absolute,
            values.iter().copied().map(Operand::Number).collect(),
        )
    }

    pub(crate) fn from_parts(verb: Verb, position: Position, args: Vec<Operand>) -> Self {
        debug_assert_eq!(args.len(), verb.arity());
        Self {
            verb,
            position,
            args,
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn letter(&self) -> char {
        self.verb.letter(self.position)
    }

    pub fn args(&self) -> &[Operand] {
        &self.args
    }

    pub(crate) fn args_mut(&mut self) -> &mut [Operand] {
        &mut self.args
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Iterates over `(role, operand)` pairs.
    pub fn roles(&self) -> impl Iterator<Item = (ArgRole, &Operand)> + '_ {
        self.verb.roles().iter().copied().zip(&self.args)
    }

    /// Returns the numeric value of the argument at `index`.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.args.get(index).and_then(Operand::value)
    }
}

/// The implicit pen state of a path.
///
/// The cursor is a plain value that is advanced command by command; it is
/// not tied to any coordinate convention and follows whatever space the
/// commands it is fed are expressed in.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    /// Start of the current subpath, restored by `Z`.
    pub start_x: f64,
    pub start_y: f64,
}

impl Cursor {
    /// Resolves a point argument of `command` (issued at this cursor) to
    /// an absolute value on the given axis.
    pub fn resolve(&self, command: &PathCommand, axis: Axis, value: f64) -> f64 {
        match command.position() {
            Position::Absolute => value,
            Position::Relative => match axis {
                Axis::X => self.x + value,
                Axis::Y => self.y + value,
            },
        }
    }

    /// Moves the cursor to the end point of `command`.
    ///
    /// Arguments that are not numbers leave the corresponding axis where
    /// it was.
    pub fn advance(&mut self, command: &PathCommand) {
        let arity = command.verb().arity();
        match command.verb() {
            Verb::Close => {
                self.x = self.start_x;
                self.y = self.start_y;
            }
            Verb::Horizontal => {
                if let Some(x) = command.value(0) {
                    self.x = self.resolve(command, Axis::X, x);
                }
            }
            Verb::Vertical => {
                if let Some(y) = command.value(0) {
                    self.y = self.resolve(command, Axis::Y, y);
                }
            }
            _ => {
                if let Some(x) = command.value(arity - 2) {
                    self.x = self.resolve(command, Axis::X, x);
                }
                if let Some(y) = command.value(arity - 1) {
                    self.y = self.resolve(command, Axis::Y, y);
                }
                if command.verb() == Verb::Move {
                    self.start_x = self.x;
                    self.start_y = self.y;
                }
            }
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter(Position::Absolute))
    }
}
