//! Errors and diagnostics.

use core::fmt;

use thiserror::Error;

/// Path data that cannot be read as a command sequence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command letter '{letter}' at offset {offset}")]
    UnknownCommand { letter: char, offset: usize },

    #[error("command '{letter}' at offset {offset} requires arguments")]
    MissingArguments { letter: char, offset: usize },

    #[error("command '{letter}' takes {expected} arguments per group, found {found}")]
    ArgumentCount {
        letter: char,
        expected: usize,
        found: usize,
    },

    #[error("path data must begin with a command letter, found '{0}'")]
    MissingCommand(String),
}

/// Rejected normalization settings.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OptionsError {
    #[error("canvas size must be a positive number, got {0}")]
    InvalidEm(f64),

    #[error("padding must be in [0, 0.5), got {0}")]
    InvalidPadding(f64),

    #[error("units per em must be a positive number, got {0}")]
    InvalidUnitsPerEm(f64),
}

/// Trace points that cannot be read back or edited.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PointsError {
    #[error("point '{0}' is not an \"x,y\" pair of numbers")]
    MalformedPoint(String),

    #[error("stroke {index} does not exist, there are {count}")]
    NoSuchStroke { index: usize, count: usize },

    #[error("no split index falls strictly inside a stroke of {len} points")]
    NoSplitIndices { len: usize },
}

/// A problem that was worked around while transforming a path.
///
/// Warnings never stop a transform; the output is still produced on a
/// best-effort basis.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// The path has no coordinates on at least one axis, so it was
    /// flipped but not scaled.
    DegeneratePath,
    /// A token that is not a number was passed through unchanged.
    MalformedCoordinate {
        /// Index of the command holding the token.
        command: usize,
        /// The original token text.
        token: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegeneratePath => write!(f, "path has no extent; left unscaled"),
            Self::MalformedCoordinate { command, token } => {
                write!(f, "malformed coordinate '{token}' in command {command}")
            }
        }
    }
}
