//! A sequence of path commands and its text form.

use core::{fmt, str::FromStr};

use crate::{
    command::{Cursor, Operand, PathCommand},
    error::ParseError,
};

/// Number of digits after the decimal point used by [`Path`]'s `Display`.
pub const DEFAULT_PRECISION: usize = 2;

/// An ordered list of path commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replays every command from the origin and returns where the pen
    /// ends up.
    pub fn end_point(&self) -> Cursor {
        let mut cursor = Cursor::default();
        for command in &self.commands {
            cursor.advance(command);
        }
        cursor
    }

    /// Writes the path with numbers rounded to `precision` decimals.
    ///
    /// Arc rotation, arc flags and malformed tokens are written exactly as
    /// they were read.
    pub fn to_svg(&self, precision: usize) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push(command.letter());
            for arg in command.args() {
                out.push(' ');
                match arg {
                    Operand::Number(value) => out.push_str(&format_number(*value, precision)),
                    Operand::Literal(text) | Operand::Malformed(text) => out.push_str(text),
                }
            }
        }
        out
    }
}

/// Formats a number with a fixed number of decimals, never producing a
/// negative zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_owned(),
        _ => text,
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg(DEFAULT_PRECISION))
    }
}

impl FromIterator<PathCommand> for Path {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        Self::from_commands(iter.into_iter().collect())
    }
}

impl Extend<PathCommand> for Path {
    fn extend<T: IntoIterator<Item = PathCommand>>(&mut self, iter: T) {
        self.commands.extend(iter)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathCommand;
    type IntoIter = core::slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_with_precision() {
        let path: Path = "M1 2.45556 L1.2 4 Q2.0341 3.56789 -0.157 -425.07 Z"
            .parse()
            .unwrap();
        assert_eq!(
            path.to_svg(2),
            "M 1.00 2.46 L 1.20 4.00 Q 2.03 3.57 -0.16 -425.07 Z"
        );
        assert_eq!(path.to_svg(0), "M 1 2 L 1 4 Q 2 4 0 -425 Z");
    }

    #[test]
    fn no_negative_zero() {
        assert_eq!(format_number(-0.0, 2), "0.00");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(-0.006, 2), "-0.01");
        assert_eq!(format_number(12.345, 1), "12.3");
    }

    #[test]
    fn pass_through_text_is_verbatim() {
        let path: Path = "M0 0 A 5 5 30.50 1 0 10 10 L 3 $".parse().unwrap();
        assert_eq!(
            path.to_string(),
            "M 0.00 0.00 A 5.00 5.00 30.50 1 0 10.00 10.00 L 3.00 $"
        );
    }

    #[test]
    fn end_point_replays_relative_commands() {
        let path: Path = "m 10 20 l 5 5 h -3 v 7 c 1 1 2 2 3 3".parse().unwrap();
        let end = path.end_point();
        assert_eq!((end.x, end.y), (15.0, 35.0));
    }
}
