//! Path data tokenizer.
//!
//! Reads the path mini-language: a command letter followed by whitespace
//! or comma separated numbers, repeated. Numbers may be packed together
//! when the boundary is unambiguous (`10-20`, `1.5.5`), and arc flags may
//! be written without separators (`0110`).

use crate::{
    command::{ArgRole, Operand, PathCommand, Position, Verb},
    error::ParseError,
    path::Path,
};

/// Parses path data into a [`Path`].
///
/// Extra argument groups after a letter repeat the command; after a move
/// they are lines. Tokens that do not read as numbers are kept as
/// [`Operand::Malformed`] rather than failing the parse.
pub fn parse(data: &str) -> Result<Path, ParseError> {
    let mut scanner = Scanner::new(data);
    let mut commands = Vec::new();
    scanner.skip_separators();
    while let Some(byte) = scanner.peek() {
        let offset = scanner.pos;
        if !byte.is_ascii_alphabetic() {
            return Err(ParseError::MissingCommand(scanner.preview().to_owned()));
        }
        scanner.pos += 1;
        let letter = byte as char;
        let (verb, position) =
            Verb::from_letter(letter).ok_or(ParseError::UnknownCommand { letter, offset })?;
        scanner.skip_separators();
        if verb == Verb::Close {
            commands.push(PathCommand::from_parts(verb, position, Vec::new()));
            continue;
        }
        let mut groups = 0;
        while !scanner.at_letter_or_end() {
            let mut args = Vec::with_capacity(verb.arity());
            for role in verb.roles() {
                if scanner.at_letter_or_end() {
                    return Err(ParseError::ArgumentCount {
                        letter,
                        expected: verb.arity(),
                        found: args.len(),
                    });
                }
                args.push(scanner.read_operand(*role));
                scanner.skip_separators();
            }
            let verb = if groups > 0 && verb == Verb::Move {
                Verb::Line
            } else {
                verb
            };
            commands.push(PathCommand::from_parts(verb, position, args));
            groups += 1;
        }
        if groups == 0 {
            return Err(ParseError::MissingArguments { letter, offset });
        }
    }
    Ok(Path::from_commands(commands))
}

struct Scanner<'a> {
    data: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            data,
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() || byte == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn at_letter_or_end(&self) -> bool {
        self.peek().map_or(true, |byte| byte.is_ascii_alphabetic())
    }

    /// The rest of the current token, for error messages.
    fn preview(&self) -> &'a str {
        let start = self.pos;
        let mut end = start;
        while end < self.bytes.len() && !is_separator(self.bytes[end]) {
            end += 1;
        }
        &self.data[start..end]
    }

    fn read_operand(&mut self, role: ArgRole) -> Operand {
        if role == ArgRole::Flag {
            if let Some(flag @ (b'0' | b'1')) = self.peek() {
                self.pos += 1;
                return Operand::Literal((flag as char).to_string());
            }
        }
        let start = self.pos;
        let operand = match self.read_number() {
            Some(text) if role.is_pass_through() => Operand::Literal(text.to_owned()),
            Some(text) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Operand::Number(value),
                _ => Operand::Malformed(text.to_owned()),
            },
            None => {
                self.pos = start;
                Operand::Malformed(self.read_malformed().to_owned())
            }
        };
        if let Operand::Malformed(token) = &operand {
            log::warn!("malformed coordinate '{token}' at offset {start}");
        }
        operand
    }

    /// Reads one number following the SVG number grammar.
    fn read_number(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if let Some(b'+' | b'-') = self.peek() {
            self.pos += 1;
        }
        let int_digits = self.skip_digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.skip_digits();
        }
        if int_digits + frac_digits == 0 {
            return None;
        }
        if let Some(b'e' | b'E') = self.peek() {
            let sign = matches!(self.peek_at(1), Some(b'+' | b'-')) as usize;
            if !self.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                return None;
            }
            self.pos += 1 + sign;
            self.skip_digits();
        }
        Some(&self.data[start..self.pos])
    }

    /// Consumes a run of characters that is not a number, up to the next
    /// separator or command letter. Always consumes at least one byte.
    fn read_malformed(&mut self) -> &'a str {
        let start = self.pos;
        self.pos += 1;
        while let Some(byte) = self.peek() {
            if is_separator(byte) || Verb::from_letter(byte as char).is_some() {
                break;
            }
            self.pos += 1;
        }
        while !self.data.is_char_boundary(self.pos) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }
}

fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b','
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(path: &Path) -> String {
        path.commands().iter().map(PathCommand::letter).collect()
    }

    fn values(command: &PathCommand) -> Vec<f64> {
        command.args().iter().filter_map(Operand::value).collect()
    }

    #[test]
    fn simple_absolute() {
        let path = parse("M 0 800 L 1000 800 L 1000 0 L 0 0 Z").unwrap();
        assert_eq!(letters(&path), "MLLLZ");
        assert_eq!(values(&path.commands()[1]), [1000.0, 800.0]);
    }

    #[test]
    fn compact_numbers() {
        let path = parse("M10-20L.5.5l+3e1,-2E-1").unwrap();
        assert_eq!(values(&path.commands()[0]), [10.0, -20.0]);
        assert_eq!(values(&path.commands()[1]), [0.5, 0.5]);
        assert_eq!(values(&path.commands()[2]), [30.0, -0.2]);
        assert_eq!(path.commands()[2].position(), Position::Relative);
    }

    #[test]
    fn compact_arc_flags() {
        let path = parse("M0 0a10 10 0 0110 10").unwrap();
        let arc = &path.commands()[1];
        assert_eq!(arc.verb(), Verb::Arc);
        assert_eq!(
            arc.args(),
            &[
                Operand::Number(10.0),
                Operand::Number(10.0),
                Operand::Literal("0".into()),
                Operand::Literal("0".into()),
                Operand::Literal("1".into()),
                Operand::Number(10.0),
                Operand::Number(10.0),
            ]
        );
    }

    #[test]
    fn arc_rotation_keeps_source_text() {
        let path = parse("M0 0 A 5 5 30.50 1 0 10 10").unwrap();
        assert_eq!(path.commands()[1].args()[2], Operand::Literal("30.50".into()));
    }

    #[test]
    fn repeated_groups_split_into_commands() {
        let path = parse("M 1 2 3 4 5 6 C 1 2 3 4 5 6 7 8 9 10 11 12 h 1 2 3").unwrap();
        assert_eq!(letters(&path), "MLLCChhh");
        assert_eq!(values(&path.commands()[2]), [5.0, 6.0]);
    }

    #[test]
    fn relative_move_repeats_as_relative_line() {
        let path = parse("m 1 2 3 4").unwrap();
        assert_eq!(letters(&path), "ml");
    }

    #[test]
    fn close_either_case() {
        let path = parse("M0 0L1 1zM2 2L3 3Z").unwrap();
        assert_eq!(letters(&path), "MLzMLZ");
        assert!(path.commands()[2].args().is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n ").unwrap().is_empty());
    }

    #[test]
    fn unknown_letter() {
        assert_eq!(
            parse("M 0 0 X 1 1"),
            Err(ParseError::UnknownCommand {
                letter: 'X',
                offset: 6
            })
        );
    }

    #[test]
    fn missing_arguments() {
        assert_eq!(
            parse("M 0 0 L Z"),
            Err(ParseError::MissingArguments {
                letter: 'L',
                offset: 6
            })
        );
    }

    #[test]
    fn incomplete_group() {
        assert_eq!(
            parse("M 0 0 C 1 2 3 4 5"),
            Err(ParseError::ArgumentCount {
                letter: 'C',
                expected: 6,
                found: 5
            })
        );
        assert_eq!(
            parse("M 0 0 L 1 2 3 Z"),
            Err(ParseError::ArgumentCount {
                letter: 'L',
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn numbers_before_command() {
        assert_eq!(
            parse("10 20 L 1 1"),
            Err(ParseError::MissingCommand("10".into()))
        );
    }

    #[test]
    fn malformed_tokens_are_kept() {
        let path = parse("M 10 # L 1e 5 Z").unwrap();
        assert_eq!(
            path.commands()[0].args(),
            &[Operand::Number(10.0), Operand::Malformed("#".into())]
        );
        assert_eq!(
            path.commands()[1].args(),
            &[Operand::Malformed("1e".into()), Operand::Number(5.0)]
        );
    }

    #[test]
    fn lone_sign_is_malformed() {
        let path = parse("M - 4").unwrap();
        assert_eq!(path.commands()[0].args()[0], Operand::Malformed("-".into()));
    }
}
