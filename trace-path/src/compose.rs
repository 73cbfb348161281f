//! Combining several glyph outlines into one path.
//!
//! Ligatures and base-plus-mark clusters are drawn as separate glyphs at
//! pen positions supplied by a shaper. They are translated into place and
//! concatenated in font units, before any normalization.

use crate::{
    command::{Axis, Position},
    path::Path,
};

/// Placement of one glyph relative to the pen, as produced by text
/// shaping.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphPosition {
    pub x_offset: f64,
    pub y_offset: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

impl GlyphPosition {
    /// A glyph drawn at the pen that moves it horizontally by `advance`.
    pub fn advance(advance: f64) -> Self {
        Self {
            x_advance: advance,
            ..Default::default()
        }
    }
}

/// A glyph outline and where to put it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphPlacement {
    pub path: Path,
    pub x_offset: f64,
    pub y_offset: f64,
}

/// Running pen position while laying out a glyph run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PenPosition {
    pub x: f64,
    pub y: f64,
}

impl PenPosition {
    /// Places `path` at the pen plus the glyph offsets, then advances.
    pub fn place(&mut self, path: Path, position: GlyphPosition) -> GlyphPlacement {
        let placement = GlyphPlacement {
            path,
            x_offset: self.x + position.x_offset,
            y_offset: self.y + position.y_offset,
        };
        self.x += position.x_advance;
        self.y += position.y_advance;
        placement
    }
}

/// Moves every absolute point of `path` by `(dx, dy)`.
///
/// Relative arguments and arc radii are distances and stay as they are.
/// A relative first command is measured from the origin, so it is marked
/// absolute to keep its meaning once the path is appended to another.
pub fn translate(path: &Path, dx: f64, dy: f64) -> Path {
    path.commands()
        .iter()
        .enumerate()
        .map(|(ix, command)| {
            let mut command = command.clone();
            if ix == 0 {
                command.set_position(Position::Absolute);
            }
            if command.position() == Position::Absolute {
                let roles = command.verb().roles();
                for (role, arg) in roles.iter().zip(command.args_mut()) {
                    if !role.is_point() {
                        continue;
                    }
                    match role.axis() {
                        Some(Axis::X) => arg.map_number(|x| x + dx),
                        Some(Axis::Y) => arg.map_number(|y| y + dy),
                        None => (),
                    }
                }
            }
            command
        })
        .collect()
}

/// Translates each placement and concatenates the results.
pub fn compose(placements: &[GlyphPlacement]) -> Path {
    let mut combined = Path::new();
    for placement in placements {
        combined.extend(
            translate(&placement.path, placement.x_offset, placement.y_offset).into_commands(),
        );
    }
    combined
}
