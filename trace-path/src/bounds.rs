//! Bounding boxes over path coordinates.

use crate::{
    command::{Axis, Cursor, Position},
    path::Path,
};

/// Extent of a path's coordinates.
///
/// This is the box of the points as written (end points, control points
/// and absolute arc radii), not the tight box of the rendered curves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Accumulates min/max per axis.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoundsBuilder {
    x: Option<(f64, f64)>,
    y: Option<(f64, f64)>,
}

impl BoundsBuilder {
    pub fn add(&mut self, axis: Axis, value: f64) {
        let range = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        *range = Some(match *range {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.add(Axis::X, x);
        self.add(Axis::Y, y);
    }

    /// Returns `None` unless both axes received at least one value.
    pub fn build(self) -> Option<BoundingBox> {
        let ((min_x, max_x), (min_y, max_y)) = (self.x?, self.y?);
        Some(BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }
}

/// Computes the bounding box of every coordinate argument in `path`.
///
/// Relative arguments are resolved against the cursor at the start of
/// their command, so the result is in absolute coordinates. Arc rotation
/// and flags never contribute, and radii only do on absolute arcs. A
/// relative first command starts at the origin and counts as absolute.
pub fn bounding_box(path: &Path) -> Option<BoundingBox> {
    let mut bounds = BoundsBuilder::default();
    let mut cursor = Cursor::default();
    for (ix, command) in path.commands().iter().enumerate() {
        let absolute = ix == 0 || command.position() == Position::Absolute;
        for (role, arg) in command.roles() {
            let (Some(axis), Some(value)) = (role.axis(), arg.value()) else {
                continue;
            };
            if role.is_point() {
                bounds.add(axis, cursor.resolve(command, axis, value));
            } else if absolute {
                bounds.add(axis, value);
            }
        }
        cursor.advance(command);
    }
    bounds.build()
}
