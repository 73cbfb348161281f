//! Sampling a normalized path into trace points.
//!
//! A tracing exercise shows the learner a handful of points per stroke.
//! Each move starts a new stroke, every command contributes its end point
//! and a close returns to the stroke's first point. Points are scaled into
//! the unit square over the whole path and thinned to a fixed count.
//!
//! Saved points can be edited afterwards, for example to split a stroke
//! where the learner should lift the pen. [`dotted_path`] draws them back
//! as a sparse polyline that shows the tracing direction.

use crate::{
    bounds::{BoundingBox, BoundsBuilder},
    command::{Cursor, PathCommand, Verb},
    error::PointsError,
    path::{format_number, Path},
};

/// Number of points kept per stroke unless told otherwise.
pub const DEFAULT_SAMPLES: usize = 30;

/// Digits after the decimal point in a formatted point.
const POINT_PRECISION: usize = 4;

/// Most points per stroke drawn by [`dotted_path`], give or take the last.
const DOTTED_POINTS: usize = 15;

/// Sampled points for every stroke of a path.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracePoints {
    pub strokes: Vec<Stroke>,
}

/// One stroke as `"x,y"` strings in the unit square.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    pub points: Vec<String>,
}

impl TracePoints {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Maps every point from the unit square into `bounds`.
    pub fn in_bounds(&self, bounds: &BoundingBox) -> Result<Vec<Vec<(f64, f64)>>, PointsError> {
        self.strokes
            .iter()
            .map(|stroke| {
                stroke.coordinates().map(|points| {
                    points
                        .into_iter()
                        .map(|(x, y)| {
                            (
                                bounds.min_x + x * bounds.width(),
                                bounds.min_y + y * bounds.height(),
                            )
                        })
                        .collect()
                })
            })
            .collect()
    }

    /// Splits stroke `index` into pieces at the point indices in `at`.
    ///
    /// Each split point ends one piece and starts the next. Indices that do
    /// not fall strictly inside the stroke are ignored, and duplicates are
    /// dropped. The other strokes keep their order.
    pub fn split_stroke(&mut self, index: usize, at: &[usize]) -> Result<(), PointsError> {
        let count = self.strokes.len();
        let points = &self
            .strokes
            .get(index)
            .ok_or(PointsError::NoSuchStroke { index, count })?
            .points;
        let len = points.len();
        let mut at: Vec<_> = at
            .iter()
            .copied()
            .filter(|&ix| ix > 0 && ix < len)
            .collect();
        at.sort_unstable();
        at.dedup();
        if at.is_empty() {
            return Err(PointsError::NoSplitIndices { len });
        }
        let mut pieces = Vec::with_capacity(at.len() + 1);
        let mut start = 0;
        for ix in at {
            pieces.push(Stroke {
                points: points[start..=ix].to_vec(),
            });
            start = ix;
        }
        pieces.push(Stroke {
            points: points[start..].to_vec(),
        });
        self.strokes.splice(index..=index, pieces);
        Ok(())
    }

    /// Rescales the points so that together they span the unit square.
    ///
    /// An axis with no extent is only shifted to 0. Results are clamped to
    /// `[0, 1]`.
    pub fn renormalize(&mut self) -> Result<(), PointsError> {
        let strokes = self
            .strokes
            .iter()
            .map(Stroke::coordinates)
            .collect::<Result<Vec<_>, _>>()?;
        let mut bounds = BoundsBuilder::default();
        for &(x, y) in strokes.iter().flatten() {
            bounds.add_point(x, y);
        }
        let Some(bounds) = bounds.build() else {
            return Ok(());
        };
        let (width, height) = (unit_extent(bounds.width()), unit_extent(bounds.height()));
        for (stroke, coordinates) in self.strokes.iter_mut().zip(strokes) {
            stroke.points = coordinates
                .into_iter()
                .map(|(x, y)| {
                    format_point(
                        ((x - bounds.min_x) / width).clamp(0.0, 1.0),
                        ((y - bounds.min_y) / height).clamp(0.0, 1.0),
                    )
                })
                .collect();
        }
        Ok(())
    }
}

impl Stroke {
    /// Reads the points back as numbers.
    pub fn coordinates(&self) -> Result<Vec<(f64, f64)>, PointsError> {
        self.points.iter().map(|point| parse_point(point)).collect()
    }
}

fn parse_point(text: &str) -> Result<(f64, f64), PointsError> {
    let malformed = || PointsError::MalformedPoint(text.to_owned());
    let (x, y) = text.split_once(',').ok_or_else(malformed)?;
    let x = x.trim().parse().map_err(|_| malformed())?;
    let y = y.trim().parse().map_err(|_| malformed())?;
    Ok((x, y))
}

fn format_point(x: f64, y: f64) -> String {
    format!(
        "{},{}",
        format_number(x, POINT_PRECISION),
        format_number(y, POINT_PRECISION)
    )
}

fn unit_extent(size: f64) -> f64 {
    if size > 0.0 {
        size
    } else {
        1.0
    }
}

/// Splits `path` into strokes of absolute end points.
pub fn strokes(path: &Path) -> Vec<Vec<(f64, f64)>> {
    let mut strokes = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut cursor = Cursor::default();
    for command in path {
        cursor.advance(command);
        match command.verb() {
            Verb::Move => {
                if !current.is_empty() {
                    strokes.push(std::mem::take(&mut current));
                }
                current.push((cursor.x, cursor.y));
            }
            Verb::Close => {
                if let Some(first) = current.first().copied() {
                    current.push(first);
                }
            }
            _ => current.push((cursor.x, cursor.y)),
        }
    }
    if !current.is_empty() {
        strokes.push(current);
    }
    strokes
}

/// Indices of at most `samples` evenly spaced items out of `len`.
///
/// The first and last items are always kept when two or more are taken.
pub fn sample_indices(len: usize, samples: usize) -> impl Iterator<Item = usize> {
    let count = len.min(samples);
    (0..count).map(move |i| if count > 1 { i * (len - 1) / (count - 1) } else { 0 })
}

/// Samples `path` into trace points with at most `samples` per stroke.
pub fn trace_points(path: &Path, samples: usize) -> TracePoints {
    let strokes = strokes(path);
    let mut bounds = BoundsBuilder::default();
    for &(x, y) in strokes.iter().flatten() {
        bounds.add_point(x, y);
    }
    let Some(bounds) = bounds.build() else {
        return TracePoints::default();
    };
    let (width, height) = (unit_extent(bounds.width()), unit_extent(bounds.height()));
    let strokes = strokes
        .iter()
        .map(|stroke| Stroke {
            points: sample_indices(stroke.len(), samples)
                .map(|ix| {
                    let (x, y) = stroke[ix];
                    format_point((x - bounds.min_x) / width, (y - bounds.min_y) / height)
                })
                .collect(),
        })
        .filter(|stroke| !stroke.points.is_empty())
        .collect();
    TracePoints { strokes }
}

/// Draws trace points as a sparse polyline inside `bounds`, one subpath
/// per stroke, for showing the tracing direction.
///
/// Long strokes keep every n-th point so that about fifteen remain; the
/// last point of a stroke is always kept.
pub fn dotted_path(points: &TracePoints, bounds: &BoundingBox) -> Result<Path, PointsError> {
    let mut path = Path::new();
    for stroke in points.in_bounds(bounds)? {
        let Some(&last) = stroke.last() else {
            continue;
        };
        let step = (stroke.len() / DOTTED_POINTS).max(1);
        let mut kept: Vec<_> = stroke.iter().copied().step_by(step).collect();
        if (stroke.len() - 1) % step != 0 {
            kept.push(last);
        }
        for (i, (x, y)) in kept.into_iter().enumerate() {
            path.push(match i {
                0 => PathCommand::move_to(x, y),
                _ => PathCommand::line_to(x, y),
            });
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn points(data: &str, samples: usize) -> Vec<Vec<String>> {
        trace_points(&data.parse().unwrap(), samples)
            .strokes
            .into_iter()
            .map(|stroke| stroke.points)
            .collect()
    }

    #[test]
    fn closed_square() {
        assert_eq!(
            points("M 100 100 L 900 100 L 900 900 L 100 900 Z", DEFAULT_SAMPLES),
            [[
                "0.0000,0.0000",
                "1.0000,0.0000",
                "1.0000,1.0000",
                "0.0000,1.0000",
                "0.0000,0.0000",
            ]]
        );
    }

    #[test]
    fn each_move_starts_a_stroke() {
        let strokes = strokes(&"M 0 0 L 10 0 M 0 10 L 10 10 Z".parse().unwrap());
        assert_eq!(
            strokes,
            [
                vec![(0.0, 0.0), (10.0, 0.0)],
                vec![(0.0, 10.0), (10.0, 10.0), (0.0, 10.0)],
            ]
        );
    }

    #[test]
    fn relative_commands_use_end_points() {
        let strokes = strokes(&"m 10 10 h 5 v 5 c 1 1 2 2 3 3 z".parse().unwrap());
        assert_eq!(
            strokes,
            [vec![
                (10.0, 10.0),
                (15.0, 10.0),
                (15.0, 15.0),
                (18.0, 18.0),
                (10.0, 10.0)
            ]]
        );
    }

    #[test]
    fn evenly_spaced_samples() {
        assert_eq!(sample_indices(11, 3).collect::<Vec<_>>(), [0, 5, 10]);
        assert_eq!(sample_indices(10, 4).collect::<Vec<_>>(), [0, 3, 6, 9]);
        assert_eq!(sample_indices(4, 30).collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert_eq!(sample_indices(7, 1).collect::<Vec<_>>(), [0]);
        assert_eq!(sample_indices(7, 0).count(), 0);
    }

    #[test]
    fn flat_path_uses_unit_extent() {
        assert_eq!(
            points("M 100 500 L 300 500", DEFAULT_SAMPLES),
            [["0.0000,0.0000", "1.0000,0.0000"]]
        );
    }

    #[test]
    fn nothing_to_sample() {
        assert!(trace_points(&Path::new(), DEFAULT_SAMPLES).is_empty());
        assert!(trace_points(&"Z".parse().unwrap(), DEFAULT_SAMPLES).is_empty());
        assert!(trace_points(&"M 0 0 L 1 1".parse().unwrap(), 0).is_empty());
    }

    fn stroke_list(strokes: &[&[&str]]) -> TracePoints {
        TracePoints {
            strokes: strokes
                .iter()
                .map(|points| Stroke {
                    points: points.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn unit_bounds(min_x: f64, min_y: f64, size: f64) -> BoundingBox {
        BoundingBox {
            min_x,
            max_x: min_x + size,
            min_y,
            max_y: min_y + size,
        }
    }

    #[test]
    fn split_point_is_shared() {
        let mut points = stroke_list(&[&["0,0", "1,0", "2,0", "3,0", "4,0", "5,0"], &["9,9"]]);
        points.split_stroke(0, &[4, 2, 2, 0, 6]).unwrap();
        assert_eq!(
            points,
            stroke_list(&[
                &["0,0", "1,0", "2,0"],
                &["2,0", "3,0", "4,0"],
                &["4,0", "5,0"],
                &["9,9"],
            ])
        );
    }

    #[test]
    fn split_later_stroke() {
        let mut points = stroke_list(&[&["0,0"], &["1,1", "2,2", "3,3"]]);
        points.split_stroke(1, &[1]).unwrap();
        assert_eq!(
            points,
            stroke_list(&[&["0,0"], &["1,1", "2,2"], &["2,2", "3,3"]])
        );
    }

    #[test]
    fn split_needs_an_inner_index() {
        let mut points = stroke_list(&[&["0,0", "1,1", "2,2"]]);
        assert_eq!(
            points.split_stroke(0, &[0, 3, 7]),
            Err(PointsError::NoSplitIndices { len: 3 })
        );
        assert_eq!(
            points.split_stroke(2, &[1]),
            Err(PointsError::NoSuchStroke { index: 2, count: 1 })
        );
        assert_eq!(points, stroke_list(&[&["0,0", "1,1", "2,2"]]));
    }

    #[test]
    fn renormalize_fills_unit_square() {
        let mut points = stroke_list(&[&["-0.5,0.2", "0.5,0.2"], &["1.5,0.6"]]);
        points.renormalize().unwrap();
        assert_eq!(
            points,
            stroke_list(&[&["0.0000,0.0000", "0.5000,0.0000"], &["1.0000,1.0000"]])
        );
    }

    #[test]
    fn renormalize_flat_axis() {
        let mut points = stroke_list(&[&["0.25,0.3", "0.75,0.3"]]);
        points.renormalize().unwrap();
        assert_eq!(points, stroke_list(&[&["0.0000,0.0000", "1.0000,0.0000"]]));
    }

    #[test]
    fn malformed_point() {
        let mut points = stroke_list(&[&["0,0", "0.5;0.5"]]);
        assert_eq!(
            points.renormalize(),
            Err(PointsError::MalformedPoint("0.5;0.5".into()))
        );
        let bad_number = stroke_list(&[&["x,1"]]);
        let bounds = unit_bounds(0.0, 0.0, 1.0);
        assert!(dotted_path(&bad_number, &bounds).is_err());
    }

    #[test]
    fn dotted_path_maps_into_bounds() {
        let points = stroke_list(&[&["0,0", "1,0", "1,1"], &[], &["0.5,0.5"]]);
        let bounds = unit_bounds(100.0, 200.0, 800.0);
        let path = dotted_path(&points, &bounds).unwrap();
        assert_eq!(
            path.to_string(),
            "M 100.00 200.00 L 900.00 200.00 L 900.00 1000.00 M 500.00 600.00"
        );
    }

    #[test]
    fn dotted_path_thins_long_strokes() {
        let owned: Vec<String> = (0..31).map(|i| format!("{i},0")).collect();
        let stroke: Vec<&str> = owned.iter().map(String::as_str).collect();
        let unit = unit_bounds(0.0, 0.0, 1.0);
        let xs = |path: Path| -> Vec<f64> {
            path.commands().iter().map(|c| c.value(0).unwrap()).collect()
        };

        // 31 points step by 2 and land on the last one
        let all = stroke_list(&[stroke.as_slice()]);
        let path = dotted_path(&all, &unit).unwrap();
        assert_eq!(
            xs(path),
            (0..=30).step_by(2).map(f64::from).collect::<Vec<_>>()
        );

        let path = dotted_path(&stroke_list(&[&stroke[..30]]), &unit).unwrap();
        let mut expected: Vec<f64> = (0..30).step_by(2).map(f64::from).collect();
        expected.push(29.0);
        assert_eq!(xs(path), expected);
    }

    #[test]
    fn dotted_path_of_nothing() {
        let bounds = unit_bounds(0.0, 0.0, 1.0);
        let path = dotted_path(&TracePoints::default(), &bounds).unwrap();
        assert!(path.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_stroke_list() {
        let json = serde_json::to_value(trace_points(
            &"M 0 0 L 10 20".parse().unwrap(),
            DEFAULT_SAMPLES,
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "strokes": [{ "points": ["0.0000,0.0000", "1.0000,1.0000"] }]
            })
        );
    }
}
