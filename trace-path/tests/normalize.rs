//! End to end checks on glyph shaped outlines, using kurbo as an
//! independent reader of the output.

use kurbo::{BezPath, Shape};
use trace_path::{
    compose, trace_points, GlyphPlacement, GlyphPosition, NormalizeOptions, Normalizer, Path,
    PenPosition, Warning,
};

// A TrueType style outline of a bowl with a counter, in a 2048 upem font.
const BOWL: &str = "M 1024 -20 Q 1420 -20 1640 240 Q 1860 500 1860 720 Q 1860 940 1640 1200 \
                    Q 1420 1460 1024 1460 Q 628 1460 408 1200 Q 188 940 188 720 \
                    Q 188 500 408 240 Q 628 -20 1024 -20 Z \
                    M 1024 180 Q 760 180 600 380 Q 440 580 440 720 Q 440 860 600 1060 \
                    Q 760 1260 1024 1260 Q 1288 1260 1448 1060 Q 1608 860 1608 720 \
                    Q 1608 580 1448 380 Q 1288 180 1024 180 Z";

fn kurbo_box(data: &str) -> kurbo::Rect {
    BezPath::from_svg(data).unwrap().bounding_box()
}

#[test]
fn glyph_lands_in_padded_canvas() {
    let glyph: Path = BOWL.parse().unwrap();
    let normalized = Normalizer::default().normalize(&glyph, 2048.0).unwrap();
    assert!(normalized.warnings.is_empty());

    let svg = normalized.to_svg();
    let before = kurbo_box(BOWL);
    let after = kurbo_box(&svg);
    // wider than tall, so the width spans the padded canvas
    assert!((after.x0 - 100.0).abs() < 0.01, "{after:?}");
    assert!((after.x1 - 900.0).abs() < 0.01, "{after:?}");
    assert!((after.y0 - 100.0).abs() < 0.01, "{after:?}");
    assert!(after.y1 <= 900.0);
    let ratio = |rect: kurbo::Rect| rect.width() / rect.height();
    assert!((ratio(before) - ratio(after)).abs() < 1e-3);
}

#[test]
fn top_of_glyph_is_top_of_canvas() {
    // the apex of an upward pointing triangle ends up with the smallest y
    let normalized = Normalizer::default()
        .normalize(&"M 0 0 L 500 700 L 1000 0 Z".parse().unwrap(), 1000.0)
        .unwrap();
    assert_eq!(
        normalized.to_svg(),
        "M 100.00 660.00 L 500.00 100.00 L 900.00 660.00 Z"
    );
}

#[test]
fn composed_cluster_normalizes_as_one_shape() {
    let base: Path = "M 0 0 L 400 0 L 400 600 L 0 600 Z".parse().unwrap();
    let mark: Path = "m 0 0 l 100 0 l 0 100 l -100 0 z".parse().unwrap();
    let mut pen = PenPosition::default();
    let placements: Vec<GlyphPlacement> = vec![
        pen.place(base, GlyphPosition::advance(450.0)),
        pen.place(mark, GlyphPosition::advance(150.0)),
    ];
    let combined = compose(&placements);
    let normalized = Normalizer::new(NormalizeOptions {
        padding: 0.0,
        ..Default::default()
    })
    .unwrap()
    .normalize(&combined, 1000.0)
    .unwrap();
    // 550 wide by 600 tall, so the height spans the canvas
    let after = kurbo_box(&normalized.to_svg());
    let close = |a: f64, b: f64| (a - b).abs() < 0.01;
    assert!(close(after.x0, 0.0) && close(after.x1, 916.67), "{after:?}");
    assert!(close(after.y0, 0.0) && close(after.y1, 1000.0), "{after:?}");
}

#[test]
fn malformed_input_still_produces_output() {
    let normalized = Normalizer::default()
        .normalize(&"M 0 0 L 10 ? L 20 20 Z".parse().unwrap(), 1000.0)
        .unwrap();
    assert_eq!(
        normalized.warnings,
        [Warning::MalformedCoordinate {
            command: 1,
            token: "?".into()
        }]
    );
    assert!(normalized.to_svg().contains(" ? "));
}

#[test]
fn normalized_glyph_samples_into_unit_square() {
    let glyph: Path = BOWL.parse().unwrap();
    let normalized = Normalizer::default().normalize(&glyph, 2048.0).unwrap();
    let points = trace_points(&normalized.path, 5);
    assert_eq!(points.strokes.len(), 2);
    for stroke in &points.strokes {
        assert_eq!(stroke.points.len(), 5);
        assert_eq!(stroke.points.first(), stroke.points.last());
        for point in &stroke.points {
            let (x, y) = point.split_once(',').unwrap();
            let (x, y): (f64, f64) = (x.parse().unwrap(), y.parse().unwrap());
            assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y));
        }
    }
}
