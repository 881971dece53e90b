use super::*;

use crate::foundation::core::Color;
use crate::path::sample::{ReconstructMode, extract_subrange};

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

#[test]
fn line_is_a_straight_measured_curve() {
    let line = Line::new((0.0, 0.0), (30.0, 40.0), PathStyle::new(Color::BLACK, 2.0));
    assert!(line.is_straight());
    assert!((line.total_length() - 50.0).abs() < 1e-9);
    let (p, t) = line.position_and_tangent_at(25.0);
    assert!((p.x - 15.0).abs() < 1e-9 && (p.y - 20.0).abs() < 1e-9);
    assert!((t.x - 0.6).abs() < 1e-9 && (t.y - 0.8).abs() < 1e-9);
    assert_eq!(line.bounds(), Rect::new(-1.0, -1.0, 31.0, 41.0));
}

#[test]
fn measure_is_computed_once_per_instance() {
    let line = Line::new((0.0, 0.0), (10.0, 0.0), PathStyle::default());
    let first: *const PathMeasure = line.measure();
    let second: *const PathMeasure = line.measure();
    assert_eq!(first, second);
}

#[test]
fn curved_line_emits_one_cubic_per_point_pair() {
    let c = CurvedLine::new(
        pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, -10.0), (40.0, 0.0)]),
        PathStyle::default(),
    )
    .unwrap();
    let segs: Vec<_> = c.path().segments().collect();
    assert_eq!(segs.len(), 2);
    match segs[0] {
        kurbo::PathSeg::Cubic(cubic) => {
            assert_eq!(cubic.p0, Point::new(0.0, 0.0));
            assert_eq!(cubic.p1, Point::new(0.0, 0.0));
            assert_eq!(cubic.p2, Point::new(10.0, 10.0));
            assert_eq!(cubic.p3, Point::new(20.0, 0.0));
        }
        other => panic!("expected a cubic, got {other:?}"),
    }
    assert!(!c.is_straight());
}

#[test]
fn curved_line_ignores_an_unpaired_trailing_point() {
    let c = CurvedLine::new(
        pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, -10.0)]),
        PathStyle::default(),
    )
    .unwrap();
    assert_eq!(c.path().segments().count(), 1);
}

#[test]
fn curved_line_needs_three_points() {
    let err = CurvedLine::new(pts(&[(0.0, 0.0), (1.0, 1.0)]), PathStyle::default()).unwrap_err();
    assert!(matches!(err, FloeError::Validation(_)), "{err}");
}

#[test]
fn path_shape_keeps_geometry_fixed_under_rebuild() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.quad_to((5.0, 10.0), (10.0, 0.0));
    let shape = PathShape::new(path.clone(), PathStyle::default());
    let rebuilt = shape.rebuild(shape.fields()).unwrap();
    let curve = rebuilt.as_curve().unwrap();
    assert_eq!(curve.path(), &path);
    assert!((curve.total_length() - 14.79).abs() < 0.01);
}

#[test]
fn curve_nodes_can_be_sampled() {
    let c = CurvedLine::new(
        pts(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)]),
        PathStyle::default(),
    )
    .unwrap();
    let s = extract_subrange(&c, 0.0, 1.0, 0.1, ReconstructMode::Smooth).unwrap();
    assert_eq!(s.points().len(), 11);
    assert!((s.points()[10].x - 100.0).abs() < 1e-6);
}
