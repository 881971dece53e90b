use super::*;

use crate::animation::ease::Ease;
use crate::foundation::core::{Color, Point};
use crate::interp::structural::interpolate;
use crate::primitives::curves::{CurvedLine, Line};
use crate::primitives::shapes::Blank;

fn line() -> Line {
    Line::new((0.0, 0.0), (100.0, 0.0), PathStyle::new(Color::BLUE, 4.0))
}

#[test]
fn straight_children_default_to_polyline() {
    let p = PartialPath::new(line(), 0.0, 0.5).unwrap();
    assert!(p.path().segments().all(|s| matches!(s, kurbo::PathSeg::Line(_))));
    let last = *p.sample().points().last().unwrap();
    assert!((last.x - 50.0).abs() < 1e-9 && last.y.abs() < 1e-9);
    assert_eq!(p.style().thickness, 4.0);
}

#[test]
fn curved_children_default_to_smooth() {
    let curve = CurvedLine::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 80.0),
            Point::new(100.0, 0.0),
        ],
        PathStyle::default(),
    )
    .unwrap();
    let p = PartialPath::new(curve, 0.0, 1.0).unwrap();
    assert!(p.path().segments().all(|s| matches!(s, kurbo::PathSeg::Cubic(_))));
}

#[test]
fn explicit_mode_overrides_the_default() {
    let p = PartialPath::with_options(line(), 0.0, 1.0, 0.25, Some(ReconstructMode::Smooth))
        .unwrap();
    assert_eq!(p.path().segments().count(), 4);
    assert!(p.path().segments().all(|s| matches!(s, kurbo::PathSeg::Cubic(_))));
}

#[test]
fn non_curve_child_is_rejected() {
    let err = PartialPath::new(Blank::new(Rect::ZERO), 0.0, 1.0).unwrap_err();
    assert!(matches!(err, FloeError::Validation(_)), "{err}");
}

#[test]
fn bad_range_is_a_domain_error() {
    let err = PartialPath::new(line(), 0.7, 0.2).unwrap_err();
    assert!(err.is_domain_range());
}

#[test]
fn growing_end_interpolates() {
    let child = NodeRef::new(line());
    let a = NodeRef::new(PartialPath::new(child.clone(), 0.0, 0.0).unwrap());
    let b = NodeRef::new(PartialPath::new(child, 0.0, 1.0).unwrap());
    let mid = interpolate(&a, &b, 0.25, Ease::Linear).unwrap();
    let mid = mid.downcast_ref::<PartialPath>().unwrap();
    let last = *mid.sample().points().last().unwrap();
    assert!((last.x - 25.0).abs() < 1e-9);
}

#[test]
fn partial_path_is_itself_a_curve() {
    let p = PartialPath::new(line(), 0.25, 0.75).unwrap();
    assert!(p.is_straight());
    assert!((p.total_length() - 50.0).abs() < 1e-9);
    let (start, _) = p.position_and_tangent_at(0.0);
    assert!((start.x - 25.0).abs() < 1e-9);
}

#[test]
fn overshooting_ease_pins_the_range_to_the_curve() {
    let child = NodeRef::new(line());
    let a = NodeRef::new(PartialPath::new(child.clone(), 0.0, 0.0).unwrap());
    let b = NodeRef::new(PartialPath::new(child, 0.0, 1.0).unwrap());
    // OutBack(0.4) is past 1.
    let out = interpolate(&a, &b, 0.4, Ease::OutBack).unwrap();
    let out = out.downcast_ref::<PartialPath>().unwrap();
    let last = *out.sample().points().last().unwrap();
    assert!((last.x - 100.0).abs() < 1e-9);
}
