use super::*;

use crate::render::display_list::{DisplayList, DrawOp};

#[test]
fn border_position_grows_bounds() {
    let base = Rect::new(0.0, 0.0, 10.0, 10.0);
    let center = Rectangle::new(base).border(Color::BLACK, 4.0);
    assert_eq!(center.bounds(), Rect::new(-2.0, -2.0, 12.0, 12.0));

    let inside = center.clone().border_position(BorderPosition::Inside);
    assert_eq!(inside.bounds(), base);

    let outside = center.border_position(BorderPosition::Outside);
    assert_eq!(outside.bounds(), Rect::new(-4.0, -4.0, 14.0, 14.0));
}

#[test]
fn rectangle_draws_fill_then_border() {
    let r = Rectangle::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .fill(Color::RED)
        .border(Color::BLACK, 2.0)
        .border_position(BorderPosition::Inside);
    let list = DisplayList::record(&r).unwrap();
    assert_eq!(list.len(), 2);
    assert!(matches!(list.ops()[0], DrawOp::Fill { color, .. } if color == Color::RED));
    match &list.ops()[1] {
        DrawOp::Stroke { path, style } => {
            assert_eq!(style.thickness, 2.0);
            // Inside borders are stroked along the outline inset by half the width.
            assert_eq!(path.bounding_box(), Rect::new(1.0, 1.0, 9.0, 9.0));
        }
        other => panic!("expected a stroke, got {other:?}"),
    }
}

#[test]
fn rectangle_without_paint_draws_nothing() {
    let r = Rectangle::new(Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(DisplayList::record(&r).unwrap().is_empty());
}

#[test]
fn rounded_corners_are_clamped_to_half_the_side() {
    let path = rounded_rect(Rect::new(0.0, 0.0, 10.0, 4.0), Vec2::new(50.0, 50.0));
    let bb = path.bounding_box();
    assert!((bb.x0 - 0.0).abs() < 1e-6 && (bb.x1 - 10.0).abs() < 1e-6);
    assert!((bb.y0 - 0.0).abs() < 1e-6 && (bb.y1 - 4.0).abs() < 1e-6);
}

#[test]
fn blank_fills_only_with_background() {
    let rect = Rect::new(0.0, 0.0, 5.0, 5.0);
    assert!(DisplayList::record(&Blank::new(rect)).unwrap().is_empty());
    let list = DisplayList::record(&Blank::new(rect).with_background(Color::WHITE)).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(Blank::new(rect).bounds(), rect);
}

#[test]
fn ellipse_round_trips_through_fields() {
    let e = Ellipse::new(Rect::new(0.0, 0.0, 4.0, 2.0))
        .fill(Color::BLUE)
        .border_position(BorderPosition::Outside);
    let rebuilt = e.rebuild(e.fields()).unwrap();
    assert_eq!(rebuilt.downcast_ref::<Ellipse>(), Some(&e));
}
