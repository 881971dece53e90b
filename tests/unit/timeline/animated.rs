use super::*;

use crate::primitives::compose::Compose;
use crate::primitives::shapes::Blank;

fn marker(x: f64) -> NodeRef {
    NodeRef::new(Blank::new(Rect::new(x, 0.0, x + 1.0, 1.0)))
}

fn x_at(anim: &AnimatedState, t: f64) -> f64 {
    anim.frame_at(t)
        .unwrap()
        .downcast_ref::<Blank>()
        .unwrap()
        .rect
        .x0
}

fn abc() -> AnimatedState {
    AnimatedState::new(vec![marker(0.0), marker(10.0), marker(20.0)], vec![1.0, 1.0]).unwrap()
}

#[test]
fn segments_blend_consecutive_states() {
    let anim = abc();
    assert_eq!(x_at(&anim, 0.5), 5.0);
    assert_eq!(x_at(&anim, 1.0), 10.0);
    assert_eq!(x_at(&anim, 1.5), 15.0);
    assert_eq!(x_at(&anim, 2.5), 20.0);
    assert_eq!(anim.total_duration(), 2.0);
}

#[test]
fn state_and_duration_counts_must_agree() {
    let err = AnimatedState::new(vec![marker(0.0), marker(1.0), marker(2.0)], vec![1.0])
        .unwrap_err();
    assert!(err.is_domain_range(), "{err}");
    assert!(AnimatedState::new(vec![marker(0.0)], vec![]).unwrap_err().is_domain_range());
    assert!(
        AnimatedState::new(vec![marker(0.0), marker(1.0)], vec![-1.0])
            .unwrap_err()
            .is_domain_range()
    );
}

#[test]
fn evenly_splits_the_total() {
    let anim = AnimatedState::evenly(vec![marker(0.0), marker(1.0), marker(2.0)], 3.0).unwrap();
    assert_eq!(anim.durations(), &[1.5, 1.5]);
}

#[test]
fn start_offset_delays_the_animation() {
    let anim = abc().with_start_offset(1.0).unwrap();
    let before = anim.frame_at(0.5).unwrap();
    assert!(before.ptr_eq(&anim.states()[0]));
    assert_eq!(x_at(&anim, 1.5), 5.0);
    assert_eq!(anim.total_duration(), 3.0);
    assert!(abc().with_start_offset(-1.0).unwrap_err().is_domain_range());
}

#[test]
fn zero_length_segments_are_skipped() {
    let anim = AnimatedState::new(vec![marker(0.0), marker(10.0), marker(20.0)], vec![0.0, 1.0])
        .unwrap();
    assert_eq!(x_at(&anim, 0.0), 10.0);
    assert_eq!(x_at(&anim, 0.5), 15.0);
}

#[test]
fn per_segment_easing() {
    let anim = abc()
        .with_easing(Easing::PerSegment(vec![Ease::InQuad, Ease::Linear]))
        .unwrap();
    assert_eq!(x_at(&anim, 0.5), 2.5);
    assert_eq!(x_at(&anim, 1.5), 15.0);

    let err = abc()
        .with_easing(Easing::PerSegment(vec![Ease::InQuad]))
        .unwrap_err();
    assert!(err.is_domain_range());
}

#[test]
fn easing_parses_from_a_name_or_a_list() {
    let uniform: Easing = serde_json::from_str("\"in_out_cubic\"").unwrap();
    assert_eq!(uniform, Easing::Uniform(Ease::InOutCubic));
    let per: Easing = serde_json::from_str("[\"linear\", \"in_quad\"]").unwrap();
    assert_eq!(per, Easing::PerSegment(vec![Ease::Linear, Ease::InQuad]));
}

#[test]
fn nested_animations_resolve_at_the_same_time() {
    let inner =
        NodeRef::new(AnimatedState::new(vec![marker(0.0), marker(100.0)], vec![4.0]).unwrap());
    let outer = AnimatedState::new(vec![inner, marker(0.0)], vec![1.0]).unwrap();
    assert_eq!(outer.animation_duration(), Some(4.0));
    // At t=0 the inner state is still at 0, so the blend starts from there.
    assert_eq!(x_at(&outer, 0.0), 0.0);
}

#[test]
fn animated_children_inside_states() {
    let moving =
        NodeRef::new(AnimatedState::new(vec![marker(0.0), marker(8.0)], vec![2.0]).unwrap());
    let a = NodeRef::new(Compose::new([moving.clone()]));
    let b = NodeRef::new(Compose::new([moving]));
    let anim = AnimatedState::new(vec![a, b], vec![2.0]).unwrap();
    let snap = anim.frame_at(1.0).unwrap();
    let compose = snap.downcast_ref::<Compose>().unwrap();
    let blank = compose.items()[0].downcast_ref::<Blank>().unwrap();
    assert_eq!(blank.rect.x0, 4.0);
}

#[test]
fn first_state_is_resolved_before_the_start_offset() {
    let inner =
        NodeRef::new(AnimatedState::new(vec![marker(0.0), marker(10.0)], vec![0.5]).unwrap());
    let first = NodeRef::new(Compose::new([inner]));
    let anim = AnimatedState::new(vec![first, marker(50.0)], vec![1.0])
        .unwrap()
        .with_start_offset(1.0)
        .unwrap();

    let snap = anim.frame_at(0.8).unwrap();
    let compose = snap.downcast_ref::<Compose>().unwrap();
    let blank = compose.items()[0].downcast_ref::<Blank>().unwrap();
    assert_eq!(blank.rect.x0, 10.0);
}

#[test]
fn rebuild_keeps_timing() {
    let anim = abc()
        .with_easing(Ease::InOutSine)
        .unwrap()
        .with_start_offset(0.25)
        .unwrap();
    let rebuilt = anim.rebuild(anim.fields()).unwrap();
    let rebuilt = rebuilt.downcast_ref::<AnimatedState>().unwrap();
    assert_eq!(rebuilt.durations(), anim.durations());
    assert_eq!(rebuilt.easing(), &Easing::Uniform(Ease::InOutSine));
    assert_eq!(rebuilt.start_offset(), 0.25);
}

#[test]
fn bounds_cover_every_state() {
    let anim = abc();
    assert_eq!(anim.bounds(), Rect::new(0.0, 0.0, 21.0, 1.0));
    assert!(anim.as_timed().is_some());
}
