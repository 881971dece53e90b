use super::*;

use crate::foundation::core::Rect;
use crate::primitives::shapes::Blank;
use crate::timeline::animated::AnimatedState;

fn marker(x: f64) -> NodeRef {
    NodeRef::new(Blank::new(Rect::new(x, 0.0, x + 1.0, 1.0)))
}

fn x_of(node: &NodeRef) -> f64 {
    node.downcast_ref::<Blank>().unwrap().rect.x0
}

fn slide(from: f64, to: f64, secs: f64) -> AnimatedState {
    AnimatedState::new(vec![marker(from), marker(to)], vec![secs]).unwrap()
}

#[test]
fn play_uses_the_tree_animation_length() {
    let mut book = Playbook::new();
    let clip = book.play(slide(0.0, 10.0, 1.5), None).unwrap();
    assert_eq!(clip.duration(), 1.5);
    assert_eq!(book.duration(), 1.5);
}

#[test]
fn static_scenes_need_an_explicit_duration() {
    let mut book = Playbook::new();
    let err = book.play(marker(0.0), None).unwrap_err();
    assert!(matches!(err, FloeError::Validation(_)), "{err}");
    assert!(book.timeline().is_empty());

    book.play(marker(0.0), Some(2.0)).unwrap();
    assert_eq!(book.duration(), 2.0);
}

#[test]
fn freeze_needs_something_played() {
    let mut book = Playbook::new();
    let err = book.freeze(1.0).unwrap_err();
    assert!(matches!(err, FloeError::Validation(_)), "{err}");
}

#[test]
fn combined_scene_plays_hold_then_next() {
    let mut book = Playbook::new();
    book.play(slide(0.0, 10.0, 1.0), None).unwrap();
    book.freeze(0.5).unwrap();
    book.play(slide(100.0, 200.0, 1.0), None).unwrap();

    let scene = book.combined_scene().unwrap();
    assert_eq!(scene.duration(), 2.5);
    assert_eq!(x_of(&scene.frame(0.5).unwrap()), 5.0);
    assert_eq!(x_of(&scene.frame(1.2).unwrap()), 10.0);
    assert_eq!(x_of(&scene.frame(2.0).unwrap()), 150.0);
}

#[test]
fn pushed_clips_join_the_timeline() {
    let mut book = Playbook::new();
    let clip = Clip::new(0.75, |t| Ok(marker(t))).unwrap();
    book.push(clip.reverse());
    assert_eq!(book.timeline().clips().len(), 1);
    assert_eq!(x_of(&book.combined_scene().unwrap().frame(0.0).unwrap()), 0.75);
}

#[test]
fn empty_playbook_has_no_scene() {
    assert!(matches!(
        Playbook::new().combined_scene().unwrap_err(),
        FloeError::Validation(_)
    ));
}
