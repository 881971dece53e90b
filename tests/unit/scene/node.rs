use super::*;

use crate::foundation::core::Color;
use crate::primitives::compose::Compose;
use crate::primitives::shapes::{Blank, Rectangle};
use crate::timeline::animated::AnimatedState;
use crate::timeline::frozen::Frozen;

fn square(size: f64) -> NodeRef {
    NodeRef::new(Rectangle::new(Rect::new(0.0, 0.0, size, size)).fill(Color::RED))
}

fn grow(from: f64, to: f64, secs: f64) -> NodeRef {
    NodeRef::new(AnimatedState::new(vec![square(from), square(to)], vec![secs]).unwrap())
}

#[test]
fn static_tree_renders_to_itself() {
    let tree = NodeRef::new(Compose::new([square(1.0), square(2.0)]));
    let snap = tree.render_at(3.0).unwrap();
    assert!(snap.ptr_eq(&tree));
}

#[test]
fn animated_child_is_resolved_inside_a_static_parent() {
    let tree = NodeRef::new(Compose::new([square(1.0), grow(0.0, 10.0, 2.0)]));
    let snap = tree.render_at(1.0).unwrap();
    assert!(!snap.ptr_eq(&tree));

    let compose = snap.downcast_ref::<Compose>().unwrap();
    let rect = compose.items()[1].downcast_ref::<Rectangle>().unwrap();
    assert_eq!(rect.rect, Rect::new(0.0, 0.0, 5.0, 5.0));
    // Untouched siblings are shared.
    let original = tree.downcast_ref::<Compose>().unwrap();
    assert!(compose.items()[0].ptr_eq(&original.items()[0]));
}

#[test]
fn animation_duration_is_the_longest_in_the_tree() {
    let tree = NodeRef::new(Compose::new([
        grow(0.0, 1.0, 2.0),
        square(1.0),
        grow(0.0, 1.0, 3.5),
    ]));
    assert_eq!(tree.animation_duration(), Some(3.5));
    assert_eq!(square(1.0).animation_duration(), None);
}

#[test]
fn frozen_subtrees_do_not_count_as_animation() {
    let tree = NodeRef::new(Compose::new([
        grow(0.0, 1.0, 2.0),
        NodeRef::new(Frozen::new(grow(0.0, 1.0, 9.0))),
    ]));
    assert_eq!(tree.animation_duration(), Some(2.0));
}

#[test]
fn equality_is_structural() {
    assert_eq!(square(2.0), square(2.0));
    assert_ne!(square(2.0), square(3.0));
    let blank = NodeRef::new(Blank::new(Rect::new(0.0, 0.0, 2.0, 2.0)));
    assert_ne!(square(2.0), blank);
}

#[test]
fn default_children_come_from_node_fields() {
    let a = square(1.0);
    let b = square(2.0);
    let tree = NodeRef::new(Compose::new([a.clone(), b.clone()]));
    let kids = tree.children();
    assert_eq!(kids.len(), 2);
    assert!(kids[0].ptr_eq(&a) && kids[1].ptr_eq(&b));
    assert!(square(1.0).children().is_empty());
}

#[test]
fn downcast_to_the_wrong_type_is_none() {
    assert!(square(1.0).downcast_ref::<Blank>().is_none());
    assert!(square(1.0).downcast_ref::<Rectangle>().is_some());
}
