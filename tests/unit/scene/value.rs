use super::*;

use crate::primitives::shapes::Blank;

static PAIR_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Pair",
    fields: &[
        FieldDesc::interp("width", FieldKind::Scalar),
        FieldDesc::fixed("label", FieldKind::Opaque),
    ],
};

#[test]
fn descriptor_lists_field_names_in_order() {
    let names: Vec<_> = PAIR_DESC.field_names().collect();
    assert_eq!(names, ["width", "label"]);
    assert!(!PAIR_DESC.fields[0].opt_out);
    assert!(PAIR_DESC.fields[1].opt_out);
}

#[test]
fn reader_decodes_fields_in_order() {
    let mut r = FieldReader::new(
        &PAIR_DESC,
        vec![Value::Scalar(3.0), Value::opaque(String::from("hi"))],
    )
    .unwrap();
    assert_eq!(r.scalar().unwrap(), 3.0);
    assert_eq!(r.opaque::<String>().unwrap(), "hi");
    r.finish().unwrap();
}

#[test]
fn reader_rejects_wrong_field_count() {
    let err = FieldReader::new(&PAIR_DESC, vec![Value::Scalar(1.0)])
        .err()
        .unwrap();
    assert!(err.is_structure_mismatch());
    assert!(err.to_string().contains("Pair expects 2 fields"), "{err}");
}

#[test]
fn reader_names_the_field_with_the_wrong_category() {
    let mut r = FieldReader::new(&PAIR_DESC, vec![Value::Bool(true), Value::Null]).unwrap();
    let err = r.scalar().unwrap_err();
    assert!(err.to_string().contains("Pair.width"), "{err}");
    assert!(err.to_string().contains("got bool"), "{err}");
}

#[test]
fn reader_rejects_opaque_of_another_type() {
    let mut r =
        FieldReader::new(&PAIR_DESC, vec![Value::Scalar(1.0), Value::opaque(7_u32)]).unwrap();
    r.scalar().unwrap();
    assert!(r.opaque::<String>().unwrap_err().is_structure_mismatch());
}

#[test]
fn finish_fails_when_fields_are_left_over() {
    let mut r = FieldReader::new(&PAIR_DESC, vec![Value::Scalar(1.0), Value::Null]).unwrap();
    r.scalar().unwrap();
    assert!(r.finish().unwrap_err().is_structure_mismatch());
}

#[test]
fn optional_color_maps_to_null() {
    assert_eq!(Value::color(None), Value::Null);
    assert_eq!(
        Value::color(Some(Color::RED)),
        Value::Hooked(Hooked::Color(Color::RED))
    );
}

#[test]
fn opaque_equality_compares_contents() {
    assert_eq!(Opaque::new(5_i32), Opaque::new(5_i32));
    assert_ne!(Opaque::new(5_i32), Opaque::new(6_i32));
    assert_ne!(Opaque::new(5_i32), Opaque::new(5_i64));
    assert_eq!(Opaque::new(5_i32).downcast_ref::<i32>(), Some(&5));
}

#[test]
fn collect_nodes_walks_nested_sequences() {
    let a = NodeRef::new(Blank::new(Rect::new(0.0, 0.0, 1.0, 1.0)));
    let b = NodeRef::new(Blank::new(Rect::new(0.0, 0.0, 2.0, 2.0)));
    let value = Value::List(vec![
        Value::Node(a.clone()),
        Value::Tuple(vec![Value::Scalar(1.0), Value::Node(b.clone())]),
    ]);
    let mut out = Vec::new();
    value.collect_nodes(&mut out);
    assert_eq!(out.len(), 2);
    assert!(out[0].ptr_eq(&a));
    assert!(out[1].ptr_eq(&b));
}
