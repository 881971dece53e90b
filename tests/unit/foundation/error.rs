use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FloeError::structure_mismatch("x")
            .to_string()
            .contains("structure mismatch:")
    );
    assert!(
        FloeError::domain_range("x")
            .to_string()
            .contains("domain range error:")
    );
    assert!(FloeError::empty_path("x").to_string().contains("empty path:"));
    assert!(
        FloeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FloeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn within_prefixes_only_structure_mismatches() {
    let err = FloeError::structure_mismatch("rect: category differs")
        .within("Rectangle")
        .within("Compose.children[1]");
    assert_eq!(
        err.to_string(),
        "structure mismatch: Compose.children[1].Rectangle.rect: category differs"
    );

    let err = FloeError::domain_range("bad").within("Rectangle");
    assert_eq!(err.to_string(), "domain range error: bad");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FloeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: FloeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, FloeError::Serde(_)));
}
