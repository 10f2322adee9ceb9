use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PanError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PanError::missing_geometry("angle")
            .to_string()
            .contains("missing geometry: angle")
    );
    assert!(
        PanError::placement("x")
            .to_string()
            .contains("placement error:")
    );
    assert!(PanError::render("x").to_string().contains("render error:"));
    assert!(
        PanError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(PanError::Cancelled.to_string(), "operation cancelled");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PanError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
