use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ClipcheckError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ClipcheckError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(ClipcheckError::io("x").to_string().contains("io error:"));
    assert!(
        ClipcheckError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ClipcheckError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
