use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AviaryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AviaryError::synthesis("x")
            .to_string()
            .contains("synthesis error:")
    );
    assert!(
        AviaryError::missing_resource("x")
            .to_string()
            .contains("missing resource:")
    );
    assert!(AviaryError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AviaryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
