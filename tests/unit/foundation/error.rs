use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StoryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StoryError::layout("x").to_string().contains("layout error:"));
    assert!(
        StoryError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(StoryError::render("x").to_string().contains("render error:"));
    assert!(StoryError::encode("x").to_string().contains("encode error:"));
    assert!(
        StoryError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StoryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
