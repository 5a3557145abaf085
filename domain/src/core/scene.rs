//! Scene labels produced by the classifier and the eligibility rules
//! agents apply to them.
//!
//! Scene labels stay free text on the wire; only the two predicates below
//! give them meaning inside the core.

/// Scene labels that imply people in frame.
pub const PORTRAIT_LIKE_SCENES: &[&str] = &["portrait", "street", "other"];

/// Scene assumed when classification is unavailable.
pub const UNKNOWN_SCENE: &str = "other";

/// Whether a scene label implies a face may be present.
pub fn is_portrait_like(scene: &str) -> bool {
    let scene = scene.trim().to_lowercase();
    PORTRAIT_LIKE_SCENES.contains(&scene.as_str())
}

/// Whether a scene label is a pure landscape.
pub fn is_landscape(scene: &str) -> bool {
    scene.trim().eq_ignore_ascii_case("landscape")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_like_is_case_insensitive() {
        assert!(is_portrait_like("Portrait"));
        assert!(is_portrait_like(" street "));
        assert!(is_portrait_like("other"));
        assert!(!is_portrait_like("landscape"));
        assert!(!is_portrait_like("product"));
    }

    #[test]
    fn test_landscape() {
        assert!(is_landscape("LANDSCAPE"));
        assert!(!is_landscape("interior"));
    }
}
