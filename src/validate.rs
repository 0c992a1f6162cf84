// Identifier validation for catalog resources

/// Check that a resource identifier is safe to hand to a content loader.
///
/// Only alphanumerics, `_`, `-`, `/` and `.` are allowed, the parent
/// directory sequence `..` is rejected, and so are absolute identifiers.
pub fn is_valid_path(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.contains("..")
        && !identifier.starts_with('/')
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '.'))
}
