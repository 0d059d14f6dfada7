/// Longest post slug accepted by the preview endpoint.
pub const MAX_SLUG_LEN: usize = 200;

/// Validates a post slug before it is interpolated into a CMS predicate.
/// Rules:
/// - 1-200 characters
/// - Only ASCII letters, numbers, hyphens, underscores
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return false;
    }

    slug.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
