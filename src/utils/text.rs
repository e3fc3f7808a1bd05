/// Case-insensitive substring test using ASCII folding only.
///
/// Non-ASCII characters are compared as-is, so `"É"` does not match `"é"`.
/// An empty needle matches every haystack.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Treats `None` and whitespace-only input as "leave unchanged"
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
