//! Page title normalization.

/// Normalize a link target or page title.
///
/// Trims, turns line breaks into spaces, drops a `#fragment` and upper-cases
/// the first character. Returns `None` for empty titles and for links that
/// only name a fragment of the current page.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('#') {
        return None;
    }
    let without_fragment = match trimmed.find('#') {
        Some(i) => trimmed[..i].trim_end(),
        None => trimmed,
    };

    let mut chars = without_fragment.chars();
    let first = chars.next()?;
    let mut title = String::with_capacity(without_fragment.len());
    title.extend(first.to_uppercase());
    for c in chars {
        match c {
            '\n' | '\r' => title.push(' '),
            _ => title.push(c),
        }
    }
    Some(title)
}

#[cfg(test)]
mod tests {
    use super::normalize_title;

    #[test]
    fn normalizes() {
        assert_eq!(normalize_title("berlin").as_deref(), Some("Berlin"));
        assert_eq!(normalize_title(" Berlin#History ").as_deref(), Some("Berlin"));
        assert_eq!(normalize_title("New\nYork").as_deref(), Some("New York"));
        assert_eq!(normalize_title("élan").as_deref(), Some("Élan"));
        assert_eq!(normalize_title("#Section"), None);
        assert_eq!(normalize_title("   "), None);
    }
}
