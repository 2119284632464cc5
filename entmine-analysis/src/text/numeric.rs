//! Numeric character references (`&#65;`, `&#x41;`).

/// Parse the digits of a numeric reference starting at byte `at`, which is
/// just past the `&#` prefix.
///
/// Returns the decoded character and the byte offset after the reference,
/// including an optional trailing `;`. Empty digit runs, values that do not
/// fit in `u32`, surrogates and values above U+10FFFF are rejected.
pub fn parse_numeric_reference(text: &str, at: usize) -> Option<(char, usize)> {
    let bytes = text.as_bytes();
    let (radix, digits_start) = match bytes.get(at) {
        Some(b'x') | Some(b'X') => (16, at + 1),
        Some(_) => (10, at),
        None => return None,
    };

    let mut end = digits_start;
    let mut value: u32 = 0;
    while let Some(&b) = bytes.get(end) {
        let Some(digit) = (b as char).to_digit(radix) else {
            break;
        };
        value = value.checked_mul(radix)?.checked_add(digit)?;
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    let decoded = char::from_u32(value)?;
    if bytes.get(end) == Some(&b';') {
        end += 1;
    }
    Some((decoded, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_and_hex() {
        assert_eq!(parse_numeric_reference("65;", 0), Some(('A', 3)));
        assert_eq!(parse_numeric_reference("x41;", 0), Some(('A', 4)));
        assert_eq!(parse_numeric_reference("X41", 0), Some(('A', 3)));
    }

    #[test]
    fn semicolon_is_optional() {
        assert_eq!(parse_numeric_reference("65 apples", 0), Some(('A', 2)));
    }

    #[test]
    fn supplementary_plane() {
        assert_eq!(parse_numeric_reference("128512;", 0), Some(('\u{1F600}', 7)));
    }

    #[test]
    fn rejects_invalid() {
        assert_eq!(parse_numeric_reference("", 0), None);
        assert_eq!(parse_numeric_reference("x", 0), None);
        assert_eq!(parse_numeric_reference("x;", 0), None);
        assert_eq!(parse_numeric_reference(";", 0), None);
        assert_eq!(parse_numeric_reference("55296;", 0), None);
        assert_eq!(parse_numeric_reference("1114112;", 0), None);
        assert_eq!(parse_numeric_reference("99999999999999;", 0), None);
    }
}
