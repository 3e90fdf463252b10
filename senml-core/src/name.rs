//! Resolved-name grammar (RFC 8428, 4.5.1)

use crate::ResolveError;

/// Characters allowed anywhere in a resolved name
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '.' | '/' | '_')
}

/// Check a concatenated base name + name for the record at `index`.
///
/// Emptiness is checked first, then the character set, then the leading
/// character.
pub fn validate_name(index: usize, name: &str) -> Result<(), ResolveError> {
    let Some(first) = name.chars().next() else {
        return Err(ResolveError::EmptyName { index });
    };

    if !name.chars().all(is_name_char) {
        return Err(ResolveError::invalid_name_characters(index, name));
    }

    if !first.is_ascii_alphanumeric() {
        return Err(ResolveError::invalid_name_start(index, name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in [
            "temp",
            "urn:dev:ow:10e2073a01080063:voltage",
            "3/0/5700",
            "a-b_c.d",
            "0",
        ] {
            assert!(validate_name(0, name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(1, ""), Err(ResolveError::EmptyName { index: 1 }));
    }

    #[test]
    fn test_invalid_start() {
        for name in ["-test", "_x", ":a", ".a", "/a"] {
            assert!(
                matches!(
                    validate_name(0, name),
                    Err(ResolveError::InvalidNameStart { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["test(", "a b", "caf\u{e9}", "x#y", "x\n"] {
            assert!(
                matches!(
                    validate_name(0, name),
                    Err(ResolveError::InvalidNameCharacters { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_characters_checked_before_start() {
        assert_eq!(
            validate_name(2, "-bad("),
            Err(ResolveError::invalid_name_characters(2, "-bad("))
        );
    }
}
