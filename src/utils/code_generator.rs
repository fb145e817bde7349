//! Short code generation and validation utilities.

use rand::Rng;

/// Alphabet for generated codes: `[A-Za-z0-9]`.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated code. 62^6 is roughly 5.7e10 combinations.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Maximum length of a custom code, in characters.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 20;

/// Generates a random 6-character alphanumeric short code.
///
/// Not guaranteed unique; the caller must insert it and retry on collision.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is acceptable as a caller-chosen short code.
///
/// # Rules
///
/// - Non-empty, at most 20 characters
/// - Every character is alphanumeric, `-` or `_`
///
/// Alphanumeric is the Unicode notion, so letters such as `é` pass while
/// whitespace and punctuation do not.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_custom_code("My-Code_1"));
/// assert!(!is_valid_custom_code("bad code!"));
/// ```
pub fn is_valid_custom_code(code: &str) -> bool {
    if code.is_empty() || code.chars().count() > MAX_CUSTOM_CODE_LENGTH {
        return false;
    }

    code.chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_ascii_alphanumeric_only() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // Collisions are possible but vanishingly rare at this sample size.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_generated_codes_are_valid_custom_codes() {
        assert!(is_valid_custom_code(&generate_code()));
    }

    #[test]
    fn test_validate_mixed_case_hyphen_underscore() {
        assert!(is_valid_custom_code("My-Code_1"));
    }

    #[test]
    fn test_validate_single_character() {
        assert!(is_valid_custom_code("a"));
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(is_valid_custom_code(&"a".repeat(20)));
        assert!(!is_valid_custom_code(&"a".repeat(21)));
    }

    #[test]
    fn test_validate_length_counts_characters() {
        assert!(is_valid_custom_code(&"é".repeat(20)));
        assert!(!is_valid_custom_code(&"é".repeat(21)));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(!is_valid_custom_code(""));
    }

    #[test]
    fn test_validate_space_and_bang() {
        assert!(!is_valid_custom_code("bad code!"));
    }

    #[test]
    fn test_validate_rejects_punctuation() {
        for code in ["a.b", "a/b", "a?b", "a#b", "a%20", "tab\there", "a«b»"] {
            assert!(!is_valid_custom_code(code), "{code} should be rejected");
        }
    }

    #[test]
    fn test_validate_unicode_letters_and_digits() {
        assert!(is_valid_custom_code("café"));
        assert!(is_valid_custom_code("ссылка"));
        assert!(is_valid_custom_code("٣٤"));
    }
}
