// Input validation for analysis submissions.
//
// Pure and synchronous: the same text always yields the same verdict, and no
// state is touched. Rules are applied in order and the first failure wins.

use thiserror::Error;

/// Minimum number of characters (after trimming) a submission must contain.
pub const MIN_CHARS: usize = 10;

/// Why a submission was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing but whitespace was entered.
    #[error("input is empty")]
    Empty,
    /// Fewer than [`MIN_CHARS`] characters after trimming.
    #[error("input is shorter than {MIN_CHARS} characters")]
    TooShort,
}

impl ValidationError {
    /// Stable machine-readable code (`"empty"` / `"too_short"`).
    pub fn code(self) -> &'static str {
        match self {
            ValidationError::Empty => "empty",
            ValidationError::TooShort => "too_short",
        }
    }
}

/// Check whether `text` may be submitted for analysis.
///
/// Length is counted in characters, not bytes, so multi-byte input is
/// measured the way the user sees it.
pub fn validate(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() < MIN_CHARS {
        return Err(ValidationError::TooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_empty() {
        assert_eq!(validate(""), Err(ValidationError::Empty));
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(validate("   \t\n  "), Err(ValidationError::Empty));
    }

    #[test]
    fn every_length_below_minimum_is_too_short() {
        for len in 1..MIN_CHARS {
            let text = "a".repeat(len);
            assert_eq!(
                validate(&text),
                Err(ValidationError::TooShort),
                "length {len} should be too short"
            );
        }
    }

    #[test]
    fn exactly_minimum_passes() {
        assert_eq!(validate(&"a".repeat(MIN_CHARS)), Ok(()));
    }

    #[test]
    fn surrounding_whitespace_does_not_count() {
        // 9 visible characters padded to well over 10 bytes.
        assert_eq!(validate("    abcdefghi     "), Err(ValidationError::TooShort));
        assert_eq!(validate("    abcdefghij    "), Ok(()));
    }

    #[test]
    fn interior_whitespace_counts() {
        assert_eq!(validate("a b c d e "), Err(ValidationError::TooShort));
        assert_eq!(validate("a b c d e f"), Ok(()));
    }

    #[test]
    fn length_is_measured_in_chars_not_bytes() {
        // Five CJK characters are 15 bytes but only 5 chars.
        assert_eq!(validate("大谷翔平さ"), Err(ValidationError::TooShort));
        assert_eq!(validate("今日はとても嬉しいです"), Ok(()));
    }

    #[test]
    fn scenario_short_input() {
        assert_eq!(validate("ok"), Err(ValidationError::TooShort));
    }

    #[test]
    fn validation_is_idempotent() {
        let text = "I feel really happy today because of good news";
        assert_eq!(validate(text), validate(text));
        assert_eq!(validate("ok"), validate("ok"));
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ValidationError::Empty.code(), "empty");
        assert_eq!(ValidationError::TooShort.code(), "too_short");
    }
}
