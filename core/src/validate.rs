//! Fail-fast checks run before a request is built.

use crate::error::ApiError;

/// Reject an empty required parameter. No trimming: `" "` is accepted.
pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_rejected_with_field_name() {
        let err = require_non_empty("", "email").unwrap_err();
        assert!(matches!(err, ApiError::MissingField("email")));
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        assert!(require_non_empty(" ", "email").is_ok());
    }

    #[test]
    fn non_empty_value_passes() {
        assert!(require_non_empty("a@example.com", "email").is_ok());
    }
}
