//! Raw key validation and base-path composition.
//!
//! A raw key names an object relative to a field's base path. Valid raw
//! keys:
//! - Must be non-empty
//! - Must not start with `/`
//! - Must not contain a URI scheme marker (`://`)
//! - Must not contain `..`
//! - Must not have leading or trailing whitespace

use crate::error::{RefError, Result};

/// Validate a raw object key, returning `Ok(())` if valid.
///
/// `field` is the logical field name the key is being assigned to; it is
/// carried into the error so callers can tell which of several references
/// on a record rejected the value.
///
/// # Examples
///
/// ```
/// use locker_refs::validate_raw_key;
///
/// assert!(validate_raw_key("abc.png", "profile_image").is_ok());
/// assert!(validate_raw_key("2024/avatar.png", "profile_image").is_ok());
/// assert!(validate_raw_key("/abc.png", "profile_image").is_err());
/// assert!(validate_raw_key("../escape", "profile_image").is_err());
/// ```
pub fn validate_raw_key(key: &str, field: &str) -> Result<()> {
    if key.is_empty() {
        return Err(invalid(field, "key must not be empty"));
    }
    if key.starts_with('/') {
        return Err(invalid(field, "key must not start with '/'"));
    }
    if key.contains("://") {
        return Err(invalid(field, "key must not contain a URI scheme marker"));
    }
    if key.contains("..") {
        return Err(invalid(field, "key must not contain '..'"));
    }
    if key.trim() != key {
        return Err(invalid(
            field,
            "key must not have leading or trailing whitespace",
        ));
    }
    Ok(())
}

/// Join a base path and a raw key without duplicating separators.
///
/// An empty base path yields the key unchanged.
pub fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}/{key}")
    }
}

fn invalid(field: &str, reason: &str) -> RefError {
    RefError::InvalidKey {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_simple_keys() {
        assert!(validate_raw_key("abc.png", "f").is_ok());
        assert!(validate_raw_key("report.pdf", "f").is_ok());
        assert!(validate_raw_key("file-with_chars.0.png", "f").is_ok());
    }

    #[test]
    fn valid_nested_keys() {
        assert!(validate_raw_key("2024/05/avatar.png", "f").is_ok());
        assert!(validate_raw_key("deep/nested/path/file.bin", "f").is_ok());
    }

    #[test]
    fn reject_empty_key() {
        assert!(validate_raw_key("", "f").is_err());
    }

    #[test]
    fn reject_leading_slash() {
        assert!(validate_raw_key("/bad", "f").is_err());
        assert!(validate_raw_key("/nested/bad.png", "f").is_err());
    }

    #[test]
    fn reject_scheme_marker() {
        assert!(validate_raw_key("scheme://evil", "f").is_err());
        assert!(validate_raw_key("s3://bucket/key", "f").is_err());
    }

    #[test]
    fn reject_traversal() {
        assert!(validate_raw_key("../escape", "f").is_err());
        assert!(validate_raw_key("a/../b", "f").is_err());
        assert!(validate_raw_key("trailing..", "f").is_err());
    }

    #[test]
    fn reject_surrounding_whitespace() {
        assert!(validate_raw_key("  padded  ", "f").is_err());
        assert!(validate_raw_key(" leading", "f").is_err());
        assert!(validate_raw_key("trailing ", "f").is_err());
        assert!(validate_raw_key("inner space.png", "f").is_ok());
    }

    #[test]
    fn error_names_the_field_and_rule() {
        let err = validate_raw_key("/bad", "profile_image").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("profile_image"));
        assert!(message.contains("must not start with '/'"));
    }

    #[test]
    fn join_with_base() {
        assert_eq!(join_path("users/profile", "abc.png"), "users/profile/abc.png");
    }

    #[test]
    fn join_with_empty_base() {
        assert_eq!(join_path("", "abc.png"), "abc.png");
    }
}
