use serde_json::Value;

use crate::error::AppError;

/// Unique index guarding store slugs.
pub const STORE_SLUG_CONSTRAINT: &str = "stores_slug_key";

/// Unique index guarding account emails.
pub const ACCOUNT_EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Returns true if `e` is a conflict raised by the named unique constraint.
pub fn is_unique_violation_on(e: &AppError, constraint: &str) -> bool {
    let AppError::Conflict { details, .. } = e else {
        return false;
    };

    matches!(details.get("constraint"), Some(Value::String(c)) if c == constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_named_constraint() {
        let err = AppError::conflict("dup", json!({ "constraint": "stores_slug_key" }));
        assert!(is_unique_violation_on(&err, STORE_SLUG_CONSTRAINT));
        assert!(!is_unique_violation_on(&err, ACCOUNT_EMAIL_CONSTRAINT));
    }

    #[test]
    fn test_other_errors_do_not_match() {
        let err = AppError::internal("boom", json!({}));
        assert!(!is_unique_violation_on(&err, STORE_SLUG_CONSTRAINT));
    }
}
