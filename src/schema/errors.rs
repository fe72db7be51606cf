//! Validation error taxonomy
//!
//! A failed validation carries an ordered list of violations, one per
//! offending field, each with a machine-readable code. There is no other
//! error category in this layer; callers decide how to surface failures.

use std::fmt;

use thiserror::Error;

/// Machine-readable violation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    /// Required field absent from the input
    RequiredFieldMissing,
    /// Value type does not match the field's declared type
    TypeMismatch,
    /// Explicit null on a non-nullable field
    NullValue,
    /// String does not parse as an email address
    MalformedEmail,
    /// String shorter than the field's minimum length
    BelowMinLength,
    /// Field not declared by the schema
    UnknownField,
    /// Field is immutable and may not appear in an update
    ImmutableField,
}

impl ViolationCode {
    /// Returns the string code reported to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCode::RequiredFieldMissing => "REQUIRED_FIELD_MISSING",
            ViolationCode::TypeMismatch => "TYPE_MISMATCH",
            ViolationCode::NullValue => "NULL_VALUE",
            ViolationCode::MalformedEmail => "MALFORMED_EMAIL",
            ViolationCode::BelowMinLength => "BELOW_MIN_LENGTH",
            ViolationCode::UnknownField => "UNKNOWN_FIELD",
            ViolationCode::ImmutableField => "IMMUTABLE_FIELD",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path (e.g., "email", "user.createdAt")
    pub field: String,
    /// Violated rule
    pub code: ViolationCode,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("required field '{}' is missing", field);
        Self::new(field, ViolationCode::RequiredFieldMissing, message)
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        let field = field.into();
        let message = format!("field '{}': expected {}, got {}", field, expected, actual);
        Self::new(field, ViolationCode::TypeMismatch, message)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("field '{}' must not be null", field);
        Self::new(field, ViolationCode::NullValue, message)
    }

    pub fn malformed_email(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("field '{}' is not a valid email address", field);
        Self::new(field, ViolationCode::MalformedEmail, message)
    }

    pub fn below_min_length(field: impl Into<String>, min: usize, actual: usize) -> Self {
        let field = field.into();
        let message = format!(
            "field '{}' must be at least {} character(s), got {}",
            field, min, actual
        );
        Self::new(field, ViolationCode::BelowMinLength, message)
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("field '{}' is not declared by the schema", field);
        Self::new(field, ViolationCode::UnknownField, message)
    }

    pub fn immutable_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("field '{}' is immutable and cannot be updated", field);
        Self::new(field, ViolationCode::ImmutableField, message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Validation failure with every violated field from a single pass
#[derive(Debug, Clone, Error)]
#[error("validation of '{schema}' failed: {}", summary(.violations))]
pub struct ValidationError {
    /// Name of the schema that rejected the input
    schema: String,
    /// Violations in deterministic order (declared fields first)
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Create a validation error; `violations` must be non-empty
    pub fn new(schema: impl Into<String>, violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self {
            schema: schema.into(),
            violations,
        }
    }

    /// Returns the schema name
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns every violation, in order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true if any violation carries the given code
    pub fn has_code(&self, code: ViolationCode) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_codes() {
        assert_eq!(
            ViolationCode::RequiredFieldMissing.as_str(),
            "REQUIRED_FIELD_MISSING"
        );
        assert_eq!(ViolationCode::MalformedEmail.as_str(), "MALFORMED_EMAIL");
        assert_eq!(ViolationCode::BelowMinLength.as_str(), "BELOW_MIN_LENGTH");
        assert_eq!(ViolationCode::ImmutableField.as_str(), "IMMUTABLE_FIELD");
    }

    #[test]
    fn test_violation_display_includes_code_and_field() {
        let v = Violation::below_min_length("password", 8, 5);
        let display = v.to_string();
        assert!(display.contains("BELOW_MIN_LENGTH"));
        assert!(display.contains("password"));
        assert!(display.contains('8'));
    }

    #[test]
    fn test_error_lists_every_violation() {
        let err = ValidationError::new(
            "signIn",
            vec![
                Violation::malformed_email("email"),
                Violation::below_min_length("password", 8, 5),
            ],
        );
        assert_eq!(err.violations().len(), 2);
        assert!(err.has_code(ViolationCode::MalformedEmail));
        assert!(err.has_code(ViolationCode::BelowMinLength));
        assert!(!err.has_code(ViolationCode::UnknownField));

        let display = err.to_string();
        assert!(display.contains("signIn"));
        assert!(display.contains("email"));
        assert!(display.contains("password"));
    }

    #[test]
    fn test_violation_order_preserved() {
        let err = ValidationError::new(
            "user.insert",
            vec![
                Violation::missing_field("email"),
                Violation::null_value("name"),
            ],
        );
        assert_eq!(err.violations()[0].code, ViolationCode::RequiredFieldMissing);
        assert_eq!(err.violations()[1].code, ViolationCode::NullValue);
    }
}
