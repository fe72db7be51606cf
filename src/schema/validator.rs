//! Object validator derived from table definitions
//!
//! Validation semantics:
//! - Input must be a JSON object
//! - Undeclared fields are rejected; immutable fields are rejected on update
//! - Required fields must be present; non-nullable fields must not be null
//! - Types must match exactly, no coercion
//! - Defaults are filled into the normalized output
//! - Every violated field is reported in one pass, in declared-field order,
//!   followed by unknown/immutable fields in input order
//!
//! Validators are immutable after construction and perform no I/O.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult, Violation};
use super::types::{ColumnType, TableDef};

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Value kinds a field can accept
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// UTF-8 string
    Text,
    /// Boolean
    Bool,
    /// RFC 3339 datetime string
    Timestamp,
    /// Nested object validated by its own schema
    Object(Box<ObjectSchema>),
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Object(_) => "object",
        }
    }
}

impl From<ColumnType> for FieldKind {
    fn from(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Text => FieldKind::Text,
            ColumnType::Bool => FieldKind::Bool,
            ColumnType::Timestamp => FieldKind::Timestamp,
        }
    }
}

/// Per-field validation rules
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Field name as it appears on the wire
    pub name: String,
    /// Accepted value kind
    pub kind: FieldKind,
    /// Whether the field must be present
    pub required: bool,
    /// Whether explicit null is accepted
    pub nullable: bool,
    /// Whether text values must parse as an email address
    pub email: bool,
    /// Minimum length for text values, in characters
    pub min_length: Option<usize>,
    /// Value filled into the normalized output when the field is omitted
    pub default: Option<Value>,
}

impl FieldSchema {
    /// Create a required field of the given kind
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            nullable: false,
            email: false,
            min_length: None,
            default: None,
        }
    }

    /// Create a required text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Create a required text field validated as an email address
    pub fn email(name: impl Into<String>) -> Self {
        let mut field = Self::text(name);
        field.email = true;
        field
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accept explicit null
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Require a minimum length, in characters
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }
}

/// Field-level overrides applied on top of derived column rules
#[derive(Debug, Clone)]
pub enum FieldOverride {
    /// Validate the named text field as an email address
    Email(&'static str),
    /// Require the named field on insert regardless of column metadata
    Required(&'static str),
    /// Require a minimum length for the named text field
    MinLength(&'static str, usize),
    /// Fill the given value when the named field is omitted
    Default(&'static str, Value),
}

impl FieldOverride {
    fn field(&self) -> &'static str {
        match self {
            FieldOverride::Email(f)
            | FieldOverride::Required(f)
            | FieldOverride::MinLength(f, _)
            | FieldOverride::Default(f, _) => f,
        }
    }
}

/// Immutable validator over JSON objects.
///
/// Constructed once (at process start, typically) and then shared freely;
/// validation never mutates the schema or its input.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Schema name used in error reports (e.g., "user.insert")
    name: String,
    /// Ordered field rules; violation order follows this order
    fields: Vec<FieldSchema>,
    /// Field names rejected as immutable (update schemas only)
    immutable: Vec<String>,
}

impl ObjectSchema {
    /// Create a schema from explicit field rules
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
            immutable: Vec::new(),
        }
    }

    /// Derive the insert validator for a table.
    ///
    /// Server-assigned columns become optional, columns with defaults get
    /// the default filled on omission, and `overrides` tighten individual
    /// fields beyond what column metadata expresses.
    pub fn insert_from(table: &TableDef, overrides: &[FieldOverride]) -> Self {
        let mut fields = Vec::with_capacity(table.columns.len());

        for col in &table.columns {
            let mut field = FieldSchema::new(&col.name, FieldKind::from(col.column_type));
            field.nullable = col.nullable;
            field.default = col.default.clone();
            field.required = !col.nullable && !col.server_assigned && col.default.is_none();

            for ov in overrides.iter().filter(|ov| ov.field() == col.name) {
                match ov {
                    FieldOverride::Email(_) => field.email = true,
                    FieldOverride::Required(_) => field.required = true,
                    FieldOverride::MinLength(_, min) => field.min_length = Some(*min),
                    FieldOverride::Default(_, value) => field.default = Some(value.clone()),
                }
            }

            fields.push(field);
        }

        Self::new(format!("{}.insert", table.name), fields)
    }

    /// Derive the select validator for a table.
    ///
    /// Describes a row as stored: server-assigned columns are populated and
    /// required; nullable columns may be null or absent (a row assembled
    /// from a validated insert never carried them). No insert overrides.
    pub fn select_from(table: &TableDef) -> Self {
        let fields = table
            .columns
            .iter()
            .map(|col| {
                let mut field = FieldSchema::new(&col.name, FieldKind::from(col.column_type));
                field.nullable = col.nullable;
                field.required = !col.nullable;
                field
            })
            .collect();

        Self::new(format!("{}.select", table.name), fields)
    }

    /// Derive a partial update validator from an insert validator.
    ///
    /// Every field becomes optional and loses its default; `id` and
    /// `createdAt` leave the accepted set entirely and are REJECTED with
    /// `IMMUTABLE_FIELD` when supplied. Field refinements (email format,
    /// minimum lengths) survive the derivation.
    pub fn update_from(insert: &ObjectSchema) -> Self {
        const IMMUTABLE: [&str; 2] = ["id", "createdAt"];

        let table = insert
            .name
            .strip_suffix(".insert")
            .unwrap_or(insert.name.as_str());

        let fields = insert
            .fields
            .iter()
            .filter(|f| !IMMUTABLE.contains(&f.name.as_str()))
            .map(|f| {
                let mut field = f.clone();
                field.required = false;
                field.default = None;
                field
            })
            .collect();

        Self {
            name: format!("{}.update", table),
            fields,
            immutable: IMMUTABLE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field rules, in declared order
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Returns the accepted field names, in declared order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Validates a candidate value.
    ///
    /// Returns the normalized value (input plus filled defaults) on success,
    /// or a `ValidationError` listing every violated field from one pass.
    pub fn validate(&self, value: &Value) -> ValidationResult<Value> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                return Err(ValidationError::new(
                    self.name.clone(),
                    vec![Violation::type_mismatch(
                        "$root",
                        "object",
                        json_type_name(value),
                    )],
                ));
            }
        };

        let mut violations = Vec::new();
        let mut normalized = Map::new();

        // Declared fields first, in declared order
        for field in &self.fields {
            match obj.get(&field.name) {
                Some(v) => {
                    self.check_value(field, v, &field.name, &mut violations);
                    normalized.insert(field.name.clone(), v.clone());
                }
                None => {
                    if let Some(default) = &field.default {
                        normalized.insert(field.name.clone(), default.clone());
                    } else if field.required {
                        violations.push(Violation::missing_field(&field.name));
                    }
                }
            }
        }

        // Then immutable and undeclared fields, in input order
        for key in obj.keys() {
            if self.immutable.iter().any(|f| f == key) {
                violations.push(Violation::immutable_field(key));
            } else if !self.fields.iter().any(|f| f.name == *key) {
                violations.push(Violation::unknown_field(key));
            }
        }

        if violations.is_empty() {
            Ok(Value::Object(normalized))
        } else {
            Err(ValidationError::new(self.name.clone(), violations))
        }
    }

    fn check_value(
        &self,
        field: &FieldSchema,
        value: &Value,
        path: &str,
        violations: &mut Vec<Violation>,
    ) {
        if value.is_null() {
            if !field.nullable {
                violations.push(Violation::null_value(path));
            }
            return;
        }

        match &field.kind {
            FieldKind::Text => match value.as_str() {
                Some(s) => self.check_text(field, s, path, violations),
                None => violations.push(Violation::type_mismatch(
                    path,
                    "text",
                    json_type_name(value),
                )),
            },
            FieldKind::Bool => {
                if !value.is_boolean() {
                    violations.push(Violation::type_mismatch(
                        path,
                        "bool",
                        json_type_name(value),
                    ));
                }
            }
            FieldKind::Timestamp => match value.as_str() {
                Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => {}
                Some(_) => violations.push(Violation::type_mismatch(
                    path,
                    "RFC 3339 timestamp",
                    "malformed string",
                )),
                None => violations.push(Violation::type_mismatch(
                    path,
                    "timestamp",
                    json_type_name(value),
                )),
            },
            FieldKind::Object(schema) => match schema.validate(value) {
                Ok(_) => {}
                Err(err) => {
                    for v in err.violations() {
                        violations.push(Violation::new(
                            make_path(path, &v.field),
                            v.code,
                            v.message.clone(),
                        ));
                    }
                }
            },
        }
    }

    fn check_text(&self, field: &FieldSchema, s: &str, path: &str, violations: &mut Vec<Violation>) {
        if field.email && !email_regex().is_match(s) {
            violations.push(Violation::malformed_email(path));
        }

        if let Some(min) = field.min_length {
            let len = s.chars().count();
            if len < min {
                violations.push(Violation::below_min_length(path, min, len));
            }
        }
    }
}

/// Returns the JSON type name for error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name
fn make_path(prefix: &str, field: &str) -> String {
    if field == "$root" {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::ViolationCode;
    use crate::schema::types::ColumnDef;
    use serde_json::json;

    fn sample_table() -> TableDef {
        TableDef::new(
            "user",
            vec![
                ColumnDef::id(),
                ColumnDef::text("name"),
                ColumnDef::text("email"),
                ColumnDef::bool("emailVerified").default_value(json!(false)),
                ColumnDef::text("image").nullable(),
                ColumnDef::timestamp("createdAt").server_assigned(),
                ColumnDef::timestamp("updatedAt").server_assigned(),
            ],
        )
    }

    fn insert_schema() -> ObjectSchema {
        ObjectSchema::insert_from(&sample_table(), &[FieldOverride::Email("email")])
    }

    #[test]
    fn test_valid_insert_passes_and_fills_default() {
        let schema = insert_schema();
        let input = json!({ "name": "Alice", "email": "alice@example.com" });

        let output = schema.validate(&input).unwrap();
        assert_eq!(output["name"], json!("Alice"));
        assert_eq!(output["emailVerified"], json!(false));
        assert!(output.get("id").is_none());
    }

    #[test]
    fn test_missing_required_field_reported() {
        let schema = insert_schema();
        let err = schema.validate(&json!({ "email": "a@b.com" })).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "name");
        assert_eq!(err.violations()[0].code, ViolationCode::RequiredFieldMissing);
    }

    #[test]
    fn test_all_violations_reported_in_one_pass() {
        let schema = insert_schema();
        let input = json!({
            "name": 42,
            "email": "not-an-email",
            "emailVerified": "yes"
        });

        let err = schema.validate(&input).unwrap_err();
        let codes: Vec<_> = err.violations().iter().map(|v| v.code).collect();
        assert_eq!(
            codes,
            vec![
                ViolationCode::TypeMismatch,
                ViolationCode::MalformedEmail,
                ViolationCode::TypeMismatch,
            ]
        );
    }

    #[test]
    fn test_violations_follow_declared_field_order() {
        let schema = insert_schema();
        let err = schema.validate(&json!({})).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let schema = insert_schema();
        let input = json!({ "name": "Alice", "email": "a@b.com", "role": "admin" });
        let err = schema.validate(&input).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "role");
        assert_eq!(err.violations()[0].code, ViolationCode::UnknownField);
    }

    #[test]
    fn test_null_on_non_nullable_rejected() {
        let schema = insert_schema();
        let input = json!({ "name": null, "email": "a@b.com" });
        let err = schema.validate(&input).unwrap_err();
        assert_eq!(err.violations()[0].code, ViolationCode::NullValue);
    }

    #[test]
    fn test_null_on_nullable_accepted() {
        let schema = insert_schema();
        let input = json!({ "name": "Alice", "email": "a@b.com", "image": null });
        let output = schema.validate(&input).unwrap();
        assert_eq!(output["image"], Value::Null);
    }

    #[test]
    fn test_timestamp_must_be_rfc3339() {
        let schema = insert_schema();
        let good = json!({
            "name": "Alice",
            "email": "a@b.com",
            "createdAt": "2024-06-01T12:00:00Z"
        });
        assert!(schema.validate(&good).is_ok());

        let bad = json!({
            "name": "Alice",
            "email": "a@b.com",
            "createdAt": "June 1st"
        });
        let err = schema.validate(&bad).unwrap_err();
        assert_eq!(err.violations()[0].field, "createdAt");
        assert_eq!(err.violations()[0].code, ViolationCode::TypeMismatch);
    }

    #[test]
    fn test_non_object_input_rejected() {
        let schema = insert_schema();
        let err = schema.validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.violations()[0].field, "$root");
    }

    #[test]
    fn test_select_requires_server_assigned_fields() {
        let schema = ObjectSchema::select_from(&sample_table());
        let row = json!({ "name": "Alice", "email": "a@b.com", "emailVerified": false });

        let err = schema.validate(&row).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "createdAt", "updatedAt"]);
    }

    #[test]
    fn test_select_allows_absent_nullable_column() {
        let schema = ObjectSchema::select_from(&sample_table());
        let row = json!({
            "id": "u1",
            "name": "Alice",
            "email": "a@b.com",
            "emailVerified": false,
            "createdAt": "2024-06-01T12:00:00Z",
            "updatedAt": "2024-06-01T12:00:00Z"
        });
        assert!(schema.validate(&row).is_ok());
    }

    #[test]
    fn test_update_rejects_immutable_fields() {
        let update = ObjectSchema::update_from(&insert_schema());
        let err = update
            .validate(&json!({ "id": "u1", "name": "Bob" }))
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "id");
        assert_eq!(err.violations()[0].code, ViolationCode::ImmutableField);

        let err = update
            .validate(&json!({ "createdAt": "2024-06-01T12:00:00Z" }))
            .unwrap_err();
        assert_eq!(err.violations()[0].code, ViolationCode::ImmutableField);
    }

    #[test]
    fn test_update_is_partial_and_keeps_refinements() {
        let update = ObjectSchema::update_from(&insert_schema());

        // Sparse update is fine
        assert!(update.validate(&json!({ "name": "Bob" })).is_ok());

        // Email refinement survives the derivation
        let err = update.validate(&json!({ "email": "nope" })).unwrap_err();
        assert_eq!(err.violations()[0].code, ViolationCode::MalformedEmail);
    }

    #[test]
    fn test_update_does_not_fill_defaults() {
        let update = ObjectSchema::update_from(&insert_schema());
        let output = update.validate(&json!({ "name": "Bob" })).unwrap();
        assert!(output.get("emailVerified").is_none());
    }

    #[test]
    fn test_nested_object_violations_carry_full_path() {
        let inner = ObjectSchema::new("user.select", vec![FieldSchema::email("email")]);
        let outer = ObjectSchema::new(
            "userResponse",
            vec![FieldSchema::new("user", FieldKind::Object(Box::new(inner)))],
        );

        let err = outer
            .validate(&json!({ "user": { "email": "nope" } }))
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "user.email");
        assert_eq!(err.violations()[0].code, ViolationCode::MalformedEmail);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let schema = insert_schema();
        let input = json!({ "name": "Alice", "email": "alice@example.com" });

        let once = schema.validate(&input).unwrap();
        let twice = schema.validate(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_min_length_counts_characters() {
        let schema = ObjectSchema::new(
            "signIn",
            vec![FieldSchema::text("password").min_length(8)],
        );
        // 8 characters, more than 8 bytes
        assert!(schema.validate(&json!({ "password": "pässwörd" })).is_ok());
        let err = schema.validate(&json!({ "password": "pässwö" })).unwrap_err();
        assert_eq!(err.violations()[0].code, ViolationCode::BelowMinLength);
    }
}
