//! Column and table definitions
//!
//! Supported base types:
//! - text: UTF-8 string
//! - bool: Boolean
//! - timestamp: RFC 3339 datetime string
//!
//! Columns carry the storage-level metadata (nullability, defaults,
//! server-assignment) that insert/select/update derivation needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 string
    Text,
    /// Boolean
    Bool,
    /// RFC 3339 datetime
    Timestamp,
}

impl ColumnType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Bool => "bool",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name as it appears on the wire
    pub name: String,
    /// Base data type
    pub column_type: ColumnType,
    /// Whether the column accepts explicit null
    #[serde(default)]
    pub nullable: bool,
    /// Whether the server assigns the value (id, createdAt, updatedAt);
    /// server-assigned columns are optional on insert, required on select
    #[serde(default)]
    pub server_assigned: bool,
    /// Default value filled in when the column is omitted on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ColumnDef {
    /// Create a non-null text column
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Text,
            nullable: false,
            server_assigned: false,
            default: None,
        }
    }

    /// Create a non-null bool column
    pub fn bool(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Bool,
            nullable: false,
            server_assigned: false,
            default: None,
        }
    }

    /// Create a non-null timestamp column
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Timestamp,
            nullable: false,
            server_assigned: false,
            default: None,
        }
    }

    /// Create the server-assigned primary key column
    pub fn id() -> Self {
        Self::text("id").server_assigned()
    }

    /// Mark the column nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column server-assigned
    pub fn server_assigned(mut self) -> Self {
        self.server_assigned = true;
        self
    }

    /// Set a default value filled on insert when the column is omitted
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Canonical table definition consumed by schema derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name
    pub name: String,
    /// Ordered column definitions; violation order follows column order
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Create a new table definition
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Validates the table structure itself (not a row)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.column("id").is_none() {
            return Err(format!("Table '{}' must define an 'id' column", self.name));
        }

        for (i, col) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == col.name) {
                return Err(format!(
                    "Table '{}' declares column '{}' more than once",
                    self.name, col.name
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> TableDef {
        TableDef::new(
            "user",
            vec![
                ColumnDef::id(),
                ColumnDef::text("email"),
                ColumnDef::bool("emailVerified").default_value(json!(false)),
                ColumnDef::timestamp("createdAt").server_assigned(),
            ],
        )
    }

    #[test]
    fn test_table_structure_valid() {
        assert!(sample_table().validate_structure().is_ok());
    }

    #[test]
    fn test_table_missing_id_column() {
        let table = TableDef::new("user", vec![ColumnDef::text("email")]);
        let result = table.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("id"));
    }

    #[test]
    fn test_table_rejects_duplicate_columns() {
        let table = TableDef::new(
            "user",
            vec![ColumnDef::id(), ColumnDef::text("email"), ColumnDef::text("email")],
        );
        let result = table.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("more than once"));
    }

    #[test]
    fn test_column_lookup() {
        let table = sample_table();
        assert!(table.column("email").is_some());
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_column_builders() {
        let col = ColumnDef::timestamp("expiresAt");
        assert_eq!(col.column_type, ColumnType::Timestamp);
        assert!(!col.nullable);
        assert!(!col.server_assigned);

        let col = ColumnDef::timestamp("accessTokenExpiresAt").nullable();
        assert!(col.nullable);

        let col = ColumnDef::id();
        assert_eq!(col.name, "id");
        assert!(col.server_assigned);
    }

    #[test]
    fn test_column_type_names() {
        assert_eq!(ColumnType::Text.type_name(), "text");
        assert_eq!(ColumnType::Bool.type_name(), "bool");
        assert_eq!(ColumnType::Timestamp.type_name(), "timestamp");
    }
}
