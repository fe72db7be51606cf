//! Schema derivation and validation machinery
//!
//! # Design Principles
//!
//! - Validators are derived from table definitions, never hand-synced
//! - Validation reports every violated field in one pass
//! - Validators are immutable once constructed and free of side effects
//! - No coercion: types must match exactly, defaults are filled explicitly

mod errors;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationResult, Violation, ViolationCode};
pub use types::{ColumnDef, ColumnType, TableDef};
pub use validator::{FieldKind, FieldOverride, FieldSchema, ObjectSchema};
