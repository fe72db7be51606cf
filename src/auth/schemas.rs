//! Derived entity validators
//!
//! One insert and one select validator per entity, plus the partial update
//! validator for users. Insert derivations apply the same field-level
//! overrides the original table definitions call for: strict email format
//! on `user.email` and the `emailVerified` default.

use serde_json::json;

use crate::schema::{FieldOverride, ObjectSchema};

use super::tables;

/// Insert validator for `user` rows
pub fn insert_user_schema() -> ObjectSchema {
    ObjectSchema::insert_from(
        &tables::user_table(),
        &[
            FieldOverride::Email("email"),
            FieldOverride::Default("emailVerified", json!(false)),
        ],
    )
}

/// Select validator for `user` rows
pub fn select_user_schema() -> ObjectSchema {
    ObjectSchema::select_from(&tables::user_table())
}

/// Partial update validator for `user` rows.
///
/// Supplying `id` or `createdAt` is rejected with `IMMUTABLE_FIELD`,
/// not silently stripped.
pub fn update_user_schema() -> ObjectSchema {
    ObjectSchema::update_from(&insert_user_schema())
}

/// Insert validator for `session` rows; `expiresAt` is mandatory
pub fn insert_session_schema() -> ObjectSchema {
    ObjectSchema::insert_from(
        &tables::session_table(),
        &[FieldOverride::Required("expiresAt")],
    )
}

/// Select validator for `session` rows
pub fn select_session_schema() -> ObjectSchema {
    ObjectSchema::select_from(&tables::session_table())
}

/// Insert validator for `account` rows; both token expiries stay nullable
pub fn insert_account_schema() -> ObjectSchema {
    ObjectSchema::insert_from(&tables::account_table(), &[])
}

/// Select validator for `account` rows
pub fn select_account_schema() -> ObjectSchema {
    ObjectSchema::select_from(&tables::account_table())
}

/// Insert validator for `verification` rows; `expiresAt` is mandatory
pub fn insert_verification_schema() -> ObjectSchema {
    ObjectSchema::insert_from(
        &tables::verification_table(),
        &[FieldOverride::Required("expiresAt")],
    )
}

/// Select validator for `verification` rows
pub fn select_verification_schema() -> ObjectSchema {
    ObjectSchema::select_from(&tables::verification_table())
}

/// Insert validator for `jwks` rows
pub fn insert_jwks_schema() -> ObjectSchema {
    ObjectSchema::insert_from(&tables::jwks_table(), &[])
}

/// Select validator for `jwks` rows
pub fn select_jwks_schema() -> ObjectSchema {
    ObjectSchema::select_from(&tables::jwks_table())
}

/// Registry of every entity validator, built once at process start.
///
/// Construction is pure; the registry is immutable afterwards and can be
/// shared across threads without coordination.
#[derive(Debug, Clone)]
pub struct AuthSchemas {
    pub insert_user: ObjectSchema,
    pub select_user: ObjectSchema,
    pub update_user: ObjectSchema,
    pub insert_session: ObjectSchema,
    pub select_session: ObjectSchema,
    pub insert_account: ObjectSchema,
    pub select_account: ObjectSchema,
    pub insert_verification: ObjectSchema,
    pub select_verification: ObjectSchema,
    pub insert_jwks: ObjectSchema,
    pub select_jwks: ObjectSchema,
}

impl AuthSchemas {
    /// Build every derived validator from the canonical table definitions
    pub fn new() -> Self {
        Self {
            insert_user: insert_user_schema(),
            select_user: select_user_schema(),
            update_user: update_user_schema(),
            insert_session: insert_session_schema(),
            select_session: select_session_schema(),
            insert_account: insert_account_schema(),
            select_account: select_account_schema(),
            insert_verification: insert_verification_schema(),
            select_verification: select_verification_schema(),
            insert_jwks: insert_jwks_schema(),
            select_jwks: select_jwks_schema(),
        }
    }
}

impl Default for AuthSchemas {
    fn default() -> Self {
        Self::new()
    }
}
