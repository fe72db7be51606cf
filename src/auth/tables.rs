//! Canonical table definitions for the authentication entities
//!
//! These mirror the storage-level column metadata (nullability, defaults,
//! server-assignment) that the migration layer owns. Schema derivation in
//! [`super::schemas`] consumes them; nothing here validates anything.

use serde_json::json;

use crate::schema::{ColumnDef, TableDef};

/// `user` table: one row per registered user
pub fn user_table() -> TableDef {
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

/// `session` table: one row per active session token
pub fn session_table() -> TableDef {
    TableDef::new(
        "session",
        vec![
            ColumnDef::id(),
            ColumnDef::text("token"),
            ColumnDef::timestamp("expiresAt"),
            ColumnDef::text("ipAddress").nullable(),
            ColumnDef::text("userAgent").nullable(),
            ColumnDef::text("userId"),
            ColumnDef::timestamp("createdAt").server_assigned(),
            ColumnDef::timestamp("updatedAt").server_assigned(),
        ],
    )
}

/// `account` table: one row per linked external identity or credential
pub fn account_table() -> TableDef {
    TableDef::new(
        "account",
        vec![
            ColumnDef::id(),
            ColumnDef::text("accountId"),
            ColumnDef::text("providerId"),
            ColumnDef::text("userId"),
            ColumnDef::text("accessToken").nullable(),
            ColumnDef::text("refreshToken").nullable(),
            ColumnDef::text("idToken").nullable(),
            ColumnDef::timestamp("accessTokenExpiresAt").nullable(),
            ColumnDef::timestamp("refreshTokenExpiresAt").nullable(),
            ColumnDef::text("scope").nullable(),
            ColumnDef::text("password").nullable(),
            ColumnDef::timestamp("createdAt").server_assigned(),
            ColumnDef::timestamp("updatedAt").server_assigned(),
        ],
    )
}

/// `verification` table: short-lived verification records
pub fn verification_table() -> TableDef {
    TableDef::new(
        "verification",
        vec![
            ColumnDef::id(),
            ColumnDef::text("identifier"),
            ColumnDef::text("value"),
            ColumnDef::timestamp("expiresAt"),
            ColumnDef::timestamp("createdAt").server_assigned(),
            ColumnDef::timestamp("updatedAt").server_assigned(),
        ],
    )
}

/// `jwks` table: signing-key records
pub fn jwks_table() -> TableDef {
    TableDef::new(
        "jwks",
        vec![
            ColumnDef::id(),
            ColumnDef::text("publicKey"),
            ColumnDef::text("privateKey"),
            ColumnDef::timestamp("createdAt").server_assigned(),
        ],
    )
}
