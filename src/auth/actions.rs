//! Standalone request and response validators
//!
//! Not tied to a stored entity: these validate inbound payloads for the
//! auth actions and shape the outbound user response. Same contract as the
//! entity validators (full-object validation, multi-field error reporting,
//! no side effects).

use crate::schema::{FieldKind, FieldSchema, ObjectSchema};

use super::schemas::select_user_schema;

/// Sign-in request: email plus password of at least 8 characters
pub fn sign_in_schema() -> ObjectSchema {
    ObjectSchema::new(
        "signIn",
        vec![
            FieldSchema::email("email"),
            FieldSchema::text("password").min_length(8),
        ],
    )
}

/// Sign-up request: non-empty name, email, password of at least 8 characters
pub fn sign_up_schema() -> ObjectSchema {
    ObjectSchema::new(
        "signUp",
        vec![
            FieldSchema::text("name").min_length(1),
            FieldSchema::email("email"),
            FieldSchema::text("password").min_length(8),
        ],
    )
}

/// Password-reset request: email only
pub fn reset_password_schema() -> ObjectSchema {
    ObjectSchema::new("resetPassword", vec![FieldSchema::email("email")])
}

/// Email-verification request: non-empty token
pub fn verify_email_schema() -> ObjectSchema {
    ObjectSchema::new(
        "verifyEmail",
        vec![FieldSchema::text("token").min_length(1)],
    )
}

/// Outbound response wrapper: a validated user select-shape under `user`
pub fn user_response_schema() -> ObjectSchema {
    ObjectSchema::new(
        "userResponse",
        vec![FieldSchema::new(
            "user",
            FieldKind::Object(Box::new(select_user_schema())),
        )],
    )
}
