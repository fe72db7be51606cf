//! # Authentication Data Model
//!
//! Row schemas and request-body schemas for the authentication subsystem:
//! users, sessions, linked accounts, verification tokens, and JWKS entries.
//!
//! This module owns no behavior beyond validation. Persistence, session
//! lifecycle, password hashing, and key rotation live with the callers
//! that consume these schemas at their boundary.

pub mod actions;
pub mod schemas;
pub mod tables;
pub mod types;

pub use actions::{
    reset_password_schema, sign_in_schema, sign_up_schema, user_response_schema,
    verify_email_schema,
};
pub use schemas::AuthSchemas;
pub use types::{
    Account, InsertAccount, InsertJwks, InsertSession, InsertUser, InsertVerification, Jwks,
    ResetPassword, SelectSession, SelectUser, Session, SignIn, SignUp, UpdateUser, User,
    UserResponse, Verification, VerifyEmail,
};
