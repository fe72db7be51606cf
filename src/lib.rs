//! authschema - typed validation schemas for an authentication subsystem
//!
//! Derives insert/select/update validators from canonical table definitions
//! and exposes named shapes for everything that passes validation.

pub mod auth;
pub mod schema;
