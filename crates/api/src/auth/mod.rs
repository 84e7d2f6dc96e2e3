//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and opaque refresh-token helpers.
//! - [`basic`] -- `Authorization: Basic` header parsing.

pub mod basic;
pub mod jwt;
pub mod password;
