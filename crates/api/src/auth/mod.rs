//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and refresh-token helpers.
//! - [`cookies`] -- the `vagas_token` / `vagas_refresh` session cookies.

pub mod cookies;
pub mod jwt;
pub mod password;
