//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user, from the session cookie or
//!   a Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireRecrutador`] -- `recrutador` or `admin`, with the company
//!   scope resolved.
//! - [`rbac::RequireCandidato`] -- requires the `candidato` role.
//! - [`rbac::RequireAuth`] -- any authenticated user.

pub mod auth;
pub mod rbac;
