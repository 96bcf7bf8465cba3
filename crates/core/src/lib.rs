//! Domain layer for the Vagas UNA job board.
//!
//! Holds everything that does not need a database or an HTTP stack: shared
//! type aliases, the domain error, role names, the candidacy status
//! lifecycle, and field validators used by both `vagas-db` DTOs and
//! `vagas-api` handlers.

pub mod candidatura;
pub mod curriculo;
pub mod empresa;
pub mod error;
pub mod roles;
pub mod search;
pub mod types;
pub mod vaga;
