//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - An update DTO (all `Option` fields) where partial updates make sense

pub mod candidatura;
pub mod curriculo;
pub mod dashboard;
pub mod empresa;
pub mod role;
pub mod session;
pub mod status;
pub mod usuario;
pub mod vaga;

mod validators;
