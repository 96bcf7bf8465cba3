//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any `PgExecutor`, where the call may run inside a
//! caller-owned transaction) as the first argument.
//!
//! Methods suffixed `_scoped` take the owning id (`curriculo_id`,
//! `empresa_id`) and only touch rows that belong to it, so an out-of-scope
//! id behaves exactly like a missing one.

pub mod candidatura_evento_repo;
pub mod candidatura_repo;
pub mod certificacao_repo;
pub mod curriculo_repo;
pub mod dashboard_repo;
pub mod empresa_repo;
pub mod experiencia_repo;
pub mod formacao_repo;
pub mod habilidade_repo;
pub mod idioma_repo;
pub mod projeto_repo;
pub mod role_repo;
pub mod session_repo;
pub mod usuario_repo;
pub mod vaga_repo;

pub use candidatura_evento_repo::CandidaturaEventoRepo;
pub use candidatura_repo::CandidaturaRepo;
pub use certificacao_repo::CertificacaoRepo;
pub use curriculo_repo::CurriculoRepo;
pub use dashboard_repo::DashboardRepo;
pub use empresa_repo::EmpresaRepo;
pub use experiencia_repo::ExperienciaRepo;
pub use formacao_repo::FormacaoRepo;
pub use habilidade_repo::HabilidadeRepo;
pub use idioma_repo::IdiomaRepo;
pub use projeto_repo::ProjetoRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use usuario_repo::UsuarioRepo;
pub use vaga_repo::VagaRepo;
