//! Curriculo (résumé) header, its six sections, and the assembled view.
//!
//! Section DTOs are used for both create (`POST`) and full replacement
//! (`PUT`), so cross-field rules live in struct-level `schema` validators.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};
use vagas_core::types::{Date, DbId, Timestamp};

use super::validators;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// A row from the `curriculos` table (1:1 with a candidate).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Curriculo {
    pub id: DbId,
    pub usuario_id: DbId,
    pub titulo: Option<String>,
    pub resumo: Option<String>,
    pub telefone: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Header fields written by `PUT /curriculo`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpsertCurriculo {
    #[validate(length(max = 200))]
    pub titulo: Option<String>,
    #[validate(length(max = 5000))]
    pub resumo: Option<String>,
    #[validate(length(max = 30))]
    pub telefone: Option<String>,
    #[validate(length(max = 100))]
    pub cidade: Option<String>,
    #[validate(length(equal = 2))]
    pub estado: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(url)]
    pub portfolio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Experiencia profissional
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Experiencia {
    pub id: DbId,
    pub curriculo_id: DbId,
    pub empresa: String,
    pub cargo: String,
    pub descricao: Option<String>,
    pub data_inicio: Date,
    pub data_fim: Option<Date>,
    pub atual: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_experiencia"))]
pub struct ExperienciaInput {
    #[validate(length(min = 1, max = 200))]
    pub empresa: String,
    #[validate(length(min = 1, max = 200))]
    pub cargo: String,
    #[validate(length(max = 5000))]
    pub descricao: Option<String>,
    pub data_inicio: Date,
    pub data_fim: Option<Date>,
    #[serde(default)]
    pub atual: bool,
}

fn validate_experiencia(input: &ExperienciaInput) -> Result<(), ValidationError> {
    validators::date_range(Some(input.data_inicio), input.data_fim)?;
    validators::current_flag(input.atual, input.data_fim)
}

// ---------------------------------------------------------------------------
// Formacao academica
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Formacao {
    pub id: DbId,
    pub curriculo_id: DbId,
    pub instituicao: String,
    pub curso: String,
    pub grau: String,
    pub data_inicio: Date,
    pub data_fim: Option<Date>,
    pub em_andamento: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_formacao"))]
pub struct FormacaoInput {
    #[validate(length(min = 1, max = 200))]
    pub instituicao: String,
    #[validate(length(min = 1, max = 200))]
    pub curso: String,
    #[validate(custom(function = "validators::grau"))]
    pub grau: String,
    pub data_inicio: Date,
    pub data_fim: Option<Date>,
    #[serde(default)]
    pub em_andamento: bool,
}

fn validate_formacao(input: &FormacaoInput) -> Result<(), ValidationError> {
    validators::date_range(Some(input.data_inicio), input.data_fim)?;
    validators::current_flag(input.em_andamento, input.data_fim)
}

// ---------------------------------------------------------------------------
// Habilidade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Habilidade {
    pub id: DbId,
    pub curriculo_id: DbId,
    pub nome: String,
    pub nivel: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HabilidadeInput {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,
    #[validate(custom(function = "validators::habilidade_nivel"))]
    pub nivel: String,
}

// ---------------------------------------------------------------------------
// Idioma
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Idioma {
    pub id: DbId,
    pub curriculo_id: DbId,
    pub nome: String,
    pub nivel: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdiomaInput {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,
    #[validate(custom(function = "validators::idioma_nivel"))]
    pub nivel: String,
}

// ---------------------------------------------------------------------------
// Projeto
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Projeto {
    pub id: DbId,
    pub curriculo_id: DbId,
    pub nome: String,
    pub descricao: Option<String>,
    pub url: Option<String>,
    pub data_inicio: Option<Date>,
    pub data_fim: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_projeto"))]
pub struct ProjetoInput {
    #[validate(length(min = 1, max = 200))]
    pub nome: String,
    #[validate(length(max = 5000))]
    pub descricao: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub data_inicio: Option<Date>,
    pub data_fim: Option<Date>,
}

fn validate_projeto(input: &ProjetoInput) -> Result<(), ValidationError> {
    validators::date_range(input.data_inicio, input.data_fim)
}

// ---------------------------------------------------------------------------
// Certificacao
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Certificacao {
    pub id: DbId,
    pub curriculo_id: DbId,
    pub nome: String,
    pub instituicao: String,
    pub data_emissao: Date,
    pub data_expiracao: Option<Date>,
    pub credencial_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_certificacao"))]
pub struct CertificacaoInput {
    #[validate(length(min = 1, max = 200))]
    pub nome: String,
    #[validate(length(min = 1, max = 200))]
    pub instituicao: String,
    pub data_emissao: Date,
    pub data_expiracao: Option<Date>,
    #[validate(url)]
    pub credencial_url: Option<String>,
}

fn validate_certificacao(input: &CertificacaoInput) -> Result<(), ValidationError> {
    validators::date_range(Some(input.data_emissao), input.data_expiracao)
}

// ---------------------------------------------------------------------------
// Assembled view
// ---------------------------------------------------------------------------

/// The header plus every section, as returned by `GET /curriculo`.
#[derive(Debug, Clone, Serialize)]
pub struct CurriculoCompleto {
    #[serde(flatten)]
    pub curriculo: Curriculo,
    pub experiencias: Vec<Experiencia>,
    pub formacoes: Vec<Formacao>,
    pub habilidades: Vec<Habilidade>,
    pub idiomas: Vec<Idioma>,
    pub projetos: Vec<Projeto>,
    pub certificacoes: Vec<Certificacao>,
}
