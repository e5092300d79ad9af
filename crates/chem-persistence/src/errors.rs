// errors.rs
use chem_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
  #[error("Error de dominio: {0}")]
  Domain(#[from] DomainError),
  #[error("Error de validación: {0}")]
  Validation(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
