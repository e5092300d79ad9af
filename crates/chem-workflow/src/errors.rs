use chem_persistence::PersistenceError;
use chem_providers::ProviderError;
use thiserror::Error;

// Errores comunes del modelo de vista.
//
// `NotFound` es el único error fatal de una búsqueda. Los fallos parciales
// de datos y de generación no son errores: se notifican y la vista se
// degrada.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// La resolución del identificador no encontró el compuesto.
  #[error("Compuesto no encontrado: {0}")]
  NotFound(String),

  /// Errores de los proveedores remotos fuera del flujo degradable.
  #[error("Error de proveedor: {0}")]
  Provider(#[from] ProviderError),

  /// Errores del almacén de preferencias.
  #[error("Error de persistencia: {0}")]
  Persistence(#[from] PersistenceError),

  /// Estado interno inaccesible (mutex envenenado).
  #[error("Error de estado: {0}")]
  State(String),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
