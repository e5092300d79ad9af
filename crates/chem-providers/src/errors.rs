// Archivo: errors.rs
// Propósito: errores de los proveedores remotos (base de datos de compuestos
// y endpoint de generación) y el alias Result<T> del crate.
use thiserror::Error;

/// Errores de los proveedores remotos.
///
/// - `NotFound`: la resolución del identificador no devolvió resultados.
/// - `Http`: fallo de red o de transporte.
/// - `Status`: respuesta con estado distinto de éxito.
/// - `Malformed`: cuerpo de respuesta inesperado.
/// - `MissingCredential`: se pidió una generación sin credencial.
/// - `Config`: URL base inválida u otro error de configuración.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No encontrado: {0}")]
    NotFound(String),
    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Estado {status} en {endpoint}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("Respuesta mal formada: {0}")]
    Malformed(String),
    #[error("Credencial de generación ausente")]
    MissingCredential,
    #[error("Error de configuración: {0}")]
    Config(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, ProviderError>;
