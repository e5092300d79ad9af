// Archivo: preference_store.rs
// Propósito: contrato del almacén clave/valor duradero y su implementación
// en memoria para pruebas.
use crate::errors::{PersistenceError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Almacén clave/valor de cadenas.
pub trait PreferenceStore: Send + Sync {
  /// Valor guardado bajo `key`, si existe.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Inserta o reemplaza el valor de `key`.
  fn set(&self, key: &str, value: &str) -> Result<()>;

  /// Elimina `key`. No es error si no existía.
  fn remove(&self, key: &str) -> Result<()>;
}

/// Implementación en memoria (no duradera).
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
  values: Mutex<HashMap<String, String>>,
}

impl InMemoryPreferenceStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
    self.values
        .lock()
        .map_err(|e| PersistenceError::Storage(format!("mutex poisoned: {:?}", e)))
  }
}

impl PreferenceStore for InMemoryPreferenceStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.lock()?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.lock()?.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.lock()?.remove(key);
    Ok(())
  }
}
