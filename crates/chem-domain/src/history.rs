// history.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};

/// Capacidad del historial de búsquedas.
pub const HISTORY_LIMIT: usize = 10;

/// Historial acotado, sin duplicados (ignorando mayúsculas) y con la
/// búsqueda más reciente primero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
  entries: Vec<String>,
}

impl SearchHistory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Construye el historial a partir de entradas ya guardadas, aplicando las
  /// mismas reglas que `insert` para tolerar datos antiguos o editados a mano.
  pub fn from_entries<I, S>(entries: I) -> Self
    where I: IntoIterator<Item = S>,
          S: Into<String>
  {
    let collected: Vec<String> = entries.into_iter().map(Into::into).collect();
    let mut history = Self::new();
    for entry in collected.into_iter().rev() {
      history.insert(&entry);
    }
    history
  }

  /// Inserta al frente. Si ya existía (sin distinguir mayúsculas) se mueve
  /// al frente con la grafía nueva.
  pub fn insert(&mut self, query: &str) {
    let query = query.trim();
    if query.is_empty() {
      return;
    }
    let lowered = query.to_lowercase();
    self.entries.retain(|e| e.to_lowercase() != lowered);
    self.entries.insert(0, query.to_string());
    self.entries.truncate(HISTORY_LIMIT);
  }

  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn to_json(&self) -> Result<String, DomainError> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn from_json(raw: &str) -> Result<Self, DomainError> {
    let entries: Vec<String> = serde_json::from_str(raw)?;
    Ok(Self::from_entries(entries))
  }
}
