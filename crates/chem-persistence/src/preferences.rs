// Archivo: preferences.rs
// Propósito: `PersistentPreferences`, vista tipada sobre un
// `PreferenceStore`: historial de búsquedas, última búsqueda, tema y
// credencial del servicio de generación.
use crate::errors::{PersistenceError, Result};
use crate::preference_store::PreferenceStore;
use chem_domain::SearchHistory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const KEY_SEARCH_HISTORY: &str = "searchHistory";
pub const KEY_LAST_QUERY: &str = "lastQuery";
pub const KEY_THEME: &str = "themeChoice";
pub const KEY_CREDENTIAL: &str = "generationCredential";

/// Tema visual elegido por el usuario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  pub fn toggled(self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for Theme {
  type Err = PersistenceError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "light" => Ok(Theme::Light),
      "dark" => Ok(Theme::Dark),
      other => Err(PersistenceError::Validation(format!("tema desconocido: {}", other))),
    }
  }
}

/// Preferencias duraderas del usuario.
#[derive(Clone)]
pub struct PersistentPreferences {
  store: Arc<dyn PreferenceStore>,
}

impl PersistentPreferences {
  pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
    Self { store }
  }

  /// Historial guardado. Un valor corrupto se descarta y se registra un
  /// aviso.
  pub fn history(&self) -> Result<SearchHistory> {
    match self.store.get(KEY_SEARCH_HISTORY)? {
      Some(raw) => match SearchHistory::from_json(&raw) {
        Ok(h) => Ok(h),
        Err(e) => {
          log::warn!("historial corrupto, se ignora: {}", e);
          Ok(SearchHistory::new())
        }
      },
      None => Ok(SearchHistory::new()),
    }
  }

  /// Registra una búsqueda en el historial y como última búsqueda.
  pub fn record_search(&self, query: &str) -> Result<SearchHistory> {
    let mut history = self.history()?;
    history.insert(query);
    self.store.set(KEY_SEARCH_HISTORY, &history.to_json()?)?;
    self.store.set(KEY_LAST_QUERY, query.trim())?;
    Ok(history)
  }

  pub fn clear_history(&self) -> Result<()> {
    self.store.remove(KEY_SEARCH_HISTORY)
  }

  pub fn last_query(&self) -> Result<Option<String>> {
    self.store.get(KEY_LAST_QUERY)
  }

  /// Tema guardado; un valor desconocido equivale al tema claro.
  pub fn theme(&self) -> Result<Theme> {
    Ok(self.store
           .get(KEY_THEME)?
           .and_then(|raw| raw.parse::<Theme>().ok())
           .unwrap_or_default())
  }

  pub fn set_theme(&self, theme: Theme) -> Result<()> {
    self.store.set(KEY_THEME, &theme.to_string())
  }

  /// Alterna el tema y devuelve el nuevo valor.
  pub fn toggle_theme(&self) -> Result<Theme> {
    let next = self.theme()?.toggled();
    self.set_theme(next)?;
    Ok(next)
  }

  /// Credencial del servicio de generación, si hay una no vacía.
  pub fn credential(&self) -> Result<Option<String>> {
    Ok(self.store.get(KEY_CREDENTIAL)?.filter(|c| !c.trim().is_empty()))
  }

  /// Guarda la credencial recortada. Una credencial vacía se rechaza sin
  /// tocar el almacén.
  pub fn save_credential(&self, raw: &str) -> Result<String> {
    let credential = raw.trim();
    if credential.is_empty() {
      return Err(PersistenceError::Validation("la credencial no puede estar vacía".into()));
    }
    self.store.set(KEY_CREDENTIAL, credential)?;
    Ok(credential.to_string())
  }
}
