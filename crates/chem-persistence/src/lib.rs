//! Persistencia de preferencias del usuario.
//! `PreferenceStore` es el contrato clave/valor; `DieselPreferenceStore` lo
//! implementa sobre SQLite y `InMemoryPreferenceStore` en memoria.
//! `PersistentPreferences` expone las claves tipadas que usa la aplicación.

mod errors;
mod preference_persistence;
mod preference_store;
mod preferences;
pub mod schema;

pub use errors::{PersistenceError, Result};
pub use preference_persistence::{new_from_env, DieselPreferenceStore, DEFAULT_PREFS_URL};
pub use preference_store::{InMemoryPreferenceStore, PreferenceStore};
pub use preferences::{
  PersistentPreferences, Theme, KEY_CREDENTIAL, KEY_LAST_QUERY, KEY_SEARCH_HISTORY, KEY_THEME,
};
