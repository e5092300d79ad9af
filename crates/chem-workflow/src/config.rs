use chem_domain::SYNONYM_DISPLAY_LIMIT;
use std::time::Duration;

/// Intervalo por defecto entre caracteres del revelado incremental.
pub const DEFAULT_REVEAL_INTERVAL_MS: u64 = 10;

/// Parámetros de presentación del modelo de vista.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
  pub reveal_interval: Duration,
  pub synonym_limit: usize,
}

impl Default for ViewConfig {
  fn default() -> Self {
    ViewConfig { reveal_interval: Duration::from_millis(DEFAULT_REVEAL_INTERVAL_MS),
                 synonym_limit: SYNONYM_DISPLAY_LIMIT }
  }
}

impl ViewConfig {
  /// Lee `CHEMLENS_REVEAL_INTERVAL_MS` y `CHEMLENS_SYNONYM_LIMIT`.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    let defaults = ViewConfig::default();
    let reveal_ms = env_number("CHEMLENS_REVEAL_INTERVAL_MS", DEFAULT_REVEAL_INTERVAL_MS);
    let synonym_limit = env_number("CHEMLENS_SYNONYM_LIMIT", defaults.synonym_limit as u64) as usize;
    ViewConfig { reveal_interval: Duration::from_millis(reveal_ms), synonym_limit }
  }
}

fn env_number(key: &str, default: u64) -> u64 {
  match std::env::var(key) {
    Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                                          log::warn!("{} inválido ({}), se usa {}", key, raw, default);
                                          default
                                        }),
    Err(_) => default,
  }
}
