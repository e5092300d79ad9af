// Archivo: config.rs
// Propósito: configuración de los proveedores leída del entorno (.env).
use std::time::Duration;

pub const DEFAULT_PUBCHEM_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const DEFAULT_PUBCHEM_PAGE: &str = "https://pubchem.ncbi.nlm.nih.gov/compound";
pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// URLs base y parámetros de red de los proveedores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub pubchem_base: String,
    pub pubchem_page_base: String,
    pub gemini_base: String,
    pub gemini_model: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig { pubchem_base: DEFAULT_PUBCHEM_BASE.into(),
                         pubchem_page_base: DEFAULT_PUBCHEM_PAGE.into(),
                         gemini_base: DEFAULT_GEMINI_BASE.into(),
                         gemini_model: DEFAULT_GEMINI_MODEL.into(),
                         timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }
}

impl ProviderConfig {
    /// Lee `PUBCHEM_BASE_URL`, `PUBCHEM_PAGE_URL`, `GEMINI_BASE_URL`,
    /// `GEMINI_MODEL` y `CHEMLENS_HTTP_TIMEOUT_SECS`. Las variables ausentes
    /// o inválidas toman el valor por defecto.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = ProviderConfig::default();
        let timeout = match std::env::var("CHEMLENS_HTTP_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("CHEMLENS_HTTP_TIMEOUT_SECS inválido ({}), se usa {}s", raw, DEFAULT_TIMEOUT_SECS);
                    defaults.timeout
                }
            },
            Err(_) => defaults.timeout,
        };
        ProviderConfig { pubchem_base: env_or("PUBCHEM_BASE_URL", defaults.pubchem_base),
                         pubchem_page_base: env_or("PUBCHEM_PAGE_URL", defaults.pubchem_page_base),
                         gemini_base: env_or("GEMINI_BASE_URL", defaults.gemini_base),
                         gemini_model: env_or("GEMINI_MODEL", defaults.gemini_model),
                         timeout }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok()
                      .map(|v| v.trim().to_string())
                      .filter(|v| !v.is_empty())
                      .unwrap_or(default)
}
