// Archivo: app.rs
// Propósito: construir el modelo de vista a partir del entorno y
// arrancar el registro de logs.
use chem_persistence::{PersistenceError, PersistentPreferences};
use chem_providers::{CompoundGateway, GeminiClient, ProviderConfig, ProviderError, PubChemClient};
use chem_workflow::{CompoundViewModel, Revealer, ViewConfig, WorkflowError};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Error de proveedor: {0}")]
  Provider(#[from] ProviderError),
  #[error("Error de persistencia: {0}")]
  Persistence(#[from] PersistenceError),
  #[error("Error de flujo: {0}")]
  Workflow(#[from] WorkflowError),
  #[error("Error de E/S: {0}")]
  Io(#[from] std::io::Error),
  #[error("Error de serialización: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// Modelo de vista y reproductor de texto de la sesión.
pub struct App {
  pub view_model: CompoundViewModel,
  pub revealer: Revealer,
}

impl App {
  /// Clientes HTTP reales y preferencias en SQLite, configurados desde el
  /// entorno (`.env` incluido).
  pub fn from_env() -> Result<Self, AppError> {
    dotenvy::dotenv().ok();
    let providers = ProviderConfig::from_env();
    let view = ViewConfig::from_env();
    let pubchem = PubChemClient::new(&providers)?;
    let gemini = GeminiClient::new(&providers)?;
    let store = chem_persistence::new_from_env()?;
    log::info!("PubChem en {} con modelo {}", providers.pubchem_base, providers.gemini_model);
    Ok(Self::with_parts(CompoundGateway::new(Arc::new(pubchem)),
                        Arc::new(gemini),
                        PersistentPreferences::new(Arc::new(store)),
                        view))
  }

  pub fn with_parts(gateway: CompoundGateway,
                    generator: Arc<dyn chem_providers::TextGenerator>,
                    preferences: PersistentPreferences,
                    config: ViewConfig)
                    -> Self {
    let revealer = Revealer::new(config.reveal_interval);
    App { view_model: CompoundViewModel::new(gateway, generator, preferences, config), revealer }
  }
}

/// Nivel de log desde `CHEMLENS_LOG` (por defecto `warn`).
pub fn log_level_from_env() -> LevelFilter {
  match std::env::var("CHEMLENS_LOG") {
    Ok(raw) => raw.trim().parse().unwrap_or(LevelFilter::Warn),
    Err(_) => LevelFilter::Warn,
  }
}

pub fn init_logging() {
  let config = ConfigBuilder::new().set_target_level(LevelFilter::Error)
                                   .set_time_level(LevelFilter::Off)
                                   .build();
  // Un segundo intento de inicialización no es un error para la sesión.
  let _ = TermLogger::init(log_level_from_env(), config, TerminalMode::Stderr, ColorChoice::Auto);
}
