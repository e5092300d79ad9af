#![allow(dead_code)]

use chem_persistence::{InMemoryPreferenceStore, PersistenceError, PersistentPreferences, PreferenceStore};
use chem_providers::stubs::{StubCompound, StubCompoundEndpoints, StubTextGenerator};
use chem_providers::CompoundGateway;
use chem_workflow::{CompoundViewModel, Notification, ViewConfig};
use std::sync::Arc;
use tokio::sync::broadcast;

pub const ASPIRIN_DB: &str = "Aspirin is an orally administered non-steroidal antiinflammatory agent.";
pub const WATER_DB: &str = "Water is a chemical compound consisting of two hydrogen atoms and one oxygen atom.";

pub fn catalog() -> StubCompoundEndpoints {
  StubCompoundEndpoints::new()
    .with_compound("aspirin",
                   StubCompound::new(2244, "C9H8O4").with_synonyms(&["aspirin",
                                                                     "acetylsalicylic acid",
                                                                     "2-acetoxybenzoic acid",
                                                                     "Acylpyrin",
                                                                     "Ecotrin",
                                                                     "Easprin",
                                                                     "Empirin",
                                                                     "Measurin",
                                                                     "Salcetogen",
                                                                     "Entericin"])
                                                    .with_structure("2244\n  3D SDF\n")
                                                    .with_description(ASPIRIN_DB))
    .with_compound("water",
                   StubCompound::new(962, "H2O").with_synonyms(&["water", "oxidane"])
                                                .with_description(WATER_DB))
    .with_compound("glucose", StubCompound::new(5793, "C6H12O6").with_synonyms(&["D-glucose"]))
}

pub struct Harness {
  pub vm: CompoundViewModel,
  pub endpoints: Arc<StubCompoundEndpoints>,
  pub generator: Arc<StubTextGenerator>,
  pub store: Arc<InMemoryPreferenceStore>,
}

impl Harness {
  pub fn new() -> Self {
    Self::with_endpoints(catalog())
  }

  pub fn with_endpoints(endpoints: StubCompoundEndpoints) -> Self {
    let endpoints = Arc::new(endpoints);
    let generator = Arc::new(StubTextGenerator::new());
    let store = Arc::new(InMemoryPreferenceStore::new());
    let vm = CompoundViewModel::new(CompoundGateway::new(endpoints.clone()),
                                    generator.clone(),
                                    PersistentPreferences::new(store.clone()),
                                    ViewConfig::default());
    Harness { vm, endpoints, generator, store }
  }

  /// Igual que `new` pero con una credencial ya guardada.
  pub fn with_credential(credential: &str) -> Self {
    let h = Self::new();
    h.store.set(chem_persistence::KEY_CREDENTIAL, credential).unwrap();
    h
  }
}

/// Almacén que falla en todas las operaciones (disco lleno, base bloqueada).
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
  fn get(&self, _key: &str) -> chem_persistence::Result<Option<String>> {
    Err(PersistenceError::Storage("database is locked".into()))
  }

  fn set(&self, _key: &str, _value: &str) -> chem_persistence::Result<()> {
    Err(PersistenceError::Storage("database is locked".into()))
  }

  fn remove(&self, _key: &str) -> chem_persistence::Result<()> {
    Err(PersistenceError::Storage("database is locked".into()))
  }
}

/// Modelo de vista sobre el catálogo con preferencias inaccesibles.
pub fn view_model_without_storage() -> CompoundViewModel {
  CompoundViewModel::new(CompoundGateway::new(Arc::new(catalog())),
                         Arc::new(StubTextGenerator::new()),
                         PersistentPreferences::new(Arc::new(UnavailableStore)),
                         ViewConfig::default())
}

pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
  let mut out = Vec::new();
  while let Ok(n) = rx.try_recv() {
    out.push(n);
  }
  out
}
