// Archivo: provider.rs
// Propósito: máquina de estados de la descripción de un compuesto.
//
// Es síncrona: el modelo de vista planifica la petición de generación con
// `plan_generation`, hace la llamada de red sin retener ningún bloqueo y
// entrega el resultado a `complete_generation`. Cada petición lleva un
// número de secuencia; un resultado cuya secuencia ya no es la pendiente
// (otro compuesto cargado, credencial cambiada, petición más reciente) se
// descarta.
use super::view::{DescriptionText, DescriptionView, DATABASE_UNAVAILABLE, GENERATED_UNAVAILABLE};
use chem_domain::{CompoundIdentity, DescriptionSource};
use chem_providers::ProviderError;
use serde::Serialize;

/// Estados derivados de qué textos hay disponibles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DescriptionState {
  /// Sin compuesto, o sin ningún texto para el cargado.
  None,
  DatabaseOnly,
  /// Hay texto generado pero la base de datos no tiene descripción.
  GeneratedOnly,
  DatabaseAndGenerated,
}

/// Petición de generación lista para enviarse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
  pub compound_id: i64,
  pub canonical_name: String,
  pub credential: String,
  sequence: u64,
}

/// Qué hacer al pedir la descripción generada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPlan {
  NoCompound,
  /// Falta la credencial; no se hace ninguna llamada.
  CredentialRequired,
  /// Ya hay texto en caché y se muestra sin llamar a la red.
  UseCached,
  Fetch(GenerationTicket),
}

/// Efecto de entregar el resultado de una petición.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationCompletion {
  Applied,
  /// La petición falló; se vuelve a la fuente de base de datos.
  Failed(String),
  /// La petición ya no es la vigente y se ignora.
  Stale,
}

#[derive(Debug, Default)]
pub struct DescriptionProvider {
  compound: Option<CompoundIdentity>,
  database: Option<String>,
  generated: Option<String>,
  active: DescriptionSource,
  sequence: u64,
  pending: Option<u64>,
}

impl DescriptionProvider {
  pub fn new() -> Self {
    Self::default()
  }

  /// Carga un compuesto nuevo. Descarta el texto generado del anterior y
  /// cualquier petición en curso.
  pub fn load(&mut self, identity: CompoundIdentity, database: Option<String>) {
    self.compound = Some(identity);
    self.database = database.filter(|d| !d.trim().is_empty());
    self.generated = None;
    self.active = DescriptionSource::Database;
    self.pending = None;
  }

  pub fn clear(&mut self) {
    self.compound = None;
    self.database = None;
    self.generated = None;
    self.active = DescriptionSource::Database;
    self.pending = None;
  }

  pub fn compound(&self) -> Option<&CompoundIdentity> {
    self.compound.as_ref()
  }

  pub fn active(&self) -> DescriptionSource {
    self.active
  }

  pub fn generated(&self) -> Option<&str> {
    self.generated.as_deref()
  }

  pub fn is_generating(&self) -> bool {
    self.pending.is_some()
  }

  pub fn state(&self) -> DescriptionState {
    if self.compound.is_none() {
      return DescriptionState::None;
    }
    match (&self.database, &self.generated) {
      (Some(_), Some(_)) => DescriptionState::DatabaseAndGenerated,
      (None, Some(_)) => DescriptionState::GeneratedOnly,
      (Some(_), None) => DescriptionState::DatabaseOnly,
      (None, None) => DescriptionState::None,
    }
  }

  /// Cambia la fuente mostrada sin llamar a la red. Elegir la fuente
  /// generada sin texto en caché muestra el marcador.
  pub fn select(&mut self, source: DescriptionSource) {
    self.active = source;
  }

  /// Decide si hace falta una petición. Con `force` se ignora la caché.
  pub fn plan_generation(&mut self, credential: Option<&str>, force: bool) -> GenerationPlan {
    let identity = match &self.compound {
      Some(identity) => identity.clone(),
      None => return GenerationPlan::NoCompound,
    };
    let credential = match credential.map(str::trim).filter(|c| !c.is_empty()) {
      Some(c) => c.to_string(),
      None => return GenerationPlan::CredentialRequired,
    };
    if !force && self.generated.is_some() {
      self.active = DescriptionSource::Generated;
      return GenerationPlan::UseCached;
    }
    self.sequence += 1;
    self.pending = Some(self.sequence);
    GenerationPlan::Fetch(GenerationTicket { compound_id: identity.id,
                                             canonical_name: identity.canonical_name,
                                             credential,
                                             sequence: self.sequence })
  }

  /// Aplica el resultado de una petición si sigue siendo la vigente.
  pub fn complete_generation(&mut self,
                             ticket: &GenerationTicket,
                             result: Result<String, ProviderError>)
                             -> GenerationCompletion {
    let current = self.compound.as_ref().map(|c| c.id);
    if self.pending != Some(ticket.sequence) || current != Some(ticket.compound_id) {
      log::debug!("resultado de generación descartado para id {}", ticket.compound_id);
      return GenerationCompletion::Stale;
    }
    self.pending = None;
    match result {
      Ok(text) => {
        self.generated = Some(text);
        self.active = DescriptionSource::Generated;
        GenerationCompletion::Applied
      }
      Err(e) => {
        log::warn!("generación fallida para id {}: {}", ticket.compound_id, e);
        self.active = DescriptionSource::Database;
        GenerationCompletion::Failed(e.to_string())
      }
    }
  }

  /// Olvida el texto generado y cancela la petición en curso. Se usa al
  /// cambiar la credencial.
  pub fn invalidate_generated(&mut self) {
    self.generated = None;
    self.pending = None;
    self.active = DescriptionSource::Database;
  }

  pub fn display(&self) -> DescriptionView {
    let text = match self.active {
      DescriptionSource::Database => match &self.database {
        Some(d) => DescriptionText::Database(d.clone()),
        None => DescriptionText::Placeholder(DATABASE_UNAVAILABLE),
      },
      DescriptionSource::Generated => match &self.generated {
        Some(g) => DescriptionText::Generated(g.clone()),
        None => DescriptionText::Placeholder(GENERATED_UNAVAILABLE),
      },
    };
    DescriptionView { source: self.active,
                      can_regenerate: self.active == DescriptionSource::Generated && self.generated.is_some(),
                      generating: self.is_generating(),
                      text }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn loaded() -> DescriptionProvider {
    let mut p = DescriptionProvider::new();
    p.load(CompoundIdentity::new(2244, "aspirin"), Some("Aspirin is an analgesic.".into()));
    p
  }

  fn ticket(plan: GenerationPlan) -> GenerationTicket {
    match plan {
      GenerationPlan::Fetch(t) => t,
      other => panic!("se esperaba Fetch, llegó {:?}", other),
    }
  }

  #[test]
  fn empty_provider_has_no_state() {
    let mut p = DescriptionProvider::new();
    assert_eq!(p.state(), DescriptionState::None);
    assert_eq!(p.plan_generation(Some("k"), false), GenerationPlan::NoCompound);
  }

  #[test]
  fn generated_text_without_database_text_is_generated_only() {
    let mut p = DescriptionProvider::new();
    p.load(CompoundIdentity::new(5793, "D-glucose"), None);
    assert_eq!(p.state(), DescriptionState::None);
    let t = ticket(p.plan_generation(Some("k"), false));
    assert_eq!(p.complete_generation(&t, Ok("Glucose is a simple sugar.".into())),
               GenerationCompletion::Applied);
    assert_eq!(p.state(), DescriptionState::GeneratedOnly);
  }

  #[test]
  fn missing_credential_never_fetches() {
    let mut p = loaded();
    assert_eq!(p.plan_generation(None, false), GenerationPlan::CredentialRequired);
    assert_eq!(p.plan_generation(Some("   "), true), GenerationPlan::CredentialRequired);
    assert!(!p.is_generating());
  }

  #[test]
  fn superseded_request_is_stale() {
    let mut p = loaded();
    let first = ticket(p.plan_generation(Some("k"), false));
    let second = ticket(p.plan_generation(Some("k"), true));
    assert_eq!(p.complete_generation(&first, Ok("old".into())), GenerationCompletion::Stale);
    assert_eq!(p.complete_generation(&second, Ok("new".into())), GenerationCompletion::Applied);
    assert_eq!(p.generated(), Some("new"));
  }

  #[test]
  fn reload_discards_pending_request() {
    let mut p = loaded();
    let t = ticket(p.plan_generation(Some("k"), false));
    p.load(CompoundIdentity::new(962, "water"), None);
    assert_eq!(p.complete_generation(&t, Ok("aspirin text".into())), GenerationCompletion::Stale);
    assert_eq!(p.generated(), None);
    assert_eq!(p.display().text, DescriptionText::Placeholder(DATABASE_UNAVAILABLE));
  }

  #[test]
  fn invalidate_cancels_in_flight() {
    let mut p = loaded();
    let t = ticket(p.plan_generation(Some("old-key"), false));
    p.invalidate_generated();
    assert_eq!(p.complete_generation(&t, Ok("x".into())), GenerationCompletion::Stale);
    assert!(!p.is_generating());
  }
}
