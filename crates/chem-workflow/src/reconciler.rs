// Archivo: reconciler.rs
// Propósito: `CompoundViewModel`, el único punto que publica vistas.
//
// Cada búsqueda recibe un turno creciente. Los resultados se comparan con
// el último turno emitido tras resolver el identificador y otra vez antes
// de publicar; si otra búsqueda empezó después, se descartan aunque esa
// búsqueda más reciente termine en `NotFound`.
//
// El estado vive tras un `std::sync::Mutex` que nunca se retiene durante
// un `.await`.
use crate::config::ViewConfig;
use crate::description::{DescriptionProvider, GenerationCompletion, GenerationPlan, GenerationTicket};
use crate::errors::{Result, WorkflowError};
use crate::view::{Notification, ViewRecord};
use chem_domain::{CompoundIdentity, CompoundQuery, DescriptionSource, SearchHistory};
use chem_persistence::{PersistenceError, PersistentPreferences, Theme};
use chem_providers::{generation_prompt, CompoundGateway, TextGenerator};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

const NOTIFICATION_CAPACITY: usize = 64;

pub type ViewReceiver = watch::Receiver<Option<Arc<ViewRecord>>>;

/// Resultado de `search`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
  Published(Arc<ViewRecord>),
  /// Búsqueda vacía: no se hace nada.
  Ignored,
  /// Otra búsqueda empezó después; el resultado se descartó.
  Superseded,
}

/// Resultado de las operaciones sobre la descripción.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionOutcome {
  NoCompound,
  CredentialRequired,
  ShowingCached,
  Generated,
  GenerationFailed(String),
  /// La respuesta llegó cuando ya no era vigente.
  Discarded,
}

#[derive(Default)]
struct AppState {
  latest_search: u64,
  revision: u64,
  current: Option<Arc<ViewRecord>>,
  description: DescriptionProvider,
}

pub struct CompoundViewModel {
  gateway: CompoundGateway,
  generator: Arc<dyn TextGenerator>,
  preferences: PersistentPreferences,
  config: ViewConfig,
  state: Mutex<AppState>,
  view_tx: watch::Sender<Option<Arc<ViewRecord>>>,
  notices: broadcast::Sender<Notification>,
}

impl CompoundViewModel {
  pub fn new(gateway: CompoundGateway,
             generator: Arc<dyn TextGenerator>,
             preferences: PersistentPreferences,
             config: ViewConfig)
             -> Self {
    let (view_tx, _) = watch::channel(None);
    let (notices, _) = broadcast::channel(NOTIFICATION_CAPACITY);
    Self { gateway,
           generator,
           preferences,
           config,
           state: Mutex::new(AppState::default()),
           view_tx,
           notices }
  }

  pub fn config(&self) -> &ViewConfig {
    &self.config
  }

  pub fn subscribe(&self) -> ViewReceiver {
    self.view_tx.subscribe()
  }

  pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
    self.notices.subscribe()
  }

  pub fn current(&self) -> Option<Arc<ViewRecord>> {
    self.lock().ok().and_then(|s| s.current.clone())
  }

  fn lock(&self) -> Result<MutexGuard<'_, AppState>> {
    self.state
        .lock()
        .map_err(|e| WorkflowError::State(format!("mutex envenenado: {}", e)))
  }

  fn notify(&self, notice: Notification) {
    log::debug!("aviso: {:?}", notice);
    // Sin suscriptores el aviso se pierde.
    let _ = self.notices.send(notice);
  }

  fn publish(&self, state: &mut AppState, record: ViewRecord) -> Arc<ViewRecord> {
    let record = Arc::new(record);
    state.current = Some(Arc::clone(&record));
    self.view_tx.send_replace(Some(Arc::clone(&record)));
    record
  }

  /// Vuelve a publicar la vista actual con la descripción al día.
  fn republish(&self, state: &mut AppState) -> Option<Arc<ViewRecord>> {
    let current = state.current.clone()?;
    state.revision += 1;
    let record = current.with_description(state.description.display(), state.revision);
    Some(self.publish(state, record))
  }

  /// Busca un compuesto y publica su vista.
  ///
  /// Una búsqueda vacía se ignora. Si el compuesto no existe se avisa con
  /// `NotFound` y la vista anterior sigue publicada. Las lecturas parciales
  /// fallidas no son error: se publican como ausentes y se avisa.
  pub async fn search(&self, raw: &str) -> Result<SearchOutcome> {
    let query = match CompoundQuery::parse(raw) {
      Some(q) => q,
      None => return Ok(SearchOutcome::Ignored),
    };
    let turn = {
      let mut state = self.lock()?;
      state.latest_search += 1;
      state.latest_search
    };
    let batch = Uuid::new_v4();
    log::info!("búsqueda '{}' (turno {}, lote {})", query, turn, batch);

    let identity = match self.gateway.resolve_identity(&query).await {
      Ok(identity) => identity,
      Err(e) => {
        log::info!("'{}' no resuelto: {}", query, e);
        if self.is_current(turn)? {
          self.notify(Notification::NotFound { query: query.to_string() });
        }
        return Err(WorkflowError::NotFound(query.to_string()));
      }
    };
    if !self.is_current(turn)? {
      return Ok(SearchOutcome::Superseded);
    }
    if let Err(e) = self.preferences.record_search(query.as_str()) {
      log::warn!("no se pudo guardar el historial: {}", e);
    }

    let bundle = self.gateway.fetch_all(identity.id).await;
    let page_url = self.gateway.page_reference(identity.id);

    let mut state = self.lock()?;
    if state.latest_search != turn {
      log::debug!("resultado de '{}' descartado (turno {} < {})", query, turn, state.latest_search);
      return Ok(SearchOutcome::Superseded);
    }
    let identity = CompoundIdentity::resolve(identity.id, bundle.synonyms.as_ref(), &query);
    state.description.load(identity.clone(), bundle.description.clone());
    state.revision += 1;
    let degraded = bundle.degraded.clone();
    let record = ViewRecord::from_bundle(identity,
                                         query,
                                         bundle,
                                         self.config.synonym_limit,
                                         page_url,
                                         state.description.display(),
                                         batch,
                                         state.revision);
    let record = self.publish(&mut state, record);
    drop(state);

    if !degraded.is_empty() {
      self.notify(Notification::PartialDataUnavailable { compound_id: record.identity.id, fields: degraded });
    }
    Ok(SearchOutcome::Published(record))
  }

  fn is_current(&self, turn: u64) -> Result<bool> {
    Ok(self.lock()?.latest_search == turn)
  }

  /// Cambia la fuente mostrada sin llamar a la red.
  pub fn select_source(&self, source: DescriptionSource) -> Result<Option<Arc<ViewRecord>>> {
    let mut state = self.lock()?;
    if state.current.is_none() {
      return Ok(None);
    }
    state.description.select(source);
    Ok(self.republish(&mut state))
  }

  /// Muestra la descripción generada: desde la caché si existe, si no la
  /// pide al generador.
  pub async fn request_generated(&self) -> Result<DescriptionOutcome> {
    self.generate(false).await
  }

  /// Pide una descripción nueva aunque haya una en caché. La caché sólo se
  /// reemplaza si la petición tiene éxito.
  pub async fn regenerate(&self) -> Result<DescriptionOutcome> {
    self.generate(true).await
  }

  async fn generate(&self, force: bool) -> Result<DescriptionOutcome> {
    let credential = self.preferences.credential()?;
    let plan = {
      let mut state = self.lock()?;
      let plan = state.description.plan_generation(credential.as_deref(), force);
      if matches!(plan, GenerationPlan::UseCached | GenerationPlan::Fetch(_)) {
        self.republish(&mut state);
      }
      plan
    };
    match plan {
      GenerationPlan::NoCompound => Ok(DescriptionOutcome::NoCompound),
      GenerationPlan::CredentialRequired => {
        self.notify(Notification::CredentialRequired);
        Ok(DescriptionOutcome::CredentialRequired)
      }
      GenerationPlan::UseCached => Ok(DescriptionOutcome::ShowingCached),
      GenerationPlan::Fetch(ticket) => self.run_generation(ticket).await,
    }
  }

  async fn run_generation(&self, ticket: GenerationTicket) -> Result<DescriptionOutcome> {
    let prompt = generation_prompt(&ticket.canonical_name);
    let result = self.generator.generate(&ticket.credential, &prompt).await;

    let completion = {
      let mut state = self.lock()?;
      let completion = state.description.complete_generation(&ticket, result);
      if completion != GenerationCompletion::Stale {
        self.republish(&mut state);
      }
      completion
    };
    match completion {
      GenerationCompletion::Applied => Ok(DescriptionOutcome::Generated),
      GenerationCompletion::Failed(reason) => {
        self.notify(Notification::GenerationUnavailable { reason: reason.clone() });
        Ok(DescriptionOutcome::GenerationFailed(reason))
      }
      GenerationCompletion::Stale => Ok(DescriptionOutcome::Discarded),
    }
  }

  /// Guarda la credencial. Con un compuesto cargado se olvida el texto
  /// generado y se pide uno nuevo con la credencial nueva.
  pub async fn save_credential(&self, raw: &str) -> Result<DescriptionOutcome> {
    let credential = match self.preferences.save_credential(raw) {
      Ok(c) => c,
      Err(PersistenceError::Validation(reason)) => {
        self.notify(Notification::CredentialRejected { reason: reason.clone() });
        return Err(WorkflowError::Persistence(PersistenceError::Validation(reason)));
      }
      Err(e) => return Err(e.into()),
    };
    self.notify(Notification::CredentialSaved);

    let plan = {
      let mut state = self.lock()?;
      if state.current.is_none() {
        return Ok(DescriptionOutcome::NoCompound);
      }
      state.description.invalidate_generated();
      let plan = state.description.plan_generation(Some(&credential), true);
      self.republish(&mut state);
      plan
    };
    match plan {
      GenerationPlan::Fetch(ticket) => self.run_generation(ticket).await,
      _ => Ok(DescriptionOutcome::NoCompound),
    }
  }

  pub fn history(&self) -> Result<SearchHistory> {
    Ok(self.preferences.history()?)
  }

  pub fn clear_history(&self) -> Result<()> {
    self.preferences.clear_history()?;
    self.notify(Notification::HistoryCleared);
    Ok(())
  }

  /// Última búsqueda guardada, para rellenar el campo al arrancar.
  pub fn last_query(&self) -> Result<Option<String>> {
    Ok(self.preferences.last_query()?)
  }

  pub fn has_credential(&self) -> Result<bool> {
    Ok(self.preferences.credential()?.is_some())
  }

  pub fn theme(&self) -> Result<Theme> {
    Ok(self.preferences.theme()?)
  }

  pub fn toggle_theme(&self) -> Result<Theme> {
    let theme = self.preferences.toggle_theme()?;
    self.notify(Notification::ThemeChanged(theme));
    Ok(theme)
  }

  /// Descarga la imagen 2D del compuesto mostrado junto con el nombre de
  /// fichero sugerido.
  pub async fn download_image(&self) -> Result<Option<(String, Vec<u8>)>> {
    let record = match self.current() {
      Some(r) => r,
      None => return Ok(None),
    };
    let bytes = self.gateway.download_image(record.identity.id).await?;
    Ok(Some((record.image_file_name(), bytes)))
  }
}
