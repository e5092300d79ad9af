// Archivo: stubs.rs
// Propósito: implementaciones en memoria de `CompoundEndpoints` y
// `TextGenerator` para pruebas y demos sin red.
//
// Permiten inyectar retardos por compuesto y fallos por endpoint, y cuentan
// las llamadas recibidas.
use crate::endpoints::{CompoundEndpoints, DescriptionEntry};
use crate::errors::{ProviderError, Result};
use crate::generation::TextGenerator;
use async_trait::async_trait;
use chem_domain::{CompoundIdentity, CompoundProperties, SynonymSet};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const STUB_BASE: &str = "stub://compound";

/// Endpoints individuales, para inyectar fallos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Lookup,
    Properties,
    Synonyms,
    Structure,
    Description,
    Image,
}

/// Datos de un compuesto servidos por el stub.
#[derive(Debug, Clone, Default)]
pub struct StubCompound {
    pub id: i64,
    pub properties: Option<CompoundProperties>,
    pub synonyms: Vec<String>,
    pub structure_3d: Option<String>,
    pub descriptions: Vec<DescriptionEntry>,
}

impl StubCompound {
    pub fn new(id: i64, formula: &str) -> Self {
        StubCompound { id,
                       properties: Some(CompoundProperties::new(formula)),
                       ..Default::default() }
    }

    pub fn with_synonyms(mut self, names: &[&str]) -> Self {
        self.synonyms = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_structure(mut self, sdf: &str) -> Self {
        self.structure_3d = Some(sdf.to_string());
        self
    }

    pub fn with_description(mut self, text: &str) -> Self {
        self.descriptions.push(DescriptionEntry::text(text));
        self
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Base de datos de compuestos en memoria.
#[derive(Default)]
pub struct StubCompoundEndpoints {
    /// nombre en minúsculas -> compuesto
    by_name: Mutex<HashMap<String, StubCompound>>,
    /// retardo aplicado a las lecturas por id
    delays: Mutex<HashMap<i64, Duration>>,
    failing: Mutex<HashSet<Endpoint>>,
    calls: AtomicUsize,
}

impl StubCompoundEndpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un compuesto accesible por `name` (sin distinguir mayúsculas).
    pub fn with_compound(self, name: &str, compound: StubCompound) -> Self {
        self.insert(name, compound);
        self
    }

    pub fn insert(&self, name: &str, compound: StubCompound) {
        lock(&self.by_name).insert(name.to_lowercase(), compound);
    }

    /// Retarda cada lectura del compuesto `id`.
    pub fn with_delay(self, id: i64, delay: Duration) -> Self {
        lock(&self.delays).insert(id, delay);
        self
    }

    /// Hace fallar un endpoint hasta que se llame a `recover`.
    pub fn fail(&self, endpoint: Endpoint) {
        lock(&self.failing).insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        lock(&self.failing).remove(&endpoint);
    }

    /// Número total de llamadas recibidas.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, endpoint: Endpoint, id: Option<i64>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = id.and_then(|id| lock(&self.delays).get(&id).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if lock(&self.failing).contains(&endpoint) {
            return Err(ProviderError::Status { endpoint: "stub", status: 503 });
        }
        Ok(())
    }

    fn by_id(&self, id: i64) -> Result<StubCompound> {
        lock(&self.by_name).values()
                           .find(|c| c.id == id)
                           .cloned()
                           .ok_or_else(|| ProviderError::Status { endpoint: "stub", status: 404 })
    }
}

#[async_trait]
impl CompoundEndpoints for StubCompoundEndpoints {
    async fn lookup_ids(&self, name: &str) -> Result<Vec<i64>> {
        self.enter(Endpoint::Lookup, None).await?;
        let found = lock(&self.by_name).get(&name.to_lowercase()).map(|c| c.id);
        match found {
            Some(id) => Ok(vec![id]),
            None => Err(ProviderError::Status { endpoint: "cids", status: 404 }),
        }
    }

    async fn properties(&self, id: i64) -> Result<CompoundProperties> {
        self.enter(Endpoint::Properties, Some(id)).await?;
        self.by_id(id)?
            .properties
            .ok_or_else(|| ProviderError::Malformed("sin propiedades".into()))
    }

    async fn synonyms(&self, id: i64) -> Result<SynonymSet> {
        self.enter(Endpoint::Synonyms, Some(id)).await?;
        Ok(SynonymSet::new(self.by_id(id)?.synonyms))
    }

    async fn structure_3d(&self, id: i64) -> Result<String> {
        self.enter(Endpoint::Structure, Some(id)).await?;
        self.by_id(id)?
            .structure_3d
            .ok_or(ProviderError::Status { endpoint: "structure", status: 404 })
    }

    async fn descriptions(&self, id: i64) -> Result<Vec<DescriptionEntry>> {
        self.enter(Endpoint::Description, Some(id)).await?;
        Ok(self.by_id(id)?.descriptions)
    }

    async fn image_png(&self, id: i64) -> Result<Vec<u8>> {
        self.enter(Endpoint::Image, Some(id)).await?;
        self.by_id(id)?;
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }

    fn image_reference(&self, id: i64) -> String {
        CompoundIdentity::new(id, "").image_reference(STUB_BASE)
    }

    fn page_reference(&self, id: i64) -> String {
        CompoundIdentity::new(id, "").page_reference(STUB_BASE)
    }
}

/// Respuesta programada del generador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubReply {
    Text(String),
    /// Estado HTTP distinto de éxito.
    Status(u16),
    /// Respuesta sin texto.
    Empty,
}

/// Generador de texto en memoria. Consume respuestas programadas en orden;
/// sin respuestas pendientes devuelve un texto derivado del prompt.
#[derive(Default)]
pub struct StubTextGenerator {
    replies: Mutex<VecDeque<StubReply>>,
    delay: Mutex<Option<Duration>>,
    credentials: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl StubTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: StubReply) {
        lock(&self.replies).push_back(reply);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *lock(&self.delay) = delay;
    }

    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Credenciales recibidas, en orden de llamada.
    pub fn credentials(&self) -> Vec<String> {
        lock(&self.credentials).clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn generate(&self, credential: &str, prompt: &str) -> Result<String> {
        lock(&self.credentials).push(credential.to_string());
        let call = {
            let mut prompts = lock(&self.prompts);
            prompts.push(prompt.to_string());
            prompts.len()
        };
        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if credential.trim().is_empty() {
            return Err(ProviderError::MissingCredential);
        }
        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(StubReply::Text(text)) => Ok(text),
            Some(StubReply::Status(status)) => Err(ProviderError::Status { endpoint: "generation", status }),
            Some(StubReply::Empty) => Err(ProviderError::Malformed("respuesta de generación sin texto".into())),
            None => Ok(format!("generated #{}", call)),
        }
    }
}
