// Archivo: endpoints.rs
// Propósito: contrato de las llamadas individuales a la base de datos de
// compuestos y la política de extracción de la descripción.
use crate::errors::Result;
use async_trait::async_trait;
use chem_domain::{CompoundProperties, SynonymSet};
use serde::Deserialize;

/// Contenido de una entrada de descripción: texto simple o lista de
/// fragmentos. Cualquier otra forma se conserva como `Other` y se ignora.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DescriptionContent {
    Text(String),
    Segments(Vec<String>),
    Other(serde_json::Value),
}

/// Entrada de la respuesta de descripción.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DescriptionEntry {
    #[serde(rename = "Description", default)]
    pub description: Option<DescriptionContent>,
    #[serde(rename = "DescriptionSourceName", default)]
    pub source_name: Option<String>,
}

impl DescriptionEntry {
    pub fn text(text: impl Into<String>) -> Self {
        DescriptionEntry { description: Some(DescriptionContent::Text(text.into())),
                           source_name: None }
    }

    pub fn segments(segments: Vec<String>) -> Self {
        DescriptionEntry { description: Some(DescriptionContent::Segments(segments)),
                           source_name: None }
    }
}

/// Devuelve el texto de la primera entrada con contenido no vacío. Las
/// listas de fragmentos se unen con una línea en blanco entre cada uno.
pub fn extract_description(entries: &[DescriptionEntry]) -> Option<String> {
    entries.iter().find_map(|entry| match entry.description.as_ref()? {
                      DescriptionContent::Text(text) if !text.trim().is_empty() => Some(text.clone()),
                      DescriptionContent::Segments(parts) if parts.iter().any(|p| !p.trim().is_empty()) => {
                          Some(parts.join("\n\n"))
                      }
                      _ => None,
                  })
}

/// Llamadas individuales a la base de datos de compuestos.
///
/// Cada método corresponde a un endpoint remoto y puede fallar por separado;
/// la degradación a "ausente" la decide `CompoundGateway`, no la
/// implementación.
#[async_trait]
pub trait CompoundEndpoints: Send + Sync {
    /// Identificadores numéricos para un nombre; el primero es el canónico.
    async fn lookup_ids(&self, name: &str) -> Result<Vec<i64>>;

    /// Propiedades de un compuesto.
    async fn properties(&self, id: i64) -> Result<CompoundProperties>;

    /// Sinónimos en el orden de la base de datos.
    async fn synonyms(&self, id: i64) -> Result<SynonymSet>;

    /// Fichero de estructura 3D en texto.
    async fn structure_3d(&self, id: i64) -> Result<String>;

    /// Entradas de descripción.
    async fn descriptions(&self, id: i64) -> Result<Vec<DescriptionEntry>>;

    /// Imagen 2D en PNG.
    async fn image_png(&self, id: i64) -> Result<Vec<u8>>;

    /// Referencia determinista a la imagen 2D (sin petición).
    fn image_reference(&self, id: i64) -> String;

    /// Página pública del compuesto.
    fn page_reference(&self, id: i64) -> String;
}
