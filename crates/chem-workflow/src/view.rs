// Archivo: view.rs
// Propósito: registro inmutable que consume la presentación y avisos
// transitorios al usuario.
use crate::description::DescriptionView;
use chem_domain::{
  capitalize, composition, empirical_formula, CompositionRow, CompoundIdentity, CompoundProperties, CompoundQuery,
  StructurePayload,
};
use chem_persistence::Theme;
use chem_providers::CompoundBundle;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Todo lo que se muestra de un compuesto. Cada cambio publica un registro
/// nuevo; los anteriores no se modifican.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRecord {
  pub identity: CompoundIdentity,
  pub query: CompoundQuery,
  /// Nombre canónico con la primera letra en mayúscula.
  pub display_name: String,
  pub properties: Option<CompoundProperties>,
  pub empirical_formula: Option<String>,
  pub composition: Vec<CompositionRow>,
  /// Primeros sinónimos, ya recortados al límite de presentación.
  pub synonyms: Vec<String>,
  pub structure: StructurePayload,
  pub page_url: String,
  pub description: DescriptionView,
  /// Lecturas que fallaron y se muestran como ausentes.
  pub degraded: Vec<&'static str>,
  /// Identificador de la búsqueda que produjo los datos.
  pub batch: Uuid,
  /// Crece con cada publicación.
  pub revision: u64,
  pub published_at: DateTime<Utc>,
}

impl ViewRecord {
  pub(crate) fn from_bundle(identity: CompoundIdentity,
                            query: CompoundQuery,
                            bundle: CompoundBundle,
                            synonym_limit: usize,
                            page_url: String,
                            description: DescriptionView,
                            batch: Uuid,
                            revision: u64)
                            -> Self {
    let formula = bundle.properties.as_ref().map(|p| p.formula.as_str());
    let synonyms = bundle.synonyms
                         .as_ref()
                         .map(|s| s.top(synonym_limit).to_vec())
                         .unwrap_or_default();
    ViewRecord { display_name: capitalize(&identity.canonical_name),
                 empirical_formula: formula.map(empirical_formula),
                 composition: composition(formula),
                 identity,
                 query,
                 properties: bundle.properties,
                 synonyms,
                 structure: bundle.structure,
                 page_url,
                 description,
                 degraded: bundle.degraded,
                 batch,
                 revision,
                 published_at: Utc::now() }
  }

  /// Copia con otra vista de la descripción y la revisión siguiente.
  pub(crate) fn with_description(&self, description: DescriptionView, revision: u64) -> Self {
    ViewRecord { description, revision, published_at: Utc::now(), ..self.clone() }
  }

  /// Nombre de fichero para guardar la imagen 2D. El nombre viene de la
  /// base de datos remota: separadores de ruta y caracteres de control se
  /// sustituyen por `_`; si no queda ningún carácter alfanumérico se usa
  /// `CID_<id>.png`.
  pub fn image_file_name(&self) -> String {
    let stem: String = self.identity
                           .canonical_name
                           .chars()
                           .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
                           .collect();
    let stem = stem.trim().trim_matches('.');
    if !stem.chars().any(char::is_alphanumeric) {
      format!("CID_{}.png", self.identity.id)
    } else {
      format!("{}.png", stem)
    }
  }
}

/// Avisos transitorios para el usuario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
  NotFound { query: String },
  /// Algunas lecturas fallaron; la vista se publicó igualmente.
  PartialDataUnavailable { compound_id: i64, fields: Vec<&'static str> },
  GenerationUnavailable { reason: String },
  /// Hace falta la credencial antes de generar.
  CredentialRequired,
  CredentialSaved,
  CredentialRejected { reason: String },
  HistoryCleared,
  ThemeChanged(Theme),
}
