// compound.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Número máximo de sinónimos que se exponen a la vista.
pub const SYNONYM_DISPLAY_LIMIT: usize = 8;

/// Nombre introducido por el usuario, recortado y no vacío.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundQuery(String);

impl CompoundQuery {
  /// Devuelve `None` si la entrada queda vacía tras recortar espacios.
  pub fn parse(raw: &str) -> Option<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(Self(trimmed.to_string()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CompoundQuery {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identidad estable del compuesto en la base de datos remota.
///
/// `id` no cambia mientras la vista actual esté vigente; una nueva búsqueda
/// crea una identidad nueva.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundIdentity {
  pub id: i64,
  pub canonical_name: String,
}

impl CompoundIdentity {
  pub fn new(id: i64, canonical_name: impl Into<String>) -> Self {
    Self { id, canonical_name: canonical_name.into() }
  }

  /// Nombre canónico: primer sinónimo o, si no hay, el texto de la búsqueda.
  pub fn resolve(id: i64, synonyms: Option<&SynonymSet>, query: &CompoundQuery) -> Self {
    let name = synonyms.and_then(|s| s.first()).unwrap_or(query.as_str());
    Self::new(id, name)
  }

  /// Referencia determinista a la imagen 2D.
  pub fn image_reference(&self, rest_base: &str) -> String {
    format!("{}/compound/cid/{}/PNG?image_size=large", rest_base.trim_end_matches('/'), self.id)
  }

  /// Página pública del compuesto.
  pub fn page_reference(&self, page_base: &str) -> String {
    format!("{}/{}", page_base.trim_end_matches('/'), self.id)
  }
}

/// Propiedades del compuesto. Sólo `formula` es obligatoria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundProperties {
  pub formula: String,
  pub molecular_weight: Option<String>,
  pub iupac_name: Option<String>,
  pub connectivity_smiles: Option<String>,
  pub full_smiles: Option<String>,
  pub inchi_key: Option<String>,
  pub charge: Option<i64>,
}

impl CompoundProperties {
  pub fn new(formula: impl Into<String>) -> Self {
    Self { formula: formula.into(), ..Default::default() }
  }

  /// SMILES de conectividad, con el SMILES completo como alternativa.
  pub fn connectivity_or_full(&self) -> Option<&str> {
    self.connectivity_smiles.as_deref().or(self.full_smiles.as_deref())
  }

  /// SMILES completo, con el de conectividad como alternativa.
  pub fn full_or_connectivity(&self) -> Option<&str> {
    self.full_smiles.as_deref().or(self.connectivity_smiles.as_deref())
  }

  pub fn charge_or_neutral(&self) -> i64 {
    self.charge.unwrap_or(0)
  }
}

/// Sinónimos en el orden devuelto por la base de datos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymSet(Vec<String>);

impl SynonymSet {
  pub fn new(names: Vec<String>) -> Self {
    Self(names)
  }

  pub fn first(&self) -> Option<&str> {
    self.0.first().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn all(&self) -> &[String] {
    &self.0
  }

  /// Los primeros `limit` sinónimos.
  pub fn top(&self, limit: usize) -> &[String] {
    &self.0[..self.0.len().min(limit)]
  }
}

impl From<Vec<String>> for SynonymSet {
  fn from(names: Vec<String>) -> Self {
    Self(names)
  }
}

/// Datos estructurales: fichero 3D opaco y referencia a la imagen 2D.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructurePayload {
  pub model_3d: Option<String>,
  pub image_2d: String,
}

impl StructurePayload {
  pub fn has_3d(&self) -> bool {
    self.model_3d.is_some()
  }
}

/// Fuente de la descripción que se está mostrando.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionSource {
  #[default]
  Database,
  Generated,
}

impl fmt::Display for DescriptionSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      DescriptionSource::Database => "database",
      DescriptionSource::Generated => "generated",
    };
    write!(f, "{}", s)
  }
}
