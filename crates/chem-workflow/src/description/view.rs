use chem_domain::DescriptionSource;
use serde::Serialize;

/// Marcador cuando la base de datos no trae descripción.
pub const DATABASE_UNAVAILABLE: &str = "Description unavailable.";
/// Marcador cuando se elige la fuente generada y aún no hay texto.
pub const GENERATED_UNAVAILABLE: &str = "Generated description not available.";

/// Texto a mostrar. Un marcador nunca se confunde con contenido real.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum DescriptionText {
  Database(String),
  Generated(String),
  Placeholder(&'static str),
}

impl DescriptionText {
  pub fn as_str(&self) -> &str {
    match self {
      DescriptionText::Database(t) | DescriptionText::Generated(t) => t,
      DescriptionText::Placeholder(p) => p,
    }
  }

  pub fn is_placeholder(&self) -> bool {
    matches!(self, DescriptionText::Placeholder(_))
  }
}

/// Vista de la descripción incluida en cada `ViewRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionView {
  pub source: DescriptionSource,
  pub text: DescriptionText,
  /// Hay una petición de generación en curso.
  pub generating: bool,
  /// Se ofrece regenerar: fuente generada con texto en caché.
  pub can_regenerate: bool,
}

impl Default for DescriptionView {
  fn default() -> Self {
    DescriptionView { source: DescriptionSource::Database,
                      text: DescriptionText::Placeholder(DATABASE_UNAVAILABLE),
                      generating: false,
                      can_regenerate: false }
  }
}
