// Archivo: render.rs
// Propósito: texto de terminal para la vista del compuesto y los avisos.
use chem_domain::{math_segments, subscript_digits, truncate_chars, CompositionRow, TextSegment};
use chem_persistence::Theme;
use chem_workflow::{DescriptionText, Notification, ViewRecord};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;
const NOTICE_MAX_CHARS: usize = 120;
const MISSING: &str = "-";
const NOT_AVAILABLE: &str = "N/A";

struct Palette {
  heading: &'static str,
  reset: &'static str,
  bar: char,
}

fn palette(theme: Theme) -> Palette {
  match theme {
    Theme::Light => Palette { heading: "", reset: "", bar: '#' },
    Theme::Dark => Palette { heading: "\x1b[1;36m", reset: "\x1b[0m", bar: '█' },
  }
}

/// Barra proporcional al porcentaje.
pub fn composition_bar(row: &CompositionRow, fill: char) -> String {
  let filled = ((row.percent_of_total / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
  let mut bar: String = std::iter::repeat(fill).take(filled).collect();
  bar.extend(std::iter::repeat(' ').take(BAR_WIDTH - filled));
  bar
}

/// Texto con las fórmulas `$...$` sin delimitadores y con subíndices.
pub fn plain_math(text: &str) -> String {
  math_segments(text).into_iter()
                     .map(|s| match s {
                       TextSegment::Plain(p) => p,
                       TextSegment::Math { source, .. } => {
                         subscript_digits(&source.replace(['_', '{', '}'], ""))
                       }
                     })
                     .collect()
}

fn field(value: Option<&str>) -> &str {
  value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

/// Ficha del compuesto sin la descripción.
pub fn render_record(record: &ViewRecord, theme: Theme) -> String {
  let p = palette(theme);
  let mut out = String::new();
  let props = record.properties.as_ref();

  let _ = writeln!(out, "{}{} (CID {}){}", p.heading, record.display_name, record.identity.id, p.reset);
  let _ = writeln!(out, "  IUPAC:      {}", field(props.and_then(|p| p.iupac_name.as_deref())));
  let _ = writeln!(out,
                   "  Fórmula:    {}",
                   props.map(|p| subscript_digits(&p.formula)).unwrap_or_else(|| MISSING.into()));
  let _ = writeln!(out,
                   "  Empírica:   {}",
                   record.empirical_formula.as_deref().map(subscript_digits).unwrap_or_else(|| MISSING.into()));
  let _ = writeln!(out,
                   "  Peso:       {}",
                   props.and_then(|p| p.molecular_weight.as_deref())
                        .map(|w| format!("{} g/mol", w))
                        .unwrap_or_else(|| MISSING.into()));
  let _ = writeln!(out, "  Carga:      {}", props.map(|p| p.charge_or_neutral()).unwrap_or(0));
  let _ = writeln!(out, "  SMILES:     {}", field(props.and_then(|p| p.connectivity_or_full())));
  let _ = writeln!(out, "  SMILES iso: {}", field(props.and_then(|p| p.full_or_connectivity())));
  let inchi_key = props.and_then(|p| p.inchi_key.as_deref()).filter(|k| !k.trim().is_empty());
  let _ = writeln!(out, "  InChIKey:   {}", inchi_key.unwrap_or(NOT_AVAILABLE));

  if !record.composition.is_empty() {
    let _ = writeln!(out, "{}Composición{}", p.heading, p.reset);
    for row in &record.composition {
      let _ = writeln!(out, "  {:<3}{:>7} {}", row.element, row.display_percent(), composition_bar(row, p.bar));
    }
  }

  if !record.synonyms.is_empty() {
    let _ = writeln!(out, "{}Sinónimos{}", p.heading, p.reset);
    let _ = writeln!(out, "  {}", record.synonyms.join(", "));
  }

  let _ = writeln!(out, "{}Estructura{}", p.heading, p.reset);
  let _ = writeln!(out, "  2D: {}", record.structure.image_2d);
  match &record.structure.model_3d {
    Some(sdf) => {
      let _ = writeln!(out, "  3D: modelo disponible ({} líneas)", sdf.lines().count());
    }
    None => {
      let _ = writeln!(out, "  3D: no hay estructura 3D disponible");
    }
  }
  let _ = writeln!(out, "  Página: {}", record.page_url);
  out
}

/// Cabecera de la descripción con la fuente activa.
pub fn description_heading(record: &ViewRecord, theme: Theme) -> String {
  let p = palette(theme);
  let label = match &record.description.text {
    DescriptionText::Generated(_) => "Descripción (generada)",
    DescriptionText::Database(_) => "Descripción (base de datos)",
    DescriptionText::Placeholder(_) => "Descripción",
  };
  let suffix = if record.description.generating { " [generando...]" } else { "" };
  format!("{}{}{}{}", p.heading, label, p.reset, suffix)
}

pub fn render_notification(notice: &Notification) -> String {
  let text = match notice {
    Notification::NotFound { query } => format!("No se encontró el compuesto '{}'.", query),
    Notification::PartialDataUnavailable { fields, .. } => {
      format!("Algunos datos no están disponibles: {}.", fields.join(", "))
    }
    Notification::GenerationUnavailable { reason } => format!("No se pudo generar la descripción: {}", reason),
    Notification::CredentialRequired => "Introduce una credencial para generar descripciones.".to_string(),
    Notification::CredentialSaved => "Credencial guardada.".to_string(),
    Notification::CredentialRejected { reason } => format!("Credencial rechazada: {}", reason),
    Notification::HistoryCleared => "Historial borrado.".to_string(),
    Notification::ThemeChanged(theme) => format!("Tema: {}", theme),
  };
  truncate_chars(&text, NOTICE_MAX_CHARS)
}
