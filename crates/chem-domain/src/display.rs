// display.rs
//! Utilidades de texto para la capa de presentación.

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Sustituye cada dígito ASCII por su subíndice Unicode (`C6H12O6` →
/// `C₆H₁₂O₆`).
pub fn subscript_digits(text: &str) -> String {
  text.chars()
      .map(|c| match c.to_digit(10) {
        Some(d) if c.is_ascii_digit() => SUBSCRIPTS[d as usize],
        _ => c,
      })
      .collect()
}

/// Primera letra en mayúscula, el resto intacto.
pub fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Recorta a `max` caracteres añadiendo `…` cuando hace falta.
pub fn truncate_chars(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let mut out: String = text.chars().take(max).collect();
  out.push('…');
  out
}

/// Segmento de texto con o sin notación matemática.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
  Plain(String),
  /// Contenido entre delimitadores `$...$` (`display = false`) o
  /// `$$...$$` (`display = true`), sin los delimitadores.
  Math { source: String, display: bool },
}

/// Divide un texto en segmentos planos y matemáticos. Un delimitador sin
/// cierre se trata como texto plano.
pub fn math_segments(text: &str) -> Vec<TextSegment> {
  let mut segments = Vec::new();
  let mut plain = String::new();
  let mut rest = text;
  while let Some(start) = rest.find('$') {
    let display = rest[start..].starts_with("$$");
    let delimiter = if display { "$$" } else { "$" };
    let body_start = start + delimiter.len();
    match rest[body_start..].find(delimiter) {
      Some(len) if len > 0 => {
        plain.push_str(&rest[..start]);
        if !plain.is_empty() {
          segments.push(TextSegment::Plain(std::mem::take(&mut plain)));
        }
        segments.push(TextSegment::Math { source: rest[body_start..body_start + len].to_string(), display });
        rest = &rest[body_start + len + delimiter.len()..];
      }
      _ => {
        plain.push_str(&rest[..body_start]);
        rest = &rest[body_start..];
      }
    }
  }
  plain.push_str(rest);
  if !plain.is_empty() {
    segments.push(TextSegment::Plain(plain));
  }
  segments
}
