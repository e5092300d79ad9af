// formula.rs
//! Análisis de fórmulas elementales: conteo por elemento, fórmula empírica
//! y composición másica.
//!
//! No se valida contra la tabla periódica: un símbolo desconocido conserva
//! su conteo y aporta masa cero en `composition`.
use crate::atomic_weights::atomic_weight;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

static ELEMENT_TOKEN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"([A-Z][a-z]?)([0-9]*)").expect("patrón de símbolo elemental válido"));

/// Conteo de átomos por símbolo, en el orden en que aparece cada símbolo
/// por primera vez.
pub type ElementCounts = IndexMap<String, u64>;

/// Fila de composición: masa aportada por un elemento y su porcentaje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
  pub element: String,
  pub mass_contribution: f64,
  /// Porcentaje redondeado a un decimal.
  pub percent_of_total: f64,
}

impl CompositionRow {
  /// Porcentaje listo para mostrar, p. ej. `"40.0%"`.
  pub fn display_percent(&self) -> String {
    format!("{:.1}%", self.percent_of_total)
  }
}

/// Recorre la fórmula de izquierda a derecha acumulando conteos. Un símbolo
/// repetido suma sus apariciones; sin dígitos el conteo es 1.
pub fn parse_formula(formula: &str) -> ElementCounts {
  let mut counts = ElementCounts::new();
  for caps in ELEMENT_TOKEN.captures_iter(formula) {
    let symbol = &caps[1];
    let digits = &caps[2];
    let count = if digits.is_empty() { 1 } else { digits.parse::<u64>().unwrap_or(u64::MAX) };
    let entry = counts.entry(symbol.to_string()).or_insert(0);
    *entry = entry.saturating_add(count);
  }
  counts
}

fn gcd(a: u64, b: u64) -> u64 {
  if b == 0 {
    a
  } else {
    gcd(b, a % b)
  }
}

/// Reduce la fórmula dividiendo todos los conteos por su MCD. Si el MCD es
/// 1 (o no hay elementos) la fórmula se devuelve sin cambios.
pub fn empirical_formula(formula: &str) -> String {
  let counts = parse_formula(formula);
  let divisor = counts.values().copied().fold(0, gcd);
  if divisor <= 1 {
    return formula.to_string();
  }
  let mut out = String::with_capacity(formula.len());
  for (symbol, count) in &counts {
    out.push_str(symbol);
    let reduced = count / divisor;
    if reduced > 1 {
      let _ = write!(out, "{}", reduced);
    }
  }
  out
}

fn round_one_decimal(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

/// Composición másica ordenada de mayor a menor aporte. Una fórmula cuya
/// masa total es cero produce filas al 0%.
pub fn composition(formula: Option<&str>) -> Vec<CompositionRow> {
  let Some(formula) = formula else {
    return Vec::new();
  };
  let counts = parse_formula(formula);
  let masses: Vec<(String, f64)> = counts.into_iter()
                                         .map(|(symbol, count)| {
                                           let mass = atomic_weight(&symbol).unwrap_or(0.0) * count as f64;
                                           (symbol, mass)
                                         })
                                         .collect();
  let total: f64 = masses.iter().map(|(_, m)| m).sum();
  let mut rows: Vec<CompositionRow> =
    masses.into_iter()
          .map(|(element, mass_contribution)| {
            let percent = if total > 0.0 { mass_contribution / total * 100.0 } else { 0.0 };
            CompositionRow { element, mass_contribution, percent_of_total: round_one_decimal(percent) }
          })
          .collect();
  rows.sort_by(|a, b| b.mass_contribution.total_cmp(&a.mass_contribution));
  rows
}

/// Masa molar calculada a partir de la tabla de pesos atómicos.
pub fn molar_mass(formula: &str) -> f64 {
  parse_formula(formula).iter()
                        .map(|(symbol, count)| atomic_weight(symbol).unwrap_or(0.0) * *count as f64)
                        .sum()
}
