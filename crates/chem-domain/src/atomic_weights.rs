// atomic_weights.rs
//! Tabla de pesos atómicos estándar (g/mol) indexada por símbolo.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Entrada de la tabla periódica: símbolo y masa atómica relativa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
  pub symbol: &'static str,
  pub atomic_mass: f64,
}

const fn el(symbol: &'static str, atomic_mass: f64) -> Element {
  Element { symbol, atomic_mass }
}

pub const ELEMENTS: [Element; 118] =
  [el("H", 1.008),
   el("He", 4.002602),
   el("Li", 6.94),
   el("Be", 9.012183),
   el("B", 10.81),
   el("C", 12.011),
   el("N", 14.0067),
   el("O", 15.9994),
   el("F", 18.998403163),
   el("Ne", 20.1797),
   el("Na", 22.98976928),
   el("Mg", 24.305),
   el("Al", 26.9815385),
   el("Si", 28.085),
   el("P", 30.973762),
   el("S", 32.065),
   el("Cl", 35.45),
   el("Ar", 39.948),
   el("K", 39.0983),
   el("Ca", 40.078),
   el("Sc", 44.955912),
   el("Ti", 47.867),
   el("V", 50.9415),
   el("Cr", 52.0),
   el("Mn", 54.938044),
   el("Fe", 55.845),
   el("Co", 58.933194),
   el("Ni", 58.6934),
   el("Cu", 63.546),
   el("Zn", 65.38),
   el("Ga", 69.723),
   el("Ge", 72.61),
   el("As", 74.921595),
   el("Se", 78.96),
   el("Br", 79.904),
   el("Kr", 83.798),
   el("Rb", 85.4678),
   el("Sr", 87.62),
   el("Y", 88.90584),
   el("Zr", 91.224),
   el("Nb", 92.90637),
   el("Mo", 95.95),
   el("Tc", 98.0),
   el("Ru", 101.07),
   el("Rh", 102.9055),
   el("Pd", 106.42),
   el("Ag", 107.8682),
   el("Cd", 112.411),
   el("In", 114.818),
   el("Sn", 118.71),
   el("Sb", 121.76),
   el("Te", 127.6),
   el("I", 126.90447),
   el("Xe", 131.293),
   el("Cs", 132.90545196),
   el("Ba", 137.327),
   el("La", 138.90547),
   el("Ce", 140.116),
   el("Pr", 140.90765),
   el("Nd", 144.242),
   el("Pm", 145.0),
   el("Sm", 150.36),
   el("Eu", 151.964),
   el("Gd", 157.25),
   el("Tb", 158.92535),
   el("Dy", 162.5),
   el("Ho", 164.93032),
   el("Er", 167.259),
   el("Tm", 168.93421),
   el("Yb", 173.054),
   el("Lu", 174.967),
   el("Hf", 178.49),
   el("Ta", 180.94788),
   el("W", 183.84),
   el("Re", 186.207),
   el("Os", 190.23),
   el("Ir", 192.217),
   el("Pt", 195.084),
   el("Au", 196.966569),
   el("Hg", 200.59),
   el("Tl", 204.3833),
   el("Pb", 207.2),
   el("Bi", 208.9804),
   el("Po", 209.0),
   el("At", 210.0),
   el("Rn", 222.0),
   el("Fr", 223.0),
   el("Ra", 226.0),
   el("Ac", 227.0),
   el("Th", 232.03774),
   el("Pa", 231.035882),
   el("U", 238.028913),
   el("Np", 237.0),
   el("Pu", 244.0),
   el("Am", 243.0),
   el("Cm", 247.0),
   el("Bk", 247.0),
   el("Cf", 251.0),
   el("Es", 252.0),
   el("Fm", 257.0),
   el("Md", 258.0),
   el("No", 259.0),
   el("Lr", 266.0),
   el("Rf", 267.0),
   el("Db", 268.0),
   el("Sg", 269.0),
   el("Bh", 270.0),
   el("Hs", 269.0),
   el("Mt", 278.0),
   el("Ds", 281.0),
   el("Rg", 282.0),
   el("Cn", 285.0),
   el("Nh", 286.0),
   el("Fl", 289.0),
   el("Mc", 289.0),
   el("Lv", 293.0),
   el("Ts", 294.0),
   el("Og", 294.0)];

static BY_SYMBOL: Lazy<HashMap<&'static str, f64>> =
  Lazy::new(|| ELEMENTS.iter().map(|e| (e.symbol, e.atomic_mass)).collect());

/// Masa atómica del símbolo o `None` si no está tabulado.
pub fn atomic_weight(symbol: &str) -> Option<f64> {
  BY_SYMBOL.get(symbol).copied()
}
