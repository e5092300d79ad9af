//! chemlens: presentación de terminal sobre `chem_workflow`.
//!
//! `app` arma el modelo de vista con los clientes reales a partir del
//! entorno; `render` convierte `ViewRecord`s y avisos en texto.
pub mod app;
pub mod render;

pub use app::{init_logging, App, AppError};
