//! Descripción del compuesto: qué texto se muestra (base de datos o
//! generado) y el ciclo de vida de la petición de generación.
mod provider;
mod view;

pub use provider::{DescriptionProvider, DescriptionState, GenerationCompletion, GenerationPlan, GenerationTicket};
pub use view::{DescriptionText, DescriptionView, DATABASE_UNAVAILABLE, GENERATED_UNAVAILABLE};
