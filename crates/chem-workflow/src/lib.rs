//! chem-workflow: modelo de vista de la aplicación.
//!
//! - `CompoundViewModel` coordina búsquedas, publica `ViewRecord`s
//!   inmutables por un canal `watch` y avisos por un canal `broadcast`.
//! - `DescriptionProvider` decide qué descripción se muestra y cuándo se
//!   pide una generada.
//! - `Revealer` reproduce el texto generado carácter a carácter.

pub mod config;
pub mod description;
pub mod errors;
pub mod reconciler;
pub mod reveal;
pub mod view;

pub use config::ViewConfig;
pub use description::{DescriptionProvider, DescriptionState, DescriptionText, DescriptionView};
pub use errors::{Result, WorkflowError};
pub use reconciler::{CompoundViewModel, DescriptionOutcome, SearchOutcome, ViewReceiver};
pub use reveal::{Reveal, RevealEnd, RevealHandle, Revealer};
pub use view::{Notification, ViewRecord};
