//! Crate `chem-providers`: acceso asíncrono a los servicios remotos.
//!
//! - `CompoundEndpoints` describe las llamadas individuales a la base de
//!   datos de compuestos; `PubChemClient` las implementa sobre PUG REST.
//! - `CompoundGateway` agrupa esas llamadas en "resolver identidad" y
//!   "traer todo", degradando cada lectura fallida a un valor ausente.
//! - `TextGenerator` / `GeminiClient` piden la descripción generada.
//! - `stubs` ofrece implementaciones en memoria para pruebas.
//!
//! Ejemplo rápido:
//! ```rust
//! use chem_providers::stubs::{StubCompound, StubCompoundEndpoints};
//! use chem_providers::CompoundGateway;
//! use std::sync::Arc;
//! let endpoints = StubCompoundEndpoints::new().with_compound("water", StubCompound::new(962, "H2O"));
//! let gateway = CompoundGateway::new(Arc::new(endpoints));
//! ```
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod gateway;
pub mod generation;
pub mod pubchem;
pub mod stubs;

pub use config::ProviderConfig;
pub use endpoints::{extract_description, CompoundEndpoints, DescriptionContent, DescriptionEntry};
pub use errors::{ProviderError, Result};
pub use gateway::{CompoundBundle, CompoundGateway};
pub use generation::{generation_prompt, GeminiClient, TextGenerator};
pub use pubchem::PubChemClient;
