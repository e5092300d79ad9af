mod atomic_weights;
mod compound;
mod display;
mod errors;
mod formula;
mod history;

pub use atomic_weights::{atomic_weight, Element, ELEMENTS};
pub use compound::{
  CompoundIdentity, CompoundProperties, CompoundQuery, DescriptionSource, StructurePayload, SynonymSet,
  SYNONYM_DISPLAY_LIMIT,
};
pub use display::{capitalize, math_segments, subscript_digits, truncate_chars, TextSegment};
pub use errors::DomainError;
pub use formula::{composition, empirical_formula, molar_mass, parse_formula, CompositionRow, ElementCounts};
pub use history::{SearchHistory, HISTORY_LIMIT};
