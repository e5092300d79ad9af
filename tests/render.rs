use chem_persistence::{InMemoryPreferenceStore, PersistentPreferences, Theme};
use chem_providers::stubs::{StubCompound, StubCompoundEndpoints, StubTextGenerator};
use chem_providers::CompoundGateway;
use chem_workflow::{Notification, SearchOutcome, ViewConfig};
use chemlens::render::{composition_bar, description_heading, plain_math, render_notification, render_record};
use chemlens::App;
use std::sync::Arc;

fn app() -> App {
  let endpoints = StubCompoundEndpoints::new().with_compound("glucose",
                                                             StubCompound::new(5793, "C6H12O6").with_synonyms(&["D-glucose"])
                                                                                               .with_description("A simple sugar."));
  App::with_parts(CompoundGateway::new(Arc::new(endpoints)),
                  Arc::new(StubTextGenerator::new()),
                  PersistentPreferences::new(Arc::new(InMemoryPreferenceStore::new())),
                  ViewConfig::default())
}

#[test]
fn record_renders_formula_with_subscripts_and_placeholders() {
  let app = app();
  let record = match tokio_test::block_on(app.view_model.search("glucose")).unwrap() {
    SearchOutcome::Published(r) => r,
    other => panic!("{:?}", other),
  };
  let text = render_record(&record, Theme::Light);
  assert!(text.starts_with("D-glucose (CID 5793)"));
  assert!(text.contains("C₆H₁₂O₆"));
  assert!(text.contains("Empírica:   CH₂O"));
  assert!(text.contains("Peso:       -"));
  assert!(text.contains("Carga:      0"));
  assert!(text.contains("InChIKey:   N/A"));
  assert!(text.contains("3D: no hay estructura 3D disponible"));
  assert!(text.contains("O    53.3%"));
  assert_eq!(description_heading(&record, Theme::Light), "Descripción (base de datos)");
}

#[test]
fn bar_is_proportional() {
  let row = chem_domain::CompositionRow { element: "O".into(), mass_contribution: 16.0, percent_of_total: 50.0 };
  let bar = composition_bar(&row, '#');
  assert_eq!(bar.chars().count(), 30);
  assert_eq!(bar.chars().filter(|c| *c == '#').count(), 15);
}

#[test]
fn math_is_flattened_for_terminal() {
  assert_eq!(plain_math("Water ($H_2O$) is polar."), "Water (H₂O) is polar.");
  assert_eq!(plain_math("costs $5"), "costs $5");
}

#[test]
fn long_notifications_are_truncated() {
  let reason = "x".repeat(300);
  let text = render_notification(&Notification::GenerationUnavailable { reason });
  assert_eq!(text.chars().count(), 121);
  assert!(text.ends_with('…'));
  assert_eq!(render_notification(&Notification::ThemeChanged(Theme::Dark)), "Tema: dark");
}
