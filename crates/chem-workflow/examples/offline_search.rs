// Búsqueda completa contra proveedores en memoria, sin red.
use chem_domain::DescriptionSource;
use chem_persistence::{InMemoryPreferenceStore, PersistentPreferences};
use chem_providers::stubs::{StubCompound, StubCompoundEndpoints, StubTextGenerator};
use chem_providers::CompoundGateway;
use chem_workflow::{CompoundViewModel, SearchOutcome, ViewConfig};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let caffeine = StubCompound::new(2519, "C8H10N4O2").with_synonyms(&["caffeine", "1,3,7-trimethylxanthine"])
                                                     .with_description("Caffeine is a methylxanthine alkaloid.");
  let endpoints = StubCompoundEndpoints::new().with_compound("caffeine", caffeine);
  let vm = CompoundViewModel::new(CompoundGateway::new(Arc::new(endpoints)),
                                  Arc::new(StubTextGenerator::new()),
                                  PersistentPreferences::new(Arc::new(InMemoryPreferenceStore::new())),
                                  ViewConfig::default());

  let record = match vm.search("Caffeine").await.expect("search") {
    SearchOutcome::Published(r) => r,
    other => panic!("sin vista: {:?}", other),
  };
  println!("{} (id {})", record.display_name, record.identity.id);
  println!("empírica: {:?}", record.empirical_formula);
  for row in &record.composition {
    println!("  {} {}", row.element, row.display_percent());
  }
  println!("degradado: {:?}", record.degraded);

  vm.save_credential("demo-key").await.expect("credential");
  println!("generada: {}", vm.current().expect("view").description.text.as_str());
  vm.select_source(DescriptionSource::Database).expect("select");
  println!("base de datos: {}", vm.current().expect("view").description.text.as_str());
}
