mod common;

use chem_domain::DescriptionSource;
use chem_providers::stubs::StubReply;
use chem_workflow::description::GENERATED_UNAVAILABLE;
use chem_workflow::{DescriptionOutcome, DescriptionState, DescriptionText, Notification, WorkflowError};
use common::{drain, Harness, ASPIRIN_DB, WATER_DB};
use std::time::Duration;

fn text_of(h: &Harness) -> DescriptionText {
  h.vm.current().expect("vista publicada").description.text.clone()
}

#[tokio::test]
async fn generate_without_compound_does_nothing() {
  let h = Harness::with_credential("key");
  assert_eq!(h.vm.request_generated().await.unwrap(), DescriptionOutcome::NoCompound);
  assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn missing_credential_prompts_without_network_call() {
  let h = Harness::new();
  h.vm.search("aspirin").await.unwrap();
  let mut notices = h.vm.subscribe_notifications();

  assert_eq!(h.vm.request_generated().await.unwrap(), DescriptionOutcome::CredentialRequired);
  assert_eq!(h.generator.call_count(), 0);
  assert_eq!(drain(&mut notices), vec![Notification::CredentialRequired]);
  assert_eq!(text_of(&h), DescriptionText::Database(ASPIRIN_DB.to_string()));
}

#[tokio::test]
async fn generated_text_is_shown_and_cached() {
  let h = Harness::with_credential("key");
  h.generator.push_reply(StubReply::Text("Aspirin relieves pain; see $C_9H_8O_4$.".into()));
  h.vm.search("aspirin").await.unwrap();

  assert_eq!(h.vm.request_generated().await.unwrap(), DescriptionOutcome::Generated);
  let view = h.vm.current().unwrap().description.clone();
  assert_eq!(view.source, DescriptionSource::Generated);
  assert_eq!(view.text, DescriptionText::Generated("Aspirin relieves pain; see $C_9H_8O_4$.".into()));
  assert!(view.can_regenerate);
  assert!(!view.generating);
  assert_eq!(h.generator.credentials(), vec!["key"]);
  assert!(h.generator.prompts()[0].contains("\"aspirin\""));

  // Volver a la base de datos y de nuevo a la generada no llama a la red.
  h.vm.select_source(DescriptionSource::Database).unwrap();
  assert_eq!(text_of(&h), DescriptionText::Database(ASPIRIN_DB.to_string()));
  assert_eq!(h.vm.request_generated().await.unwrap(), DescriptionOutcome::ShowingCached);
  assert_eq!(h.generator.call_count(), 1);
  assert_eq!(text_of(&h), DescriptionText::Generated("Aspirin relieves pain; see $C_9H_8O_4$.".into()));
}

#[tokio::test]
async fn generated_text_never_leaks_into_next_compound() {
  let h = Harness::with_credential("key");
  h.vm.search("aspirin").await.unwrap();
  h.vm.request_generated().await.unwrap();
  assert!(matches!(text_of(&h), DescriptionText::Generated(_)));

  h.vm.search("water").await.unwrap();
  let view = h.vm.current().unwrap().description.clone();
  assert_eq!(view.source, DescriptionSource::Database);
  assert_eq!(view.text, DescriptionText::Database(WATER_DB.to_string()));

  let record = h.vm.select_source(DescriptionSource::Generated).unwrap().unwrap();
  assert_eq!(record.description.text, DescriptionText::Placeholder(GENERATED_UNAVAILABLE));
  assert!(!record.description.can_regenerate);
  assert_eq!(h.generator.call_count(), 1);
}

#[tokio::test]
async fn failed_generation_reverts_to_database() {
  let h = Harness::with_credential("key");
  h.generator.push_reply(StubReply::Status(500));
  h.vm.search("aspirin").await.unwrap();
  let mut notices = h.vm.subscribe_notifications();

  match h.vm.request_generated().await.unwrap() {
    DescriptionOutcome::GenerationFailed(reason) => assert!(reason.contains("500"), "{}", reason),
    other => panic!("se esperaba un fallo, llegó {:?}", other),
  }
  let view = h.vm.current().unwrap().description.clone();
  assert_eq!(view.source, DescriptionSource::Database);
  assert_eq!(view.text, DescriptionText::Database(ASPIRIN_DB.to_string()));
  assert!(matches!(drain(&mut notices).as_slice(), [Notification::GenerationUnavailable { .. }]));
}

#[tokio::test]
async fn failed_regeneration_keeps_cached_text() {
  let h = Harness::with_credential("key");
  h.generator.push_reply(StubReply::Text("first".into()));
  h.generator.push_reply(StubReply::Empty);
  h.vm.search("aspirin").await.unwrap();
  h.vm.request_generated().await.unwrap();

  assert!(matches!(h.vm.regenerate().await.unwrap(), DescriptionOutcome::GenerationFailed(_)));
  assert_eq!(h.vm.current().unwrap().description.source, DescriptionSource::Database);

  assert_eq!(h.vm.request_generated().await.unwrap(), DescriptionOutcome::ShowingCached);
  assert_eq!(text_of(&h), DescriptionText::Generated("first".into()));
  assert_eq!(h.generator.call_count(), 2);
}

#[tokio::test]
async fn regenerate_replaces_cache_on_success() {
  let h = Harness::with_credential("key");
  h.vm.search("aspirin").await.unwrap();
  h.vm.request_generated().await.unwrap();
  assert_eq!(h.vm.regenerate().await.unwrap(), DescriptionOutcome::Generated);
  assert_eq!(text_of(&h), DescriptionText::Generated("generated #2".into()));
}

#[tokio::test]
async fn saving_credential_regenerates_for_loaded_compound() {
  let h = Harness::new();
  h.vm.search("aspirin").await.unwrap();
  let mut notices = h.vm.subscribe_notifications();

  assert_eq!(h.vm.save_credential("  key-1 ").await.unwrap(), DescriptionOutcome::Generated);
  assert_eq!(h.generator.credentials(), vec!["key-1"]);
  assert_eq!(text_of(&h), DescriptionText::Generated("generated #1".into()));

  assert_eq!(h.vm.save_credential("key-2").await.unwrap(), DescriptionOutcome::Generated);
  assert_eq!(h.generator.credentials(), vec!["key-1", "key-2"]);
  assert_eq!(text_of(&h), DescriptionText::Generated("generated #2".into()));
  assert_eq!(drain(&mut notices), vec![Notification::CredentialSaved, Notification::CredentialSaved]);
}

#[tokio::test]
async fn saving_credential_without_compound_only_stores_it() {
  let h = Harness::new();
  assert_eq!(h.vm.save_credential("key").await.unwrap(), DescriptionOutcome::NoCompound);
  assert!(h.vm.has_credential().unwrap());
  assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn empty_credential_is_rejected() {
  let h = Harness::new();
  let mut notices = h.vm.subscribe_notifications();
  assert!(matches!(h.vm.save_credential("   ").await, Err(WorkflowError::Persistence(_))));
  assert!(!h.vm.has_credential().unwrap());
  assert!(matches!(drain(&mut notices).as_slice(), [Notification::CredentialRejected { .. }]));
}

#[tokio::test(start_paused = true)]
async fn generation_for_previous_compound_is_discarded() {
  let h = Harness::with_credential("key");
  h.generator.set_delay(Some(Duration::from_millis(100)));
  h.vm.search("aspirin").await.unwrap();

  let (generated, _) = tokio::join!(h.vm.request_generated(), h.vm.search("water"));
  assert_eq!(generated.unwrap(), DescriptionOutcome::Discarded);

  let record = h.vm.current().unwrap();
  assert_eq!(record.identity.id, 962);
  assert_eq!(record.description.source, DescriptionSource::Database);
  assert!(!record.description.generating);
  assert_eq!(record.description.text, DescriptionText::Database(WATER_DB.to_string()));
}

#[tokio::test(start_paused = true)]
async fn view_shows_generating_while_request_is_in_flight() {
  let h = Harness::with_credential("key");
  h.generator.set_delay(Some(Duration::from_millis(50)));
  h.vm.search("aspirin").await.unwrap();
  let mut views = h.vm.subscribe();

  let watcher = async {
    views.changed().await.unwrap();
    let in_flight = views.borrow_and_update().clone().unwrap();
    in_flight.description.generating
  };
  let (outcome, was_generating) = tokio::join!(h.vm.request_generated(), watcher);
  assert_eq!(outcome.unwrap(), DescriptionOutcome::Generated);
  assert!(was_generating);
  assert!(!h.vm.current().unwrap().description.generating);
}

#[test]
fn state_follows_available_texts() {
  let mut p = chem_workflow::DescriptionProvider::new();
  assert_eq!(p.state(), DescriptionState::None);
  p.load(chem_domain::CompoundIdentity::new(962, "water"), Some(WATER_DB.into()));
  assert_eq!(p.state(), DescriptionState::DatabaseOnly);
  let ticket = match p.plan_generation(Some("key"), false) {
    chem_workflow::description::GenerationPlan::Fetch(t) => t,
    other => panic!("{:?}", other),
  };
  p.complete_generation(&ticket, Ok("text".into()));
  assert_eq!(p.state(), DescriptionState::DatabaseAndGenerated);
  p.clear();
  assert_eq!(p.state(), DescriptionState::None);
}
