use chem_persistence::{
  InMemoryPreferenceStore, PersistenceError, PersistentPreferences, PreferenceStore, Theme, KEY_SEARCH_HISTORY,
};
use std::sync::Arc;

fn prefs() -> (PersistentPreferences, Arc<InMemoryPreferenceStore>) {
  let store = Arc::new(InMemoryPreferenceStore::new());
  (PersistentPreferences::new(store.clone()), store)
}

#[test]
fn record_search_updates_history_and_last_query() {
  let (p, _) = prefs();
  p.record_search("Water").unwrap();
  p.record_search("water").unwrap();
  let h = p.record_search("Ethanol").unwrap();
  assert_eq!(h.entries(), &["Ethanol", "water"]);
  assert_eq!(p.history().unwrap().entries(), &["Ethanol", "water"]);
  assert_eq!(p.last_query().unwrap().as_deref(), Some("Ethanol"));
}

#[test]
fn history_is_bounded() {
  let (p, _) = prefs();
  for i in 0..11 {
    p.record_search(&format!("c{}", i)).unwrap();
  }
  let h = p.history().unwrap();
  assert_eq!(h.len(), 10);
  assert_eq!(h.entries()[0], "c10");
}

#[test]
fn corrupt_history_is_treated_as_empty() {
  let (p, store) = prefs();
  store.set(KEY_SEARCH_HISTORY, "not-json").unwrap();
  assert!(p.history().unwrap().is_empty());
  p.record_search("aspirin").unwrap();
  assert_eq!(p.history().unwrap().entries(), &["aspirin"]);
}

#[test]
fn clear_history_keeps_last_query() {
  let (p, _) = prefs();
  p.record_search("aspirin").unwrap();
  p.clear_history().unwrap();
  assert!(p.history().unwrap().is_empty());
  assert_eq!(p.last_query().unwrap().as_deref(), Some("aspirin"));
}

#[test]
fn theme_defaults_to_light_and_toggles() {
  let (p, store) = prefs();
  assert_eq!(p.theme().unwrap(), Theme::Light);
  assert_eq!(p.toggle_theme().unwrap(), Theme::Dark);
  assert_eq!(store.get("themeChoice").unwrap().as_deref(), Some("dark"));
  assert_eq!(p.toggle_theme().unwrap(), Theme::Light);
  store.set("themeChoice", "sepia").unwrap();
  assert_eq!(p.theme().unwrap(), Theme::Light);
}

#[test]
fn credential_is_trimmed_and_empty_is_rejected() {
  let (p, _) = prefs();
  assert!(p.credential().unwrap().is_none());
  assert_eq!(p.save_credential("  secret-key ").unwrap(), "secret-key");
  assert_eq!(p.credential().unwrap().as_deref(), Some("secret-key"));
  match p.save_credential("   ") {
    Err(PersistenceError::Validation(_)) => {}
    other => panic!("expected validation error, got {:?}", other),
  }
  assert_eq!(p.credential().unwrap().as_deref(), Some("secret-key"));
}
