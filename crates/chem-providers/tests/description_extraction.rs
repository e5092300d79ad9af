use chem_providers::{extract_description, DescriptionEntry};
use serde_json::json;

#[test]
fn skips_entries_without_description() {
  let entries: Vec<DescriptionEntry> = serde_json::from_value(json!([
    {"CID": 2244, "Title": "Aspirin"},
    {"CID": 2244, "Description": "Aspirin is an NSAID.", "DescriptionSourceName": "LiverTox"},
    {"CID": 2244, "Description": "Second source."}
  ])).unwrap();
  assert_eq!(extract_description(&entries).as_deref(), Some("Aspirin is an NSAID."));
  assert_eq!(entries[1].source_name.as_deref(), Some("LiverTox"));
}

#[test]
fn segment_lists_are_joined_with_blank_lines() {
  let entries = vec![DescriptionEntry::segments(vec!["First.".into(), "Second.".into()])];
  assert_eq!(extract_description(&entries).as_deref(), Some("First.\n\nSecond."));
}

#[test]
fn empty_content_is_skipped() {
  let entries: Vec<DescriptionEntry> = serde_json::from_value(json!([
    {"Description": ""},
    {"Description": []},
    {"Description": {"unexpected": true}},
    {"Description": "Found it."}
  ])).unwrap();
  assert_eq!(extract_description(&entries).as_deref(), Some("Found it."));
}

#[test]
fn nothing_usable_is_absent() {
  assert!(extract_description(&[]).is_none());
  let entries: Vec<DescriptionEntry> = serde_json::from_value(json!([{"Title": "x"}, {"Description": 42}])).unwrap();
  assert!(extract_description(&entries).is_none());
}
