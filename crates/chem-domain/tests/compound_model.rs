use chem_domain::{
  capitalize, math_segments, subscript_digits, truncate_chars, CompoundIdentity, CompoundProperties, CompoundQuery,
  SynonymSet, TextSegment,
};

#[test]
fn query_is_trimmed_and_non_empty() {
  assert!(CompoundQuery::parse("   ").is_none());
  assert!(CompoundQuery::parse("").is_none());
  assert_eq!(CompoundQuery::parse("  caffeine \n").unwrap().as_str(), "caffeine");
}

#[test]
fn canonical_name_prefers_first_synonym() {
  let q = CompoundQuery::parse("acetylsalicylic acid").unwrap();
  let syns = SynonymSet::new(vec!["aspirin".into(), "ASA".into()]);
  assert_eq!(CompoundIdentity::resolve(2244, Some(&syns), &q).canonical_name, "aspirin");
  assert_eq!(CompoundIdentity::resolve(2244, None, &q).canonical_name, "acetylsalicylic acid");
  let empty = SynonymSet::default();
  assert_eq!(CompoundIdentity::resolve(2244, Some(&empty), &q).canonical_name, "acetylsalicylic acid");
}

#[test]
fn references_derive_from_id() {
  let id = CompoundIdentity::new(962, "water");
  assert_eq!(id.image_reference("https://host/rest/pug/"),
             "https://host/rest/pug/compound/cid/962/PNG?image_size=large");
  assert_eq!(id.page_reference("https://host/compound"), "https://host/compound/962");
}

#[test]
fn smiles_fallbacks_and_neutral_charge() {
  let mut p = CompoundProperties::new("H2O");
  assert_eq!(p.connectivity_or_full(), None);
  p.full_smiles = Some("O".into());
  assert_eq!(p.connectivity_or_full(), Some("O"));
  assert_eq!(p.full_or_connectivity(), Some("O"));
  assert_eq!(p.charge_or_neutral(), 0);
}

#[test]
fn synonyms_top_is_bounded() {
  let names: Vec<String> = (0..12).map(|i| format!("n{}", i)).collect();
  let s = SynonymSet::new(names);
  assert_eq!(s.top(8).len(), 8);
  assert_eq!(SynonymSet::new(vec!["a".into()]).top(8).len(), 1);
}

#[test]
fn text_helpers() {
  assert_eq!(subscript_digits("C6H12O6"), "C₆H₁₂O₆");
  assert_eq!(capitalize("water"), "Water");
  assert_eq!(capitalize(""), "");
  assert_eq!(truncate_chars("abcdef", 3), "abc…");
  assert_eq!(truncate_chars("abc", 3), "abc");
}

#[test]
fn math_segments_split_inline_and_display() {
  let segs = math_segments("Water ($H_2O$) and $$CO_2$$ gas, costs $5");
  assert_eq!(segs,
             vec![TextSegment::Plain("Water (".into()),
                  TextSegment::Math { source: "H_2O".into(), display: false },
                  TextSegment::Plain(") and ".into()),
                  TextSegment::Math { source: "CO_2".into(), display: true },
                  TextSegment::Plain(" gas, costs $5".into())]);
}
