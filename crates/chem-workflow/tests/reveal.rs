use chem_workflow::{Reveal, RevealEnd, Revealer};
use std::time::Duration;
use tokio::time::Instant;

#[test]
fn reveal_ends_with_full_text() {
  let frames: Vec<String> = Reveal::new("Aspirin").collect();
  assert_eq!(frames.len(), 7);
  assert_eq!(frames[0], "A");
  assert_eq!(frames.last().map(String::as_str), Some("Aspirin"));
}

#[tokio::test(start_paused = true)]
async fn play_paces_frames_by_interval() {
  let revealer = Revealer::new(Duration::from_millis(10));
  let start = Instant::now();
  let mut frames = Vec::new();
  let end = revealer.start("abcd").play(|f| frames.push(f.to_string())).await;

  assert_eq!(end, RevealEnd::Completed);
  assert_eq!(frames, vec!["a", "ab", "abc", "abcd"]);
  assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_reveal() {
  let revealer = Revealer::new(Duration::from_millis(10));
  let mut handle = revealer.start("abcdef");
  assert_eq!(handle.next_frame().await.as_deref(), Some("a"));
  assert_eq!(handle.next_frame().await.as_deref(), Some("ab"));
  revealer.cancel();
  assert!(handle.is_cancelled());
  assert_eq!(handle.next_frame().await, None);
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_previous_reveal() {
  let revealer = Revealer::new(Duration::from_millis(10));
  let mut first = revealer.start("old text");
  assert_eq!(first.next_frame().await.as_deref(), Some("o"));

  let second = revealer.start("new");
  assert_eq!(first.next_frame().await, None);

  let mut frames = Vec::new();
  assert_eq!(second.play(|f| frames.push(f.to_string())).await, RevealEnd::Completed);
  assert_eq!(frames.last().map(String::as_str), Some("new"));
}

#[tokio::test(start_paused = true)]
async fn cancel_during_play_reports_cancelled() {
  let revealer = Revealer::new(Duration::from_millis(10));
  let canceller = revealer.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(25)).await;
    canceller.cancel();
  });

  let mut frames = Vec::new();
  let end = revealer.start("abcdefghij").play(|f| frames.push(f.to_string())).await;
  assert_eq!(end, RevealEnd::Cancelled);
  assert!(frames.len() < 10);
}
