// Archivo: reveal.rs
// Propósito: efecto de revelado incremental del texto generado.
//
// `Reveal` es la secuencia perezosa de prefijos; `Revealer` la reproduce
// con un intervalo fijo y permite cancelarla o reiniciarla: cada `start`
// invalida las reproducciones anteriores.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Prefijos crecientes de un texto, un carácter más en cada paso. El
/// último elemento es el texto completo.
#[derive(Debug, Clone)]
pub struct Reveal {
  text: String,
  /// Fin en bytes del próximo prefijo.
  ends: Vec<usize>,
  next: usize,
}

impl Reveal {
  pub fn new(text: &str) -> Self {
    let ends = text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
    Reveal { text: text.to_string(), ends, next: 0 }
  }

  pub fn text(&self) -> &str {
    &self.text
  }
}

impl Iterator for Reveal {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    let end = *self.ends.get(self.next)?;
    self.next += 1;
    Some(self.text[..end].to_string())
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let left = self.ends.len() - self.next;
    (left, Some(left))
  }
}

/// Cómo terminó una reproducción.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEnd {
  Completed,
  Cancelled,
}

#[derive(Debug, Clone)]
pub struct Revealer {
  interval: Duration,
  epoch: Arc<AtomicU64>,
}

impl Revealer {
  pub fn new(interval: Duration) -> Self {
    Revealer { interval, epoch: Arc::new(AtomicU64::new(0)) }
  }

  /// Empieza a revelar `text` y cancela cualquier reproducción previa.
  pub fn start(&self, text: &str) -> RevealHandle {
    let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
    RevealHandle { reveal: Reveal::new(text),
                   interval: self.interval,
                   epoch,
                   current: Arc::clone(&self.epoch),
                   started: false,
                   finished: false }
  }

  pub fn cancel(&self) {
    self.epoch.fetch_add(1, Ordering::SeqCst);
  }
}

/// Reproducción en curso.
#[derive(Debug)]
pub struct RevealHandle {
  reveal: Reveal,
  interval: Duration,
  epoch: u64,
  current: Arc<AtomicU64>,
  started: bool,
  finished: bool,
}

impl RevealHandle {
  pub fn is_cancelled(&self) -> bool {
    self.current.load(Ordering::SeqCst) != self.epoch
  }

  /// Siguiente prefijo. El primero sale sin espera, los demás tras el
  /// intervalo. `None` al terminar o si se canceló.
  pub async fn next_frame(&mut self) -> Option<String> {
    if self.started {
      tokio::time::sleep(self.interval).await;
    }
    self.started = true;
    if self.is_cancelled() {
      return None;
    }
    let frame = self.reveal.next();
    self.finished = frame.is_none();
    frame
  }

  /// Entrega cada prefijo a `sink` hasta el final o la cancelación.
  pub async fn play<F>(mut self, mut sink: F) -> RevealEnd
    where F: FnMut(&str)
  {
    while let Some(frame) = self.next_frame().await {
      sink(&frame);
    }
    if self.finished {
      RevealEnd::Completed
    } else {
      RevealEnd::Cancelled
    }
  }
}
