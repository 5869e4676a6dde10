//! Batch extraction stage.
//!
//! Enqueue → Tick → Completions. Each tick runs every pending request in
//! parallel with rayon. A single extraction stays single threaded, so
//! results do not depend on scheduling.

use std::sync::Arc;

use rayon::prelude::*;
use web_time::Instant;

use crate::error::ExtractionResult;
use crate::extract::extract;
use crate::field::ScalarField;
#[cfg(feature = "metrics")]
use crate::metrics::{self, ExtractionMetrics};
use crate::types::{ExtractionConfig, ExtractionOutput};

/// Shared field handle that can be sent to worker threads.
pub type SharedField = Arc<dyn ScalarField + Send + Sync>;

/// Request to extract the contour of one field.
#[derive(Clone)]
pub struct ExtractionRequest {
  /// Unique identifier for this request
  pub id: u64,
  pub field: SharedField,
  pub config: ExtractionConfig,
}

/// Finished extraction.
pub struct ExtractionCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  pub result: ExtractionResult<ExtractionOutput>,
  /// Wall time of the extraction in microseconds
  pub extract_time_us: u64,
}

/// Extraction stage that processes requests in parallel.
pub struct ExtractionStage {
  pending: Vec<ExtractionRequest>,
  completed: Vec<ExtractionCompletion>,
  next_id: u64,
  #[cfg(feature = "metrics")]
  metrics: ExtractionMetrics,
}

impl Default for ExtractionStage {
  fn default() -> Self {
    Self::new()
  }
}

impl ExtractionStage {
  pub fn new() -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
      #[cfg(feature = "metrics")]
      metrics: ExtractionMetrics::default(),
    }
  }

  /// Enqueue a request, returning the assigned ID.
  pub fn enqueue(&mut self, field: SharedField, config: ExtractionConfig) -> u64 {
    let id = self.next_id;
    self.next_id += 1;

    self.pending.push(ExtractionRequest { id, field, config });

    id
  }

  /// Run all pending requests and move their results to the completions.
  /// Returns the number of requests processed this tick.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "task_queue::tick"))]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<ExtractionCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();
        let result = extract(req.field.as_ref(), &req.config);
        let extract_time_us = start.elapsed().as_micros() as u64;
        ExtractionCompletion {
          id: req.id,
          result,
          extract_time_us,
        }
      })
      .collect();

    #[cfg(feature = "metrics")]
    if metrics::is_enabled() {
      for completion in &completions {
        self.metrics.record(completion);
      }
    }

    self.completed.extend(completions);
    count
  }

  /// Take all completed results.
  pub fn drain_completions(&mut self) -> Vec<ExtractionCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }

  #[cfg(feature = "metrics")]
  pub fn metrics(&self) -> &ExtractionMetrics {
    &self.metrics
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
