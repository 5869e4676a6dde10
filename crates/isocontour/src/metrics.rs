//! Extraction statistics for batch runs.
//!
//! Feature-gated and runtime-toggled so the stage pays nothing when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use isocontour::metrics::{ExtractionMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // The batch stage records every completion:
//! stage.tick();
//! println!("{:.1} us avg", stage.metrics().avg_extract_timing_us());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::task_queue::ExtractionCompletion;
use crate::types::ExtractionOutput;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Fixed-capacity history of recent values, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Empty window holding at most `capacity` values.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value`, dropping the oldest entry when full.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True before the first push or after [`clear`](Self::clear).
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop every value, keeping the capacity.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Sum of the held values.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Mean of the held values, 0 when empty.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Totals and timing history over many extractions.
#[derive(Debug, Clone, Default)]
pub struct ExtractionMetrics {
    /// Rolling window of extraction times in microseconds.
    pub extract_timings: RollingWindow<u64>,
    pub last_extract_us: u64,

    pub total_extractions: u64,
    /// Requests rejected by configuration validation.
    pub total_errors: u64,
    pub total_vertices: u64,
    pub total_loops: u64,
    pub total_open_loops: u64,
    pub total_convergence_failures: u64,
}

impl ExtractionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the timing history. Totals are cumulative and kept.
    pub fn reset(&mut self) {
        self.extract_timings.clear();
        self.last_extract_us = 0;
    }

    pub fn record_timing(&mut self, timing_us: u64) {
        if is_enabled() {
            self.extract_timings.push(timing_us);
            self.last_extract_us = timing_us;
        }
    }

    /// Add one extraction's counters to the totals.
    pub fn record_output(&mut self, output: &ExtractionOutput) {
        if !is_enabled() {
            return;
        }

        let stats = &output.stats;
        self.total_extractions += 1;
        self.total_vertices += stats.vertex_count as u64;
        self.total_loops += stats.loop_count as u64;
        self.total_open_loops += stats.open_loop_count as u64;
        self.total_convergence_failures += stats.convergence_failures as u64;
    }

    /// Record a completion from the batch stage.
    pub fn record(&mut self, completion: &ExtractionCompletion) {
        if !is_enabled() {
            return;
        }

        self.record_timing(completion.extract_time_us);
        match &completion.result {
            Ok(output) => self.record_output(output),
            Err(_) => {
                self.total_extractions += 1;
                self.total_errors += 1;
            }
        }
    }

    pub fn avg_extract_timing_us(&self) -> f64 {
        self.extract_timings.average()
    }
}
