//! # Engine Metrics
//!
//! Lock-free counters describing what an engine has done:
//!
//! - **Counters**: stimuli applied, batches, no-op updates, changed cells,
//!   rejected inputs
//! - **Gauges**: cells currently on
//!
//! An engine shares its [`EngineMetrics`] through an `Arc`, so a monitoring
//! thread can read them while another thread owns the engine.
//!
//! ## Example
//!
//! ```rust
//! use efft_core::{EventFft, Stimulus};
//!
//! let mut efft = EventFft::new(8).unwrap();
//! efft.update(&Stimulus::at(1, 1)).unwrap();
//! efft.update(&Stimulus::at(1, 1)).unwrap();
//!
//! let snapshot = efft.metrics().snapshot();
//! assert_eq!(snapshot.stimuli, 2);
//! assert_eq!(snapshot.noop_updates, 1);
//! assert_eq!(snapshot.active_cells, 1);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// A simple atomic counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// A simple atomic gauge (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn new() -> Self {
        Self {
            value: AtomicI64::new(0),
        }
    }

    #[inline]
    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Counters for one engine instance.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Stimuli accepted (single updates plus batch members)
    pub stimuli: Counter,
    /// Batch updates accepted
    pub batches: Counter,
    /// Updates that left the spectrum untouched
    pub noop_updates: Counter,
    /// Cells whose state actually flipped (one rank-one fold each)
    pub cells_changed: Counter,
    /// Updates refused with an error
    pub rejected: Counter,
    /// Number of cells currently on
    pub active_cells: Gauge,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            stimuli: self.stimuli.get(),
            batches: self.batches.get(),
            noop_updates: self.noop_updates.get(),
            cells_changed: self.cells_changed.get(),
            rejected: self.rejected.get(),
            active_cells: self.active_cells.get(),
        }
    }

    /// Reset all counters to zero. The active-cell gauge is left alone since
    /// it mirrors engine state.
    pub fn reset(&self) {
        self.stimuli.reset();
        self.batches.reset();
        self.noop_updates.reset();
        self.cells_changed.reset();
        self.rejected.reset();
    }

    /// Export metrics in Prometheus text format.
    pub fn to_prometheus(&self) -> String {
        let s = self.snapshot();
        let mut output = String::new();

        let mut emit = |name: &str, kind: &str, help: &str, value: String| {
            output.push_str(&format!("# HELP efft_{} {}\n", name, help));
            output.push_str(&format!("# TYPE efft_{} {}\n", name, kind));
            output.push_str(&format!("efft_{} {}\n", name, value));
        };

        emit("stimuli_total", "counter", "Stimuli applied", s.stimuli.to_string());
        emit("batches_total", "counter", "Batch updates applied", s.batches.to_string());
        emit(
            "noop_updates_total",
            "counter",
            "Updates that did not change the spectrum",
            s.noop_updates.to_string(),
        );
        emit(
            "cells_changed_total",
            "counter",
            "Cell state changes folded into the spectrum",
            s.cells_changed.to_string(),
        );
        emit("rejected_total", "counter", "Rejected updates", s.rejected.to_string());
        emit("active_cells", "gauge", "Cells currently on", s.active_cells.to_string());

        output
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub stimuli: u64,
    pub batches: u64,
    pub noop_updates: u64,
    pub cells_changed: u64,
    pub rejected: u64,
    pub active_cells: i64,
}

impl MetricsSnapshot {
    /// Fraction of accepted stimuli that flipped a cell.
    pub fn change_ratio(&self) -> f64 {
        if self.stimuli == 0 {
            0.0
        } else {
            self.cells_changed as f64 / self.stimuli as f64
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
