//! # Observability
//!
//! - **Logging**: `tracing` subscriber setup ([`init_logging`])
//! - **Metrics**: per-engine atomic counters ([`EngineMetrics`])
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               EventFft::update              │
//! │   tracing::trace!(..)    metrics.inc()      │
//! └──────────────┬──────────────────┬───────────┘
//!                ▼                  ▼
//!          ┌──────────┐      ┌──────────────┐
//!          │ Logging  │      │   Metrics    │
//!          │ (fmt /   │      │ (snapshot,   │
//!          │  JSON)   │      │  Prometheus) │
//!          └──────────┘      └──────────────┘
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use metrics::{Counter, EngineMetrics, Gauge, MetricsSnapshot};
