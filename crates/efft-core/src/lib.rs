//! # Event-Driven Incremental 2D DFT
//!
//! This crate maintains the 2D discrete Fourier transform of a binary `N×N`
//! frame while individual pixels switch on and off. Instead of recomputing
//! the whole transform after every change, each pixel flip is folded into
//! the spectrum as a rank-one update costing `O(N²)`.
//!
//! ## Overview
//!
//! Event sensors report sparse pixel changes ("stimuli"). For a change of
//! `Δ = ±1` at cell `(r, c)` the spectrum moves by
//!
//! ```text
//!   F(u,v) += Δ · W(u·r mod N) · W(v·c mod N),    W(k) = exp(-2πi·k/N)
//! ```
//!
//! - **Stimuli**: single events or ordered batches ([`Stimulus`], [`Stimuli`])
//! - **Engine**: spatial grid, twiddle table and accumulator ([`EventFft`])
//! - **Batches**: one net target per cell, activation latches within a batch
//! - **Reference**: full recompute with `rustfft` for cross-checking ([`GroundTruth`])
//! - **Sharing**: mutex-serialized updates with published snapshots ([`SharedEventFft`])
//!
//! ## Data Flow
//!
//! ```text
//! Stimulus ─▶ validate ─▶ grid.write ──changed?──▶ phase vectors ─▶ rank-one fold ─▶ F
//!                              │
//!                              └── unchanged: no-op, F untouched
//! ```
//!
//! ## Example
//!
//! ```rust
//! use efft_core::{EventFft, Stimuli, Stimulus};
//!
//! let mut efft = EventFft::new(4).unwrap();
//!
//! assert!(efft.update(&Stimulus::new(1, 2, true)).unwrap());
//! assert!((efft.get_fft()[(0, 0)].re - 1.0).abs() < 1e-12);
//!
//! let mut batch = Stimuli::new();
//! batch.push(Stimulus::new(1, 2, false));
//! batch.push(Stimulus::new(3, 3, true));
//! assert!(efft.update(&batch).unwrap());
//! assert_eq!(efft.grid().active_count(), 1);
//! ```

pub mod batch;
pub mod config;
pub mod engine;
pub mod factory;
pub mod frame_size;
pub mod grid;
pub mod observe;
pub mod reference;
pub mod shared;
pub mod spectrum;
pub mod stimulus;
pub mod twiddle;
pub mod types;

pub use config::{ConfigError, EfftConfig, EngineConfig};
pub use engine::{EventFft, UpdateInput};
pub use factory::EngineFactory;
pub use frame_size::FrameSize;
pub use grid::SpatialGrid;
pub use reference::{reference_fft, GroundTruth};
pub use shared::SharedEventFft;
pub use spectrum::Spectrum;
pub use stimulus::{Stimuli, Stimulus};
pub use twiddle::TwiddleTable;
pub use types::{Complex, EfftError, EfftResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{EventFft, UpdateInput};
    pub use crate::factory::EngineFactory;
    pub use crate::frame_size::FrameSize;
    pub use crate::spectrum::Spectrum;
    pub use crate::stimulus::{Stimuli, Stimulus};
    pub use crate::types::{Complex, EfftError, EfftResult};
}
