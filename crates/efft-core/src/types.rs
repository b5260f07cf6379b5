//! Core types for incremental Fourier maintenance
//!
//! This module defines the scalar and error types shared by every part of the
//! engine.
//!
//! ## Spectral Bins
//!
//! The engine keeps one complex coefficient per output bin `(u, v)` of an
//! `N×N` frame. Coefficients use the unnormalized forward convention:
//!
//! ```text
//!            N-1 N-1
//!  F(u,v) =  Σ   Σ  x(r,c) · exp(-2πi·(u·r + v·c)/N)
//!           r=0 c=0
//! ```
//!
//! so that an inverse transform would divide by `N²`. Because `x` is binary,
//! `F(0,0)` is simply the number of active cells.

use num_complex::Complex64;

/// Complex coefficient type (double precision).
pub type Complex = Complex64;

/// Result type for engine operations
pub type EfftResult<T> = Result<T, EfftError>;

/// Errors that can occur while building or updating an engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EfftError {
    #[error("Unsupported FFT size: {0}. Must be a power of two between 4 and 1024")]
    UnsupportedSize(usize),

    #[error("Stimulus out of range: ({row}, {col}) outside a {size}x{size} frame")]
    OutOfRange { row: usize, col: usize, size: usize },

    #[error("Dimension mismatch: expected {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch { expected: usize, rows: usize, cols: usize },
}

/// Helper functions for working with complex coefficients
pub mod complex_ops {
    use super::Complex;

    /// The additive identity
    pub const ZERO: Complex = Complex::new(0.0, 0.0);

    /// Unit phasor `exp(i·phase)`
    #[inline]
    pub fn cis(phase: f64) -> Complex {
        Complex::new(phase.cos(), phase.sin())
    }

    /// Squared Euclidean distance between two coefficient buffers.
    ///
    /// Buffers of unequal length are compared over their common prefix.
    pub fn distance_sqr(a: &[Complex], b: &[Complex]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).norm_sqr()).sum()
    }

    /// Largest per-element absolute difference between two buffers.
    pub fn max_abs_diff(a: &[Complex], b: &[Complex]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).norm())
            .fold(0.0_f64, f64::max)
    }
}
