//! Frequency Accumulator and Spectrum Snapshots
//!
//! [`Spectrum`] is an owned `N×N` matrix of DFT coefficients, row-major, with
//! bin `(u, v)` at `u·N + v`. [`FrequencyAccumulator`] owns the engine's live
//! spectrum and applies rank-one corrections to it:
//!
//! ```text
//!   F(u,v) += Δ · R(u) · C(v)        R(u) = W(u·r),  C(v) = W(v·c)
//!
//!        C(0)  C(1) ... C(N-1)
//!   R(0)  ×     ×        ×
//!   R(1)  ×     ×        ×        one multiply-add per bin
//!   ...
//! ```
//!
//! With the `parallel` feature the fold is split across rows with rayon.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::frame_size::FrameSize;
use crate::grid::Delta;
use crate::types::{complex_ops, Complex, EfftError, EfftResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Frame size at which the rayon row split starts paying for itself
#[cfg(feature = "parallel")]
const PARALLEL_MIN_SIZE: usize = 128;

/// Owned `N×N` matrix of frequency coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpectrum")]
pub struct Spectrum {
    size: FrameSize,
    bins: Vec<Complex>,
}

/// Unchecked wire form; see [`Spectrum::from_bins`]
#[derive(Deserialize)]
struct RawSpectrum {
    size: FrameSize,
    bins: Vec<Complex>,
}

impl TryFrom<RawSpectrum> for Spectrum {
    type Error = EfftError;

    fn try_from(raw: RawSpectrum) -> Result<Self, Self::Error> {
        Self::from_bins(raw.size, raw.bins)
    }
}

impl Spectrum {
    /// All-zero spectrum (the DFT of an empty frame)
    pub fn zeros(size: FrameSize) -> Self {
        Self {
            size,
            bins: vec![complex_ops::ZERO; size.bins()],
        }
    }

    /// Wrap a row-major buffer, which must hold exactly `N²` coefficients
    pub fn from_bins(size: FrameSize, bins: Vec<Complex>) -> EfftResult<Self> {
        let n = size.value();
        if bins.len() != size.bins() {
            let (rows, cols) = if bins.len() % n == 0 {
                (bins.len() / n, n)
            } else {
                (1, bins.len())
            };
            return Err(EfftError::DimensionMismatch {
                expected: n,
                rows,
                cols,
            });
        }
        Ok(Self { size, bins })
    }

    /// Wrap a row-major buffer of `N²` coefficients
    pub(crate) fn from_vec(size: FrameSize, bins: Vec<Complex>) -> Self {
        debug_assert_eq!(bins.len(), size.bins());
        Self { size, bins }
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// `(rows, cols)`; always square
    pub fn shape(&self) -> (usize, usize) {
        (self.size.value(), self.size.value())
    }

    /// Coefficient at bin `(u, v)`, or `None` outside the matrix
    pub fn get(&self, u: usize, v: usize) -> Option<Complex> {
        let n = self.size.value();
        (u < n && v < n).then(|| self.bins[u * n + v])
    }

    /// Row-major view of all coefficients
    pub fn as_slice(&self) -> &[Complex] {
        &self.bins
    }

    pub fn into_vec(self) -> Vec<Complex> {
        self.bins
    }

    /// Iterate over rows
    pub fn rows(&self) -> std::slice::Chunks<'_, Complex> {
        self.bins.chunks(self.size.value())
    }

    /// Nested-vector copy, one inner vector per row
    pub fn to_rows(&self) -> Vec<Vec<Complex>> {
        self.rows().map(<[Complex]>::to_vec).collect()
    }

    /// Per-bin magnitude, row-major
    pub fn magnitude(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Whether every coefficient is exactly zero
    pub fn is_zero(&self) -> bool {
        self.bins.iter().all(|c| *c == complex_ops::ZERO)
    }

    /// Frobenius norm of `self - other`
    pub fn distance(&self, other: &Spectrum) -> f64 {
        complex_ops::distance_sqr(&self.bins, &other.bins).sqrt()
    }

    /// Largest per-bin absolute difference
    pub fn max_abs_diff(&self, other: &Spectrum) -> f64 {
        complex_ops::max_abs_diff(&self.bins, &other.bins)
    }
}

impl Index<(usize, usize)> for Spectrum {
    type Output = Complex;

    fn index(&self, (u, v): (usize, usize)) -> &Self::Output {
        let n = self.size.value();
        assert!(u < n && v < n, "bin ({}, {}) outside {}", u, v, self.size);
        &self.bins[u * n + v]
    }
}

/// Live spectrum owned by one engine
#[derive(Debug, Clone)]
pub struct FrequencyAccumulator {
    spectrum: Spectrum,
}

impl FrequencyAccumulator {
    pub fn new(size: FrameSize) -> Self {
        Self {
            spectrum: Spectrum::zeros(size),
        }
    }

    /// Zero every bin
    pub fn reset(&mut self) {
        self.spectrum.bins.fill(complex_ops::ZERO);
    }

    /// Replace the whole spectrum.
    ///
    /// # Panics
    /// If `spectrum` has a different frame size.
    pub fn replace(&mut self, spectrum: Spectrum) {
        assert_eq!(spectrum.size, self.spectrum.size, "frame size mismatch");
        self.spectrum = spectrum;
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Add `Δ · row_phase ⊗ col_phase` to every bin.
    ///
    /// Both phase vectors must have length `N`.
    pub fn fold_rank_one(&mut self, delta: Delta, row_phase: &[Complex], col_phase: &[Complex]) {
        let n = self.spectrum.size.value();
        debug_assert_eq!(row_phase.len(), n);
        debug_assert_eq!(col_phase.len(), n);

        let sign = delta.sign();
        let fold_row = |(row, &r): (&mut [Complex], &Complex)| {
            let scale = r * sign;
            for (bin, &c) in row.iter_mut().zip(col_phase) {
                *bin += scale * c;
            }
        };

        #[cfg(feature = "parallel")]
        if n >= PARALLEL_MIN_SIZE {
            self.spectrum
                .bins
                .par_chunks_mut(n)
                .zip(row_phase.par_iter())
                .for_each(fold_row);
            return;
        }

        self.spectrum
            .bins
            .chunks_mut(n)
            .zip(row_phase.iter())
            .for_each(fold_row);
    }
}
