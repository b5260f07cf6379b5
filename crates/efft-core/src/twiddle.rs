//! Twiddle Table
//!
//! Precomputed roots of unity `W(k) = exp(-2πi·k/N)` for one frame size.
//!
//! A single-cell change at `(r, c)` touches every output bin with the phase
//! `W(u·r mod N) · W(v·c mod N)`. Both factors are strided reads from this
//! table, so no trigonometry runs on the update path:
//!
//! ```text
//!   index r = 3, N = 8:
//!
//!   u        0   1   2   3   4   5   6   7
//!   u·r mod  0   3   6   1   4   7   2   5
//!            │   │   │   │   │   │   │   │
//!            W0  W3  W6  W1  W4  W7  W2  W5
//! ```

use std::f64::consts::PI;

use crate::frame_size::FrameSize;
use crate::types::Complex;

/// Roots of unity for a fixed frame size
#[derive(Debug, Clone)]
pub struct TwiddleTable {
    size: FrameSize,
    roots: Vec<Complex>,
}

impl TwiddleTable {
    pub fn new(size: FrameSize) -> Self {
        let n = size.value();
        let roots = (0..n)
            .map(|k| Complex::from_polar(1.0, -2.0 * PI * k as f64 / n as f64))
            .collect();

        Self { size, roots }
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// `W(k mod N)`
    #[inline]
    pub fn get(&self, k: usize) -> Complex {
        self.roots[k & (self.roots.len() - 1)]
    }

    pub fn as_slice(&self) -> &[Complex] {
        &self.roots
    }

    /// Fill `out` with `W(t·index mod N)` for `t ∈ [0, N)`.
    ///
    /// `out` must hold exactly `N` entries.
    pub fn phase_vector_into(&self, index: usize, out: &mut [Complex]) {
        debug_assert_eq!(out.len(), self.roots.len());
        let mask = self.roots.len() - 1;
        let step = index & mask;
        let mut k = 0usize;
        for slot in out.iter_mut() {
            *slot = self.roots[k];
            k = (k + step) & mask;
        }
    }

    /// Allocating variant of [`phase_vector_into`](Self::phase_vector_into)
    pub fn phase_vector(&self, index: usize) -> Vec<Complex> {
        let mut out = vec![Complex::new(0.0, 0.0); self.roots.len()];
        self.phase_vector_into(index, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roots_are_unit_and_start_at_one() {
        let table = TwiddleTable::new(FrameSize::N16);
        assert_eq!(table.as_slice().len(), 16);
        assert_relative_eq!(table.get(0).re, 1.0, epsilon = 1e-15);
        for w in table.as_slice() {
            assert_relative_eq!(w.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_quarter_turn_is_minus_i() {
        let table = TwiddleTable::new(FrameSize::N8);
        let w = table.get(2);
        assert_relative_eq!(w.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(w.im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_get_wraps_modulo_n() {
        let table = TwiddleTable::new(FrameSize::N4);
        assert_eq!(table.get(5), table.get(1));
        assert_eq!(table.get(4), table.get(0));
    }

    #[test]
    fn test_phase_vector_matches_direct_exponential() {
        let size = FrameSize::N32;
        let n = size.value();
        let table = TwiddleTable::new(size);

        for index in [0, 1, 7, 16, 31] {
            let phases = table.phase_vector(index);
            for (t, p) in phases.iter().enumerate() {
                let angle = -2.0 * PI * ((t * index) % n) as f64 / n as f64;
                assert_relative_eq!(p.re, angle.cos(), epsilon = 1e-12);
                assert_relative_eq!(p.im, angle.sin(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_index_is_all_ones() {
        let table = TwiddleTable::new(FrameSize::N8);
        assert!(table.phase_vector(0).iter().all(|p| *p == Complex::new(1.0, 0.0)));
    }
}
