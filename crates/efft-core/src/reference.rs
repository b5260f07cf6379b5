//! Reference 2D FFT (ground truth)
//!
//! A from-scratch transform of the whole frame, computed with `rustfft` as
//! `N` row FFTs followed by `N` column FFTs. It costs `O(N² log N)` per call
//! and exists to cross-check the incremental engine.
//!
//! ```text
//!   x(r,c) ──row FFTs──▶ X(r,v) ──transpose──▶ X(v,r) ──row FFTs──▶ F(v,u)
//!                                                            │
//!                                              transpose ◀───┘
//!                                                  │
//!                                                  ▼
//!                                               F(u,v)
//! ```

use rustfft::{Fft, FftPlanner};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::frame_size::FrameSize;
use crate::grid::SpatialGrid;
use crate::spectrum::Spectrum;
use crate::stimulus::Stimulus;
use crate::types::{complex_ops, Complex, EfftResult};

/// Planned forward 2D FFT for one frame size
pub struct Fft2d {
    size: FrameSize,
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex>,
    transposed: Vec<Complex>,
}

impl fmt::Debug for Fft2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft2d").field("size", &self.size).finish()
    }
}

impl Fft2d {
    pub fn new(size: FrameSize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size.value());
        let scratch = vec![complex_ops::ZERO; fft.get_inplace_scratch_len()];

        Self {
            size,
            fft,
            scratch,
            transposed: vec![complex_ops::ZERO; size.bins()],
        }
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Forward 2D FFT of a row-major `N×N` buffer, in place
    pub fn process_inplace(&mut self, buffer: &mut [Complex]) {
        let n = self.size.value();
        assert_eq!(buffer.len(), n * n);

        // rustfft treats a buffer of k·N samples as k consecutive transforms
        self.fft.process_with_scratch(buffer, &mut self.scratch);
        transpose(buffer, &mut self.transposed, n);
        self.fft.process_with_scratch(&mut self.transposed, &mut self.scratch);
        transpose(&self.transposed, buffer, n);
    }

    /// Transform a binary grid
    pub fn transform(&mut self, grid: &SpatialGrid) -> Spectrum {
        assert_eq!(grid.size(), self.size, "frame size mismatch");
        let mut buffer: Vec<Complex> = grid
            .as_slice()
            .iter()
            .map(|&on| Complex::new(if on { 1.0 } else { 0.0 }, 0.0))
            .collect();
        self.process_inplace(&mut buffer);
        Spectrum::from_vec(self.size, buffer)
    }
}

fn transpose(src: &[Complex], dst: &mut [Complex], n: usize) {
    for r in 0..n {
        for c in 0..n {
            dst[c * n + r] = src[r * n + c];
        }
    }
}

/// One-shot full 2D DFT of a grid
pub fn reference_fft(grid: &SpatialGrid) -> Spectrum {
    Fft2d::new(grid.size()).transform(grid)
}

/// Dense image plus a full FFT recomputed after every update.
///
/// Accepts the same inputs as the incremental engine, including the batch
/// precedence rule, so the two can be driven side by side.
#[derive(Debug)]
pub struct GroundTruth {
    grid: SpatialGrid,
    fft: Fft2d,
    spectrum: Spectrum,
}

impl GroundTruth {
    pub fn new(size: FrameSize) -> Self {
        Self {
            grid: SpatialGrid::new(size),
            fft: Fft2d::new(size),
            spectrum: Spectrum::zeros(size),
        }
    }

    pub fn size(&self) -> FrameSize {
        self.grid.size()
    }

    /// Reset to an empty frame
    pub fn initialize(&mut self) {
        self.grid.clear();
        self.spectrum = Spectrum::zeros(self.grid.size());
    }

    /// Start from an arbitrary binary frame
    pub fn initialize_with(&mut self, grid: &SpatialGrid) {
        assert_eq!(grid.size(), self.grid.size(), "frame size mismatch");
        self.grid = grid.clone();
        self.recompute();
    }

    /// Apply one stimulus and recompute
    pub fn update(&mut self, stimulus: &Stimulus) -> EfftResult<()> {
        self.grid.check(stimulus.row, stimulus.col)?;
        self.grid.write(stimulus.row, stimulus.col, stimulus.state);
        self.recompute();
        Ok(())
    }

    /// Apply a batch sequentially, skipping deactivations of cells already
    /// activated earlier in the same batch, then recompute once.
    pub fn update_batch(&mut self, stimuli: &[Stimulus]) -> EfftResult<()> {
        for s in stimuli {
            self.grid.check(s.row, s.col)?;
        }

        let mut activated = HashSet::new();
        for s in stimuli {
            if s.state {
                activated.insert(s.cell());
            } else if activated.contains(&s.cell()) {
                continue;
            }
            self.grid.write(s.row, s.col, s.state);
        }
        self.recompute();
        Ok(())
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    fn recompute(&mut self) {
        self.spectrum = self.fft.transform(&self.grid);
    }
}
