//! Incremental 2D DFT Engine
//!
//! [`EventFft`] keeps the exact 2D DFT of an `N×N` binary frame up to date as
//! cells switch on and off.
//!
//! ## Why a single cell costs `O(N²)`
//!
//! The DFT is linear. Switching cell `(r, c)` changes the frame by `Δ = ±1` at
//! one coordinate, so every bin changes by the transform of a scaled impulse:
//!
//! ```text
//!   F'(u,v) = F(u,v) + Δ · W(u·r mod N) · W(v·c mod N)
//! ```
//!
//! That is a rank-one outer product of a row-phase vector and a column-phase
//! vector, both read from the [`TwiddleTable`]. One multiply-add per bin
//! replaces a full `O(N² log N)` recomputation.
//!
//! ## Change detection
//!
//! The [`SpatialGrid`] decides whether a stimulus changes anything. A stimulus
//! that restates a cell's current state returns `false` and does no
//! arithmetic, leaving the spectrum bit-identical.
//!
//! ## Example
//!
//! ```rust
//! use efft_core::{EventFft, Stimuli, Stimulus};
//!
//! let mut efft = EventFft::new(4).unwrap();
//! efft.initialize();
//!
//! assert!(efft.update(&Stimulus::at(1, 2)).unwrap());
//! assert!(!efft.update(&Stimulus::at(1, 2)).unwrap());
//!
//! // Within a batch an activation is never undone by a later deactivation
//! let batch: Stimuli = vec![Stimulus::new(0, 0, true), Stimulus::new(0, 0, false)].into();
//! assert!(efft.update(&batch).unwrap());
//! assert!(efft.grid().read(0, 0));
//!
//! let fft = efft.get_fft();
//! assert_eq!(fft.shape(), (4, 4));
//! assert!((fft[(0, 0)].re - 2.0).abs() < 1e-9);
//! ```

use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::batch;
use crate::frame_size::FrameSize;
use crate::grid::SpatialGrid;
use crate::observe::EngineMetrics;
use crate::reference::{self, GroundTruth};
use crate::spectrum::{FrequencyAccumulator, Spectrum};
use crate::stimulus::{Stimuli, Stimulus};
use crate::twiddle::TwiddleTable;
use crate::types::{complex_ops, Complex, EfftError, EfftResult};

/// Anything [`EventFft::update`] accepts: one stimulus or a batch.
pub trait UpdateInput {
    fn apply_to(&self, engine: &mut EventFft) -> EfftResult<bool>;
}

impl UpdateInput for Stimulus {
    fn apply_to(&self, engine: &mut EventFft) -> EfftResult<bool> {
        engine.update_single(self)
    }
}

impl UpdateInput for [Stimulus] {
    fn apply_to(&self, engine: &mut EventFft) -> EfftResult<bool> {
        engine.update_batch(self)
    }
}

impl UpdateInput for Vec<Stimulus> {
    fn apply_to(&self, engine: &mut EventFft) -> EfftResult<bool> {
        engine.update_batch(self)
    }
}

impl UpdateInput for Stimuli {
    fn apply_to(&self, engine: &mut EventFft) -> EfftResult<bool> {
        engine.update_batch(self.as_slice())
    }
}

/// Event-driven 2D FFT for one fixed frame size
#[derive(Debug)]
pub struct EventFft {
    size: FrameSize,
    twiddles: TwiddleTable,
    grid: SpatialGrid,
    accumulator: FrequencyAccumulator,
    row_phase: Vec<Complex>,
    col_phase: Vec<Complex>,
    metrics: Arc<EngineMetrics>,
}

impl EventFft {
    /// Create an engine for an `n×n` frame.
    ///
    /// The engine starts in the initialized state (empty frame, zero
    /// spectrum). Fails with [`EfftError::UnsupportedSize`] unless `n` is a
    /// power of two in `4..=1024`.
    pub fn new(n: usize) -> EfftResult<Self> {
        let size = FrameSize::from_usize(n).map_err(|e| {
            warn!(framesize = n, "unsupported frame size");
            e
        })?;
        Ok(Self::with_size(size))
    }

    /// Create an engine for an already validated size
    pub fn with_size(size: FrameSize) -> Self {
        let n = size.value();
        debug!(framesize = n, "creating event FFT engine");

        Self {
            size,
            twiddles: TwiddleTable::new(size),
            grid: SpatialGrid::new(size),
            accumulator: FrequencyAccumulator::new(size),
            row_phase: vec![complex_ops::ZERO; n],
            col_phase: vec![complex_ops::ZERO; n],
            metrics: Arc::new(EngineMetrics::new()),
        }
    }

    /// Side length `N`
    pub fn framesize(&self) -> usize {
        self.size.value()
    }

    pub fn frame_size(&self) -> FrameSize {
        self.size
    }

    /// Reset to an empty frame and an all-zero spectrum. Idempotent.
    pub fn initialize(&mut self) {
        debug!(framesize = self.framesize(), "initializing engine");
        self.grid.clear();
        self.accumulator.reset();
        self.metrics.active_cells.set(0);
    }

    /// Reset to an arbitrary binary frame.
    ///
    /// The spectrum is recomputed from scratch once; later updates are
    /// incremental again.
    pub fn initialize_with(&mut self, grid: &SpatialGrid) -> EfftResult<()> {
        if grid.size() != self.size {
            let m = grid.size().value();
            warn!(expected = self.framesize(), actual = m, "initial frame has the wrong size");
            return Err(EfftError::DimensionMismatch {
                expected: self.framesize(),
                rows: m,
                cols: m,
            });
        }

        debug!(
            framesize = self.framesize(),
            active = grid.active_count(),
            "initializing engine from frame"
        );
        self.grid = grid.clone();
        self.accumulator.replace(reference::reference_fft(&self.grid));
        self.metrics.active_cells.set(self.grid.active_count() as i64);
        Ok(())
    }

    /// Reset to a frame given as `N` rows of `N` cells
    pub fn initialize_from_rows<R: AsRef<[bool]>>(&mut self, rows: &[R]) -> EfftResult<()> {
        let grid = SpatialGrid::from_rows(self.size, rows)?;
        self.initialize_with(&grid)
    }

    /// Apply one stimulus or a batch.
    ///
    /// Returns whether the spectrum changed. Out-of-range coordinates fail
    /// with [`EfftError::OutOfRange`] before anything is modified.
    pub fn update<I: UpdateInput + ?Sized>(&mut self, input: &I) -> EfftResult<bool> {
        input.apply_to(self)
    }

    fn update_single(&mut self, stimulus: &Stimulus) -> EfftResult<bool> {
        self.validate(stimulus)?;
        self.metrics.stimuli.inc();

        let changed = self.apply_target(stimulus);
        if changed {
            self.metrics.active_cells.set(self.grid.active_count() as i64);
        } else {
            self.metrics.noop_updates.inc();
        }
        Ok(changed)
    }

    fn update_batch(&mut self, stimuli: &[Stimulus]) -> EfftResult<bool> {
        for s in stimuli {
            self.validate(s)?;
        }
        self.metrics.batches.inc();
        self.metrics.stimuli.inc_by(stimuli.len() as u64);

        let targets = batch::resolve(stimuli);
        let mut changed = false;
        for target in &targets {
            changed |= self.apply_target(target);
        }

        debug!(
            stimuli = stimuli.len(),
            cells = targets.len(),
            changed,
            "applied batch"
        );
        if changed {
            self.metrics.active_cells.set(self.grid.active_count() as i64);
        } else {
            self.metrics.noop_updates.inc();
        }
        Ok(changed)
    }

    fn validate(&self, stimulus: &Stimulus) -> EfftResult<()> {
        self.grid.check(stimulus.row, stimulus.col).map_err(|e| {
            warn!(%stimulus, framesize = self.framesize(), "stimulus out of range");
            self.metrics.rejected.inc();
            e
        })
    }

    /// Write one cell and fold its rank-one correction if it flipped
    fn apply_target(&mut self, target: &Stimulus) -> bool {
        let Some(delta) = self.grid.apply(target.row, target.col, target.state) else {
            return false;
        };

        self.twiddles.phase_vector_into(target.row, &mut self.row_phase);
        self.twiddles.phase_vector_into(target.col, &mut self.col_phase);
        self.accumulator.fold_rank_one(delta, &self.row_phase, &self.col_phase);
        self.metrics.cells_changed.inc();

        trace!(row = target.row, col = target.col, ?delta, "folded cell change");
        true
    }

    /// Owned snapshot of the current spectrum
    pub fn get_fft(&self) -> Spectrum {
        self.accumulator.spectrum().clone()
    }

    /// Borrow the current spectrum without copying
    pub fn spectrum(&self) -> &Spectrum {
        self.accumulator.spectrum()
    }

    /// Current binary frame
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn twiddles(&self) -> &TwiddleTable {
        &self.twiddles
    }

    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.metrics
    }

    /// Frobenius distance between this spectrum and a ground-truth one
    pub fn check(&self, truth: &GroundTruth) -> f64 {
        self.spectrum().distance(truth.spectrum())
    }

    /// Distance to a from-scratch transform of the current frame
    pub fn drift(&self) -> f64 {
        self.spectrum().distance(&reference::reference_fft(&self.grid))
    }
}
