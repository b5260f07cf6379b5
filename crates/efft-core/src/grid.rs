//! Spatial State Grid
//!
//! Dense `N×N` record of which cells are currently on. The grid is the source
//! of truth for update deltas: [`SpatialGrid::write`] reports whether an
//! assignment actually changed a cell, and only changed cells ever reach the
//! frequency accumulator.

use crate::frame_size::FrameSize;
use crate::types::{EfftError, EfftResult};

/// Signed change applied to one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// off → on (`+1`)
    Activate,
    /// on → off (`-1`)
    Deactivate,
}

impl Delta {
    /// Delta produced by writing `state` into a cell that changed
    #[inline]
    pub fn from_new_state(state: bool) -> Self {
        if state {
            Self::Activate
        } else {
            Self::Deactivate
        }
    }

    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Self::Activate => 1.0,
            Self::Deactivate => -1.0,
        }
    }
}

/// Row-major boolean frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialGrid {
    size: FrameSize,
    cells: Vec<bool>,
    active: usize,
}

impl SpatialGrid {
    /// All-off grid
    pub fn new(size: FrameSize) -> Self {
        Self {
            size,
            cells: vec![false; size.bins()],
            active: 0,
        }
    }

    /// Build a grid from row-major rows.
    ///
    /// Every row must have exactly `N` entries and there must be `N` rows.
    pub fn from_rows<R: AsRef<[bool]>>(size: FrameSize, rows: &[R]) -> EfftResult<Self> {
        let n = size.value();
        let mismatch = |cols: usize| EfftError::DimensionMismatch {
            expected: n,
            rows: rows.len(),
            cols,
        };

        if rows.len() != n {
            return Err(mismatch(rows.first().map_or(0, |r| r.as_ref().len())));
        }

        let mut grid = Self::new(size);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(mismatch(row.len()));
            }
            for (c, &state) in row.iter().enumerate() {
                grid.write(r, c, state);
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Whether `(row, col)` addresses a cell of this grid
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let n = self.size.value();
        row < n && col < n
    }

    /// Validate a coordinate, mapping failure to [`EfftError::OutOfRange`]
    pub fn check(&self, row: usize, col: usize) -> EfftResult<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(EfftError::OutOfRange {
                row,
                col,
                size: self.size.value(),
            })
        }
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.size.value() + col
    }

    /// Current state of a cell.
    ///
    /// # Panics
    /// If the coordinate is outside the grid.
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> bool {
        assert!(self.contains(row, col), "cell ({}, {}) outside {}", row, col, self.size);
        self.cells[self.offset(row, col)]
    }

    /// Set a cell and report whether its stored value changed.
    ///
    /// # Panics
    /// If the coordinate is outside the grid.
    #[inline]
    pub fn write(&mut self, row: usize, col: usize, state: bool) -> bool {
        assert!(self.contains(row, col), "cell ({}, {}) outside {}", row, col, self.size);
        let idx = self.offset(row, col);
        let previous = std::mem::replace(&mut self.cells[idx], state);
        if previous == state {
            return false;
        }
        if state {
            self.active += 1;
        } else {
            self.active -= 1;
        }
        true
    }

    /// [`write`](Self::write), returning the signed change if there was one
    #[inline]
    pub fn apply(&mut self, row: usize, col: usize, state: bool) -> Option<Delta> {
        self.write(row, col, state).then(|| Delta::from_new_state(state))
    }

    /// Number of cells currently on
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Switch every cell off
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.active = 0;
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Coordinates of every active cell, row-major
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size.value();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(move |(idx, _)| (idx / n, idx % n))
    }

    /// Real-valued image (1.0 for on, 0.0 for off), row-major
    pub fn to_image(&self) -> Vec<f64> {
        self.cells.iter().map(|&on| if on { 1.0 } else { 0.0 }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_off() {
        let grid = SpatialGrid::new(FrameSize::N8);
        assert_eq!(grid.as_slice().len(), 64);
        assert_eq!(grid.active_count(), 0);
        assert!(!grid.read(7, 7));
    }

    #[test]
    fn test_write_reports_change() {
        let mut grid = SpatialGrid::new(FrameSize::N4);
        assert!(grid.write(1, 2, true));
        assert!(grid.read(1, 2));
        assert!(!grid.write(1, 2, true));
        assert!(grid.write(1, 2, false));
        assert!(!grid.write(1, 2, false));
        assert!(!grid.write(3, 3, false));
    }

    #[test]
    fn test_apply_gives_delta_sign() {
        let mut grid = SpatialGrid::new(FrameSize::N4);
        assert_eq!(grid.apply(0, 1, true), Some(Delta::Activate));
        assert_eq!(grid.apply(0, 1, true), None);
        assert_eq!(grid.apply(0, 1, false), Some(Delta::Deactivate));
        assert_eq!(Delta::Activate.sign(), 1.0);
        assert_eq!(Delta::Deactivate.sign(), -1.0);
    }

    #[test]
    fn test_active_count_and_cells() {
        let mut grid = SpatialGrid::new(FrameSize::N4);
        grid.write(0, 3, true);
        grid.write(2, 1, true);
        grid.write(2, 1, true);
        assert_eq!(grid.active_count(), 2);
        assert_eq!(grid.active_cells().collect::<Vec<_>>(), vec![(0, 3), (2, 1)]);

        grid.clear();
        assert_eq!(grid.active_count(), 0);
        assert_eq!(grid.active_cells().count(), 0);
    }

    #[test]
    fn test_check_bounds() {
        let grid = SpatialGrid::new(FrameSize::N4);
        assert!(grid.check(3, 3).is_ok());
        assert_eq!(
            grid.check(4, 0),
            Err(EfftError::OutOfRange { row: 4, col: 0, size: 4 })
        );
        assert!(grid.check(0, 4).is_err());
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec![true, false, false, false],
            vec![false, false, false, false],
            vec![false, false, true, false],
            vec![false, false, false, true],
        ];
        let grid = SpatialGrid::from_rows(FrameSize::N4, &rows).unwrap();
        assert_eq!(grid.active_count(), 3);
        assert!(grid.read(2, 2));
        assert_eq!(grid.to_image()[15], 1.0);
    }

    #[test]
    fn test_from_rows_rejects_wrong_shape() {
        let rows = vec![vec![false; 4]; 3];
        assert_eq!(
            SpatialGrid::from_rows(FrameSize::N4, &rows),
            Err(EfftError::DimensionMismatch { expected: 4, rows: 3, cols: 4 })
        );

        let mut rows = vec![vec![false; 4]; 4];
        rows[2].pop();
        assert_eq!(
            SpatialGrid::from_rows(FrameSize::N4, &rows),
            Err(EfftError::DimensionMismatch { expected: 4, rows: 4, cols: 3 })
        );
    }

    #[test]
    #[should_panic]
    fn test_read_out_of_bounds_panics() {
        let grid = SpatialGrid::new(FrameSize::N4);
        grid.read(4, 0);
    }
}
