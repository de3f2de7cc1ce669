//! # Hit-Map Accumulation
//!
//! Double-buffered per-pixel hit counting for the MIMOSA matrix. Hits
//! decoded from the readout stream accumulate in a `temp` grid; after a
//! configurable number of completed frames the window is committed: `temp`
//! is copied into `stable` and cleared. `stable` is the only map exposed to
//! downstream consumers and always reflects the last fully committed
//! window, never a live view.
//!
//! The accumulator is caller-owned and persists across decode invocations;
//! the decoder only mutates it through [`HitMap::record_hit`],
//! [`HitMap::complete_frame`] and [`HitMap::commit_if_due`].

use crate::constants::{MIMOSA_COLS, MIMOSA_ROWS};
use crate::error::MimosaError;

/// Validated pixel matrix dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDim {
    rows: usize,
    cols: usize,
}

impl GridDim {
    /// Create a dimension pair; both axes must be non-zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MimosaError> {
        if rows == 0 || cols == 0 {
            return Err(MimosaError::InvalidGridDimensions { rows, cols });
        }
        Ok(GridDim { rows, cols })
    }

    /// The MIMOSA sensor matrix, 928 rows by 960 columns.
    pub fn mimosa() -> Self {
        GridDim {
            rows: MIMOSA_ROWS,
            cols: MIMOSA_COLS,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl std::fmt::Display for GridDim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A row-major grid of 16-bit hit counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    dim: GridDim,
    cells: Vec<u16>,
}

impl PixelGrid {
    /// Create a zeroed grid.
    pub fn new(dim: GridDim) -> Self {
        PixelGrid {
            dim,
            cells: vec![0; dim.cells()],
        }
    }

    pub fn dim(&self) -> GridDim {
        self.dim
    }

    /// Counter at (row, col). Callers must stay in bounds.
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.cells[row * self.dim.cols + col]
    }

    /// Increment the counter at (row, col). The hardware protocol keeps
    /// 16-bit counters with wraparound past 65535; preserved here.
    fn bump(&mut self, row: usize, col: usize) {
        let cell = &mut self.cells[row * self.dim.cols + col];
        *cell = cell.wrapping_add(1);
    }

    /// Sum of all counters, widened to avoid overflow.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of cells with a non-zero count.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn copy_from(&mut self, other: &PixelGrid) {
        debug_assert_eq!(self.dim, other.dim);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Raw counter slice, row-major.
    pub fn as_slice(&self) -> &[u16] {
        &self.cells
    }
}

/// Double-buffered hit accumulator with a frame-count commit window.
#[derive(Debug, Clone)]
pub struct HitMap {
    temp: PixelGrid,
    stable: PixelGrid,
    frames_seen: u32,
    frames_per_commit: u32,
}

impl HitMap {
    /// Create an accumulator committing every `frames_per_commit` frames.
    pub fn new(dim: GridDim, frames_per_commit: u32) -> Self {
        HitMap {
            temp: PixelGrid::new(dim),
            stable: PixelGrid::new(dim),
            frames_seen: 0,
            frames_per_commit,
        }
    }

    /// Accumulator for the MIMOSA matrix.
    pub fn mimosa(frames_per_commit: u32) -> Self {
        HitMap::new(GridDim::mimosa(), frames_per_commit)
    }

    pub fn dim(&self) -> GridDim {
        self.temp.dim()
    }

    /// Completed frames since the last commit.
    pub fn frames_seen(&self) -> u32 {
        self.frames_seen
    }

    pub fn frames_per_commit(&self) -> u32 {
        self.frames_per_commit
    }

    /// The last committed map.
    pub fn stable(&self) -> &PixelGrid {
        &self.stable
    }

    /// The live accumulation map for the current window.
    pub fn temp(&self) -> &PixelGrid {
        &self.temp
    }

    /// Record a coordinate word's hits: `code + 1` contiguous columns
    /// starting at `column` on `row`. Out-of-range coordinates change
    /// nothing and report `false`.
    pub fn record_hit(&mut self, row: usize, column: usize, code: usize) -> bool {
        let dim = self.temp.dim();
        if row >= dim.rows() || column + code >= dim.cols() {
            return false;
        }
        for j in 0..=code {
            self.temp.bump(row, column + j);
        }
        true
    }

    /// Count one completed frame toward the commit window.
    pub fn complete_frame(&mut self) {
        self.frames_seen += 1;
    }

    /// Commit the window if it is full: copy `temp` into `stable`, clear
    /// `temp`, reset the frame count. Returns whether a commit happened.
    pub fn commit_if_due(&mut self) -> bool {
        if self.frames_seen != self.frames_per_commit {
            return false;
        }
        self.frames_seen = 0;
        self.stable.copy_from(&self.temp);
        self.temp.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small() -> HitMap {
        HitMap::new(GridDim::new(8, 10).unwrap(), 2)
    }

    #[test]
    fn test_dim_rejects_zero() {
        assert!(GridDim::new(0, 10).is_err());
        assert!(GridDim::new(928, 0).is_err());
        assert_eq!(GridDim::mimosa().cells(), 928 * 960);
    }

    #[test]
    fn test_record_hit_spans_code_plus_one_columns() {
        let mut map = small();
        assert!(map.record_hit(3, 4, 2));
        assert_eq!(map.temp().get(3, 4), 1);
        assert_eq!(map.temp().get(3, 5), 1);
        assert_eq!(map.temp().get(3, 6), 1);
        assert_eq!(map.temp().total(), 3);
    }

    #[test]
    fn test_record_hit_rejects_out_of_range() {
        let mut map = small();
        assert!(!map.record_hit(8, 0, 0)); // row == rows
        assert!(!map.record_hit(0, 8, 2)); // column + code == cols
        assert_eq!(map.temp().total(), 0);
    }

    #[test]
    fn test_commit_window_semantics() {
        let mut map = small();
        map.record_hit(1, 1, 0);

        map.complete_frame();
        assert!(!map.commit_if_due());
        assert_eq!(map.stable().total(), 0);
        assert_eq!(map.temp().total(), 1);

        map.record_hit(1, 1, 0);
        map.complete_frame();
        assert!(map.commit_if_due());
        assert_eq!(map.stable().get(1, 1), 2);
        assert_eq!(map.temp().total(), 0);
        assert_eq!(map.frames_seen(), 0);
    }

    #[test]
    fn test_counter_wraps_at_16_bits() {
        let mut map = HitMap::new(GridDim::new(1, 1).unwrap(), 1);
        for _ in 0..u32::from(u16::MAX) {
            map.record_hit(0, 0, 0);
        }
        assert_eq!(map.temp().get(0, 0), u16::MAX);
        map.record_hit(0, 0, 0);
        assert_eq!(map.temp().get(0, 0), 0);
    }

    proptest! {
        /// record_hit touches exactly code+1 contiguous cells and nothing else.
        #[test]
        fn prop_record_hit_touches_exact_span(
            row in 0usize..8,
            column in 0usize..10,
            code in 0usize..4,
        ) {
            let mut map = small();
            let accepted = map.record_hit(row, column, code);
            prop_assert_eq!(accepted, column + code < 10);

            let dim = map.dim();
            for r in 0..dim.rows() {
                for c in 0..dim.cols() {
                    let expected = if accepted && r == row && c >= column && c <= column + code {
                        1
                    } else {
                        0
                    };
                    prop_assert_eq!(map.temp().get(r, c), expected);
                }
            }
        }
    }
}
