//! Board module - the settled cells
//!
//! A 10x20 grid where each cell is empty or holds the kind of the piece that
//! settled there. Stored as a flat row-major array, so two settled cells can
//! never share a location.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Falling pieces may have y < 0; collision checks ignore the top edge.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one `clear_full_rows` call, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Result of committing a piece to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Cells actually written
    pub settled: u8,
    /// A cell landed on the top row or above it
    pub topped_out: bool,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y); `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if any cell is left of column 0, right of the last column, at or
    /// below the bottom edge, or on a settled cell. Rows above the top are free.
    pub fn collides(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().any(|&(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Commit cells as settled.
    ///
    /// Callers lock only the last position that passed `collides`. A cell on
    /// row 0 or above signals top-out; cells above the board are not stored.
    /// A cell that would land on an occupied square (only possible when a
    /// piece spawned into the stack) is also treated as top-out.
    pub fn lock(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> LockOutcome {
        let mut outcome = LockOutcome::default();
        for &(x, y) in cells {
            if y <= 0 {
                outcome.topped_out = true;
            }
            let Some(idx) = Self::index(x, y) else {
                continue;
            };
            if self.cells[idx].is_some() {
                outcome.topped_out = true;
                continue;
            }
            self.cells[idx] = Some(kind);
            outcome.settled += 1;
        }
        outcome
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and drop the rows above into the gaps.
    ///
    /// Two-pointer pass from the bottom: each surviving row moves down by the
    /// number of full rows beneath it. Returns the cleared row indices
    /// (as they were before compaction), bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Number of settled cells
    pub fn settled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate settled cells as ((x, y), kind)
    pub fn settled(&self) -> impl Iterator<Item = ((i8, i8), PieceKind)> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|kind| (((i % width) as i8, (i / width) as i8), kind))
        })
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a u8 grid (0 = empty, kind index + 1 otherwise)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map_or(0, |k| (k.index() + 1) as u8);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole row except the listed columns (test and bench helper)
    pub fn fill_row_except(&mut self, y: i8, gaps: &[i8], kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
