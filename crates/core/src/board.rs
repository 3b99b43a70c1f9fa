//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of cells. Each cell records whether a frozen block
//! occupies it, whether the falling piece currently covers it, the material
//! category of the frozen block and the serial of the piece that froze it.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (bottom to top)

use crate::types::{Category, CellColor, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A single board cell.
///
/// Invariant: `occupied == category.is_some()`. The `current` marking never
/// writes a category into an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub occupied: bool,
    /// Covered by the falling piece.
    pub current: bool,
    pub category: Option<Category>,
    /// Serial of the piece that froze this block.
    pub combo_id: Option<u32>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        current: false,
        category: None,
        combo_id: None,
    };

    /// A frozen block.
    pub fn frozen(category: Category, combo_id: Option<u32>) -> Self {
        Self {
            occupied: true,
            current: false,
            category: Some(category),
            combo_id,
        }
    }

    /// Display colour, derived from the category of a frozen block.
    pub fn color(&self) -> Option<CellColor> {
        if !self.occupied {
            return None;
        }
        self.category.map(|c| c.color())
    }

    /// Occupancy and category agree.
    pub fn is_consistent(&self) -> bool {
        self.occupied == self.category.is_some() && (self.occupied || self.combo_id.is_none())
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
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

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and not occupied by a frozen block
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.occupied)
    }

    /// Check if position is occupied (within bounds and frozen)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.occupied)
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.occupied)
    }

    /// Category shared by every block of a full row.
    ///
    /// Returns None when the row is not full or mixes categories.
    pub fn uniform_category(&self, y: usize) -> Option<Category> {
        if !self.is_row_full(y) {
            return None;
        }
        let row = self.row(y);
        let first = row[0].category?;
        row.iter()
            .all(|cell| cell.category == Some(first))
            .then_some(first)
    }

    /// Delete a row and shift every row above it down by one.
    /// The top row is refilled with empty cells.
    pub fn delete_row(&mut self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }

        let width = BOARD_WIDTH as usize;
        let height = BOARD_HEIGHT as usize;

        // copy_within handles the overlapping ranges.
        let src_start = (y + 1) * width;
        let src_end = height * width;
        self.cells.copy_within(src_start..src_end, y * width);

        let top = (height - 1) * width;
        self.cells[top..].fill(Cell::EMPTY);

        true
    }

    /// Mark the given positions as covered by the falling piece.
    /// Out-of-bounds positions are skipped.
    pub fn mark_current(&mut self, blocks: &[(i8, i8)]) {
        for &(x, y) in blocks {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx].current = true;
            }
        }
    }

    /// Drop every falling-piece marking.
    pub fn clear_current_marks(&mut self) {
        for cell in &mut self.cells {
            cell.current = false;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a row-indexed grid (`grid[y][x]`, row 0 at the bottom).
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Every cell respects the occupancy/category invariant.
    pub fn is_consistent(&self) -> bool {
        self.cells.iter().all(Cell::is_consistent)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
