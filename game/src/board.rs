use crate::piece::{ActivePiece, Shape, Vec2i};

pub const ROWS: usize = 20;
pub const COLS: usize = 10;
pub const CELL_EMPTY: u8 = 0;

pub type Row = [u8; COLS];

const EMPTY_ROW: Row = [CELL_EMPTY; COLS];

/// Settled blocks, stored top row first (`rows[0]` is the top of the well).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Row>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: vec![EMPTY_ROW; ROWS],
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.cell(row, col) == Some(CELL_EMPTY)
    }

    /// Out-of-range writes are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.iter().all(|&c| c != CELL_EMPTY))
    }

    /// Whether `shape` anchored at `anchor + offset` fits.
    ///
    /// Columns must lie in `[0, COLS)` and rows below `ROWS`. Cells above the top edge are
    /// always accepted so pieces can spawn and rotate partly outside the well.
    pub fn is_valid(&self, shape: &Shape, anchor: Vec2i, offset: Vec2i) -> bool {
        shape.iter().all(|&cell| {
            let target = anchor + cell + offset;
            if target.x < 0 || target.x >= COLS as i32 {
                return false;
            }
            if target.y >= ROWS as i32 {
                return false;
            }
            target.y < 0 || self.is_empty_at(target.y as usize, target.x as usize)
        })
    }

    /// Writes the piece's type into every in-bounds cell it covers. Cells still above the board
    /// are dropped.
    pub fn place(&mut self, piece: &ActivePiece, anchor: Vec2i) {
        for cell in piece.cells(anchor) {
            if cell.x < 0 || cell.y < 0 {
                continue;
            }
            self.set_cell(cell.y as usize, cell.x as usize, piece.piece_type);
        }
    }

    /// Removes every full row, shifting the rows above it down and opening an empty row at the
    /// top. Each pass rescans the whole board and passes repeat until one finds nothing.
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let full: Vec<usize> = (0..self.rows.len())
                .filter(|&r| self.is_row_full(r))
                .collect();
            if full.is_empty() {
                return removed;
            }
            // Removing row r and inserting at 0 leaves every index > r where it was, so the
            // ascending list stays valid while we work through it.
            for r in full {
                self.rows.remove(r);
                self.rows.insert(0, EMPTY_ROW);
                removed += 1;
            }
        }
    }
}
