//! Field module - the settled-cell grid
//!
//! The field is a width x height grid of occupancy bytes (0 empty, 1 occupied).
//! Uses a flat array in row-major order for cache locality.
//! Coordinates: (x, y) where x grows to the right and y grows downward; row 0 is the top.
//!
//! Collision is the single source of truth for legality: every move, rotation,
//! drop and spawn check goes through [`Field::will_collide`] before committing.

use crate::piece::Piece;

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Field {
    /// Create a new empty field.
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "field dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Occupancy at (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|idx| self.cells[idx] != 0)
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(true)
    }

    /// Set occupancy at (x, y).
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, occupied: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = u8::from(occupied);
                true
            }
            None => false,
        }
    }

    /// Whether the piece, at its current offset, overlaps settled cells or leaves the
    /// field through the sides or the bottom.
    ///
    /// Cells above row 0 never collide by themselves.
    pub fn will_collide(&self, piece: &Piece) -> bool {
        piece.occupied_cells().iter().any(|&(x, y)| {
            if x < 0 || x as usize >= self.width || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write every occupied piece cell into the grid.
    ///
    /// The caller must have checked [`Field::will_collide`] first; a piece that
    /// overlaps settled cells or reaches outside the grid is a broken invariant and
    /// panics.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            let idx = self
                .index(x, y)
                .unwrap_or_else(|| panic!("merge outside the field at ({x}, {y})"));
            assert!(self.cells[idx] == 0, "merge over a settled cell at ({x}, {y})");
            self.cells[idx] = 1;
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    /// Indices of completely filled rows, top to bottom
    pub fn filled_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove row `y`, shifting every row above it down by one.
    ///
    /// Row 0 becomes a fresh empty row; it does not keep a copy of its old
    /// contents.
    pub fn remove_row(&mut self, y: usize) {
        assert!(y < self.height, "row {y} outside a field of height {}", self.height);

        let width = self.width;
        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells.copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(0);
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Occupied cells as (x, y)
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Build a field from text rows, `#` for occupied and anything else empty.
    ///
    /// Handy for scripted setups:
    ///
    /// ```
    /// use blockfall_core::Field;
    ///
    /// let field = Field::from_ascii(&["....", "##.#", "####"]);
    /// assert_eq!(field.filled_rows(), vec![2]);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut field = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "ragged row {y}");
            for (x, ch) in row.chars().enumerate() {
                field.set(x as i32, y as i32, ch == '#');
            }
        }
        field
    }
}
