//! Piece module - shape templates, matrices and rotation
//!
//! Every shape is a square 0/1 matrix; the I bar is padded to 6x6 so all seven
//! templates rotate with the same transpose scheme. Rotation never mutates a
//! matrix in place: each step builds a new one and the piece swaps it in.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{ShapeKind, MAX_SHAPE_SIZE, SPAWN_X, SPAWN_Y};

/// Upper bound on occupied cells of any template matrix
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Absolute cell list of a piece, in field coordinates
pub type PieceCells = ArrayVec<(i32, i32), MAX_PIECE_CELLS>;

const T_SHAPE: &[&[u8]] = &[
    &[0, 1, 0],
    &[1, 1, 1],
    &[0, 0, 0],
];

const L_SHAPE: &[&[u8]] = &[
    &[0, 1, 0],
    &[0, 1, 0],
    &[0, 1, 1],
];

const J_SHAPE: &[&[u8]] = &[
    &[0, 1, 0],
    &[0, 1, 0],
    &[1, 1, 0],
];

const S_SHAPE: &[&[u8]] = &[
    &[0, 1, 0],
    &[1, 1, 0],
    &[1, 0, 0],
];

const Z_SHAPE: &[&[u8]] = &[
    &[0, 1, 0],
    &[0, 1, 1],
    &[0, 0, 1],
];

const O_SHAPE: &[&[u8]] = &[
    &[1, 1],
    &[1, 1],
];

const I_SHAPE: &[&[u8]] = &[
    &[0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 0, 0, 0],
    &[0, 0, 1, 0, 0, 0],
    &[0, 0, 1, 0, 0, 0],
    &[0, 0, 1, 0, 0, 0],
    &[0, 0, 0, 0, 0, 0],
];

/// Template rows for a shape kind
pub fn template(kind: ShapeKind) -> &'static [&'static [u8]] {
    match kind {
        ShapeKind::T => T_SHAPE,
        ShapeKind::L => L_SHAPE,
        ShapeKind::J => J_SHAPE,
        ShapeKind::S => S_SHAPE,
        ShapeKind::Z => Z_SHAPE,
        ShapeKind::O => O_SHAPE,
        ShapeKind::I => I_SHAPE,
    }
}

/// Square matrix of 0/1 cells, row-major, row 0 on top
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    cells: Vec<u8>,
}

impl Matrix {
    /// Build a matrix from rows.
    ///
    /// Panics unless the rows form a non-empty square.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(size > 0, "shape matrix must not be empty");

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "shape matrix must be square");
            cells.extend(row.iter().map(|&v| u8::from(v != 0)));
        }
        Self { size, cells }
    }

    /// Fresh copy of a shape template
    pub fn for_shape(kind: ShapeKind) -> Self {
        Self::from_rows(template(kind))
    }

    /// Edge length
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y * self.size + x] != 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Occupied cells as (x, y) within the matrix
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, _)| (i % size, i / size))
    }

    /// Rotated copy.
    ///
    /// Both directions start from the transpose. `direction > 0` then reverses
    /// each row (clockwise); `direction <= 0` reverses the row order
    /// (counter-clockwise).
    pub fn rotated(&self, direction: i32) -> Self {
        let n = self.size;
        let mut cells = vec![0u8; n * n];
        for y in 0..n {
            for x in 0..n {
                // transposed[y][x] == self[x][y]
                let src = if direction > 0 {
                    // out[y][x] = transposed[y][n - 1 - x]
                    (n - 1 - x) * n + y
                } else {
                    // out[y][x] = transposed[n - 1 - y][x]
                    x * n + (n - 1 - y)
                };
                cells[y * n + x] = self.cells[src];
            }
        }
        Self { size: n, cells }
    }
}

/// Top-left corner of a piece matrix in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::new(SPAWN_X, SPAWN_Y)
    }
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    matrix: Matrix,
    offset: Offset,
    /// Natural ticks experienced since spawn
    ticks: u32,
}

impl Piece {
    /// Create a piece of the given kind at the default spawn offset
    pub fn new(kind: ShapeKind) -> Self {
        Self::spawn(kind, Offset::default())
    }

    /// Create a piece of the given kind at an explicit offset
    pub fn spawn(kind: ShapeKind, offset: Offset) -> Self {
        Self {
            kind,
            matrix: Matrix::for_shape(kind),
            offset,
            ticks: 0,
        }
    }

    /// Create a piece of a uniformly random kind
    pub fn generate(rng: &mut SimpleRng, offset: Offset) -> Self {
        Self::spawn(rng.next_shape(), offset)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Move the matrix corner to an absolute position
    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset = Offset::new(x, y);
    }

    /// Shift by a relative amount (no collision check)
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Rotate by 90 degrees (no collision check)
    pub fn rotate(&mut self, direction: i32) {
        self.matrix = self.matrix.rotated(direction);
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    /// Occupied cells in absolute field coordinates
    pub fn occupied_cells(&self) -> PieceCells {
        self.matrix
            .occupied()
            .map(|(x, y)| (x as i32 + self.offset.x, y as i32 + self.offset.y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_square_and_bounded() {
        for kind in ShapeKind::ALL {
            let m = Matrix::for_shape(kind);
            assert!(m.size() >= 2 && m.size() <= MAX_SHAPE_SIZE, "{kind:?}");
            assert_eq!(m.cells().len(), m.size() * m.size());
        }
    }

    #[test]
    fn test_every_template_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(Matrix::for_shape(kind).occupied().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_clockwise_t() {
        let t = Matrix::for_shape(ShapeKind::T);
        let cw = t.rotated(1);
        let expected = Matrix::from_rows(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]);
        assert_eq!(cw, expected);
    }

    #[test]
    fn test_rotate_counter_clockwise_t() {
        let t = Matrix::for_shape(ShapeKind::T);
        let ccw = t.rotated(-1);
        let expected = Matrix::from_rows(&[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]]);
        assert_eq!(ccw, expected);
    }

    #[test]
    fn test_rotation_does_not_touch_template() {
        let mut piece = Piece::new(ShapeKind::L);
        piece.rotate(1);
        assert_ne!(piece.matrix(), &Matrix::for_shape(ShapeKind::L));
        assert_eq!(Piece::new(ShapeKind::L).matrix(), &Matrix::for_shape(ShapeKind::L));
    }

    #[test]
    #[should_panic(expected = "square")]
    fn test_non_square_matrix_rejected() {
        Matrix::from_rows(&[&[1, 1, 1], &[0, 1, 0]]);
    }

    #[test]
    fn test_occupied_cells_apply_offset() {
        let mut piece = Piece::new(ShapeKind::O);
        piece.set_offset(4, 7);
        let cells: Vec<_> = piece.occupied_cells().into_iter().collect();
        assert_eq!(cells, vec![(4, 7), (5, 7), (4, 8), (5, 8)]);
    }

    #[test]
    fn test_new_piece_starts_at_spawn_with_zero_ticks() {
        let piece = Piece::new(ShapeKind::I);
        assert_eq!(piece.offset(), Offset::new(SPAWN_X, SPAWN_Y));
        assert_eq!(piece.ticks(), 0);
    }
}
