//! Snapshot module - owned, read-only copies of the game for renderers and observers

use crate::game_state::Phase;
use crate::piece::Piece;
use crate::types::ShapeKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    /// Matrix edge length
    pub size: usize,
    /// Row-major 0/1 matrix
    pub matrix: Vec<u8>,
    pub x: i32,
    pub y: i32,
}

impl PieceSnapshot {
    fn write_from(&mut self, piece: &Piece) {
        let offset = piece.offset();
        self.kind = piece.kind();
        self.size = piece.matrix().size();
        self.matrix.clear();
        self.matrix.extend_from_slice(piece.matrix().cells());
        self.x = offset.x;
        self.y = offset.y;
    }

    /// Occupied cells in absolute field coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let size = self.size;
        self.matrix
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, _)| ((i % size) as i32 + self.x, (i / size) as i32 + self.y))
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        let mut out = Self {
            kind: piece.kind(),
            size: 0,
            matrix: Vec::new(),
            x: 0,
            y: 0,
        };
        out.write_from(piece);
        out
    }
}

/// Owned copy of everything a renderer or observer may read.
///
/// `snapshot_into` reuses the vectors so a host can keep one snapshot and
/// refresh it every frame without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major 0/1 field grid
    pub field: Vec<u8>,
    pub piece: PieceSnapshot,
    pub score: u32,
    pub best_score: u32,
    pub lines: u32,
    pub speed: u32,
    pub phase: Phase,
    pub revision: u64,
}

impl GameSnapshot {
    pub(crate) fn empty(piece: &Piece) -> Self {
        Self {
            width: 0,
            height: 0,
            field: Vec::new(),
            piece: PieceSnapshot::from(piece),
            score: 0,
            best_score: 0,
            lines: 0,
            speed: 0,
            phase: Phase::Idle,
            revision: 0,
        }
    }

    pub(crate) fn write_piece(&mut self, piece: &Piece) {
        self.piece.write_from(piece);
    }

    /// Settled occupancy at (x, y)
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.field[y * self.width + x] != 0
    }

    pub fn field_rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.field.chunks(self.width.max(1))
    }
}
