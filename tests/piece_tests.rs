//! Piece tests - templates and transpose-based rotation

use blockfall::core::piece::template;
use blockfall::core::{Matrix, Offset, Piece, SimpleRng};
use blockfall::types::{ShapeKind, SPAWN_X, SPAWN_Y};

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in ShapeKind::ALL {
        let start = Matrix::for_shape(kind);
        for direction in [1, -1] {
            let mut m = start.clone();
            for _ in 0..4 {
                m = m.rotated(direction);
            }
            assert_eq!(m, start, "{kind:?} direction {direction}");
        }
    }
}

#[test]
fn test_clockwise_then_back_is_identity() {
    for kind in ShapeKind::ALL {
        let start = Matrix::for_shape(kind);
        assert_eq!(start.rotated(1).rotated(-1), start, "{kind:?}");
        assert_eq!(start.rotated(-1).rotated(1), start, "{kind:?}");
    }
}

#[test]
fn test_rotation_keeps_cell_count() {
    for kind in ShapeKind::ALL {
        let m = Matrix::for_shape(kind);
        let count = m.occupied().count();
        assert_eq!(count, 4, "{kind:?}");
        assert_eq!(m.rotated(1).occupied().count(), count);
    }
}

#[test]
fn test_t_rotates_clockwise_to_point_right() {
    let t = Matrix::for_shape(ShapeKind::T);
    let expected = Matrix::from_rows(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]);
    assert_eq!(t.rotated(1), expected);

    let back = Matrix::from_rows(&[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]]);
    assert_eq!(t.rotated(-1), back);
}

#[test]
fn test_i_bar_lies_down_after_rotation() {
    let i = Matrix::for_shape(ShapeKind::I);
    assert_eq!(i.size(), 6);

    let flat = i.rotated(1);
    let rows: Vec<&[u8]> = flat.rows().collect();
    assert_eq!(rows[2], &[0, 1, 1, 1, 1, 0]);
}

#[test]
fn test_o_is_rotation_invariant() {
    let o = Matrix::for_shape(ShapeKind::O);
    assert_eq!(o.rotated(1), o);
    assert_eq!(o.rotated(-1), o);
}

#[test]
fn test_matrix_matches_template() {
    for kind in ShapeKind::ALL {
        let rows = template(kind);
        let m = Matrix::for_shape(kind);
        assert_eq!(m.size(), rows.len());
        let flat: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        assert_eq!(m.cells(), flat.as_slice());
    }
}

#[test]
fn test_piece_rotation_swaps_in_a_new_matrix() {
    let mut piece = Piece::new(ShapeKind::L);
    let before = piece.matrix().clone();
    piece.rotate(1);
    assert_ne!(piece.matrix(), &before);
    piece.rotate(-1);
    assert_eq!(piece.matrix(), &before);
}

#[test]
fn test_default_spawn_offset() {
    let piece = Piece::new(ShapeKind::S);
    assert_eq!(piece.offset(), Offset::new(SPAWN_X, SPAWN_Y));
    assert_eq!(piece.ticks(), 0);
}

#[test]
fn test_occupied_cells_are_offset() {
    let piece = Piece::spawn(ShapeKind::O, Offset::new(2, -1));
    let cells: Vec<(i32, i32)> = piece.occupied_cells().into_iter().collect();
    assert_eq!(cells, vec![(2, -1), (3, -1), (2, 0), (3, 0)]);
}

#[test]
fn test_generated_shapes_cover_every_kind() {
    let mut rng = SimpleRng::new(7);
    let mut seen = Vec::new();
    for _ in 0..500 {
        let kind = Piece::generate(&mut rng, Offset::default()).kind();
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    assert_eq!(seen.len(), ShapeKind::ALL.len());
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = SimpleRng::new(42);
    let mut b = SimpleRng::new(42);
    for _ in 0..100 {
        assert_eq!(a.next_shape(), b.next_shape());
    }
}

#[test]
#[should_panic]
fn test_non_square_matrix_panics() {
    let _ = Matrix::from_rows(&[&[1, 1, 1], &[1, 1, 1]]);
}
