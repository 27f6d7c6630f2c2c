//! Render tests - painting a live game onto the terminal canvas

use blockfall::core::{GameConfig, GameState, MemoryStore, Offset, Piece};
use blockfall::engine::{paint, Renderer};
use blockfall::term::{encode_diff_into, FieldCanvas, FrameBuffer, Viewport};
use blockfall::types::ShapeKind;

fn game() -> GameState {
    let mut game = GameState::new(GameConfig::default(), Box::new(MemoryStore::new()));
    game.start();
    game
}

/// Field 10x20 in a 22x22 viewport: the border sits at the origin, so field cell
/// (x, y) starts at column 1 + 2x, row 1 + y.
fn canvas() -> FieldCanvas {
    FieldCanvas::new(10, 20, Viewport::new(22, 22))
}

fn glyph(fb: &FrameBuffer, x: u16, y: u16) -> char {
    fb.get(1 + 2 * x, 1 + y).map(|c| c.ch).unwrap_or('?')
}

#[test]
fn test_paint_draws_piece_and_settled_cells() {
    let mut game = game();
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(0, 0)));
    game.field_mut().set(9, 19, true);

    let mut canvas = canvas();
    paint(&game, &mut canvas).unwrap();

    let fb = canvas.framebuffer();
    assert_eq!(glyph(fb, 0, 0), '█');
    assert_eq!(glyph(fb, 1, 1), '█');
    assert_eq!(glyph(fb, 9, 19), '█');
    assert_eq!(glyph(fb, 5, 10), '·');
    assert!(canvas.take_dirty());
}

#[test]
fn test_piece_above_the_field_is_clipped() {
    let mut game = game();
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(4, -1)));

    let mut canvas = canvas();
    paint(&game, &mut canvas).unwrap();

    let fb = canvas.framebuffer();
    assert_eq!(fb.row_text(0), format!("┌{}┐", "─".repeat(20)));
    assert_eq!(glyph(fb, 4, 0), '█');
    assert_eq!(glyph(fb, 5, 0), '█');
    assert_eq!(glyph(fb, 4, 1), '·');
}

#[test]
fn test_moving_piece_changes_few_cells() {
    let mut game = game();
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(4, 8)));

    let mut canvas = canvas();
    paint(&game, &mut canvas).unwrap();
    let before = canvas.framebuffer().clone();

    game.move_piece(1);
    paint(&game, &mut canvas).unwrap();
    let after = canvas.framebuffer();

    let changed = before
        .cells()
        .iter()
        .zip(after.cells())
        .filter(|(a, b)| a != b)
        .count();
    // Column 4 empties and column 6 fills: 2 rows x 2 cells x 2 glyph columns.
    assert_eq!(changed, 8);

    let mut out = Vec::new();
    encode_diff_into(&before, after, &mut out).unwrap();
    assert!(!out.is_empty());
}

#[test]
fn test_status_reflects_the_game() {
    let mut game = game();
    game.set_speed(7);

    let mut canvas = FieldCanvas::new(10, 20, Viewport::new(44, 22));
    paint(&game, &mut canvas).unwrap();

    let fb = canvas.framebuffer();
    let rows: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    let speed_row = rows
        .iter()
        .position(|r| r.contains("SPEED"))
        .expect("speed label");
    assert!(rows[speed_row + 1].contains('7'));
}

#[test]
fn test_clear_resets_previous_frame() {
    let mut canvas = canvas();
    canvas.clear();
    canvas.draw_occupied(&[(3, 3)]);
    canvas.clear();
    assert_eq!(glyph(canvas.framebuffer(), 3, 3), '·');
}
