//! Game state tests - settling, line clears, speed progression and game over

use blockfall::core::{
    GameConfig, GameEvent, GameState, MemoryStore, Offset, Phase, Piece,
};
use blockfall::types::{ScoringPolicy, ShapeKind};

fn game(config: GameConfig) -> GameState {
    let mut game = GameState::new(config, Box::new(MemoryStore::new()));
    game.start();
    game.take_events();
    game
}

/// Fill the bottom row except the two right-most columns and drop an O into the gap
fn clear_one_line(game: &mut GameState) {
    let width = game.field().width() as i32;
    let bottom = game.field().height() as i32 - 1;
    game.field_mut().clear();
    for x in 0..width - 2 {
        game.field_mut().set(x, bottom, true);
    }
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(width - 2, 0)));

    // 18 free ticks, then the settling one.
    for _ in 0..=bottom - 1 {
        game.tick();
    }
}

#[test]
fn test_piece_falls_one_row_per_tick() {
    let mut game = game(GameConfig::default());
    game.replace_piece(Piece::spawn(ShapeKind::T, Offset::new(3, 0)));

    game.tick();
    game.tick();

    assert_eq!(game.piece().offset(), Offset::new(3, 2));
    assert_eq!(game.piece().ticks(), 2);
}

#[test]
fn test_filling_the_gap_clears_the_line() {
    let mut game = game(GameConfig::default());
    clear_one_line(&mut game);

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 1);
    assert!(game.field().filled_rows().is_empty());
    // The upper half of the O dropped into the bottom row.
    assert!(game.field().is_occupied(8, 19));
    assert!(game.field().is_occupied(9, 19));
    assert!(game
        .take_events()
        .contains(&GameEvent::LinesCleared { rows: 1, award: 1 }));
}

#[test]
fn test_award_uses_current_speed() {
    let mut game = game(GameConfig::default());
    game.set_speed(4);
    clear_one_line(&mut game);
    assert_eq!(game.score(), 4);
}

#[test]
fn test_flat_scoring_ignores_speed() {
    let mut game = game(GameConfig::default().with_scoring(ScoringPolicy::Flat));
    game.set_speed(4);
    clear_one_line(&mut game);
    assert_eq!(game.score(), 1);
}

#[test]
fn test_ten_lines_raise_the_speed() {
    let mut game = game(GameConfig::default());

    for _ in 0..9 {
        clear_one_line(&mut game);
    }
    assert_eq!(game.speed(), 1);
    game.take_events();

    clear_one_line(&mut game);
    assert_eq!(game.lines(), 10);
    assert_eq!(game.score(), 10);
    assert_eq!(game.speed(), 2);
    assert_eq!(game.tick_interval().as_millis(), 500);
    assert!(game.take_events().contains(&GameEvent::SpeedChanged(2)));

    // Awards after the step use the new speed.
    clear_one_line(&mut game);
    assert_eq!(game.score(), 12);
}

#[test]
fn test_double_clear_in_one_settle() {
    let mut game = game(GameConfig::default());
    for y in [18, 19] {
        for x in 0..8 {
            game.field_mut().set(x, y, true);
        }
    }
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(8, 18)));
    game.tick();

    assert_eq!(game.lines(), 2);
    assert_eq!(game.score(), 2);
    assert!(game.field().is_empty());
}

/// Settle an O at the spawn point over a ledge so no shape fits afterwards
fn block_the_spawn(game: &mut GameState) {
    for x in 1..10 {
        game.field_mut().set(x, 2, true);
    }
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(3, 0)));
    game.tick();
}

#[test]
fn test_spawn_collision_ends_the_game() {
    let mut game = game(GameConfig::default().with_auto_restart(false));
    clear_one_line(&mut game);
    assert_eq!(game.score(), 1);

    block_the_spawn(&mut game);

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.is_game_over());
    assert!(game.take_events().contains(&GameEvent::GameOver));

    // Input and ticks are ignored while parked.
    let offset = game.piece().offset();
    game.tick();
    game.move_piece(1);
    assert!(!game.soft_drop());
    assert_eq!(game.piece().offset(), offset);
}

#[test]
fn test_restart_after_game_over() {
    let mut game = game(GameConfig::default().with_auto_restart(false));
    game.set_speed(3);
    clear_one_line(&mut game);
    block_the_spawn(&mut game);
    assert!(game.is_game_over());

    game.restart();

    assert_eq!(game.phase(), Phase::Active);
    assert!(game.field().is_empty());
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.speed(), 1);
    assert_eq!(game.best_score(), 3);
}

#[test]
fn test_auto_restart_starts_over() {
    let mut game = game(GameConfig::default());
    block_the_spawn(&mut game);

    let events = game.take_events();
    let over = events.iter().position(|e| *e == GameEvent::GameOver);
    let restarted = events.iter().position(|e| *e == GameEvent::Restarted);
    assert!(over.is_some() && restarted > over);

    assert_eq!(game.phase(), Phase::Active);
    assert!(game.field().is_empty());
}

#[test]
fn test_best_score_survives_restart_and_is_saved() {
    let store = MemoryStore::with_best(2);
    let mut game = GameState::new(GameConfig::default(), Box::new(store.clone()));
    game.start();
    assert_eq!(game.best_score(), 2);

    game.set_speed(5);
    clear_one_line(&mut game);
    assert_eq!(game.best_score(), 5);
    assert_eq!(store.best(), 5);

    game.restart();
    assert_eq!(game.score(), 0);
    assert_eq!(game.best_score(), 5);
}

#[test]
fn test_soft_drop_waits_for_first_tick() {
    let mut game = game(GameConfig::default());
    game.replace_piece(Piece::spawn(ShapeKind::T, Offset::new(3, 0)));

    assert!(game.soft_drop());
    assert_eq!(game.piece().offset(), Offset::new(3, 0));

    game.tick();
    assert!(game.soft_drop());
    assert_eq!(game.piece().offset(), Offset::new(3, 2));
}

#[test]
fn test_soft_drop_settles_on_the_floor() {
    let mut game = game(GameConfig::default());
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(0, 0)));
    game.tick();
    while game.soft_drop() {}

    assert!(game.field().is_occupied(0, 19));
    assert!(game.field().is_occupied(1, 18));
    assert!(game.take_events().contains(&GameEvent::Settled));
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default().with_seed(99);
    let mut a = game(config);
    let mut b = game(config);

    for i in 0..300 {
        match i % 5 {
            0 => {
                a.move_piece(-1);
                b.move_piece(-1);
            }
            1 => {
                a.rotate(1);
                b.rotate(1);
            }
            _ => {
                a.tick();
                b.tick();
            }
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_piece_resting_above_the_top_ends_the_game() {
    let config = GameConfig {
        spawn: Offset::new(3, -1),
        ..GameConfig::default()
    }
    .with_auto_restart(false);
    let mut game = game(config);
    game.field_mut().set(3, 1, true);
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(3, -1)));

    game.tick();

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.take_events().contains(&GameEvent::GameOver));
    // Nothing of the blocked piece was merged.
    assert_eq!(game.field().occupied_cells().collect::<Vec<_>>(), vec![(3, 1)]);
}

#[test]
fn test_piece_resting_above_the_top_auto_restarts() {
    let config = GameConfig {
        spawn: Offset::new(3, -1),
        ..GameConfig::default()
    };
    let mut game = game(config);
    game.field_mut().set(3, 1, true);
    game.replace_piece(Piece::spawn(ShapeKind::O, Offset::new(3, -1)));

    game.tick();

    assert_eq!(game.phase(), Phase::Active);
    assert!(game.field().is_empty());
    assert!(game.take_events().contains(&GameEvent::Restarted));
}

#[test]
fn test_narrow_field_parks_instead_of_restarting_forever() {
    let config = GameConfig {
        width: 4,
        ..GameConfig::default()
    };
    let game = game(config);

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.field().is_empty());
}

#[test]
fn test_very_high_speed_keeps_a_positive_period() {
    let mut game = game(GameConfig::default());

    game.set_speed(1001);
    assert_eq!(game.speed(), 1001);
    assert_eq!(game.tick_interval().as_millis(), 1);

    game.set_speed(u32::MAX);
    assert!(!game.tick_interval().is_zero());
}
