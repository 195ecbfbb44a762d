use terminal_snake::config::GameSetup;
use terminal_snake::game::{EndReason, GameEngine, GameStatus, TickOutcome};
use terminal_snake::grid::{GridSize, Position};
use terminal_snake::input::Direction;
use terminal_snake::score::HighScoreStore;
use terminal_snake::tick::{ManualTicks, TickSource};

fn body(engine: &GameEngine<ManualTicks>) -> Vec<Position> {
    engine.snake().segments().copied().collect()
}

#[test]
fn classic_opening_eats_first_food_then_hits_left_wall() {
    let mut engine = GameEngine::new_with_seed(GameSetup::default(), ManualTicks::default(), 42)
        .expect("default setup is valid");
    engine.start_game();
    assert_eq!(
        body(&engine),
        vec![Position::new(3, 7), Position::new(2, 7), Position::new(1, 7)]
    );

    assert_eq!(engine.update_game(), TickOutcome::Moved);
    assert_eq!(
        body(&engine),
        vec![Position::new(4, 7), Position::new(3, 7), Position::new(2, 7)]
    );

    let mut outcome = TickOutcome::Moved;
    while engine.snake().head() != Position::new(12, 7) {
        outcome = engine.update_game();
    }
    assert_eq!(outcome, TickOutcome::Ate);
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.snake().len(), 4);
    assert!(!engine.snake().occupies(engine.food().position()));

    // Left is a reversal until Down has been committed by a tick.
    assert!(engine.change_direction(Direction::Down));
    assert!(!engine.change_direction(Direction::Left));
    engine.update_game();
    assert!(engine.change_direction(Direction::Left));
    engine.update_game();
    assert_eq!(engine.snake().head(), Position::new(11, 8));

    let mut last = TickOutcome::Moved;
    while engine.status() == GameStatus::Running {
        last = engine.update_game();
    }

    assert_eq!(last, TickOutcome::Ended(EndReason::WallCollision));
    assert_eq!(engine.snake().head(), Position::new(0, 8));
    assert!(body(&engine).iter().all(|cell| cell.is_within_bounds(engine.grid())));
    assert!(!engine.ticks().is_running());
}

#[test]
fn restart_discards_previous_run() {
    let setup = GameSetup {
        grid: GridSize::new(8, 5),
        snake_start: Position::new(2, 2),
        snake_length: 2,
        food_start: Position::new(6, 2),
    };
    let mut engine =
        GameEngine::new_with_seed(setup, ManualTicks::default(), 9).expect("setup is valid");

    engine.start_game();
    for _ in 0..4 {
        engine.update_game();
    }
    assert_eq!(engine.score(), 1);
    assert!(engine.end_game());

    engine.start_game();

    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.snake().head(), Position::new(2, 2));
    assert_eq!(engine.food().position(), Position::new(6, 2));
}

#[test]
fn rejected_submission_leaves_store_untouched() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("highscores.csv");
    let mut store = HighScoreStore::open(&path).expect("open");
    store.save(12, "Bea").expect("valid submission");
    let before = std::fs::read_to_string(&path).expect("store written");

    assert!(store.save(-5, "Alice").is_err());
    assert!(store.save(3, "").is_err());

    assert_eq!(store.len(), 1);
    assert_eq!(std::fs::read_to_string(&path).expect("store readable"), before);
}
