use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::CollisionDetector;
use crate::config::GameSetup;
use crate::error::GameError;
use crate::food::Food;
use crate::grid::GridSize;
use crate::input::Direction;
use crate::snake::Snake;
use crate::tick::TickSource;

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Ended,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The player ended the run from the keyboard.
    Forced,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// What a single `update_game` call did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running.
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Owns the snake, food and score of the current run and advances them one
/// tick at a time.
#[derive(Debug)]
pub struct GameEngine<T> {
    setup: GameSetup,
    initial_snake: Snake,
    initial_food: Food,
    snake: Snake,
    food: Food,
    score: u32,
    tick_count: u64,
    status: GameStatus,
    end_reason: Option<EndReason>,
    ticks: T,
    rng: StdRng,
}

impl<T: TickSource> GameEngine<T> {
    /// Validates `setup` and builds an engine in [`GameStatus::NotStarted`].
    pub fn new(setup: GameSetup, ticks: T) -> Result<Self, GameError> {
        Self::with_rng(setup, ticks, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn new_with_seed(setup: GameSetup, ticks: T, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(setup, ticks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(setup: GameSetup, ticks: T, rng: StdRng) -> Result<Self, GameError> {
        let initial_snake = Snake::new(setup.snake_start, setup.snake_length, setup.grid)?;
        let initial_food = Food::new(setup.food_start, setup.grid, &initial_snake)?;
        info!(
            "engine ready on {} grid, snake at {} length {}, food at {}",
            setup.grid, setup.snake_start, setup.snake_length, setup.food_start
        );

        Ok(Self {
            setup,
            snake: initial_snake.clone(),
            food: initial_food,
            initial_snake,
            initial_food,
            score: 0,
            tick_count: 0,
            status: GameStatus::NotStarted,
            end_reason: None,
            ticks,
            rng,
        })
    }

    /// Starts a fresh run, discarding any previous snake, food and score.
    pub fn start_game(&mut self) {
        self.snake = self.initial_snake.clone();
        self.food = self.initial_food;
        self.score = 0;
        self.tick_count = 0;
        self.end_reason = None;
        self.status = GameStatus::Running;
        self.ticks.start();
        info!("game started");
    }

    /// Advances the run by one tick.
    ///
    /// Food is checked first: a tick that eats never ends the game.
    pub fn update_game(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            debug!("tick ignored while {:?}", self.status);
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        self.snake.move_forward();
        trace!("snake moved to {}", self.snake.head());

        let detector = CollisionDetector::new(&self.snake, &self.food, self.setup.grid);
        if detector.check_food_collision() {
            return self.eat();
        }

        let reason = if detector.check_wall_collision() {
            EndReason::WallCollision
        } else if detector.check_self_collision() {
            EndReason::SelfCollision
        } else {
            return TickOutcome::Moved;
        };

        self.finish(reason);
        TickOutcome::Ended(reason)
    }

    fn eat(&mut self) -> TickOutcome {
        self.snake.grow();
        let spawned = self.food.spawn(&mut self.rng, self.setup.grid, &self.snake);
        self.score += 1;
        debug!(
            "food eaten, score {} length {}",
            self.score,
            self.snake.len()
        );

        match spawned {
            Ok(position) => {
                trace!("food respawned at {position}");
                TickOutcome::Ate
            }
            Err(error) => {
                info!("{error}");
                self.finish(EndReason::BoardFilled);
                TickOutcome::Ended(EndReason::BoardFilled)
            }
        }
    }

    /// Ends the current run from outside the tick loop.
    ///
    /// Returns false when no run is in progress.
    pub fn end_game(&mut self) -> bool {
        self.finish(EndReason::Forced)
    }

    fn finish(&mut self, reason: EndReason) -> bool {
        if self.status != GameStatus::Running {
            debug!("end requested while {:?}", self.status);
            return false;
        }

        // Show the last valid position instead of the head inside a wall.
        self.snake.move_backwards();
        self.status = GameStatus::Ended;
        self.end_reason = Some(reason);
        self.ticks.stop();
        info!("game over ({reason:?}), final score {}", self.score);
        true
    }

    /// Stops tick delivery if it is running, starts it otherwise.
    pub fn toggle_pause(&mut self) {
        if self.ticks.is_running() {
            self.ticks.stop();
            info!("paused");
        } else {
            self.ticks.start();
            info!("resumed");
        }
    }

    /// Forwards a direction request to the snake of a running game.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        let queued = self.snake.change_direction(direction);
        if !queued {
            debug!(
                "direction {direction:?} dropped (heading {:?}, {} queued)",
                self.snake.direction(),
                self.snake.queued_turns()
            );
        }
        queued
    }

    /// True while a run is in progress but ticks are held back.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Running && !self.ticks.is_running()
    }

    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.status == GameStatus::Ended
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.setup.grid
    }

    #[must_use]
    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }
}
