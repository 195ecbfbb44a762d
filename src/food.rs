use rand::Rng;

use crate::error::GameError;
use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Random samples tried per grid cell before falling back to a full scan.
const SPAWN_ATTEMPTS_PER_CELL: usize = 4;

/// The single food cell currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Places food at `position`, which must be on the grid and off the snake.
    pub fn new(position: Position, grid: GridSize, snake: &Snake) -> Result<Self, GameError> {
        if !position.is_within_bounds(grid) {
            return Err(GameError::OutOfBounds { position, grid });
        }
        if snake.occupies(position) {
            return Err(GameError::FoodOnSnake { position });
        }

        Ok(Self { position })
    }

    #[must_use]
    pub fn position(self) -> Position {
        self.position
    }

    /// Moves the food to a uniformly random cell not occupied by the snake.
    ///
    /// On a full board the position is left unchanged and
    /// [`GameError::NoFreeCell`] is returned.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: GridSize,
        snake: &Snake,
    ) -> Result<Position, GameError> {
        self.position = spawn_position(rng, grid, snake)?;
        Ok(self.position)
    }
}

/// Picks a free position that is not currently occupied by the snake.
///
/// Rejection sampling is tried first; once the attempt budget is spent the
/// free cells are enumerated and one is drawn from that list.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Result<Position, GameError> {
    let attempts = grid.total_cells() * SPAWN_ATTEMPTS_PER_CELL;
    for _ in 0..attempts {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(grid.width)),
            y: rng.gen_range(0..i32::from(grid.height)),
        };
        if !snake.occupies(candidate) {
            return Ok(candidate);
        }
    }

    let free: Vec<Position> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
    if free.is_empty() {
        return Err(GameError::NoFreeCell);
    }

    Ok(free[rng.gen_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::error::GameError;
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Food, spawn_position};

    fn row_snake(length: i32) -> Snake {
        Snake::from_segments(
            (0..length).rev().map(|x| Position::new(x, 0)).collect(),
            Direction::Right,
        )
        .expect("segments are non-empty")
    }

    #[test]
    fn construction_validates_position() {
        let grid = GridSize::new(8, 6);
        let snake = row_snake(3);

        assert!(Food::new(Position::new(5, 5), grid, &snake).is_ok());
        assert_eq!(
            Food::new(Position::new(8, 0), grid, &snake).unwrap_err(),
            GameError::OutOfBounds {
                position: Position::new(8, 0),
                grid
            }
        );
        assert_eq!(
            Food::new(Position::new(1, 0), grid, &snake).unwrap_err(),
            GameError::FoodOnSnake {
                position: Position::new(1, 0)
            }
        );
    }

    #[test]
    fn nearly_full_board_finds_the_last_free_cell() {
        let grid = GridSize::new(4, 1);
        let snake = row_snake(3);
        let mut rng = StdRng::seed_from_u64(11);

        let position = spawn_position(&mut rng, grid, &snake).expect("one cell is free");

        assert_eq!(position, Position::new(3, 0));
    }

    #[test]
    fn full_board_reports_no_free_cell() {
        let grid = GridSize::new(3, 1);
        let snake = row_snake(3);
        let mut food = Food {
            position: Position::new(0, 0),
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(
            food.spawn(&mut rng, grid, &snake),
            Err(GameError::NoFreeCell)
        );
        assert_eq!(food.position(), Position::new(0, 0));
    }

    /// Body walked from `head` along `turns`, stopping at the grid edge.
    fn walked_snake(head: Position, turns: &[usize], grid: GridSize) -> Snake {
        let mut cells = vec![head];
        for turn in turns {
            let next = cells[cells.len() - 1].step(Direction::ALL[*turn]);
            if !next.is_within_bounds(grid) {
                break;
            }
            cells.push(next);
        }
        Snake::from_segments(cells, Direction::Right).expect("walk keeps cells adjacent")
    }

    proptest! {
        #[test]
        fn spawn_avoids_bent_bodies(
            seed in any::<u64>(),
            head_x in 0i32..8,
            head_y in 0i32..6,
            turns in proptest::collection::vec(0usize..4, 0..30),
        ) {
            let grid = GridSize::new(8, 6);
            let snake = walked_snake(Position::new(head_x, head_y), &turns, grid);
            let free = grid.cells().find(|cell| !snake.occupies(*cell)).expect("walk is shorter than the board");
            let mut food = Food::new(free, grid, &snake).expect("cell is free");
            let mut rng = StdRng::seed_from_u64(seed);

            for _ in 0..20 {
                let position = food.spawn(&mut rng, grid, &snake).expect("board has room");
                prop_assert!(!snake.occupies(position));
                prop_assert!(position.is_within_bounds(grid));
            }
        }

        #[test]
        fn spawn_never_lands_on_snake(seed in any::<u64>(), length in 1i32..8) {
            let grid = GridSize::new(8, 6);
            let snake = row_snake(length);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut food = Food::new(Position::new(7, 5), grid, &snake).expect("corner is free");

            for _ in 0..20 {
                let position = food.spawn(&mut rng, grid, &snake).expect("board has room");
                prop_assert!(!snake.occupies(position));
                prop_assert!(position.is_within_bounds(grid));
            }
        }
    }
}
