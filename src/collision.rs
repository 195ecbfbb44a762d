use crate::food::Food;
use crate::grid::GridSize;
use crate::snake::Snake;

/// Read-only view over one tick's snake and food used to answer collision
/// queries. Holds borrows only; every check is side-effect free.
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector<'a> {
    snake: &'a Snake,
    food: &'a Food,
    grid: GridSize,
}

impl<'a> CollisionDetector<'a> {
    #[must_use]
    pub fn new(snake: &'a Snake, food: &'a Food, grid: GridSize) -> Self {
        Self { snake, food, grid }
    }

    /// True when the head has left the grid on any side.
    #[must_use]
    pub fn check_wall_collision(&self) -> bool {
        !self.snake.head().is_within_bounds(self.grid)
    }

    /// True when the head sits on the food.
    #[must_use]
    pub fn check_food_collision(&self) -> bool {
        self.snake.head() == self.food.position()
    }

    /// True when the head shares a cell with any other body segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        self.snake.head_overlaps_body()
    }
}
