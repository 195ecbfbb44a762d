use std::collections::VecDeque;

use crate::error::GameError;
use crate::grid::{GridSize, Position};
use crate::input::Direction;

/// Mutable snake state and movement buffering behavior.
///
/// The body is stored head first. Movement does no bounds checking: a head
/// outside the grid is a valid transient state that the collision detector
/// reports.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    buffered_direction: Option<Direction>,
    previous_tail: Option<Position>,
}

impl Snake {
    /// Creates a snake facing right with its head at `start` and the rest of
    /// the body extending to the left.
    pub fn new(start: Position, length: usize, grid: GridSize) -> Result<Self, GameError> {
        if length == 0 {
            return Err(GameError::ZeroLength);
        }
        if !start.is_within_bounds(grid) {
            return Err(GameError::OutOfBounds {
                position: start,
                grid,
            });
        }
        // The tail ends up at x = start.x - (length - 1), which must stay >= 0.
        let fits = usize::try_from(start.x).is_ok_and(|x| length <= x + 1);
        if !fits {
            return Err(GameError::SnakeDoesNotFit { length, start });
        }

        let tail_direction = Direction::Right.opposite();
        let body = std::iter::successors(Some(start), |cell| Some(cell.step(tail_direction)))
            .take(length)
            .collect();

        Ok(Self::with_body(body, Direction::Right))
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Consecutive segments must be exactly one unit step apart. Overlaps
    /// further down the body are allowed so a self-collision can be set up.
    pub fn from_segments(
        segments: Vec<Position>,
        direction: Direction,
    ) -> Result<Self, GameError> {
        if segments.is_empty() {
            return Err(GameError::EmptyBody);
        }
        if let Some(index) = segments
            .windows(2)
            .position(|pair| pair[0].manhattan_distance(pair[1]) != 1)
        {
            return Err(GameError::DisjointBody {
                from: segments[index],
                to: segments[index + 1],
            });
        }

        Ok(Self::with_body(VecDeque::from(segments), direction))
    }

    fn with_body(body: VecDeque<Position>, direction: Direction) -> Self {
        Self {
            body,
            direction,
            pending_direction: None,
            buffered_direction: None,
            previous_tail: None,
        }
    }

    /// Commits the next queued direction and advances one cell.
    ///
    /// The removed tail is kept so the same tick can [`grow`](Self::grow) or
    /// [`move_backwards`](Self::move_backwards).
    pub fn move_forward(&mut self) {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
            self.pending_direction = self.buffered_direction.take();
        }

        let next_head = self.head().step(self.direction);
        self.body.push_front(next_head);
        self.previous_tail = self.body.pop_back();
    }

    /// Re-appends the tail removed by the last move.
    ///
    /// Returns `false` when there is no stored tail, i.e. no move happened
    /// since construction or the tail was already reused.
    pub fn grow(&mut self) -> bool {
        let Some(tail) = self.previous_tail.take() else {
            return false;
        };

        self.body.push_back(tail);
        true
    }

    /// Undoes the last move: restores the previous tail and drops the head.
    ///
    /// Only rewinds when the last move's tail is still available, so calling
    /// it twice, after [`grow`](Self::grow), or before any move is a no-op.
    pub fn move_backwards(&mut self) -> bool {
        let Some(tail) = self.previous_tail.take() else {
            return false;
        };

        self.body.push_back(tail);
        let _ = self.body.pop_front();
        true
    }

    /// Queues a direction change, two deep.
    ///
    /// Reversals of the committed direction are ignored. Returns whether the
    /// request was queued; a request with both slots full is dropped.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction.opposite() {
            return false;
        }

        if self.pending_direction.is_none() {
            self.pending_direction = Some(requested);
        } else if self.buffered_direction.is_none() {
            self.buffered_direction = Some(requested);
        } else {
            return false;
        }

        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // Every constructor rejects an empty body and moves keep the length.
        self.body[0]
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn buffered_direction(&self) -> Option<Direction> {
        self.buffered_direction
    }

    /// Number of queued direction changes (0..=2).
    #[must_use]
    pub fn queued_turns(&self) -> usize {
        usize::from(self.pending_direction.is_some()) + usize::from(self.buffered_direction.is_some())
    }

    /// Tail cell removed by the last move, if not yet reused.
    #[must_use]
    pub fn previous_tail(&self) -> Option<Position> {
        self.previous_tail
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
