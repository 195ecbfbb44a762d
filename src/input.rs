use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Unit offsets indexed by `Direction as usize`.
const DIRECTION_DELTAS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` unit step for this direction. Screen y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        DIRECTION_DELTAS[self as usize]
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    /// Ends the running game immediately.
    ForceEnd,
    Confirm,
    Leaderboard,
    Restart,
    Char(char),
    Backspace,
    Quit,
}

/// How key presses should be interpreted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputMode {
    /// Movement and single-key commands.
    Play,
    /// Printable keys are text for the name field.
    TextEntry,
}

/// Translates one crossterm key event into a game input.
#[must_use]
pub fn translate_key(key: KeyEvent, mode: InputMode) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return Some(GameInput::Quit);
    }

    match mode {
        InputMode::Play => translate_play_key(key.code),
        InputMode::TextEntry => translate_text_key(key.code, ctrl),
    }
}

fn translate_play_key(code: KeyCode) -> Option<GameInput> {
    let input = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => GameInput::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::ForceEnd,
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Tab => GameInput::Leaderboard,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

fn translate_text_key(code: KeyCode, ctrl: bool) -> Option<GameInput> {
    let input = match code {
        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => GameInput::Restart,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => GameInput::Char(c),
        KeyCode::Backspace => GameInput::Backspace,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Tab => GameInput::Leaderboard,
        KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for key events.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Waits up to the poll timeout for one input event.
    pub fn poll_input(&mut self, mode: InputMode) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(translate_key(key, mode)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, GameInput, InputMode, translate_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            translate_key(press(KeyCode::Up), InputMode::Play),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('a')), InputMode::Play),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('D')), InputMode::Play),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn r_forces_end_while_playing() {
        assert_eq!(
            translate_key(press(KeyCode::Char('r')), InputMode::Play),
            Some(GameInput::ForceEnd)
        );
    }

    #[test]
    fn text_entry_keeps_letters_as_text() {
        assert_eq!(
            translate_key(press(KeyCode::Char('r')), InputMode::TextEntry),
            Some(GameInput::Char('r'))
        );
        assert_eq!(
            translate_key(
                KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
                InputMode::TextEntry
            ),
            Some(GameInput::Restart)
        );
        assert_eq!(
            translate_key(press(KeyCode::Backspace), InputMode::TextEntry),
            Some(GameInput::Backspace)
        );
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(translate_key(key, InputMode::Play), Some(GameInput::Quit));
        assert_eq!(translate_key(key, InputMode::TextEntry), Some(GameInput::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(translate_key(key, InputMode::Play), None);
    }
}
