use ratatui::style::Color;
use ratatui::symbols::border;

use crate::grid::{GridSize, Position};

/// Board width in cells.
pub const NUM_COLS: u16 = 17;

/// Board height in cells.
pub const NUM_ROWS: u16 = 15;

/// Fixed gameplay tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 200;

/// Input poll timeout, which is also the redraw cadence.
pub const FRAME_INTERVAL_MS: u64 = 16;

pub const SNAKE_INITIAL_LENGTH: usize = 3;
pub const SNAKE_INITIAL_POSITION: Position = Position::new(3, 7);
pub const FOOD_INITIAL_POSITION: Position = Position::new(12, 7);

/// Maximum display width of a leaderboard name, in terminal columns.
pub const MAX_NAME_WIDTH: usize = 16;

/// Data directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "terminal-snake";
pub const SCORE_FILE_NAME: &str = "highscores.csv";
pub const LOG_FILE_NAME: &str = "terminal-snake.log";

/// Starting layout of a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSetup {
    pub grid: GridSize,
    pub snake_start: Position,
    pub snake_length: usize,
    pub food_start: Position,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            grid: GridSize::new(NUM_COLS, NUM_ROWS),
            snake_start: SNAKE_INITIAL_POSITION,
            snake_length: SNAKE_INITIAL_LENGTH,
            food_start: FOOD_INITIAL_POSITION,
        }
    }
}

/// Colours for every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    /// Checkerboard colours for even and odd cells.
    pub field_light: Color,
    pub field_dark: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_bg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
    pub warning: Color,
}

pub const THEME_MEADOW: Theme = Theme {
    snake_head: Color::Rgb(30, 60, 180),
    snake_body: Color::Rgb(65, 105, 225),
    food: Color::Rgb(220, 40, 40),
    field_light: Color::Rgb(170, 215, 81),
    field_dark: Color::Rgb(162, 209, 73),
    border_fg: Color::Rgb(87, 138, 52),
    border_bg: Color::Black,
    hud_bg: Color::Rgb(74, 117, 44),
    hud_value: Color::White,
    hud_muted: Color::Rgb(200, 220, 180),
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
    warning: Color::Yellow,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each logical cell is drawn two columns wide so it looks square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_CELL: &str = "  ";
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
