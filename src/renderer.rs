use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::app::{App, Screen};
use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_CELL, GLYPH_FOOD, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, THEME_MEADOW, Theme,
};
use crate::game::GameEngine;
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::tick::TickSource;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    GameOverView, render_game_over_menu, render_leaderboard, render_pause_menu, render_start_menu,
};

/// Renders the full frame from immutable application state.
pub fn render<T: TickSource>(frame: &mut Frame<'_>, app: &App<T>) {
    let theme = &THEME_MEADOW;
    let engine = app.engine();
    let best_score = app.store().best_score();
    let area = frame.area();

    let play_area = render_hud(
        frame,
        area,
        HudInfo {
            score: engine.score(),
            length: engine.snake().len(),
            best_score,
            paused: engine.is_paused(),
        },
        theme,
    );

    let board_area = centered_board(play_area, engine.grid());
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_field(frame, inner, engine.grid(), theme);
    render_food(frame, inner, engine, theme);
    render_snake(frame, inner, engine, theme);

    match app.screen() {
        Screen::Start => render_start_menu(frame, play_area, best_score, theme),
        Screen::Playing if engine.is_paused() => render_pause_menu(frame, play_area),
        Screen::Playing => {}
        Screen::GameOver => render_game_over_menu(
            frame,
            play_area,
            GameOverView {
                score: engine.score(),
                best_score,
                end_reason: engine.end_reason(),
                name: app.name(),
                notice: app.notice(),
            },
            theme,
        ),
        Screen::Leaderboard => render_leaderboard(
            frame,
            play_area,
            app.store().entries(),
            app.saved_rank(),
            app.leaderboard_return().is_some(),
            theme,
        ),
    }
}

/// Board rectangle (border included) centered in `area`, clipped to fit.
fn centered_board(area: Rect, grid: GridSize) -> Rect {
    let width = (grid.width.saturating_mul(CELL_WIDTH).saturating_add(2)).min(area.width);
    let height = (grid.height.saturating_add(2)).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_field(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for cell in grid.cells() {
        let Some((x, y)) = logical_to_terminal(inner, grid, cell) else {
            continue;
        };
        let style = Style::new().bg(field_color(cell, theme));
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn render_food<T: TickSource>(
    frame: &mut Frame<'_>,
    inner: Rect,
    engine: &GameEngine<T>,
    theme: &Theme,
) {
    let position = engine.food().position();
    let Some((x, y)) = logical_to_terminal(inner, engine.grid(), position) else {
        return;
    };

    let style = Style::new()
        .fg(theme.food)
        .bg(field_color(position, theme));
    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, style);
}

fn render_snake<T: TickSource>(
    frame: &mut Frame<'_>,
    inner: Rect,
    engine: &GameEngine<T>,
    theme: &Theme,
) {
    let snake = engine.snake();
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when cells overlap on the death frame.
    for segment in snake.segments().skip(1).rev() {
        if let Some((x, y)) = logical_to_terminal(inner, engine.grid(), *segment) {
            buffer.set_string(x, y, GLYPH_CELL, Style::new().bg(theme.snake_body));
        }
    }

    if let Some((x, y)) = logical_to_terminal(inner, engine.grid(), snake.head()) {
        let style = Style::new()
            .fg(Color::White)
            .bg(theme.snake_head)
            .add_modifier(Modifier::BOLD);
        buffer.set_string(x, y, format!("{} ", head_glyph(snake.direction())), style);
    }
}

fn field_color(position: Position, theme: &Theme) -> Color {
    if (position.x + position.y) % 2 == 0 {
        theme.field_light
    } else {
        theme.field_dark
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
