use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{MAX_NAME_WIDTH, Theme};
use crate::game::EndReason;
use crate::score::HighScoreEntry;

/// Rows shown on the leaderboard popup.
const LEADERBOARD_ROWS: usize = 10;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, best_score: u32, theme: &Theme) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("Best score: {best_score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[L] Leaderboard"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD move, P pause, R end run"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[R] End run"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Everything the game-over popup shows.
#[derive(Debug, Clone, Copy)]
pub struct GameOverView<'a> {
    pub score: u32,
    pub best_score: u32,
    pub end_reason: Option<EndReason>,
    pub name: &'a str,
    pub notice: Option<&'a str>,
}

/// Draws the game-over screen with the name field.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    view: GameOverView<'_>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 90, 80);
    frame.render_widget(Clear, popup);

    let is_new_best = view.score > view.best_score;
    let lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Score: {}", view.score)),
        Line::from(end_reason_text(view.end_reason)),
        Line::from(if is_new_best { "New best score!" } else { "" }),
        Line::from(""),
        Line::from(format!("Name: {}", name_field(view.name))),
        Line::from(Span::styled(
            view.notice.unwrap_or("").to_owned(),
            Style::default().fg(theme.warning),
        )),
        Line::from(""),
        Line::from("[Enter] Save score"),
        Line::from("[Tab] Leaderboard"),
        Line::from("[Ctrl+R] Play again"),
        Line::from("[Esc] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the top leaderboard entries, highlighting `highlight` when set.
pub fn render_leaderboard(
    frame: &mut Frame<'_>,
    area: Rect,
    entries: &[HighScoreEntry],
    highlight: Option<usize>,
    can_go_back: bool,
    theme: &Theme,
) {
    let popup = centered_popup(area, 96, 90);
    frame.render_widget(Clear, popup);

    let [table_area, footer_row] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(popup);

    let block = Block::bordered().title(" leaderboard ");
    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), Line::from("No scores yet")])
                .alignment(Alignment::Center)
                .block(block),
            table_area,
        );
    } else {
        let rows = entries
            .iter()
            .enumerate()
            .take(LEADERBOARD_ROWS)
            .map(|(rank, entry)| {
                let row = Row::new(vec![
                    Cell::from(format!("{}.", rank + 1)),
                    Cell::from(truncate_to_width(&entry.name, MAX_NAME_WIDTH)),
                    Cell::from(entry.score.to_string()),
                    Cell::from(entry.date.format("%Y-%m-%d").to_string()),
                ]);
                if Some(rank) == highlight {
                    row.style(
                        Style::default()
                            .fg(theme.warning)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    row
                }
            });

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(5),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["#", "Name", "Score", "Date"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block);
        frame.render_widget(table, table_area);
    }

    frame.render_widget(
        Paragraph::new(Line::from(leaderboard_footer(can_go_back)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

fn leaderboard_footer(can_go_back: bool) -> &'static str {
    if can_go_back {
        "[Enter] Play  [Tab] Back  [Q] Quit"
    } else {
        "[Enter] Play again  [Q] Quit"
    }
}

fn end_reason_text(reason: Option<EndReason>) -> &'static str {
    match reason {
        Some(EndReason::WallCollision) => "Cause: hit the wall",
        Some(EndReason::SelfCollision) => "Cause: bit yourself",
        Some(EndReason::Forced) => "Cause: ended by player",
        Some(EndReason::BoardFilled) => "The board is full!",
        None => "",
    }
}

/// Pads the typed name with underscores up to the field width.
fn name_field(name: &str) -> String {
    let padding = MAX_NAME_WIDTH.saturating_sub(name.width());
    format!("{name}{}", "_".repeat(padding))
}

/// Cuts `text` so it occupies at most `max_width` terminal columns.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max_width
        })
        .collect()
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
