use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;

/// Values displayed on the HUD row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HudInfo {
    pub score: u32,
    pub length: usize,
    pub best_score: u32,
    pub paused: bool,
}

/// Renders the one-line HUD under `area` and returns the play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo, theme: &Theme) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let hud_style = Style::default().bg(theme.hud_bg).fg(theme.hud_muted);
    frame.render_widget(Paragraph::new("").style(hud_style), hud_area);

    let [status_area, values_area] =
        Layout::horizontal([Constraint::Length(10), Constraint::Min(0)]).areas(hud_area);

    if info.paused {
        frame.render_widget(
            Paragraph::new(Line::from(" PAUSED")).style(
                hud_style
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            status_area,
        );
    }

    frame.render_widget(
        Paragraph::new(info_line(info, theme))
            .alignment(Alignment::Right)
            .style(hud_style),
        values_area,
    );

    play_area
}

fn info_line(info: HudInfo, theme: &Theme) -> Line<'static> {
    let value_style = Style::default()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);
    let best = info.best_score.max(info.score);
    let best_style = if info.score > info.best_score {
        value_style.fg(theme.warning)
    } else {
        value_style
    };

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(info.score.to_string(), value_style),
        Span::raw(" │ Length: "),
        Span::styled(info.length.to_string(), value_style),
        Span::raw(" │ Best: "),
        Span::styled(best.to_string(), best_style),
        Span::raw(" "),
    ])
}

#[cfg(test)]
mod tests {
    use crate::config::THEME_MEADOW;

    use super::{HudInfo, info_line};

    fn text(info: HudInfo) -> String {
        info_line(info, &THEME_MEADOW)
            .spans
            .iter()
            .map(|span| span.content.to_string())
            .collect()
    }

    #[test]
    fn hud_shows_score_length_and_best() {
        let line = text(HudInfo {
            score: 4,
            length: 7,
            best_score: 12,
            paused: false,
        });

        assert_eq!(line, "Score: 4 │ Length: 7 │ Best: 12 ");
    }

    #[test]
    fn running_score_above_best_is_shown_as_best() {
        let line = text(HudInfo {
            score: 15,
            length: 18,
            best_score: 12,
            paused: false,
        });

        assert!(line.ends_with("Best: 15 "));
    }
}
