use log::{info, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::MAX_NAME_WIDTH;
use crate::game::{GameEngine, GameStatus, TickOutcome};
use crate::input::{GameInput, InputMode};
use crate::score::HighScoreStore;
use crate::tick::TickSource;

/// Which screen the player is looking at.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    /// Game-over popup with the name field.
    GameOver,
    Leaderboard,
}

/// Screen flow around one engine and the leaderboard.
#[derive(Debug)]
pub struct App<T> {
    engine: GameEngine<T>,
    store: HighScoreStore,
    screen: Screen,
    name: String,
    notice: Option<String>,
    saved_rank: Option<usize>,
    should_quit: bool,
}

impl<T: TickSource> App<T> {
    #[must_use]
    pub fn new(engine: GameEngine<T>, store: HighScoreStore) -> Self {
        Self {
            engine,
            store,
            screen: Screen::Start,
            name: String::new(),
            notice: None,
            saved_rank: None,
            should_quit: false,
        }
    }

    /// How key presses should be read on the current screen.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.screen {
            Screen::GameOver => InputMode::TextEntry,
            _ => InputMode::Play,
        }
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: GameInput) {
        if input == GameInput::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Start => match input {
                GameInput::Confirm | GameInput::Pause => self.start_run(),
                GameInput::Leaderboard => self.screen = Screen::Leaderboard,
                _ => {}
            },
            Screen::Playing => self.handle_play_input(input),
            Screen::GameOver => self.handle_game_over_input(input),
            Screen::Leaderboard => match input {
                GameInput::Confirm | GameInput::Pause | GameInput::Restart => self.start_run(),
                GameInput::Leaderboard => {
                    if let Some(screen) = self.leaderboard_return() {
                        self.screen = screen;
                    }
                }
                _ => {}
            },
        }
    }

    /// Screen the leaderboard goes back to, if any.
    ///
    /// An ended run whose score is not saved yet returns to the name field.
    #[must_use]
    pub fn leaderboard_return(&self) -> Option<Screen> {
        match self.engine.status() {
            GameStatus::NotStarted => Some(Screen::Start),
            GameStatus::Ended if self.saved_rank.is_none() => Some(Screen::GameOver),
            _ => None,
        }
    }

    /// Delivers one tick to the engine and follows a game over.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.update_game();
        if matches!(outcome, TickOutcome::Ended(_)) {
            self.enter_game_over();
        }
        outcome
    }

    fn handle_play_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                self.engine.change_direction(direction);
            }
            GameInput::Pause => self.engine.toggle_pause(),
            GameInput::ForceEnd => {
                if self.engine.end_game() {
                    self.enter_game_over();
                }
            }
            _ => {}
        }
    }

    fn handle_game_over_input(&mut self, input: GameInput) {
        match input {
            GameInput::Char(c) => self.push_name_char(c),
            GameInput::Backspace => {
                self.name.pop();
                self.notice = None;
            }
            GameInput::Confirm => self.save_score(),
            GameInput::Leaderboard => self.screen = Screen::Leaderboard,
            GameInput::Restart => self.start_run(),
            _ => {}
        }
    }

    fn push_name_char(&mut self, c: char) {
        if c.is_control() || c == ',' {
            return;
        }
        let width = self.name.width() + c.width().unwrap_or(0);
        if width > MAX_NAME_WIDTH {
            return;
        }

        self.name.push(c);
        self.notice = None;
    }

    fn save_score(&mut self) {
        if self.saved_rank.is_some() {
            self.screen = Screen::Leaderboard;
            return;
        }
        if self.name.trim().is_empty() {
            self.notice = Some("Please enter a name.".to_owned());
            return;
        }

        match self.store.save(i64::from(self.engine.score()), &self.name) {
            Ok(rank) => {
                self.saved_rank = Some(rank);
                self.notice = None;
                self.screen = Screen::Leaderboard;
            }
            Err(error) => {
                warn!("could not save score: {error}");
                self.notice = Some(format!("Could not save: {error}"));
            }
        }
    }

    fn start_run(&mut self) {
        self.engine.start_game();
        self.notice = None;
        self.saved_rank = None;
        self.screen = Screen::Playing;
    }

    fn enter_game_over(&mut self) {
        info!("run finished with score {}", self.engine.score());
        self.screen = Screen::GameOver;
        self.notice = None;
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<T> {
        &mut self.engine
    }

    #[must_use]
    pub fn store(&self) -> &HighScoreStore {
        &self.store
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Name typed on the game-over popup; kept between runs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Leaderboard row saved from the last game-over popup.
    #[must_use]
    pub fn saved_rank(&self) -> Option<usize> {
        self.saved_rank
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while ticks should be delivered.
    #[must_use]
    pub fn wants_ticks(&self) -> bool {
        self.screen == Screen::Playing && self.engine.status() == GameStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::GameSetup;
    use crate::game::GameEngine;
    use crate::input::{Direction, GameInput, InputMode};
    use crate::score::HighScoreStore;
    use crate::tick::{ManualTicks, TickSource};

    use super::{App, Screen};

    fn app(dir: &TempDir) -> App<ManualTicks> {
        let engine = GameEngine::new_with_seed(GameSetup::default(), ManualTicks::default(), 3)
            .expect("valid setup");
        let store = HighScoreStore::open(dir.path().join("scores.csv")).expect("open");
        App::new(engine, store)
    }

    fn type_name(app: &mut App<ManualTicks>, name: &str) {
        for c in name.chars() {
            app.handle_input(GameInput::Char(c));
        }
    }

    #[test]
    fn confirm_on_start_screen_begins_play() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);

        app.handle_input(GameInput::Confirm);

        assert_eq!(app.screen(), Screen::Playing);
        assert!(app.wants_ticks());
        assert!(app.engine().ticks().is_running());
    }

    #[test]
    fn force_end_opens_name_entry() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);

        app.handle_input(GameInput::ForceEnd);

        assert_eq!(app.screen(), Screen::GameOver);
        assert_eq!(app.input_mode(), InputMode::TextEntry);
        assert!(app.engine().has_ended());
    }

    #[test]
    fn wall_death_via_ticks_opens_game_over() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);
        app.handle_input(GameInput::Direction(Direction::Up));

        for _ in 0..8 {
            app.tick();
        }

        assert_eq!(app.screen(), Screen::GameOver);
        assert_eq!(app.engine().snake().head().y, 0);
    }

    #[test]
    fn blank_name_shows_notice_and_stays() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);
        app.handle_input(GameInput::ForceEnd);

        type_name(&mut app, "  ");
        app.handle_input(GameInput::Confirm);

        assert_eq!(app.screen(), Screen::GameOver);
        assert_eq!(app.notice(), Some("Please enter a name."));
        assert!(app.store().is_empty());
    }

    #[test]
    fn saving_a_name_shows_leaderboard() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);
        app.handle_input(GameInput::ForceEnd);

        type_name(&mut app, "Alicx");
        app.handle_input(GameInput::Backspace);
        type_name(&mut app, "e");
        app.handle_input(GameInput::Confirm);

        assert_eq!(app.screen(), Screen::Leaderboard);
        assert_eq!(app.saved_rank(), Some(0));
        assert_eq!(app.store().entries()[0].name, "Alice");
    }

    #[test]
    fn name_is_capped_by_display_width() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);
        app.handle_input(GameInput::ForceEnd);

        type_name(&mut app, &"蛇".repeat(12));

        assert_eq!(app.name().chars().count(), 8);
    }

    #[test]
    fn leaderboard_confirm_restarts() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);
        app.tick();
        app.handle_input(GameInput::ForceEnd);
        app.handle_input(GameInput::Leaderboard);

        app.handle_input(GameInput::Confirm);

        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.engine().score(), 0);
        assert_eq!(app.engine().tick_count(), 0);
    }

    #[test]
    fn unsaved_score_can_still_be_saved_after_viewing_leaderboard() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.handle_input(GameInput::Confirm);
        app.handle_input(GameInput::ForceEnd);
        type_name(&mut app, "Ida");

        app.handle_input(GameInput::Leaderboard);
        assert_eq!(app.screen(), Screen::Leaderboard);
        assert_eq!(app.leaderboard_return(), Some(Screen::GameOver));

        app.handle_input(GameInput::Leaderboard);
        assert_eq!(app.screen(), Screen::GameOver);
        assert_eq!(app.name(), "Ida");

        app.handle_input(GameInput::Confirm);
        assert_eq!(app.screen(), Screen::Leaderboard);
        assert_eq!(app.store().entries()[0].name, "Ida");
        assert_eq!(app.leaderboard_return(), None);

        app.handle_input(GameInput::Leaderboard);
        assert_eq!(app.screen(), Screen::Leaderboard);
    }

    #[test]
    fn leaderboard_from_start_screen_goes_back() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);

        app.handle_input(GameInput::Leaderboard);
        app.handle_input(GameInput::Leaderboard);

        assert_eq!(app.screen(), Screen::Start);
    }

    #[test]
    fn quit_works_from_any_screen() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);

        app.handle_input(GameInput::Quit);

        assert!(app.should_quit());
    }
}
