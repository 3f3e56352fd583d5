#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting small list indices to f32 for layout
    clippy::cast_precision_loss
)]

// A screen change requested during a dispatch is held as pending and applied
// when the next dispatch starts, so one screen handles and draws each frame.

use log::{debug, error, info};

use crate::achievements::{self, Achievement, DailyChallenge};
use crate::components::{Catalog, Position};
use crate::config::{GameMode, GameplayConfig, WidgetStyle};
use crate::game::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::input::InputEvent;
use crate::persistence::{HighScores, PlayerStats, ScoreStore, SessionResult};
use crate::render::{Button, RenderSurface, Tone};
use crate::round::{RoundEngine, RoundEvent, RoundSettings, RoundSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
    Leaderboard,
}

/// Whether the outer loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// When a round is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndCondition {
    MissLimit(u32),
    /// Seconds of play
    TimeLimit(f32),
    Never,
}

impl EndCondition {
    #[must_use]
    pub fn for_config(config: &GameplayConfig) -> Self {
        match config.mode {
            GameMode::Classic => EndCondition::MissLimit(config.miss_limit),
            GameMode::TimeAttack => EndCondition::TimeLimit(config.time_limit_secs),
            GameMode::Zen => EndCondition::Never,
        }
    }

    #[must_use]
    pub fn is_met(&self, engine: &RoundEngine) -> bool {
        match *self {
            EndCondition::MissLimit(limit) => crate::round::is_round_over(engine.misses(), limit),
            EndCondition::TimeLimit(secs) => engine.elapsed() >= secs,
            EndCondition::Never => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Start,
    Difficulty,
    Mode,
    Leaderboard,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 5] = [
        MenuOption::Start,
        MenuOption::Difficulty,
        MenuOption::Mode,
        MenuOption::Leaderboard,
        MenuOption::Quit,
    ];

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            MenuOption::Start => MenuOption::Difficulty,
            MenuOption::Difficulty => MenuOption::Mode,
            MenuOption::Mode => MenuOption::Leaderboard,
            MenuOption::Leaderboard => MenuOption::Quit,
            MenuOption::Quit => MenuOption::Start,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            MenuOption::Start => MenuOption::Quit,
            MenuOption::Difficulty => MenuOption::Start,
            MenuOption::Mode => MenuOption::Difficulty,
            MenuOption::Leaderboard => MenuOption::Mode,
            MenuOption::Quit => MenuOption::Leaderboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverOption {
    PlayAgain,
    Menu,
}

impl GameOverOption {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            GameOverOption::PlayAgain => GameOverOption::Menu,
            GameOverOption::Menu => GameOverOption::PlayAgain,
        }
    }
}

/// Something the app layer may want to react to with sound or effects.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    Round(RoundEvent),
    MenuMoved,
    MenuSelected,
    RoundStarted,
    RoundEnded { score: u32, rank: Option<usize> },
    AchievementUnlocked(Achievement),
}

/// What the game-over screen shows about the round that just ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverReport {
    pub summary: RoundSummary,
    pub rank: Option<usize>,
    pub unlocked: Vec<Achievement>,
    pub challenge: DailyChallenge,
    pub challenge_completed: bool,
}

pub struct ScreenMachine<S: ScoreStore> {
    config: GameplayConfig,
    button_style: WidgetStyle,
    screen: Screen,
    pending: Option<Screen>,
    engine: RoundEngine,
    end_condition: EndCondition,
    rng: fastrand::Rng,
    store: S,
    high_scores: HighScores,
    stats: PlayerStats,
    menu_selected: MenuOption,
    game_over_selected: GameOverOption,
    // Receptacle highlighted by the arrow keys while playing
    cursor: usize,
    report: Option<GameOverReport>,
    events: Vec<ScreenEvent>,
}

impl<S: ScoreStore> ScreenMachine<S> {
    /// Builds a machine sitting on the menu, loading high scores and stats from `store`.
    pub fn new(config: GameplayConfig, catalog: Catalog, button_style: WidgetStyle, store: S) -> Self {
        let mut rng = config.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let engine = RoundEngine::new(catalog, RoundSettings::from(&config), rng.fork());
        let high_scores = HighScores::new(store.load_high_scores());
        let stats = store.load_stats();
        debug!(
            "Loaded {} high scores and stats for {} games",
            high_scores.len(),
            stats.total_games
        );

        Self {
            end_condition: EndCondition::for_config(&config),
            config,
            button_style,
            screen: Screen::Menu,
            pending: None,
            engine,
            rng,
            store,
            high_scores,
            stats,
            menu_selected: MenuOption::Start,
            game_over_selected: GameOverOption::PlayAgain,
            cursor: 0,
            report: None,
            events: Vec::new(),
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Control {
        self.apply_pending();

        if event == InputEvent::Quit {
            info!("Quit requested from {:?}", self.screen);
            return Control::Quit;
        }

        match self.screen {
            Screen::Menu => self.menu_input(event),
            Screen::Playing => {
                self.playing_input(event);
                Control::Continue
            }
            Screen::GameOver => {
                self.game_over_input(event);
                Control::Continue
            }
            Screen::Leaderboard => {
                if matches!(event, InputEvent::Back | InputEvent::Confirm) {
                    self.request(Screen::Menu);
                }
                Control::Continue
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.apply_pending();

        if self.screen != Screen::Playing {
            return;
        }

        let round_events = self.engine.update(dt);
        self.events
            .extend(round_events.into_iter().map(ScreenEvent::Round));

        if self.end_condition.is_met(&self.engine) {
            debug!("Round over: {:?}", self.end_condition);
            self.request(Screen::GameOver);
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        match self.screen {
            Screen::Menu => self.render_menu(surface),
            Screen::Playing => self.render_playing(surface),
            Screen::GameOver => self.render_game_over(surface),
            Screen::Leaderboard => self.render_leaderboard(surface),
        }
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<ScreenEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn pending(&self) -> Option<Screen> {
        self.pending
    }

    #[must_use]
    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    #[must_use]
    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    #[must_use]
    pub fn end_condition(&self) -> EndCondition {
        self.end_condition
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    #[must_use]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn menu_selected(&self) -> MenuOption {
        self.menu_selected
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn request(&mut self, next: Screen) {
        debug!("Transition {:?} -> {next:?} queued", self.screen);
        self.pending = Some(next);
    }

    fn apply_pending(&mut self) {
        let Some(next) = self.pending.take() else {
            return;
        };
        let previous = self.screen;
        self.screen = next;
        info!("Screen {previous:?} -> {next:?}");

        match next {
            Screen::Playing => self.start_round(),
            Screen::GameOver if previous == Screen::Playing => self.finish_round(),
            _ => {}
        }
    }

    fn start_round(&mut self) {
        // Difficulty and mode are read here and stay fixed for the whole round
        let rng = self.rng.fork();
        self.engine.restart(RoundSettings::from(&self.config), rng);
        self.end_condition = EndCondition::for_config(&self.config);
        self.cursor = 0;
        self.report = None;
        self.game_over_selected = GameOverOption::PlayAgain;
        info!(
            "Round started: {} / {}",
            self.config.difficulty.label(),
            self.config.mode.label()
        );
        self.events.push(ScreenEvent::RoundStarted);
    }

    fn finish_round(&mut self) {
        let summary = self.engine.summary();
        let session = SessionResult::now(summary.score);
        let rank = self.high_scores.insert(session.final_score);

        self.stats.record_round(&summary);
        let unlocked = achievements::evaluate(&summary, &mut self.stats);
        let challenge = DailyChallenge::for_timestamp(session.timestamp);
        let challenge_completed = challenge.is_completed(&summary);

        info!(
            "Round ended with {} points (rank {rank:?}, combo {})",
            summary.score, summary.max_combo
        );

        if let Err(e) = self.store.save_high_scores(self.high_scores.as_slice()) {
            error!("Failed to save high scores: {e}");
        }
        if let Err(e) = self.store.save_stats(&self.stats) {
            error!("Failed to save stats: {e}");
        }

        self.events.push(ScreenEvent::RoundEnded {
            score: summary.score,
            rank,
        });
        for achievement in &unlocked {
            info!("Achievement unlocked: {}", achievement.name());
            self.events
                .push(ScreenEvent::AchievementUnlocked(*achievement));
        }

        self.report = Some(GameOverReport {
            summary,
            rank,
            unlocked,
            challenge,
            challenge_completed,
        });
    }

    fn menu_input(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Up => {
                self.menu_selected = self.menu_selected.prev();
                self.events.push(ScreenEvent::MenuMoved);
            }
            InputEvent::Down => {
                self.menu_selected = self.menu_selected.next();
                self.events.push(ScreenEvent::MenuMoved);
            }
            InputEvent::Left | InputEvent::Right => {
                let forward = event == InputEvent::Right;
                if self.cycle_setting(forward) {
                    self.events.push(ScreenEvent::MenuMoved);
                }
            }
            InputEvent::Confirm => {
                self.events.push(ScreenEvent::MenuSelected);
                match self.menu_selected {
                    MenuOption::Start => self.request(Screen::Playing),
                    MenuOption::Difficulty | MenuOption::Mode => {
                        self.cycle_setting(true);
                    }
                    MenuOption::Leaderboard => self.request(Screen::Leaderboard),
                    MenuOption::Quit => return Control::Quit,
                }
            }
            _ => {}
        }
        Control::Continue
    }

    // Steps the difficulty or mode under the cursor; false when the cursor is elsewhere
    fn cycle_setting(&mut self, forward: bool) -> bool {
        match self.menu_selected {
            MenuOption::Difficulty => {
                let current = self.config.difficulty;
                self.config.difficulty = if forward { current.next() } else { current.prev() };
                true
            }
            MenuOption::Mode => {
                let current = self.config.mode;
                self.config.mode = if forward { current.next() } else { current.prev() };
                true
            }
            _ => false,
        }
    }

    fn playing_input(&mut self, event: InputEvent) {
        let receptacle_count = self.engine.receptacles().len();
        let round_events = match event {
            InputEvent::Select(index) => {
                if index < receptacle_count {
                    self.cursor = index;
                }
                self.engine.select_receptacle(index)
            }
            InputEvent::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            InputEvent::Right => {
                if self.cursor + 1 < receptacle_count {
                    self.cursor += 1;
                }
                Vec::new()
            }
            InputEvent::Confirm => self.engine.select_receptacle(self.cursor),
            InputEvent::Back => {
                info!("Round abandoned");
                self.request(Screen::Menu);
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.events
            .extend(round_events.into_iter().map(ScreenEvent::Round));
    }

    fn game_over_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Left | InputEvent::Right | InputEvent::Up | InputEvent::Down => {
                self.game_over_selected = self.game_over_selected.toggle();
                self.events.push(ScreenEvent::MenuMoved);
            }
            InputEvent::Confirm => {
                self.events.push(ScreenEvent::MenuSelected);
                match self.game_over_selected {
                    GameOverOption::PlayAgain => self.request(Screen::Playing),
                    GameOverOption::Menu => self.request(Screen::Menu),
                }
            }
            InputEvent::Back => self.request(Screen::Menu),
            _ => {}
        }
    }

    fn render_menu(&self, surface: &mut dyn RenderSurface) {
        let center = PLAYFIELD_WIDTH / 2.0;
        surface.draw_text("FRUIT SORTER", Position::new(center, 90.0), Tone::Title);

        for (i, option) in MenuOption::ALL.iter().enumerate() {
            let label = match option {
                MenuOption::Start => "Start".to_string(),
                MenuOption::Difficulty => format!("Difficulty: {}", self.config.difficulty.label()),
                MenuOption::Mode => format!("Mode: {}", self.config.mode.label()),
                MenuOption::Leaderboard => "Leaderboard".to_string(),
                MenuOption::Quit => "Quit".to_string(),
            };
            let button = Button::new(
                label,
                Position::new(center, 200.0 + i as f32 * 60.0),
                self.button_style,
            )
            .selected(*option == self.menu_selected);
            surface.draw_button(&button);
        }

        let challenge = DailyChallenge::for_timestamp(SessionResult::now(0).timestamp);
        surface.draw_text(
            &format!("Daily challenge: {}", challenge.description()),
            Position::new(center, 520.0),
            Tone::Dim,
        );
        surface.draw_text(
            "↑↓ move   ←→ change   Enter select   q quit",
            Position::new(center, PLAYFIELD_HEIGHT - 30.0),
            Tone::Dim,
        );
    }

    fn render_playing(&self, surface: &mut dyn RenderSurface) {
        for (i, receptacle) in self.engine.receptacles().iter().enumerate() {
            surface.draw_receptacle(&receptacle.category, receptacle.position, i == self.cursor);
        }
        for item in self.engine.items() {
            surface.draw_item(&item.category, item.position, item.special);
        }

        let score = self.engine.score();
        surface.draw_hud_line(&format!("Score: {}", score.score), Tone::Highlight);
        surface.draw_hud_line(
            &format!("Combo: {} (x{})", score.combo_streak, score.multiplier()),
            if score.combo_streak > 0 { Tone::Highlight } else { Tone::Normal },
        );
        match self.end_condition {
            EndCondition::MissLimit(limit) => {
                let tone = if self.engine.misses() + 1 >= limit {
                    Tone::Warning
                } else {
                    Tone::Normal
                };
                surface.draw_hud_line(&format!("Misses: {}/{limit}", self.engine.misses()), tone);
            }
            EndCondition::TimeLimit(secs) => {
                let left = (secs - self.engine.elapsed()).max(0.0);
                let tone = if left < 10.0 { Tone::Warning } else { Tone::Normal };
                surface.draw_hud_line(&format!("Time: {left:.0}s"), tone);
            }
            EndCondition::Never => {
                surface.draw_hud_line(&format!("Misses: {}", self.engine.misses()), Tone::Dim);
            }
        }
        surface.draw_hud_line(
            &format!("Difficulty: {}", self.config.difficulty.label()),
            Tone::Dim,
        );
        for (kind, remaining) in self.engine.power_ups().active() {
            surface.draw_hud_line(&format!("{} {remaining:.1}s", kind.label()), Tone::Highlight);
        }
    }

    fn render_game_over(&self, surface: &mut dyn RenderSurface) {
        let center = PLAYFIELD_WIDTH / 2.0;
        surface.draw_text("GAME OVER", Position::new(center, 120.0), Tone::Title);

        if let Some(report) = &self.report {
            surface.draw_text(
                &format!(
                    "Final score: {}   Best combo: {}",
                    report.summary.score, report.summary.max_combo
                ),
                Position::new(center, 190.0),
                Tone::Normal,
            );
            if let Some(rank) = report.rank {
                surface.draw_text(
                    &format!("New high score! Rank #{rank}"),
                    Position::new(center, 230.0),
                    Tone::Highlight,
                );
            }
            for (i, achievement) in report.unlocked.iter().enumerate() {
                surface.draw_text(
                    &format!(
                        "Achievement unlocked: {} ({})",
                        achievement.name(),
                        achievement.description()
                    ),
                    Position::new(center, 270.0 + i as f32 * 30.0),
                    Tone::Highlight,
                );
            }
            if report.challenge_completed {
                surface.draw_text(
                    &format!("Daily challenge complete: {}", report.challenge.description()),
                    Position::new(center, 370.0),
                    Tone::Highlight,
                );
            }
        }

        let buttons = [
            (GameOverOption::PlayAgain, "Play Again", 440.0),
            (GameOverOption::Menu, "Menu", 500.0),
        ];
        for (option, label, y) in buttons {
            let button = Button::new(label, Position::new(center, y), self.button_style)
                .selected(option == self.game_over_selected);
            surface.draw_button(&button);
        }
    }

    fn render_leaderboard(&self, surface: &mut dyn RenderSurface) {
        let center = PLAYFIELD_WIDTH / 2.0;
        surface.draw_text("HIGH SCORES", Position::new(center, 60.0), Tone::Title);

        if self.high_scores.is_empty() {
            surface.draw_text("No scores yet", Position::new(center, 120.0), Tone::Dim);
        }
        for (i, score) in self.high_scores.as_slice().iter().enumerate() {
            surface.draw_text(
                &format!("{:>2}. {score:>6}", i + 1),
                Position::new(center, 120.0 + i as f32 * 30.0),
                if i == 0 { Tone::Highlight } else { Tone::Normal },
            );
        }

        let stats_lines = [
            format!("Games played: {}", self.stats.total_games),
            format!("Average score: {:.0}", self.stats.average_score()),
            format!(
                "Fruits matched: {}   Best combo: {}",
                self.stats.fruits_matched, self.stats.highest_combo
            ),
            format!("Achievements: {}/{}", self.stats.achievements.len(), Achievement::ALL.len()),
        ];
        for (i, line) in stats_lines.iter().enumerate() {
            surface.draw_text(line, Position::new(center, 430.0 + i as f32 * 30.0), Tone::Dim);
        }

        surface.draw_text(
            "Esc to return",
            Position::new(center, PLAYFIELD_HEIGHT - 20.0),
            Tone::Dim,
        );
    }
}
