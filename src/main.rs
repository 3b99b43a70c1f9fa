//! Recycle Tetris terminal runner.
//!
//! Fixed 16 ms cadence: each tick steps particles, advances gravity by the
//! level's drop interval, then polls achievements, level-ups and game-over.
//! Rendering goes through the framebuffer view and the diffing renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use recycle_tetris::achievements::AchievementBook;
use recycle_tetris::config::GameConfig;
use recycle_tetris::core::{drop_interval_ticks, GameSnapshot, GameState};
use recycle_tetris::input::{handle_key_event, should_quit, InputCommand};
use recycle_tetris::save::{SaveError, SaveStore, DEFAULT_SLOT};
use recycle_tetris::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};
use recycle_tetris::types::{GameAction, TICK_MS};

/// Slot written by F5 and read first by F9.
const QUICK_SLOT: &str = "quicksave";

/// How long toasts and status lines stay on screen.
const MESSAGE_TTL: Duration = Duration::from_secs(3);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let store = SaveStore::new(config.save_dir.clone());

    let mut book = AchievementBook::new();
    match store.load_achievements(&mut book) {
        Ok(n) if n > 0 => println!("[Save] {n} achievements unlocked so far"),
        Ok(_) => {}
        Err(err) => eprintln!("[Save] could not read achievements: {err}"),
    }
    let best_score = match store.statistics() {
        Ok(stats) => stats.best_score,
        Err(err) => {
            eprintln!("[Save] could not read statistics: {err}");
            0
        }
    };
    println!("[Game] seed {}, saves in {}", config.seed, store.dir().display());

    let mut session = Session::new(config, store, book, best_score);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.shutdown();
    result
}

/// Driver-side state around one `GameState`.
struct Session {
    config: GameConfig,
    store: SaveStore,
    book: AchievementBook,
    game: GameState,
    paused: bool,
    drop_counter: u32,
    started: Instant,
    /// The current run has been written to statistics.
    recorded: bool,
    best_score: u32,
    toast: Option<(String, Instant)>,
    status: Option<(String, Instant)>,
    /// Failures to report once the terminal is restored.
    errors: Vec<String>,
}

impl Session {
    fn new(config: GameConfig, store: SaveStore, book: AchievementBook, best_score: u32) -> Self {
        let game = GameState::new(config.seed);
        Self {
            config,
            store,
            book,
            game,
            paused: false,
            drop_counter: 0,
            started: Instant::now(),
            recorded: false,
            best_score,
            toast: None,
            status: None,
            errors: Vec::new(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some((text.into(), Instant::now()));
    }

    fn save_failed(&mut self, what: &str, err: SaveError) {
        self.set_status(format!("{what} failed: {err}"));
        self.errors.push(format!("{what} failed: {err}"));
    }

    /// Fresh timers for a new or loaded run.
    fn reset_run(&mut self) {
        self.paused = false;
        self.drop_counter = 0;
        self.started = Instant::now();
        self.recorded = self.game.game_over();
    }

    fn tick(&mut self) {
        self.game.update();

        if !self.paused && !self.game.game_over() {
            self.drop_counter += 1;
            if self.drop_counter >= drop_interval_ticks(self.game.level()) {
                self.drop_counter = 0;
                self.game.move_down();
            }
        }

        self.poll();
    }

    fn poll(&mut self) {
        if self.book.check(&self.game) > 0 {
            if let Some(achievement) = self.book.take_notification() {
                self.toast = Some((achievement.name.to_string(), Instant::now()));
            }
        }
        if let Some(level) = self.game.take_level_up() {
            self.set_status(format!("Level {level}"));
        }
        if self.game.game_over() && !self.recorded {
            self.recorded = true;
            match self.store.record_game(&self.game, self.started.elapsed()) {
                Ok(stats) => self.best_score = stats.best_score,
                Err(err) => self.save_failed("Recording the game", err),
            }
        }

        let now = Instant::now();
        for message in [&mut self.toast, &mut self.status] {
            if message.as_ref().is_some_and(|(_, at)| now.duration_since(*at) > MESSAGE_TTL) {
                *message = None;
            }
        }
    }

    fn handle(&mut self, command: InputCommand) {
        match command {
            InputCommand::Game(GameAction::Restart) => {
                if self.game.apply_action(GameAction::Restart) {
                    self.reset_run();
                }
            }
            InputCommand::Game(action) => {
                if !self.paused {
                    self.game.apply_action(action);
                }
            }
            InputCommand::TogglePause => {
                if !self.game.game_over() {
                    self.paused = !self.paused;
                }
            }
            InputCommand::SaveGame => match self.store.save_game(&self.game, QUICK_SLOT) {
                Ok(()) => self.set_status("Game saved"),
                Err(err) => self.save_failed("Save", err),
            },
            InputCommand::LoadGame => {
                let slot = if self.store.has_save(QUICK_SLOT) { QUICK_SLOT } else { DEFAULT_SLOT };
                match self.store.load_game(&mut self.game, slot) {
                    Ok(()) => {
                        self.reset_run();
                        self.set_status("Game loaded");
                    }
                    Err(err) => self.save_failed("Load", err),
                }
            }
        }
    }

    fn hud(&self) -> HudView<'_> {
        HudView {
            paused: self.paused,
            show_particles: self.config.particles,
            best_score: Some(self.best_score),
            toast: self.toast.as_ref().map(|(text, _)| text.as_str()),
            status: self.status.as_ref().map(|(text, _)| text.as_str()),
        }
    }

    /// Runs after the terminal is restored, so printing is safe.
    fn shutdown(&mut self) {
        for error in self.errors.drain(..) {
            eprintln!("[Save] {error}");
        }
        if self.config.autosave && !self.game.game_over() {
            match self.store.save_game(&self.game, DEFAULT_SLOT) {
                Ok(()) => println!("[Save] autosaved to slot {DEFAULT_SLOT:?}"),
                Err(err) => eprintln!("[Save] autosave failed: {err}"),
            }
        }
        if let Err(err) = self.store.save_achievements(&self.book) {
            eprintln!("[Save] could not write achievements: {err}");
        }
        println!(
            "[Game] final score {}, level {}, {} lines, {:.0}% achievements",
            self.game.score(),
            self.game.level(),
            self.game.lines_cleared(),
            self.book.completion_percentage()
        );
    }
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.game.snapshot_into(&mut snap);
        view.render_into(&snap, &session.hud(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        session.handle(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick();
        }
    }
}
