//! Game state module - the session a host drives
//!
//! Ties together the grid, the piece queue, the active piece and scoring.
//! The host owns timing: it calls [`GameState::tick`] every
//! [`GameState::tick_interval_ms`] and forwards player input through
//! [`GameState::apply_action`]. Nothing here sleeps, spawns or calls back.

use crate::active::ActivePiece;
use crate::config::GameConfig;
use crate::error::CoreError;
use crate::grid::Grid;
use crate::pieces::PieceInstance;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_accelerated_tick_score, calculate_rows_score, get_tick_interval_ms};
use crate::types::{GameAction, LockEvent, Position, RotationKind, MINIMUM_TICK_MS};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    queue: PieceQueue,
    active: Option<ActivePiece>,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    pieces_spawned: u32,
    score: u32,
    /// Best score of any finished game in this session.
    high_score: u32,
    /// The finished game beat the previous high score.
    new_high_score: bool,
    rows_cleared: u32,
    accelerating: bool,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a game. Fails only on malformed configuration.
    pub fn new(config: GameConfig) -> Result<Self, CoreError> {
        let grid = Grid::new(config.width, config.height)?;
        if config.catalog.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        let queue = PieceQueue::new(&config.catalog, config.low_water_mark, config.seed);

        Ok(Self {
            config,
            grid,
            queue,
            active: None,
            last_event: None,
            episode_id: 0,
            pieces_spawned: 0,
            score: 0,
            high_score: 0,
            new_high_score: false,
            rows_cleared: 0,
            accelerating: false,
            paused: false,
            game_over: false,
            started: false,
        })
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!(
            "game started ({}x{}, episode {})",
            self.grid.width(),
            self.grid.height(),
            self.episode_id
        );
        self.dispatch_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn accelerating(&self) -> bool {
        self.accelerating
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the running score beats every finished game.
    pub fn is_high_score(&self) -> bool {
        self.score > self.high_score
    }

    /// Whether the game that just ended set a new high score.
    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// The piece that will spawn next.
    pub fn next_piece(&self) -> Option<&PieceInstance> {
        self.queue.peek()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Milliseconds the host should wait before the next [`Self::tick`].
    pub fn tick_interval_ms(&self) -> u32 {
        if self.accelerating {
            MINIMUM_TICK_MS
        } else {
            get_tick_interval_ms(self.score)
        }
    }

    /// Pop the next piece and spawn it centered on the spawn point.
    ///
    /// Centering uses the template's unrotated size, so a quarter-turned
    /// instance sits where its template would before the turn.
    /// Returns false, ending the game, if the piece cannot be placed.
    fn dispatch_next(&mut self) -> bool {
        let piece = self.queue.pop();
        let size = piece.template().size();
        let anchor = self.grid.spawn_point() - Position::new(size.x / 2, size.y / 2);

        match ActivePiece::spawn(&mut self.grid, piece.mask(), piece.color(), anchor) {
            Some(active) => {
                self.active = Some(active);
                self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
                true
            }
            None => {
                log::debug!("cannot place {} at {:?}", piece.template().name(), anchor);
                self.end_game();
                false
            }
        }
    }

    fn end_game(&mut self) {
        self.game_over = true;
        self.active = None;
        self.accelerating = false;
        self.new_high_score = self.score > self.high_score;
        if self.new_high_score {
            self.high_score = self.score;
        }
        log::info!(
            "game over: score {}, rows {}, pieces {}",
            self.score,
            self.rows_cleared,
            self.pieces_spawned
        );
    }

    /// Lock the active piece, score its rows and dispatch the next one.
    ///
    /// A piece that settles with cells still above the grid ends the game.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let locked_out = piece.extends_above();
        let rows = piece.lock(&mut self.grid) as u32;
        let points = calculate_rows_score(rows);
        self.rows_cleared += rows;
        self.score = self.score.saturating_add(points);

        if locked_out {
            self.end_game();
        } else {
            self.dispatch_next();
        }

        self.last_event = Some(LockEvent {
            rows_cleared: rows,
            points,
            game_over: self.game_over,
        });
    }

    /// Apply gravity once. Returns whether the game advanced.
    fn step(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.move_down(&mut self.grid) {
            self.lock_active();
        }
        true
    }

    /// Main game tick: move the piece down one row, locking it if it landed.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }

        let advanced = self.step();
        if advanced && self.accelerating && !self.game_over {
            self.score = self
                .score
                .saturating_add(calculate_accelerated_tick_score());
        }
        advanced
    }

    /// Start a fresh game, keeping the high score and advancing the episode.
    pub fn restart(&mut self) {
        let seed = self.queue.seed();
        self.grid.reset();
        self.queue = PieceQueue::new(&self.config.catalog, self.config.low_water_mark, seed);
        self.active = None;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.pieces_spawned = 0;
        self.score = 0;
        self.new_high_score = false;
        self.rows_cleared = 0;
        self.accelerating = false;
        self.paused = false;
        self.game_over = false;
        self.started = false;
        log::info!("restarting (episode {})", self.episode_id);
        self.start();
    }

    fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    fn with_active(&mut self, f: impl FnOnce(&mut ActivePiece, &mut Grid) -> bool) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(active) => f(active, &mut self.grid),
            None => false,
        }
    }

    /// Apply a game action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.with_active(|p, g| p.move_left(g)),
            GameAction::MoveRight => self.with_active(|p, g| p.move_right(g)),
            GameAction::RotateLeft => self.with_active(|p, g| p.rotate(g, RotationKind::Left)),
            GameAction::RotateRight => self.with_active(|p, g| p.rotate(g, RotationKind::Right)),
            GameAction::RotateTwice => self.with_active(|p, g| p.rotate(g, RotationKind::Twice)),
            GameAction::Accelerate => {
                if self.game_over {
                    // Pressing down on the game-over screen starts a new game.
                    self.restart();
                    return true;
                }
                if !self.playable() || self.accelerating {
                    return false;
                }
                self.accelerating = true;
                self.step();
                true
            }
            GameAction::Decelerate => {
                let was = self.accelerating;
                self.accelerating = false;
                was
            }
            GameAction::Pause => {
                if !self.started || self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}
