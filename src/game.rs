//! Core game state and logic

use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::collision::{clamp_into_bounds, would_collide};
use crate::piece::Piece;
use crate::random::{RandomSource, SeededRandom};
use crate::tetromino::{Color, Point, Shape, SHAPE_COUNT};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Default fall speed in ticks per second
pub const DEFAULT_SPEED: u32 = 2;

/// Smallest board side that holds every shape in every orientation
pub const MIN_BOARD_SIDE: usize = 4;
/// Largest board side; keeps the cell arena small and the drawn board inside a terminal
pub const MAX_BOARD_SIDE: usize = 256;

/// Spawn row, above the visible board. Clamping pulls the piece onto it.
const SPAWN_Y: i32 = -10;

/// Whether a piece is currently in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoPieceActive,
    PieceFalling,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCcw,
    /// Handled by the driver loop, ignored by the game
    Quit,
}

/// What a gravity tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active piece
    Idle,
    /// The piece moved down one row
    Fell,
    /// The piece was locked and a new one spawned
    Locked { rows_cleared: usize },
}

/// Board size and speed for a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Gravity ticks per second
    pub speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            speed: DEFAULT_SPEED,
        }
    }
}

impl GameConfig {
    /// Replace unusable values with defaults, logging each replacement
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let mut config = self;

        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&config.width) {
            warn!(width = config.width, "board width out of range, using default");
            config.width = defaults.width;
        }
        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&config.height) {
            warn!(height = config.height, "board height out of range, using default");
            config.height = defaults.height;
        }
        if config.speed == 0 {
            warn!("speed must be at least 1, using default");
            config.speed = defaults.speed;
        }
        config
    }
}

/// The main game struct
pub struct Game {
    config: GameConfig,
    /// Locked blocks
    board: Board,
    /// Current falling piece
    current_piece: Option<Piece>,
    /// Gravity ticks per second
    speed: u32,
    /// Rows cleared this session
    score: u64,
    pieces_locked: u64,
    rng: Box<dyn RandomSource>,
}

impl Game {
    /// Create a new game seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_random(config, SeededRandom::from_entropy())
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_random(config, SeededRandom::with_seed(seed))
    }

    /// Create a new game drawing pieces and colors from `rng`.
    /// Out-of-range config values fall back to defaults.
    pub fn with_random(config: GameConfig, rng: impl RandomSource + 'static) -> Self {
        let config = config.validated();
        let mut game = Self {
            config,
            board: Board::new(config.width, config.height),
            current_piece: None,
            speed: config.speed,
            score: 0,
            pieces_locked: 0,
            rng: Box::new(rng),
        };
        game.reset();
        game
    }

    /// Start over: empty board, zero score, fresh piece
    pub fn reset(&mut self) {
        info!(
            width = self.config.width,
            height = self.config.height,
            speed = self.config.speed,
            "resetting game"
        );
        self.board.reset();
        self.current_piece = None;
        self.score = 0;
        self.pieces_locked = 0;
        self.speed = self.config.speed;
        self.spawn_piece();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.current_piece.is_some() {
            Phase::PieceFalling
        } else {
            Phase::NoPieceActive
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Time between gravity ticks
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed))
    }

    /// Absolute cells and color of the active piece, for drawing
    pub fn active_cells(&self) -> Option<([Point; 4], Color)> {
        self.current_piece
            .as_ref()
            .map(|piece| (piece.cells(self.board.origin()), piece.color))
    }

    /// Check if the active piece covers any locked block.
    /// A piece gets there by spawning onto a packed stack or rotating into it.
    pub fn overlaps_locked(&self) -> bool {
        would_collide(&self.board, self.current_piece.as_ref(), 0, 0)
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => {
                self.move_left();
            }
            Action::MoveRight => {
                self.move_right();
            }
            Action::SoftDrop => {
                self.soft_drop();
            }
            Action::RotateCcw => self.rotate(),
            Action::Quit => {}
        }
    }

    /// Replace the active piece with a random one at the top center
    pub fn spawn_piece(&mut self) {
        let shape = Shape::all()[self.rng.next_in_range(SHAPE_COUNT)];
        let color = Color::PALETTE[self.rng.next_in_range(Color::PALETTE.len())];
        let origin = Point::new(self.board.width() as i32 / 2, SPAWN_Y);

        let mut piece = Piece::new(shape, color, origin);
        clamp_into_bounds(&self.board, &mut piece);
        debug!(?shape, ?color, x = piece.origin.x, y = piece.origin.y, "spawned piece");
        self.current_piece = Some(piece);
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate counter-clockwise and pull the piece back inside the edges.
    ///
    /// Locked blocks are not consulted: a piece may rotate into them.
    pub fn rotate(&mut self) {
        if let Some(piece) = &mut self.current_piece {
            piece.rotate_ccw();
            clamp_into_bounds(&self.board, piece);
        }
    }

    /// Advance gravity by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.current_piece.is_none() {
            return TickOutcome::Idle;
        }

        if would_collide(&self.board, self.current_piece.as_ref(), 0, 1) {
            let rows_cleared = self.lock_piece();
            self.spawn_piece();
            TickOutcome::Locked { rows_cleared }
        } else {
            self.try_move(0, 1);
            TickOutcome::Fell
        }
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = &mut self.current_piece else {
            return false;
        };

        if would_collide(&self.board, Some(&*piece), dx, dy) {
            trace!(dx, dy, "move rejected");
            return false;
        }
        piece.translate(dx, dy);
        true
    }

    /// Write the active piece into the board and clear any rows it completed.
    /// Returns the number of rows cleared.
    fn lock_piece(&mut self) -> usize {
        let Some(piece) = self.current_piece.take() else {
            return 0;
        };

        let cells = piece.cells(self.board.origin());
        for cell in &cells {
            self.board.set_cell(cell.x, cell.y, piece.color);
        }

        // A piece touches at most 4 rows
        let mut full_rows = [0usize; 4];
        let mut count = 0;
        for cell in &cells {
            let y = cell.y as usize;
            if self.board.is_row_full(y) && !full_rows[..count].contains(&y) {
                full_rows[count] = y;
                count += 1;
            }
        }

        let cleared = self.board.clear_rows(&mut full_rows[..count]);
        self.pieces_locked += 1;
        self.score += cleared as u64;

        debug!(
            shape = ?piece.shape,
            x = piece.origin.x,
            y = piece.origin.y,
            rows_cleared = cleared,
            "locked piece"
        );
        if cleared > 0 {
            info!(rows = ?&full_rows[..count], score = self.score, "cleared rows");
        }
        cleared
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
