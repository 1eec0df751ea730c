//! Core game logic - pure and testable
//!
//! All game rules live here. Nothing in this crate touches the terminal,
//! reads keys or sleeps; it is driven by [`GameAction`](types::GameAction)s
//! and elapsed milliseconds and hands back read-only snapshots.
//!
//! # Module Structure
//!
//! - [`shapes`]: rotation-state tables for the seven kinds
//! - [`piece`]: the falling piece and its candidate moves
//! - [`board`]: settled cells, collision and row clearing
//! - [`supply`]: lookahead queue and hold slot
//! - [`scoring`]: line-clear table and drop points
//! - [`session`]: the Menu/Playing/Paused/GameOver state machine
//! - [`snapshot`]: per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Uniform random pieces**: every draw is an independent choice of seven kinds
//! - **No wall kicks**: a rotation that collides is simply refused
//! - **Lock on contact**: a blocked downward step locks the piece immediately
//! - **Top-out**: a piece locking with a cell on the top row ends the game
//! - **Hold**: one swap per spawned piece
//! - **Scoring**: 10/40/80/150 for 1-4 rows, +1 per soft drop step and per hard drop row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Session, SessionConfig, PieceSupply};
//! use blockfall_core::types::{GameAction, Phase};
//!
//! let mut game = Session::with_supply(SessionConfig::default(), PieceSupply::with_seed(7));
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // hard drop awards a point per row
//! assert_eq!(game.board().settled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`] every frame with the elapsed milliseconds. Gravity
//! steps every 250ms by default; a held soft drop steps every 100ms instead.

pub mod board;
pub mod piece;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod supply;

pub use blockfall_types as types;

pub use board::{Board, ClearedRows, LockOutcome};
pub use piece::{Direction, Piece};
pub use scoring::{drop_score, line_clear_score};
pub use session::{Session, SessionConfig, StepOutcome};
pub use shapes::{rotation_states, shape, ShapeError};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use supply::PieceSupply;
