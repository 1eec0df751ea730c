//! Piece module - the falling tetromino
//!
//! A `Piece` is a plain value. Moving or rotating it produces a candidate that
//! the session tests against the board and then either keeps or drops; nothing
//! here mutates in place or needs rolling back.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::shapes::{self, PieceShape};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Direction of a one-cell translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i8, i8) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index into the kind's rotation states, always below the state count
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    /// Set once this spawn lifetime has used its hold
    pub hold_used: bool,
}

impl Piece {
    /// Piece at a fixed column on the top row, spawn rotation
    pub fn new(kind: PieceKind, x: i8) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y: 0,
            hold_used: false,
        }
    }

    /// Piece at a random column that keeps the spawn state inside the board
    pub fn spawn(kind: PieceKind, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(spawn_columns(kind));
        Self::new(kind, x)
    }

    /// Current rotation state
    pub fn shape(&self) -> PieceShape {
        shapes::shape(self.kind, self.rotation)
    }

    /// Absolute board cells (column, row)
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Candidate with the next rotation state
    #[must_use]
    pub fn rotated(&self) -> Self {
        let count = shapes::state_count(self.kind) as u8;
        Self {
            rotation: (self.rotation + 1) % count,
            ..*self
        }
    }

    /// Candidate shifted by one cell
    #[must_use]
    pub fn translated(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same kind, back on the top row in spawn rotation.
    ///
    /// Used when the piece goes into the hold slot. The column is kept,
    /// clamped into `spawn_columns` so the spawn state lies inside the board.
    #[must_use]
    pub fn reset(&self) -> Self {
        let columns = spawn_columns(self.kind);
        Self {
            rotation: 0,
            x: self.x.clamp(*columns.start(), *columns.end()),
            y: 0,
            ..*self
        }
    }
}

/// Anchor columns at which the spawn state of `kind` lies fully inside the board
pub fn spawn_columns(kind: PieceKind) -> RangeInclusive<i8> {
    let (min_dx, max_dx) = shapes::column_span(&shapes::shape(kind, 0));
    -min_dx..=(BOARD_WIDTH as i8 - 1 - max_dx)
}
