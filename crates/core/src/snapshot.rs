//! Read-only per-frame view of a session for the renderer.

use crate::piece::Piece;
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// 0 = empty, kind index + 1 otherwise
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next_queue: [PieceKind; PREVIEW_LEN],
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next_queue = [PieceKind::I; PREVIEW_LEN];
        self.hold = None;
        self.can_hold = true;
        self.phase = Phase::Menu;
        self.score = 0;
        self.lines = 0;
    }

    /// Board and pieces are worth drawing (anything but the title menu)
    pub fn shows_board(&self) -> bool {
        self.phase != Phase::Menu
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next_queue: [PieceKind::I; PREVIEW_LEN],
            hold: None,
            can_hold: true,
            phase: Phase::Menu,
            score: 0,
            lines: 0,
        }
    }
}
