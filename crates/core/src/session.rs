//! Session module - the game state machine
//!
//! The session owns the board, the active piece, the piece supply and the
//! score as sibling fields and is the only writer of any of them. Input
//! events arrive as [`GameAction`]s; wall time arrives through [`Session::tick`],
//! which turns it into gravity ticks and soft drop repeats.
//!
//! Every move follows the same protocol: build a candidate piece, ask the
//! board whether it collides, and replace the active piece only if it does
//! not. A rejected downward move locks the piece where it is, spawns the next
//! one, then clears full rows.

use log::{debug, info};

use crate::board::Board;
use crate::piece::{Direction, Piece};
use crate::scoring::{drop_score, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::supply::PieceSupply;
use crate::types::{
    GameAction, LockEvent, Phase, PieceKind, GRAVITY_TICK_MS, PREVIEW_LEN, SOFT_DROP_REPEAT_MS,
};

/// Timing knobs for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Period of the automatic downward step
    pub gravity_ms: u32,
    /// Period of downward steps while soft drop is held
    pub soft_drop_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_TICK_MS,
            soft_drop_ms: SOFT_DROP_REPEAT_MS,
        }
    }
}

/// What a single downward step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Locked,
    /// No active piece
    Idle,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    board: Board,
    active: Option<Piece>,
    supply: PieceSupply,
    score: u32,
    lines: u32,
    config: SessionConfig,
    soft_drop_held: bool,
    gravity_timer_ms: u32,
    soft_drop_timer_ms: u32,
    /// Last lock event (consumed by the UI).
    last_event: Option<LockEvent>,
    quit_requested: bool,
}

impl Session {
    /// A session on the title menu with an entropy-seeded supply
    pub fn new(config: SessionConfig) -> Self {
        Self::with_supply(config, PieceSupply::new())
    }

    /// A session on the title menu drawing from the given supply
    pub fn with_supply(config: SessionConfig, supply: PieceSupply) -> Self {
        let config = SessionConfig {
            gravity_ms: config.gravity_ms.max(1),
            soft_drop_ms: config.soft_drop_ms.max(1),
        };
        Self {
            phase: Phase::Menu,
            board: Board::new(),
            active: None,
            supply,
            score: 0,
            lines: 0,
            config,
            soft_drop_held: false,
            gravity_timer_ms: 0,
            soft_drop_timer_ms: 0,
            last_event: None,
            quit_requested: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.supply.held().map(|p| p.kind)
    }

    pub fn preview(&self) -> [PieceKind; PREVIEW_LEN] {
        self.supply.preview()
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// A Quit action arrived; the frame loop should exit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next_queue = self.supply.preview();
        out.hold = self.held();
        out.can_hold = self.active.is_some_and(|p| !p.hold_used);
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }

    /// Fresh board, score and supply, first piece spawned, phase Playing.
    fn reset_and_play(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.supply.reset();
        self.active = Some(self.supply.spawn_next());
        self.soft_drop_held = false;
        self.gravity_timer_ms = 0;
        self.soft_drop_timer_ms = 0;
        self.last_event = None;
        self.set_phase(Phase::Playing);
    }

    /// Apply one input event. Returns false when the event had no effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match (self.phase, action) {
            (_, GameAction::Quit) => {
                info!("quit requested from {}", self.phase.as_str());
                self.quit_requested = true;
                true
            }
            // Accepted in every phase so a release during a pause is not lost.
            (_, GameAction::SoftDropReleased) => std::mem::take(&mut self.soft_drop_held),
            (Phase::Menu, GameAction::Start)
            | (Phase::GameOver, GameAction::Start | GameAction::Restart) => {
                self.reset_and_play();
                true
            }
            (Phase::Paused | Phase::GameOver, GameAction::Menu) => {
                self.soft_drop_held = false;
                self.set_phase(Phase::Menu);
                true
            }
            (Phase::Playing, GameAction::Pause) => {
                self.set_phase(Phase::Paused);
                true
            }
            (Phase::Paused, GameAction::Pause | GameAction::Resume) => {
                self.set_phase(Phase::Playing);
                true
            }
            (Phase::Playing, _) => self.apply_play_action(action),
            _ => false,
        }
    }

    fn apply_play_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(Direction::Left),
            GameAction::MoveRight => self.try_move(Direction::Right),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::SoftDropPressed => {
                if self.soft_drop_held {
                    return false;
                }
                self.soft_drop_held = true;
                self.soft_drop_timer_ms = 0;
                self.soft_drop_step();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold(),
            GameAction::GravityTick => {
                if self.soft_drop_held {
                    return false;
                }
                self.step_down() != StepOutcome::Idle
            }
            _ => false,
        }
    }

    /// Advance timers by `elapsed_ms` of wall time.
    ///
    /// Gravity keeps its own clock; its ticks are ignored while soft drop is
    /// held, and soft drop repeats on its shorter period instead. Returns true
    /// if anything stepped.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        let mut stepped = false;

        if self.soft_drop_held {
            self.soft_drop_timer_ms = self.soft_drop_timer_ms.saturating_add(elapsed_ms);
            while self.soft_drop_held
                && self.phase == Phase::Playing
                && self.soft_drop_timer_ms >= self.config.soft_drop_ms
            {
                self.soft_drop_timer_ms -= self.config.soft_drop_ms;
                self.soft_drop_step();
                stepped = true;
            }
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        while self.phase == Phase::Playing && self.gravity_timer_ms >= self.config.gravity_ms {
            if self.soft_drop_held {
                // Every pending tick would be ignored; drop the backlog at once.
                self.gravity_timer_ms %= self.config.gravity_ms;
                break;
            }
            self.gravity_timer_ms -= self.config.gravity_ms;
            if self.apply_action(GameAction::GravityTick) {
                stepped = true;
            }
        }

        stepped
    }

    /// Replace the active piece with its translation if that does not collide
    pub(crate) fn try_move(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.translated(direction);
        if self.board.collides(&candidate.cells()) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Advance the rotation state if the result does not collide. No kicks.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.rotated();
        if candidate == active || self.board.collides(&candidate.cells()) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// One downward step; a blocked step locks the piece.
    pub fn step_down(&mut self) -> StepOutcome {
        if self.active.is_none() {
            return StepOutcome::Idle;
        }
        if self.try_move(Direction::Down) {
            StepOutcome::Moved
        } else {
            self.lock_active();
            StepOutcome::Locked
        }
    }

    fn soft_drop_step(&mut self) {
        if self.step_down() == StepOutcome::Moved {
            self.score = self.score.saturating_add(drop_score(1, false));
        }
    }

    /// Drop until blocked, one point per row, then lock. Runs to completion.
    /// Returns the distance travelled.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let mut distance: u32 = 0;
        loop {
            match self.step_down() {
                StepOutcome::Moved => {
                    distance += 1;
                    self.score = self.score.saturating_add(drop_score(1, true));
                }
                StepOutcome::Locked | StepOutcome::Idle => break,
            }
        }
        debug!("hard drop of {} rows", distance);
        distance
    }

    /// Swap the active piece with the hold slot (once per spawn lifetime)
    pub(crate) fn hold(&mut self) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        if !self.supply.hold(&mut active) {
            return false;
        }
        debug!("hold: now {}", active.kind.as_str());
        self.active = Some(active);
        true
    }

    /// Commit the active piece, spawn the next one, then clear rows.
    ///
    /// Row clearing reads settled cells only, so the fresh piece never counts
    /// towards a full row. Top-out is decided from the locked cells.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let outcome = self.board.lock(&piece.cells(), piece.kind);
        self.active = Some(self.supply.spawn_next());

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;
        let line_clear_score = line_clear_score(cleared.len());
        self.score = self.score.saturating_add(line_clear_score);
        self.lines = self.lines.saturating_add(lines_cleared);

        debug!(
            "locked {} ({} cells), cleared {:?}, +{}",
            piece.kind.as_str(),
            outcome.settled,
            cleared.as_slice(),
            line_clear_score
        );

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared,
            line_clear_score,
            topped_out: outcome.topped_out,
        });

        if outcome.topped_out {
            info!("top-out with score {}", self.score);
            self.soft_drop_held = false;
            self.set_phase(Phase::GameOver);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
