//! Soft drop hold tracking for terminal environments.
//!
//! Soft drop is the only held key. Terminals that report key releases send a
//! release event; the rest only send repeated presses while a key is down, so
//! a held key with no fresh press for a short timeout counts as released.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{is_soft_drop_key, map_key};
use crate::types::{GameAction, Phase, KEY_RELEASE_TIMEOUT_MS};

/// Actions produced by one key event
pub type KeyActions = ArrayVec<GameAction, 2>;

/// Turns raw key events into game actions and tracks the held soft drop.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    last_soft_drop_key: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_key_release_timeout_ms(KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_key_release_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            soft_drop_held: false,
            last_soft_drop_key: Instant::now(),
            key_release_timeout_ms: timeout_ms,
        }
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Handle one key event in the given phase.
    pub fn handle_key(&mut self, key: KeyEvent, phase: Phase) -> KeyActions {
        let mut actions = KeyActions::new();
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat if is_soft_drop_key(key.code) => {
                self.last_soft_drop_key = Instant::now();
                if phase == Phase::Playing && !self.soft_drop_held {
                    self.soft_drop_held = true;
                    actions.push(GameAction::SoftDropPressed);
                }
            }
            KeyEventKind::Press => {
                if let Some(action) = map_key(key, phase) {
                    actions.push(action);
                }
            }
            // Terminal auto-repeat of other keys is ignored.
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => {
                if is_soft_drop_key(key.code) && self.soft_drop_held {
                    self.soft_drop_held = false;
                    actions.push(GameAction::SoftDropReleased);
                }
            }
        }
        actions
    }

    /// Release a soft drop that has gone quiet for longer than the timeout.
    pub fn update(&mut self) -> Option<GameAction> {
        let quiet = self.last_soft_drop_key.elapsed();
        if self.soft_drop_held && quiet > Duration::from_millis(self.key_release_timeout_ms as u64) {
            self.soft_drop_held = false;
            return Some(GameAction::SoftDropReleased);
        }
        None
    }

    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.last_soft_drop_key = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
