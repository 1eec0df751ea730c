//! Piece supply - lookahead queue and hold slot
//!
//! Each draw is a uniform choice over the seven kinds. There is no 7-bag, so a
//! kind can repeat any number of times in a row. That fairness gap is known and
//! kept.
//!
//! Play uses an entropy-seeded RNG; `with_seed` exists for tests and benches.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::types::{PieceKind, PREVIEW_LEN};

/// Upcoming kinds plus the single hold slot
#[derive(Debug, Clone)]
pub struct PieceSupply {
    queue: VecDeque<PieceKind>,
    held: Option<Piece>,
    rng: StdRng,
}

impl PieceSupply {
    /// Supply backed by an entropy-seeded RNG
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible supply
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut supply = Self {
            queue: VecDeque::with_capacity(PREVIEW_LEN + 1),
            held: None,
            rng,
        };
        supply.refill();
        supply
    }

    fn random_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    fn refill(&mut self) {
        while self.queue.len() < PREVIEW_LEN {
            let kind = self.random_kind();
            self.queue.push_back(kind);
        }
    }

    /// Empty the hold slot and draw a fresh lookahead. The RNG keeps its state.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.held = None;
        self.refill();
    }

    /// Pop the front kind and append a new random one
    pub fn next(&mut self) -> PieceKind {
        let kind = match self.queue.pop_front() {
            Some(kind) => kind,
            None => self.random_kind(),
        };
        self.refill();
        kind
    }

    /// Draw the next kind and place it at a random spawn column
    pub fn spawn_next(&mut self) -> Piece {
        let kind = self.next();
        Piece::spawn(kind, &mut self.rng)
    }

    /// Upcoming kinds, front first
    pub fn preview(&self) -> [PieceKind; PREVIEW_LEN] {
        let mut out = [PieceKind::I; PREVIEW_LEN];
        for (slot, kind) in out.iter_mut().zip(self.queue.iter()) {
            *slot = *kind;
        }
        out
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// Swap `current` with the hold slot.
    ///
    /// Returns false and leaves everything untouched when `current` already
    /// used its hold. Otherwise `current` goes into the slot (top row, spawn
    /// rotation) and is replaced by the previously held piece, or by a freshly
    /// drawn piece when the slot was empty. The replacement is marked
    /// `hold_used` so it cannot be swapped straight back.
    pub fn hold(&mut self, current: &mut Piece) -> bool {
        if current.hold_used {
            return false;
        }

        let incoming = match self.held.take() {
            Some(piece) => piece,
            None => self.spawn_next(),
        };
        let outgoing = std::mem::replace(
            current,
            Piece {
                hold_used: true,
                ..incoming
            },
        );
        self.held = Some(outgoing.reset());
        true
    }
}

impl Default for PieceSupply {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_has_lookahead_depth() {
        let supply = PieceSupply::with_seed(1);
        assert_eq!(supply.queue.len(), PREVIEW_LEN);
        assert_eq!(supply.preview().len(), 3);
    }

    #[test]
    fn next_pops_front_and_refills() {
        let mut supply = PieceSupply::with_seed(42);
        let before = supply.preview();
        let drawn = supply.next();
        assert_eq!(drawn, before[0]);
        let after = supply.preview();
        assert_eq!(after[0], before[1]);
        assert_eq!(after[1], before[2]);
        assert_eq!(supply.queue.len(), PREVIEW_LEN);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PieceSupply::with_seed(99);
        let mut b = PieceSupply::with_seed(99);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn uniform_choice_reaches_every_kind() {
        let mut supply = PieceSupply::with_seed(3);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[supply.next().index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn first_hold_draws_from_queue() {
        let mut supply = PieceSupply::with_seed(5);
        let upcoming = supply.preview()[0];
        let mut current = Piece::new(PieceKind::T, 3).translated(crate::piece::Direction::Down);

        assert!(supply.hold(&mut current));
        assert_eq!(current.kind, upcoming);
        assert!(current.hold_used);

        let held = supply.held().copied().unwrap();
        assert_eq!(held.kind, PieceKind::T);
        assert_eq!((held.rotation, held.y), (0, 0));
    }

    #[test]
    fn second_hold_on_same_piece_is_noop() {
        let mut supply = PieceSupply::with_seed(5);
        let mut current = Piece::new(PieceKind::T, 3);
        assert!(supply.hold(&mut current));

        let active_before = current;
        let held_before = supply.held().copied();
        let preview_before = supply.preview();

        assert!(!supply.hold(&mut current));
        assert_eq!(current, active_before);
        assert_eq!(supply.held().copied(), held_before);
        assert_eq!(supply.preview(), preview_before);
    }

    #[test]
    fn hold_swaps_with_stored_piece() {
        let mut supply = PieceSupply::with_seed(8);
        let mut current = Piece::new(PieceKind::J, 2).rotated();
        assert!(supply.hold(&mut current));

        // A new spawn lifetime starts with hold available again.
        let mut next = Piece::new(PieceKind::Z, 4);
        let preview_before = supply.preview();
        assert!(supply.hold(&mut next));
        assert_eq!(next.kind, PieceKind::J);
        assert_eq!(next.rotation, 0);
        assert!(next.hold_used);
        assert_eq!(supply.held().map(|p| p.kind), Some(PieceKind::Z));
        // Swapping with a stored piece does not draw.
        assert_eq!(supply.preview(), preview_before);
    }

    #[test]
    fn wall_hugging_piece_comes_back_inside_the_board() {
        let board = crate::board::Board::new();
        // Vertical I in column 0, then in column 9.
        for (rotation, x) in [(1u8, -2i8), (3, 8)] {
            let mut supply = PieceSupply::with_seed(21);
            let mut current = Piece {
                rotation,
                x,
                y: 6,
                ..Piece::new(PieceKind::I, 0)
            };
            assert!(!board.collides(&current.cells()));
            assert!(supply.hold(&mut current));

            let held = supply.held().copied().unwrap();
            assert_eq!(held.rotation, 0);
            assert!(!board.collides(&held.cells()), "{:?}", held);

            let mut next = Piece::new(PieceKind::T, 3);
            assert!(supply.hold(&mut next));
            assert_eq!(next.kind, PieceKind::I);
            assert!(!board.collides(&next.cells()), "{:?}", next);
        }
    }

    #[test]
    fn reset_empties_hold() {
        let mut supply = PieceSupply::with_seed(8);
        let mut current = Piece::new(PieceKind::I, 0);
        supply.hold(&mut current);
        supply.reset();
        assert!(supply.held().is_none());
        assert_eq!(supply.queue.len(), PREVIEW_LEN);
    }
}
