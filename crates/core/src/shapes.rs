//! Shape catalog - precomputed rotation states for every tetromino
//!
//! Each kind has an ordered list of rotation states; each state is exactly four
//! cell offsets from the piece anchor. States advance clockwise. Rotation is a
//! table lookup, never a matrix rotation at play time.
//!
//! Offsets are (column, row) with rows growing downwards.

use thiserror::Error;

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// One rotation state - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

const I_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

// Rotating a square only moves it around the box, so it keeps one state.
const O_STATES: [PieceShape; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_STATES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const S_STATES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_STATES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

/// All rotation states of a kind, in clockwise order starting at the spawn state
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states of a kind
pub fn state_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Shape for a kind at a rotation index (taken modulo the state count)
pub fn shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// Shape table corruption. Only reachable through a bad edit of the tables above.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("{0:?} has no rotation states")]
    NoStates(PieceKind),
    #[error("{kind:?} state {state} repeats a cell")]
    DuplicateCell { kind: PieceKind, state: usize },
    #[error("{kind:?} state {state} is not a quarter-turn rotation of the previous state")]
    NotARotation { kind: PieceKind, state: usize },
}

/// Check every state of every kind.
///
/// Each state must hold four distinct cells and be the previous state turned a
/// quarter clockwise (up to translation); the last state must turn back into the
/// first. A single-state kind must be symmetric under a quarter turn.
pub fn validate() -> Result<(), ShapeError> {
    for kind in PieceKind::ALL {
        let states = rotation_states(kind);
        if states.is_empty() {
            return Err(ShapeError::NoStates(kind));
        }

        for (i, state) in states.iter().enumerate() {
            let mut sorted = *state;
            sorted.sort_unstable();
            if sorted.windows(2).any(|w| w[0] == w[1]) {
                return Err(ShapeError::DuplicateCell { kind, state: i });
            }
        }

        for (i, state) in states.iter().enumerate() {
            let next = &states[(i + 1) % states.len()];
            if !congruent(&turn_cw(state), next) {
                return Err(ShapeError::NotARotation {
                    kind,
                    state: (i + 1) % states.len(),
                });
            }
        }
    }
    Ok(())
}

/// Quarter turn clockwise with rows growing downwards: (x, y) -> (-y, x)
pub fn turn_cw(shape: &PieceShape) -> PieceShape {
    shape.map(|(x, y)| (-y, x))
}

/// Same cells up to translation
pub fn congruent(a: &PieceShape, b: &PieceShape) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(shape: &PieceShape) -> PieceShape {
    let min_x = shape.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = shape.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let mut out = shape.map(|(x, y)| (x - min_x, y - min_y));
    out.sort_unstable();
    out
}

/// Horizontal extent (min dx, max dx) of a shape
pub fn column_span(shape: &PieceShape) -> (i8, i8) {
    let min = shape.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max = shape.iter().map(|&(x, _)| x).max().unwrap_or(0);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_validates() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn o_has_one_state_others_four() {
        for kind in PieceKind::ALL {
            let expected = if kind == PieceKind::O { 1 } else { 4 };
            assert_eq!(state_count(kind), expected, "{:?}", kind);
        }
    }

    #[test]
    fn shape_wraps_rotation_index() {
        assert_eq!(shape(PieceKind::T, 4), shape(PieceKind::T, 0));
        assert_eq!(shape(PieceKind::T, 5), shape(PieceKind::T, 1));
        assert_eq!(shape(PieceKind::O, 3), shape(PieceKind::O, 0));
    }

    #[test]
    fn turn_cw_four_times_is_identity() {
        let s = shape(PieceKind::L, 0);
        let back = turn_cw(&turn_cw(&turn_cw(&turn_cw(&s))));
        assert_eq!(back, s);
    }

    #[test]
    fn mirrored_pieces_are_not_congruent() {
        // J and L are reflections; no translation makes them equal.
        for r in 0..4 {
            assert!(!congruent(&shape(PieceKind::J, 0), &shape(PieceKind::L, r)));
            assert!(!congruent(&shape(PieceKind::S, 0), &shape(PieceKind::Z, r)));
        }
    }

    #[test]
    fn column_span_of_horizontal_i() {
        assert_eq!(column_span(&shape(PieceKind::I, 0)), (0, 3));
        assert_eq!(column_span(&shape(PieceKind::I, 1)), (2, 2));
    }
}
