//! Scoring rules
//!
//! Points come from three places: each successful soft drop step, each row a
//! hard drop travels, and the rows cleared by a lock.

use crate::types::{HARD_DROP_POINTS, LINE_SCORES, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows in a single lock.
///
/// More than four rows at once cannot happen with a tetromino; hand-built
/// boards that manage it score like four.
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points for a drop of `distance` rows
pub fn drop_score(distance: u32, hard_drop: bool) -> u32 {
    let per_row = if hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    distance.saturating_mul(per_row)
}
