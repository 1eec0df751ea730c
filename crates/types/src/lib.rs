//! Shared types and constants
//!
//! Plain data used by every layer of the game: the core engine, the input
//! mapping and the terminal renderer. Nothing here depends on I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! A falling piece may hang above row 0 while it moves; settled cells never do.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame period of the game loop (~60 FPS) |
//! | `GRAVITY_TICK_MS` | 250 | Automatic downward step period |
//! | `SOFT_DROP_REPEAT_MS` | 100 | Downward step period while soft drop is held |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Held-key auto-release for terminals without release events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame period of the game loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity period: one automatic downward step every 250ms
pub const GRAVITY_TICK_MS: u32 = 250;

/// Soft drop repeat period while the key is held
pub const SOFT_DROP_REPEAT_MS: u32 = 100;

/// A held key with no fresh press/repeat event for this long counts as released.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Number of upcoming kinds shown in the lookahead
pub const PREVIEW_LEN: usize = 3;

/// Line clear scores indexed by rows cleared in one lock (0-4)
pub const LINE_SCORES: [u32; 5] = [0, 10, 40, 80, 150];

/// Points per successful soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled during a hard drop
pub const HARD_DROP_POINTS: u32 = 1;

/// The seven tetromino kinds
///
/// Each kind has its own color in the renderer:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **J**: Blue
/// - **L**: Orange
/// - **S**: Green
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Upper-case letter used in panels and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }

    /// Catalog index (0-6), also used as `index + 1` in the u8 board grid
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Inverse of `index() + 1`; 0 and out-of-range values are empty cells.
    pub fn from_grid_value(v: u8) -> Option<Self> {
        match v {
            1..=7 => Some(Self::ALL[(v - 1) as usize]),
            _ => None,
        }
    }
}

/// Session phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Discrete events the session reacts to
///
/// Raw key codes never reach the core; the input layer translates them into
/// these. `GravityTick` is produced by the session's own timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Advance to the next rotation state
    RotateCw,
    /// Soft drop key went down: one immediate step, then repeats while held
    SoftDropPressed,
    /// Soft drop key went up
    SoftDropReleased,
    /// Drop until blocked and lock, in one burst
    HardDrop,
    /// Swap the active piece with the hold slot (once per piece)
    Hold,
    /// Pause a running game (resumes when already paused)
    Pause,
    /// Resume a paused game
    Resume,
    /// Start a game from the menu
    Start,
    /// Start over after game over
    Restart,
    /// Back to the title menu from pause or game over
    Menu,
    /// Leave the program
    Quit,
    /// One automatic downward step
    GravityTick,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECW"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("rotateCcw"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "softdroppressed" => Some(GameAction::SoftDropPressed),
            "softdropreleased" => Some(GameAction::SoftDropReleased),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            "menu" => Some(GameAction::Menu),
            "quit" => Some(GameAction::Quit),
            "gravitytick" => Some(GameAction::GravityTick),
            _ => None,
        }
    }

    /// camelCase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::SoftDropPressed => "softDropPressed",
            GameAction::SoftDropReleased => "softDropReleased",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Start => "start",
            GameAction::Restart => "restart",
            GameAction::Menu => "menu",
            GameAction::Quit => "quit",
            GameAction::GravityTick => "gravityTick",
        }
    }
}

/// Emitted by the session after every lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub topped_out: bool,
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(PieceKind)`: settled, colored by the kind that left it
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_timing_defaults() {
        assert_eq!(GRAVITY_TICK_MS, 250);
        assert_eq!(SOFT_DROP_REPEAT_MS, 100);
        assert_eq!(PREVIEW_LEN, 3);
        assert_eq!(LINE_SCORES, [0, 10, 40, 80, 150]);
    }

    #[test]
    fn grid_value_roundtrips_every_kind() {
        for kind in PieceKind::ALL {
            let v = (kind.index() + 1) as u8;
            assert_eq!(PieceKind::from_grid_value(v), Some(kind));
        }
        assert_eq!(PieceKind::from_grid_value(0), None);
        assert_eq!(PieceKind::from_grid_value(8), None);
    }

    #[test]
    fn action_names_parse_back() {
        let all = [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::RotateCw,
            GameAction::SoftDropPressed,
            GameAction::SoftDropReleased,
            GameAction::HardDrop,
            GameAction::Hold,
            GameAction::Pause,
            GameAction::Resume,
            GameAction::Start,
            GameAction::Restart,
            GameAction::Menu,
            GameAction::Quit,
            GameAction::GravityTick,
        ];
        for action in all {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn default_phase_is_menu() {
        assert_eq!(Phase::default(), Phase::Menu);
        assert_eq!(Phase::GameOver.as_str(), "game_over");
    }
}
