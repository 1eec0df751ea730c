//! Terminal game renderer.
//!
//! Renders a `GameSnapshot` into a plain framebuffer of styled cells and
//! flushes it to the terminal with diffed updates. No widget or layout
//! library sits in between, so each board cell can be drawn two columns wide.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
