//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`]s according to the current phase and tracks the
//! held soft drop key, including on terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputHandler, KeyActions};
pub use map::{is_soft_drop_key, map_key, should_quit};
