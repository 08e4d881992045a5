//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It names `crossterm` key
//! events, maps them onto logical action names and infers held/released
//! state from the timing of auto-repeat signals, which works in terminals
//! that never send key-release events.

pub mod manager;
pub mod map;
pub mod source;

pub use tui_arcade_types as types;

pub use manager::{InputEvent, InputManager, KEYDOWN, KEYUP, QUIT};
pub use map::{is_interrupt, raw_key_name};
pub use source::{CrosstermSource, HeadlessSource, KeySource, RawInput, ScriptedSource};
