//! tui-arcade (workspace facade crate).
//!
//! This package exposes `tui_arcade::{core, engine, input, term, types}` while
//! the implementation lives in dedicated crates under `crates/`, plus the
//! pieces shared by the binaries: telemetry setup and the Pong demo.

pub use tui_arcade_core as core;
pub use tui_arcade_engine as engine;
pub use tui_arcade_input as input;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

pub mod pong;
pub mod telemetry;
