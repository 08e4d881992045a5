//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer for terminal programs. It avoids
//! widget/layout libraries and instead draws into a fixed-size framebuffer
//! whose changes are flushed to a terminal backend.
//!
//! Goals:
//! - Keep draw calls O(1); diff once per frame in [`Renderer::flip`]
//! - Emit only changed cells so the terminal never flickers
//! - Keep terminal I/O behind [`FrameSink`] so rendering stays testable

pub mod fb;
pub mod renderer;
pub mod sink;

pub use tui_arcade_types as types;

pub use fb::{Cell, FrameBuffer, DEFAULT_COLOR};
pub use renderer::{Frame, Renderer, Run, FILL_GLYPH};
pub use sink::{encode_frame_into, terminal_size, FrameSink, TerminalSink};
pub use types::Rgb;
