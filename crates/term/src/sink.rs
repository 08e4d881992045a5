//! Frame sinks: where flipped frames go.
//!
//! [`TerminalSink`] flushes frames to a real terminal through crossterm,
//! writing only the changed runs. `Vec<Frame>` collects frames in memory.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use tracing::warn;

use crate::renderer::Frame;
use crate::types::{Rgb, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

/// Receives every frame the renderer emits.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

impl FrameSink for Vec<Frame> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Current terminal size, or the default grid when there is no terminal.
pub fn terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or((DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT))
}

pub struct TerminalSink {
    stdout: io::Stdout,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Switch to the alternate screen and hide the cursor.
    ///
    /// Raw mode is not touched here; the input manager owns it.
    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf().context("entering alternate screen")?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf().context("leaving alternate screen")?;
        self.entered = false;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

impl FrameSink for TerminalSink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_frame_into(frame, &mut self.buf)?;
        self.flush_buf()
    }
}

/// Encode the changed runs of `frame` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_frame_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    if frame.full {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<Rgb> = None;
    for run in &frame.runs {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for cell in &run.cells {
            if current != Some(cell.color) {
                out.queue(SetForegroundColor(rgb_to_color(cell.color)))?;
                current = Some(cell.color);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
