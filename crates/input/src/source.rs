//! Key sources feeding the input manager.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::map::{is_interrupt, raw_key_name};

/// One raw signal from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Key(String),
    Interrupt,
}

/// Non-blocking supplier of raw key signals.
pub trait KeySource {
    /// Wait at most `timeout` for the next signal. A zero timeout never blocks.
    fn poll(&mut self, timeout: Duration) -> Result<Option<RawInput>>;
}

/// Reads key events from the attached terminal.
#[derive(Debug, Default)]
pub struct CrosstermSource;

impl KeySource for CrosstermSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<RawInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if is_interrupt(key) => Ok(Some(RawInput::Interrupt)),
            Event::Key(key) => Ok(raw_key_name(key).map(RawInput::Key)),
            _ => Ok(None),
        }
    }
}

/// Used when no interactive terminal is attached: never yields a key.
///
/// Waiting still consumes the timeout so a scheduler loop keeps its cadence.
#[derive(Debug, Default)]
pub struct HeadlessSource;

impl KeySource for HeadlessSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<RawInput>> {
        if !timeout.is_zero() {
            std::thread::sleep(timeout);
        }
        Ok(None)
    }
}

/// Replays a fixed list of signals, then behaves like [`HeadlessSource`]
/// without waiting. Handy for demos and tests.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pending: VecDeque<RawInput>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = RawInput>>(inputs: I) -> Self {
        Self {
            pending: inputs.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedSource {
    fn poll(&mut self, _timeout: Duration) -> Result<Option<RawInput>> {
        Ok(self.pending.pop_front())
    }
}
