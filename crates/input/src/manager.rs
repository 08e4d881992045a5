//! Held-key inference for terminals without key-release events.
//!
//! Terminals deliver a press followed by auto-repeat signals and never report
//! the release. A key therefore stays held while signals keep arriving within
//! the hold window (re-armed by every repeat) and is released once the window
//! passes in silence.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::time::{Duration, Instant};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::terminal;
use tracing::{debug, warn};

use crate::source::{CrosstermSource, HeadlessSource, KeySource, RawInput};
use crate::types::DEFAULT_HOLD_WINDOW_MS;

pub const KEYDOWN: &str = "keydown";
pub const KEYUP: &str = "keyup";
pub const QUIT: &str = "quit";

/// Notification fired by the input manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A logical key went from idle to held.
    KeyDown(String),
    /// A held logical key was released after the hold window elapsed.
    KeyUp(String),
    /// The interrupt key was pressed.
    Quit,
    /// A raw signal of a key bound with [`InputManager::map_key`].
    Action(String),
}

impl InputEvent {
    /// Subscription name this event is delivered under.
    pub fn name(&self) -> &str {
        match self {
            InputEvent::KeyDown(_) => KEYDOWN,
            InputEvent::KeyUp(_) => KEYUP,
            InputEvent::Quit => QUIT,
            InputEvent::Action(name) => name,
        }
    }
}

type Handler = Box<dyn FnMut(&InputEvent)>;

pub struct InputManager {
    source: Box<dyn KeySource>,
    /// raw name -> logical name
    bindings: HashMap<String, String>,
    /// logical name -> time of the last signal
    held: HashMap<String, Instant>,
    hold_window: Duration,
    handlers: HashMap<String, Vec<Handler>>,
    raw_mode: bool,
    quit: bool,
    destroyed: bool,
}

impl InputManager {
    /// Attach to the terminal, enabling raw mode.
    ///
    /// Without an interactive terminal (or when raw mode cannot be enabled)
    /// the manager runs headless: it never reports a key but otherwise
    /// behaves normally.
    pub fn new() -> Self {
        Self::from_terminal(std::io::stdin().is_terminal())
    }

    fn from_terminal(is_tty: bool) -> Self {
        if !is_tty {
            debug!("stdin is not a terminal; input runs headless");
            return Self::headless();
        }
        match terminal::enable_raw_mode() {
            Ok(()) => {
                let mut manager = Self::with_source(CrosstermSource);
                manager.raw_mode = true;
                debug!("raw mode enabled");
                manager
            }
            Err(err) => {
                warn!(error = %err, "raw mode unavailable; input runs headless");
                Self::headless()
            }
        }
    }

    pub fn headless() -> Self {
        Self::with_source(HeadlessSource)
    }

    pub fn with_source(source: impl KeySource + 'static) -> Self {
        Self {
            source: Box::new(source),
            bindings: HashMap::new(),
            held: HashMap::new(),
            hold_window: Duration::from_millis(DEFAULT_HOLD_WINDOW_MS as u64),
            handlers: HashMap::new(),
            raw_mode: false,
            quit: false,
            destroyed: false,
        }
    }

    pub fn with_hold_window(mut self, window: Duration) -> Self {
        self.hold_window = window;
        self
    }

    pub fn hold_window(&self) -> Duration {
        self.hold_window
    }

    /// True when raw mode was acquired and not yet released.
    pub fn is_interactive(&self) -> bool {
        self.raw_mode
    }

    /// Bind a raw key name to a logical action name. Rebinding replaces.
    pub fn map_key(&mut self, raw: impl Into<String>, logical: impl Into<String>) {
        self.bindings.insert(raw.into(), logical.into());
    }

    pub fn is_key_pressed(&self, logical: &str) -> bool {
        self.held.contains_key(logical)
    }

    /// Currently held logical keys, unordered.
    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.held.keys().map(String::as_str)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Subscribe to `"keydown"`, `"keyup"`, `"quit"` or a mapped action name.
    pub fn on(&mut self, event: impl Into<String>, handler: impl FnMut(&InputEvent) + 'static) {
        self.handlers
            .entry(event.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Feed one raw key signal received at `now`.
    pub fn handle_raw(&mut self, raw: &str, now: Instant) -> ArrayVec<InputEvent, 2> {
        let mut events = ArrayVec::<InputEvent, 2>::new();
        let mapped = self.bindings.get(raw).cloned();
        let logical = mapped.clone().unwrap_or_else(|| raw.to_string());

        if self.held.insert(logical.clone(), now).is_none() {
            events.push(InputEvent::KeyDown(logical));
        }
        if let Some(action) = mapped {
            events.push(InputEvent::Action(action));
        }

        for event in &events {
            self.dispatch(event);
        }
        events
    }

    /// Handle the interrupt key: fire `quit` and latch the quit request.
    pub fn interrupt(&mut self) {
        debug!("interrupt received");
        self.quit = true;
        self.dispatch(&InputEvent::Quit);
    }

    /// Release every key whose hold window has elapsed by `now`.
    pub fn update(&mut self, now: Instant) -> Vec<InputEvent> {
        let window = self.hold_window;
        let mut expired: Vec<String> = self
            .held
            .iter()
            .filter(|(_, last)| now.saturating_duration_since(**last) >= window)
            .map(|(name, _)| name.clone())
            .collect();
        expired.sort();

        let mut events = Vec::with_capacity(expired.len());
        for name in expired {
            self.held.remove(&name);
            let event = InputEvent::KeyUp(name);
            self.dispatch(&event);
            events.push(event);
        }
        events
    }

    /// Drain every pending signal without blocking, then expire holds.
    pub fn poll(&mut self, now: Instant) -> Result<()> {
        while let Some(input) = self.source.poll(Duration::ZERO)? {
            self.apply(input, now);
        }
        self.update(now);
        Ok(())
    }

    /// Wait at most `budget` for input, then drain and expire.
    ///
    /// Returns early as soon as a signal arrives; this is the cooperative
    /// yield between scheduler wake-ups.
    pub fn wait(&mut self, budget: Duration) -> Result<()> {
        if let Some(input) = self.source.poll(budget)? {
            self.apply(input, Instant::now());
        }
        self.poll(Instant::now())
    }

    /// Release raw mode and drop every subscription. Safe to call twice;
    /// also runs on drop.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.handlers.clear();
        self.held.clear();
        if self.raw_mode {
            self.raw_mode = false;
            match terminal::disable_raw_mode() {
                Ok(()) => debug!("raw mode released"),
                Err(err) => warn!(error = %err, "failed to release raw mode"),
            }
        }
    }

    fn apply(&mut self, input: RawInput, now: Instant) {
        match input {
            RawInput::Interrupt => self.interrupt(),
            RawInput::Key(raw) => {
                self.handle_raw(&raw, now);
            }
        }
    }

    fn dispatch(&mut self, event: &InputEvent) {
        if let Some(handlers) = self.handlers.get_mut(event.name()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

impl Drop for InputManager {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_non_terminal_falls_back_to_headless() {
        let mut im = InputManager::from_terminal(false);
        im.map_key("w", "p1_up");
        assert!(!im.is_interactive());

        let t0 = Instant::now();
        im.poll(t0).unwrap();
        im.wait(ms(1)).unwrap();
        assert!(!im.is_key_pressed("p1_up"));
        assert_eq!(im.pressed_keys().count(), 0);
        assert!(!im.quit_requested());

        // No raw mode was taken, so releasing is a no-op.
        im.destroy();
    }

    #[test]
    fn test_repeat_within_window_keeps_key_held() {
        let mut im = InputManager::headless();
        let t0 = Instant::now();

        let events = im.handle_raw("w", t0);
        assert_eq!(events.as_slice(), &[InputEvent::KeyDown("w".into())]);

        // A repeat re-arms the window without another keydown.
        assert!(im.handle_raw("w", t0 + ms(80)).is_empty());
        assert!(im.update(t0 + ms(150)).is_empty());
        assert!(im.is_key_pressed("w"));

        let events = im.update(t0 + ms(180));
        assert_eq!(events, vec![InputEvent::KeyUp("w".into())]);
        assert!(!im.is_key_pressed("w"));
    }

    #[test]
    fn test_mapped_key_fires_action_on_every_signal() {
        let mut im = InputManager::headless();
        im.map_key("space", "fire");
        let t0 = Instant::now();

        assert_eq!(
            im.handle_raw("space", t0).as_slice(),
            &[
                InputEvent::KeyDown("fire".into()),
                InputEvent::Action("fire".into())
            ]
        );
        assert_eq!(
            im.handle_raw("space", t0 + ms(30)).as_slice(),
            &[InputEvent::Action("fire".into())]
        );
    }

    #[test]
    fn test_handlers_receive_events_by_name() {
        let mut im = InputManager::headless();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for name in [KEYDOWN, KEYUP, QUIT] {
            let seen = seen.clone();
            im.on(name, move |e| seen.borrow_mut().push(e.clone()));
        }

        let t0 = Instant::now();
        im.handle_raw("x", t0);
        im.update(t0 + ms(100));
        im.interrupt();

        assert_eq!(
            *seen.borrow(),
            vec![
                InputEvent::KeyDown("x".into()),
                InputEvent::KeyUp("x".into()),
                InputEvent::Quit
            ]
        );
        assert!(im.quit_requested());
    }

    #[test]
    fn test_destroy_clears_subscriptions_and_is_idempotent() {
        let mut im = InputManager::headless();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        im.on(KEYDOWN, move |_| *c.borrow_mut() += 1);

        im.destroy();
        im.destroy();
        im.handle_raw("a", Instant::now());
        assert_eq!(*count.borrow(), 0);
        assert!(!im.is_interactive());
    }
}
