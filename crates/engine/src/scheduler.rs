//! GameEngine: fixed-timestep scheduler emitting lifecycle notifications.
//!
//! The engine owns no game state. Callers keep their world, renderer and
//! input in a context value of their own type `C`, and every handler receives
//! `&mut C` for the duration of its notification. Notifications never overlap,
//! so nothing in the context needs locking.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, error, trace};

use crate::clock::{FixedClock, Step};
use crate::config::EngineConfig;
use crate::types::{DEFAULT_MAX_FRAME_MS, DEFAULT_TICK_RATE_HZ};

/// Notification emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    Start,
    Stop,
    /// One fixed simulation step of `frame_ms` milliseconds.
    FixedUpdate { frame_ms: f64 },
    /// Once per wake-up, after all fixed steps.
    Update { elapsed_ms: f64, interpolation: f64 },
    /// Once per wake-up, after `Update`.
    Render { interpolation: f64 },
    /// Frames rendered over the last second.
    FpsUpdate { fps: u32 },
}

impl EngineEvent {
    pub fn kind(&self) -> EngineEventKind {
        match self {
            EngineEvent::Start => EngineEventKind::Start,
            EngineEvent::Stop => EngineEventKind::Stop,
            EngineEvent::FixedUpdate { .. } => EngineEventKind::FixedUpdate,
            EngineEvent::Update { .. } => EngineEventKind::Update,
            EngineEvent::Render { .. } => EngineEventKind::Render,
            EngineEvent::FpsUpdate { .. } => EngineEventKind::FpsUpdate,
        }
    }
}

/// Subscription key for [`GameEngine::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEventKind {
    Start,
    Stop,
    FixedUpdate,
    Update,
    Render,
    FpsUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
}

/// Requests a stop from inside a handler.
///
/// The request is honored at the next tick boundary, never mid-tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

type Handler<C> = Box<dyn FnMut(&mut C, &EngineEvent) -> Result<()>>;

pub struct GameEngine<C> {
    clock: FixedClock,
    state: EngineState,
    handlers: Vec<(EngineEventKind, Handler<C>)>,
    stop: StopHandle,
    wakeups: u64,
    fixed_steps: u64,
}

impl<C> GameEngine<C> {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self::with_clock(FixedClock::new(
            tick_rate_hz,
            Duration::from_millis(DEFAULT_MAX_FRAME_MS as u64),
        ))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_clock(FixedClock::new(config.tick_rate_hz, config.max_frame()))
    }

    pub fn with_clock(clock: FixedClock) -> Self {
        Self {
            clock,
            state: EngineState::Stopped,
            handlers: Vec::new(),
            stop: StopHandle::default(),
            wakeups: 0,
            fixed_steps: 0,
        }
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Wake-ups processed since construction.
    pub fn wakeups(&self) -> u64 {
        self.wakeups
    }

    /// Fixed steps simulated since construction.
    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Subscribe to one kind of notification. Handlers run in registration
    /// order; an `Err` aborts the notification and propagates to the caller.
    pub fn on<F>(&mut self, kind: EngineEventKind, handler: F)
    where
        F: FnMut(&mut C, &EngineEvent) -> Result<()> + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
    }

    pub fn start(&mut self, ctx: &mut C) -> Result<()> {
        self.start_at(ctx, Instant::now())
    }

    /// Start measuring time from `now`. Does nothing while already running.
    pub fn start_at(&mut self, ctx: &mut C, now: Instant) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.state = EngineState::Running;
        self.stop.0.set(false);
        self.clock.reset(now);
        debug!(tick_rate_hz = self.clock.tick_rate_hz(), "engine started");
        self.emit(ctx, EngineEvent::Start)
    }

    /// Does nothing while already stopped.
    pub fn stop(&mut self, ctx: &mut C) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        self.state = EngineState::Stopped;
        self.stop.0.set(false);
        debug!(
            wakeups = self.wakeups,
            fixed_steps = self.fixed_steps,
            "engine stopped"
        );
        self.emit(ctx, EngineEvent::Stop)
    }

    /// Process one wake-up at `now`.
    ///
    /// Returns the clock step, or `None` if the engine is not running (a
    /// pending stop request is applied first).
    pub fn tick(&mut self, ctx: &mut C, now: Instant) -> Result<Option<Step>> {
        if self.stop.is_requested() {
            self.stop(ctx)?;
        }
        if !self.is_running() {
            return Ok(None);
        }

        let step = self.clock.advance(now);
        self.wakeups += 1;
        trace!(fixed_steps = step.fixed_steps, interpolation = step.interpolation, "tick");

        let frame_ms = self.clock.frame_ms();
        for _ in 0..step.fixed_steps {
            self.fixed_steps += 1;
            self.emit(ctx, EngineEvent::FixedUpdate { frame_ms })?;
        }

        self.emit(
            ctx,
            EngineEvent::Update {
                elapsed_ms: step.elapsed.as_secs_f64() * 1000.0,
                interpolation: step.interpolation,
            },
        )?;
        self.emit(
            ctx,
            EngineEvent::Render {
                interpolation: step.interpolation,
            },
        )?;

        if let Some(fps) = step.fps {
            self.emit(ctx, EngineEvent::FpsUpdate { fps })?;
        }

        Ok(Some(step))
    }

    /// Drive the engine until stopped.
    ///
    /// Between wake-ups `idle` is handed the time left until the next fixed
    /// step. It must return within that budget and may return early (for
    /// example when input arrives); this is the loop's only suspension point.
    /// A handler error halts the loop and is returned.
    pub fn run<F>(&mut self, ctx: &mut C, mut idle: F) -> Result<()>
    where
        F: FnMut(&mut C, Duration) -> Result<()>,
    {
        self.start(ctx)?;

        while self.is_running() {
            let budget = self.clock.until_next_step(Instant::now());
            let result = idle(ctx, budget).and_then(|()| self.tick(ctx, Instant::now()));
            if let Err(err) = result {
                error!(error = %err, "engine halted by handler failure");
                self.state = EngineState::Stopped;
                return Err(err);
            }
        }
        Ok(())
    }

    fn emit(&mut self, ctx: &mut C, event: EngineEvent) -> Result<()> {
        let kind = event.kind();
        for (k, handler) in self.handlers.iter_mut() {
            if *k == kind {
                handler(ctx, &event)?;
            }
        }
        Ok(())
    }
}

impl<C> Default for GameEngine<C> {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}
