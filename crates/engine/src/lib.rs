//! Scheduling module - the fixed-timestep loop and the systems it drives
//!
//! The engine decouples simulation step size from wake-up cadence: however
//! irregular the host's scheduling, game logic always advances in equal
//! slices of time.
//!
//! # Module Structure
//!
//! - [`clock`]: accumulator, stall clamping, interpolation and FPS counting
//! - [`scheduler`]: [`GameEngine`], its notifications and stop handle
//! - [`config`]: [`EngineConfig`] read from the environment
//! - [`systems`]: movement, collision and render transforms
//!
//! # Tick Anatomy
//!
//! Per wake-up while running:
//!
//! | Order | Notification | Count |
//! |-------|--------------|-------|
//! | 1 | `FixedUpdate { frame_ms }` | zero or more |
//! | 2 | `Update { elapsed_ms, interpolation }` | one |
//! | 3 | `Render { interpolation }` | one |
//! | 4 | `FpsUpdate { fps }` | once per second |
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tui_arcade_engine::{EngineEventKind, GameEngine};
//!
//! let mut engine: GameEngine<u32> = GameEngine::new(60);
//! engine.on(EngineEventKind::FixedUpdate, |steps, _| {
//!     *steps += 1;
//!     Ok(())
//! });
//!
//! let mut steps = 0;
//! let t0 = Instant::now();
//! engine.start_at(&mut steps, t0).unwrap();
//! engine.tick(&mut steps, t0 + Duration::from_millis(50)).unwrap();
//! assert_eq!(steps, 3);
//! ```

pub mod clock;
pub mod config;
pub mod scheduler;
pub mod systems;

pub use tui_arcade_core as core;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

pub use clock::{FixedClock, Step};
pub use config::EngineConfig;
pub use scheduler::{EngineEvent, EngineEventKind, EngineState, GameEngine, StopHandle};
pub use systems::{check_collision, Collision, CollisionSystem, MovementSystem, RenderSystem};
