//! Simulation state module - entities and components, no I/O
//!
//! This crate owns everything the simulation knows about. It has **no
//! dependencies** on the terminal, input or scheduling, making it:
//!
//! - **Deterministic**: the same sequence of calls produces the same ids and
//!   the same query results
//! - **Testable**: every operation is a plain method call on [`World`]
//! - **Permissive**: stale ids and absent components are ignored rather than
//!   raised, so game code running at 60 Hz never trips on last frame's ids
//!
//! # Module Structure
//!
//! - [`component`]: built-in component kinds plus the `Custom` extension slot
//! - [`world`]: the entity/component store and conjunctive queries
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{ComponentKind, Position, Velocity, World};
//!
//! let mut world = World::new();
//! let ball = world.create_entity();
//! world.insert(ball, Position::new(10.0, 5.0));
//! world.insert(ball, Velocity::new(20.0, 0.0));
//!
//! let movers = world.query(&[ComponentKind::Position, ComponentKind::Velocity]);
//! assert_eq!(movers, vec![ball]);
//!
//! if let Some(pos) = world.get_mut::<Position>(ball) {
//!     pos.x += 1.0;
//! }
//! assert_eq!(world.get::<Position>(ball).map(|p| p.x), Some(11.0));
//! ```

pub mod component;
pub mod world;

pub use tui_arcade_types as types;

pub use component::{
    Collider, Component, ComponentKind, ComponentType, Dimension, Position, Sprite, Velocity,
};
pub use types::Entity;
pub use world::World;
