//! Stateless per-tick transforms over the world.
//!
//! - [`movement`]: integrates velocity into position
//! - [`collision`]: AABB overlap checks and per-pair response hooks
//! - [`render`]: draws sprites and hands changed frames to a sink

pub mod collision;
pub mod movement;
pub mod render;

pub use collision::{check_collision, Collision, CollisionSystem};
pub use movement::MovementSystem;
pub use render::RenderSystem;
