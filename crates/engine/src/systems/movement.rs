//! Movement: integrate velocity into position.

use crate::core::{ComponentKind, Position, Velocity, World};

/// `position += velocity × dt`, velocity in cells per second and `dt` in
/// milliseconds. Positions are not clamped; boundaries are game logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn update(&self, world: &mut World, dt_ms: f64) {
        let dt_s = (dt_ms / 1000.0) as f32;
        for entity in world.query(&[ComponentKind::Position, ComponentKind::Velocity]) {
            let Some(velocity) = world.get::<Velocity>(entity).copied() else {
                continue;
            };
            if let Some(position) = world.get_mut::<Position>(entity) {
                position.x += velocity.x * dt_s;
                position.y += velocity.y * dt_s;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_only_entities_with_velocity() {
        let mut world = World::new();
        let mover = world.create_entity();
        world.insert(mover, Position::new(0.0, 10.0));
        world.insert(mover, Velocity::new(10.0, -4.0));
        let still = world.create_entity();
        world.insert(still, Position::new(3.0, 3.0));

        MovementSystem.update(&mut world, 500.0);

        assert_eq!(world.get::<Position>(mover), Some(&Position::new(5.0, 8.0)));
        assert_eq!(world.get::<Position>(still), Some(&Position::new(3.0, 3.0)));
    }
}
