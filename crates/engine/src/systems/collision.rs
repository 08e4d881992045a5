//! Collision: pairwise axis-aligned bounding-box checks.

use anyhow::Result;

use crate::core::{Collider, ComponentKind, Dimension, Entity, Position, World};

/// Overlap test with open far edges: boxes that only share an edge do not
/// collide.
pub fn check_collision(
    pos_a: &Position,
    dim_a: &Dimension,
    pos_b: &Position,
    dim_b: &Dimension,
) -> bool {
    pos_a.x < pos_b.x + dim_b.width
        && pos_a.x + dim_a.width > pos_b.x
        && pos_a.y < pos_b.y + dim_b.height
        && pos_a.y + dim_a.height > pos_b.y
}

/// An overlapping pair, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collision {
    pub a: Entity,
    pub b: Entity,
}

impl Collision {
    /// The other party of the pair, if `entity` is one of them.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if entity == self.a {
            Some(self.b)
        } else if entity == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn involves(&self, entity: Entity) -> bool {
        self.a == entity || self.b == entity
    }
}

/// O(n²) scan over entities with position, dimension and an active collider.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionSystem;

impl CollisionSystem {
    /// Every overlapping pair, each reported once, ordered by `(a, b)`.
    pub fn detect(&self, world: &World) -> Vec<Collision> {
        let boxes: Vec<(Entity, Position, Dimension)> = world
            .query(&[
                ComponentKind::Position,
                ComponentKind::Dimension,
                ComponentKind::Collider,
            ])
            .into_iter()
            .filter(|&e| world.get::<Collider>(e).is_some_and(|c| c.active))
            .filter_map(|e| Some((e, *world.get::<Position>(e)?, *world.get::<Dimension>(e)?)))
            .collect();

        let mut hits = Vec::new();
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                let (a, pos_a, dim_a) = &boxes[i];
                let (b, pos_b, dim_b) = &boxes[j];
                if check_collision(pos_a, dim_a, pos_b, dim_b) {
                    hits.push(Collision { a: *a, b: *b });
                }
            }
        }
        hits
    }

    /// Detect overlaps, then call `on_collision` once per pair.
    ///
    /// Pairs are computed before any response runs, so a response that moves
    /// an entity does not change which pairs this pass reports. Returns the
    /// number of pairs.
    pub fn update<F>(&self, world: &mut World, mut on_collision: F) -> Result<usize>
    where
        F: FnMut(&mut World, Collision) -> Result<()>,
    {
        let hits = self.detect(world);
        for &hit in &hits {
            on_collision(world, hit)?;
        }
        Ok(hits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(world: &mut World, x: f32, y: f32, w: f32, h: f32) -> Entity {
        let e = world.create_entity();
        world.insert(e, Position::new(x, y));
        world.insert(e, Dimension::new(w, h));
        world.insert(e, Collider::default());
        e
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let d = Dimension::new(10.0, 10.0);
        assert!(!check_collision(&Position::new(0.0, 0.0), &d, &Position::new(10.0, 0.0), &d));
        assert!(check_collision(&Position::new(0.0, 0.0), &d, &Position::new(9.0, 0.0), &d));
        assert!(!check_collision(&Position::new(0.0, 0.0), &d, &Position::new(0.0, 10.0), &d));
    }

    #[test]
    fn inactive_colliders_are_skipped() {
        let mut world = World::new();
        let a = boxed(&mut world, 0.0, 0.0, 2.0, 2.0);
        let b = boxed(&mut world, 1.0, 1.0, 2.0, 2.0);
        assert_eq!(CollisionSystem.detect(&world), vec![Collision { a, b }]);

        world.insert(b, Collider { active: false });
        assert!(CollisionSystem.detect(&world).is_empty());
    }

    #[test]
    fn each_pair_reported_once() {
        let mut world = World::new();
        let a = boxed(&mut world, 0.0, 0.0, 5.0, 5.0);
        let b = boxed(&mut world, 1.0, 1.0, 5.0, 5.0);
        let c = boxed(&mut world, 2.0, 2.0, 5.0, 5.0);

        let mut seen = Vec::new();
        let n = CollisionSystem
            .update(&mut world, |_, hit| {
                seen.push(hit);
                Ok(())
            })
            .unwrap();

        assert_eq!(n, 3);
        assert_eq!(
            seen,
            vec![
                Collision { a, b },
                Collision { a, b: c },
                Collision { a: b, b: c }
            ]
        );
        assert_eq!(seen[0].other(a), Some(b));
    }
}
