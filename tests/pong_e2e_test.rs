//! End-to-end: a Pong court driven through the engine and the stock systems

use std::time::{Duration, Instant};

use tui_arcade::core::{Collider, Dimension, Entity, Position, Sprite, Velocity, World};
use tui_arcade::engine::{
    Collision, CollisionSystem, EngineEvent, EngineEventKind, GameEngine, MovementSystem,
    RenderSystem,
};
use tui_arcade::term::{Frame, Renderer};
use tui_arcade::types::Rgb;

struct Court {
    world: World,
    left: Entity,
    right: Entity,
    ball: Entity,
}

fn body(world: &mut World, x: f32, y: f32, vx: f32, w: f32, h: f32, glyph: char) -> Entity {
    let e = world.create_entity();
    world.insert(e, Position::new(x, y));
    world.insert(e, Velocity::new(vx, 0.0));
    world.insert(e, Dimension::new(w, h));
    world.insert(e, Collider::default());
    world.insert(e, Sprite::new(glyph, Rgb::WHITE));
    e
}

fn court() -> Court {
    let mut world = World::new();
    let left = body(&mut world, 1.0, 8.0, 0.0, 1.0, 4.0, '|');
    let right = body(&mut world, 78.0, 8.0, 0.0, 1.0, 4.0, '|');
    let ball = body(&mut world, 40.0, 10.0, 20.0, 1.0, 1.0, 'o');
    Court {
        world,
        left,
        right,
        ball,
    }
}

#[test]
fn test_ball_moves_velocity_times_one_second() {
    let mut c = court();
    let x0 = c.world.get::<Position>(c.ball).unwrap().x;

    MovementSystem.update(&mut c.world, 1000.0);

    let x = c.world.get::<Position>(c.ball).unwrap().x;
    assert!((x - (x0 + 20.0)).abs() < 1e-4);
    // Paddles have zero velocity.
    assert_eq!(c.world.get::<Position>(c.left).unwrap().x, 1.0);
}

#[test]
fn test_sixty_fixed_steps_equal_one_second() {
    let mut c = court();
    let x0 = c.world.get::<Position>(c.ball).unwrap().x;

    let mut engine: GameEngine<World> = GameEngine::new(60);
    engine.on(EngineEventKind::FixedUpdate, |world: &mut World, event| {
        if let EngineEvent::FixedUpdate { frame_ms } = *event {
            MovementSystem.update(world, frame_ms);
        }
        Ok(())
    });

    let t0 = Instant::now();
    engine.start_at(&mut c.world, t0).unwrap();
    for i in 1..=20 {
        engine
            .tick(&mut c.world, t0 + Duration::from_millis(50 * i))
            .unwrap();
    }

    assert_eq!(engine.fixed_steps(), 60);
    let x = c.world.get::<Position>(c.ball).unwrap().x;
    assert!((x - (x0 + 20.0)).abs() < 1e-3);
}

#[test]
fn test_overlap_reported_exactly_once() {
    let mut c = court();
    assert!(CollisionSystem.detect(&c.world).is_empty());

    // Push the ball into the right paddle.
    c.world.insert(c.ball, Position::new(77.5, 9.0));

    let mut hits: Vec<Collision> = Vec::new();
    let n = CollisionSystem
        .update(&mut c.world, |_, hit| {
            hits.push(hit);
            Ok(())
        })
        .unwrap();

    assert_eq!(n, 1);
    assert_eq!(hits.len(), 1);
    assert!(hits[0].involves(c.ball));
    assert!(hits[0].involves(c.right));
    assert!(hits[0].a < hits[0].b);
}

#[test]
fn test_ball_touching_paddle_edge_is_not_a_hit() {
    let mut c = court();
    c.world.insert(c.ball, Position::new(77.0, 9.0));
    assert!(CollisionSystem.detect(&c.world).is_empty());
}

#[test]
fn test_render_pass_emits_changed_frames_only() {
    let mut c = court();
    let mut renderer = Renderer::new(80, 20);
    let mut sink: Vec<Frame> = Vec::new();
    let render = RenderSystem::new();

    assert!(render.update(&c.world, &mut renderer, 0.0, &mut sink).unwrap());
    assert!(!render.update(&c.world, &mut renderer, 0.0, &mut sink).unwrap());

    MovementSystem.update(&mut c.world, 100.0);
    assert!(render.update(&c.world, &mut renderer, 0.0, &mut sink).unwrap());

    assert_eq!(sink.len(), 2);
    let last = &sink[1];
    assert_eq!(last.changed_rows(), vec![10]);
    assert_eq!(last.lines[10].chars().nth(42), Some('o'));
    assert_eq!(last.lines[8].chars().nth(1), Some('|'));
}
