//! Two-player Pong built from world components and the stock systems.
//!
//! Game-specific rules (paddle control, wall bounces, scoring) live here; the
//! engine only supplies movement, collision detection and rendering.

use anyhow::Result;

use crate::core::{Collider, Dimension, Entity, Position, Sprite, Velocity, World};
use crate::engine::{Collision, CollisionSystem, MovementSystem, RenderSystem};
use crate::input::InputManager;
use crate::term::Renderer;
use crate::types::Rgb;

pub const PADDLE_HEIGHT: f32 = 4.0;
/// Paddle speed in cells per second.
pub const PADDLE_SPEED: f32 = 24.0;
/// Initial horizontal ball speed in cells per second.
pub const BALL_SPEED_X: f32 = 20.0;
pub const BALL_SPEED_Y: f32 = 8.0;

/// Logical key names the game reads.
pub const P1_UP: &str = "p1_up";
pub const P1_DOWN: &str = "p1_down";
pub const P2_UP: &str = "p2_up";
pub const P2_DOWN: &str = "p2_down";
pub const QUIT_GAME: &str = "quit_game";

/// Default raw key bindings: W/S for the left paddle, arrows for the right.
pub fn bind_keys(input: &mut InputManager) {
    input.map_key("w", P1_UP);
    input.map_key("s", P1_DOWN);
    input.map_key("up", P2_UP);
    input.map_key("down", P2_DOWN);
    input.map_key("q", QUIT_GAME);
}

pub struct Pong {
    pub world: World,
    pub left: Entity,
    pub right: Entity,
    pub ball: Entity,
    pub score: (u32, u32),
    width: f32,
    height: f32,
    render: RenderSystem,
}

impl Pong {
    /// Lay out paddles and ball on a `width × height` court.
    ///
    /// Row 0 and the last row are walls (drawn by the HUD).
    pub fn new(width: u16, height: u16) -> Self {
        let (w, h) = (width as f32, height as f32);
        let mut world = World::new();
        let paddle_y = ((h - PADDLE_HEIGHT) / 2.0).floor();

        let left = spawn_paddle(&mut world, 2.0, paddle_y);
        let right = spawn_paddle(&mut world, (w - 3.0).max(0.0), paddle_y);

        let ball = world.create_entity();
        world.insert(ball, Position::new((w / 2.0).floor(), (h / 2.0).floor()));
        world.insert(ball, Velocity::new(BALL_SPEED_X, BALL_SPEED_Y));
        world.insert(ball, Dimension::new(1.0, 1.0));
        world.insert(ball, Collider::default());
        world.insert(ball, Sprite::new('●', Rgb::YELLOW));

        Self {
            world,
            left,
            right,
            ball,
            score: (0, 0),
            width: w,
            height: h,
            render: RenderSystem::new(),
        }
    }

    /// One fixed simulation step.
    pub fn fixed_update(&mut self, input: &InputManager, frame_ms: f64) -> Result<()> {
        self.steer(self.left, input.is_key_pressed(P1_UP), input.is_key_pressed(P1_DOWN));
        self.steer(self.right, input.is_key_pressed(P2_UP), input.is_key_pressed(P2_DOWN));

        MovementSystem.update(&mut self.world, frame_ms);

        self.clamp_paddle(self.left);
        self.clamp_paddle(self.right);
        self.bounce_off_walls();

        let (left, ball) = (self.left, self.ball);
        CollisionSystem.update(&mut self.world, |world, hit| {
            bounce_off_paddle(world, hit, ball, left);
            Ok(())
        })?;

        self.check_score();
        Ok(())
    }

    /// Draw sprites, court walls, score and FPS. Does not flip.
    pub fn draw(&self, renderer: &mut Renderer, interpolation: f64, fps: u32) {
        self.render.draw(&self.world, renderer, interpolation);

        let w = renderer.width();
        let bottom = renderer.height().saturating_sub(1) as f32;
        for x in 0..w {
            renderer.draw_char(x as f32, 0.0, '─', Rgb::GRAY);
            renderer.draw_char(x as f32, bottom, '─', Rgb::GRAY);
        }

        let score = format!(" {}  {} ", self.score.0, self.score.1);
        let x = (w as f32 - score.chars().count() as f32) / 2.0;
        renderer.draw_string(x, 0.0, &score, Rgb::WHITE);
        renderer.draw_string(1.0, bottom, &format!(" {fps} fps "), Rgb::GRAY);
    }

    fn steer(&mut self, paddle: Entity, up: bool, down: bool) {
        let vy = match (up, down) {
            (true, false) => -PADDLE_SPEED,
            (false, true) => PADDLE_SPEED,
            _ => 0.0,
        };
        if let Some(v) = self.world.get_mut::<Velocity>(paddle) {
            v.y = vy;
        }
    }

    fn clamp_paddle(&mut self, paddle: Entity) {
        let max_y = (self.height - 1.0 - PADDLE_HEIGHT).max(1.0);
        if let Some(p) = self.world.get_mut::<Position>(paddle) {
            p.y = p.y.clamp(1.0, max_y);
        }
    }

    fn bounce_off_walls(&mut self) {
        let floor = self.height - 2.0;
        let Some(pos) = self.world.get::<Position>(self.ball).copied() else {
            return;
        };
        let Some(v) = self.world.get_mut::<Velocity>(self.ball) else {
            return;
        };
        if pos.y < 1.0 {
            v.y = v.y.abs();
        } else if pos.y > floor {
            v.y = -v.y.abs();
        }
    }

    fn check_score(&mut self) {
        let Some(pos) = self.world.get::<Position>(self.ball).copied() else {
            return;
        };
        let serve_dir = if pos.x < 0.0 {
            self.score.1 += 1;
            1.0
        } else if pos.x >= self.width {
            self.score.0 += 1;
            -1.0
        } else {
            return;
        };

        let center = Position::new((self.width / 2.0).floor(), (self.height / 2.0).floor());
        self.world.insert(self.ball, center);
        self.world
            .insert(self.ball, Velocity::new(BALL_SPEED_X * serve_dir, BALL_SPEED_Y));
    }
}

fn spawn_paddle(world: &mut World, x: f32, y: f32) -> Entity {
    let paddle = world.create_entity();
    world.insert(paddle, Position::new(x, y));
    world.insert(paddle, Velocity::new(0.0, 0.0));
    world.insert(paddle, Dimension::new(1.0, PADDLE_HEIGHT));
    world.insert(paddle, Collider::default());
    world.insert(paddle, Sprite::new('█', Rgb::BLUE));
    paddle
}

/// Send the ball away from whichever paddle it hit.
fn bounce_off_paddle(world: &mut World, hit: Collision, ball: Entity, left: Entity) {
    let Some(paddle) = hit.other(ball) else {
        return;
    };
    let away = if paddle == left { 1.0 } else { -1.0 };
    if let Some(v) = world.get_mut::<Velocity>(ball) {
        v.x = v.x.abs() * away;
    }
}
