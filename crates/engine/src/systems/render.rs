//! Render: draw sprites from the world into the renderer.

use anyhow::Result;

use crate::core::{ComponentKind, Dimension, Entity, Position, Sprite, Velocity, World};
use crate::term::{FrameSink, Renderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderSystem {
    /// Fixed step length used to extrapolate moving sprites by the
    /// interpolation fraction; `None` draws at the simulated position.
    smoothing_frame_ms: Option<f64>,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(frame_ms: f64) -> Self {
        Self {
            smoothing_frame_ms: Some(frame_ms),
        }
    }

    /// Clear the renderer and draw every entity with position and sprite.
    ///
    /// With a dimension the sprite glyph fills the whole box, otherwise a
    /// single glyph is drawn. Does not flip, so callers can overlay more
    /// drawing first.
    pub fn draw(&self, world: &World, renderer: &mut Renderer, interpolation: f64) {
        renderer.clear();

        for entity in world.query(&[ComponentKind::Position, ComponentKind::Sprite]) {
            let (Some(&pos), Some(&sprite)) =
                (world.get::<Position>(entity), world.get::<Sprite>(entity))
            else {
                continue;
            };
            let pos = self.smoothed(world, entity, pos, interpolation);

            match world.get::<Dimension>(entity) {
                Some(dim) => renderer.fill_rect(
                    pos.x,
                    pos.y,
                    cells(dim.width),
                    cells(dim.height),
                    sprite.glyph,
                    sprite.color,
                ),
                None => {
                    let mut buf = [0u8; 4];
                    let glyph = sprite.glyph.encode_utf8(&mut buf);
                    renderer.draw_string(pos.x, pos.y, glyph, sprite.color);
                }
            }
        }
    }

    /// Draw, flip, and hand any changed frame to `sink`.
    ///
    /// Returns whether a frame was emitted.
    pub fn update(
        &self,
        world: &World,
        renderer: &mut Renderer,
        interpolation: f64,
        sink: &mut dyn FrameSink,
    ) -> Result<bool> {
        self.draw(world, renderer, interpolation);
        match renderer.flip() {
            Some(frame) => {
                sink.present(&frame)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn smoothed(&self, world: &World, entity: Entity, pos: Position, interpolation: f64) -> Position {
        let (Some(frame_ms), Some(v)) = (self.smoothing_frame_ms, world.get::<Velocity>(entity))
        else {
            return pos;
        };
        let ahead = (interpolation * frame_ms / 1000.0) as f32;
        Position::new(pos.x + v.x * ahead, pos.y + v.y * ahead)
    }
}

/// Whole cells covered by an extent; any positive extent covers at least one.
fn cells(extent: f32) -> u16 {
    if !extent.is_finite() || extent <= 0.0 {
        return 0;
    }
    extent.ceil().min(u16::MAX as f32) as u16
}
