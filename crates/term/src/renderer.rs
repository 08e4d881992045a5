//! Renderer: double-buffered draw surface with damage tracking.
//!
//! Draw calls only touch the back buffer, so each one is O(1). Diffing happens
//! once per frame in [`Renderer::flip`], bounded by the grid size, and only the
//! changed runs of cells are handed to the output sink.

use std::ops::Range;

use tracing::trace;

use crate::fb::{Cell, FrameBuffer};
use crate::types::Rgb;

/// Glyph used for filled boxes.
pub const FILL_GLYPH: char = '█';

const BOX_TOP_LEFT: char = '┌';
const BOX_TOP_RIGHT: char = '┐';
const BOX_BOTTOM_LEFT: char = '└';
const BOX_BOTTOM_RIGHT: char = '┘';
const BOX_HORIZONTAL: char = '─';
const BOX_VERTICAL: char = '│';

/// A horizontal run of changed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub cells: Vec<Cell>,
}

/// Output of one [`Renderer::flip`] that changed something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The whole frame as text, top to bottom.
    pub lines: Vec<String>,
    /// Cells that differ from the previously emitted frame.
    pub runs: Vec<Run>,
    /// True when nothing was emitted before (or after [`Renderer::invalidate`]);
    /// `runs` then covers every row.
    pub full: bool,
}

impl Frame {
    /// Rows touched by this frame, ascending and deduplicated.
    pub fn changed_rows(&self) -> Vec<u16> {
        let mut rows: Vec<u16> = self.runs.iter().map(|r| r.y).collect();
        rows.dedup();
        rows
    }
}

/// Fixed-size character-grid renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    back: FrameBuffer,
    front: FrameBuffer,
    emitted: bool,
    frames: u64,
}

impl Renderer {
    /// Create a renderer; the size cannot change afterwards.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            back: FrameBuffer::new(width, height),
            front: FrameBuffer::new(width, height),
            emitted: false,
            frames: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.back.width()
    }

    pub fn height(&self) -> u16 {
        self.back.height()
    }

    /// The buffer being drawn.
    pub fn back(&self) -> &FrameBuffer {
        &self.back
    }

    /// The last emitted frame.
    pub fn front(&self) -> &FrameBuffer {
        &self.front
    }

    /// Number of frames emitted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Reset the back buffer to blank cells. Call once per frame before drawing.
    pub fn clear(&mut self) {
        self.back.fill(Cell::BLANK);
    }

    /// Force the next flip to emit the whole frame.
    pub fn invalidate(&mut self) {
        self.emitted = false;
    }

    pub fn draw_char(&mut self, x: f32, y: f32, ch: char, color: Rgb) {
        let (Some(cx), Some(cy)) = (to_cell(x, self.width()), to_cell(y, self.height())) else {
            return;
        };
        self.back.set(cx, cy, Cell { ch, color });
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: &str, color: Rgb) {
        let start = x.floor();
        for (i, ch) in text.chars().enumerate() {
            self.draw_char(start + i as f32, y, ch, color);
        }
    }

    /// Draw a box outline with box-drawing glyphs, or a solid block when
    /// `filled`.
    pub fn draw_box(&mut self, x: f32, y: f32, w: u16, h: u16, filled: bool, color: Rgb) {
        if filled {
            self.fill_rect(x, y, w, h, FILL_GLYPH, color);
            return;
        }

        let (x, y) = (x.floor(), y.floor());
        let cols = visible_span(x, w, self.width());
        for dy in visible_span(y, h, self.height()) {
            for dx in cols.clone() {
                let top = dy == 0;
                let bottom = dy + 1 == h;
                let left = dx == 0;
                let right = dx + 1 == w;
                let glyph = match (top, bottom, left, right) {
                    (true, _, true, _) => BOX_TOP_LEFT,
                    (true, _, _, true) => BOX_TOP_RIGHT,
                    (_, true, true, _) => BOX_BOTTOM_LEFT,
                    (_, true, _, true) => BOX_BOTTOM_RIGHT,
                    (true, _, _, _) | (_, true, _, _) => BOX_HORIZONTAL,
                    (_, _, true, _) | (_, _, _, true) => BOX_VERTICAL,
                    _ => continue,
                };
                self.draw_char(x + dx as f32, y + dy as f32, glyph, color);
            }
        }
    }

    /// Fill a rectangle with `ch`. Only the on-grid part is visited.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: u16, h: u16, ch: char, color: Rgb) {
        let (x, y) = (x.floor(), y.floor());
        let cols = visible_span(x, w, self.width());
        for dy in visible_span(y, h, self.height()) {
            for dx in cols.clone() {
                self.draw_char(x + dx as f32, y + dy as f32, ch, color);
            }
        }
    }

    /// Compare the back buffer with the last emitted frame.
    ///
    /// Returns `None` when nothing changed. Otherwise the back buffer becomes
    /// the new front buffer and the frame is returned. The first flip (and the
    /// first after [`Renderer::invalidate`]) always returns a full frame, even
    /// for a blank back buffer.
    pub fn flip(&mut self) -> Option<Frame> {
        let full = !self.emitted;
        let mut runs = Vec::new();

        if full {
            for y in 0..self.height() {
                runs.push(Run {
                    x: 0,
                    y,
                    cells: self.back.row(y).to_vec(),
                });
            }
        } else {
            let back = &self.back;
            for_each_changed_run(&self.front, back, |x, y, len| {
                let row = back.row(y);
                runs.push(Run {
                    x,
                    y,
                    cells: row[x as usize..(x + len) as usize].to_vec(),
                });
            });
            if runs.is_empty() {
                return None;
            }
        }

        self.front.copy_from(&self.back);
        self.emitted = true;
        self.frames += 1;
        trace!(runs = runs.len(), full, "frame flipped");

        let lines = (0..self.height()).map(|y| self.front.line(y)).collect();
        Some(Frame { lines, runs, full })
    }
}

/// Floor a coordinate to a cell index, rejecting anything outside `0..limit`.
fn to_cell(v: f32, limit: u16) -> Option<u16> {
    let v = v.floor();
    if !v.is_finite() || v < 0.0 || v >= limit as f32 {
        return None;
    }
    Some(v as u16)
}

/// Offsets `d` in `0..len` for which `origin + d` lands inside `0..limit`.
///
/// `origin` must already be floored.
fn visible_span(origin: f32, len: u16, limit: u16) -> Range<u16> {
    if !origin.is_finite() {
        return 0..0;
    }
    let bound = u16::MAX as f32 + 1.0;
    let origin = origin.clamp(-bound, bound) as i64;
    let start = (-origin).clamp(0, len as i64);
    let end = (limit as i64 - origin).clamp(start, len as i64);
    start as u16..end as u16
}

fn for_each_changed_run(prev: &FrameBuffer, next: &FrameBuffer, mut f: impl FnMut(u16, u16, u16)) {
    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);

        // Change cells [1..=3] into X.
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', color: Rgb::RED });
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| runs.push((x, y, len)));
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn coordinates_are_floored_and_clipped() {
        let mut r = Renderer::new(4, 2);
        r.draw_char(1.9, 0.2, 'a', Rgb::RED);
        r.draw_char(-0.5, 0.0, 'b', Rgb::RED);
        r.draw_char(4.0, 0.0, 'c', Rgb::RED);
        r.draw_char(0.0, f32::NAN, 'd', Rgb::RED);
        assert_eq!(r.back().line(0), " a  ");
        assert_eq!(r.back().line(1), "    ");
    }

    #[test]
    fn unfilled_box_uses_border_glyphs() {
        let mut r = Renderer::new(4, 3);
        r.draw_box(0.0, 0.0, 4, 3, false, Rgb::WHITE);
        assert_eq!(r.back().line(0), "┌──┐");
        assert_eq!(r.back().line(1), "│  │");
        assert_eq!(r.back().line(2), "└──┘");
    }

    #[test]
    fn first_flip_is_full_even_when_blank() {
        let mut r = Renderer::new(3, 2);
        let frame = r.flip().expect("first frame always emits");
        assert!(frame.full);
        assert_eq!(frame.runs.len(), 2);
        assert_eq!(frame.lines, vec!["   ".to_string(), "   ".to_string()]);
        assert!(r.flip().is_none());
    }

    #[test]
    fn visible_span_is_bounded_by_grid() {
        assert_eq!(visible_span(0.0, u16::MAX, 10), 0..10);
        assert_eq!(visible_span(-3.0, 5, 10), 3..5);
        assert_eq!(visible_span(8.0, 5, 10), 0..2);
        assert_eq!(visible_span(-100.0, 5, 10), 5..5);
        assert_eq!(visible_span(12.0, 5, 10), 0..0);
        assert_eq!(visible_span(-1e30, u16::MAX, 10), u16::MAX..u16::MAX);
    }

    #[test]
    fn oversized_rects_are_clipped_to_grid() {
        let mut r = Renderer::new(4, 2);
        r.fill_rect(-30000.0, -30000.0, u16::MAX, u16::MAX, '#', Rgb::RED);
        assert_eq!(r.back().line(0), "####");
        assert_eq!(r.back().line(1), "####");

        r.clear();
        r.draw_box(-1.0, 0.0, u16::MAX, 2, false, Rgb::WHITE);
        assert_eq!(r.back().line(0), "────");
        assert_eq!(r.back().line(1), "────");
    }
}
