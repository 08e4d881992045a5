//! Framebuffer and cell types for terminal rendering.

use crate::types::Rgb;

/// Foreground color used for blank cells.
pub const DEFAULT_COLOR: Rgb = Rgb::GRAY;

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Rgb,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        color: DEFAULT_COLOR,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// 2D grid of colored character cells, row-major.
///
/// The size is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Cells of row `y`, or an empty slice when out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = (y as usize) * (self.width as usize);
        &self.cells[start..start + self.width as usize]
    }

    /// Row `y` as plain text (colors dropped).
    pub fn line(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    /// Overwrite this buffer with `other`, reusing the allocation.
    ///
    /// Both buffers must share dimensions; mismatched sizes are ignored.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        if self.width == other.width && self.height == other.height {
            self.cells.copy_from_slice(&other.cells);
        }
    }
}
