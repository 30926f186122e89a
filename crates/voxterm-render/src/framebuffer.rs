//! Character framebuffer with a per-cell depth buffer.

use voxterm_core::{Error, Result, TermColor};

/// One screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: TermColor,
    pub bg: TermColor,
}

impl Cell {
    /// The cleared cell: blank, white on black.
    pub const BLANK: Self = Self {
        glyph: ' ',
        fg: TermColor::WHITE,
        bg: TermColor::BLACK,
    };

    /// Create a new cell.
    pub const fn new(glyph: char, fg: TermColor, bg: TermColor) -> Self {
        Self { glyph, fg, bg }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major grid of cells plus the hit distance drawn into each one.
///
/// All drawing is clipped; writes outside the buffer are ignored.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Create a new cleared framebuffer.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let len = usize::from(width) * usize::from(height);
        let mut cells = Vec::new();
        let mut depth = Vec::new();
        cells
            .try_reserve_exact(len)
            .and_then(|()| depth.try_reserve_exact(len))
            .map_err(|e| Error::Allocation(format!("{width}x{height} framebuffer: {e}")))?;
        cells.resize(len, Cell::BLANK);
        depth.resize(len, f32::INFINITY);
        Ok(Self {
            width,
            height,
            cells,
            depth,
        })
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Reallocate for a new size. Contents are cleared.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Reset every cell to blank and every depth to infinity.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.depth.fill(f32::INFINITY);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_bounds =
            x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height);
        in_bounds.then(|| y as usize * usize::from(self.width) + x as usize)
    }

    /// Cell at `(x, y)`, if inside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Depth recorded at `(x, y)`, if inside the buffer.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Write one cell without touching depth.
    pub fn set_pixel(&mut self, x: i32, y: i32, glyph: char, fg: TermColor, bg: TermColor) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell::new(glyph, fg, bg);
        }
    }

    /// Write a cell only if `depth` is strictly nearer than what is there.
    pub fn set_pixel_depth(&mut self, x: i32, y: i32, cell: Cell, depth: f32) -> bool {
        match self.index(x, y) {
            Some(i) if depth < self.depth[i] => {
                self.cells[i] = cell;
                self.depth[i] = depth;
                true
            }
            _ => false,
        }
    }

    /// Draw `text` left to right starting at `(x, y)` on a black background.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: TermColor) {
        for (i, glyph) in text.chars().enumerate() {
            self.set_pixel(x + i as i32, y, glyph, fg, TermColor::BLACK);
        }
    }

    /// Draw the outline of a `w x h` rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        glyph: char,
        fg: TermColor,
        bg: TermColor,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        for i in x..x + w {
            self.set_pixel(i, y, glyph, fg, bg);
            self.set_pixel(i, y + h - 1, glyph, fg, bg);
        }
        for j in y..y + h {
            self.set_pixel(x, j, glyph, fg, bg);
            self.set_pixel(x + w - 1, j, glyph, fg, bg);
        }
    }

    /// Fill a `w x h` rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        glyph: char,
        fg: TermColor,
        bg: TermColor,
    ) {
        for j in y..y + h {
            for i in x..x + w {
                self.set_pixel(i, j, glyph, fg, bg);
            }
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable rows of `(cells, depth)`, one pair per screen row.
    pub(crate) fn rows_mut(
        &mut self,
    ) -> impl rayon::iter::IndexedParallelIterator<Item = (&mut [Cell], &mut [f32])> {
        use rayon::prelude::*;
        let row = usize::from(self.width).max(1);
        self.cells
            .par_chunks_mut(row)
            .zip(self.depth.par_chunks_mut(row))
    }
}
