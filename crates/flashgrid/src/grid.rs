//! Grid layout: turns one unit quad into an R x C grid of flashing cells.
//!
//! Each frame walks the cells left to right, top to bottom, feeding the
//! per-draw uniforms (`moveX`, `moveY`, `myColor`) through a [`DrawSink`].
//! Offsets are in NDC units measured from the top-left corner of the
//! viewport, growing right (`x`) and down (`y`).

use std::fmt;

use flashgrid_engine::render::{DrawSink, UniformHandle};

/// Grid division count. Rows and columns move together.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub const fn square(n: u32) -> Self {
        Self { rows: n, cols: n }
    }

    pub fn cells(self) -> u32 {
        self.rows * self.cols
    }

    /// Adds a row and a column while `rows <= limit`, so the largest
    /// reachable size is `limit + 1`.
    pub fn grow(&mut self, limit: u32) -> bool {
        if self.rows > limit {
            return false;
        }
        self.rows += 1;
        self.cols += 1;
        true
    }

    /// Removes a row and a column while `rows > 0`.
    pub fn shrink(&mut self) -> bool {
        if self.rows == 0 {
            return false;
        }
        self.rows -= 1;
        self.cols -= 1;
        true
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Monotonic flash phase. Grows for the whole run; `tan` wraps it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorPhase(pub f32);

impl ColorPhase {
    pub fn advance(&mut self, step: f32) {
        self.0 += step;
    }

    /// Flash value of cell `i`: `tan(phase + i)`, unclamped.
    ///
    /// Values spike near the asymptotes of `tan`; that is the flashing.
    pub fn color_for(self, i: u32) -> f32 {
        (self.0 + i as f32).tan()
    }
}

/// Order in which a cell's uniforms and its draw are issued.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DrawOrder {
    /// `R*C + 1` draws; each draw's offsets are set after it, so draw `i`
    /// sits where cell `i - 1` belongs and draw 0 sits at the origin.
    #[default]
    Faithful,
    /// `R*C` draws, each with its own offsets set before it.
    Corrected,
}

/// The three per-draw uniform handles, resolved once at startup.
#[derive(Debug, Copy, Clone)]
pub struct GridUniforms {
    pub move_x: UniformHandle,
    pub move_y: UniformHandle,
    pub color: UniformHandle,
}

/// Per-frame grid layout and draw issue.
#[derive(Debug)]
pub struct GridRenderer {
    uniforms: GridUniforms,
    order: DrawOrder,
    phase_step: f32,
    phase: ColorPhase,
}

impl GridRenderer {
    pub fn new(uniforms: GridUniforms, order: DrawOrder, phase_step: f32) -> Self {
        Self {
            uniforms,
            order,
            phase_step,
            phase: ColorPhase::default(),
        }
    }

    pub fn phase(&self) -> ColorPhase {
        self.phase
    }

    pub fn order(&self) -> DrawOrder {
        self.order
    }

    /// Lays out one frame for `size` into `sink`; returns the number of draws.
    pub fn render_frame<S: DrawSink>(&mut self, size: GridSize, sink: &mut S) -> u32 {
        let GridUniforms { move_x, move_y, color } = self.uniforms;

        // A 0x0 grid still issues its one draw; a zero extent keeps it
        // degenerate instead of scaling the quad by infinity.
        let (w, h) = if size.cells() == 0 {
            (0.0, 0.0)
        } else {
            (2.0 / size.cols as f32, 2.0 / size.rows as f32)
        };
        sink.set_cell_extent(w, h);

        let mut x = 0.0f32;
        let mut y = 0.0f32;

        self.phase.advance(self.phase_step);

        let draws = match self.order {
            DrawOrder::Faithful => size.cells() + 1,
            DrawOrder::Corrected => size.cells(),
        };

        for i in 0..draws {
            // `i != 0` first: a 0x0 grid has no columns to take a modulo by.
            if i != 0 && i % size.cols == 0 {
                x = 0.0;
                y += h;
            }

            sink.set_uniform(color, self.phase.color_for(i));

            match self.order {
                DrawOrder::Faithful => {
                    sink.draw();
                    sink.set_uniform(move_x, x);
                    sink.set_uniform(move_y, y);
                }
                DrawOrder::Corrected => {
                    sink.set_uniform(move_x, x);
                    sink.set_uniform(move_y, y);
                    sink.draw();
                }
            }

            x += w;
        }

        draws
    }
}
