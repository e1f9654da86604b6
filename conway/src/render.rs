// render.rs - Renderer contract and canvas drawing commands

use crate::error::LifeError;
use crate::grid::Grid;

/// Draws a grid snapshot. Implementations must not feed anything back into
/// the simulation.
pub trait Renderer {
    fn render(&mut self, grid: &Grid);
}

/// Maps between cell coordinates and canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    cell_size: f32,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self { cell_size: 10.0 }
    }
}

impl CellLayout {
    pub fn new(cell_size: f32) -> Result<Self, LifeError> {
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(LifeError::InvalidCellSize(cell_size));
        }
        Ok(Self { cell_size })
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Canvas size in pixels for `grid`.
    pub fn canvas_size(&self, grid: &Grid) -> (f32, f32) {
        (
            grid.width() as f32 * self.cell_size,
            grid.height() as f32 * self.cell_size,
        )
    }

    /// Cell under a pointer position relative to the canvas origin. The
    /// result may lie outside the field; range checks happen on toggle.
    pub fn cell_at(&self, px: f32, py: f32) -> (i64, i64) {
        (
            (px / self.cell_size).floor() as i64,
            (py / self.cell_size).floor() as i64,
        )
    }
}

/// One canvas operation in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    /// A live cell.
    FillRect { x: f32, y: f32, size: f32 },
    /// A gridline.
    Line { from: (f32, f32), to: (f32, f32) },
}

/// The full frame for `grid`: clear, one filled unit per live cell, then
/// `width + 1` vertical and `height + 1` horizontal gridlines.
pub fn draw_commands(grid: &Grid, layout: &CellLayout) -> Vec<DrawCommand> {
    let size = layout.cell_size();
    let (canvas_w, canvas_h) = layout.canvas_size(grid);
    let mut commands = Vec::with_capacity(1 + grid.population() + grid.width() + grid.height() + 2);

    commands.push(DrawCommand::Clear {
        width: canvas_w,
        height: canvas_h,
    });
    for (x, y) in grid.live_cells() {
        commands.push(DrawCommand::FillRect {
            x: x as f32 * size,
            y: y as f32 * size,
            size,
        });
    }
    for col in 0..=grid.width() {
        let x = col as f32 * size;
        commands.push(DrawCommand::Line {
            from: (x, 0.0),
            to: (x, canvas_h),
        });
    }
    for row in 0..=grid.height() {
        let y = row as f32 * size;
        commands.push(DrawCommand::Line {
            from: (0.0, y),
            to: (canvas_w, y),
        });
    }
    commands
}

/// Keeps the command list of the last rendered frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    layout: CellLayout,
    frames: usize,
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new(layout: CellLayout) -> Self {
        Self {
            layout,
            frames: 0,
            commands: Vec::new(),
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Pixel origins of the filled units in the last frame.
    pub fn filled_units(&self) -> Vec<(f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, grid: &Grid) {
        self.commands = draw_commands(grid, &self.layout);
        self.frames += 1;
    }
}

/// Renders a grid as lines of text, one character per cell.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    live: char,
    dead: char,
    frame: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new('█', '·')
    }
}

impl TextRenderer {
    pub fn new(live: char, dead: char) -> Self {
        Self {
            live,
            dead,
            frame: String::new(),
        }
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, grid: &Grid) {
        self.frame.clear();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                self.frame.push(if grid.is_alive(x, y) { self.live } else { self.dead });
            }
            self.frame.push('\n');
        }
    }
}
