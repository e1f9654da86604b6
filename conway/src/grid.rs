// grid.rs - Toroidal grid for Conway's Game of Life

use rand::Rng;

use crate::error::LifeError;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Probability of a cell starting alive when seeding randomly.
pub const DEFAULT_SEED_DENSITY: f64 = 0.6;

/// Largest field accepted, in cells (4096x4096).
pub const MAX_CELLS: usize = 1 << 24;

/// Row-major cell matrix whose edges wrap around.
///
/// Every cell holds [`DEAD`] or [`ALIVE`] and `cells.len() == width * height`
/// at all times. Coordinates passed to [`Grid::get`], [`Grid::set`] and
/// [`Grid::toggle`] must already be in range; wrap them with
/// [`Grid::neighbors`] or validate them with [`Grid::contains`] first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Allocate a zero-filled grid.
    pub fn new(width: usize, height: usize) -> Result<Self, LifeError> {
        let too_large = width.checked_mul(height).is_none_or(|cells| cells > MAX_CELLS);
        if width == 0 || height == 0 || too_large {
            return Err(LifeError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![DEAD; width * height],
        })
    }

    /// Build a grid with exactly the listed cells alive. Out-of-range
    /// coordinates are wrapped onto the torus.
    pub fn from_live_cells(
        width: usize,
        height: usize,
        live: &[(usize, usize)],
    ) -> Result<Self, LifeError> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in live {
            grid.set(x % width, y % height, true);
        }
        Ok(grid)
    }

    /// Zero-filled grid with the same dimensions, used as the write target
    /// of the next generation.
    pub fn clone_empty(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![DEAD; self.cells.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside the {}x{} field",
            self.width,
            self.height
        );
        x + y * self.width
    }

    /// Whether a signed coordinate (e.g. a mapped click) lies on the field.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == ALIVE
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = if alive { ALIVE } else { DEAD };
    }

    /// Flip a single cell and return its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let alive = !self.is_alive(x, y);
        self.set(x, y, alive);
        alive
    }

    /// Set every cell alive with independent probability `density`.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            *cell = if rng.gen_bool(density) { ALIVE } else { DEAD };
        }
    }

    /// The 8 wrapped Moore neighbors of `(x, y)`, in row order, without
    /// deduplication. On a 1-wide or 1-high field some pairs repeat or share
    /// the cell's own column or row.
    pub fn neighbors(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        let left = (x + self.width - 1) % self.width;
        let right = (x + 1) % self.width;
        let up = (y + self.height - 1) % self.height;
        let down = (y + 1) % self.height;
        [
            (left, up), (x, up), (right, up),
            (left, y),           (right, y),
            (left, down), (x, down), (right, down),
        ]
    }

    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors(x, y)
            .iter()
            .map(|&(nx, ny)| self.get(nx, ny))
            .sum()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ALIVE).count()
    }

    /// Coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == ALIVE)
            .map(move |(i, _)| (i % width, i / width))
    }
}
