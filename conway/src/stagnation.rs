// stagnation.rs - Fixed point and cycle detection

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

/// Cell-by-cell equality. Grids of different dimensions are never equal.
pub fn grids_equal(a: &Grid, b: &Grid) -> bool {
    a.width() == b.width() && a.height() == b.height() && a.cells() == b.cells()
}

pub fn fingerprint(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}

/// Remembers the fingerprints of the last few generations so an oscillating
/// field can be reported.
///
/// Detection is advisory: the simulation keeps running through cycles and
/// only halts on a fixed point.
#[derive(Clone, Debug)]
pub struct CycleDetector {
    capacity: usize,
    history: VecDeque<u64>,
}

impl CycleDetector {
    /// A capacity of 0 disables detection.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity),
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Record `grid` and return the period if it repeats a remembered
    /// generation.
    pub fn observe(&mut self, grid: &Grid) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }
        let hash = fingerprint(grid);
        let period = self
            .history
            .iter()
            .rev()
            .position(|&h| h == hash)
            .map(|distance| distance + 1);

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(hash);
        period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::next_generation;

    #[test]
    fn equal_requires_matching_dimensions() {
        let a = Grid::new(4, 2).unwrap();
        let b = Grid::new(2, 4).unwrap();
        assert!(!grids_equal(&a, &b));
        assert!(grids_equal(&a, &a.clone_empty()));
    }

    #[test]
    fn single_difference_breaks_equality() {
        let a = Grid::new(3, 3).unwrap();
        let mut b = a.clone();
        b.toggle(2, 2);
        assert!(!grids_equal(&a, &b));
    }

    #[test]
    fn blinker_reports_period_two() {
        let mut detector = CycleDetector::new(10);
        let mut grid = Grid::from_live_cells(5, 5, &[(1, 2), (2, 2), (3, 2)]).unwrap();
        assert_eq!(detector.observe(&grid), None);
        grid = next_generation(&grid).grid;
        assert_eq!(detector.observe(&grid), None);
        grid = next_generation(&grid).grid;
        assert_eq!(detector.observe(&grid), Some(2));
    }

    #[test]
    fn history_is_bounded() {
        let mut detector = CycleDetector::new(1);
        let a = Grid::new(2, 2).unwrap();
        let mut b = a.clone();
        b.toggle(0, 0);
        detector.observe(&a);
        detector.observe(&b);
        assert_eq!(detector.observe(&a), None);
    }

    #[test]
    fn zero_capacity_disables() {
        let mut detector = CycleDetector::new(0);
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(detector.observe(&grid), None);
        assert_eq!(detector.observe(&grid), None);
    }
}
