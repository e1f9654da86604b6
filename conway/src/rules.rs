// rules.rs - B3/S23 generation update

use crate::grid::Grid;

/// Result of one generation pass.
#[derive(Clone, Debug)]
pub struct Generation {
    pub grid: Grid,
    /// No cell changed: the field has reached a fixed point.
    pub unchanged: bool,
}

/// Conway's rule for a single cell.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Compute the next generation into a fresh buffer.
///
/// Neighbor counts are read only from `current`; the result is written to a
/// separate grid so no cell observes a partially updated field. Equality with
/// `current` is tracked during the same scan.
pub fn next_generation(current: &Grid) -> Generation {
    let mut next = current.clone_empty();
    let mut unchanged = true;

    for y in 0..current.height() {
        for x in 0..current.width() {
            let alive = current.is_alive(x, y);
            let next_alive = next_state(alive, current.count_alive_neighbors(x, y));
            next.set(x, y, next_alive);
            if unchanged {
                unchanged = next_alive == alive;
            }
        }
    }

    Generation {
        grid: next,
        unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn lone_cell_dies() {
        let grid = Grid::from_live_cells(5, 5, &[(2, 2)]).unwrap();
        let generation = next_generation(&grid);
        assert_eq!(generation.grid.population(), 0);
        assert!(!generation.unchanged);
    }

    #[test]
    fn empty_field_is_unchanged() {
        let grid = Grid::new(6, 4).unwrap();
        assert!(next_generation(&grid).unchanged);
    }

    #[test]
    fn reads_from_snapshot_only() {
        // An in-place scan would kill (1,1) before (2,1) and (3,1) were
        // evaluated, changing the outcome for the row below.
        let grid = Grid::from_live_cells(6, 6, &[(1, 1), (2, 1), (3, 1)]).unwrap();
        let next = next_generation(&grid).grid;
        let mut live: Vec<_> = next.live_cells().collect();
        live.sort();
        assert_eq!(live, vec![(2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn births_across_the_seam() {
        // Vertical blinker straddling the top/bottom edge.
        let grid = Grid::from_live_cells(5, 5, &[(2, 4), (2, 0), (2, 1)]).unwrap();
        let next = next_generation(&grid).grid;
        let mut live: Vec<_> = next.live_cells().collect();
        live.sort();
        assert_eq!(live, vec![(1, 0), (2, 0), (3, 0)]);
    }
}
