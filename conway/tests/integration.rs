//! Scenario tests for the Game of Life engine and simulation loop

use conway::render::RecordingRenderer;
use conway::{
    CellLayout, Grid, Intent, LifeConfig, ManualScheduler, Renderer, RunState, SimEvent,
    Simulation, grids_equal, next_generation,
};

fn sorted_live(grid: &Grid) -> Vec<(usize, usize)> {
    let mut live: Vec<_> = grid.live_cells().collect();
    live.sort();
    live
}

fn simulation(width: i64, height: i64) -> Simulation<ManualScheduler> {
    let mut config = LifeConfig::default();
    config.field.width = width;
    config.field.height = height;
    config.simulation.rng_seed = Some(2024);
    Simulation::new(&config, ManualScheduler::new()).expect("valid config")
}

fn fire(sim: &mut Simulation<ManualScheduler>) -> bool {
    match sim.scheduler_mut().take_pending() {
        Some(handle) => {
            sim.on_frame(handle);
            true
        }
        None => false,
    }
}

#[test]
fn test_glider_moves_one_phase() {
    let grid = Grid::from_live_cells(5, 5, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]).unwrap();
    let generation = next_generation(&grid);

    assert!(!generation.unchanged);
    assert_eq!(
        sorted_live(&generation.grid),
        vec![(0, 1), (1, 2), (1, 3), (2, 1), (2, 2)]
    );
}

#[test]
fn test_glider_never_stagnates_and_wraps() {
    let start = Grid::from_live_cells(8, 8, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]).unwrap();
    let mut grid = start.clone();
    for _ in 0..32 {
        let generation = next_generation(&grid);
        assert!(!generation.unchanged);
        assert!(!grids_equal(&grid, &generation.grid));
        assert_eq!(generation.grid.population(), 5);
        grid = generation.grid;
    }
    // Four generations per diagonal step, eight steps around an 8x8 torus.
    assert_eq!(grid, start);
}

#[test]
fn test_block_is_still_life() {
    let grid = Grid::from_live_cells(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]).unwrap();
    let generation = next_generation(&grid);

    assert!(generation.unchanged);
    assert!(grids_equal(&grid, &generation.grid));
}

#[test]
fn test_blinker_alternates() {
    let horizontal = vec![(1, 2), (2, 2), (3, 2)];
    let vertical = vec![(2, 1), (2, 2), (2, 3)];
    let mut grid = Grid::from_live_cells(5, 5, &horizontal).unwrap();

    for step in 0..6 {
        let generation = next_generation(&grid);
        assert!(!generation.unchanged, "blinker stagnated at step {step}");
        grid = generation.grid;
        let expected = if step % 2 == 0 { &vertical } else { &horizontal };
        assert_eq!(&sorted_live(&grid), expected);
    }
}

#[test]
fn test_toggle_then_render_draws_one_unit() {
    let mut sim = simulation(6, 4);
    let mut renderer = RecordingRenderer::new(CellLayout::default());
    renderer.render(sim.grid());
    assert!(renderer.filled_units().is_empty());

    sim.dispatch(Intent::ToggleCell { x: 3, y: 2 }).unwrap();
    assert!(sim.drain_events().contains(&SimEvent::Redraw));
    assert!(sim.state().has_changed_since_last_frame);

    renderer.render(sim.grid());
    assert_eq!(renderer.filled_units(), vec![(30.0, 20.0)]);
}

#[test]
fn test_still_life_auto_stops_after_one_frame() {
    let mut sim = simulation(6, 6);
    for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        sim.dispatch(Intent::ToggleCell { x, y }).unwrap();
    }
    sim.dispatch(Intent::Start).unwrap();
    sim.drain_events();

    assert!(fire(&mut sim));
    assert_eq!(sim.run_state(), RunState::Stopped);
    assert!(sim.scheduler().pending().is_none());

    let events = sim.drain_events();
    let ended = events
        .iter()
        .filter(|e| matches!(e, SimEvent::SimulationEnded { .. }))
        .count();
    assert_eq!(ended, 1);
    assert!(events.contains(&SimEvent::StatusChanged(RunState::Stopped)));

    assert!(!fire(&mut sim));
    assert!(sim.drain_events().is_empty());
}

#[test]
fn test_dying_pattern_runs_until_empty() {
    let mut sim = simulation(10, 10);
    // Two separated cells die in one generation, then the empty field stagnates.
    sim.dispatch(Intent::ToggleCell { x: 1, y: 1 }).unwrap();
    sim.dispatch(Intent::ToggleCell { x: 6, y: 6 }).unwrap();
    sim.dispatch(Intent::Start).unwrap();

    let mut frames = 0;
    while fire(&mut sim) {
        frames += 1;
        assert!(frames < 10);
    }
    assert_eq!(frames, 2);
    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.population(), 0);
    assert!(
        sim.drain_events()
            .contains(&SimEvent::SimulationEnded { generation: 1 })
    );
}

#[test]
fn test_random_session_is_reproducible() {
    let mut a = simulation(20, 20);
    let mut b = simulation(20, 20);
    a.dispatch(Intent::Seed).unwrap();
    b.dispatch(Intent::Seed).unwrap();
    assert_eq!(a.grid(), b.grid());

    for sim in [&mut a, &mut b] {
        sim.dispatch(Intent::Start).unwrap();
        for _ in 0..5 {
            fire(sim);
        }
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.generation(), b.generation());
}

#[test]
fn test_clear_keeps_dimensions() {
    let mut sim = simulation(9, 7);
    sim.dispatch(Intent::SetRandomReseedMode(true)).unwrap();
    sim.dispatch(Intent::Start).unwrap();
    fire(&mut sim);
    sim.dispatch(Intent::Clear).unwrap();

    assert_eq!((sim.grid().width(), sim.grid().height()), (9, 7));
    assert_eq!(sim.population(), 0);
    assert_eq!(sim.generation(), 0);
    assert!(!sim.state().is_random_reseed_mode);
    assert!(!fire(&mut sim));
}
