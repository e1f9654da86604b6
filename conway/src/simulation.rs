// simulation.rs - Run/stop state machine driving generations frame by frame

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use crate::config::{LifeConfig, validate_dimensions};
use crate::error::LifeError;
use crate::grid::Grid;
use crate::rules::{Generation, next_generation};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::stagnation::CycleDetector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Flags describing the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationState {
    pub is_running: bool,
    pub is_random_reseed_mode: bool,
    pub has_changed_since_last_frame: bool,
    pub pending_frame: Option<FrameHandle>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            is_running: false,
            is_random_reseed_mode: false,
            has_changed_since_last_frame: true,
            pending_frame: None,
        }
    }
}

impl SimulationState {
    pub fn run_state(&self) -> RunState {
        if self.is_running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}

/// Notifications for the Controls and Renderer collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    StatusChanged(RunState),
    /// The grid differs from what was last drawn.
    Redraw,
    /// Auto-stop: the field reached a fixed point outside random reseed mode.
    SimulationEnded { generation: u64 },
    Reseeded,
    CycleDetected { period: usize },
}

/// User intents accepted from the Controls surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    Initialize { width: i64, height: i64 },
    Start,
    Stop,
    /// Start when stopped, stop when running.
    ToggleRun,
    Step,
    Clear,
    Seed,
    ToggleCell { x: i64, y: i64 },
    SetRandomReseedMode(bool),
}

/// One field session: the grid, its run state and the frame it is waiting on.
pub struct Simulation<S: FrameScheduler> {
    grid: Grid,
    state: SimulationState,
    scheduler: S,
    rng: StdRng,
    seed_density: f64,
    generation: u64,
    cycles: CycleDetector,
    reported_cycle: bool,
    events: VecDeque<SimEvent>,
}

impl<S: FrameScheduler> Simulation<S> {
    pub fn new(config: &LifeConfig, scheduler: S) -> Result<Self, LifeError> {
        let (width, height) = validate_dimensions(config.field.width, config.field.height)?;
        let density = config.simulation.seed_density;
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density));
        }
        let rng = match config.simulation.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            grid: Grid::new(width, height)?,
            state: SimulationState::default(),
            scheduler,
            rng,
            seed_density: density,
            generation: 0,
            cycles: CycleDetector::new(config.simulation.cycle_history),
            reported_cycle: false,
            events: VecDeque::new(),
        };
        if config.simulation.random_reseed {
            sim.set_random_reseed_mode(true);
        }
        sim.events.push_back(SimEvent::Redraw);
        Ok(sim)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Take all notifications emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain(..).collect()
    }

    /// Single entry point for the Controls surface.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), LifeError> {
        debug!(?intent, state = ?self.run_state(), "dispatch");
        match intent {
            Intent::Initialize { width, height } => self.initialize(width, height)?,
            Intent::Start => self.start(),
            Intent::Stop => self.stop(),
            Intent::ToggleRun => match self.run_state() {
                RunState::Stopped => self.start(),
                RunState::Running => self.stop(),
            },
            Intent::Step => {
                self.step();
            }
            Intent::Clear => self.clear(),
            Intent::Seed => self.seed_random(),
            Intent::ToggleCell { x, y } => {
                self.toggle_cell(x, y)?;
            }
            Intent::SetRandomReseedMode(enabled) => self.set_random_reseed_mode(enabled),
        }
        Ok(())
    }

    /// Replace the field with an empty one of the given size.
    ///
    /// Invalid dimensions are rejected before anything is touched.
    pub fn initialize(&mut self, width: i64, height: i64) -> Result<(), LifeError> {
        let (width, height) = validate_dimensions(width, height).inspect_err(|err| {
            warn!(%err, "rejected field dimensions");
        })?;
        let grid = Grid::new(width, height)?;
        self.halt();
        self.grid = grid;
        self.reset_session();
        debug!(width, height, "field initialized");
        Ok(())
    }

    pub fn start(&mut self) {
        if let Some(stale) = self.state.pending_frame.take() {
            self.scheduler.cancel_frame(stale);
        }
        let was_running = self.state.is_running;
        self.state.is_running = true;
        self.state.pending_frame = Some(self.scheduler.request_frame());
        if !was_running {
            debug!(generation = self.generation, "simulation started");
            self.events.push_back(SimEvent::StatusChanged(RunState::Running));
        }
    }

    pub fn stop(&mut self) {
        if self.halt() {
            debug!(generation = self.generation, "simulation stopped");
        }
    }

    /// Process a fired frame. Frames other than the pending one are stale
    /// and ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if !self.state.is_running || self.state.pending_frame != Some(handle) {
            trace!(frame = handle.id(), "ignoring stale frame");
            return;
        }
        self.state.pending_frame = None;

        if self.grid.is_empty() && !self.state.is_random_reseed_mode {
            self.auto_stop();
            return;
        }

        let Generation { grid, unchanged } = next_generation(&self.grid);
        if unchanged {
            self.state.has_changed_since_last_frame = false;
            if self.state.is_random_reseed_mode {
                info!(generation = self.generation, "field stabilized, reseeding");
                self.seed_random();
                // The fresh field advances within the same frame.
                let Generation { grid, unchanged } = next_generation(&self.grid);
                if unchanged {
                    self.state.has_changed_since_last_frame = false;
                } else {
                    self.commit(grid);
                }
            } else {
                self.auto_stop();
                return;
            }
        } else {
            self.commit(grid);
        }

        trace!(generation = self.generation, "frame processed");
        self.state.pending_frame = Some(self.scheduler.request_frame());
    }

    /// Advance one generation while stopped. Returns whether the field
    /// changed.
    pub fn step(&mut self) -> bool {
        if self.state.is_running {
            return false;
        }
        let Generation { grid, unchanged } = next_generation(&self.grid);
        if unchanged {
            self.state.has_changed_since_last_frame = false;
            return false;
        }
        self.commit(grid);
        true
    }

    /// Stop and empty the field, keeping its dimensions.
    pub fn clear(&mut self) {
        self.halt();
        self.grid = self.grid.clone_empty();
        self.reset_session();
        debug!("field cleared");
    }

    pub fn seed_random(&mut self) {
        self.grid.seed_random(&mut self.rng, self.seed_density);
        self.generation = 0;
        self.cycles.reset();
        self.reported_cycle = false;
        self.state.has_changed_since_last_frame = true;
        self.events.push_back(SimEvent::Reseeded);
        self.events.push_back(SimEvent::Redraw);
    }

    /// Flip one cell. Coordinates outside the field are rejected without
    /// touching the grid.
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> Result<bool, LifeError> {
        if !self.grid.contains(x, y) {
            warn!(x, y, "toggle outside the field ignored");
            return Err(LifeError::OutOfRangeToggle {
                x,
                y,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }
        let alive = self.grid.toggle(x as usize, y as usize);
        self.state.has_changed_since_last_frame = true;
        self.cycles.reset();
        self.reported_cycle = false;
        self.events.push_back(SimEvent::Redraw);
        Ok(alive)
    }

    /// While stopped, turning the mode on reseeds at once and turning it off
    /// empties the field and previews one generation. While running only the
    /// next stagnation point is affected.
    pub fn set_random_reseed_mode(&mut self, enabled: bool) {
        self.state.is_random_reseed_mode = enabled;
        debug!(enabled, "random reseed mode");
        if self.state.is_running {
            return;
        }
        if enabled {
            self.seed_random();
        } else {
            self.grid = self.grid.clone_empty();
            self.grid = next_generation(&self.grid).grid;
            self.generation = 0;
            self.cycles.reset();
            self.reported_cycle = false;
            self.state.has_changed_since_last_frame = true;
            self.events.push_back(SimEvent::Redraw);
        }
    }

    fn commit(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation += 1;
        self.state.has_changed_since_last_frame = true;
        self.events.push_back(SimEvent::Redraw);

        match self.cycles.observe(&self.grid) {
            Some(period) if !self.reported_cycle => {
                self.reported_cycle = true;
                debug!(period, generation = self.generation, "cycle detected");
                self.events.push_back(SimEvent::CycleDetected { period });
            }
            Some(_) => {}
            None => self.reported_cycle = false,
        }
    }

    fn auto_stop(&mut self) {
        info!(
            generation = self.generation,
            population = self.grid.population(),
            "field stabilized, simulation ended"
        );
        self.halt();
        self.events.push_back(SimEvent::SimulationEnded {
            generation: self.generation,
        });
    }

    /// Cancel any pending frame and enter `Stopped`. Returns whether the
    /// simulation was running.
    fn halt(&mut self) -> bool {
        if let Some(pending) = self.state.pending_frame.take() {
            self.scheduler.cancel_frame(pending);
        }
        let was_running = self.state.is_running;
        self.state.is_running = false;
        if was_running {
            self.events.push_back(SimEvent::StatusChanged(RunState::Stopped));
        }
        was_running
    }

    fn reset_session(&mut self) {
        self.state = SimulationState::default();
        self.generation = 0;
        self.cycles.reset();
        self.reported_cycle = false;
        self.events.push_back(SimEvent::Redraw);
    }
}
