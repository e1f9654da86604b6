//! Conway's Game of Life on a toroidal grid.
//!
//! The engine ([`Grid`], [`next_generation`], stagnation detection) is pure;
//! [`Simulation`] wraps it in a run/stop state machine driven by a host
//! [`FrameScheduler`]. Drawing and user input stay with the host through the
//! [`Renderer`] trait and [`Intent`] dispatch.

pub mod config;
pub mod controls;
pub mod error;
pub mod grid;
pub mod render;
pub mod rules;
pub mod scheduler;
pub mod simulation;
pub mod stagnation;

pub use config::LifeConfig;
pub use controls::ControlsView;
pub use error::{ConfigError, LifeError};
pub use grid::Grid;
pub use render::{CellLayout, DrawCommand, Renderer};
pub use rules::{Generation, next_generation};
pub use scheduler::{FrameHandle, FrameScheduler, IntervalScheduler, ManualScheduler};
pub use simulation::{Intent, RunState, SimEvent, Simulation, SimulationState};
pub use stagnation::{CycleDetector, grids_equal};
