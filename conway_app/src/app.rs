// app.rs - Desktop front end state: one simulation plus the controls around it

use std::time::{Duration, Instant};

use conway::controls::{initialize_intent, toggle_intent};
use conway::{
    CellLayout, ControlsView, Intent, IntervalScheduler, LifeConfig, LifeError, RunState,
    SimEvent, Simulation,
};
use egui::Color32;
use tracing::{debug, info};

pub struct Palette {
    pub live: Color32,
    pub dead: Color32,
    pub grid: Color32,
}

impl Palette {
    fn from_config(config: &LifeConfig) -> Self {
        let rgb = |c: [u8; 3]| Color32::from_rgb(c[0], c[1], c[2]);
        Self {
            live: rgb(config.render.live_color),
            dead: rgb(config.render.dead_color),
            grid: rgb(config.render.grid_color),
        }
    }
}

pub struct LifeApp {
    pub sim: Simulation<IntervalScheduler>,
    pub layout: CellLayout,
    pub palette: Palette,
    pub width_field: String,
    pub height_field: String,
    pub status: Option<String>,
}

impl LifeApp {
    pub fn new(config: &LifeConfig) -> Result<Self, LifeError> {
        let scheduler = IntervalScheduler::new(config.simulation.frame_interval());
        Ok(Self {
            sim: Simulation::new(config, scheduler)?,
            layout: CellLayout::new(config.render.cell_size)?,
            palette: Palette::from_config(config),
            width_field: config.field.width.to_string(),
            height_field: config.field.height.to_string(),
            status: None,
        })
    }

    pub fn controls(&self) -> ControlsView {
        ControlsView::from_state(self.sim.state())
    }

    /// Fire the pending frame if it is due.
    pub fn poll_frame(&mut self, now: Instant) {
        if let Some(handle) = self.sim.scheduler_mut().poll(now) {
            self.sim.on_frame(handle);
        }
    }

    /// Time until the next frame, if one is pending.
    pub fn next_frame_in(&self, now: Instant) -> Option<Duration> {
        self.sim.scheduler().time_until_due(now)
    }

    pub fn frame_interval(&self) -> Duration {
        self.sim.scheduler().interval()
    }

    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.sim.scheduler_mut().set_interval(interval);
    }

    pub fn dispatch(&mut self, intent: Intent) {
        if let Err(err) = self.sim.dispatch(intent) {
            self.status = Some(err.to_string());
        }
    }

    pub fn initialize_from_fields(&mut self) {
        match initialize_intent(&self.width_field, &self.height_field) {
            Ok(intent) => {
                self.status = None;
                self.dispatch(intent);
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Toggle the cell under a canvas-relative click. Clicks off the field
    /// are dropped.
    pub fn click(&mut self, px: f32, py: f32) {
        let intent = toggle_intent(&self.layout, px, py);
        if let Err(err) = self.sim.dispatch(intent) {
            debug!(%err, "click ignored");
        }
    }

    /// Turn simulation notifications into status text. Returns whether a
    /// repaint is needed.
    pub fn handle_events(&mut self) -> bool {
        let mut repaint = false;
        for event in self.sim.drain_events() {
            match event {
                SimEvent::Redraw => repaint = true,
                SimEvent::StatusChanged(RunState::Running) => self.status = None,
                SimEvent::StatusChanged(RunState::Stopped) => repaint = true,
                SimEvent::SimulationEnded { generation } => {
                    info!(generation, "simulation ended");
                    self.status = Some(format!("Field stabilized after {generation} generations"));
                }
                SimEvent::CycleDetected { period } => {
                    self.status = Some(format!("Oscillating with period {period}"));
                }
                SimEvent::Reseeded => {}
            }
        }
        repaint
    }
}
