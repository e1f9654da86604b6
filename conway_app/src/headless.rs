// headless.rs - Terminal runner driving the simulation from a tokio interval

use std::io::Write;

use anyhow::{Context, Result};
use conway::render::TextRenderer;
use conway::{Intent, LifeConfig, ManualScheduler, Renderer, SimEvent, Simulation};
use tokio::time::MissedTickBehavior;
use tracing::info;

pub struct HeadlessOptions {
    /// Stop after this many generations
    pub max_generations: Option<u64>,
    /// Skip drawing frames to stdout
    pub quiet: bool,
}

/// How a headless run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Stabilized { generation: u64 },
    GenerationLimit { generation: u64 },
    Interrupted { generation: u64 },
}

pub async fn run(config: &LifeConfig, options: &HeadlessOptions) -> Result<Outcome> {
    let mut sim = Simulation::new(config, ManualScheduler::new())
        .context("failed to create simulation")?;
    if !config.simulation.random_reseed {
        sim.dispatch(Intent::Seed)?;
    }
    sim.dispatch(Intent::Start)?;

    let mut renderer = TextRenderer::default();
    let mut stdout = std::io::stdout();
    let mut ticker = tokio::time::interval(config.simulation.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(
        width = sim.grid().width(),
        height = sim.grid().height(),
        population = sim.population(),
        "headless run started"
    );

    let outcome = loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                sim.dispatch(Intent::Stop)?;
                break Outcome::Interrupted { generation: sim.generation() };
            }
            _ = ticker.tick() => {
                let Some(handle) = sim.scheduler_mut().take_pending() else {
                    break Outcome::Stabilized { generation: sim.generation() };
                };
                sim.on_frame(handle);

                let mut redraw = false;
                let mut ended = None;
                for event in sim.drain_events() {
                    match event {
                        SimEvent::Redraw => redraw = true,
                        SimEvent::SimulationEnded { generation } => ended = Some(generation),
                        SimEvent::CycleDetected { period } => {
                            info!(period, generation = sim.generation(), "oscillating field");
                        }
                        SimEvent::Reseeded | SimEvent::StatusChanged(_) => {}
                    }
                }

                if redraw && !options.quiet {
                    renderer.render(sim.grid());
                    writeln!(stdout, "\x1b[2J\x1b[H{}generation {}  population {}",
                        renderer.frame(), sim.generation(), sim.population())?;
                    stdout.flush()?;
                }
                if let Some(generation) = ended {
                    break Outcome::Stabilized { generation };
                }
                if options.max_generations.is_some_and(|max| sim.generation() >= max) {
                    sim.dispatch(Intent::Stop)?;
                    break Outcome::GenerationLimit { generation: sim.generation() };
                }
            }
        }
    };

    info!(?outcome, population = sim.population(), "headless run finished");
    Ok(outcome)
}
