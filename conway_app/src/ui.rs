// ui.rs - egui front end: the Controls surface and the canvas Renderer

use std::time::{Duration, Instant};

use conway::render::draw_commands;
use conway::{CellLayout, DrawCommand, Grid, Intent, Renderer};
use eframe::egui;
use egui::{Pos2, Rect, Stroke, Vec2};

use crate::app::{LifeApp, Palette};

/// Replays canvas commands onto an egui painter anchored at `origin`.
pub struct PainterRenderer<'a> {
    pub painter: &'a egui::Painter,
    pub origin: Pos2,
    pub layout: CellLayout,
    pub palette: &'a Palette,
}

impl Renderer for PainterRenderer<'_> {
    fn render(&mut self, grid: &Grid) {
        let at = |(x, y): (f32, f32)| self.origin + Vec2::new(x, y);
        let grid_stroke = Stroke::new(1.0, self.palette.grid);

        for command in draw_commands(grid, &self.layout) {
            match command {
                DrawCommand::Clear { width, height } => {
                    let rect = Rect::from_min_size(self.origin, Vec2::new(width, height));
                    self.painter.rect_filled(rect, 0.0, self.palette.dead);
                }
                DrawCommand::FillRect { x, y, size } => {
                    let rect = Rect::from_min_size(at((x, y)), Vec2::splat(size));
                    self.painter.rect_filled(rect, 0.0, self.palette.live);
                }
                DrawCommand::Line { from, to } => {
                    self.painter.line_segment([at(from), at(to)], grid_stroke);
                }
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.poll_frame(now);
        self.handle_events();

        let controls = self.controls();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Field settings
            ui.horizontal(|ui| {
                ui.add_enabled_ui(controls.settings_enabled, |ui| {
                    ui.label("Width:");
                    ui.add(egui::TextEdit::singleline(&mut self.width_field).desired_width(50.0));
                    ui.label("Height:");
                    ui.add(egui::TextEdit::singleline(&mut self.height_field).desired_width(50.0));
                    if ui.button("Initialize Field").clicked() {
                        self.initialize_from_fields();
                    }
                });
            });

            ui.separator();

            // Controls
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(controls.run_enabled, egui::Button::new(controls.run_label))
                    .clicked()
                {
                    self.dispatch(Intent::ToggleRun);
                }

                if ui
                    .add_enabled(controls.step_enabled, egui::Button::new("Step"))
                    .clicked()
                {
                    self.dispatch(Intent::Step);
                }

                if ui.button("Clear").clicked() {
                    self.dispatch(Intent::Clear);
                }

                if ui.button("Random").clicked() {
                    self.dispatch(Intent::Seed);
                }

                let mut random_reseed = controls.random_reseed_checked;
                if ui.checkbox(&mut random_reseed, "Random reseed").changed() {
                    self.dispatch(Intent::SetRandomReseedMode(random_reseed));
                }

                ui.separator();
                ui.label(format!("Generation: {}", self.sim.generation()));
            });

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let millis = self.frame_interval().as_millis().max(1) as f32;
                let mut speed = 1000.0 / millis;
                if ui
                    .add(egui::Slider::new(&mut speed, 0.5..=120.0).suffix(" gen/sec"))
                    .changed()
                {
                    self.set_frame_interval(Duration::from_millis((1000.0 / speed) as u64));
                }
            });

            if let Some(status) = &self.status {
                ui.label(status.as_str());
            }

            ui.separator();

            egui::ScrollArea::both().show(ui, |ui| {
                let (canvas_w, canvas_h) = self.layout.canvas_size(self.sim.grid());
                let (response, painter) =
                    ui.allocate_painter(Vec2::new(canvas_w, canvas_h), egui::Sense::click());
                let origin = response.rect.min;

                PainterRenderer {
                    painter: &painter,
                    origin,
                    layout: self.layout,
                    palette: &self.palette,
                }
                .render(self.sim.grid());

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let offset = pos - origin;
                        self.click(offset.x, offset.y);
                    }
                }
            });

            ui.separator();

            let population = self.sim.population();
            let total = self.sim.grid().len();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", population));
                ui.label(format!("Dead cells: {}", total - population));
                ui.label(format!(
                    "Population: {:.1}%",
                    population as f32 / total as f32 * 100.0
                ));
            });
        });

        // Clicks and button presses emit events handled on the next pass.
        if self.handle_events() {
            ctx.request_repaint();
        }
        if let Some(wait) = self.next_frame_in(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
