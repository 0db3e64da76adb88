// ui.rs - egui drawing and input for the Game of Life window

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use std::time::{Duration, Instant};

use life_engine::PATTERNS;

use crate::GameOfLife;

const RULES: [&str; 4] = [
    "Any live cell with less than 2 live neighbours dies, as if by underpopulation.",
    "Any live cell with 2 or 3 live neighbours lives on to the next generation.",
    "Any live cell with more than 3 live neighbours dies, as if by overpopulation.",
    "Any dead cell with exactly 3 live neighbours becomes a live cell, as if by reproduction.",
];

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-step if running
        self.tick(Instant::now());

        egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let running = self.is_running();

                let button_text = if running { "Stop" } else { "Start" };
                if ui.button(button_text).clicked() {
                    self.start_stop(Instant::now());
                }

                if ui.add_enabled(!running, egui::Button::new("Next")).clicked() {
                    self.next_step();
                }

                if ui.button("Clear").clicked() {
                    self.clear_grid();
                }

                if ui.button("Rules").clicked() {
                    self.show_rules = true;
                }

                ui.separator();

                // Speed is fixed for the length of a run
                ui.label("Interval:");
                ui.add_enabled(
                    !running,
                    egui::Slider::new(&mut self.interval_ms, self.min_interval_ms..=self.max_interval_ms)
                        .suffix(" ms"),
                );
            });

            ui.horizontal(|ui| {
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(self.selected_pattern_name())
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                if ui.button("Random").clicked() {
                    self.random_pattern();
                }

                ui.separator();

                ui.checkbox(&mut self.stop_on_cycle, "Stop when repeating");

                ui.separator();

                if let Some(sim) = self.simulation() {
                    ui.label(format!("Generation: {}", sim.generation()));
                    ui.label(format!("Population: {}", sim.population()));
                    if sim.is_repeating() {
                        ui.label("(repeating)");
                    }
                }
            });
        });

        if self.show_rules {
            let mut open = true;
            egui::Window::new("Game of Life rules")
                .open(&mut open)
                .collapsible(false)
                .show(ctx, |ui| {
                    for rule in RULES {
                        ui.label(format!("\u{2022} {}", rule));
                    }
                });
            if !open {
                self.show_rules = false;
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let canvas = response.rect;

                // Any change in the number of cells that fit starts a fresh grid
                self.fit_to_surface(canvas.width(), canvas.height());

                painter.rect_filled(canvas, 0.0, Color32::BLACK);

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let local = pos - canvas.min;
                        self.toggle_at(local.x, local.y);
                    }
                }

                let Some(sim) = self.simulation() else {
                    return;
                };
                let layout = self.layout();
                for y in 0..sim.height() {
                    for x in 0..sim.width() {
                        let cell = layout.cell_rect(x, y);
                        let rect = Rect::from_min_size(
                            canvas.min + Vec2::new(cell.left, cell.top),
                            Vec2::splat(cell.size),
                        );

                        // Choose color based on cell state
                        let color = if sim.grid().get(x, y) == Some(true) {
                            self.live_color
                        } else {
                            self.dead_color
                        };
                        painter.rect_filled(rect, 0.0, color);
                    }
                }
            });

        // Wake up for the next step while running
        if let Some(wait) = self.time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }
}
