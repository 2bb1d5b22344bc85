// ui.rs - Live egui view: one pixel per cell, one batched mesh per color

use crate::config::Config;
use crate::fps::FpsCounter;
use eframe::egui;
use egui::{Color32, Mesh, Pos2, Rect, Shape, Vec2};
use life_engine::{Cell, Generations, Grid, Scheduler};
use std::time::Instant;
use tracing::info;

pub const BACKGROUND: Color32 = Color32::WHITE;

/// Cell states that get drawn. Dead3 and Empty show the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawClass {
    Blue,
    Orange,
    Dead,
    Dead1,
    Dead2,
}

impl DrawClass {
    pub const ALL: [DrawClass; 5] = [
        DrawClass::Blue,
        DrawClass::Orange,
        DrawClass::Dead,
        DrawClass::Dead1,
        DrawClass::Dead2,
    ];

    pub fn of(cell: Cell) -> Option<Self> {
        match cell {
            Cell::Blue => Some(DrawClass::Blue),
            Cell::Orange => Some(DrawClass::Orange),
            Cell::Dead => Some(DrawClass::Dead),
            Cell::Dead1 => Some(DrawClass::Dead1),
            Cell::Dead2 => Some(DrawClass::Dead2),
            Cell::Dead3 | Cell::Empty => None,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            DrawClass::Blue => Color32::from_rgb(0x00, 0x99, 0xFF),
            DrawClass::Orange => Color32::from_rgb(0xFF, 0x99, 0x00),
            DrawClass::Dead => Color32::from_rgb(0x66, 0x66, 0x66),
            DrawClass::Dead1 => Color32::from_rgb(0x7F, 0x7F, 0x7F),
            DrawClass::Dead2 => Color32::from_rgb(0x99, 0x99, 0x99),
        }
    }
}

/// Cell coordinates grouped by draw class; buffers are reused across frames.
#[derive(Debug, Default)]
pub struct PointBatches {
    points: [Vec<(u32, u32)>; 5],
}

impl PointBatches {
    pub fn collect(&mut self, grid: &Grid) {
        for points in &mut self.points {
            points.clear();
        }
        for (y, row) in grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if let Some(class) = DrawClass::of(cell) {
                    self.points[class as usize].push((x as u32, y as u32));
                }
            }
        }
    }

    pub fn get(&self, class: DrawClass) -> &[(u32, u32)] {
        &self.points[class as usize]
    }

    /// One mesh per non-empty class, each cell a 1x1 rect from `origin`.
    pub fn meshes(&self, origin: Pos2) -> impl Iterator<Item = Mesh> + '_ {
        DrawClass::ALL
            .into_iter()
            .filter(|&class| !self.get(class).is_empty())
            .map(move |class| {
                let color = class.color();
                let mut mesh = Mesh::default();
                for &(x, y) in self.get(class) {
                    let min = origin + Vec2::new(x as f32, y as f32);
                    mesh.add_colored_rect(Rect::from_min_size(min, Vec2::splat(1.0)), color);
                }
                mesh
            })
    }
}

pub struct LifeView {
    game: Generations,
    scheduler: Scheduler,
    fps: FpsCounter,
    batches: PointBatches,
}

impl LifeView {
    pub fn new(game: Generations, scheduler: Scheduler) -> Self {
        Self {
            game,
            scheduler,
            fps: FpsCounter::new(),
            batches: PointBatches::default(),
        }
    }
}

impl eframe::App for LifeView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            info!(generation = self.game.generation(), "escape pressed, closing");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if let Some(rate) = self.fps.tick(Instant::now()) {
            info!(fps = rate, generation = self.game.generation(), "FPS: {rate}");
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                self.batches.collect(self.game.current());
                let painter = ui.painter();
                for mesh in self.batches.meshes(origin) {
                    painter.add(Shape::mesh(mesh));
                }
            });

        // The meshes own their vertices, so the buffers are free to swap.
        self.game.advance(&self.scheduler);
        ctx.request_repaint();
    }
}

pub fn run(config: &Config, game: Generations, scheduler: Scheduler) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32, config.height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Two-Color Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeView::new(game, scheduler))),
    )
}
