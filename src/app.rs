use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WordVecVizApp {
    pub state: AppState,
}

impl WordVecVizApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WordVecVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard: page through figures ----
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) {
                self.state.next();
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.state.previous();
            }
        });

        // ---- Top panel: figure selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: word legend ----
        egui::SidePanel::left("legend_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::word_plot(ui, &self.state);
        });
    }
}
