use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::to_color32;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – word legend
// ---------------------------------------------------------------------------

/// Render the legend of the selected figure: every word in its tone colour,
/// followed by the connected pairs.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Words");
    ui.separator();

    let figure = match state.current() {
        Some(f) => f,
        None => {
            ui.label("No figure selected.");
            return;
        }
    };

    if figure.is_empty() {
        ui.label("This group has no words.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, w) in figure.words.iter().enumerate() {
                let text = RichText::new(format!("{i:>2}  {}", w.word))
                    .monospace()
                    .color(to_color32(w.tone.rgb()));
                ui.label(text);
            }

            if !figure.arrows.is_empty() {
                ui.separator();
                ui.strong("Pairs");
                for arrow in &figure.arrows {
                    ui.label(format!(
                        "{} → {}",
                        figure.words[arrow.from].word, figure.words[arrow.to].word
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the figure selector and display toggles.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let mut clicked = None;
        for (i, figure) in state.figures.iter().enumerate() {
            if ui.selectable_label(state.selected == i, &figure.name).clicked() {
                clicked = Some(i);
            }
        }
        if let Some(i) = clicked {
            state.select(i);
        }

        ui.separator();

        if ui.selectable_label(state.show_labels, "Labels").clicked() {
            state.show_labels = !state.show_labels;
        }
        if ui.selectable_label(state.show_arrows, "Arrows").clicked() {
            state.show_arrows = !state.show_arrows;
        }

        ui.separator();

        if let Some(figure) = state.current() {
            let scale = if figure.bounds.is_some() { "fixed range" } else { "auto range" };
            ui.label(format!(
                "{}: {} words, {} pairs, {scale}",
                figure.reducer,
                figure.words.len(),
                figure.arrows.len()
            ));
        }
    });
}
