use eframe::egui::{Align2, RichText, Stroke, Ui, Vec2};
use egui_plot::{
    Line, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, PlotUi, Points, Polygon, Text,
};

use crate::color::{to_color32, ARROW_GRAY};
use crate::figure::{Figure, HAlign, PlottedWord};
use crate::state::AppState;

const MARKER_RADIUS: f32 = 4.0;
const LABEL_SIZE: f32 = 16.0;

// ---------------------------------------------------------------------------
// Word plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected figure in the central panel.
pub fn word_plot(ui: &mut Ui, state: &AppState) {
    let figure = match state.current() {
        Some(f) => f,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No word groups to show");
            });
            return;
        }
    };

    if let Some(title) = &figure.title {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(title);
        });
    }

    let fixed = figure.bounds.is_some();
    let view = figure.view_bounds();

    // One plot id per figure so zoom memory does not leak between them.
    let mut plot = Plot::new(("word_plot", state.selected))
        .allow_boxed_zoom(!fixed)
        .allow_drag(!fixed)
        .allow_scroll(!fixed)
        .allow_zoom(!fixed);
    if !fixed {
        plot = plot
            .include_x(view.x1)
            .include_x(view.x2)
            .include_y(view.y1)
            .include_y(view.y2);
    }

    plot.show(ui, |plot_ui| {
        if fixed {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [view.x1, view.y1],
                [view.x2, view.y2],
            ));
        }

        if state.show_arrows {
            draw_arrows(plot_ui, figure);
        }

        for w in &figure.words {
            let color = to_color32(w.tone.rgb());
            plot_ui.points(
                Points::new(PlotPoints::new(vec![w.position]))
                    .name(&w.word)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(MARKER_RADIUS)
                    .color(color),
            );
            if state.show_labels {
                draw_label(plot_ui, w);
            }
        }
    });
}

fn draw_arrows(plot_ui: &mut PlotUi, figure: &Figure) {
    let gray = to_color32(ARROW_GRAY);
    for arrow in &figure.arrows {
        let end = arrow.shaft_end();
        plot_ui.line(
            Line::new(PlotPoints::new(vec![arrow.tail, end]))
                .color(gray)
                .width(1.0),
        );
        plot_ui.polygon(
            Polygon::new(PlotPoints::new(arrow.head().to_vec()))
                .fill_color(gray)
                .stroke(Stroke::new(0.5, gray)),
        );
    }
}

/// Place the word label a fixed number of screen points away from its marker.
fn draw_label(plot_ui: &mut PlotUi, w: &PlottedWord) {
    let [dx, dy] = w.label_offset();
    let marker = plot_ui.screen_from_plot(PlotPoint::new(w.position[0], w.position[1]));
    // Screen y grows downwards.
    let anchor = plot_ui.plot_from_screen(marker + Vec2::new(dx, -dy));
    let align = match w.label_align() {
        HAlign::Left => Align2::LEFT_BOTTOM,
        HAlign::Right => Align2::RIGHT_BOTTOM,
    };
    plot_ui.text(Text::new(anchor, RichText::new(&w.word).size(LABEL_SIZE)).anchor(align));
}
