use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;

use crate::color::{to_plotters, Tone, ARROW_GRAY};
use crate::figure::{Figure, HAlign, ARROW_SHAFT_WIDTH};

/// Output image size in pixels (a 6×6 inch figure at 100 dpi).
const IMAGE_SIZE: (u32, u32) = (600, 600);
const MARKER_RADIUS: i32 = 4;
const LABEL_FONT_SIZE: u32 = 17;
const TITLE_FONT_SIZE: u32 = 20;

type DataChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write `<name>.png` and `<name>.csv` for every figure into `dir`.
pub fn save_all(figures: &[Figure], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(figures.len() * 2);
    for figure in figures {
        let png = dir.join(format!("{}.png", figure.name));
        save_png(figure, &png)?;
        written.push(png);

        let csv = dir.join(format!("{}.csv", figure.name));
        save_csv(figure, &csv)?;
        written.push(csv);
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// PNG
// ---------------------------------------------------------------------------

/// Render a figure to a PNG file with the plotters bitmap backend.
///
/// Hosts without a usable sans-serif font still get markers and arrows.
pub fn save_png(figure: &Figure, path: &Path) -> Result<()> {
    if let Err(e) = draw_png(figure, path, true) {
        log::warn!(
            "Text rendering failed for {} ({e}); saving without text",
            path.display()
        );
        draw_png(figure, path, false)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("rendering {}", path.display()))?;
    }
    log::info!("Figure '{}' saved to {}", figure.name, path.display());
    Ok(())
}

fn draw_png(
    figure: &Figure,
    path: &Path,
    text: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let view = figure.view_bounds();
    let mut builder = ChartBuilder::on(&root);
    builder.margin(15).x_label_area_size(30).y_label_area_size(40);
    if let Some(title) = figure.title.as_ref().filter(|_| text) {
        builder.caption(title, ("sans-serif", TITLE_FONT_SIZE).into_font());
    }
    let mut chart = builder.build_cartesian_2d(view.x1..view.x2, view.y1..view.y2)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh();
    if !text {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw()?;

    let gray = to_plotters(ARROW_GRAY);
    let shaft_px = shaft_pixels(&chart, figure.arrows.first().map(|a| a.tail));

    // Shafts and heads go first so markers stay on top.
    chart.draw_series(figure.arrows.iter().map(|arrow| {
        let end = arrow.shaft_end();
        PathElement::new(
            vec![(arrow.tail[0], arrow.tail[1]), (end[0], end[1])],
            gray.stroke_width(shaft_px),
        )
    }))?;
    chart.draw_series(figure.arrows.iter().map(|arrow| {
        Polygon::new(
            arrow.head().iter().map(|p| (p[0], p[1])).collect::<Vec<_>>(),
            gray.filled(),
        )
    }))?;

    chart.draw_series(figure.words.iter().map(|w| {
        Circle::new(
            (w.position[0], w.position[1]),
            MARKER_RADIUS,
            to_plotters(w.tone.rgb()).filled(),
        )
    }))?;

    if text {
        chart.draw_series(figure.words.iter().map(|w| {
            let [dx, dy] = w.label_offset();
            let hpos = match w.label_align() {
                HAlign::Left => HPos::Left,
                HAlign::Right => HPos::Right,
            };
            let style = ("sans-serif", LABEL_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(hpos, VPos::Bottom));

            // Pixel y grows downwards.
            EmptyElement::at((w.position[0], w.position[1]))
                + Text::new(w.word.clone(), (dx.round() as i32, -dy.round() as i32), style)
        }))?;
    }

    root.present()?;
    Ok(())
}

/// Shaft width in pixels, scaled from its data-unit width.
fn shaft_pixels<DB: DrawingBackend>(chart: &DataChart<'_, DB>, anchor: Option<[f64; 2]>) -> u32 {
    let Some([x, y]) = anchor else {
        return 1;
    };
    let (px0, _) = chart.backend_coord(&(x, y));
    let (px1, _) = chart.backend_coord(&(x + ARROW_SHAFT_WIDTH, y));
    (px1 - px0).unsigned_abs().max(1)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    index: usize,
    word: &'a str,
    x: f64,
    y: f64,
    tone: Tone,
}

/// Write the projected coordinates of a figure, one row per word.
pub fn save_csv(figure: &Figure, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (index, w) in figure.words.iter().enumerate() {
        writer
            .serialize(CsvRow {
                index,
                word: &w.word,
                x: w.position[0],
                y: w.position[1],
                tone: w.tone,
            })
            .with_context(|| format!("writing row {index} of {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    log::info!("Coordinates of '{}' saved to {}", figure.name, path.display());
    Ok(())
}
