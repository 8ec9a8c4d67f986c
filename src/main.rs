mod app;
mod cli;
mod color;
mod data;
mod error;
mod export;
mod figure;
mod reduce;
mod state;
mod ui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use eframe::egui;

use app::WordVecVizApp;
use cli::Args;
use data::groups::{self, WordGroup};
use data::loader;
use data::model::EmbeddingModel;
use figure::Figure;
use reduce::Reducer;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model = loader::load_file(&args.model, args.format, args.limit)?;
    if model.is_empty() {
        bail!("Model {} contains no vectors", args.model.display());
    }

    let mut word_groups = match &args.groups {
        Some(path) => groups::load_groups(path)?,
        None => groups::builtin(),
    };
    if let Some(word) = &args.similar {
        let neighbours = model
            .most_similar(word, args.topn)?
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        word_groups.push(groups::similar(word, neighbours));
    }

    let reducer = args.build_reducer();
    let figures = draw_groups(&model, &word_groups, reducer.as_ref())?;

    match &args.out_dir {
        Some(dir) => {
            let written = export::save_all(&figures, dir)?;
            log::info!("Wrote {} file(s) to {}", written.len(), dir.display());
            Ok(())
        }
        None => show(figures),
    }
}

fn draw_groups(
    model: &EmbeddingModel,
    groups: &[WordGroup],
    reducer: &dyn Reducer,
) -> Result<Vec<Figure>> {
    groups
        .iter()
        .map(|group| {
            let missing = model.missing(&group.words);
            if !missing.is_empty() {
                bail!(
                    "drawing group '{}': words missing from the model: {}",
                    group.name,
                    missing.join(", ")
                );
            }

            let options = group.draw_options(reducer.name());
            figure::draw_words(model, &group.words, reducer, &options)
                .map(|f| f.named(&group.name))
                .with_context(|| format!("drawing group '{}'", group.name))
        })
        .collect()
}

fn show(figures: Vec<Figure>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "wordvec-viz",
        options,
        Box::new(|_cc| Ok(Box::new(WordVecVizApp::new(AppState::new(figures))))),
    )
    .map_err(|e| {
        log::error!("Viewer failed: {e}");
        anyhow::anyhow!("viewer failed: {e}")
    })
}
