use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::loader::ModelFormat;
use crate::reduce::{PcaReducer, Reducer, TsneReducer};

/// Dimensionality reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReducerKind {
    /// Principal component analysis (deterministic, honours axis ranges).
    #[default]
    Pca,
    /// Seeded t-SNE (auto-scaled axes).
    Tsne,
}

/// Visualize word groups of a word2vec model as 2D scatter plots.
#[derive(Debug, Parser)]
#[command(name = "wordvec-viz", version)]
pub struct Args {
    /// Source file with the trained model
    pub model: PathBuf,

    /// Model file layout
    #[arg(long, value_enum, default_value_t)]
    pub format: ModelFormat,

    /// Read only the first N vectors
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Dimensionality reduction strategy
    #[arg(long, value_enum, default_value_t)]
    pub reducer: ReducerKind,

    /// Disable PCA whitening
    #[arg(long)]
    pub no_whiten: bool,

    /// t-SNE random seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// t-SNE perplexity (lowered automatically for small groups)
    #[arg(long, default_value_t = 30.0)]
    pub perplexity: f64,

    /// JSON file with word groups replacing the built-in ones
    #[arg(long, value_name = "FILE")]
    pub groups: Option<PathBuf>,

    /// Add a figure with WORD and its nearest neighbours
    #[arg(long, value_name = "WORD")]
    pub similar: Option<String>,

    /// Number of neighbours for --similar
    #[arg(long, default_value_t = 30, requires = "similar")]
    pub topn: usize,

    /// Save PNG and CSV files into DIR instead of opening a window
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl Args {
    /// The reducer selected on the command line.
    pub fn build_reducer(&self) -> Box<dyn Reducer> {
        match self.reducer {
            ReducerKind::Pca => Box::new(PcaReducer {
                whiten: !self.no_whiten,
            }),
            ReducerKind::Tsne => Box::new(TsneReducer {
                seed: self.seed,
                perplexity: self.perplexity,
                ..TsneReducer::default()
            }),
        }
    }
}
