use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// A requested word could not be resolved against the model vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("word '{0}' not found in vocabulary")]
    WordNotFound(String),
}

/// Failure inside one of the dimensionality reducers.
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("PCA failed: {0}")]
    Pca(#[from] linfa_reduction::ReductionError),

    #[error("t-SNE failed: {0}")]
    Tsne(#[from] linfa_tsne::TSneError),

    #[error("{reducer} needs at least {needed} points, got {found}")]
    NotEnoughSamples {
        reducer: &'static str,
        needed: usize,
        found: usize,
    },

    #[error("vectors have {0} dimension(s), need at least 2")]
    TooFewDimensions(usize),
}

/// Everything that can stop `draw_words` from producing a figure.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error("reducer returned a {rows}x{cols} array for {expected} words, expected {expected}x2")]
    ShapeMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },
}
