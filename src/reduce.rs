use linfa::traits::{Fit, Predict, Transformer};
use linfa::DatasetBase;
use linfa_reduction::Pca;
use linfa_tsne::TSneParams;
use ndarray::{concatenate, Array2, Axis};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::ReduceError;

// ---------------------------------------------------------------------------
// Reducer capability
// ---------------------------------------------------------------------------

/// Projects `N × D` vectors down to `N × 2`, keeping row order.
pub trait Reducer {
    /// Short display name, used in figure titles.
    fn name(&self) -> &str;

    /// Whether the output scale is stable enough for fixed axis bounds.
    fn honours_bounds(&self) -> bool;

    fn reduce(&self, vectors: Array2<f64>) -> Result<Array2<f64>, ReduceError>;
}

// ---------------------------------------------------------------------------
// PCA
// ---------------------------------------------------------------------------

/// Linear, variance-preserving projection onto the first two principal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcaReducer {
    pub whiten: bool,
}

impl Default for PcaReducer {
    fn default() -> Self {
        Self { whiten: true }
    }
}

impl Reducer for PcaReducer {
    fn name(&self) -> &str {
        "PCA"
    }

    fn honours_bounds(&self) -> bool {
        true
    }

    fn reduce(&self, vectors: Array2<f64>) -> Result<Array2<f64>, ReduceError> {
        let (n, d) = vectors.dim();
        if d < 2 {
            return Err(ReduceError::TooFewDimensions(d));
        }
        if n < 2 {
            // A single point has no variance to project; park it at the origin.
            return Ok(Array2::zeros((n, 2)));
        }

        let dataset = DatasetBase::from(vectors);
        let pca = Pca::params(2).whiten(self.whiten).fit(&dataset)?;
        let mut projected: Array2<f64> = pca.predict(dataset.records());
        // Rank-deficient input (two words, collinear or identical vectors)
        // yields fewer components; the missing axes carry no variance.
        if projected.ncols() < 2 {
            let filler = Array2::zeros((n, 2 - projected.ncols()));
            projected = concatenate![Axis(1), projected, filler];
        }
        normalize_signs(&mut projected);
        Ok(projected)
    }
}

/// Flip each column so its largest-magnitude entry is positive.
///
/// SVD only fixes principal axes up to sign; this pins them down.
fn normalize_signs(points: &mut Array2<f64>) {
    for mut column in points.axis_iter_mut(Axis(1)) {
        let pivot = column
            .iter()
            .copied()
            .fold(0.0f64, |best, v| if v.abs() > best.abs() { v } else { best });
        if pivot < 0.0 {
            column.mapv_inplace(|v| -v);
        }
    }
}

// ---------------------------------------------------------------------------
// t-SNE
// ---------------------------------------------------------------------------

/// Seeded Barnes-Hut t-SNE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsneReducer {
    pub seed: u64,
    pub perplexity: f64,
    pub approx_threshold: f64,
    pub max_iter: usize,
}

impl Default for TsneReducer {
    fn default() -> Self {
        Self {
            seed: 0,
            perplexity: 30.0,
            approx_threshold: 0.5,
            max_iter: 1000,
        }
    }
}

impl TsneReducer {
    pub const MIN_POINTS: usize = 4;

    /// Perplexity actually used for `n` points: at most `(n - 1) / 3`, rounded down.
    pub fn effective_perplexity(&self, n: usize) -> f64 {
        let ceiling = (n.saturating_sub(1) / 3).max(1) as f64;
        self.perplexity.min(ceiling)
    }
}

impl Reducer for TsneReducer {
    fn name(&self) -> &str {
        "t-SNE"
    }

    fn honours_bounds(&self) -> bool {
        false
    }

    fn reduce(&self, vectors: Array2<f64>) -> Result<Array2<f64>, ReduceError> {
        let (n, d) = vectors.dim();
        if d < 2 {
            return Err(ReduceError::TooFewDimensions(d));
        }
        if n < Self::MIN_POINTS {
            return Err(ReduceError::NotEnoughSamples {
                reducer: "t-SNE",
                needed: Self::MIN_POINTS,
                found: n,
            });
        }

        let perplexity = self.effective_perplexity(n);
        if perplexity < self.perplexity {
            log::debug!(
                "t-SNE perplexity lowered from {} to {perplexity} for {n} points",
                self.perplexity
            );
        }

        let rng = SmallRng::seed_from_u64(self.seed);
        let embedded = TSneParams::embedding_size_with_rng(2, rng)
            .perplexity(perplexity)
            .approx_threshold(self.approx_threshold)
            .max_iter(self.max_iter)
            .transform(vectors)?;
        Ok(embedded)
    }
}
