use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};

use crate::error::LookupError;

// ---------------------------------------------------------------------------
// EmbeddingModel – the loaded word vectors
// ---------------------------------------------------------------------------

/// Read-only mapping from vocabulary word to a fixed-length vector.
///
/// Rows of `vectors` follow file order; `index` maps a word to its row.
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    vocab: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
}

impl EmbeddingModel {
    /// Build a model from `(word, vector)` entries.
    ///
    /// Entries whose vector length differs from `dim` are skipped. When a
    /// word appears twice the first occurrence wins.
    pub fn from_entries(dim: usize, entries: Vec<(String, Vec<f32>)>) -> Self {
        let mut vocab = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        let mut flat = Vec::with_capacity(entries.len() * dim);

        for (word, vector) in entries {
            if vector.len() != dim {
                log::warn!(
                    "Vector for '{word}' has {} components, expected {dim}; skipped",
                    vector.len()
                );
                continue;
            }
            if index.contains_key(&word) {
                log::warn!("Duplicate vocabulary entry '{word}' ignored");
                continue;
            }
            index.insert(word.clone(), vocab.len());
            vocab.push(word);
            flat.extend_from_slice(&vector);
        }

        let vectors = Array2::from_shape_vec((vocab.len(), dim), flat)
            .unwrap_or_else(|_| Array2::zeros((0, dim)));

        EmbeddingModel {
            vocab,
            index,
            vectors,
        }
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Vector dimensionality.
    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Words of `words` absent from the vocabulary, in input order.
    pub fn missing<'a, S: AsRef<str>>(&self, words: &'a [S]) -> Vec<&'a str> {
        words
            .iter()
            .map(AsRef::as_ref)
            .filter(|w| !self.contains(w))
            .collect()
    }

    /// Look up the vector of a single word.
    pub fn vector(&self, word: &str) -> Result<ArrayView1<'_, f32>, LookupError> {
        self.index
            .get(word)
            .map(|&row| self.vectors.row(row))
            .ok_or_else(|| LookupError::WordNotFound(word.to_string()))
    }

    /// Stack the vectors of `words` into an `N × dim` matrix, in input order.
    ///
    /// Fails on the first word missing from the vocabulary.
    pub fn matrix_for<S: AsRef<str>>(&self, words: &[S]) -> Result<Array2<f64>, LookupError> {
        let mut matrix = Array2::zeros((words.len(), self.dim()));
        for (mut row, word) in matrix.rows_mut().into_iter().zip(words) {
            let vector = self.vector(word.as_ref())?;
            row.assign(&vector.mapv(f64::from));
        }
        Ok(matrix)
    }

    /// The `topn` words closest to `word` by cosine similarity, best first.
    ///
    /// The query word itself is excluded. Zero-length vectors score 0.
    pub fn most_similar(&self, word: &str, topn: usize) -> Result<Vec<(String, f32)>, LookupError> {
        let query = self.vector(word)?;
        let query_norm = query.dot(&query).sqrt();
        let query_row = self.index[word];

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(row, _)| *row != query_row)
            .map(|(row, v)| {
                let norm = v.dot(&v).sqrt();
                let denom = norm * query_norm;
                let sim = if denom > 0.0 { v.dot(&query) / denom } else { 0.0 };
                (row, sim)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(topn);

        Ok(scored
            .into_iter()
            .map(|(row, sim)| (self.vocab[row].clone(), sim))
            .collect())
    }
}
