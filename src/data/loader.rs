use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use super::model::EmbeddingModel;

/// On-disk layout of a word2vec model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelFormat {
    /// `<count> <dim>\n` header, then `word ` + `dim` little-endian f32 per entry.
    #[default]
    Binary,
    /// `<count> <dim>\n` header, then one whitespace-separated line per entry.
    Text,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a word2vec model from `path`.
///
/// `limit` caps the number of entries read (the header count still has to be
/// at least that large).
pub fn load_file(
    path: &Path,
    format: ModelFormat,
    limit: Option<usize>,
) -> Result<EmbeddingModel> {
    let file =
        File::open(path).with_context(|| format!("opening model file {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let model = match format {
        ModelFormat::Binary => read_binary(&mut reader, limit),
        ModelFormat::Text => read_text(&mut reader, limit),
    }
    .with_context(|| format!("reading {format:?} model {}", path.display()))?;

    log::info!(
        "Loaded {} vectors of dimension {} from {}",
        model.len(),
        model.dim(),
        path.display()
    );
    Ok(model)
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn read_header<R: BufRead>(reader: &mut R) -> Result<(usize, usize)> {
    let mut line = String::new();
    reader.read_line(&mut line).context("reading header")?;

    let mut fields = line.split_whitespace();
    let (Some(count), Some(dim), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("Header must be '<count> <dim>', got {:?}", line.trim_end());
    };
    let count: usize = count
        .parse()
        .with_context(|| format!("Header: '{count}' is not a word count"))?;
    let dim: usize = dim
        .parse()
        .with_context(|| format!("Header: '{dim}' is not a dimension"))?;
    if dim == 0 {
        bail!("Header: dimension must be positive");
    }
    if record_len(dim).map_or(true, |len| len > isize::MAX as usize) {
        bail!("Header: dimension {dim} is too large");
    }
    Ok((count, dim))
}

/// Bytes of one binary vector record.
fn record_len(dim: usize) -> Option<usize> {
    dim.checked_mul(std::mem::size_of::<f32>())
}

// ---------------------------------------------------------------------------
// Binary loader
// ---------------------------------------------------------------------------

fn read_binary<R: BufRead>(reader: &mut R, limit: Option<usize>) -> Result<EmbeddingModel> {
    let (count, dim) = read_header(reader)?;
    let wanted = limit.map_or(count, |l| l.min(count));

    let record_len = record_len(dim).context("Header: vector record size overflows")?;

    // Header values are untrusted; buffers grow with the data actually read.
    let mut entries = Vec::new();
    let mut raw = Vec::new();
    let mut token = Vec::new();

    for i in 0..wanted {
        token.clear();
        reader
            .read_until(b' ', &mut token)
            .with_context(|| format!("Entry {i}: reading word"))?;
        if token.last() != Some(&b' ') {
            bail!("Entry {i}: unexpected end of file, expected {count} entries");
        }
        token.pop();

        // word2vec writes a newline after each vector; it may also be missing.
        let start = token.iter().position(|&b| b != b'\n').unwrap_or(token.len());
        let word = std::str::from_utf8(&token[start..])
            .with_context(|| format!("Entry {i}: word is not valid UTF-8"))?
            .to_string();
        if word.is_empty() {
            bail!("Entry {i}: empty word");
        }

        raw.clear();
        Read::take(&mut *reader, record_len as u64)
            .read_to_end(&mut raw)
            .with_context(|| format!("Entry {i} ('{word}'): reading vector"))?;
        if raw.len() != record_len {
            bail!("Entry {i} ('{word}'): truncated vector");
        }
        let vector: Vec<f32> = raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        entries.push((word, vector));
    }

    Ok(EmbeddingModel::from_entries(dim, entries))
}

// ---------------------------------------------------------------------------
// Text loader
// ---------------------------------------------------------------------------

fn read_text<R: BufRead>(reader: &mut R, limit: Option<usize>) -> Result<EmbeddingModel> {
    let (count, dim) = read_header(reader)?;
    let wanted = limit.map_or(count, |l| l.min(count));

    let mut entries = Vec::new();
    let mut lines = reader.lines();

    while entries.len() < wanted {
        let i = entries.len();
        let line = match lines.next() {
            Some(line) => line.with_context(|| format!("Entry {i}: reading line"))?,
            None => bail!("Entry {i}: unexpected end of file, expected {count} entries"),
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let word = fields.next().unwrap_or_default().to_string();
        let vector = fields
            .enumerate()
            .map(|(j, tok)| {
                tok.parse::<f32>().with_context(|| {
                    format!("Entry {i} ('{word}'), [{j}]: '{tok}' is not a number")
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        if vector.len() != dim {
            bail!(
                "Entry {i} ('{word}'): {} components but header says {dim}",
                vector.len()
            );
        }
        entries.push((word, vector));
    }

    Ok(EmbeddingModel::from_entries(dim, entries))
}
