use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vector dimensionality of the generated model.
const DIM: usize = 50;

/// (country, currency, capital, language)
const COUNTRIES: &[(&str, Option<&str>, Option<&str>, Option<&str>)] = &[
    ("Schweiz", Some("Franken"), Some("Bern"), None),
    ("Deutschland", Some("Euro"), Some("Berlin"), Some("Deutsch")),
    ("Grossbritannien", Some("britische_Pfund"), None, None),
    ("Japan", Some("Yen"), Some("Tokio"), None),
    ("Russland", Some("Rubel"), Some("Moskau"), None),
    ("USA", Some("US-Dollar"), Some("Washington"), Some("Englisch")),
    ("Kroatien", Some("Kuna"), None, None),
    ("Griechenland", None, Some("Athen"), Some("Griechisch")),
    ("Tuerkei", None, Some("Ankara"), None),
    ("Vietnam", None, Some("Hanoi"), None),
    ("Portugal", None, Some("Lissabon"), None),
    ("Schweden", None, Some("Stockholm"), Some("Schwedisch")),
    ("Frankreich", None, None, Some("Franzoesisch")),
    ("Norwegen", None, None, Some("Norwegisch")),
    ("Polen", None, None, Some("Polnisch")),
    ("Ungarn", None, None, Some("Ungarisch")),
];

/// Unrelated words, handy for `--similar`.
const FILLER: &[&str] = &["Frau", "Mann", "Kind", "Koenig", "Koenigin", "Haus", "Stadt", "Land"];

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f32, std_dev: f32) -> f32 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z as f32
}

fn random_vector(rng: &mut StdRng, std_dev: f32) -> Vec<f32> {
    (0..DIM).map(|_| gauss(rng, 0.0, std_dev)).collect()
}

/// `base + offset + noise`
fn related(rng: &mut StdRng, base: &[f32], offset: &[f32]) -> Vec<f32> {
    base.iter()
        .zip(offset)
        .map(|(b, o)| b + o + gauss(rng, 0.0, 0.05))
        .collect()
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_model.bin".to_string());
    let mut rng = StdRng::seed_from_u64(42);

    // Each relation is a shared translation, so pairs line up in PCA.
    let currency_offset = random_vector(&mut rng, 0.6);
    let capital_offset = random_vector(&mut rng, 0.6);
    let language_offset = random_vector(&mut rng, 0.6);

    let mut vectors: BTreeMap<String, Vec<f32>> = BTreeMap::new();
    for &(country, currency, capital, language) in COUNTRIES {
        let base = random_vector(&mut rng, 1.0);
        for (word, offset) in [
            (currency, &currency_offset),
            (capital, &capital_offset),
            (language, &language_offset),
        ] {
            if let Some(word) = word {
                vectors.insert(word.to_string(), related(&mut rng, &base, offset));
            }
        }
        vectors.insert(country.to_string(), base);
    }
    for &word in FILLER {
        vectors.insert(word.to_string(), random_vector(&mut rng, 1.0));
    }

    let file = File::create(&output_path).with_context(|| format!("creating {output_path}"))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{} {DIM}", vectors.len())?;
    for (word, vector) in &vectors {
        writer.write_all(word.as_bytes())?;
        writer.write_all(b" ")?;
        for v in vector {
            writer.write_all(&v.to_le_bytes())?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush().with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} word vectors ({DIM} dimensions each) to {output_path}",
        vectors.len()
    );
    Ok(())
}
