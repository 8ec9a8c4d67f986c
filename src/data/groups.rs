use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::figure::{Bounds, DrawOptions};

// ---------------------------------------------------------------------------
// WordGroup – one figure's worth of words
// ---------------------------------------------------------------------------

/// An ordered list of alternating category/instance words plus how to plot it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WordGroup {
    /// File-name friendly identifier (`currency`, `capital`, ...).
    pub name: String,
    /// Human readable topic, used in the figure title.
    pub topic: String,
    pub words: Vec<String>,
    /// Fixed axis range `[x1, x2, y1, y2]`, honoured by PCA only.
    #[serde(default)]
    pub bounds: Option<[f64; 4]>,
    #[serde(default = "default_true")]
    pub alternate: bool,
    #[serde(default = "default_true")]
    pub arrows: bool,
}

fn default_true() -> bool {
    true
}

impl WordGroup {
    fn builtin(name: &str, topic: &str, words: &[&str], bounds: [f64; 4]) -> Self {
        WordGroup {
            name: name.to_string(),
            topic: topic.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            bounds: Some(bounds),
            alternate: true,
            arrows: true,
        }
    }

    /// Drawing options for this group, titled after the reducer in use.
    pub fn draw_options(&self, reducer_name: &str) -> DrawOptions {
        DrawOptions {
            alternate: self.alternate,
            arrows: self.arrows,
            bounds: self
                .bounds
                .map(|[x1, x2, y1, y2]| Bounds { x1, x2, y1, y2 }),
            title: Some(format!("{reducer_name} Visualisierung: {}", self.topic)),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in groups
// ---------------------------------------------------------------------------

const CURRENCY: &[&str] = &[
    "Schweiz", "Franken", "Deutschland", "Euro", "Grossbritannien", "britische_Pfund",
    "Japan", "Yen", "Russland", "Rubel", "USA", "US-Dollar", "Kroatien", "Kuna",
];

const CAPITAL: &[&str] = &[
    "Athen", "Griechenland", "Berlin", "Deutschland", "Ankara", "Tuerkei", "Bern", "Schweiz",
    "Hanoi", "Vietnam", "Lissabon", "Portugal", "Moskau", "Russland", "Stockholm", "Schweden",
    "Tokio", "Japan", "Washington", "USA",
];

const LANGUAGE: &[&str] = &[
    "Deutschland", "Deutsch", "USA", "Englisch", "Frankreich", "Franzoesisch", "Griechenland",
    "Griechisch", "Norwegen", "Norwegisch", "Schweden", "Schwedisch", "Polen", "Polnisch",
    "Ungarn", "Ungarisch",
];

/// The currency, capital and language groups with their PCA axis ranges.
pub fn builtin() -> Vec<WordGroup> {
    vec![
        WordGroup::builtin("currency", "Währung", CURRENCY, [-3.0, 3.0, -2.0, 2.0]),
        WordGroup::builtin("capital", "Hauptstadt", CAPITAL, [-3.0, 3.0, -2.0, 2.2]),
        WordGroup::builtin("language", "Sprache", LANGUAGE, [-3.0, 3.0, -2.0, 1.7]),
    ]
}

/// A neighbourhood group: `word` followed by its nearest neighbours.
pub fn similar(word: &str, neighbours: Vec<String>) -> WordGroup {
    let mut words = Vec::with_capacity(neighbours.len() + 1);
    words.push(word.to_string());
    words.extend(neighbours);

    WordGroup {
        name: format!("similar-{word}"),
        topic: format!("Nachbarn von {word}"),
        words,
        bounds: None,
        alternate: false,
        arrows: false,
    }
}

// ---------------------------------------------------------------------------
// JSON group files
// ---------------------------------------------------------------------------

/// Load groups from a JSON array of [`WordGroup`] records.
///
/// ```json
/// [
///   { "name": "currency", "topic": "Währung",
///     "words": ["Schweiz", "Franken"], "bounds": [-3, 3, -2, 2] }
/// ]
/// ```
pub fn load_groups(path: &Path) -> Result<Vec<WordGroup>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading group file {}", path.display()))?;
    let groups = parse_groups(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::info!("Loaded {} word group(s) from {}", groups.len(), path.display());
    Ok(groups)
}

fn parse_groups(text: &str) -> Result<Vec<WordGroup>> {
    let groups: Vec<WordGroup> = serde_json::from_str(text).context("parsing JSON")?;
    if groups.is_empty() {
        bail!("Group file contains no groups");
    }
    for group in &groups {
        if group.name.trim().is_empty() {
            bail!("Group with topic '{}' has an empty name", group.topic);
        }
        if group.words.len() % 2 != 0 && group.arrows {
            log::warn!(
                "Group '{}' has an odd number of words; the last one gets no arrow",
                group.name
            );
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_groups_are_paired() {
        let groups = builtin();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["currency", "capital", "language"]);
        assert!(groups.iter().all(|g| g.words.len() % 2 == 0));
        assert_eq!(groups[0].words.len(), 14);
        assert_eq!(groups[1].words.len(), 20);
        assert_eq!(groups[2].words.len(), 16);
        assert_eq!(groups[1].words[0], "Athen");
        assert_eq!(groups[1].words[1], "Griechenland");
    }

    #[test]
    fn draw_options_carry_title_and_bounds() {
        let opts = builtin()[1].draw_options("PCA");
        assert_eq!(opts.title.as_deref(), Some("PCA Visualisierung: Hauptstadt"));
        assert_eq!(
            opts.bounds,
            Some(Bounds {
                x1: -3.0,
                x2: 3.0,
                y1: -2.0,
                y2: 2.2,
            })
        );
        assert!(opts.alternate && opts.arrows);
    }

    #[test]
    fn json_groups_default_flags() {
        let groups = parse_groups(
            r#"[{"name": "pets", "topic": "Tiere", "words": ["Hund", "Katze"]},
                {"name": "x", "topic": "y", "words": [], "arrows": false,
                 "bounds": [0, 1, 0, 1]}]"#,
        )
        .unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups[0].alternate && groups[0].arrows);
        assert_eq!(groups[0].bounds, None);
        assert!(!groups[1].arrows);
        assert_eq!(groups[1].bounds, Some([0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn empty_or_invalid_group_files_are_rejected() {
        assert!(parse_groups("[]").is_err());
        assert!(parse_groups("{}").is_err());
        assert!(parse_groups(r#"[{"name": " ", "topic": "t", "words": []}]"#).is_err());
    }

    #[test]
    fn similar_group_starts_with_query() {
        let group = similar("Frau", vec!["Mann".into(), "Kind".into()]);
        assert_eq!(group.name, "similar-Frau");
        assert_eq!(group.words, vec!["Frau", "Mann", "Kind"]);
        assert!(!group.alternate && !group.arrows);
        assert!(group.draw_options("t-SNE").bounds.is_none());
    }

    #[test]
    fn load_groups_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        std::fs::write(&path, r#"[{"name": "a", "topic": "b", "words": ["c", "d"]}]"#).unwrap();
        let groups = load_groups(&path).unwrap();
        assert_eq!(groups[0].words, vec!["c", "d"]);
    }
}
