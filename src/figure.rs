//! Renderer-agnostic scene construction.
//!
//! `draw_words` turns a word list into a [`Figure`]: projected points with
//! their tone and label placement, the pair arrows, optional fixed bounds and
//! a title. The viewer (`ui::plot`) and the file exporter (`export`) both
//! render from a `Figure` and never look at the model.

use crate::color::Tone;
use crate::data::model::EmbeddingModel;
use crate::error::DrawError;
use crate::reduce::Reducer;

/// Label offset from its marker in points, x to the right, y up.
/// `First` labels mirror the x component.
pub const LABEL_OFFSET: [f32; 2] = [7.0, -6.0];

/// Gap left between an arrow end and the marker it points at, in data units.
pub const ARROW_MARGIN: f64 = 0.04;
pub const ARROW_SHAFT_WIDTH: f64 = 0.01;
pub const ARROW_HEAD_WIDTH: f64 = 0.08;
pub const ARROW_HEAD_LENGTH: f64 = 1.5 * ARROW_HEAD_WIDTH;

/// Share of the data range added on each side when auto-scaling.
const AUTO_MARGIN: f64 = 0.05;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Visible axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl Bounds {
    /// Smallest range holding all `points`, padded by 5% per side.
    pub fn fit<'a>(points: impl IntoIterator<Item = &'a [f64; 2]>) -> Self {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for p in points {
            for axis in 0..2 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        if min[0] > max[0] {
            return Bounds {
                x1: -1.0,
                x2: 1.0,
                y1: -1.0,
                y2: 1.0,
            };
        }

        let pad = |lo: f64, hi: f64| {
            let range = hi - lo;
            if range.abs() < f64::EPSILON {
                1.0
            } else {
                range * AUTO_MARGIN
            }
        };
        let (px, py) = (pad(min[0], max[0]), pad(min[1], max[1]));
        Bounds {
            x1: min[0] - px,
            x2: max[0] + px,
            y1: min[1] - py,
            y2: max[1] + py,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    /// Toggle tone on every word (pairs become red/green).
    pub alternate: bool,
    /// Connect words 0→1, 2→3, ...
    pub arrows: bool,
    /// Fixed axis range; ignored by reducers without a stable scale.
    pub bounds: Option<Bounds>,
    pub title: Option<String>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            alternate: true,
            arrows: true,
            bounds: None,
            title: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene elements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Right,
}

/// One projected word.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedWord {
    pub word: String,
    pub position: [f64; 2],
    pub tone: Tone,
}

impl PlottedWord {
    /// Offset of the label's anchor from the marker, in points (y up).
    pub fn label_offset(&self) -> [f32; 2] {
        match self.tone {
            Tone::First => [-LABEL_OFFSET[0], LABEL_OFFSET[1]],
            Tone::Second => LABEL_OFFSET,
        }
    }

    /// Which side of the label sits on its anchor. Labels always sit on
    /// their bottom edge.
    pub fn label_align(&self) -> HAlign {
        match self.tone {
            Tone::First => HAlign::Right,
            Tone::Second => HAlign::Left,
        }
    }
}

/// Directed connector from word `from` to word `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: usize,
    pub to: usize,
    pub tail: [f64; 2],
    pub tip: [f64; 2],
}

impl Arrow {
    /// Arrow between two markers, pulled back by [`ARROW_MARGIN`] at each end.
    /// Markers closer than twice the margin are joined end to end.
    fn between(from: usize, to: usize, a: [f64; 2], b: [f64; 2]) -> Self {
        let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
        let len = dx.hypot(dy);
        let (tail, tip) = if len > 2.0 * ARROW_MARGIN {
            let (ux, uy) = (dx / len * ARROW_MARGIN, dy / len * ARROW_MARGIN);
            ([a[0] + ux, a[1] + uy], [b[0] - ux, b[1] - uy])
        } else {
            (a, b)
        };
        Arrow {
            from,
            to,
            tail,
            tip,
        }
    }

    fn direction(&self) -> ([f64; 2], f64) {
        let (dx, dy) = (self.tip[0] - self.tail[0], self.tip[1] - self.tail[1]);
        let len = dx.hypot(dy);
        if len < f64::EPSILON {
            ([1.0, 0.0], 0.0)
        } else {
            ([dx / len, dy / len], len)
        }
    }

    /// Where the shaft meets the head. The head is included in the arrow
    /// length, so this lies between `tail` and `tip`.
    pub fn shaft_end(&self) -> [f64; 2] {
        let ([ux, uy], len) = self.direction();
        let head = ARROW_HEAD_LENGTH.min(len);
        [self.tip[0] - ux * head, self.tip[1] - uy * head]
    }

    /// Head triangle: tip first, then the two base corners.
    pub fn head(&self) -> [[f64; 2]; 3] {
        let ([ux, uy], _) = self.direction();
        let base = self.shaft_end();
        let (nx, ny) = (-uy * ARROW_HEAD_WIDTH / 2.0, ux * ARROW_HEAD_WIDTH / 2.0);
        [
            self.tip,
            [base[0] + nx, base[1] + ny],
            [base[0] - nx, base[1] - ny],
        ]
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// Everything needed to render one scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// File-name friendly identifier.
    pub name: String,
    pub title: Option<String>,
    /// Name of the reducer that produced the positions.
    pub reducer: String,
    pub words: Vec<PlottedWord>,
    pub arrows: Vec<Arrow>,
    /// Fixed axis range, if any.
    pub bounds: Option<Bounds>,
}

impl Figure {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fixed bounds when present, otherwise a padded fit around the points.
    pub fn view_bounds(&self) -> Bounds {
        self.bounds
            .unwrap_or_else(|| Bounds::fit(self.words.iter().map(|w| &w.position)))
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Project `words` to 2D with `reducer` and lay them out as a [`Figure`].
///
/// Fails if any word is missing from `model`; nothing is drawn then. An
/// empty word list gives an empty figure.
pub fn draw_words<S: AsRef<str>>(
    model: &EmbeddingModel,
    words: &[S],
    reducer: &dyn Reducer,
    options: &DrawOptions,
) -> Result<Figure, DrawError> {
    let bounds = match options.bounds {
        Some(b) if !reducer.honours_bounds() => {
            log::debug!(
                "{} output has no stable scale; ignoring bounds {b:?}",
                reducer.name()
            );
            None
        }
        other => other,
    };

    let mut figure = Figure {
        name: "figure".to_string(),
        title: options.title.clone().filter(|t| !t.is_empty()),
        reducer: reducer.name().to_string(),
        words: Vec::with_capacity(words.len()),
        arrows: Vec::new(),
        bounds,
    };
    if words.is_empty() {
        return Ok(figure);
    }

    let vectors = model.matrix_for(words)?;
    let projected = reducer.reduce(vectors)?;
    if projected.nrows() != words.len() || projected.ncols() != 2 {
        return Err(DrawError::ShapeMismatch {
            expected: words.len(),
            rows: projected.nrows(),
            cols: projected.ncols(),
        });
    }

    figure.words = words
        .iter()
        .zip(projected.rows())
        .enumerate()
        .map(|(i, (word, point))| PlottedWord {
            word: word.as_ref().to_string(),
            position: [point[0], point[1]],
            tone: Tone::at(i, options.alternate),
        })
        .collect();

    if options.arrows {
        figure.arrows = figure
            .words
            .chunks_exact(2)
            .enumerate()
            .map(|(pair, w)| Arrow::between(2 * pair, 2 * pair + 1, w[0].position, w[1].position))
            .collect();
    }

    log::info!(
        "Drew {} word(s) and {} arrow(s) with {}",
        figure.words.len(),
        figure.arrows.len(),
        figure.reducer
    );
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;
    use crate::error::{LookupError, ReduceError};
    use crate::reduce::PcaReducer;

    fn corner_model() -> EmbeddingModel {
        EmbeddingModel::from_entries(
            2,
            vec![
                ("A".into(), vec![1.0, 0.0]),
                ("B".into(), vec![0.0, 1.0]),
                ("C".into(), vec![1.0, 1.0]),
                ("D".into(), vec![-1.0, -1.0]),
            ],
        )
    }

    fn counting_model(n: usize) -> EmbeddingModel {
        EmbeddingModel::from_entries(
            3,
            (0..n)
                .map(|i| {
                    let x = i as f32;
                    (format!("w{i}"), vec![x, (x * 1.7).sin(), (x * 0.3).cos()])
                })
                .collect(),
        )
    }

    /// Places word `i` at `(i, -i)` without looking at the vectors.
    struct Diagonal {
        stable: bool,
    }

    impl Reducer for Diagonal {
        fn name(&self) -> &str {
            "diagonal"
        }
        fn honours_bounds(&self) -> bool {
            self.stable
        }
        fn reduce(&self, vectors: Array2<f64>) -> Result<Array2<f64>, ReduceError> {
            Ok(Array2::from_shape_fn((vectors.nrows(), 2), |(i, j)| {
                if j == 0 { i as f64 } else { -(i as f64) }
            }))
        }
    }

    /// Always returns a single point.
    struct Broken;

    impl Reducer for Broken {
        fn name(&self) -> &str {
            "broken"
        }
        fn honours_bounds(&self) -> bool {
            true
        }
        fn reduce(&self, _vectors: Array2<f64>) -> Result<Array2<f64>, ReduceError> {
            Ok(Array2::zeros((1, 2)))
        }
    }

    #[test]
    fn corner_scenario_with_pca() {
        let figure = draw_words(
            &corner_model(),
            &["A", "B", "C", "D"],
            &PcaReducer::default(),
            &DrawOptions::default(),
        )
        .unwrap();

        assert_eq!(figure.words.len(), 4);
        let words: Vec<&str> = figure.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["A", "B", "C", "D"]);

        let tones: Vec<Tone> = figure.words.iter().map(|w| w.tone).collect();
        assert_eq!(tones, vec![Tone::First, Tone::Second, Tone::First, Tone::Second]);

        let pairs: Vec<(usize, usize)> = figure.arrows.iter().map(|a| (a.from, a.to)).collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
        assert_eq!(figure.reducer, "PCA");
        assert!(figure
            .words
            .iter()
            .all(|w| w.position.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn single_pair_with_pca_gets_two_points_and_an_arrow() {
        let model = EmbeddingModel::from_entries(
            3,
            vec![
                ("Schweiz".into(), vec![0.2, 1.0, -0.4]),
                ("Franken".into(), vec![0.9, 0.1, 0.3]),
            ],
        );
        let figure = draw_words(
            &model,
            &["Schweiz", "Franken"],
            &PcaReducer::default(),
            &DrawOptions::default(),
        )
        .unwrap();
        assert_eq!(figure.words.len(), 2);
        assert_eq!(figure.arrows.len(), 1);
        assert!(figure
            .words
            .iter()
            .all(|w| w.position.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn identical_vectors_with_pca_collapse_to_the_origin() {
        let model = EmbeddingModel::from_entries(
            2,
            vec![
                ("a".into(), vec![0.5, 0.5]),
                ("b".into(), vec![0.5, 0.5]),
                ("c".into(), vec![0.5, 0.5]),
            ],
        );
        let figure = draw_words(
            &model,
            &["a", "b", "c"],
            &PcaReducer::default(),
            &DrawOptions::default(),
        )
        .unwrap();
        assert!(figure.words.iter().all(|w| w.position == [0.0, 0.0]));
    }

    #[test]
    fn without_alternation_every_point_uses_first_tone() {
        let options = DrawOptions {
            alternate: false,
            ..DrawOptions::default()
        };
        let figure = draw_words(
            &counting_model(5),
            &["w0", "w1", "w2", "w3", "w4"],
            &Diagonal { stable: true },
            &options,
        )
        .unwrap();
        assert!(figure.words.iter().all(|w| w.tone == Tone::First));
        assert!(figure.words.iter().all(|w| w.label_align() == HAlign::Right));
    }

    #[test]
    fn labels_alternate_with_tone() {
        let figure = draw_words(
            &counting_model(2),
            &["w0", "w1"],
            &Diagonal { stable: true },
            &DrawOptions::default(),
        )
        .unwrap();
        assert_eq!(figure.words[0].label_offset(), [-7.0, -6.0]);
        assert_eq!(figure.words[0].label_align(), HAlign::Right);
        assert_eq!(figure.words[1].label_offset(), [7.0, -6.0]);
        assert_eq!(figure.words[1].label_align(), HAlign::Left);
    }

    #[test]
    fn arrow_count_is_half_the_words_rounded_down() {
        let model = counting_model(7);
        let all: Vec<String> = (0..7).map(|i| format!("w{i}")).collect();
        for n in 0..=7 {
            let figure = draw_words(
                &model,
                &all[..n],
                &Diagonal { stable: true },
                &DrawOptions::default(),
            )
            .unwrap();
            assert_eq!(figure.words.len(), n);
            assert_eq!(figure.arrows.len(), n / 2);
            for (k, arrow) in figure.arrows.iter().enumerate() {
                assert_eq!((arrow.from, arrow.to), (2 * k, 2 * k + 1));
            }
        }
    }

    #[test]
    fn arrows_can_be_switched_off() {
        let options = DrawOptions {
            arrows: false,
            ..DrawOptions::default()
        };
        let figure = draw_words(
            &counting_model(4),
            &["w0", "w1", "w2", "w3"],
            &Diagonal { stable: true },
            &options,
        )
        .unwrap();
        assert!(figure.arrows.is_empty());
    }

    #[test]
    fn missing_word_fails_the_whole_call() {
        let err = draw_words(
            &corner_model(),
            &["A", "B", "Atlantis", "D"],
            &PcaReducer::default(),
            &DrawOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DrawError::Lookup(LookupError::WordNotFound(ref w)) if w == "Atlantis"
        ));
        assert_eq!(err.to_string(), "word 'Atlantis' not found in vocabulary");
    }

    #[test]
    fn empty_word_list_is_an_empty_figure() {
        let words: [&str; 0] = [];
        let figure = draw_words(
            &corner_model(),
            &words,
            &PcaReducer::default(),
            &DrawOptions::default(),
        )
        .unwrap();
        assert!(figure.is_empty());
        assert!(figure.arrows.is_empty());
    }

    #[test]
    fn bounds_are_dropped_for_unstable_reducers() {
        let options = DrawOptions {
            bounds: Some(Bounds {
                x1: -3.0,
                x2: 3.0,
                y1: -2.0,
                y2: 2.0,
            }),
            title: Some("t".into()),
            ..DrawOptions::default()
        };
        let words = ["w0", "w1", "w2"];
        let model = counting_model(3);

        let kept = draw_words(&model, &words, &Diagonal { stable: true }, &options).unwrap();
        assert_eq!(kept.bounds, options.bounds);
        assert_eq!(kept.view_bounds(), options.bounds.unwrap());

        let dropped = draw_words(&model, &words, &Diagonal { stable: false }, &options).unwrap();
        assert_eq!(dropped.bounds, None);
        assert_eq!(dropped.title.as_deref(), Some("t"));
    }

    #[test]
    fn empty_title_is_no_title() {
        let options = DrawOptions {
            title: Some(String::new()),
            ..DrawOptions::default()
        };
        let figure = draw_words(
            &counting_model(2),
            &["w0", "w1"],
            &Diagonal { stable: true },
            &options,
        )
        .unwrap();
        assert_eq!(figure.title, None);
    }

    #[test]
    fn reducer_returning_wrong_shape_is_an_error() {
        let err = draw_words(
            &counting_model(3),
            &["w0", "w1", "w2"],
            &Broken,
            &DrawOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DrawError::ShapeMismatch {
                expected: 3,
                rows: 1,
                cols: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "reducer returned a 1x2 array for 3 words, expected 3x2"
        );
    }

    #[test]
    fn arrows_stop_short_of_both_markers() {
        let arrow = Arrow::between(0, 1, [0.0, 0.0], [3.0, 4.0]);
        assert!((arrow.tail[0] - 0.024).abs() < 1e-12);
        assert!((arrow.tail[1] - 0.032).abs() < 1e-12);
        assert!((arrow.tip[0] - 2.976).abs() < 1e-12);
        assert!((arrow.tip[1] - 3.968).abs() < 1e-12);

        let close = Arrow::between(0, 1, [0.0, 0.0], [0.05, 0.0]);
        assert_eq!((close.tail, close.tip), ([0.0, 0.0], [0.05, 0.0]));
    }

    #[test]
    fn arrow_head_is_part_of_the_length() {
        let arrow = Arrow::between(0, 1, [0.0, 0.0], [1.08, 0.0]);
        let [tip, left, right] = arrow.head();
        assert_eq!(tip, arrow.tip);
        let base = arrow.shaft_end();
        assert!((base[0] - (arrow.tip[0] - ARROW_HEAD_LENGTH)).abs() < 1e-12);
        assert!((left[1] - ARROW_HEAD_WIDTH / 2.0).abs() < 1e-12);
        assert!((right[1] + ARROW_HEAD_WIDTH / 2.0).abs() < 1e-12);
        assert!((left[0] - base[0]).abs() < 1e-12);
    }

    #[test]
    fn auto_bounds_pad_the_data_range() {
        fn close(a: Bounds, b: Bounds) -> bool {
            [a.x1 - b.x1, a.x2 - b.x2, a.y1 - b.y1, a.y2 - b.y2]
                .iter()
                .all(|d| d.abs() < 1e-12)
        }

        fn bounds(x1: f64, x2: f64, y1: f64, y2: f64) -> Bounds {
            Bounds { x1, x2, y1, y2 }
        }

        let b = Bounds::fit(&[[0.0, 0.0], [10.0, 2.0]]);
        assert!(close(b, bounds(-0.5, 10.5, -0.1, 2.1)), "{b:?}");

        let single = Bounds::fit(&[[1.0, 1.0]]);
        assert!(close(single, bounds(0.0, 2.0, 0.0, 2.0)));

        let none: [[f64; 2]; 0] = [];
        assert_eq!(Bounds::fit(&none), bounds(-1.0, 1.0, -1.0, 1.0));
    }
}
