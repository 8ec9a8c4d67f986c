use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The viewer state, independent of rendering.
pub struct AppState {
    /// Figures computed before the window opened, in display order.
    pub figures: Vec<Figure>,

    /// Index of the figure currently shown.
    pub selected: usize,

    /// Whether word labels are drawn next to the markers.
    pub show_labels: bool,

    /// Whether arrows between pairs are drawn.
    pub show_arrows: bool,
}

impl AppState {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            selected: 0,
            show_labels: true,
            show_arrows: true,
        }
    }

    /// The figure currently shown, if there is any.
    pub fn current(&self) -> Option<&Figure> {
        self.figures.get(self.selected)
    }

    /// Show figure `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.figures.len() {
            self.selected = index;
        }
    }

    /// Advance to the next figure, wrapping around.
    pub fn next(&mut self) {
        if !self.figures.is_empty() {
            self.selected = (self.selected + 1) % self.figures.len();
        }
    }

    /// Go back to the previous figure, wrapping around.
    pub fn previous(&mut self) {
        if !self.figures.is_empty() {
            self.selected = (self.selected + self.figures.len() - 1) % self.figures.len();
        }
    }
}
