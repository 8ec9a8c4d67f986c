use eframe::egui::Color32;
use palette::{named, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Tone – the two alternating point styles
// ---------------------------------------------------------------------------

/// Which of the two alternating styles a point is drawn with.
///
/// `First` is red with its label to the left, `Second` is green with its
/// label to the right, so that the two members of a pair never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    First,
    Second,
}

impl Tone {
    /// Tone of the point at `index`.
    pub fn at(index: usize, alternate: bool) -> Self {
        if alternate && index % 2 == 1 {
            Tone::Second
        } else {
            Tone::First
        }
    }

    pub fn rgb(self) -> Srgb<u8> {
        match self {
            Tone::First => named::RED,
            Tone::Second => named::GREEN,
        }
    }
}

/// Arrow fill and edge colour (`#bbbbbb`).
pub const ARROW_GRAY: Srgb<u8> = Srgb::new(0xbb, 0xbb, 0xbb);

// ---------------------------------------------------------------------------
// Backend conversions
// ---------------------------------------------------------------------------

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_plotters(c: Srgb<u8>) -> plotters::style::RGBColor {
    plotters::style::RGBColor(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tones_alternate_only_when_asked() {
        let alternating: Vec<Tone> = (0..4).map(|i| Tone::at(i, true)).collect();
        assert_eq!(
            alternating,
            vec![Tone::First, Tone::Second, Tone::First, Tone::Second]
        );
        assert!((0..5).all(|i| Tone::at(i, false) == Tone::First));
    }

    #[test]
    fn tone_colours_are_red_and_green() {
        assert_eq!(to_color32(Tone::First.rgb()), Color32::from_rgb(255, 0, 0));
        assert_eq!(to_color32(Tone::Second.rgb()), Color32::from_rgb(0, 128, 0));
        let gray = to_plotters(ARROW_GRAY);
        assert_eq!((gray.0, gray.1, gray.2), (187, 187, 187));
    }
}
