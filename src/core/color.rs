//! Marker colors.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// One of the seven marker colors.
///
/// Colors carry no ordering; only equality matters to the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    DarkYellow,
    Green,
    Blue,
    Cyan,
    Magenta,
}

impl Color {
    /// The full palette.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Yellow,
        Color::DarkYellow,
        Color::Green,
        Color::Blue,
        Color::Cyan,
        Color::Magenta,
    ];

    /// Draw a color uniformly from the palette.
    pub fn random(rng: &mut GameRng) -> Self {
        Self::ALL[rng.gen_range_usize(0..Self::ALL.len())]
    }

    /// Single-letter symbol for text rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::DarkYellow => 'D',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Cyan => 'C',
            Color::Magenta => 'M',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
