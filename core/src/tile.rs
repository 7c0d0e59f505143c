use serde::{Deserialize, Serialize};

/// Player-visible state of a single grid tile.
///
/// `Incorrect` keeps the text the player entered so the rendering surface can
/// show the wrong guess. `Cleared` exists only after the puzzle resolves: the
/// tile is blanked without revealing its product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Unsolved,
    Incorrect(String),
    Correct,
    Cleared,
}

impl Tile {
    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Whether the tile still takes text entry.
    pub const fn accepts_edits(&self) -> bool {
        matches!(self, Self::Unsolved | Self::Incorrect(_))
    }

    /// The wrong entry currently displayed, if any.
    pub fn entry_text(&self) -> Option<&str> {
        match self {
            Self::Incorrect(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Unsolved
    }
}
