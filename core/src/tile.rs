use serde::{Deserialize, Serialize};

/// State of one board cell.
///
/// `has_mine` and `adjacent_mines` are fixed when the board is built; only the revealed and
/// flagged bits change during a game, and `revealed` never goes back to `false`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(has_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            has_mine,
            revealed: false,
            flagged: false,
            adjacent_mines,
        }
    }

    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// What a renderer should draw for this cell.
    pub const fn view(self) -> TileView {
        match (self.revealed, self.has_mine, self.flagged) {
            (true, true, _) => TileView::Mine,
            (true, false, _) => TileView::Revealed(self.adjacent_mines),
            (false, _, true) => TileView::Flagged,
            (false, _, false) => TileView::Hidden,
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl TileView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    /// Single-character form used by the board's text rendering.
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Flagged => 'F',
            Self::Revealed(0) => ' ',
            Self::Revealed(n) => (b'0' + n) as char,
            Self::Mine => '*',
        }
    }
}

impl Default for TileView {
    fn default() -> Self {
        Self::Hidden
    }
}
