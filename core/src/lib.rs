//! Board engine for an 8×8 (or any size) Minesweeper game.
//!
//! The engine owns no global state: callers hold a [`Board`] and drive it with coordinates,
//! reading back [`Cell`] state for rendering.

#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod adjacency;
mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board size and mine count, validated on construction and on deserialization.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl GameConfig {
    pub const CLASSIC_SIZE: Coord2 = (8, 8);
    pub const CLASSIC_MINES: CellCount = 10;

    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// The 8×8 board with 10 mines.
    pub const fn classic() -> Self {
        Self::new_unchecked(Self::CLASSIC_SIZE, Self::CLASSIC_MINES)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Fixed placement of mines on a board, with the adjacency count of every cell.
///
/// Deserialized layouts are rebuilt from the mask and must agree with the stored counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent_counts: Array2<u8>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
    adjacent_counts: Array2<u8>,
    mine_count: CellCount,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        if raw.adjacent_counts.dim() != raw.mine_mask.dim() {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = Self::from_mine_mask(raw.mine_mask)?;
        if layout.mine_count != raw.mine_count {
            return Err(GameError::InconsistentState("mine count does not match the mask"));
        }
        if layout.adjacent_counts != raw.adjacent_counts {
            return Err(GameError::InconsistentState(
                "adjacent counts do not match the mines",
            ));
        }
        Ok(layout)
    }
}

impl MineLayout {
    /// Builds a layout from a mask that is already known to fit its config.
    pub(crate) fn from_mine_mask_unchecked(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let adjacent_counts = adjacent_mine_counts(&mine_mask);
        Self {
            mine_mask,
            adjacent_counts,
            mine_count,
        }
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(GameError::InvalidDimensions);
        };
        let layout = Self::from_mine_mask_unchecked(mine_mask);
        GameConfig::new((rows, cols), layout.mine_count)?;
        Ok(layout)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            let coords = validate_coords(coords, size)?;
            if mine_mask[coords.to_nd_index()] {
                log::warn!("Duplicate mine at {:?} ignored", coords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        validate_coords(coords, self.size())
    }

    pub fn size(&self) -> Coord2 {
        types::array_size(&self.mine_mask)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent_counts[coords.to_nd_index()]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }

    /// Whether this move ended the game.
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
