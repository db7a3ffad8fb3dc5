use alloc::collections::VecDeque;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Playing,
    /// A mine was revealed directly; every cell is revealed and no further moves apply.
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Pending cells of a cascade. The draining order only changes the visiting order, never the set
/// of revealed cells.
pub(crate) trait Worklist: Default {
    fn push(&mut self, coords: Coord2);
    fn pop(&mut self) -> Option<Coord2>;
}

impl Worklist for VecDeque<Coord2> {
    fn push(&mut self, coords: Coord2) {
        self.push_back(coords);
    }

    fn pop(&mut self) -> Option<Coord2> {
        self.pop_front()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

#[derive(Deserialize)]
struct RawBoard {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

/// Saved boards are only accepted when they could have been reached by playing.
impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        use GameError::InconsistentState;

        let (rows, cols) = raw.config.size();
        if raw.cells.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = MineLayout::from_mine_mask(raw.cells.map(|cell| cell.has_mine()))?;
        if layout.mine_count() != raw.config.mines() {
            return Err(InconsistentState("mine count does not match the config"));
        }
        let counts_match = raw.cells.indexed_iter().all(|((row, col), cell)| {
            cell.adjacent_mines() == layout.adjacent_mine_count((row as Coord, col as Coord))
        });
        if !counts_match {
            return Err(InconsistentState("adjacent counts do not match the mines"));
        }

        let revealed = raw.cells.iter().filter(|cell| cell.is_revealed()).count();
        if revealed != usize::from(raw.revealed_count) {
            return Err(InconsistentState("revealed count does not match the cells"));
        }
        let flagged = raw.cells.iter().filter(|cell| cell.is_flagged()).count();
        if flagged != usize::from(raw.flagged_count) {
            return Err(InconsistentState("flagged count does not match the cells"));
        }

        match (raw.state, raw.triggered_mine) {
            (BoardState::Playing, None) => {
                if raw.cells.iter().any(|cell| cell.has_mine() && cell.is_revealed()) {
                    return Err(InconsistentState("a mine is revealed while playing"));
                }
            }
            (BoardState::Lost, Some(coords)) => {
                let coords = validate_coords(coords, raw.config.size())?;
                if !layout.contains_mine(coords) {
                    return Err(InconsistentState("triggered cell has no mine"));
                }
                if revealed != raw.cells.len() {
                    return Err(InconsistentState("lost board is not fully revealed"));
                }
            }
            (BoardState::Playing, Some(_)) => {
                return Err(InconsistentState("triggered mine on a board still playing"));
            }
            (BoardState::Lost, None) => {
                return Err(InconsistentState("lost board without a triggered mine"));
            }
        }

        Ok(Self {
            config: raw.config,
            cells: raw.cells,
            revealed_count: raw.revealed_count,
            flagged_count: raw.flagged_count,
            state: raw.state,
            triggered_mine: raw.triggered_mine,
        })
    }
}

impl Board {
    /// Starts a game with mines scattered from a clock-derived seed.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, clock_seed())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let layout = RandomLayoutGenerator::new(seed).generate(config)?;
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(layout[coords], layout.adjacent_mine_count(coords))
        });
        log::debug!(
            "New {}x{} board with {} mines",
            config.size().0,
            config.size().1,
            config.mines()
        );

        Self {
            config,
            cells,
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Discards this board and deals a fresh one with the same configuration.
    pub fn new_game(&mut self) -> Result<()> {
        self.new_game_with_seed(clock_seed())
    }

    /// Leaves the current board untouched when the replacement cannot be generated.
    pub fn new_game_with_seed(&mut self, seed: u64) -> Result<()> {
        *self = Self::with_seed(self.config, seed)?;
        log::debug!("New game with seed {}", seed);
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_lost(&self) -> bool {
        self.state.is_finished()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count as isize)
    }

    /// The mine whose direct reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        validate_coords(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        cell.toggle_flag();
        if cell.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveals a cell, cascading through zero-count regions. Flags do not protect a cell.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        Ok(self.reveal_with::<VecDeque<Coord2>>(coords))
    }

    pub(crate) fn reveal_with<W: Worklist>(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cells[coords.to_nd_index()];
        if self.state.is_finished() || cell.is_revealed() {
            return RevealOutcome::NoChange;
        }

        self.reveal_cell(coords);
        log::debug!(
            "Revealed {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mines()
        );

        if cell.adjacent_mines() == 0 {
            self.cascade::<W>(coords);
        }

        if cell.has_mine() {
            self.triggered_mine = Some(coords);
            self.lose();
            RevealOutcome::HitMine
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens the connected zero-count region around `start` together with its numbered border.
    ///
    /// Cells revealed here never trigger a loss, even a mine; only a direct reveal does.
    fn cascade<W: Worklist>(&mut self, start: Coord2) {
        let mut to_visit = W::default();
        to_visit.push(start);

        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.cells.iter_neighbors(visit_coords) {
                let neighbor = self.cells[pos.to_nd_index()];
                if neighbor.is_revealed() {
                    continue;
                }

                self.reveal_cell(pos);
                log::trace!(
                    "Cascade revealed {:?}, adjacent mines: {}",
                    pos,
                    neighbor.adjacent_mines()
                );

                // revealing before enqueueing keeps each cell in the worklist at most once
                if neighbor.adjacent_mines() == 0 && !neighbor.has_mine() {
                    to_visit.push(pos);
                }
            }
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].reveal();
        self.revealed_count += 1;
    }

    fn lose(&mut self) {
        log::debug!("Mine hit at {:?}, revealing the board", self.triggered_mine);
        self.state = BoardState::Lost;
        for cell in self.cells.iter_mut() {
            cell.reveal();
        }
        self.revealed_count = self.config.total_cells();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.view().symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
