use super::*;

/// Purely random placement: draw a cell uniformly, redraw if it already holds a mine.
///
/// Rejection sampling reaches every set of `mines` distinct cells with equal probability. It
/// slows down as the board fills up, which does not matter for the densities games use.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the wall clock, so every call yields a different layout.
    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Nanoseconds since the Unix epoch, truncated to 64 bits.
pub fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

impl MinefieldGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        // an empty axis has no range to draw from, a full board never stops redrawing
        config.validate()?;

        let (rows, cols) = config.size();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut draws: u32 = 0;

        while mines_placed < config.mines() {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;

            if mines[coords.to_nd_index()] {
                continue;
            }

            mines[coords.to_nd_index()] = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board with seed {} in {} draws",
            mines_placed,
            rows,
            cols,
            self.seed,
            draws
        );
        Ok(MineLayout::from_mine_mask_unchecked(mines))
    }
}
