use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    /// Places mines for `config`, rejecting configs that cannot hold them.
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
