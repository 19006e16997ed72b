use rand::prelude::*;
use rand::seq::SliceRandom;

use super::*;

/// Generation strategy that flips a fair coin for the double agent and then deals every card uniformly at random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomAssignmentGenerator {
    seed: u64,
}

impl RandomAssignmentGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl AssignmentGenerator for RandomAssignmentGenerator {
    fn generate(self, config: BoardConfig) -> Result<BoardAssignment> {
        let config = config.validate()?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let double_agent = if rng.random_range(0..2u8) == 0 {
            Team::Red
        } else {
            Team::Blue
        };
        log::debug!("double agent goes to {:?}", double_agent);

        let mut colors = config.color_multiset(double_agent);
        colors.shuffle(&mut rng);

        BoardAssignment::from_row_major(config, colors)
    }
}
