use crate::*;
pub use random::*;

mod random;

pub trait AssignmentGenerator {
    fn generate(self, config: BoardConfig) -> Result<BoardAssignment>;
}
