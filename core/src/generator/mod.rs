use crate::*;
pub use random::*;

mod random;

/// Strategy for placing mines on an empty grid of the configured size.
pub trait LayoutGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout;
}
