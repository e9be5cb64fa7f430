use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine layouts, called once per board a session builds.
pub trait MineLayoutGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout>;
}

impl<G: MineLayoutGenerator + ?Sized> MineLayoutGenerator for &mut G {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout> {
        (**self).generate(config)
    }
}
