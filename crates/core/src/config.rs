//! Game construction parameters.

use crate::pieces::Catalog;
use crate::types::{DEFAULT_HEIGHT, DEFAULT_LOW_WATER_MARK, DEFAULT_WIDTH};

/// Everything a game is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Queue length at or below which a new batch is appended.
    pub low_water_mark: usize,
    /// Piece queue seed.
    pub seed: u32,
    pub catalog: Catalog,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            seed: 1,
            catalog: Catalog::standard(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_dimensions(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }
}
