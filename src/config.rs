use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::Color;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cellSize must be at least 1 pixel")]
    ZeroCellSize,
    #[error("speed must be at least 1 millisecond")]
    ZeroSpeed,
}

/// Options accepted from the host page. Fields left out fall back to
/// [`LifeOptions::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifeOptions {
    /// Edge length of a rendered cell
    #[serde(alias = "cellSize")]
    pub cell_size_px: u32,
    /// Fill color for alive cells
    pub alive_color: Color,
    /// Background color, also used to clear the surface each frame
    pub dead_color: Color,
    /// Minimum milliseconds between generations
    #[serde(alias = "speed")]
    pub speed_ms: u32,
    /// Seed for the initial board. A fresh random board is used when absent.
    pub seed: Option<u64>,
}

impl Default for LifeOptions {
    fn default() -> Self {
        Self {
            cell_size_px: 10,
            alive_color: Color::BLACK,
            dead_color: Color::WHITE,
            speed_ms: 200,
            seed: None,
        }
    }
}

impl LifeOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        Ok(())
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
