//! Computation parameters

use crate::{presets, Precision};

/// Lower bound of concentrations after each simulation step
pub const MIN_CONCENTRATION: Precision = 1e-5;

/// Upper bound of concentrations after each simulation step
pub const MAX_CONCENTRATION: Precision = 1.0;

/// Computation parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Diffusion rate of species U
    pub diffusion_rate_u: Precision,

    /// Diffusion rate of species V
    pub diffusion_rate_v: Precision,

    /// Rate at which U is replenished towards 1
    pub feed_rate: Precision,

    /// Rate at which V decays
    pub kill_rate: Precision,

    /// Distance between two neighboring grid points
    pub grid_spacing: Precision,

    /// Time step (make it shorter to increase precision)
    pub time_step: Precision,
}
//
impl Parameters {
    /// Default parameters with a different feed and kill rate
    pub fn with_rates(feed_rate: Precision, kill_rate: Precision) -> Self {
        Self {
            feed_rate,
            kill_rate,
            ..Default::default()
        }
    }
}
//
impl Default for Parameters {
    fn default() -> Self {
        Self {
            diffusion_rate_u: 2e-5,
            diffusion_rate_v: 1e-5,
            feed_rate: presets::DEFAULT_PRESET.feed,
            kill_rate: presets::DEFAULT_PRESET.kill,
            grid_spacing: 0.01,
            time_step: 1.0,
        }
    }
}
