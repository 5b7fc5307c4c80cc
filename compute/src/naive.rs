//! Naive implementation of Gray-Scott simulation
//!
//! Every term of the update rule is computed as a separate grid, which makes
//! this backend a readable reference at the expense of many temporary
//! allocations and passes over memory.

use crate::{laplacian::laplacian, SimulateStep};
use data::{
    parameters::{Parameters, MAX_CONCENTRATION, MIN_CONCENTRATION},
    species::Species,
};

/// Whole-grid arithmetic backend
#[derive(Copy, Clone, Debug, Default)]
pub struct Naive;
//
impl SimulateStep for Naive {
    fn perform_step(&self, params: &Parameters, species: &mut Species) {
        let (u, v, out_u, out_v) = species.in_out();

        // Diffusion
        let laplacian_u = laplacian(u, params.grid_spacing);
        let laplacian_v = laplacian(v, params.grid_spacing);

        // Reaction
        let reaction = &(u * v) * v;
        let feed = u.map(|u| params.feed_rate * (1.0 - u));
        let kill = v * (params.feed_rate + params.kill_rate);

        // Deduce change in u and v
        let du = &(&(&laplacian_u * params.diffusion_rate_u) - &reaction) + &feed;
        let dv = &(&(&laplacian_v * params.diffusion_rate_v) + &reaction) - &kill;

        // Integrate and keep the result in the numerically sane range
        out_u.assign(u);
        *out_u += &(&du * params.time_step);
        out_u.clamp(MIN_CONCENTRATION, MAX_CONCENTRATION);
        out_v.assign(v);
        *out_v += &(&dv * params.time_step);
        out_v.clamp(MIN_CONCENTRATION, MAX_CONCENTRATION);
    }
}
