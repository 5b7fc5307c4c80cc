//! Parallel implementation of Gray-Scott simulation
//!
//! The whole update rule is evaluated in a single pass over the output grids,
//! which is split across rayon worker threads when the grid is large enough
//! for parallelism to pay off. Results are bitwise identical to those of the
//! naive backend.

use crate::{laplacian::periodic_stencil, SimulateStep};
use data::{
    parameters::{Parameters, MAX_CONCENTRATION, MIN_CONCENTRATION},
    species::Species,
    Precision,
};
use ndarray::{ArrayView2, Zip};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;

pub use rayon::ThreadPoolBuildError;

/// Number of grid cells below which the computation stays sequential
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 64 * 64;

/// Fused, multi-threaded backend
#[derive(Debug)]
pub struct Parallel {
    /// Number of grid cells below which parallelism is not considered
    /// worthwhile
    sequential_len_threshold: usize,

    /// Dedicated thread pool, if any (otherwise rayon's global pool is used)
    pool: Option<ThreadPool>,
}
//
impl Parallel {
    /// Use a dedicated pool with a certain number of threads
    pub fn with_threads(num_threads: NonZeroUsize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads.into())
            .thread_name(|idx| format!("gray-scott-{idx}"))
            .build()?;
        Ok(Self {
            pool: Some(pool),
            ..Default::default()
        })
    }

    /// Tune the grid size below which steps are computed sequentially
    pub fn sequential_len_threshold(mut self, threshold: usize) -> Self {
        self.sequential_len_threshold = threshold;
        self
    }
}
//
impl Default for Parallel {
    fn default() -> Self {
        Self {
            sequential_len_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            pool: None,
        }
    }
}
//
impl SimulateStep for Parallel {
    fn perform_step(&self, params: &Parameters, species: &mut Species) {
        let (in_u, in_v, out_u, out_v) = species.in_out();
        let (in_u, in_v) = (in_u.view(), in_v.view());
        let zip = Zip::indexed(out_u.view_mut())
            .and(out_v.view_mut())
            .and(in_u)
            .and(in_v);
        let cell = |(row, col): (usize, usize),
                    out_u: &mut Precision,
                    out_v: &mut Precision,
                    &u: &Precision,
                    &v: &Precision| {
            (*out_u, *out_v) = update_cell(params, [in_u, in_v], [row, col], [u, v]);
        };

        if in_u.len() < self.sequential_len_threshold {
            zip.for_each(cell);
        } else if let Some(pool) = &self.pool {
            pool.install(|| zip.par_for_each(cell));
        } else {
            zip.par_for_each(cell);
        }
    }
}

/// Compute the next `[u, v]` concentrations at some position of the grid
#[inline]
fn update_cell(
    params: &Parameters,
    [in_u, in_v]: [ArrayView2<Precision>; 2],
    pos: [usize; 2],
    [u, v]: [Precision; 2],
) -> (Precision, Precision) {
    // Diffusion
    let laplacian_u = periodic_stencil(in_u, pos, params.grid_spacing);
    let laplacian_v = periodic_stencil(in_v, pos, params.grid_spacing);

    // Reaction
    let reaction = u * v * v;
    let du = laplacian_u * params.diffusion_rate_u - reaction + params.feed_rate * (1.0 - u);
    let dv = laplacian_v * params.diffusion_rate_v + reaction
        - v * (params.feed_rate + params.kill_rate);

    // Integration
    let new_u = u + du * params.time_step;
    let new_v = v + dv * params.time_step;
    (
        new_u.clamp(MIN_CONCENTRATION, MAX_CONCENTRATION),
        new_v.clamp(MIN_CONCENTRATION, MAX_CONCENTRATION),
    )
}
