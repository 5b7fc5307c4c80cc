//! Gray-Scott reaction simulation
//!
//! The [`Model`] owns the concentrations of both chemical species along with
//! the simulation parameters. The numerical work of a time step is delegated
//! to a [`SimulateStep`] backend, of which two are provided:
//!
//! - [`naive::Naive`] spells out the update rule as a chain of whole-grid
//!   array operations. It is easy to check against the math, but slow.
//! - [`parallel::Parallel`] fuses the whole update into one pass over the grid
//!   and distributes that pass across CPU cores.

pub mod laplacian;
pub mod model;
pub mod naive;
pub mod parallel;

pub use model::{Model, DEFAULT_PAINT_VALUE};

use data::{parameters::Parameters, species::Species};

/// Simulation compute backend interface
pub trait SimulateStep {
    /// Perform a single simulation time step
    ///
    /// Implementations must read the input concentrations of `species` and
    /// write the final result, clamped to
    /// [`MIN_CONCENTRATION`](data::parameters::MIN_CONCENTRATION)..=[`MAX_CONCENTRATION`](data::parameters::MAX_CONCENTRATION),
    /// into its output concentrations. It is the job of the caller to flip the
    /// concentrations once it wants the result to become visible.
    fn perform_step(&self, params: &Parameters, species: &mut Species);
}
