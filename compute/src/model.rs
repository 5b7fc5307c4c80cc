//! Gray-Scott reaction-diffusion model

use crate::{parallel::Parallel, SimulateStep};
use data::{
    grid::Grid,
    parameters::Parameters,
    snapshot::{ShapeMismatch, Snapshot},
    species::Species,
    Precision,
};
use log::{debug, info, trace};

/// Concentration that [`Model::paint_default()`] sets both species to
pub const DEFAULT_PAINT_VALUE: Precision = 0.5;

/// Reaction-diffusion model of two chemical species U and V
///
/// After every step, all concentrations lie within
/// [`MIN_CONCENTRATION`](data::parameters::MIN_CONCENTRATION)..=[`MAX_CONCENTRATION`](data::parameters::MAX_CONCENTRATION).
#[derive(Debug)]
pub struct Model<Backend: SimulateStep = Parallel> {
    /// Simulation parameters
    params: Parameters,

    /// Chemical species concentrations
    species: Species,

    /// Compute backend
    backend: Backend,
}
//
impl Model {
    /// Set up a `width` x `height` model with default parameters
    ///
    /// Both species start in the homogeneous steady state U = 1, V = 0.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_backend(width, height, Parameters::default(), Parallel::default())
    }
}
//
impl<Backend: SimulateStep> Model<Backend> {
    /// Set up a model with custom parameters and compute backend
    pub fn with_backend(
        width: usize,
        height: usize,
        params: Parameters,
        backend: Backend,
    ) -> Self {
        assert!(
            width > 0 && height > 0,
            "Simulation grid must not be empty, got {width}x{height}"
        );
        Self {
            params,
            species: Species::new([height, width]),
            backend,
        }
    }

    /// Grid shape as `[rows, cols]`
    pub fn shape(&self) -> [usize; 2] {
        self.species.shape()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    /// Current simulation parameters
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Concentration of species U
    pub fn u(&self) -> &Grid {
        self.species.u.input()
    }

    /// Concentration of species V
    pub fn v(&self) -> &Grid {
        self.species.v.input()
    }

    /// Change the feed and kill rates
    ///
    /// Any value is accepted. Rates far from the usual 0..0.1 range will
    /// typically drive the system towards a uniform state.
    pub fn set_parameters(&mut self, feed_rate: Precision, kill_rate: Precision) {
        debug!("Switching to feed rate {feed_rate}, kill rate {kill_rate}");
        self.params.feed_rate = feed_rate;
        self.params.kill_rate = kill_rate;
    }

    /// Advance the simulation by one time step
    pub fn step(&mut self) {
        self.backend.perform_step(&self.params, &mut self.species);
        self.species.flip();
    }

    /// Advance the simulation by several time steps
    pub fn steps(&mut self, count: usize) {
        debug!("Performing {count} simulation steps");
        for _ in 0..count {
            self.step();
        }
    }

    /// Go back to the homogeneous steady state, keeping current parameters
    pub fn clear(&mut self) {
        info!("Clearing simulation state");
        self.species.clear();
    }

    /// Set both species to `value` in a square ending at some position
    ///
    /// The affected region spans rows `center_row - radius ..= center_row` and
    /// columns `center_col - radius ..= center_col`. Both ends of each range
    /// are clamped to the grid, so out-of-bounds requests never fail.
    pub fn paint(&mut self, center_row: isize, center_col: isize, radius: usize, value: Precision) {
        let [rows, cols] = self.shape();
        let clamp = |pos: isize, len: usize| pos.clamp(0, len as isize - 1) as usize;
        let range = |center: isize, len: usize| {
            let start = clamp(center.saturating_sub_unsigned(radius), len);
            let end = clamp(center, len);
            start..end + 1
        };
        let row_range = range(center_row, rows);
        let col_range = range(center_col, cols);
        trace!("Painting {value} over rows {row_range:?}, cols {col_range:?}");
        self.species.fill_slice([row_range, col_range], value);
    }

    /// Like [`paint()`](Self::paint), with the [`DEFAULT_PAINT_VALUE`]
    pub fn paint_default(&mut self, center_row: isize, center_col: isize, radius: usize) {
        self.paint(center_row, center_col, radius, DEFAULT_PAINT_VALUE);
    }

    /// Capture the full simulation state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.params.feed_rate,
            self.params.kill_rate,
            self.u().clone(),
            self.v().clone(),
        )
        .expect("U and V always have the same shape")
    }

    /// Restore the simulation state from a snapshot
    ///
    /// Fails without modifying the model if the snapshot does not have the
    /// same shape as the model.
    pub fn load(&mut self, snapshot: &Snapshot) -> Result<(), ShapeMismatch> {
        snapshot.check_shape(self.shape())?;
        let (feed_rate, kill_rate) = (snapshot.feed_rate(), snapshot.kill_rate());
        info!(
            "Loading {}x{} snapshot with feed rate {feed_rate}, kill rate {kill_rate}",
            snapshot.width(),
            snapshot.height()
        );
        self.params.feed_rate = feed_rate;
        self.params.kill_rate = kill_rate;
        self.species
            .replace(snapshot.u().clone(), snapshot.v().clone());
        Ok(())
    }
}
