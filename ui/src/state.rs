//! Application state shared by the simulation drivers
//!
//! Everything a driver needs to keep between two timer ticks or input events
//! lives in [`AppState`], which the driver owns and passes around explicitly.

use crate::colormap::ColorMapper;
use clap::ValueEnum;
use compute::{parallel::Parallel, Model, SimulateStep};
use data::{
    grid::Grid,
    presets::Preset,
    resample,
    snapshot::{Snapshot, SnapshotError},
};
use image::RgbImage;
use log::info;
use std::path::Path;

/// Default number of simulation steps per timer tick
pub const DEFAULT_STEPS_PER_TICK: usize = 34;

/// Chemical species whose concentration is displayed
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum Field {
    /// Species U, which is fed into the system
    U,

    /// Species V, which is killed off
    #[default]
    V,
}
//
impl Field {
    /// Access the concentration of this species within a model
    pub fn grid<Backend: SimulateStep>(self, model: &Model<Backend>) -> &Grid {
        match self {
            Self::U => model.u(),
            Self::V => model.v(),
        }
    }

    /// Access the concentration of this species within a snapshot
    pub fn snapshot_grid(self, snapshot: &Snapshot) -> &Grid {
        match self {
            Self::U => snapshot.u(),
            Self::V => snapshot.v(),
        }
    }
}

/// Render a model's species concentration as a row-major RGB buffer
///
/// The concentration is first averaged over blocks of `display_block` cells,
/// whose shape must evenly divide the model's shape.
pub fn render<Backend: SimulateStep>(
    model: &Model<Backend>,
    field: Field,
    mapper: ColorMapper,
    display_block: [usize; 2],
) -> Vec<u8> {
    render_grid(field.grid(model), mapper, display_block)
}

/// Render a concentration grid as a row-major RGB buffer
///
/// See [`render()`] for the meaning of `display_block`.
pub fn render_grid(grid: &Grid, mapper: ColorMapper, display_block: [usize; 2]) -> Vec<u8> {
    if display_block == [1, 1] {
        mapper.colorize(grid)
    } else {
        mapper.colorize(&resample::downsample(grid, display_block))
    }
}

/// State of a simulation driver
#[derive(Debug)]
pub struct AppState<Backend: SimulateStep = Parallel> {
    /// Simulation
    pub model: Model<Backend>,

    /// Whether timer ticks should advance the simulation
    pub running: bool,

    /// Displayed chemical species
    pub field: Field,

    /// Color mapping used for display
    pub mapper: ColorMapper,

    /// Number of simulation steps per timer tick
    pub steps_per_tick: usize,

    /// Block of simulation cells averaged into one displayed pixel
    pub display_block: [usize; 2],
}
//
impl<Backend: SimulateStep> AppState<Backend> {
    /// Start driving a model with default display settings
    pub fn new(model: Model<Backend>) -> Self {
        Self {
            model,
            running: true,
            field: Field::default(),
            mapper: ColorMapper::default(),
            steps_per_tick: DEFAULT_STEPS_PER_TICK,
            display_block: [1, 1],
        }
    }

    /// Handle a timer tick, telling whether the simulation moved forward
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.model.steps(self.steps_per_tick);
        }
        self.running
    }

    /// Pause or resume the simulation, returning the new running state
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        info!(
            "Simulation {}",
            if self.running { "resumed" } else { "paused" }
        );
        self.running
    }

    /// Perturb the simulation at some grid position
    pub fn paint(&mut self, row: isize, col: isize, radius: usize) {
        self.model.paint_default(row, col, radius);
    }

    /// Switch to the feed and kill rates of a preset
    pub fn apply_preset(&mut self, preset: &Preset) {
        info!("Switching to preset {:?}", preset.name);
        self.model.set_parameters(preset.feed, preset.kill);
    }

    /// Shape of rendered images, as `[rows, cols]`
    pub fn display_shape(&self) -> [usize; 2] {
        let [rows, cols] = self.model.shape();
        [rows / self.display_block[0], cols / self.display_block[1]]
    }

    /// Render the displayed species as a row-major RGB buffer
    pub fn render(&self) -> Vec<u8> {
        render(&self.model, self.field, self.mapper, self.display_block)
    }

    /// Render the displayed species as an image
    pub fn render_image(&self) -> RgbImage {
        let [rows, cols] = self.display_shape();
        RgbImage::from_raw(cols as u32, rows as u32, self.render())
            .expect("Rendered buffer should match the display shape")
    }

    /// Save the simulation state to a snapshot file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        info!("Saving snapshot to {}", path.display());
        self.model.snapshot().write(path)
    }

    /// Restore the simulation state from a snapshot file
    ///
    /// The current state is left untouched if the file cannot be read or if
    /// its shape does not match that of the simulation.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::read(path)?;
        self.model.load(&snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::{ByteCast, ColorScheme};
    use compute::naive::Naive;
    use data::{parameters::Parameters, presets};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ui-state-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn ticks_respect_running_flag() {
        let mut state = AppState::new(Model::new(16, 16));
        state.steps_per_tick = 3;
        state.paint(8, 8, 3);
        let before = state.model.snapshot();

        assert!(!state.toggle_running());
        assert!(!state.tick());
        assert_eq!(state.model.snapshot(), before);

        assert!(state.toggle_running());
        assert!(state.tick());
        assert_ne!(state.model.snapshot(), before);
    }

    #[test]
    fn presets_change_rates() {
        let mut state = AppState::new(Model::new(4, 4));
        let coral = presets::find("coral").unwrap();
        state.apply_preset(coral);
        assert_eq!(state.model.parameters().feed_rate, coral.feed);
        assert_eq!(state.model.parameters().kill_rate, coral.kill);
    }

    #[test]
    fn render_full_resolution() {
        let mut state = AppState::new(Model::new(6, 4));
        state.field = Field::U;
        state.mapper = ColorMapper {
            scheme: ColorScheme::Grayscale,
            cast: ByteCast::Saturating,
        };
        let rgb = state.render();
        assert_eq!(rgb.len(), 6 * 4 * 3);
        assert!(rgb.iter().all(|&b| b == 255));

        state.field = Field::V;
        assert!(state.render().iter().all(|&b| b == 0));
    }

    #[test]
    fn render_downsampled() {
        let mut state = AppState::new(Model::with_backend(8, 4, Parameters::default(), Naive));
        state.display_block = [2, 4];
        state.mapper.scheme = ColorScheme::Grayscale;
        state.model.paint(1, 3, 1, 1.0);
        assert_eq!(state.display_shape(), [2, 2]);

        let image = state.render_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0).0, [128, 128, 128]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 0]);
    }

    #[test]
    fn save_and_load() {
        let path = temp_path("save-load");
        let mut state = AppState::new(Model::new(12, 10));
        state.paint(5, 5, 2);
        state.tick();
        state.save(&path).unwrap();

        let mut restored = AppState::new(Model::new(12, 10));
        restored.load(&path).unwrap();
        assert_eq!(restored.model.snapshot(), state.model.snapshot());

        let mut mismatched = AppState::new(Model::new(10, 12));
        let before = mismatched.model.snapshot();
        let error = mismatched.load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(error, SnapshotError::ShapeMismatch(_)));
        assert_eq!(mismatched.model.snapshot(), before);
    }
}
