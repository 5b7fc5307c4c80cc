//! This crate collects elements that are shared between the CLI programs
//! data-to-pics and simulate.

pub mod colormap;
pub mod state;

use crate::{
    colormap::{ByteCast, ColorMapper, ColorScheme},
    state::{AppState, Field, DEFAULT_STEPS_PER_TICK},
};
use clap::Args;
use compute::{
    parallel::{Parallel, ThreadPoolBuildError},
    Model,
};
use data::{
    parameters::Parameters,
    presets::{self, Preset},
    resample, Precision,
};
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use log::LevelFilter;
use std::{num::NonZeroUsize, time::Duration};
use thiserror::Error;

/// CLI arguments shared by the "simulate" and "data-to-pics" executables
#[derive(Args, Clone, Debug)]
pub struct DisplayArgs {
    /// Chemical species to be displayed
    #[arg(long, value_enum, default_value_t, env = "GRAYSCOTT_FIELD")]
    pub field: Field,

    /// Color scheme used for display
    #[arg(long, value_enum, default_value_t, env = "GRAYSCOTT_SCHEME")]
    pub scheme: ColorScheme,

    /// Wrap color channels that overflow a byte instead of saturating them
    #[arg(long)]
    pub wrapping_bytes: bool,

    /// Maximal number of rows of the produced images
    ///
    /// Larger simulations are averaged down to the largest size that fits.
    #[arg(long, env = "GRAYSCOTT_DISPLAY_ROWS")]
    pub display_rows: Option<usize>,

    /// Maximal number of columns of the produced images
    #[arg(long, env = "GRAYSCOTT_DISPLAY_COLS")]
    pub display_cols: Option<usize>,
}
//
impl DisplayArgs {
    /// Color mapping selected by these arguments
    pub fn mapper(&self) -> ColorMapper {
        ColorMapper {
            scheme: self.scheme,
            cast: if self.wrapping_bytes {
                ByteCast::Wrapping
            } else {
                ByteCast::Saturating
            },
        }
    }

    /// Averaging block that brings a simulation of shape `shape` to the
    /// requested display size
    pub fn display_block(&self, shape: [usize; 2]) -> [usize; 2] {
        let max_shape = [
            self.display_rows.unwrap_or(shape[0]),
            self.display_cols.unwrap_or(shape[1]),
        ];
        resample::block_for(shape, max_shape)
    }
}

/// CLI arguments of the "simulate" executable that set up the simulation
#[derive(Args, Clone, Debug)]
pub struct SharedArgs {
    /// Named feed/kill rate preset (overridden by --feedrate and --killrate)
    #[arg(short, long, env = "GRAYSCOTT_PRESET")]
    pub preset: Option<String>,

    /// Rate at which V decays
    #[arg(short, long, env = "GRAYSCOTT_KILLRATE")]
    pub killrate: Option<Precision>,

    /// Rate at which U is replenished towards 1
    #[arg(short, long, env = "GRAYSCOTT_FEEDRATE")]
    pub feedrate: Option<Precision>,

    /// Number of simulation steps to perform between images
    #[arg(short = 'e', long, default_value_t = DEFAULT_STEPS_PER_TICK)]
    pub nbextrastep: usize,

    /// Number of rows of the simulation grid
    #[arg(short = 'r', long, default_value_t = 256)]
    pub nbrow: usize,

    /// Number of columns of the simulation grid
    #[arg(short = 'c', long, default_value_t = 256)]
    pub nbcol: usize,

    /// Number of processing threads
    #[arg(short = 'j', long, env = "GRAYSCOTT_NUM_THREADS")]
    pub num_threads: Option<NonZeroUsize>,

    /// Display configuration
    #[command(flatten)]
    pub display: DisplayArgs,
}
//
impl SharedArgs {
    /// Feed and kill rates, from explicit rates, then preset, then defaults
    pub fn feed_kill(&self) -> Result<[Precision; 2], ArgsError> {
        let preset = self.preset()?;
        Ok([
            self.feedrate.unwrap_or(preset.feed),
            self.killrate.unwrap_or(preset.kill),
        ])
    }

    /// Set up the application state described by these arguments
    pub fn make_state(&self) -> Result<AppState, ArgsError> {
        if self.nbrow == 0 || self.nbcol == 0 {
            return Err(ArgsError::EmptyGrid(self.nbrow, self.nbcol));
        }
        let [feed_rate, kill_rate] = self.feed_kill()?;
        let backend = match self.num_threads {
            Some(num_threads) => Parallel::with_threads(num_threads)?,
            None => Parallel::default(),
        };
        let model = Model::with_backend(
            self.nbcol,
            self.nbrow,
            Parameters::with_rates(feed_rate, kill_rate),
            backend,
        );
        let mut state = AppState::new(model);
        state.steps_per_tick = self.nbextrastep;
        state.field = self.display.field;
        state.mapper = self.display.mapper();
        state.display_block = self.display.display_block([self.nbrow, self.nbcol]);
        Ok(state)
    }

    /// Selected preset, or the default one
    fn preset(&self) -> Result<&'static Preset, ArgsError> {
        match &self.preset {
            Some(name) => presets::find(name).ok_or_else(|| ArgsError::UnknownPreset {
                name: name.clone(),
                known: presets::names().collect::<Vec<_>>().join(", "),
            }),
            None => Ok(&presets::DEFAULT_PRESET),
        }
    }
}

/// Errors that can occur while interpreting CLI arguments
#[derive(Debug, Error)]
pub enum ArgsError {
    /// Requested preset does not exist
    #[error("unknown preset {name:?}, known presets are: {known}")]
    UnknownPreset { name: String, known: String },

    /// Requested simulation grid has no cells
    #[error("simulation grid must not be empty, got {0} rows and {1} columns")]
    EmptyGrid(usize, usize),

    /// Failed to set up the simulation thread pool
    #[error("failed to set up simulation thread pool")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Enable logging to stderr
///
/// The default verbosity is `info`, or `debug` in debug builds. It can be
/// overridden using the `RUST_LOG` environment variable.
pub fn init_logging() {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

/// Set up a progress bar for a certain number of work items
pub fn init_progress_reporting(message: &'static str, len: usize) -> ProgressBar {
    let progress = ProgressBar::new(len as u64)
        .with_message(message)
        .with_style(
            ProgressStyle::with_template("{msg} {pos}/{len} {wide_bar} {elapsed}/~{duration}")
                .expect("Failed to parse style"),
        )
        .with_finish(ProgressFinish::AndClear);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        shared: SharedArgs,
    }

    fn parse(args: &[&str]) -> SharedArgs {
        TestArgs::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .shared
    }

    #[test]
    fn rates_priority() {
        let default = Parameters::default();
        assert_eq!(
            parse(&[]).feed_kill().unwrap(),
            [default.feed_rate, default.kill_rate]
        );

        let coral = presets::find("Coral").unwrap();
        assert_eq!(
            parse(&["--preset", "coral"]).feed_kill().unwrap(),
            [coral.feed, coral.kill]
        );
        assert_eq!(
            parse(&["--preset", "coral", "--feedrate", "0.01"])
                .feed_kill()
                .unwrap(),
            [0.01, coral.kill]
        );
    }

    #[test]
    fn unknown_preset() {
        let error = parse(&["--preset", "plaid"]).feed_kill().unwrap_err();
        assert!(matches!(error, ArgsError::UnknownPreset { .. }));
        assert!(error.to_string().contains("Coral"));
    }

    #[test]
    fn state_setup() {
        let args = parse(&[
            "-r", "64", "-c", "32", "-e", "5", "--scheme", "reverse-red", "--field", "u",
            "--wrapping-bytes", "--display-rows", "16",
        ]);
        let state = args.make_state().unwrap();
        assert_eq!(state.model.shape(), [64, 32]);
        assert_eq!(state.steps_per_tick, 5);
        assert_eq!(state.field, Field::U);
        assert_eq!(state.mapper.scheme, ColorScheme::ReverseRed);
        assert_eq!(state.mapper.cast, ByteCast::Wrapping);
        assert_eq!(state.display_block, [4, 1]);
        assert_eq!(state.display_shape(), [16, 32]);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let error = parse(&["-r", "0"]).make_state().unwrap_err();
        assert!(matches!(error, ArgsError::EmptyGrid(0, 256)));
    }
}
