use clap::Parser;
use eyre::{eyre, Result, WrapErr};
use image::RgbImage;
use log::info;
use std::{num::NonZeroUsize, path::PathBuf, str::FromStr, sync::mpsc};
use ui::SharedArgs;

/// Perform Gray-Scott simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CLI arguments shared with the "data-to-pics" executable
    #[command(flatten)]
    shared: SharedArgs,

    /// Number of images to be created
    #[arg(short, long, default_value_t = 100)]
    nbimage: usize,

    /// Directory where one PNG image per tick will be saved
    ///
    /// No image is produced if this is not specified.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Perturbation as ROW,COL,RADIUS (can be repeated)
    ///
    /// Sets both species to 0.5 over the square of side RADIUS+1 whose
    /// bottom-right corner is at ROW,COL. By default, a single perturbation
    /// is applied at the center of the simulation domain.
    #[arg(long, allow_hyphen_values = true)]
    seed: Vec<Seed>,

    /// Snapshot to resume the simulation from, instead of seeding it
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Path where the final simulation snapshot will be saved
    #[arg(short, long, default_value = "output.json")]
    save: PathBuf,

    /// Size of the image buffer between the compute and I/O thread
    ///
    /// A larger buffer enables better performance, at the cost of higher RAM
    /// utilization. 2 is the minimum to fully decouple compute and I/O.
    #[arg(long, default_value_t = NonZeroUsize::new(2).unwrap())]
    output_buffer: NonZeroUsize,
}

/// Initial perturbation of the simulation domain
#[derive(Copy, Clone, Debug, PartialEq)]
struct Seed {
    row: isize,
    col: isize,
    radius: usize,
}
//
impl Seed {
    /// Perturbation centered on a domain of a certain shape
    fn centered([rows, cols]: [usize; 2]) -> Self {
        let radius = (rows.min(cols) / 10).max(1);
        Self {
            row: ((rows + radius) / 2) as isize,
            col: ((cols + radius) / 2) as isize,
            radius,
        }
    }
}
//
impl FromStr for Seed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        let fields = s.split(',').map(str::trim).collect::<Vec<_>>();
        let [row, col, radius] = fields[..] else {
            return Err(format!("expected ROW,COL,RADIUS, got {s:?}"));
        };
        let parse_err = |e: std::num::ParseIntError| format!("invalid seed {s:?}: {e}");
        Ok(Self {
            row: row.parse().map_err(parse_err)?,
            col: col.parse().map_err(parse_err)?,
            radius: radius.parse().map_err(parse_err)?,
        })
    }
}

fn main() -> Result<()> {
    // Enable logging to stderr
    ui::init_logging();

    // Parse CLI arguments and set up the simulation
    let args = Args::parse();
    let mut state = args.shared.make_state()?;
    info!(
        "Simulating a {}x{} domain with parameters {:?}",
        state.model.width(),
        state.model.height(),
        state.model.parameters()
    );

    // Bring the simulation out of its initial equilibrium
    if let Some(path) = &args.resume {
        state
            .load(path)
            .wrap_err_with(|| format!("Failed to resume from {}", path.display()))?;
    } else {
        let seeds = if args.seed.is_empty() {
            vec![Seed::centered(state.model.shape())]
        } else {
            args.seed.clone()
        };
        for Seed { row, col, radius } in seeds {
            state.paint(row, col, radius);
        }
    }
    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir).wrap_err_with(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
    }

    // Set up progress reporting
    let progress = ui::init_progress_reporting("Running simulation step", args.nbimage);

    // Run the simulation on the main thread, write images on another one
    std::thread::scope(|s| -> Result<()> {
        let (sender, receiver) = mpsc::sync_channel::<(usize, RgbImage)>(args.output_buffer.into());
        let output_dir = args.output_dir.as_deref();
        let progress = &progress;
        let writer = s.spawn(move || -> Result<()> {
            for (idx, image) in receiver {
                if let Some(output_dir) = output_dir {
                    let path = output_dir.join(format!("{idx}.png"));
                    image
                        .save(&path)
                        .wrap_err_with(|| format!("Failed to save image {}", path.display()))?;
                }
                progress.inc(1);
            }
            Ok(())
        });

        for idx in 0..args.nbimage {
            state.tick();
            let image = if args.output_dir.is_some() {
                state.render_image()
            } else {
                RgbImage::default()
            };
            if sender.send((idx, image)).is_err() {
                // The writer thread is gone, its result tells why
                break;
            }
        }
        drop(sender);
        writer
            .join()
            .map_err(|_| eyre!("Image writer thread panicked"))?
    })?;
    progress.finish();

    // Save final simulation state
    state
        .save(&args.save)
        .wrap_err_with(|| format!("Failed to save snapshot to {}", args.save.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parsing() {
        assert_eq!(
            "10, -3,4".parse::<Seed>(),
            Ok(Seed {
                row: 10,
                col: -3,
                radius: 4
            })
        );
        assert!("1,2".parse::<Seed>().is_err());
        assert!("1,2,-3".parse::<Seed>().is_err());
    }

    #[test]
    fn centered_seed() {
        let seed = Seed::centered([100, 200]);
        assert_eq!(seed.radius, 10);
        assert_eq!([seed.row, seed.col], [55, 105]);
        assert_eq!(Seed::centered([4, 4]).radius, 1);
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
