use clap::Parser;
use data::snapshot::Snapshot;
use eyre::{eyre, Result, WrapErr};
use image::RgbImage;
use log::debug;
use rayon::prelude::*;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use ui::{state, DisplayArgs};

/// Convert Gray-Scott simulation snapshots to images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot files to be converted
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory where output images will be saved
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Display configuration
    #[command(flatten)]
    display: DisplayArgs,
}

fn main() -> Result<()> {
    // Enable logging to stderr
    ui::init_logging();

    // Parse CLI arguments
    let args = Args::parse();
    let output_dir = args.output_dir.clone().unwrap_or_else(|| "./".into());
    std::fs::create_dir_all(&output_dir)
        .wrap_err_with(|| format!("Failed to create output directory {}", output_dir.display()))?;

    // Convert all snapshots
    let outputs = output_paths(&args.inputs, &output_dir)?;
    let progress = ui::init_progress_reporting("Generating image", args.inputs.len());
    args.inputs.par_iter().zip(&outputs).try_for_each(|(input, output)| {
        convert(input, output, &args.display)
            .wrap_err_with(|| format!("Failed to convert {}", input.display()))?;
        progress.inc(1);
        Ok::<_, eyre::Report>(())
    })?;
    progress.finish();
    Ok(())
}

/// Render one snapshot file into a PNG image
fn convert(input: &Path, output: &Path, display: &DisplayArgs) -> Result<()> {
    // Load snapshot
    let snapshot = Snapshot::read(input)?;
    let shape = snapshot.shape();
    debug!(
        "Loaded {}x{} snapshot with feed rate {}, kill rate {}",
        snapshot.width(),
        snapshot.height(),
        snapshot.feed_rate(),
        snapshot.kill_rate()
    );

    // Generate image
    let block = display.display_block(shape);
    let rgb = state::render_grid(
        display.field.snapshot_grid(&snapshot),
        display.mapper(),
        block,
    );
    let [rows, cols] = [shape[0] / block[0], shape[1] / block[1]];
    let image = RgbImage::from_raw(cols as u32, rows as u32, rgb)
        .ok_or_else(|| eyre!("Rendered buffer does not match a {cols}x{rows} image"))?;

    // Save image
    image.save(output)?;
    Ok(())
}

/// Image file name associated with a snapshot file
///
/// A `.json` extension is replaced with `.png`, any other file name gets
/// `.png` appended.
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let name = match input.extension() {
        Some(ext) if ext == "json" => input.file_stem(),
        _ => input.file_name(),
    }
    .unwrap_or(input.as_os_str());
    let mut name = name.to_os_string();
    name.push(".png");
    output_dir.join(name)
}

/// Image file names for all snapshot files, rejecting inputs that would
/// overwrite each other's output
fn output_paths(inputs: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources = HashMap::with_capacity(inputs.len());
    inputs
        .iter()
        .map(|input| {
            let output = output_path(input, output_dir);
            if let Some(previous) = sources.insert(output.clone(), input) {
                return Err(eyre!(
                    "{} and {} would both be rendered to {}",
                    previous.display(),
                    input.display(),
                    output.display()
                ));
            }
            Ok(output)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        assert_eq!(
            output_path(Path::new("runs/final.json"), Path::new("pics")),
            PathBuf::from("pics/final.png")
        );
        assert_eq!(
            output_path(Path::new("step.10"), Path::new(".")),
            PathBuf::from("./step.10.png")
        );
        assert_ne!(
            output_path(Path::new("step.10"), Path::new(".")),
            output_path(Path::new("step.20"), Path::new("."))
        );
    }

    #[test]
    fn colliding_outputs_are_rejected() {
        let inputs = [PathBuf::from("runs/a/final.json"), PathBuf::from("runs/b/final.json")];
        let error = output_paths(&inputs, Path::new("pics")).unwrap_err();
        assert!(error.to_string().contains("pics/final.png"));

        let inputs = [PathBuf::from("runs/a/final.json"), PathBuf::from("runs/b/step.json")];
        assert_eq!(
            output_paths(&inputs, Path::new("pics")).unwrap(),
            vec![PathBuf::from("pics/final.png"), PathBuf::from("pics/step.png")]
        );
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
