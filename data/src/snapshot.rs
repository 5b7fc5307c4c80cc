//! Saving and restoring the full state of a simulation
//!
//! Snapshots are stored as JSON documents with the following keys:
//!
//! - `width` and `height`: grid dimensions
//! - `f` and `k`: feed and kill rates
//! - `u` and `v`: concentrations of both species, in row-major order

use crate::{grid::Grid, Precision};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};
use thiserror::Error;

/// Full simulation state at some point in time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawSnapshot", try_from = "RawSnapshot")]
pub struct Snapshot {
    /// Feed rate
    feed_rate: Precision,

    /// Kill rate
    kill_rate: Precision,

    /// Concentration of species U
    u: Grid,

    /// Concentration of species V
    v: Grid,
}
//
impl Snapshot {
    /// Assemble a snapshot from its parts
    ///
    /// Fails if the two concentration grids do not have the same shape.
    pub fn new(
        feed_rate: Precision,
        kill_rate: Precision,
        u: Grid,
        v: Grid,
    ) -> Result<Self, ShapeMismatch> {
        if u.shape() != v.shape() {
            return Err(ShapeMismatch {
                expected: u.shape(),
                found: v.shape(),
            });
        }
        Ok(Self {
            feed_rate,
            kill_rate,
            u,
            v,
        })
    }

    /// Grid shape as `[rows, cols]`
    pub fn shape(&self) -> [usize; 2] {
        self.u.shape()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.u.width()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.u.height()
    }

    /// Feed rate at the time the snapshot was taken
    pub fn feed_rate(&self) -> Precision {
        self.feed_rate
    }

    /// Kill rate at the time the snapshot was taken
    pub fn kill_rate(&self) -> Precision {
        self.kill_rate
    }

    /// Concentration of species U
    pub fn u(&self) -> &Grid {
        &self.u
    }

    /// Concentration of species V
    pub fn v(&self) -> &Grid {
        &self.v
    }

    /// Check that this snapshot can be loaded into a grid of shape `expected`
    pub fn check_shape(&self, expected: [usize; 2]) -> Result<(), ShapeMismatch> {
        let found = self.shape();
        if found == expected {
            Ok(())
        } else {
            Err(ShapeMismatch { expected, found })
        }
    }

    /// Write the snapshot to a file, creating or truncating it
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a snapshot back from a file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A snapshot's shape does not match that of the simulation it is loaded into
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
#[error("expected a grid of shape {expected:?}, found one of shape {found:?}")]
pub struct ShapeMismatch {
    /// Shape of the simulation, as `[rows, cols]`
    pub expected: [usize; 2],

    /// Shape of the snapshot, as `[rows, cols]`
    pub found: [usize; 2],
}

/// Errors that can occur while saving or restoring snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to access the snapshot file
    #[error("failed to access snapshot file")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON, or is missing fields
    ///
    /// Also covers snapshots whose concentration arrays do not match their
    /// declared dimensions.
    #[error("failed to (de)serialize snapshot")]
    Format(#[from] serde_json::Error),

    /// Snapshot does not fit the simulation it is loaded into
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
}

/// Concentration arrays do not match the declared snapshot dimensions
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "snapshot of shape {shape:?} should hold {} values per species, found u: {u_len}, v: {v_len}",
    describe_len(.expected)
)]
pub struct LengthMismatch {
    /// Declared shape, as `[rows, cols]`
    shape: [usize; 2],

    /// Expected number of values per species, `None` if it overflows `usize`
    expected: Option<usize>,

    /// Number of values found for species U
    u_len: usize,

    /// Number of values found for species V
    v_len: usize,
}

fn describe_len(len: &Option<usize>) -> String {
    match len {
        Some(len) => len.to_string(),
        None => "more than usize::MAX".to_string(),
    }
}

/// On-disk representation of a [`Snapshot`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct RawSnapshot {
    width: usize,
    height: usize,
    f: Precision,
    k: Precision,
    u: Vec<Precision>,
    v: Vec<Precision>,
}
//
impl From<Snapshot> for RawSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            width: snapshot.width(),
            height: snapshot.height(),
            f: snapshot.feed_rate,
            k: snapshot.kill_rate,
            u: snapshot.u.to_row_major(),
            v: snapshot.v.to_row_major(),
        }
    }
}
//
impl TryFrom<RawSnapshot> for Snapshot {
    type Error = LengthMismatch;

    fn try_from(raw: RawSnapshot) -> Result<Self, LengthMismatch> {
        let shape = [raw.height, raw.width];
        let error = LengthMismatch {
            shape,
            expected: raw.width.checked_mul(raw.height),
            u_len: raw.u.len(),
            v_len: raw.v.len(),
        };
        if error.expected.is_none() {
            return Err(error);
        }
        let u = Grid::from_row_major(shape, raw.u).ok_or(error)?;
        let v = Grid::from_row_major(shape, raw.v).ok_or(error)?;
        Ok(Self {
            feed_rate: raw.f,
            kill_rate: raw.k,
            u,
            v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("data-snapshot-{}-{name}.json", std::process::id()))
    }

    fn sample() -> Snapshot {
        let u = Grid::from_row_major([2, 3], vec![1., 0.9, 0.8, 0.7, 0.6, 0.5]).unwrap();
        let v = Grid::from_row_major([2, 3], vec![0., 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        Snapshot::new(0.035, 0.065, u, v).unwrap()
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["width"], 3);
        assert_eq!(json["height"], 2);
        assert_eq!(json["f"], 0.035);
        assert_eq!(json["k"], 0.065);
        assert_eq!(json["u"].as_array().unwrap().len(), 6);
        assert_eq!(json["v"][5], 0.5);
    }

    #[test]
    fn file_round_trip() {
        let path = temp_path("round-trip");
        let snapshot = sample();
        snapshot.write(&path).unwrap();
        let restored = Snapshot::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn rejects_truncated_arrays() {
        let json = r#"{"width": 2, "height": 2, "f": 0.1, "k": 0.1, "u": [1, 1, 1], "v": [0, 0, 0, 0]}"#;
        let result = serde_json::from_str::<Snapshot>(json);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let raw = RawSnapshot {
            width: usize::MAX / 2,
            height: 3,
            f: 0.1,
            k: 0.1,
            u: Vec::new(),
            v: Vec::new(),
        };
        let error = Snapshot::try_from(raw.clone()).unwrap_err();
        assert_eq!(error.expected, None);
        assert!(error.to_string().contains("more than usize::MAX"));

        let json = serde_json::to_string(&raw).unwrap();
        let result = serde_json::from_str::<Snapshot>(&json);
        assert!(result.is_err());
    }

    #[test]
    fn full_precision_round_trip() {
        let path = temp_path("full-precision");
        let values = |seed: Precision| {
            (0..12)
                .map(|i| (seed + i as Precision).sqrt().fract() / 3.0)
                .collect::<Vec<_>>()
        };
        let u = Grid::from_row_major([3, 4], values(2.0)).unwrap();
        let v = Grid::from_row_major([3, 4], values(7.0)).unwrap();
        let snapshot = Snapshot::new(0.0545, 0.062, u, v).unwrap();
        snapshot.write(&path).unwrap();
        let restored = Snapshot::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let bits = |grid: &Grid| grid.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(restored.u()), bits(snapshot.u()));
        assert_eq!(bits(restored.v()), bits(snapshot.v()));
    }

    #[test]
    fn rejects_mismatched_species() {
        let result = Snapshot::new(0.1, 0.1, Grid::ones([2, 2]), Grid::zeros([2, 3]));
        assert_eq!(
            result.unwrap_err(),
            ShapeMismatch {
                expected: [2, 2],
                found: [2, 3]
            }
        );
    }

    #[test]
    fn shape_check() {
        let snapshot = sample();
        assert!(snapshot.check_shape([2, 3]).is_ok());
        let error = snapshot.check_shape([3, 2]).unwrap_err();
        assert_eq!(error.expected, [3, 2]);
        assert_eq!(error.found, [2, 3]);
    }

    #[test]
    fn missing_file() {
        let error = Snapshot::read(temp_path("does-not-exist")).unwrap_err();
        assert!(matches!(error, SnapshotError::Io(_)));
    }
}
