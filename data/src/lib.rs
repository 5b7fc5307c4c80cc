//! Data formats used by the Gray-Scott reaction simulation

pub mod grid;
pub mod parameters;
pub mod presets;
pub mod resample;
pub mod snapshot;
pub mod species;

/// Computation precision
pub type Precision = f64;

/// Build an array of two elements from a function of the element index
///
/// Handy for computations that must be carried out on both axes of a grid.
#[inline]
pub fn array2<T>(f: impl FnMut(usize) -> T) -> [T; 2] {
    std::array::from_fn(f)
}
