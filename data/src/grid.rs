//! Dense 2D scalar fields
//!
//! A [`Grid`] is the storage used for the concentration of one chemical
//! species. Shapes are expressed as `[rows, cols]`, i.e. `[height, width]`,
//! and elements are laid out in row-major order.

use crate::Precision;
use ndarray::{s, Array2, ArrayView2, ArrayViewMut2};
use std::ops::{Add, AddAssign, Mul, Range, Sub};

/// Dense row-major 2D array of scalars
#[derive(Clone, Debug, PartialEq)]
pub struct Grid(Array2<Precision>);
//
impl Grid {
    /// Create a grid of a certain shape, filled with a certain value
    pub fn from_elem(shape: [usize; 2], value: Precision) -> Self {
        Self(Array2::from_elem(shape, value))
    }

    /// Create a grid of a certain shape, filled with zeros
    pub fn zeros(shape: [usize; 2]) -> Self {
        Self(Array2::zeros(shape))
    }

    /// Create a grid of a certain shape, filled with ones
    pub fn ones(shape: [usize; 2]) -> Self {
        Self(Array2::ones(shape))
    }

    /// Create a grid from row-major values
    ///
    /// Returns `None` if the number of values does not match the shape.
    pub fn from_row_major(shape: [usize; 2], values: Vec<Precision>) -> Option<Self> {
        Array2::from_shape_vec(shape, values).ok().map(Self)
    }

    /// Wrap an existing ndarray
    pub fn from_array(array: Array2<Precision>) -> Self {
        Self(array)
    }

    /// Shape of the grid as `[rows, cols]`
    pub fn shape(&self) -> [usize; 2] {
        let &[rows, cols] = self.0.shape() else {
            unreachable!("Array2 always has two axes")
        };
        [rows, cols]
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.0.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.0.nrows()
    }

    /// Read the value at some `[row, col]` position, if it is in bounds
    pub fn get(&self, pos: [usize; 2]) -> Option<Precision> {
        self.0.get(pos).copied()
    }

    /// Mutable access to the value at some `[row, col]` position
    pub fn get_mut(&mut self, pos: [usize; 2]) -> Option<&mut Precision> {
        self.0.get_mut(pos)
    }

    /// View a rectangular sub-region of the grid
    ///
    /// Panics if the region is not fully contained in the grid.
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> ArrayView2<'_, Precision> {
        self.0.slice(s![rows, cols])
    }

    /// Fill a rectangular sub-region of the grid with a value
    ///
    /// Panics if the region is not fully contained in the grid.
    pub fn fill_region(&mut self, rows: Range<usize>, cols: Range<usize>, value: Precision) {
        self.0.slice_mut(s![rows, cols]).fill(value);
    }

    /// Copy a block of values into the grid, top-left corner at `origin`
    ///
    /// Panics if the block does not fit in the grid.
    pub fn write_region(&mut self, origin: [usize; 2], block: ArrayView2<'_, Precision>) {
        let [row, col] = origin;
        let rows = row..row + block.nrows();
        let cols = col..col + block.ncols();
        self.0.slice_mut(s![rows, cols]).assign(&block);
    }

    /// Set every element to the same value
    pub fn fill(&mut self, value: Precision) {
        self.0.fill(value);
    }

    /// Overwrite this grid's contents with those of another grid of equal shape
    pub fn assign(&mut self, other: &Grid) {
        debug_assert_eq!(self.shape(), other.shape());
        self.0.assign(&other.0);
    }

    /// Apply a function to every element, producing a new grid
    pub fn map(&self, f: impl FnMut(Precision) -> Precision) -> Grid {
        Self(self.0.mapv(f))
    }

    /// Force every element into the `[min, max]` range
    pub fn clamp(&mut self, min: Precision, max: Precision) {
        self.0.mapv_inplace(|x| x.clamp(min, max));
    }

    /// Copy out the elements in row-major order
    pub fn to_row_major(&self) -> Vec<Precision> {
        self.0.iter().copied().collect()
    }

    /// Iterate over elements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Precision> + '_ {
        self.0.iter()
    }

    /// View the grid as a 2D ndarray
    pub fn view(&self) -> ArrayView2<'_, Precision> {
        self.0.view()
    }

    /// Mutably view the grid as a 2D ndarray
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, Precision> {
        self.0.view_mut()
    }
}

impl Add for &Grid {
    type Output = Grid;

    fn add(self, rhs: &Grid) -> Grid {
        Grid(&self.0 + &rhs.0)
    }
}

impl Sub for &Grid {
    type Output = Grid;

    fn sub(self, rhs: &Grid) -> Grid {
        Grid(&self.0 - &rhs.0)
    }
}

impl Mul for &Grid {
    type Output = Grid;

    fn mul(self, rhs: &Grid) -> Grid {
        Grid(&self.0 * &rhs.0)
    }
}

impl Mul<Precision> for &Grid {
    type Output = Grid;

    fn mul(self, rhs: Precision) -> Grid {
        Grid(&self.0 * rhs)
    }
}

impl AddAssign<&Grid> for Grid {
    fn add_assign(&mut self, rhs: &Grid) {
        self.0 += &rhs.0;
    }
}
