//! Reduction of simulation grids to a coarser display resolution

use crate::{array2, grid::Grid, Precision};
use ndarray::Array2;

/// Average each `block_shape` block of `grid` into a single output cell
///
/// The grid's shape must be an exact multiple of `block_shape` along both
/// axes. This is only checked in debug builds, in release builds the trailing
/// rows and columns that do not fill a whole block are ignored.
pub fn downsample(grid: &Grid, block_shape: [usize; 2]) -> Grid {
    let shape = grid.shape();
    debug_assert!(
        (0..2).all(|i| block_shape[i] > 0 && shape[i] % block_shape[i] == 0),
        "Grid shape {shape:?} is not a multiple of block shape {block_shape:?}"
    );
    if block_shape == [1, 1] {
        return grid.clone();
    }
    let out_shape = array2(|i| shape[i] / block_shape[i]);
    let means = grid
        .view()
        .exact_chunks(block_shape)
        .into_iter()
        .map(|block| block.sum() / block.len() as Precision)
        .collect::<Vec<_>>();
    let means = Array2::from_shape_vec(out_shape, means)
        .expect("exact_chunks yields one block per output cell, in row-major order");
    Grid::from_array(means)
}

/// Smallest block shape that brings `shape` within `max_shape`
///
/// Only exact divisors of the grid's shape are considered, so that the
/// result can be fed to [`downsample()`]. Axes whose length already fits use
/// a block length of 1.
pub fn block_for(shape: [usize; 2], max_shape: [usize; 2]) -> [usize; 2] {
    array2(|i| {
        let max = max_shape[i].max(1);
        (1..=shape[i].max(1))
            .find(|&block| shape[i] % block == 0 && shape[i] / block <= max)
            .unwrap_or(shape[i].max(1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_rows_average_out() {
        let values = (0..4)
            .flat_map(|row| std::iter::repeat((row % 2) as Precision).take(4))
            .collect();
        let grid = Grid::from_row_major([4, 4], values).unwrap();
        let reduced = downsample(&grid, [2, 2]);
        assert_eq!(reduced.shape(), [2, 2]);
        assert!(reduced.iter().all(|&x| x == 0.5));
    }

    #[test]
    fn block_means() {
        let grid = Grid::from_row_major([2, 4], vec![1., 2., 3., 4., 5., 6., 7., 8.]).unwrap();
        let reduced = downsample(&grid, [2, 2]);
        assert_eq!(reduced.to_row_major(), vec![3.5, 5.5]);
        let rows = downsample(&grid, [1, 4]);
        assert_eq!(rows.to_row_major(), vec![2.5, 6.5]);
    }

    #[test]
    fn identity_block() {
        let grid = Grid::from_elem([3, 5], 0.3);
        assert_eq!(downsample(&grid, [1, 1]), grid);
    }

    #[test]
    fn block_selection() {
        assert_eq!(block_for([512, 512], [256, 256]), [2, 2]);
        assert_eq!(block_for([100, 300], [100, 100]), [1, 3]);
        assert_eq!(block_for([90, 90], [40, 40]), [3, 3]);
        assert_eq!(block_for([7, 7], [3, 3]), [7, 7]);
    }
}
