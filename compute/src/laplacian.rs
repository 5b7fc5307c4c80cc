//! Discrete Laplacian with periodic boundary conditions
//!
//! We use the 5-points stencil, where each point interacts with its four
//! axial neighbors. Edges of the grid wrap around, so the last row and column
//! are adjacent to the first ones.

use data::{grid::Grid, Precision};
use ndarray::{ArrayView2, Zip};

/// Compute the discrete Laplacian of a whole grid
pub fn laplacian(grid: &Grid, grid_spacing: Precision) -> Grid {
    let mut result = Grid::zeros(grid.shape());
    let input = grid.view();
    Zip::indexed(result.view_mut()).for_each(|(row, col), out| {
        *out = periodic_stencil(input, [row, col], grid_spacing);
    });
    result
}

/// Compute the discrete Laplacian at a single `[row, col]` position
///
/// This is computed as a sum of differences between each neighbor and the
/// center point, which is mathematically equivalent to the usual
/// `neighbor_sum - 4 * center` formulation but yields exactly zero on
/// uniform regions.
#[inline]
pub fn periodic_stencil(
    input: ArrayView2<Precision>,
    [row, col]: [usize; 2],
    grid_spacing: Precision,
) -> Precision {
    let (rows, cols) = input.dim();
    let center = input[[row, col]];
    let up = input[[(row + rows - 1) % rows, col]];
    let down = input[[(row + 1) % rows, col]];
    let left = input[[row, (col + cols - 1) % cols]];
    let right = input[[row, (col + 1) % cols]];
    ((up - center) + (down - center) + (left - center) + (right - center))
        / (grid_spacing * grid_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_field_is_flat() {
        for value in [0.0, 1e-5, 0.1, 0.5, 1.0, 123.456] {
            let grid = Grid::from_elem([5, 7], value);
            for spacing in [0.01, 0.5, 1.0, 3.0] {
                let result = laplacian(&grid, spacing);
                assert_eq!(result.shape(), [5, 7]);
                assert!(result.iter().all(|&x| x == 0.0));
            }
        }
    }

    #[test]
    fn single_spike() {
        let mut grid = Grid::zeros([4, 4]);
        *grid.get_mut([1, 2]).unwrap() = 1.0;
        let result = laplacian(&grid, 0.5);
        let scale = 1.0 / (0.5 * 0.5);
        assert_eq!(result.get([1, 2]), Some(-4.0 * scale));
        for neighbor in [[0, 2], [2, 2], [1, 1], [1, 3]] {
            assert_eq!(result.get(neighbor), Some(scale));
        }
        assert_eq!(result.get([0, 0]), Some(0.0));
        assert_eq!(result.iter().sum::<Precision>(), 0.0);
    }

    #[test]
    fn edges_wrap_around() {
        let mut grid = Grid::zeros([3, 4]);
        *grid.get_mut([0, 0]).unwrap() = 1.0;
        let result = laplacian(&grid, 1.0);
        assert_eq!(result.get([0, 0]), Some(-4.0));
        for neighbor in [[2, 0], [1, 0], [0, 3], [0, 1]] {
            assert_eq!(result.get(neighbor), Some(1.0));
        }
        assert_eq!(result.get([2, 3]), Some(0.0));
    }

    #[test]
    fn matches_neighbor_sum_formula() {
        let values = (0..20).map(|i| ((i * 7) % 11) as Precision / 10.0).collect();
        let grid = Grid::from_row_major([4, 5], values).unwrap();
        let spacing = 0.01;
        let result = laplacian(&grid, spacing);
        let [rows, cols] = grid.shape();
        for row in 0..rows {
            for col in 0..cols {
                let at = |r: usize, c: usize| grid.get([r, c]).unwrap();
                let neighbor_sum = at((row + rows - 1) % rows, col)
                    + at((row + 1) % rows, col)
                    + at(row, (col + cols - 1) % cols)
                    + at(row, (col + 1) % cols);
                let expected = (neighbor_sum - 4.0 * at(row, col)) / (spacing * spacing);
                let actual = result.get([row, col]).unwrap();
                assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}
