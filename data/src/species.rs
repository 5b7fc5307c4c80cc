//! Concentration of chemical species

use crate::{grid::Grid, Precision};
use std::ops::Range;

/// Concentration of all species involved
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct Species {
    /// Concentration of species U
    pub u: Evolving,

    /// Concentration of species V
    pub v: Evolving,
}
//
impl Species {
    /// Set up species concentration storage in the homogeneous steady state
    ///
    /// `shape` specifies the concentration matrix dimensions, e.g. [1080, 1920]
    pub fn new(shape: [usize; 2]) -> Self {
        Self {
            u: Evolving::new(Grid::ones(shape)),
            v: Evolving::new(Grid::zeros(shape)),
        }
    }

    /// Check out the shape of the concentration matrices
    pub fn shape(&self) -> [usize; 2] {
        self.u.shape()
    }

    /// Go back to the homogeneous steady state, U = 1 and V = 0 everywhere
    pub fn clear(&mut self) {
        self.u.input_mut().fill(1.0);
        self.v.input_mut().fill(0.0);
    }

    /// Set both species to a certain value over a rectangular region
    pub fn fill_slice(&mut self, slice: [Range<usize>; 2], value: Precision) {
        let [rows, cols] = slice;
        self.u
            .input_mut()
            .fill_region(rows.clone(), cols.clone(), value);
        self.v.input_mut().fill_region(rows, cols, value);
    }

    /// Replace both input concentrations at once
    pub fn replace(&mut self, u: Grid, v: Grid) {
        debug_assert_eq!(u.shape(), self.shape());
        debug_assert_eq!(v.shape(), self.shape());
        self.u.0[0] = u;
        self.v.0[0] = v;
    }

    /// Access the input and output concentrations of both species
    pub fn in_out(&mut self) -> (&Grid, &Grid, &mut Grid, &mut Grid) {
        let (in_u, out_u) = self.u.in_out();
        let (in_v, out_v) = self.v.in_out();
        (in_u, in_v, out_u, out_v)
    }

    /// Make the output concentrations become the input ones
    pub fn flip(&mut self) {
        self.u.flip();
        self.v.flip();
    }
}

/// Pair of grids where one acts as an input and the other as an output
///
/// Simulation steps read the input and write the output, which only becomes
/// visible once [`Evolving::flip()`] is called.
#[derive(Clone, Debug, PartialEq)]
pub struct Evolving([Grid; 2]);
//
impl Evolving {
    /// Access the input concentration
    pub fn input(&self) -> &Grid {
        &self.0[0]
    }

    /// Access the input and output concentration
    pub fn in_out(&mut self) -> (&Grid, &mut Grid) {
        let [input, output] = &mut self.0;
        (input, output)
    }

    /// Set up storage with a certain input and a scratch output
    fn new(input: Grid) -> Self {
        let output = Grid::zeros(input.shape());
        Self([input, output])
    }

    /// Check the shape of concentration matrices
    fn shape(&self) -> [usize; 2] {
        self.0[0].shape()
    }

    /// Mutable access to the input concentration
    fn input_mut(&mut self) -> &mut Grid {
        &mut self.0[0]
    }

    /// Make the output concentration become the input one
    fn flip(&mut self) {
        let [input, output] = &mut self.0;
        std::mem::swap(input, output);
    }
}
