use std::ops::{Index, IndexMut};

/// Dense row-major matrix addressed by `(row, col)`.
///
/// The network keeps one square instance as its weight matrix, indexed by
/// `(source node, destination node)` in absolute node numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Square zero matrix of side `n`.
    pub fn square(n: usize) -> Matrix {
        Matrix::zeros(n, n)
    }

    /// Sets every entry back to zero without reallocating.
    pub fn clear(&mut self) {
        for row in &mut self.data {
            row.fill(0.0);
        }
    }

    /// Iterates `(row, col, value)` over every entry, row by row.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, &value)| (i, j, value))
        })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row][col]
    }
}
