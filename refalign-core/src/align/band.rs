//! Flat banded matrix storage

use std::ops::{Index, IndexMut};

/// Row-major matrix in a single contiguous buffer.
///
/// Rows are diagonal shifts of the band and columns are reference prefix
/// lengths, so `(row, col)` is addressed as `row * cols + col`.
#[derive(Debug, Clone)]
pub struct Band2d<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Band2d<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

impl<T> Index<(usize, usize)> for Band2d<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Band2d<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}
