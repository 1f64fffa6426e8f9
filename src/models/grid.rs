//! 2D 网格容器
//!
//! Row-major storage addressed by `(x, y)`, 0-indexed, with `x` in
//! `[0, width)` and `y` in `[0, height)`. Every cell is initialised on
//! construction.

use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use crate::error::{Result, TerrainError};

/// Offsets of the Moore neighborhood (8 neighbors, center excluded).
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Check dimensions before anything is allocated.
    fn check_dimensions(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimension { width, height });
        }
        width
            .checked_mul(height)
            .ok_or(TerrainError::InvalidDimension { width, height })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let len = Self::check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Ok(Self { width, height, cells })
    }

    /// Wrap existing row-major storage. The length must be `width * height`.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        let len = Self::check_dimensions(width, height)?;
        if cells.len() != len {
            return Err(TerrainError::InvalidDimension { width, height });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Grids are never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a (possibly negative) coordinate lies inside the grid.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> TerrainError {
        TerrainError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Strict accessor: coordinates outside the grid are an error.
    pub fn get(&self, x: usize, y: usize) -> Result<&T> {
        if x < self.width && y < self.height {
            Ok(&self.cells[self.offset(x, y)])
        } else {
            Err(self.out_of_bounds(x, y))
        }
    }

    /// Strict setter: coordinates outside the grid are an error.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.cells[i] = value;
            Ok(())
        } else {
            Err(self.out_of_bounds(x, y))
        }
    }

    /// Bounds-tolerant lookup for neighbor scans that deliberately probe
    /// past the edges. Outside cells are `None`, never wrapped.
    #[inline]
    pub fn probe(&self, x: isize, y: isize) -> Option<&T> {
        if self.contains(x, y) {
            Some(&self.cells[self.offset(x as usize, y as usize)])
        } else {
            None
        }
    }

    /// Iterate `((x, y), &value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i % width, i / width), v))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    /// In-bounds positions of the 8-neighborhood around `(x, y)`.
    pub fn moore_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        MOORE_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            self.contains(nx, ny).then(|| (nx as usize, ny as usize))
        })
    }

    /// Read-only square window of the given radius centred on `(x, y)`,
    /// clipped at the grid edges.
    pub fn window(&self, x: usize, y: usize, radius: usize) -> GridWindow<'_, T> {
        GridWindow {
            grid: self,
            x0: x.saturating_sub(radius),
            y0: y.saturating_sub(radius),
            x1: x.saturating_add(radius).min(self.width - 1),
            y1: y.saturating_add(radius).min(self.height - 1),
        }
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| pred(v)).count()
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// A grid of the given size with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Result<Self> {
        let len = Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
        })
    }
}

impl<T: Send> Grid<T> {
    /// Disjoint mutable rows as `(y, row)` for parallel writers; no cell is
    /// reachable from two rows.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [T])> + '_ {
        self.cells.par_chunks_exact_mut(self.width).enumerate()
    }
}

impl<T: Sync> Grid<T> {
    pub fn par_rows(&self) -> impl IndexedParallelIterator<Item = (usize, &[T])> + '_ {
        self.cells.par_chunks_exact(self.width).enumerate()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    /// Panics on out-of-bounds coordinates, like slice indexing.
    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        &self.cells[self.offset(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        let i = self.offset(x, y);
        &mut self.cells[i]
    }
}

/// Read-only rectangular view into a [`Grid`].
///
/// Derived views cannot be written through; there is no mutating API.
#[derive(Debug, Clone, Copy)]
pub struct GridWindow<'a, T> {
    grid: &'a Grid<T>,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl<'a, T> GridWindow<'a, T> {
    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }

    /// Top-left corner of the window in grid coordinates.
    pub fn origin(&self) -> (usize, usize) {
        (self.x0, self.y0)
    }

    /// Iterate `((x, y), &value)` in grid coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &'a T)> + 'a {
        let grid = self.grid;
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| {
            let row = &grid.cells[grid.offset(x0, y)..=grid.offset(x1, y)];
            row.iter().enumerate().map(move |(i, v)| ((x0 + i, y), v))
        })
    }

    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.iter().any(|(_, v)| pred(v))
    }
}
