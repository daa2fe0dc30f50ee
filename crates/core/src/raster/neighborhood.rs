//! Neighborhood kernels for focal operations
//!
//! A [`WeightKernel`] is a small odd-sized weight matrix centered on the cell
//! being processed. Nonzero weights select neighbor positions; the center is
//! never a neighbor, since focal operations account for the cell itself
//! separately. [`Neighborhood`] provides the usual preset shapes.

use crate::error::{Error, Result};
use ndarray::Array2;

/// Rectangular kernel of inclusion weights with odd dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightKernel {
    weights: Array2<i32>,
}

impl WeightKernel {
    /// Wrap a weight matrix, rejecting empty or even-sized kernels
    pub fn new(weights: Array2<i32>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::KernelShape {
                rows,
                cols,
                reason: "kernel must not be empty".into(),
            });
        }
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(Error::KernelShape {
                rows,
                cols,
                reason: "kernel dimensions must be odd to have a center cell".into(),
            });
        }
        Ok(Self { weights })
    }

    /// Build from nested rows; all rows must have equal length
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(Error::KernelShape {
                rows: n_rows,
                cols: n_cols,
                reason: format!("ragged kernel row of length {}", bad.len()),
            });
        }
        let flat: Vec<i32> = rows.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| Error::Other(e.to_string()))?;
        Self::new(weights)
    }

    /// Kernel dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.weights.dim()
    }

    /// Position of the center cell
    pub fn center(&self) -> (usize, usize) {
        let (rows, cols) = self.weights.dim();
        (rows / 2, cols / 2)
    }

    /// Relative `(dr, dc)` offsets of all selected neighbors, in row-major
    /// kernel order. `(-1, 0)` is the cell one row above the center.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let (cr, cc) = self.center();
        self.weights
            .indexed_iter()
            .filter(|&((r, c), &w)| w != 0 && (r, c) != (cr, cc))
            .map(|((r, c), _)| (r as isize - cr as isize, c as isize - cc as isize))
            .collect()
    }
}

/// Preset neighborhood shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// 3x3, 8 neighbors
    #[default]
    Queen3x3,
    /// 3x3 without corners, 4 neighbors
    Rook3x3,
    /// 5x5, 24 neighbors
    Queen5x5,
    /// Square window of given radius
    Square(usize),
    /// Circular window of given radius (in cells)
    Circle(usize),
}

impl Neighborhood {
    /// Radius in cells
    pub fn radius(&self) -> usize {
        match self {
            Neighborhood::Queen3x3 | Neighborhood::Rook3x3 => 1,
            Neighborhood::Queen5x5 => 2,
            Neighborhood::Square(r) | Neighborhood::Circle(r) => *r,
        }
    }

    /// Side length of the enclosing kernel
    pub fn size(&self) -> usize {
        self.radius() * 2 + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius() == 0 {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: "0".to_string(),
                reason: "neighborhood radius must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Check if a relative position is within this neighborhood
    pub fn contains(&self, dr: isize, dc: isize) -> bool {
        match self {
            Neighborhood::Queen3x3 => dr.abs() <= 1 && dc.abs() <= 1,
            Neighborhood::Rook3x3 => dr.abs() + dc.abs() <= 1,
            Neighborhood::Queen5x5 => dr.abs() <= 2 && dc.abs() <= 2,
            Neighborhood::Square(r) => {
                let r = *r as isize;
                dr.abs() <= r && dc.abs() <= r
            }
            Neighborhood::Circle(r) => {
                let r = *r as isize;
                dr * dr + dc * dc <= r * r
            }
        }
    }

    /// Weight kernel for this shape: 1 inside, 0 outside and at the center
    pub fn kernel(&self) -> Result<WeightKernel> {
        self.validate()?;
        let size = self.size();
        let r = self.radius() as isize;
        let weights = Array2::from_shape_fn((size, size), |(i, j)| {
            let (dr, dc) = (i as isize - r, j as isize - r);
            i32::from((dr, dc) != (0, 0) && self.contains(dr, dc))
        });
        WeightKernel::new(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_queen_offsets_from_ones_kernel() {
        let kernel = WeightKernel::from_rows(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]])
            .unwrap();
        let mut offsets = kernel.offsets();
        offsets.sort();
        assert_eq!(
            offsets,
            vec![
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1)
            ]
        );
    }

    #[test]
    fn test_center_weight_is_ignored() {
        let kernel = WeightKernel::new(array![[0, 1, 0], [1, 7, 1], [0, 1, 0]]).unwrap();
        let offsets = kernel.offsets();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_any_nonzero_weight_selects() {
        let kernel = WeightKernel::new(array![[0, 0, -3], [0, 0, 0], [2, 0, 0]]).unwrap();
        assert_eq!(kernel.offsets(), vec![(-1, 1), (1, -1)]);
    }

    #[test]
    fn test_rectangular_kernel() {
        let kernel = WeightKernel::new(array![[1, 1, 1, 1, 1]]).unwrap();
        assert_eq!(kernel.center(), (0, 2));
        assert_eq!(kernel.offsets(), vec![(0, -2), (0, -1), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_all_zero_kernel_is_empty() {
        let kernel = WeightKernel::new(array![[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
        assert!(kernel.offsets().is_empty());
    }

    #[test]
    fn test_even_kernel_rejected() {
        let err = WeightKernel::new(Array2::ones((2, 3))).unwrap_err();
        assert!(matches!(err, Error::KernelShape { rows: 2, cols: 3, .. }));
        assert!(WeightKernel::new(Array2::zeros((0, 0))).is_err());
    }

    #[test]
    fn test_ragged_kernel_rejected() {
        let err = WeightKernel::from_rows(vec![vec![1, 1, 1], vec![1, 0], vec![1, 1, 1]])
            .unwrap_err();
        assert!(matches!(err, Error::KernelShape { .. }));
    }

    #[test]
    fn test_preset_kernels() {
        assert_eq!(Neighborhood::Queen3x3.kernel().unwrap().offsets().len(), 8);
        assert_eq!(Neighborhood::Rook3x3.kernel().unwrap().offsets().len(), 4);
        assert_eq!(Neighborhood::Queen5x5.kernel().unwrap().offsets().len(), 24);
        assert_eq!(Neighborhood::Square(3).kernel().unwrap().offsets().len(), 48);
        // r=2 disk: 13 cells including the center
        assert_eq!(Neighborhood::Circle(2).kernel().unwrap().offsets().len(), 12);
        assert!(Neighborhood::Square(0).kernel().is_err());
    }
}
