//! Focal Shannon evenness
//!
//! For every cell of a categorical raster, tallies the classes of the cell
//! and of its neighbors in a moving window, then reduces the tally to
//! Shannon evenness. Proportions are always taken against the full
//! neighborhood size; windows clipped by the raster edge or by missing
//! cells are not renormalized.

use ndarray::Array2;
use tracing::debug;

use crate::maybe_rayon::*;
use focalscape_core::raster::{ClassLabel, Neighborhood, Raster, WeightKernel};
use focalscape_core::{Algorithm, Error, Result};

use super::class_index::{unique_classes, ClassIndexMap};
use super::shannon::shannon_evenness_score;

/// Moving window definition
#[derive(Debug, Clone, PartialEq)]
pub enum FocalWindow {
    /// One of the preset shapes
    Preset(Neighborhood),
    /// Explicit weight kernel
    Kernel(WeightKernel),
}

impl Default for FocalWindow {
    fn default() -> Self {
        FocalWindow::Preset(Neighborhood::Queen3x3)
    }
}

impl FocalWindow {
    /// Neighbor offsets selected by this window (center excluded)
    pub fn offsets(&self) -> Result<Vec<(isize, isize)>> {
        match self {
            FocalWindow::Preset(n) => Ok(n.kernel()?.offsets()),
            FocalWindow::Kernel(k) => Ok(k.offsets()),
        }
    }
}

/// Parameters for focal evenness
#[derive(Debug, Clone)]
pub struct EvennessParams<T: ClassLabel> {
    /// Ordered class set. `None` derives it from the raster.
    pub classes: Option<Vec<T>>,
    /// Moving window
    pub window: FocalWindow,
}

impl<T: ClassLabel> Default for EvennessParams<T> {
    fn default() -> Self {
        Self {
            classes: None,
            window: FocalWindow::default(),
        }
    }
}

/// Focal evenness algorithm
#[derive(Debug, Clone, Default)]
pub struct FocalEvenness;

impl Algorithm for FocalEvenness {
    type Input = Raster<i32>;
    type Output = Raster<f64>;
    type Params = EvennessParams<i32>;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Focal Evenness"
    }

    fn description(&self) -> &'static str {
        "Moving-window Shannon evenness of a categorical raster"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        shannon_evenness(&input, params)
    }
}

/// Focal Shannon evenness with the class set and offsets built from `params`
pub fn shannon_evenness<T: ClassLabel>(
    raster: &Raster<T>,
    params: EvennessParams<T>,
) -> Result<Raster<f64>> {
    let classes = params
        .classes
        .unwrap_or_else(|| unique_classes(raster));
    let class_index = ClassIndexMap::new(&classes);
    let offsets = params.window.offsets()?;
    focal_evenness(raster, &class_index, &offsets)
}

/// Focal Shannon evenness over explicit class index and neighbor offsets.
///
/// For each non-missing cell the tally holds the cell itself plus every
/// in-bounds, non-missing neighbor at `offsets`. The score is
/// `H / ln(num_classes)` with proportions `count / offsets.len()`.
///
/// Missing cells yield `NaN`.
///
/// # Errors
/// - [`Error::DegenerateClassSet`] with fewer than two classes
/// - [`Error::EmptyNeighborhood`] when `offsets` is empty
/// - [`Error::UnknownClassLabel`] for a non-missing label outside `classes`
///
/// Any error aborts the whole computation.
pub fn focal_evenness<T: ClassLabel>(
    raster: &Raster<T>,
    classes: &ClassIndexMap<T>,
    offsets: &[(isize, isize)],
) -> Result<Raster<f64>> {
    if classes.len() < 2 {
        return Err(Error::DegenerateClassSet {
            classes: classes.len(),
        });
    }
    if offsets.is_empty() {
        return Err(Error::EmptyNeighborhood);
    }

    let (rows, cols) = raster.shape();
    debug!(
        rows,
        cols,
        classes = classes.len(),
        neighbors = offsets.len(),
        "focal evenness"
    );

    let row_data: Vec<Vec<f64>> = (0..rows)
        .into_par_iter()
        .map(|row| -> Result<Vec<f64>> {
            let mut tally = vec![0usize; classes.len()];
            let mut out = vec![f64::NAN; cols];
            for (col, cell) in out.iter_mut().enumerate() {
                if let Some(v) = cell_evenness(raster, classes, offsets, row, col, &mut tally)? {
                    *cell = v;
                }
            }
            Ok(out)
        })
        .collect::<Result<Vec<_>>>()?;

    build_output(raster, rows, cols, row_data.into_iter().flatten().collect())
}

/// Evenness of one window, `None` when the center cell is missing.
/// `tally` is scratch space of length `classes.len()`.
fn cell_evenness<T: ClassLabel>(
    raster: &Raster<T>,
    classes: &ClassIndexMap<T>,
    offsets: &[(isize, isize)],
    row: usize,
    col: usize,
    tally: &mut [usize],
) -> Result<Option<f64>> {
    let (rows, cols) = raster.shape();
    let missing = raster.missing_value();

    let center = unsafe { raster.get_unchecked(row, col) };
    if center == missing {
        return Ok(None);
    }

    tally.fill(0);
    tally[classes.index_at(center, row, col)?] += 1;

    for &(dr, dc) in offsets {
        let nr = row as isize + dr;
        let nc = col as isize + dc;

        if nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols {
            let (nr, nc) = (nr as usize, nc as usize);
            let v = unsafe { raster.get_unchecked(nr, nc) };
            if v != missing {
                tally[classes.index_at(v, nr, nc)?] += 1;
            }
        }
    }

    shannon_evenness_score(tally, offsets.len(), classes.len()).map(Some)
}

fn build_output(
    template: &Raster<impl ClassLabel>,
    rows: usize,
    cols: usize,
    data: Vec<f64>,
) -> Result<Raster<f64>> {
    let mut output = template.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), data)
        .map_err(|e| Error::Other(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use focalscape_core::GeoTransform;

    fn queen_offsets() -> Vec<(isize, isize)> {
        Neighborhood::Queen3x3.kernel().unwrap().offsets()
    }

    /// 10x10 raster with 4 quadrants: class 1,2,3,4
    fn quadrant_raster() -> Raster<i32> {
        let mut r = Raster::new(10, 10);
        r.set_transform(GeoTransform::new(0.0, 10.0, 1.0, -1.0));
        for row in 0..10 {
            for col in 0..10 {
                let class = match (row < 5, col < 5) {
                    (true, true) => 1,
                    (true, false) => 2,
                    (false, true) => 3,
                    (false, false) => 4,
                };
                r.set(row, col, class).unwrap();
            }
        }
        r
    }

    #[test]
    fn test_center_differs_from_ring() {
        let r = Raster::from_rows(vec![vec![1, 1, 1], vec![1, 2, 1], vec![1, 1, 1]]).unwrap();
        let classes = ClassIndexMap::new(&[1, 2]);
        let result = focal_evenness(&r, &classes, &queen_offsets()).unwrap();

        // tally {1: 8, 2: 1} over 8 neighbors
        let v = result.get(1, 1).unwrap();
        let expected = (0.125 * 8f64.ln()) / 2f64.ln();
        assert_relative_eq!(v, expected, epsilon = 1e-12);
        assert_relative_eq!(v, 0.375, epsilon = 1e-12);
    }

    #[test]
    fn test_single_class_with_exact_count_is_zero() {
        // Interior cell with one missing neighbor: 1 + 7 = 8 = |offsets|
        let mut r = Raster::filled(5, 5, 3);
        r.set_nodata(Some(0));
        r.set(1, 1, 0).unwrap();
        let classes = ClassIndexMap::new(&[3, 5]);
        let result = focal_evenness(&r, &classes, &queen_offsets()).unwrap();
        assert_relative_eq!(result.get(2, 2).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_neighborhood_is_one() {
        // Top-middle cell under a rook window: center 1, below 1, left 2,
        // right 2, above off-grid -> two of each class over 4 offsets
        let r = Raster::from_rows(vec![vec![2, 1, 2], vec![1, 1, 1]]).unwrap();
        let classes = ClassIndexMap::new(&[1, 2]);
        let offsets = Neighborhood::Rook3x3.kernel().unwrap().offsets();
        let result = focal_evenness(&r, &classes, &offsets).unwrap();
        assert_relative_eq!(result.get(0, 1).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        let r = quadrant_raster();
        let classes = ClassIndexMap::new(&[1, 2, 3, 4]);
        let kernel =
            WeightKernel::from_rows(vec![vec![0, 0, 0], vec![0, 0, 1], vec![0, 1, 1]]).unwrap();
        let offsets = kernel.offsets();
        assert_eq!(offsets.len(), 3);

        // Center (4,4) plus right, below and diagonal: one cell of each of
        // the four classes against a denominator of 3
        let result = focal_evenness(&r, &classes, &offsets).unwrap();
        let p = 1.0f64 / 3.0;
        let expected = -4.0 * p * p.ln() / 4f64.ln();
        assert_relative_eq!(result.get(4, 4).unwrap(), expected, epsilon = 1e-12);
        assert!(expected > 1.0);
    }

    #[test]
    fn test_edge_scores_below_interior() {
        // 2x2 tiling of four classes; `clipped` is `full` with its top four
        // rows cut off, so its row 0 sees a clipped copy of full's row 4.
        // Tallies over 24 slots: interior {9, 6, 6, 4}, edge {6, 4, 3, 2},
        // corner {4, 2, 2, 1}
        let tile = |row: usize, col: usize| ((row % 2) * 2 + col % 2) as i32;
        let full = Raster::from_array(Array2::from_shape_fn((9, 9), |(r, c)| tile(r, c)));
        let clipped = Raster::from_array(Array2::from_shape_fn((5, 9), |(r, c)| tile(r + 4, c)));

        let classes = ClassIndexMap::new(&[0, 1, 2, 3]);
        let offsets = Neighborhood::Square(2).kernel().unwrap().offsets();
        let full = focal_evenness(&full, &classes, &offsets).unwrap();
        let clipped = focal_evenness(&clipped, &classes, &offsets).unwrap();

        let interior = full.get(4, 4).unwrap();
        let edge = clipped.get(0, 4).unwrap();
        let corner = clipped.get(0, 0).unwrap();
        assert!(edge < interior, "edge {} >= interior {}", edge, interior);
        assert!(corner < edge, "corner {} >= edge {}", corner, edge);
    }

    #[test]
    fn test_missing_center_yields_nan() {
        let mut r = quadrant_raster();
        r.set_nodata(Some(-9999));
        r.set(0, 0, -9999).unwrap();
        let classes = ClassIndexMap::new(&[1, 2, 3, 4]);
        let result = focal_evenness(&r, &classes, &queen_offsets()).unwrap();
        assert!(result.get(0, 0).unwrap().is_nan());
        assert!(!result.get(0, 1).unwrap().is_nan());
        assert!(result.nodata().is_some_and(f64::is_nan));
        assert_eq!(result.shape(), r.shape());
        assert_eq!(result.transform(), r.transform());
    }

    #[test]
    fn test_missing_neighbors_are_skipped() {
        let mut with_gap = Raster::filled(3, 3, 1);
        with_gap.set(0, 0, i32::MIN).unwrap();
        with_gap.set(1, 1, 2).unwrap();
        let classes = ClassIndexMap::new(&[1, 2]);
        let result = focal_evenness(&with_gap, &classes, &queen_offsets()).unwrap();

        // tally {1: 7, 2: 1} over 8
        let p1 = 7.0f64 / 8.0;
        let p2 = 1.0f64 / 8.0;
        let expected = -(p1 * p1.ln() + p2 * p2.ln()) / 2f64.ln();
        assert_relative_eq!(result.get(1, 1).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_label_aborts() {
        let r = quadrant_raster();
        let classes = ClassIndexMap::new(&[1, 2, 3]);
        let err = focal_evenness(&r, &classes, &queen_offsets()).unwrap_err();
        assert!(matches!(err, Error::UnknownClassLabel { ref label, .. } if label == "4"));
    }

    #[test]
    fn test_degenerate_and_empty_inputs() {
        let r = Raster::filled(4, 4, 1);
        assert!(matches!(
            focal_evenness(&r, &ClassIndexMap::new(&[1]), &queen_offsets()),
            Err(Error::DegenerateClassSet { classes: 1 })
        ));
        assert!(matches!(
            focal_evenness(&r, &ClassIndexMap::new(&[1, 2]), &[]),
            Err(Error::EmptyNeighborhood)
        ));
    }

    #[test]
    fn test_parallel_matches_cell_by_cell() {
        let r = quadrant_raster();
        let classes = ClassIndexMap::new(&[4, 3, 2, 1]);
        let offsets = Neighborhood::Circle(2).kernel().unwrap().offsets();
        let result = focal_evenness(&r, &classes, &offsets).unwrap();

        let mut tally = vec![0; classes.len()];
        for row in 0..10 {
            for col in 0..10 {
                let expected = cell_evenness(&r, &classes, &offsets, row, col, &mut tally)
                    .unwrap()
                    .unwrap();
                assert_eq!(result.get(row, col).unwrap().to_bits(), expected.to_bits());
            }
        }
    }

    #[test]
    fn test_shannon_evenness_derives_classes() {
        let r = quadrant_raster();
        let result = shannon_evenness(&r, EvennessParams::default()).unwrap();
        let explicit = focal_evenness(&r, &ClassIndexMap::new(&[1, 2, 3, 4]), &queen_offsets())
            .unwrap();
        assert_eq!(result.data(), explicit.data());
    }

    #[test]
    fn test_algorithm_trait() {
        let algo = FocalEvenness;
        assert_eq!(algo.name(), "Focal Evenness");
        let params = EvennessParams {
            classes: Some(vec![1, 2, 3, 4]),
            window: FocalWindow::Preset(Neighborhood::Square(2)),
        };
        let result = algo.execute(quadrant_raster(), params).unwrap();
        // 25 cells of class 1 against 24 neighbor slots
        let p = 25.0f64 / 24.0;
        let expected = -p * p.ln() / 4f64.ln();
        assert_relative_eq!(result.get(2, 2).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_algorithm_default_params() {
        let algo = FocalEvenness;
        assert!(!algo.description().is_empty());
        let result = algo.execute_default(quadrant_raster()).unwrap();
        let explicit = focal_evenness(
            &quadrant_raster(),
            &ClassIndexMap::new(&[1, 2, 3, 4]),
            &Neighborhood::Queen3x3.kernel().unwrap().offsets(),
        )
        .unwrap();
        assert_eq!(result.data(), explicit.data());
    }
}
