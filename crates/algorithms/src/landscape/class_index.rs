//! Dense indexing of categorical class labels

use std::collections::{BTreeSet, HashMap};

use focalscape_core::raster::{ClassLabel, Raster};
use focalscape_core::{Error, Result};

/// Maps each class label to a dense index in `[0, len)`.
///
/// Indices follow the order of the class list the map was built from, so
/// tallies indexed by it line up with [`labels`](Self::labels).
#[derive(Debug, Clone)]
pub struct ClassIndexMap<T: ClassLabel> {
    index: HashMap<T, usize>,
    labels: Vec<T>,
}

impl<T: ClassLabel> ClassIndexMap<T> {
    /// Build the map from an ordered class list.
    ///
    /// Labels are expected to be distinct. A repeated label takes the
    /// position of its last occurrence and is counted once.
    pub fn new(classes: &[T]) -> Self {
        let mut index = HashMap::with_capacity(classes.len());
        for (i, &label) in classes.iter().enumerate() {
            index.insert(label, i);
        }

        let mut labels: Vec<(usize, T)> = index.iter().map(|(&l, &i)| (i, l)).collect();
        labels.sort_unstable();
        let labels: Vec<T> = labels.into_iter().map(|(_, l)| l).collect();

        // Re-densify so indices stay contiguous when duplicates were dropped
        for (i, label) in labels.iter().enumerate() {
            index.insert(*label, i);
        }

        Self { index, labels }
    }

    /// Index of `label`, or `None` if it is not a known class
    #[inline]
    pub fn lookup(&self, label: T) -> Option<usize> {
        self.index.get(&label).copied()
    }

    /// Index of the label found at `(row, col)`, as an error when unknown
    #[inline]
    pub fn index_at(&self, label: T, row: usize, col: usize) -> Result<usize> {
        self.lookup(label).ok_or_else(|| Error::UnknownClassLabel {
            label: label.to_string(),
            row,
            col,
        })
    }

    pub fn contains(&self, label: T) -> bool {
        self.index.contains_key(&label)
    }

    /// Number of distinct classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in index order
    pub fn labels(&self) -> &[T] {
        &self.labels
    }
}

/// Distinct labels present in a raster, sorted ascending, missing cells
/// excluded.
pub fn unique_classes<T: ClassLabel>(raster: &Raster<T>) -> Vec<T> {
    raster
        .data()
        .iter()
        .filter(|&&v| !raster.is_nodata(v))
        .copied()
        .collect::<BTreeSet<T>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_input_order() {
        let map = ClassIndexMap::new(&[5, 2, 9, 1]);
        assert_eq!(map.lookup(5), Some(0));
        assert_eq!(map.lookup(2), Some(1));
        assert_eq!(map.lookup(9), Some(2));
        assert_eq!(map.lookup(1), Some(3));
        assert_eq!(map.len(), 4);
        assert_eq!(map.labels(), &[5, 2, 9, 1]);
    }

    #[test]
    fn test_unknown_label() {
        let map = ClassIndexMap::new(&[1u8, 2]);
        assert_eq!(map.lookup(3), None);
        assert!(!map.contains(3));
        let err = map.index_at(3, 4, 7).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownClassLabel { ref label, row: 4, col: 7 } if label == "3"
        ));
    }

    #[test]
    fn test_unknown_label_reported_exactly() {
        let map = ClassIndexMap::new(&[1u64, 2]);
        let err = map.index_at(u64::MAX, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownClassLabel { ref label, .. } if label == "18446744073709551615"
        ));
    }

    #[test]
    fn test_duplicate_takes_last_position() {
        // 7 moves behind 3; indices stay dense
        let map = ClassIndexMap::new(&[7, 3, 7]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.labels(), &[3, 7]);
        assert_eq!(map.lookup(3), Some(0));
        assert_eq!(map.lookup(7), Some(1));
    }

    #[test]
    fn test_empty_map() {
        let map: ClassIndexMap<i32> = ClassIndexMap::new(&[]);
        assert!(map.is_empty());
        assert_eq!(map.lookup(0), None);
    }

    #[test]
    fn test_unique_classes_skips_nodata() {
        let mut raster = Raster::from_vec(vec![4, 2, -1, 2, 4, 9], 2, 3).unwrap();
        raster.set_nodata(Some(-1));
        assert_eq!(unique_classes(&raster), vec![2, 4, 9]);
    }

    #[test]
    fn test_unique_classes_default_sentinel() {
        let raster = Raster::from_vec(vec![i16::MIN, 3, 3, 1], 2, 2).unwrap();
        assert_eq!(unique_classes(&raster), vec![1, 3]);
    }
}
