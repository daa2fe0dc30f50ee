//! Value frequency tallies
//!
//! Counts how often each of a list of reference values occurs in a flat
//! sequence or a raster. Useful for checking class sets before running
//! focal metrics.

use std::collections::HashMap;

use focalscape_core::raster::{ClassLabel, Raster};

/// Count the elements of `data` equal to each value of `reference`.
///
/// `counts[j]` is the number of occurrences of `reference[j]`. Repeated
/// reference values each get their own (equal) count; values absent from
/// `data` count 0.
pub fn frequency<T: ClassLabel>(data: &[T], reference: &[T]) -> Vec<usize> {
    let mut seen: HashMap<T, usize> = HashMap::with_capacity(reference.len());
    for &v in reference {
        seen.insert(v, 0);
    }
    for v in data {
        if let Some(count) = seen.get_mut(v) {
            *count += 1;
        }
    }
    reference.iter().map(|v| seen[v]).collect()
}

/// [`frequency`] over every cell of a raster.
///
/// Missing cells are not special: they are counted when the missing value
/// is itself listed in `reference`.
pub fn frequency_raster<T: ClassLabel>(raster: &Raster<T>, reference: &[T]) -> Vec<usize> {
    match raster.data().as_slice() {
        Some(cells) => frequency(cells, reference),
        None => {
            let cells: Vec<T> = raster.data().iter().copied().collect();
            frequency(&cells, reference)
        }
    }
}
