//! Statistical helpers for categorical rasters
//!
//! - **frequency**: occurrence counts of reference values

pub mod frequency;

pub use frequency::{frequency, frequency_raster};
