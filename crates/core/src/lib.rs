//! # focalscape core
//!
//! Core types, traits and I/O for the focalscape landscape library.
//!
//! This crate provides:
//! - `Raster<T>`: Generic single-band grid with a no-data sentinel
//! - `GeoTransform`: North-up georeferencing
//! - `WeightKernel` / `Neighborhood`: focal window definitions
//! - The `Algorithm` trait for a consistent API
//! - GeoTIFF and ESRI ASCII grid I/O

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{ClassLabel, GeoTransform, Neighborhood, Raster, RasterElement, WeightKernel};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{
        ClassLabel, GeoTransform, Neighborhood, Raster, RasterElement, WeightKernel,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in focalscape.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
