//! Raster data structures and neighborhood kernels

mod element;
mod geotransform;
mod grid;
mod neighborhood;

pub use element::{ClassLabel, RasterElement};
pub use geotransform::GeoTransform;
pub use grid::{Raster, RasterStatistics};
pub use neighborhood::{Neighborhood, WeightKernel};
