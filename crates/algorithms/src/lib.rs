//! # focalscape algorithms
//!
//! Landscape analysis over categorical rasters.
//!
//! ## Available Algorithm Categories
//!
//! - **landscape**: class indexing, focal Shannon evenness
//! - **statistics**: frequency tallies

pub mod landscape;
pub mod statistics;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::landscape::{
        focal_evenness, shannon_entropy, shannon_evenness, shannon_evenness_score,
        unique_classes, ClassIndexMap, EvennessParams, FocalEvenness, FocalWindow,
    };
    pub use crate::statistics::{frequency, frequency_raster};
    pub use focalscape_core::prelude::*;
}
