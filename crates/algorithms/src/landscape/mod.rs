//! Landscape ecology algorithms
//!
//! Moving-window metrics for categorical (class) rasters:
//! - **Class index**: dense indexing of class labels, class-set derivation
//! - **Shannon evenness**: normalized entropy of the classes in each window

mod class_index;
mod evenness;
mod shannon;

pub use class_index::{unique_classes, ClassIndexMap};
pub use evenness::{
    focal_evenness, shannon_evenness, EvennessParams, FocalEvenness, FocalWindow,
};
pub use shannon::{shannon_entropy, shannon_evenness_score};
