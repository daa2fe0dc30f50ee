//! Error types for focalscape

use thiserror::Error;

/// Main error type for focalscape operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Class label {label} at ({row}, {col}) is not in the class set")]
    UnknownClassLabel {
        label: String,
        row: usize,
        col: usize,
    },

    #[error("Evenness needs at least 2 classes, got {classes}")]
    DegenerateClassSet { classes: usize },

    #[error("Neighborhood kernel selects no cells besides the center")]
    EmptyNeighborhood,

    #[error("Invalid kernel shape {rows}x{cols}: {reason}")]
    KernelShape {
        rows: usize,
        cols: usize,
        reason: String,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for focalscape operations
pub type Result<T> = std::result::Result<T, Error>;
