//! Reading and writing categorical grids
//!
//! GeoTIFF is the primary format; ESRI ASCII grids are supported for small
//! hand-written landscapes.

mod ascii;
mod geotiff;

pub use ascii::{
    read_ascii_grid, read_ascii_grid_from_str, write_ascii_grid, write_ascii_grid_to_string,
};
pub use geotiff::{read_geotiff, read_geotiff_from_buffer, write_geotiff, write_geotiff_to_buffer};
