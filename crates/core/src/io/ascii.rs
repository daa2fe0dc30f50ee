//! ESRI ASCII grid reading/writing
//!
//! Format: a short `key value` header followed by `nrows` lines of `ncols`
//! whitespace-separated values, top row first.
//!
//! ```text
//! ncols         4
//! nrows         2
//! xllcorner     500000.0
//! yllcorner     4100000.0
//! cellsize      30.0
//! NODATA_value  -9999
//! 11 11 42 42
//! 11 -9999 42 90
//! ```

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// No-data value written for NaN cells of float rasters without a finite
/// no-data value
const DEFAULT_NODATA_TEXT: &str = "-9999";

/// Read an ASCII grid file into a Raster
pub fn read_ascii_grid<T, P>(path: P) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_ascii_grid(BufReader::new(file))
}

/// Read an ASCII grid from an in-memory string
pub fn read_ascii_grid_from_str<T>(text: &str) -> Result<Raster<T>>
where
    T: RasterElement,
{
    decode_ascii_grid(Cursor::new(text.as_bytes()))
}

/// Write a Raster to an ASCII grid file
pub fn write_ascii_grid<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writer.write_all(write_ascii_grid_to_string(raster).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write a Raster to an in-memory ASCII grid
pub fn write_ascii_grid_to_string<T>(raster: &Raster<T>) -> String
where
    T: RasterElement,
{
    let (rows, cols) = raster.shape();
    let (xll, yll) = raster.transform().lower_left(rows);

    let nodata_text = match raster.nodata() {
        Some(nd) if !nd.is_nodata(None) => nd.to_string(),
        _ => DEFAULT_NODATA_TEXT.to_string(),
    };

    let needs_nodata = raster.nodata().is_some() || T::is_float();
    let mut out = format!(
        "ncols         {cols}\nnrows         {rows}\nxllcorner     {xll}\nyllcorner     {yll}\ncellsize      {}\n",
        raster.cell_size()
    );
    if needs_nodata {
        out.push_str(&format!("NODATA_value  {nodata_text}\n"));
    }

    for row in raster.data().rows() {
        let line: Vec<String> = row
            .iter()
            .map(|v| {
                if needs_nodata && raster.is_nodata(*v) {
                    nodata_text.clone()
                } else {
                    v.to_string()
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    out
}

#[derive(Default)]
struct Header {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xll: Option<(f64, bool)>,
    yll: Option<(f64, bool)>,
    cell_size: Option<f64>,
    nodata: Option<String>,
}

/// Internal: decode an ASCII grid from any buffered source
fn decode_ascii_grid<T, R>(reader: R) -> Result<Raster<T>>
where
    T: RasterElement,
    R: BufRead,
{
    let missing = |key: &str, line: usize| Error::Parse {
        line,
        reason: format!("missing header key '{key}'"),
    };

    let mut header = Header::default();
    let mut values: Vec<T> = Vec::new();
    let mut nodata: Option<T> = None;
    let mut body: Option<(usize, usize)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (cols, body_rows) = match body {
            Some(state) => state,
            None => {
                if parse_header_line(&mut header, trimmed, line_no)? {
                    continue;
                }
                nodata = match &header.nodata {
                    Some(text) => Some(parse_value(text, line_no)?),
                    None => None,
                };
                (header.ncols.ok_or_else(|| missing("ncols", line_no))?, 0)
            }
        };

        let before = values.len();
        for token in trimmed.split_whitespace() {
            values.push(parse_value(token, line_no)?);
        }
        let found = values.len() - before;
        if found != cols {
            return Err(Error::Parse {
                line: line_no,
                reason: format!("expected {cols} values per row, found {found}"),
            });
        }
        body = Some((cols, body_rows + 1));
    }

    let cols = header.ncols.ok_or_else(|| missing("ncols", 0))?;
    let rows = header.nrows.ok_or_else(|| missing("nrows", 0))?;
    let cell_size = header.cell_size.ok_or_else(|| missing("cellsize", 0))?;
    let (mut xll, x_center) = header.xll.ok_or_else(|| missing("xllcorner", 0))?;
    let (mut yll, y_center) = header.yll.ok_or_else(|| missing("yllcorner", 0))?;
    if x_center {
        xll -= cell_size / 2.0;
    }
    if y_center {
        yll -= cell_size / 2.0;
    }

    let body_rows = body.map_or(0, |(_, n)| n);
    if body_rows != rows {
        return Err(Error::Parse {
            line: 0,
            reason: format!("expected {rows} rows of {cols} values, found {body_rows}"),
        });
    }

    let mut raster = Raster::from_vec(values, rows, cols)?;
    raster.set_transform(GeoTransform::from_lower_left(xll, yll, cell_size, rows));
    raster.set_nodata(nodata);
    Ok(raster)
}

/// Apply a header line. `Ok(false)` means the line is not a header line,
/// i.e. the body has started.
fn parse_header_line(header: &mut Header, text: &str, line: usize) -> Result<bool> {
    let mut parts = text.split_whitespace();
    let key = parts.next().unwrap_or_default().to_ascii_lowercase();
    let raw = parts.next();

    let value = || {
        raw.ok_or_else(|| Error::Parse {
            line,
            reason: format!("header key '{key}' has no value"),
        })
    };
    let number = |v: &str| -> Result<f64> {
        v.parse::<f64>().map_err(|_| Error::Parse {
            line,
            reason: format!("invalid number '{v}' for '{key}'"),
        })
    };
    let count = |v: &str| -> Result<usize> {
        v.parse::<usize>().map_err(|_| Error::Parse {
            line,
            reason: format!("invalid count '{v}' for '{key}'"),
        })
    };

    match key.as_str() {
        "ncols" => header.ncols = Some(count(value()?)?),
        "nrows" => header.nrows = Some(count(value()?)?),
        "xllcorner" => header.xll = Some((number(value()?)?, false)),
        "xllcenter" => header.xll = Some((number(value()?)?, true)),
        "yllcorner" => header.yll = Some((number(value()?)?, false)),
        "yllcenter" => header.yll = Some((number(value()?)?, true)),
        "cellsize" => header.cell_size = Some(number(value()?)?),
        "nodata_value" => header.nodata = Some(value()?.to_string()),
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_value<T: RasterElement>(token: &str, line: usize) -> Result<T> {
    if let Ok(v) = token.parse::<T>() {
        return Ok(v);
    }
    // Integer grids are sometimes written with a trailing ".0"
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0)
        .and_then(num_traits::cast::<f64, T>)
        .ok_or_else(|| Error::Parse {
            line,
            reason: format!("invalid cell value '{token}'"),
        })
}
