//! focalscape CLI - landscape evenness for categorical rasters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use focalscape_algorithms::landscape::{unique_classes, EvennessParams, FocalEvenness, FocalWindow};
use focalscape_algorithms::statistics::frequency_raster;
use focalscape_core::io::{read_ascii_grid, read_geotiff, write_ascii_grid, write_geotiff};
use focalscape_core::raster::{Neighborhood, Raster, WeightKernel};
use focalscape_core::Algorithm;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "focalscape")]
#[command(author, version, about = "Moving-window landscape evenness", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a class raster
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Focal Shannon evenness
    Evenness {
        /// Input class raster
        input: PathBuf,
        /// Output raster of evenness scores
        output: PathBuf,
        /// Comma-separated class labels; derived from the input when omitted
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        classes: Option<Vec<i32>>,
        /// Window shape
        #[arg(short, long, value_enum, default_value = "queen")]
        shape: WindowShape,
        /// Window radius in cells (square and circle shapes)
        #[arg(short, long, default_value = "1")]
        radius: usize,
        /// Weight kernel file (whitespace-separated integer rows); overrides --shape
        #[arg(short, long)]
        kernel: Option<PathBuf>,
    },
    /// Count occurrences of class labels
    Frequency {
        /// Input class raster
        input: PathBuf,
        /// Comma-separated labels to count
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        values: Vec<i32>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WindowShape {
    /// 3x3 with diagonals
    Queen,
    /// 3x3 without diagonals
    Rook,
    /// Square of the given radius
    Square,
    /// Disk of the given radius
    Circle,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// `.asc` files are ESRI ASCII grids; everything else is read as GeoTIFF
fn is_ascii_grid(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("asc"))
}

fn read_classes(path: &Path) -> Result<Raster<i32>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<i32> = if is_ascii_grid(path) {
        read_ascii_grid(path)
    } else {
        read_geotiff(path)
    }
    .with_context(|| format!("Failed to read raster {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_result(raster: &Raster<f64>, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    if is_ascii_grid(path) {
        write_ascii_grid(raster, path)
    } else {
        write_geotiff(raster, path)
    }
    .context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn read_kernel(path: &Path) -> Result<WeightKernel> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read kernel {}", path.display()))?;
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(i, line)| {
            line.split_whitespace()
                .map(|t| {
                    t.parse::<i32>()
                        .with_context(|| format!("Invalid kernel weight '{}' on row {}", t, i + 1))
                })
                .collect::<Result<Vec<i32>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    let kernel = WeightKernel::from_rows(rows).context("Invalid kernel")?;
    debug!(shape = ?kernel.shape(), "kernel loaded from {}", path.display());
    Ok(kernel)
}

fn parse_window(shape: WindowShape, radius: usize, kernel: Option<&Path>) -> Result<FocalWindow> {
    if let Some(path) = kernel {
        return Ok(FocalWindow::Kernel(read_kernel(path)?));
    }
    let neighborhood = match shape {
        WindowShape::Queen => Neighborhood::Queen3x3,
        WindowShape::Rook => Neighborhood::Rook3x3,
        WindowShape::Square => Neighborhood::Square(radius),
        WindowShape::Circle => Neighborhood::Circle(radius),
    };
    neighborhood
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid window: {}", e))?;
    Ok(FocalWindow::Preset(neighborhood))
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let raster = read_classes(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Cell size: {}", raster.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(nodata) = raster.nodata() {
                println!("NoData: {}", nodata);
            }
            if let (Some(min), Some(max)) = (stats.min, stats.max) {
                println!("Label range: {} .. {}", min, max);
            }
            let classes = unique_classes(&raster);
            let labels: Vec<String> = classes.iter().map(i32::to_string).collect();
            println!("Classes ({}): {}", classes.len(), labels.join(", "));
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len().max(1) as f64
            );
            println!("  NoData cells: {}", stats.nodata_count);
        }

        Commands::Evenness {
            input,
            output,
            classes,
            shape,
            radius,
            kernel,
        } => {
            let raster = read_classes(&input)?;
            let window = parse_window(shape, radius, kernel.as_deref())?;
            debug!(?window, ?classes, "evenness parameters");

            let algo = FocalEvenness;
            debug!("{}: {}", algo.name(), algo.description());

            let start = Instant::now();
            let pb = spinner("Computing evenness...");
            let result = algo
                .execute(raster, EvennessParams { classes, window })
                .context("Evenness computation failed")?;
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            write_result(&result, &output)?;
            done("Evenness", &output, elapsed);
        }

        Commands::Frequency { input, values } => {
            let raster = read_classes(&input)?;
            let counts = frequency_raster(&raster, &values);
            for (value, count) in values.iter().zip(counts) {
                println!("{:>10}  {}", value, count);
            }
        }
    }

    Ok(())
}
