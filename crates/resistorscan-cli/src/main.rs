//! resistorscan CLI: read color-banded resistors from images.

mod store;

use clap::{Args, Parser, Subcommand};
use image::DynamicImage;
use std::path::PathBuf;

use resistorscan::bands::BandColor;
use resistorscan::geometry::{canonical_rotation_deg, single_channel};
use resistorscan::{
    central_line, centroid, classify_detailed, decode, ReaderConfig, ResistorReader, ResistorValue,
};
use store::{ChannelMode, ImageStore};

pub(crate) type CliError = Box<dyn std::error::Error>;
pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "resistorscan")]
#[command(about = "Segment resistors in photographs and decode their color bands")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read every resistor in an image.
    Scan(CliScanArgs),

    /// Write the canonical (axis-vertical) crop of every region as PNG.
    Canonical(CliCanonicalArgs),

    /// Decode a comma-separated band list.
    Decode {
        /// Band colors in reading order, e.g. brown,black,red,gold.
        #[arg(long)]
        bands: String,
    },

    /// Classify one RGB sample.
    Classify {
        /// Sample as r,g,b (0-255).
        #[arg(long)]
        rgb: String,
    },

    /// Print centroid, central line and canonical rotation of a mask image.
    Axis {
        /// Directory the mask path is relative to.
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// Single-channel mask image.
        #[arg(long)]
        mask: PathBuf,
    },

    /// Print the active color table as JSON.
    ColorTable {
        /// Reader configuration JSON to take the table from.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct CliImageArgs {
    /// Directory image paths are relative to.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Input image, relative to the data directory.
    #[arg(long)]
    image: PathBuf,

    /// Reader configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override canonical crop width in pixels.
    #[arg(long)]
    crop_width: Option<u32>,

    /// Override canonical crop height in pixels.
    #[arg(long)]
    crop_height: Option<u32>,

    /// Override the foreground luma threshold.
    #[arg(long)]
    background_threshold: Option<u8>,

    /// Override the minimum component size in pixels.
    #[arg(long)]
    min_pixel_count: Option<usize>,
}

#[derive(Debug, Clone, Args)]
struct CliScanArgs {
    #[command(flatten)]
    input: CliImageArgs,

    /// Path to write scan results (JSON).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CliCanonicalArgs {
    #[command(flatten)]
    input: CliImageArgs,

    /// Output directory, relative to the data directory.
    #[arg(long, default_value = "canonical")]
    out_dir: PathBuf,
}

impl CliImageArgs {
    fn reader_config(&self) -> CliResult<ReaderConfig> {
        let mut config = match &self.config {
            Some(path) => ReaderConfig::from_json_file(path)?,
            None => ReaderConfig::default(),
        };
        if let Some(w) = self.crop_width {
            config.canonical.crop_width = w;
        }
        if let Some(h) = self.crop_height {
            config.canonical.crop_height = h;
        }
        if let Some(t) = self.background_threshold {
            config.segment.background_threshold = t;
        }
        if let Some(n) = self.min_pixel_count {
            config.segment.min_pixel_count = n;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => run_scan(&args),
        Commands::Canonical(args) => run_canonical(&args),
        Commands::Decode { bands } => run_decode(&bands),
        Commands::Classify { rgb } => run_classify(&rgb),
        Commands::Axis { data_dir, mask } => run_axis(&ImageStore::new(data_dir), &mask),
        Commands::ColorTable { config } => run_color_table(config.as_deref()),
    }
}

// ── formatting / parsing ──────────────────────────────────────────────

fn format_value(v: &ResistorValue) -> String {
    format!(
        "{} ±{}% {}ppm/K",
        v.ohms, v.tolerance_percent, v.temperature_coefficient_ppm_per_k
    )
}

fn parse_bands(s: &str) -> CliResult<Vec<BandColor>> {
    s.split(',')
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.parse::<BandColor>().map_err(Into::into))
        .collect()
}

fn parse_rgb(s: &str) -> CliResult<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected r,g,b, got '{}'", s).into());
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| -> CliError { format!("invalid channel '{}': {}", part, e).into() })?;
    }
    Ok(rgb)
}

// ── scan ──────────────────────────────────────────────────────────────

fn run_scan(args: &CliScanArgs) -> CliResult<()> {
    let store = ImageStore::new(&args.input.data_dir);
    tracing::info!(
        "Loading image: {}",
        store.resolve(&args.input.image).display()
    );
    let img = store.load(&args.input.image, ChannelMode::Rgb)?.to_rgb8();
    let (w, h) = img.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let reader = ResistorReader::with_config(args.input.reader_config()?);
    let result = reader.read(&img);

    for reading in &result.readings {
        match (&reading.value, reading.reject) {
            (Some(v), _) => {
                tracing::info!(
                    "region {}: {} [{}]{}",
                    reading.label,
                    format_value(v),
                    reading
                        .band_colors()
                        .iter()
                        .map(|c| c.name())
                        .collect::<Vec<_>>()
                        .join(","),
                    if reading.has_fallback_band() {
                        " (fallback color)"
                    } else {
                        ""
                    }
                );
            }
            (None, Some(reason)) => {
                tracing::info!("region {}: rejected ({})", reading.label, reason);
            }
            (None, None) => {}
        }
    }
    tracing::info!(
        "Read {} of {} resistors",
        result.decoded().count(),
        result.readings.len()
    );

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());
    Ok(())
}

// ── canonical ─────────────────────────────────────────────────────────

fn run_canonical(args: &CliCanonicalArgs) -> CliResult<()> {
    let store = ImageStore::new(&args.input.data_dir);
    let img = store.load(&args.input.image, ChannelMode::Rgb)?.to_rgb8();
    let config = args.input.reader_config()?;

    let regions = resistorscan::segment(&img, &config.segment);
    tracing::info!("{} regions found", regions.len());
    for region in &regions {
        let view = match resistorscan::canonical_view(region, &config.canonical) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("region {}: {}", region.label, e);
                continue;
            }
        };
        let name = args.out_dir.join(format!("region_{:03}.png", region.label));
        let path = store.save(&name, &DynamicImage::ImageRgb8(view.image))?;
        tracing::info!(
            "region {}: rotated {:.1} deg -> {}",
            region.label,
            view.rotation_deg,
            path.display()
        );
    }
    Ok(())
}

// ── decode ────────────────────────────────────────────────────────────

fn run_decode(bands: &str) -> CliResult<()> {
    let bands = parse_bands(bands)?;
    let value = decode(&bands)?;
    println!("{}", format_value(&value));
    Ok(())
}

// ── classify ──────────────────────────────────────────────────────────

fn run_classify(rgb: &str) -> CliResult<()> {
    let rgb = parse_rgb(rgb)?;
    let c = classify_detailed(rgb);
    println!("{} ({})", c.color, c.kind);
    Ok(())
}

// ── axis ──────────────────────────────────────────────────────────────

fn run_axis(store: &ImageStore, mask: &std::path::Path) -> CliResult<()> {
    let img = store.load(mask, ChannelMode::Native)?;
    let mask = single_channel(&img)?;
    let c = centroid(&mask)?;
    let line = central_line(&mask)?;

    println!("Centroid:      ({:.2}, {:.2})", c.x, c.y);
    println!(
        "Central line:  ({:.2}, {:.2}) -> ({:.2}, {:.2})",
        line.a[0], line.a[1], line.b[0], line.b[1]
    );
    println!("Axis angle:    {:.2} deg", line.angle_deg());
    println!("Rotation:      {:.2} deg", canonical_rotation_deg(&line));
    Ok(())
}

// ── color-table ───────────────────────────────────────────────────────

fn run_color_table(config: Option<&std::path::Path>) -> CliResult<()> {
    let config = match config {
        Some(path) => ReaderConfig::from_json_file(path)?,
        None => ReaderConfig::default(),
    };
    println!("{}", serde_json::to_string_pretty(&config.colors)?);
    Ok(())
}
