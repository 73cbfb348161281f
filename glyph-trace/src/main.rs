//! Command line tool for turning font letters into tracing assets.
//!
//! Set `RUST_LOG=debug` to see the bounding box and transform applied to
//! each path.

use std::{error::Error, io::Read, path::PathBuf};

use glyph_trace::{read_points, write_points, Config, Extractor, Font, Overrides, Script};
use trace_path::{
    bounding_box, dotted_path, trace_points, NormalizeOptions, Normalizer, Path, DEFAULT_SAMPLES,
};

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Canvas settings shared by the subcommands that normalize.
#[derive(clap::Args, Debug)]
struct CanvasArgs {
    /// Side length of the square output canvas
    #[arg(long)]
    em: Option<f64>,
    /// Fraction of the canvas left empty on each side
    #[arg(long)]
    padding: Option<f64>,
    /// Digits after the decimal point in written paths
    #[arg(long)]
    precision: Option<usize>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Extract letters from a font as SVG, path data and trace points
    Extract {
        /// The font file (may be a collection)
        #[arg(long)]
        font: PathBuf,
        /// Face index within a font collection
        #[arg(long, default_value_t = 0)]
        index: u32,
        /// TOML file with settings and a [letters] table
        #[arg(long, conflicts_with = "script")]
        config: Option<PathBuf>,
        /// Use a bundled letter set instead of a config file
        #[arg(long, value_enum)]
        script: Option<Script>,
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Maximum number of trace points per stroke
        #[arg(long)]
        samples: Option<usize>,
        /// Directory to write files to
        #[arg(long)]
        out: Option<PathBuf>,
        /// Names of letters to extract, or `all`
        letters: Vec<String>,
    },
    /// Normalize path data given as an argument or on stdin
    Normalize {
        /// Units per em of the space the path is drawn in
        #[arg(long)]
        units_per_em: f64,
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Path data, or `-` to read stdin
        path: Option<String>,
    },
    /// Print trace points for normalized path data
    Points {
        /// Maximum number of points per stroke
        #[arg(long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
        /// Path data, or `-` to read stdin
        path: Option<String>,
    },
    /// Print a sparse direction path for a points file
    Dotted {
        /// A points file written by `extract`
        points: PathBuf,
        /// Normalized path data the points were taken from, or `-` to read
        /// stdin; its bounding box places the points
        path: Option<String>,
    },
    /// Split a stroke of a points file in place
    Split {
        /// A points file written by `extract`
        points: PathBuf,
        /// The stroke to split
        #[arg(long, default_value_t = 0)]
        stroke: usize,
        /// Point indices to split at; each one ends a piece and starts the next
        #[arg(required = true)]
        at: Vec<usize>,
    },
    /// Rescale a points file in place so its points span the unit square
    Renormalize {
        /// A points file written by `extract`
        points: PathBuf,
    },
}

fn main() {
    env_logger::init();
    use clap::Parser as _;
    let args = Args::parse_from(wild::args());
    match run(args) {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` when some letters could not be extracted.
fn run(args: Args) -> Result<bool, Box<dyn Error>> {
    match args.command {
        Command::Extract {
            font,
            index,
            config,
            script,
            canvas,
            samples,
            out,
            letters,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::bundled(script.unwrap_or(Script::Devanagari))?,
            };
            config.apply(Overrides {
                em: canvas.em,
                padding: canvas.padding,
                precision: canvas.precision,
                samples,
                output_dir: out,
            });
            let letters = config.select(&letters)?;
            let font = Font::open(&font, index)?;
            let extractor = Extractor::new(&font, &config)?;
            log::info!(
                "extracting {} letters from {} to {}",
                letters.len(),
                font.path().display(),
                extractor.output_dir().display()
            );
            let report = extractor.run(&letters)?;
            println!(
                "extracted {} of {} letters",
                report.extracted.len(),
                letters.len()
            );
            for failure in &report.failures {
                eprintln!("  {}: {}", failure.name, failure.error);
            }
            Ok(report.is_success())
        }
        Command::Normalize {
            units_per_em,
            canvas,
            path,
        } => {
            let defaults = NormalizeOptions::default();
            let normalizer = Normalizer::new(NormalizeOptions {
                em: canvas.em.unwrap_or(defaults.em),
                padding: canvas.padding.unwrap_or(defaults.padding),
                precision: canvas.precision.unwrap_or(defaults.precision),
            })?;
            let path: Path = read_path_data(path)?.parse()?;
            let normalized = normalizer.normalize(&path, units_per_em)?;
            for warning in &normalized.warnings {
                log::warn!("{warning}");
            }
            println!("{}", normalized.to_svg());
            Ok(true)
        }
        Command::Points { samples, path } => {
            let path: Path = read_path_data(path)?.parse()?;
            let points = trace_points(&path, samples);
            println!("{}", serde_json::to_string_pretty(&points)?);
            Ok(true)
        }
        Command::Dotted { points, path } => {
            let points = read_points(&points)?;
            let path: Path = read_path_data(path)?.parse()?;
            let bounds = bounding_box(&path).ok_or("path data has no coordinates")?;
            println!("{}", dotted_path(&points, &bounds)?);
            Ok(true)
        }
        Command::Split { points, stroke, at } => {
            let mut trace = read_points(&points)?;
            trace.split_stroke(stroke, &at)?;
            write_points(&points, &trace)?;
            log::info!(
                "{} now has {} strokes",
                points.display(),
                trace.strokes.len()
            );
            Ok(true)
        }
        Command::Renormalize { points } => {
            let mut trace = read_points(&points)?;
            trace.renormalize()?;
            write_points(&points, &trace)?;
            Ok(true)
        }
    }
}

fn read_path_data(arg: Option<String>) -> std::io::Result<String> {
    match arg {
        Some(data) if data != "-" => Ok(data),
        _ => {
            let mut data = String::new();
            std::io::stdin().read_to_string(&mut data)?;
            Ok(data)
        }
    }
}
