//! Command-line entry point.
//!
//! Three subcommands: `sort` writes a sorted text file next to the source,
//! `txt2ase` and `txt2clr` convert a color list into the binary palette
//! formats. Any handled error is printed to stderr and exits nonzero.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use huesort::color::ColorFormat;
use huesort::sort::{Direction, SortKind};
use huesort::{ase, clr, logging, parse, sort, write};

#[derive(Parser)]
#[command(name = "huesort", version, about = "Sort colors and export palette files")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort a color list and write it next to the source file
    Sort {
        /// Text file with one color per line
        colors_file: PathBuf,

        /// Sorting strategy
        #[arg(short = 'a', long, value_enum, default_value_t = Algorithm::Hilbert)]
        algorithm: Algorithm,

        /// Direction of the sorted sequence
        #[arg(short, long, value_enum, default_value_t = DirectionArg::Forward)]
        direction: DirectionArg,

        /// Color format for the output file
        #[arg(short, long, value_enum, default_value_t = FormatArg::Input)]
        format: FormatArg,

        /// Extra suffix for the output file name
        #[arg(short, long, default_value = "")]
        suffix: String,
    },

    /// Convert a color list into an ASE palette file
    Txt2ase {
        /// Text file with one color per line
        colors_file: PathBuf,

        /// Palette name embedded in the file
        #[arg(short, long, default_value = "")]
        palette_name: String,
    },

    /// Convert a color list into a CLR palette file
    Txt2clr {
        /// Text file with one color per line
        colors_file: PathBuf,
    },
}

/// CLI names of the sorting strategies.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Rgb,
    Hsv,
    Hsl,
    Luminosity,
    Step,
    #[value(name = "step-alternated")]
    StepAlternated,
    Hilbert,
}

impl From<Algorithm> for SortKind {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Rgb => Self::Rgb,
            Algorithm::Hsv => Self::Hsv,
            Algorithm::Hsl => Self::Hsl,
            Algorithm::Luminosity => Self::Luminosity,
            Algorithm::Step => Self::Step,
            Algorithm::StepAlternated => Self::AlternatedStep,
            Algorithm::Hilbert => Self::Hilbert,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Forward => Self::Forward,
            DirectionArg::Backward => Self::Backward,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Hexcode,
    Rgb,
    Input,
}

impl From<FormatArg> for ColorFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Hexcode => Self::Hexcode,
            FormatArg::Rgb => Self::Rgb,
            FormatArg::Input => Self::SameAsInput,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = logging::init(level) {
        eprintln!("ERROR: {err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Sort {
            colors_file,
            algorithm,
            direction,
            format,
            suffix,
        } => run_sort(
            &colors_file,
            algorithm.into(),
            direction.into(),
            format.into(),
            &suffix,
        ),
        Command::Txt2ase {
            colors_file,
            palette_name,
        } => run_txt2ase(&colors_file, &palette_name),
        Command::Txt2clr { colors_file } => run_txt2clr(&colors_file),
    };

    match result {
        Ok(output) => {
            println!("Colors saved to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_sort(
    source: &Path,
    kind: SortKind,
    direction: Direction,
    format: ColorFormat,
    suffix: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let colors = read_source(source)?;
    let sorted = sort::sort(&colors, kind, direction);

    let output = write::sorted_file_path(source, kind.name(), suffix);
    write::write_file(&sorted, format, &output)?;
    Ok(output)
}

fn run_txt2ase(source: &Path, palette_name: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let colors = read_source(source)?;
    let output = write::path_with_extension(source, "ase");
    ase::write_file(&colors, palette_name, &output)?;
    Ok(output)
}

fn run_txt2clr(source: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let colors = read_source(source)?;
    let output = write::path_with_extension(source, "clr");
    clr::write_file(&colors, &output)?;
    Ok(output)
}

fn read_source(source: &Path) -> Result<Vec<huesort::Color>, Box<dyn std::error::Error>> {
    let file = File::open(source)
        .map_err(|err| format!("cannot open {}: {err}", source.display()))?;
    Ok(parse::read_colors(BufReader::new(file))?)
}
