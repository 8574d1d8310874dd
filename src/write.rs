//! Plain-text output and output-path construction.
//!
//! Text output is one color per line, `"<hex-or-rgb> <description>\n"`.
//! The format selector picks the rendering per color; `SameAsInput` replays
//! each color's original format.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::color::{Color, ColorFormat};

/// Render colors as text, one line per color with a trailing newline.
#[must_use]
pub fn render(colors: &[Color], format: ColorFormat) -> String {
    let mut content = String::new();
    for color in colors {
        content.push_str(&render_color(color, format));
    }
    content
}

/// Write colors as text to the given path.
///
/// # Errors
///
/// Returns any I/O error from the underlying write.
pub fn write_file(colors: &[Color], format: ColorFormat, path: &Path) -> io::Result<()> {
    fs::write(path, render(colors, format))
}

fn render_color(color: &Color, format: ColorFormat) -> String {
    match format {
        ColorFormat::Hexcode => hexcode_line(color),
        ColorFormat::Rgb => rgb_line(color),
        ColorFormat::SameAsInput => match color.original_format {
            ColorFormat::Rgb => rgb_line(color),
            ColorFormat::Hexcode | ColorFormat::SameAsInput => hexcode_line(color),
        },
    }
}

fn hexcode_line(color: &Color) -> String {
    format!("{} {}\n", color.hexcode, color.description)
}

fn rgb_line(color: &Color) -> String {
    format!("{} {}\n", color.rgb, color.description)
}

/// Path for a sorted copy of `source`: `_{strategy}{suffix}` is inserted
/// before the extension (appended when there is none).
#[must_use]
pub fn sorted_file_path(source: &Path, strategy_name: &str, suffix: &str) -> PathBuf {
    let marker = format!("_{strategy_name}{suffix}");
    match source.extension() {
        Some(extension) => {
            let stem = source.with_extension("");
            let mut name = stem.into_os_string();
            name.push(marker);
            name.push(".");
            name.push(extension);
            PathBuf::from(name)
        }
        None => {
            let mut name = source.to_path_buf().into_os_string();
            name.push(marker);
            PathBuf::from(name)
        }
    }
}

/// Path for a converted copy of `source` with the extension swapped.
#[must_use]
pub fn path_with_extension(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}
