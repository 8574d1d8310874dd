//! CLR (legacy serialized-object palette format) encoder.
//!
//! The format is a serialized object graph from a legacy runtime. The
//! framing bytes are opaque and reproduced verbatim: the first color entry
//! declares the `NSColor`/`NSObject`/`NSString` class names inline as
//! length-prefixed ASCII, and every later entry references them through a
//! short fixed-tag form.
//!
//! Channel fractions are encoded compactly: a single `01` byte when the
//! value is within 1e-3 of 1.0, a single `00` byte when within 1e-3 of 0.0,
//! otherwise a float marker followed by the little-endian f32.
//!
//! The format requires at least one color; encoding an empty list fails
//! before any bytes are produced.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::color::{Color, Rgb};
use crate::convert::almost_equal;

const FILE_SIGNATURE: &[u8] = b"\x04\x0bstreamtyped";
const FILE_PREAMBLE: &[u8] = &[0x81, 0xe8, 0x03, 0x84, 0x01, 0x69, 0x01];
const COLOR_COUNT_CHUNK_TAG: &[u8] = &[0x84, 0x02, 0x40, 0x69, 0x85];
const NEW_COLOR_MAP_TAG: &[u8] = &[0x84, 0x02, 0x40, 0x40];
const COMPONENTS_CHUNK_TAG: &[u8] = &[0x85, 0x84, 0x01, 0x63, 0x01, 0x84, 0x04, 0x66, 0x66, 0x66, 0x66];
const NAMES_CHUNK_TAG: &[u8] = &[0x01, 0x94, 0x84, 0x01, 0x2b];
const NEXT_COLOR_TAG: &[u8] = &[0x94, 0x84, 0x93, 0x97, 0x01, 0x98];
const NEXT_NAME_TAG: &[u8] = &[0x84, 0x96, 0x9a];
const CLASS_DECLARATION: &[u8] = &[0x84, 0x84, 0x84];
const INHERITANCE_DECLARATION: &[u8] = &[0x84, 0x84];
const NULL_BYTE: u8 = 0x00;
const FLOAT_MARKER: u8 = 0x83;
const INTEGER_16_MARKER: u8 = 0x81;
const END_OF_DATA: u8 = 0x86;
const ALPHA_OPAQUE: u8 = 0x01;

/// Channel fractions this close to 0.0 or 1.0 collapse to a single byte.
const COMPONENT_TOLERANCE: f64 = 1e-3;

/// Longest name that fits the 1-byte length prefix.
const MAX_NAME_BYTES: usize = 255;

/// Error type for CLR encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteWriteError {
    /// The format requires at least one color entry.
    Empty,
}

impl fmt::Display for PaletteWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(
                f,
                "CLR files must have at least one color, but 0 were passed"
            ),
        }
    }
}

impl std::error::Error for PaletteWriteError {}

/// Encode colors as a CLR byte stream.
///
/// # Errors
///
/// Returns [`PaletteWriteError::Empty`] when `colors` is empty; nothing is
/// encoded in that case.
pub fn encode(colors: &[Color]) -> Result<Vec<u8>, PaletteWriteError> {
    let (first, rest) = colors.split_first().ok_or(PaletteWriteError::Empty)?;

    let mut content = Vec::new();
    content.extend_from_slice(FILE_SIGNATURE);
    content.extend_from_slice(FILE_PREAMBLE);
    content.extend_from_slice(&color_count_chunk(colors.len()));
    content.extend_from_slice(&first_color_entry(first));
    for color in rest {
        content.extend_from_slice(&next_color_entry(color));
    }
    Ok(content)
}

/// Encode colors and write them to the given path.
///
/// Encoding happens first, so an empty color list never creates a file.
///
/// # Errors
///
/// Returns [`ClrFileError::Palette`] for an empty color list and
/// [`ClrFileError::Io`] for write failures.
pub fn write_file(colors: &[Color], path: &Path) -> Result<(), ClrFileError> {
    let content = encode(colors)?;
    fs::write(path, content)?;
    Ok(())
}

/// Error produced when writing a CLR file.
#[derive(Debug)]
pub enum ClrFileError {
    Palette(PaletteWriteError),
    Io(io::Error),
}

impl fmt::Display for ClrFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette(err) => err.fmt(f),
            Self::Io(err) => write!(f, "failed to write CLR file: {err}"),
        }
    }
}

impl std::error::Error for ClrFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Palette(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<PaletteWriteError> for ClrFileError {
    fn from(err: PaletteWriteError) -> Self {
        Self::Palette(err)
    }
}

impl From<io::Error> for ClrFileError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Count chunk: 1 byte for counts up to 127, otherwise a 16-bit marker
/// followed by the count as little-endian u16.
fn color_count_chunk(count: usize) -> Vec<u8> {
    let mut chunk = Vec::with_capacity(8);
    chunk.extend_from_slice(COLOR_COUNT_CHUNK_TAG);
    if count <= 127 {
        #[expect(clippy::cast_possible_truncation, reason = "count <= 127")]
        chunk.push(count as u8);
    } else {
        let count = u16::try_from(count).expect("color count fits in u16");
        chunk.push(INTEGER_16_MARKER);
        chunk.extend_from_slice(&count.to_le_bytes());
    }
    chunk
}

/// First entry: declares the color and name classes inline around the first
/// RGBA and name blocks.
fn first_color_entry(color: &Color) -> Vec<u8> {
    let mut entry = Vec::new();
    entry.extend_from_slice(NEW_COLOR_MAP_TAG);
    entry.extend_from_slice(&class_declaration(b"NSColor"));
    entry.push(NULL_BYTE);
    entry.extend_from_slice(INHERITANCE_DECLARATION);
    entry.push(u8::try_from(b"NSObject".len()).expect("short class name"));
    entry.extend_from_slice(b"NSObject");
    entry.push(NULL_BYTE);
    entry.extend_from_slice(COMPONENTS_CHUNK_TAG);
    entry.extend_from_slice(&rgba_block(color.rgb));
    entry.extend_from_slice(&class_declaration(b"NSString"));
    entry.extend_from_slice(NAMES_CHUNK_TAG);
    entry.extend_from_slice(&name_block(&color.description));
    entry
}

/// Entries after the first reference the classes declared inline by the
/// first one.
fn next_color_entry(color: &Color) -> Vec<u8> {
    let mut entry = Vec::new();
    entry.extend_from_slice(NEXT_COLOR_TAG);
    entry.extend_from_slice(&rgba_block(color.rgb));
    entry.extend_from_slice(NEXT_NAME_TAG);
    entry.extend_from_slice(&name_block(&color.description));
    entry
}

fn class_declaration(class_name: &[u8]) -> Vec<u8> {
    let mut declaration = Vec::with_capacity(class_name.len() + 4);
    declaration.extend_from_slice(CLASS_DECLARATION);
    declaration.push(u8::try_from(class_name.len()).expect("short class name"));
    declaration.extend_from_slice(class_name);
    declaration
}

/// R, G and B components, a fixed opaque alpha and the end-of-data byte.
fn rgba_block(rgb: Rgb) -> Vec<u8> {
    let mut block = Vec::with_capacity(17);
    for fraction in [
        rgb.red_fraction(),
        rgb.green_fraction(),
        rgb.blue_fraction(),
    ] {
        block.extend_from_slice(&component_bytes(fraction));
    }
    block.push(ALPHA_OPAQUE);
    block.push(END_OF_DATA);

    log::debug!("RGB components {rgb} encoded as {block:02x?}");
    block
}

fn component_bytes(fraction: f64) -> Vec<u8> {
    if almost_equal(fraction, 1.0, COMPONENT_TOLERANCE) {
        return vec![0x01];
    }
    if almost_equal(fraction, 0.0, COMPONENT_TOLERANCE) {
        return vec![0x00];
    }

    let mut bytes = Vec::with_capacity(5);
    bytes.push(FLOAT_MARKER);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "channel fractions are in [0, 1], f32 only rounds the mantissa"
    )]
    bytes.extend_from_slice(&(fraction as f32).to_le_bytes());
    bytes
}

/// 1-byte length-prefixed UTF-8 name, truncated to 255 bytes on a char
/// boundary, closed by the end-of-data byte.
fn name_block(name: &str) -> Vec<u8> {
    let truncated = truncate_to_char_boundary(name, MAX_NAME_BYTES);

    let mut block = Vec::with_capacity(truncated.len() + 2);
    #[expect(clippy::cast_possible_truncation, reason = "truncated to <= 255 bytes")]
    block.push(truncated.len() as u8);
    block.extend_from_slice(truncated.as_bytes());
    block.push(END_OF_DATA);
    block
}

fn truncate_to_char_boundary(name: &str, max_bytes: usize) -> &str {
    if name.len() <= max_bytes {
        return name;
    }
    let mut end = max_bytes;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorFormat;

    fn color(rgb: Rgb, description: &str) -> Color {
        Color::new(rgb, ColorFormat::Rgb, description)
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        assert_eq!(encode(&[]), Err(PaletteWriteError::Empty));
    }

    #[test]
    fn test_file_preamble() {
        let encoded = encode(&[color(Rgb::new(255, 0, 0), "red")]).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(b"\x04\x0bstreamtyped");
        expected.extend_from_slice(&[0x81, 0xe8, 0x03, 0x84, 0x01, 0x69, 0x01]);
        // count chunk with a single color
        expected.extend_from_slice(&[0x84, 0x02, 0x40, 0x69, 0x85, 0x01]);
        assert_eq!(&encoded[..expected.len()], &expected[..]);
    }

    #[test]
    fn test_first_entry_declares_classes_inline() {
        let encoded = encode(&[color(Rgb::new(255, 0, 0), "red")]).unwrap();
        let nscolor: &[u8] = &[0x84, 0x84, 0x84, 0x07, b'N', b'S', b'C', b'o', b'l', b'o', b'r'];
        let nsstring: &[u8] = &[0x84, 0x84, 0x84, 0x08, b'N', b'S', b'S', b't', b'r', b'i', b'n', b'g'];
        assert!(contains(&encoded, nscolor), "NSColor declaration missing");
        assert!(contains(&encoded, b"NSObject"), "NSObject declaration missing");
        assert!(contains(&encoded, nsstring), "NSString declaration missing");
    }

    #[test]
    fn test_saturated_channels_collapse_to_single_bytes() {
        // (255, 0, 0): red ~ 1.0, green and blue ~ 0.0
        let block = rgba_block(Rgb::new(255, 0, 0));
        assert_eq!(block, vec![0x01, 0x00, 0x00, ALPHA_OPAQUE, END_OF_DATA]);
    }

    #[test]
    fn test_intermediate_channel_is_marked_float() {
        let block = rgba_block(Rgb::new(0, 128, 255));
        // 128/255 little-endian f32
        let fraction = (128.0f64 / 255.0) as f32;
        let mut expected = vec![0x00, FLOAT_MARKER];
        expected.extend_from_slice(&fraction.to_le_bytes());
        expected.extend_from_slice(&[0x01, ALPHA_OPAQUE, END_OF_DATA]);
        assert_eq!(block, expected);
    }

    #[test]
    fn test_name_block_layout() {
        assert_eq!(name_block("red"), vec![3, b'r', b'e', b'd', END_OF_DATA]);
        assert_eq!(name_block(""), vec![0, END_OF_DATA]);
    }

    #[test]
    fn test_long_name_is_truncated_to_255_bytes() {
        let long = "x".repeat(300);
        let block = name_block(&long);
        assert_eq!(block[0], 255);
        assert_eq!(block.len(), 257);
        assert_eq!(*block.last().unwrap(), END_OF_DATA);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 2-byte characters: 255 falls inside one, so the cut moves back.
        let long = "é".repeat(200);
        let block = name_block(&long);
        assert_eq!(block[0], 254);
    }

    #[test]
    fn test_subsequent_entries_use_short_form() {
        let encoded = encode(&[
            color(Rgb::new(255, 0, 0), "red"),
            color(Rgb::new(0, 255, 0), "green"),
        ])
        .unwrap();
        assert!(contains(&encoded, NEXT_COLOR_TAG), "short color tag missing");
        assert!(contains(&encoded, NEXT_NAME_TAG), "short name tag missing");
        // Classes are declared once only.
        assert_eq!(count_occurrences(&encoded, b"NSColor"), 1);
    }

    #[test]
    fn test_wide_color_count_uses_16_bit_marker() {
        let chunk = color_count_chunk(300);
        assert_eq!(chunk[..5], *COLOR_COUNT_CHUNK_TAG);
        assert_eq!(chunk[5], INTEGER_16_MARKER);
        assert_eq!(&chunk[6..], &300u16.to_le_bytes());
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }
}
