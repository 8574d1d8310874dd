//! ASE (chunked palette format) encoder.
//!
//! Byte layout, all multi-byte integers big-endian:
//!
//! - header: magic `ASEF`, version `00 01 00 00`, u32 chunk count
//!   (colors + 2: one name chunk, one color chunk each, one final chunk)
//! - palette-name chunk: tag `C0 01 00 00`, u16 byte length of the encoded
//!   name, u16 UTF-16 unit count; the name is UTF-16BE with a 2-byte null
//!   terminator
//! - per-color chunk: tag `00 01 00 00`, u16 payload length, description
//!   block (u16 unit count, UTF-16BE bytes, 4 zero bytes), color block
//!   (`RGB ` tag, three f32 channel fractions, `00 02` color-model tag)
//! - final chunk: `C0 02 00 00 00 00`
//!
//! The encoder is a pure transformation; it writes the colors in the order
//! given and never sorts.

use std::fs;
use std::io;
use std::path::Path;

use crate::color::{Color, Rgb};

const FILE_SIGNATURE: &[u8] = b"ASEF";
const VERSION: &[u8] = &[0x00, 0x01, 0x00, 0x00];
const PALETTE_NAME_CHUNK_TAG: &[u8] = &[0xc0, 0x01, 0x00, 0x00];
const COLOR_CHUNK_TAG: &[u8] = &[0x00, 0x01, 0x00, 0x00];
const FINAL_CHUNK: &[u8] = &[0xc0, 0x02, 0x00, 0x00, 0x00, 0x00];
const COLOR_MODEL_TAG: &[u8] = &[0x00, 0x02];

/// Encode colors as an ASE byte stream.
#[must_use]
pub fn encode(colors: &[Color], palette_name: &str) -> Vec<u8> {
    let mut content = Vec::new();
    content.extend_from_slice(FILE_SIGNATURE);
    content.extend_from_slice(VERSION);
    content.extend_from_slice(&chunk_count(colors).to_be_bytes());
    content.extend_from_slice(&palette_name_chunk(palette_name));
    for color in colors {
        content.extend_from_slice(&color_chunk(color));
    }
    content.extend_from_slice(FINAL_CHUNK);
    content
}

/// Encode colors and write them to the given path.
///
/// The file is only created once encoding succeeded, so a failed write
/// never leaves a partial palette behind.
///
/// # Errors
///
/// Returns any I/O error from the underlying write.
pub fn write_file(colors: &[Color], palette_name: &str, path: &Path) -> io::Result<()> {
    fs::write(path, encode(colors, palette_name))
}

/// One chunk per color, plus the palette-name chunk and the final chunk.
fn chunk_count(colors: &[Color]) -> u32 {
    u32::try_from(colors.len()).expect("color count fits in u32") + 2
}

fn palette_name_chunk(palette_name: &str) -> Vec<u8> {
    let name = utf16_with_null(palette_name, 2);
    let byte_length = u16::try_from(name.len()).expect("palette name fits in u16");

    let mut chunk = Vec::with_capacity(name.len() + 8);
    chunk.extend_from_slice(PALETTE_NAME_CHUNK_TAG);
    chunk.extend_from_slice(&byte_length.to_be_bytes());
    chunk.extend_from_slice(&(byte_length / 2).to_be_bytes());
    chunk.extend_from_slice(&name);
    chunk
}

fn color_chunk(color: &Color) -> Vec<u8> {
    let description = description_block(&color.description);
    let rgb = rgb_block(color.rgb);
    let payload_length = u16::try_from(description.len() + rgb.len()).expect("payload fits in u16");

    log::debug!(
        "color description {:?} encoded as {} bytes",
        color.description,
        description.len()
    );

    let mut chunk = Vec::with_capacity(description.len() + rgb.len() + 6);
    chunk.extend_from_slice(COLOR_CHUNK_TAG);
    chunk.extend_from_slice(&payload_length.to_be_bytes());
    chunk.extend_from_slice(&description);
    chunk.extend_from_slice(&rgb);
    chunk
}

/// UTF-16 unit count (terminator included), UTF-16BE bytes, 4 zero bytes.
fn description_block(description: &str) -> Vec<u8> {
    let encoded = utf16_with_null(description, 4);
    let unit_count = u16::try_from(encoded.len() / 2).expect("description fits in u16");

    let mut block = Vec::with_capacity(encoded.len() + 2);
    block.extend_from_slice(&unit_count.to_be_bytes());
    block.extend_from_slice(&encoded);
    block
}

/// `RGB ` tag, the three channel fractions as big-endian f32, model tag.
fn rgb_block(rgb: Rgb) -> Vec<u8> {
    let mut block = Vec::with_capacity(18);
    block.extend_from_slice(b"RGB ");
    #[expect(
        clippy::cast_possible_truncation,
        reason = "channel fractions are in [0, 1], f32 only rounds the mantissa"
    )]
    for fraction in [
        rgb.red_fraction(),
        rgb.green_fraction(),
        rgb.blue_fraction(),
    ] {
        block.extend_from_slice(&(fraction as f32).to_be_bytes());
    }
    block.extend_from_slice(COLOR_MODEL_TAG);

    log::debug!("RGB components {rgb} encoded as {block:02x?}");
    block
}

/// UTF-16BE encoding with `null_bytes` trailing zero bytes.
fn utf16_with_null(text: &str, null_bytes: usize) -> Vec<u8> {
    let mut encoded: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
    encoded.extend(std::iter::repeat_n(0x00, null_bytes));
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorFormat;

    fn color(rgb: Rgb, description: &str) -> Color {
        Color::new(rgb, ColorFormat::Hexcode, description)
    }

    #[test]
    fn test_header_of_single_color_unnamed_palette() {
        let encoded = encode(&[color(Rgb::new(235, 61, 52), "red")], "");
        // Chunk count 3: name chunk + one color chunk + final chunk.
        assert_eq!(
            &encoded[..20],
            &[
                0x41, 0x53, 0x45, 0x46, // "ASEF"
                0x00, 0x01, 0x00, 0x00, // version
                0x00, 0x00, 0x00, 0x03, // chunk count
                0xc0, 0x01, 0x00, 0x00, // name chunk tag
                0x00, 0x02, 0x00, 0x01, // 2 bytes, 1 UTF-16 unit
            ]
        );
    }

    #[test]
    fn test_palette_name_is_utf16be_with_terminator() {
        let encoded = encode(&[], "ab");
        // name chunk: tag + size 6 + count 3 + "a" "b" + null terminator
        let expected: &[u8] = &[
            0xc0, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x03, 0x00, b'a', 0x00, b'b', 0x00, 0x00,
        ];
        assert_eq!(&encoded[12..26], expected);
    }

    #[test]
    fn test_rgb_block_reference_vectors() {
        // Known-good byte vectors; existing readers depend on them.
        let encoded = encode(
            &[
                color(Rgb::new(235, 61, 52), "red"),
                color(Rgb::new(75, 214, 47), "green"),
            ],
            "palette",
        );
        let red_block: &[u8] = &[
            b'R', b'G', b'B', b' ', 0x3f, 0x6b, 0xeb, 0xec, 0x3e, 0x74, 0xf4, 0xf5, 0x3e, 0x50,
            0xd0, 0xd1, 0x00, 0x02,
        ];
        let green_block: &[u8] = &[
            b'R', b'G', b'B', b' ', 0x3e, 0x96, 0x96, 0x97, 0x3f, 0x56, 0xd6, 0xd7, 0x3e, 0x3c,
            0xbc, 0xbd, 0x00, 0x02,
        ];
        assert!(contains(&encoded, red_block), "red RGB block missing");
        assert!(contains(&encoded, green_block), "green RGB block missing");
    }

    #[test]
    fn test_color_chunk_lengths() {
        let chunk = color_chunk(&color(Rgb::new(0, 0, 0), "red"));
        // description block: 2 (count) + 6 (utf16 "red") + 4 (terminator)
        // color block: 4 (tag) + 12 (floats) + 2 (model tag)
        assert_eq!(&chunk[..4], COLOR_CHUNK_TAG);
        assert_eq!(&chunk[4..6], &[0x00, 30]);
        // unit count covers the utf16 bytes plus the 4-byte terminator
        assert_eq!(&chunk[6..8], &[0x00, 5]);
        assert_eq!(chunk.len(), 36);
    }

    #[test]
    fn test_final_chunk_terminates_stream() {
        let encoded = encode(&[color(Rgb::new(1, 2, 3), "x")], "p");
        assert_eq!(&encoded[encoded.len() - 6..], FINAL_CHUNK);
    }

    #[test]
    fn test_colors_are_written_in_given_order() {
        let encoded = encode(
            &[
                color(Rgb::new(255, 255, 255), "white"),
                color(Rgb::new(0, 0, 0), "black"),
            ],
            "",
        );
        let white = utf16_with_null("white", 4);
        let black = utf16_with_null("black", 4);
        let white_at = position(&encoded, &white).expect("white present");
        let black_at = position(&encoded, &black).expect("black present");
        assert!(white_at < black_at);
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        position(haystack, needle).is_some()
    }

    fn position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }
}
