//! Reading strategies: turn raw text lines into [`Color`]s.
//!
//! Two grammars are supported, dispatched by regex:
//!
//! - hexcode: `#` + 3 or 6 hex digits, e.g. `#eb3d34` or `#abc`
//! - RGB tuple: `(r, g, b)` with each channel in 0-255
//!
//! Either form may carry a description after whitespace, which is trimmed.
//! A line matching neither grammar or carrying an out-of-range channel is a
//! hard error; reading aborts on the first bad line. The channel grammar
//! itself stops at 299, so 256-299 reports the offending value while 300
//! and up fails as an unrecognized format.

use std::fmt;
use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::color::{Color, ColorFormat, Rgb, normalize_hexcode};

/// Error type for color line parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The line matches neither the hexcode nor the RGB grammar.
    InvalidFormat(String),
    /// A channel value lies outside 0-255; carries the first offender.
    InvalidValue(i64),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(line) => {
                write!(f, "\"{line}\" does not match any valid color format")
            }
            Self::InvalidValue(value) => write!(
                f,
                "the amount of red, green and blue needs to be between 0 and 255, \
                 {value} is invalid"
            ),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Error produced while reading a whole color list.
#[derive(Debug)]
pub enum ReadError {
    /// A line failed to parse; carries the 1-based line number.
    Parse { line: usize, source: ColorParseError },
    Io(std::io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, source } => write!(f, "line {line}: {source}"),
            Self::Io(err) => write!(f, "failed to read colors: {err}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Parse one line into a [`Color`].
///
/// # Errors
///
/// Returns [`ColorParseError::InvalidFormat`] when the line matches neither
/// grammar and [`ColorParseError::InvalidValue`] when an RGB channel falls
/// outside 0-255.
pub fn parse_line(raw_line: &str) -> Result<Color, ColorParseError> {
    static HEXCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(#[0-9a-fA-F]{3}(?:[0-9a-fA-F]{3})?)(?:\s+(.*))?$").expect("valid regex")
    });
    static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\(([0-2]?\d{1,2}),\s?([0-2]?\d{1,2}),\s?([0-2]?\d{1,2})\)(?:\s+(.*))?$")
            .expect("valid regex")
    });

    if let Some(caps) = HEXCODE_RE.captures(raw_line) {
        let description = caps.get(2).map_or("", |m| m.as_str()).trim();
        return Ok(color_from_hexcode(&caps[1], description));
    }

    if let Some(caps) = RGB_RE.captures(raw_line) {
        let description = caps.get(4).map_or("", |m| m.as_str()).trim();
        let red = checked_channel(&caps[1])?;
        let green = checked_channel(&caps[2])?;
        let blue = checked_channel(&caps[3])?;
        return Ok(Color::new(
            Rgb::new(red, green, blue),
            ColorFormat::Rgb,
            description,
        ));
    }

    Err(ColorParseError::InvalidFormat(raw_line.to_string()))
}

/// Read one color per line until EOF.
///
/// Every line must parse; the first failure aborts the whole read, so the
/// result is either the complete list or an error naming the bad line.
///
/// # Errors
///
/// Returns [`ReadError::Parse`] for the first unparseable line, or
/// [`ReadError::Io`] when the underlying reader fails.
pub fn read_colors<R: BufRead>(reader: R) -> Result<Vec<Color>, ReadError> {
    let mut colors = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let color = parse_line(&line).map_err(|source| ReadError::Parse {
            line: index + 1,
            source,
        })?;
        colors.push(color);
    }
    Ok(colors)
}

fn color_from_hexcode(hexcode: &str, description: &str) -> Color {
    // The regex guarantees 3 or 6 hex digits, so normalization cannot fail.
    let canonical = normalize_hexcode(hexcode).unwrap_or_else(|| hexcode.to_lowercase());
    let rgb = Rgb::from_hexcode(&canonical).unwrap_or_default();
    Color {
        rgb,
        hexcode: canonical,
        original_format: ColorFormat::Hexcode,
        description: description.to_string(),
    }
}

fn checked_channel(digits: &str) -> Result<u8, ColorParseError> {
    let value: i64 = digits.parse().map_err(|_| {
        // The grammar caps channels at 299, so this is unreachable.
        ColorParseError::InvalidFormat(digits.to_string())
    })?;
    u8::try_from(value).map_err(|_| ColorParseError::InvalidValue(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hexcode_with_description() {
        let color = parse_line("#eb3d34 red").unwrap();
        assert_eq!(color.rgb, Rgb::new(235, 61, 52));
        assert_eq!(color.hexcode, "#eb3d34");
        assert_eq!(color.original_format, ColorFormat::Hexcode);
        assert_eq!(color.description, "red");
    }

    #[test]
    fn test_parse_hexcode_without_description() {
        let color = parse_line("#4bd62f").unwrap();
        assert_eq!(color.rgb, Rgb::new(75, 214, 47));
        assert_eq!(color.description, "");
    }

    #[test]
    fn test_parse_3_digit_hexcode_is_canonicalized() {
        let color = parse_line("#abc cadet blue-ish").unwrap();
        assert_eq!(color.hexcode, "#aabbcc");
        assert_eq!(color.rgb, Rgb::new(0xaa, 0xbb, 0xcc));
        assert_eq!(color.description, "cadet blue-ish");
    }

    #[test]
    fn test_parse_uppercase_hexcode_is_lowercased() {
        let color = parse_line("#EB3D34").unwrap();
        assert_eq!(color.hexcode, "#eb3d34");
    }

    #[test]
    fn test_parse_rgb_tuple() {
        let color = parse_line("(75, 214, 47) green").unwrap();
        assert_eq!(color.rgb, Rgb::new(75, 214, 47));
        assert_eq!(color.hexcode, "#4bd62f");
        assert_eq!(color.original_format, ColorFormat::Rgb);
        assert_eq!(color.description, "green");
    }

    #[test]
    fn test_parse_rgb_tuple_without_spaces() {
        let color = parse_line("(0,0,0)").unwrap();
        assert_eq!(color.rgb, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_parse_rgb_boundary_values_accepted() {
        assert!(parse_line("(0, 0, 0)").is_ok());
        assert!(parse_line("(255, 255, 255)").is_ok());
    }

    #[test]
    fn test_parse_rgb_out_of_range_names_first_offender() {
        assert_eq!(
            parse_line("(256, 0, 0)"),
            Err(ColorParseError::InvalidValue(256))
        );
        assert_eq!(
            parse_line("(0, 299, 270)"),
            Err(ColorParseError::InvalidValue(299))
        );
    }

    #[test]
    fn test_parse_rgb_channels_past_grammar_are_format_errors() {
        // 300 and up never matches the tuple grammar.
        assert!(matches!(
            parse_line("(300, 0, 0)"),
            Err(ColorParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_line("(0, 999, 0)"),
            Err(ColorParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_garbage_is_format_error() {
        assert_eq!(
            parse_line("not a color"),
            Err(ColorParseError::InvalidFormat("not a color".to_string()))
        );
        assert_eq!(
            parse_line(""),
            Err(ColorParseError::InvalidFormat(String::new()))
        );
        assert!(matches!(
            parse_line("#12"),
            Err(ColorParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_line("(1, 2)"),
            Err(ColorParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_description_is_trimmed() {
        let color = parse_line("#ffffff   white   ").unwrap();
        assert_eq!(color.description, "white");
    }

    #[test]
    fn test_read_colors_collects_all_lines() {
        let input = "#eb3d34 red\n(75, 214, 47) green\n#d46804 orange\n";
        let colors = read_colors(input.as_bytes()).unwrap();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[1].description, "green");
    }

    #[test]
    fn test_read_colors_aborts_on_first_bad_line() {
        let input = "#eb3d34 red\nbogus\n#d46804 orange\n";
        let err = read_colors(input.as_bytes()).unwrap_err();
        match err {
            ReadError::Parse { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source, ColorParseError::InvalidFormat("bogus".to_string()));
            }
            ReadError::Io(_) => panic!("expected a parse error"),
        }
    }
}
