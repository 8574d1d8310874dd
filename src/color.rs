//! Color value types.
//!
//! The two core types are [`Rgb`] (three 8-bit channels with fraction views)
//! and [`Color`] (an `Rgb` plus the canonical hexcode, the format the color
//! was originally expressed in, and a free-text description).
//!
//! # Examples
//!
//! ```
//! use huesort::color::{Color, ColorFormat, Rgb};
//!
//! let rgb = Rgb::new(235, 61, 52);
//! assert_eq!(rgb.hex(), "#eb3d34");
//!
//! let color = Color::new(rgb, ColorFormat::Rgb, "red");
//! assert_eq!(color.hexcode, "#eb3d34");
//! ```

use std::fmt;

/// Maximum value of an 8-bit color channel.
pub const MAX_CHANNEL: u8 = 255;

/// RGB color with channel values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    /// Create a new RGB value from its components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse an `#rrggbb` or `#rgb` hexcode. Returns `None` when the string
    /// is not a valid hexcode.
    #[must_use]
    pub fn from_hexcode(hexcode: &str) -> Option<Self> {
        let digits = normalize_hexcode(hexcode)?;
        let digits = digits.strip_prefix('#')?.to_string();
        Some(Self::new(
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        ))
    }

    /// Returns the canonical lowercase hexcode `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Red channel as a fraction of 255.
    #[must_use]
    pub fn red_fraction(&self) -> f64 {
        f64::from(self.red) / f64::from(MAX_CHANNEL)
    }

    /// Green channel as a fraction of 255.
    #[must_use]
    pub fn green_fraction(&self) -> f64 {
        f64::from(self.green) / f64::from(MAX_CHANNEL)
    }

    /// Blue channel as a fraction of 255.
    #[must_use]
    pub fn blue_fraction(&self) -> f64 {
        f64::from(self.blue) / f64::from(MAX_CHANNEL)
    }

    /// All three channels as fractions of 255.
    #[must_use]
    pub fn fractions(&self) -> (f64, f64, f64) {
        (
            self.red_fraction(),
            self.green_fraction(),
            self.blue_fraction(),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// Textual format a color was originally expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFormat {
    /// `#rrggbb` hexcode.
    Hexcode,
    /// `(r, g, b)` tuple.
    Rgb,
    /// Keep whatever format the input used.
    #[default]
    SameAsInput,
}

impl ColorFormat {
    /// Get the name of this format as it appears on the CLI.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hexcode => "hexcode",
            Self::Rgb => "rgb",
            Self::SameAsInput => "input",
        }
    }
}

/// A parsed color: channel values, canonical hexcode, original textual
/// format and an optional description.
///
/// `Color` is immutable; use [`Color::with_description`] to obtain a copy
/// with the description replaced (e.g. when a name is generated for an
/// unlabeled color).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub rgb: Rgb,
    /// Canonical lowercase `#rrggbb` form, derived even from 3-digit input.
    pub hexcode: String,
    pub original_format: ColorFormat,
    pub description: String,
}

impl Color {
    /// Create a color from an RGB value; the hexcode is derived.
    #[must_use]
    pub fn new(rgb: Rgb, original_format: ColorFormat, description: &str) -> Self {
        Self {
            hexcode: rgb.hex(),
            rgb,
            original_format,
            description: description.to_string(),
        }
    }

    /// Returns a copy of this color with the description replaced.
    #[must_use]
    pub fn with_description(&self, description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hexcode)
    }
}

/// Expand a 3-digit hexcode to the 6-digit form by digit doubling and
/// lowercase it. 6-digit input is only lowercased. Returns `None` when the
/// string is not `#` + 3 or 6 hex digits.
#[must_use]
pub fn normalize_hexcode(hexcode: &str) -> Option<String> {
    let digits = hexcode.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some(format!("#{}", digits.to_lowercase())),
        3 => {
            let mut expanded = String::with_capacity(7);
            expanded.push('#');
            for c in digits.chars() {
                expanded.push(c);
                expanded.push(c);
            }
            Some(expanded.to_lowercase())
        }
        _ => None,
    }
}
