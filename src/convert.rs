//! Color-space converters: RGB to HSV, HSL and perceived luminosity.
//!
//! These are pure numeric functions over [`Rgb`] values. The hue and
//! saturation formulas operate on [`HueData`], an ephemeral view holding the
//! channel fractions plus the largest channel and the (max - min) spread,
//! computed fresh per calculation.

use crate::color::Rgb;

/// Tolerance used when testing float results for equality.
pub const FLOAT_TOLERANCE: f64 = 1e-7;

/// Upper bound of the hue circle in degrees.
pub const MAX_HUE: f64 = 360.0;

/// Returns `true` when both values differ by less than `tolerance`.
#[must_use]
pub fn almost_equal(first: f64, second: f64, tolerance: f64) -> bool {
    (first - second).abs() < tolerance
}

/// Channel fractions plus the derived extrema used by the hue and
/// saturation formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueData {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl HueData {
    /// Build the hue data for an RGB value.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (red, green, blue) = rgb.fractions();
        Self { red, green, blue }
    }

    /// The largest channel fraction.
    #[must_use]
    pub fn biggest(&self) -> f64 {
        self.red.max(self.green).max(self.blue)
    }

    /// The smallest channel fraction.
    #[must_use]
    pub fn smallest(&self) -> f64 {
        self.red.min(self.green).min(self.blue)
    }

    /// Difference between the largest and smallest channel fractions.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.biggest() - self.smallest()
    }
}

/// Calculate the hue of a color in degrees (0-360).
///
/// Gray colors (zero spread) have hue 0. The case split follows which
/// channel carries the maximum; the red case wraps with a Euclidean
/// remainder so the result stays non-negative.
#[must_use]
pub fn hue(data: &HueData) -> f64 {
    let spread = data.spread();
    if almost_equal(spread, 0.0, FLOAT_TOLERANCE) {
        log::debug!("hue is zero: biggest and smallest channels coincide");
        return 0.0;
    }

    let biggest = data.biggest();
    let sextant = if almost_equal(data.red, biggest, FLOAT_TOLERANCE) {
        ((data.green - data.blue) / spread).rem_euclid(6.0)
    } else if almost_equal(data.green, biggest, FLOAT_TOLERANCE) {
        (data.blue - data.red) / spread + 2.0
    } else {
        (data.red - data.green) / spread + 4.0
    };

    sextant * 60.0
}

/// Calculate the saturation of a color (spread over the largest channel).
///
/// Used by both the HSV and HSL sort keys.
#[must_use]
pub fn saturation(data: &HueData) -> f64 {
    let biggest = data.biggest();
    if almost_equal(biggest, 0.0, FLOAT_TOLERANCE) {
        return 0.0;
    }
    data.spread() / biggest
}

/// Convert an RGB value to its (hue, saturation, value) triple.
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> (f64, f64, f64) {
    let data = HueData::from_rgb(rgb);
    (hue(&data), saturation(&data), data.biggest())
}

/// Convert an RGB value to its (hue, saturation, luminosity) triple.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> (f64, f64, f64) {
    let data = HueData::from_rgb(rgb);
    (hue(&data), saturation(&data), hsl_luminosity(&data))
}

/// HSL luminosity: midpoint of the largest and smallest channel fractions.
#[must_use]
pub fn hsl_luminosity(data: &HueData) -> f64 {
    (data.biggest() + data.smallest()) / 2.0
}

/// Perceived luminosity over 0-255 integer channels:
/// `sqrt(0.241 R + 0.691 G + 0.068 B)`.
///
/// The channel weights approximate human brightness perception; the channels
/// are deliberately not normalized to fractions.
#[must_use]
pub fn luminosity(rgb: Rgb) -> f64 {
    (0.241 * f64::from(rgb.red) + 0.691 * f64::from(rgb.green) + 0.068 * f64::from(rgb.blue))
        .sqrt()
}

/// HSL value type handed to the color-naming collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in whole degrees.
    pub hue: i32,
    pub saturation: f64,
    pub luminosity: f64,
}

impl Hsl {
    /// Build the HSL view of an RGB value, with the hue truncated to whole
    /// degrees.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "hue is in [0, 360), truncation to whole degrees is intended"
    )]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (hue, saturation, luminosity) = rgb_to_hsl(rgb);
        Self {
            hue: hue as i32,
            saturation,
            luminosity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_hue_of_gray_is_zero() {
        let data = HueData::from_rgb(Rgb::new(128, 128, 128));
        assert_close(hue(&data), 0.0);
    }

    #[test]
    fn test_hue_of_primaries() {
        assert_close(hue(&HueData::from_rgb(Rgb::new(255, 0, 0))), 0.0);
        assert_close(hue(&HueData::from_rgb(Rgb::new(0, 255, 0))), 120.0);
        assert_close(hue(&HueData::from_rgb(Rgb::new(0, 0, 255))), 240.0);
    }

    #[test]
    fn test_hue_red_case_wraps_negative_quotient() {
        // green < blue with red as maximum: the sextant is negative before
        // the Euclidean remainder pulls it back into [0, 6).
        let data = HueData::from_rgb(Rgb::new(255, 0, 255));
        assert_close(hue(&data), 300.0);
    }

    #[test]
    fn test_saturation_extremes() {
        assert_close(saturation(&HueData::from_rgb(Rgb::new(0, 0, 0))), 0.0);
        assert_close(saturation(&HueData::from_rgb(Rgb::new(255, 0, 0))), 1.0);
        assert_close(saturation(&HueData::from_rgb(Rgb::new(200, 200, 200))), 0.0);
    }

    #[test]
    fn test_rgb_to_hsv() {
        let (h, s, v) = rgb_to_hsv(Rgb::new(0, 255, 0));
        assert_close(h, 120.0);
        assert_close(s, 1.0);
        assert_close(v, 1.0);

        let (h, s, v) = rgb_to_hsv(Rgb::new(128, 128, 128));
        assert_close(h, 0.0);
        assert_close(s, 0.0);
        assert_close(v, 128.0 / 255.0);
    }

    #[test]
    fn test_rgb_to_hsl_luminosity_is_midpoint() {
        let (_, _, l) = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_close(l, 0.5);

        let (_, _, l) = rgb_to_hsl(Rgb::new(255, 255, 255));
        assert_close(l, 1.0);
    }

    #[test]
    fn test_perceived_luminosity() {
        assert_close(luminosity(Rgb::new(0, 0, 0)), 0.0);
        assert_close(
            luminosity(Rgb::new(255, 255, 255)),
            (0.241f64 * 255.0 + 0.691 * 255.0 + 0.068 * 255.0).sqrt(),
        );
        // Green weighs far more than blue.
        assert!(luminosity(Rgb::new(0, 100, 0)) > luminosity(Rgb::new(0, 0, 100)));
    }

    #[test]
    fn test_hsl_from_rgb_truncates_hue() {
        let hsl = Hsl::from_rgb(Rgb::new(235, 61, 52));
        assert_eq!(hsl.hue, 2);
        assert!(hsl.saturation > 0.7);
        assert!(hsl.luminosity > 0.5);
    }
}
