//! Sorting strategies.
//!
//! Each strategy reduces a [`Color`] to a sort key and orders the list with
//! a stable sort, so colors with identical keys keep their input order. The
//! strategy set is a closed enum dispatched with an exhaustive match; adding
//! a strategy without wiring a key is a compile error.
//!
//! The direction modifier is not part of the key: `Backward` reverses the
//! fully sorted sequence.

use std::cmp::Ordering;

use crate::color::Color;
use crate::convert::{self, HueData, MAX_HUE};
use crate::hilbert::hilbert_index;

/// Number of buckets used by the stepped strategies (45 degrees of hue per
/// bucket).
const STEPS: u32 = 8;

/// Available sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKind {
    /// Lexicographic over (red, green, blue).
    Rgb,
    /// (hue, saturation, value) triple.
    Hsv,
    /// (hue, saturation, luminosity) triple.
    Hsl,
    /// Perceived-luminosity scalar.
    Luminosity,
    /// Hue bucketed into 8 steps, then luminosity, then stepped value.
    Step,
    /// Like `Step`, but odd hue buckets run backwards (serpentine).
    AlternatedStep,
    /// Hilbert-curve index over the RGB cube (default).
    #[default]
    Hilbert,
}

impl SortKind {
    /// Get the name of this strategy as it appears on the CLI and in output
    /// file names.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsv => "hsv",
            Self::Hsl => "hsl",
            Self::Luminosity => "luminosity",
            Self::Step => "step",
            Self::AlternatedStep => "step-alternated",
            Self::Hilbert => "hilbert",
        }
    }
}

/// Direction of the final sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Sort colors with the given strategy and direction.
///
/// The underlying sort is stable; `Direction::Backward` reverses the sorted
/// sequence as a whole rather than flipping the comparator, so ties reverse
/// together with everything else.
#[must_use]
pub fn sort(colors: &[Color], kind: SortKind, direction: Direction) -> Vec<Color> {
    let mut sorted = colors.to_vec();
    match kind {
        SortKind::Rgb => sorted.sort_by_key(|color| {
            let rgb = color.rgb;
            (rgb.red, rgb.green, rgb.blue)
        }),
        SortKind::Hsv => sort_by_float_triple(&mut sorted, |color| convert::rgb_to_hsv(color.rgb)),
        SortKind::Hsl => sort_by_float_triple(&mut sorted, |color| convert::rgb_to_hsl(color.rgb)),
        SortKind::Luminosity => {
            sorted.sort_by(|a, b| {
                convert::luminosity(a.rgb).total_cmp(&convert::luminosity(b.rgb))
            });
        }
        SortKind::Step => sorted.sort_by(|a, b| step_key(a).compare(&step_key(b))),
        SortKind::AlternatedStep => {
            sorted.sort_by(|a, b| alternated_step_key(a).compare(&alternated_step_key(b)));
        }
        SortKind::Hilbert => sorted.sort_by_key(hilbert_sort_index),
    }

    if direction == Direction::Backward {
        sorted.reverse();
    }
    sorted
}

/// Hilbert sort key.
///
/// Each 0-255 channel is scaled by 255 again before indexing, placing the
/// coordinates in a 0-65025 cube. Existing palettes were ordered with this
/// scale, so it is kept for compatibility; it widens the bit planes but
/// does not change the relative order, being a uniform scale on all three
/// axes.
#[must_use]
pub fn hilbert_sort_index(color: &Color) -> u128 {
    let rgb = color.rgb;
    hilbert_index(&[
        u32::from(rgb.red) * 255,
        u32::from(rgb.green) * 255,
        u32::from(rgb.blue) * 255,
    ])
}

/// Key of the stepped strategies: hue bucket, luminosity, value bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SteppedKey {
    hue_step: i64,
    luminosity: f64,
    value_step: i64,
}

impl SteppedKey {
    fn compare(&self, other: &Self) -> Ordering {
        self.hue_step
            .cmp(&other.hue_step)
            .then_with(|| self.luminosity.total_cmp(&other.luminosity))
            .then_with(|| self.value_step.cmp(&other.value_step))
    }
}

fn step_key(color: &Color) -> SteppedKey {
    let data = HueData::from_rgb(color.rgb);
    SteppedKey {
        hue_step: round_to_step(convert::hue(&data) / MAX_HUE),
        luminosity: convert::luminosity(color.rgb),
        value_step: round_to_step(data.biggest()),
    }
}

fn alternated_step_key(color: &Color) -> SteppedKey {
    let mut key = step_key(color);
    // Odd hue buckets run backwards so consecutive buckets meet at similar
    // brightness instead of jumping from light back to dark.
    if key.hue_step % 2 == 1 {
        key.value_step = i64::from(STEPS) - key.value_step;
        key.luminosity = f64::from(STEPS) - key.luminosity;
    }
    key
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "fraction * 8 rounds to a small bucket number"
)]
fn round_to_step(fraction: f64) -> i64 {
    // Ties round to the even bucket, so a hue landing exactly on a 45
    // degree boundary stays in the bucket established orderings expect.
    (fraction * f64::from(STEPS)).round_ties_even() as i64
}

/// Sort in place by an (f64, f64, f64) key using a total float order.
fn sort_by_float_triple<F>(colors: &mut [Color], key: F)
where
    F: Fn(&Color) -> (f64, f64, f64),
{
    colors.sort_by(|a, b| {
        let (a0, a1, a2) = key(a);
        let (b0, b1, b2) = key(b);
        a0.total_cmp(&b0)
            .then_with(|| a1.total_cmp(&b1))
            .then_with(|| a2.total_cmp(&b2))
    });
}
