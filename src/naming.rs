//! Seam for the color-naming collaborator.
//!
//! Name lookup itself (typically a persisted nearest-neighbor store over
//! HSL space) lives outside this crate; the core only needs a way to ask
//! "name this color" for entries whose description is empty.

use crate::color::Color;
use crate::convert::Hsl;

/// Names a color from its HSL view.
///
/// Implementations are expected to be pure from the core's perspective and
/// to answer within the call; the core does not retry.
pub trait ColorNamer {
    fn name_for(&self, hsl: &Hsl) -> String;
}

impl<F> ColorNamer for F
where
    F: Fn(&Hsl) -> String,
{
    fn name_for(&self, hsl: &Hsl) -> String {
        self(hsl)
    }
}

/// Fill in names for colors with an empty description.
///
/// Colors that already carry a description pass through unchanged; unnamed
/// ones are replaced by copies with the generated name.
#[must_use]
pub fn apply_names<N: ColorNamer>(colors: &[Color], namer: &N) -> Vec<Color> {
    colors
        .iter()
        .map(|color| {
            if color.description.is_empty() {
                let name = namer.name_for(&Hsl::from_rgb(color.rgb));
                log::debug!("named {} as {name:?}", color.hexcode);
                color.with_description(&name)
            } else {
                color.clone()
            }
        })
        .collect()
}
