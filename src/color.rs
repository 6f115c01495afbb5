//! Color palettes and coloring schemes.
//!
//! Colors are `[f32; 3]` RGB in the 0-1 range so they can be handed to a
//! renderer without conversion. Named constants reproduce the original
//! viewer's byte palette.

use serde::{Deserialize, Serialize};

/// RGB color, each channel in 0-1.
pub type Rgb = [f32; 3];

/// Light gray, the default structure color for chain atoms.
pub const LIGHT_GRAY: Rgb = [0.827, 0.827, 0.827];
/// Pure blue (helix structures, first chain, nitrogen).
pub const BLUE: Rgb = [0.0, 0.0, 1.0];
/// Pure red (solvent, oxygen).
pub const RED: Rgb = [1.0, 0.0, 0.0];
/// Yellow (sulfur, second chain).
pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
/// Green (unknown elements/residues, third chain).
pub const GREEN: Rgb = [0.0, 0.502, 0.0];
/// Orange (sheet structures, fourth chain).
pub const ORANGE: Rgb = [1.0, 0.647, 0.0];
/// Purple (hydrogen, fifth chain).
pub const PURPLE: Rgb = [0.502, 0.0, 0.502];

/// Molecule coloring method.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Secondary-structure membership (helix/sheet/neither).
    #[default]
    Structure,
    /// Chemical element, by atom-name initial.
    Element,
    /// Residue (amino acid) identity.
    Residue,
    /// Owning chain.
    Chain,
    /// Normalized temperature factor (B-factor).
    Temperature,
}

/// Color for the element coloring method, selected by atom-name initial.
#[must_use]
pub fn element_color(atom_name: &str) -> Rgb {
    match atom_name.as_bytes().first() {
        Some(b'C') => LIGHT_GRAY,
        Some(b'N') => BLUE,
        Some(b'O') => RED,
        Some(b'H') => PURPLE,
        Some(b'S') => YELLOW,
        _ => GREEN,
    }
}

/// Map a normalized temperature factor (0-1) onto the blue-cyan-green-
/// yellow-red ramp used by the temperature coloring method.
#[must_use]
pub fn temperature_color(relative: f32) -> Rgb {
    if relative < 0.25 {
        [0.0, 4.0 * relative, 1.0]
    } else if relative < 0.5 {
        [0.0, 1.0, 1.0 - 4.0 * (relative - 0.25)]
    } else if relative < 0.75 {
        [4.0 * (relative - 0.5), 1.0, 0.0]
    } else {
        [1.0, 1.0 - 4.0 * (relative - 0.75), 0.0]
    }
}

/// Brighten a color for hover feedback: each channel moves halfway toward
/// full, and a pure gray is promoted all the way to white so the highlight
/// stays visible on gray entities.
#[must_use]
pub fn hover_highlight(color: Rgb) -> Rgb {
    let [mut r, mut g, mut b] = color;
    r += (1.0 - r) / 2.0;
    g += (1.0 - g) / 2.0;
    b += (1.0 - b) / 2.0;

    if (r - g).abs() < f32::EPSILON && (g - b).abs() < f32::EPSILON {
        return [1.0, 1.0, 1.0];
    }

    [r, g, b]
}

/// Mean of a set of colors. Returns light gray for an empty set.
#[must_use]
pub fn average(colors: impl Iterator<Item = Rgb>) -> Rgb {
    let mut sum = [0.0f32; 3];
    let mut count = 0u32;
    for c in colors {
        sum[0] += c[0];
        sum[1] += c[1];
        sum[2] += c[2];
        count += 1;
    }
    if count == 0 {
        return LIGHT_GRAY;
    }
    let n = count as f32;
    [sum[0] / n, sum[1] / n, sum[2] / n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_colors_by_initial() {
        assert_eq!(element_color("CA"), LIGHT_GRAY);
        assert_eq!(element_color("N"), BLUE);
        assert_eq!(element_color("OXT"), RED);
        assert_eq!(element_color("SD"), YELLOW);
        assert_eq!(element_color("FE"), GREEN);
    }

    #[test]
    fn temperature_ramp_endpoints() {
        assert_eq!(temperature_color(0.0), [0.0, 0.0, 1.0]);
        assert_eq!(temperature_color(1.0), [1.0, 0.0, 0.0]);
        // Quarter boundaries land on cyan and green
        let cyan = temperature_color(0.25);
        assert!((cyan[1] - 1.0).abs() < 1e-6 && (cyan[2] - 1.0).abs() < 1e-6);
        let green = temperature_color(0.5);
        assert!((green[1] - 1.0).abs() < 1e-6 && green[2].abs() < 1e-6);
    }

    #[test]
    fn hover_promotes_gray_to_white() {
        assert_eq!(hover_highlight([0.5, 0.5, 0.5]), [1.0, 1.0, 1.0]);
        let lifted = hover_highlight([0.0, 0.0, 1.0]);
        assert_eq!(lifted, [0.5, 0.5, 1.0]);
    }

    #[test]
    fn average_of_empty_is_light_gray() {
        assert_eq!(average(std::iter::empty()), LIGHT_GRAY);
        assert_eq!(
            average([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]].into_iter()),
            [0.5, 0.5, 0.0]
        );
    }
}
