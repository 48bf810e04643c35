//! Color and per-channel coefficient types.

use glam::DVec3;

/// Color type alias (linear RGB, typically 0-1, never clamped here)
pub type Color = DVec3;

/// Per-channel attenuation coefficient (kD, kS, kT, kR, ...)
pub type Factor = DVec3;

/// Build a color from 8-bit channel values.
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f64, g as f64, b as f64) / 255.0
}

/// Returns true if every channel of `factor` is below `min`.
#[inline]
pub fn factor_below(factor: Factor, min: f64) -> bool {
    factor.max_element() < min
}

/// Channel-wise average of a set of colors. Black for an empty set.
pub fn average_colors(colors: &[Color]) -> Color {
    if colors.is_empty() {
        return Color::ZERO;
    }
    colors.iter().copied().sum::<Color>() / colors.len() as f64
}

/// Returns true if every color is within `threshold` of the first one on
/// every channel.
pub fn colors_similar(colors: &[Color], threshold: f64) -> bool {
    let Some(first) = colors.first() else {
        return true;
    };
    colors
        .iter()
        .all(|c| (*c - *first).abs().max_element() <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8() {
        assert_eq!(rgb8(255, 0, 255), Color::new(1.0, 0.0, 1.0));
        assert_eq!(rgb8(0, 0, 0), Color::ZERO);
    }

    #[test]
    fn test_factor_below() {
        assert!(factor_below(Factor::splat(0.0001), 0.001));
        // One bright channel keeps the factor alive
        assert!(!factor_below(Factor::new(0.0, 0.5, 0.0), 0.001));
    }

    #[test]
    fn test_average_colors() {
        let colors = [Color::new(1.0, 0.0, 0.0), Color::new(0.0, 1.0, 0.0)];
        assert_eq!(average_colors(&colors), Color::new(0.5, 0.5, 0.0));
        assert_eq!(average_colors(&[]), Color::ZERO);
    }

    #[test]
    fn test_colors_similar() {
        let a = Color::new(0.5, 0.5, 0.5);
        let b = Color::new(0.505, 0.5, 0.495);
        let c = Color::new(0.9, 0.5, 0.5);

        assert!(colors_similar(&[a, b], 0.01));
        assert!(!colors_similar(&[a, b, c], 0.01));
        assert!(colors_similar(&[], 0.01));
    }
}
