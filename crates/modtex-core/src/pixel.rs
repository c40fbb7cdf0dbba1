//! The pixel model shared by the scanner and the darkeners.
//!
//! A pixel is a required 3-channel color plus an optional alpha that
//! defaults to fully opaque. Conversions between the two shapes are
//! explicit (`with_alpha` / `without_alpha`); nothing infers channel
//! layout from tuple length.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An exact 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Largest pairwise absolute difference among the three channels.
    pub fn max_channel_spread(&self) -> u8 {
        let rg = self.r.abs_diff(self.g);
        let gb = self.g.abs_diff(self.b);
        let rb = self.r.abs_diff(self.b);
        rg.max(gb).max(rb)
    }

    /// A color counts as grayscale when no two channels differ by more
    /// than `tolerance`.
    pub fn is_grayscale(&self, tolerance: u8) -> bool {
        self.max_channel_spread() <= tolerance
    }

    /// Multiply each channel by `factor`, truncating toward zero.
    ///
    /// Truncation (not rounding) is the defined semantic: 200 * 0.399
    /// darkens to 79, never 80.
    pub fn darkened(&self, factor: f32) -> Self {
        Self {
            r: (self.r as f32 * factor) as u8,
            g: (self.g as f32 * factor) as u8,
            b: (self.b as f32 * factor) as u8,
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// A pixel: a color plus an optional alpha channel.
///
/// `alpha: None` means the source image has no alpha channel at all,
/// which is treated as fully opaque everywhere it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub color: Rgb,
    pub alpha: Option<u8>,
}

impl Pixel {
    /// An opaque pixel from a 3-channel source.
    pub const fn opaque(color: Rgb) -> Self {
        Self { color, alpha: None }
    }

    /// A pixel from a 4-channel source.
    pub const fn with_alpha(color: Rgb, alpha: u8) -> Self {
        Self {
            color,
            alpha: Some(alpha),
        }
    }

    /// Drop the alpha channel, keeping only the color.
    pub fn without_alpha(self) -> Rgb {
        self.color
    }

    /// Effective alpha: missing channels read as fully opaque.
    pub fn effective_alpha(&self) -> u8 {
        self.alpha.unwrap_or(u8::MAX)
    }

    /// Whether this pixel participates in darkening at all.
    /// Fully transparent pixels are always left untouched.
    pub fn is_opaque_enough(&self) -> bool {
        self.effective_alpha() > 0
    }
}

/// Channel layout of a decoded image.
///
/// `Other` covers palettized, 16-bit and grayscale sources; those require
/// an explicit conversion to RGBA before pixel access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Rgb,
    Rgba,
    Other,
}

impl ChannelLayout {
    pub fn of(image: &image::DynamicImage) -> Self {
        match image {
            image::DynamicImage::ImageRgb8(_) => Self::Rgb,
            image::DynamicImage::ImageRgba8(_) => Self::Rgba,
            _ => Self::Other,
        }
    }
}

/// An exact-match membership set of target colors.
///
/// No tolerance: (198, 198, 198) matches only (198, 198, 198).
#[derive(Debug, Clone, Default)]
pub struct ColorSet {
    colors: HashSet<Rgb>,
}

impl ColorSet {
    pub fn new(colors: impl IntoIterator<Item = Rgb>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    pub fn contains(&self, color: &Rgb) -> bool {
        self.colors.contains(color)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Colors in a stable order, for banners and config dumps.
    pub fn sorted(&self) -> Vec<Rgb> {
        let mut colors: Vec<Rgb> = self.colors.iter().copied().collect();
        colors.sort_by_key(|c| (c.r, c.g, c.b));
        colors
    }
}

impl FromIterator<Rgb> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_within_tolerance() {
        // max pairwise diff is 3, inside the default tolerance of 5
        assert!(Rgb::new(100, 102, 99).is_grayscale(5));
    }

    #[test]
    fn test_grayscale_outside_tolerance() {
        // spread of 150 is nowhere near gray
        assert!(!Rgb::new(200, 50, 50).is_grayscale(5));
    }

    #[test]
    fn test_grayscale_boundary_is_inclusive() {
        assert!(Rgb::new(100, 105, 100).is_grayscale(5));
        assert!(!Rgb::new(100, 106, 100).is_grayscale(5));
    }

    #[test]
    fn test_darkened_truncates() {
        let dark = Rgb::new(200, 200, 200).darkened(0.399);
        assert_eq!(dark, Rgb::new(79, 79, 79));
    }

    #[test]
    fn test_darkened_zero_stays_zero() {
        assert_eq!(Rgb::new(0, 0, 0).darkened(0.399), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_pixel_alpha_defaults_to_opaque() {
        let p = Pixel::opaque(Rgb::new(1, 2, 3));
        assert_eq!(p.effective_alpha(), 255);
        assert!(p.is_opaque_enough());
    }

    #[test]
    fn test_transparent_pixel_not_eligible() {
        let p = Pixel::with_alpha(Rgb::new(10, 10, 10), 0);
        assert!(!p.is_opaque_enough());
    }

    #[test]
    fn test_color_set_exact_membership() {
        let set = ColorSet::new([Rgb::new(198, 198, 198), Rgb::new(85, 85, 85)]);
        assert!(set.contains(&Rgb::new(198, 198, 198)));
        assert!(!set.contains(&Rgb::new(198, 198, 199)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_color_set_sorted_is_stable() {
        let set = ColorSet::new([Rgb::new(198, 198, 198), Rgb::new(85, 85, 85)]);
        let sorted = set.sorted();
        assert_eq!(sorted[0], Rgb::new(85, 85, 85));
        assert_eq!(sorted[1], Rgb::new(198, 198, 198));
    }
}
