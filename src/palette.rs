// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! The assistant color palette, one entry per pixel of the strip.

use std::fmt;

use crate::color::Rgb;

/// The canonical number of pixels on the strip.
pub const PIXEL_COUNT: usize = 8;

pub const BLUE: Rgb = Rgb::new(53, 25, 237);
pub const RED: Rgb = Rgb::new(255, 25, 20);
pub const YELLOW: Rgb = Rgb::new(255, 155, 0);
pub const GREEN: Rgb = Rgb::new(30, 255, 15);

pub const BLUE_HUE: u16 = 235;
pub const RED_HUE: u16 = 352;
pub const YELLOW_HUE: u16 = 55;
pub const GREEN_HUE: u16 = 110;

/// The assistant colors laid out in same-colored pairs along the strip.
pub static ASSISTANT: Palette<PIXEL_COUNT> = Palette::new(
    [GREEN, GREEN, YELLOW, YELLOW, RED, RED, BLUE, BLUE],
    [
        GREEN_HUE, GREEN_HUE, YELLOW_HUE, YELLOW_HUE, RED_HUE, RED_HUE, BLUE_HUE, BLUE_HUE,
    ],
);

/// An immutable palette indexed by pixel position. Every position carries the same color in
/// two forms: an RGB triple and a hue angle in degrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette<const N: usize> {
    rgb: [Rgb; N],
    hue: [u16; N],
}

impl<const N: usize> Palette<N> {
    pub const fn new(rgb: [Rgb; N], hue: [u16; N]) -> Self {
        Self { rgb, hue }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.rgb
    }

    pub fn hues(&self) -> &[u16] {
        &self.hue
    }
}

/// A palette view that animations accept regardless of the palette's size.
pub trait ColorPalette: Send + Sync {
    fn len(&self) -> usize;
    fn rgb(&self, index: usize) -> Option<Rgb>;
    fn hue(&self, index: usize) -> Option<u16>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> ColorPalette for Palette<N> {
    fn len(&self) -> usize {
        N
    }

    fn rgb(&self, index: usize) -> Option<Rgb> {
        self.rgb.get(index).copied()
    }

    fn hue(&self, index: usize) -> Option<u16> {
        self.hue.get(index).copied()
    }
}

impl<const N: usize> fmt::Display for Palette<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (rgb, hue)) in self.rgb.iter().zip(self.hue.iter()).enumerate() {
            writeln!(f, "- pixel {}: {} (hue {})", i, rgb, hue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Hue in degrees of an RGB color.
    fn hue_of(rgb: Rgb) -> f64 {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return 0.0;
        }
        let hue = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        hue.rem_euclid(360.0)
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    fn dominant_channel(rgb: Rgb) -> usize {
        let channels = [rgb.r, rgb.g, rgb.b];
        (0..3).max_by_key(|&i| channels[i]).unwrap_or(0)
    }

    #[test]
    fn test_lengths_match_pixel_count() {
        assert_eq!(ASSISTANT.len(), PIXEL_COUNT);
        assert_eq!(ASSISTANT.colors().len(), PIXEL_COUNT);
        assert_eq!(ASSISTANT.hues().len(), PIXEL_COUNT);
        assert!(!ASSISTANT.is_empty());
    }

    #[test]
    fn test_hues_match_colors() {
        for i in 0..ASSISTANT.len() {
            let rgb = ASSISTANT.rgb(i).unwrap();
            let hue = ASSISTANT.hue(i).unwrap();
            assert!(hue < 360, "pixel {} hue {} out of range", i, hue);

            let derived = Rgb::from_hsv(hue, 1.0, 1.0);
            assert_eq!(
                dominant_channel(derived),
                dominant_channel(rgb),
                "pixel {}: {} vs {}",
                i,
                derived,
                rgb
            );
            let distance = hue_distance(hue_of(rgb), f64::from(hue));
            assert!(
                distance < 20.0,
                "pixel {}: stored hue {} is {} degrees from {}",
                i,
                hue,
                distance,
                rgb
            );
        }
    }

    #[test]
    fn test_pairs_share_colors() {
        for pair in 0..ASSISTANT.len() / 2 {
            let i = pair * 2;
            assert_eq!(ASSISTANT.rgb(i), ASSISTANT.rgb(i + 1));
            assert_eq!(ASSISTANT.hue(i), ASSISTANT.hue(i + 1));
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(ASSISTANT.rgb(PIXEL_COUNT), None);
        assert_eq!(ASSISTANT.hue(PIXEL_COUNT), None);
    }

    #[test]
    fn test_trait_view() {
        let palette: &dyn ColorPalette = &ASSISTANT;
        assert_eq!(palette.len(), PIXEL_COUNT);
        assert_eq!(palette.hue(4), Some(RED_HUE));
        assert_eq!(palette.rgb(7), Some(BLUE));
    }
}
