//! RGB samples and channel selection.

use serde::{Deserialize, Serialize};

/// One of the three colour planes of an [`ArrayImage`](crate::ArrayImage).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All planes in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this plane inside an interleaved pixel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// An RGB colour with `f64` channels, nominally in `[0, 1]`.
///
/// Nothing clamps: buffers store whatever is written, and callers that need
/// display-range values clamp at the output boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Uniform grey of the given intensity.
    pub const fn grey(value: f64) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Map 8-bit channels onto `[0, 1]`.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Value of a single plane.
    #[inline]
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_indices_match_storage_order() {
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
        }
    }

    #[test]
    fn channel_accessor_selects_planes() {
        let c = Rgb::new(0.1, 0.2, 0.3);
        assert_eq!(c.channel(Channel::Red), 0.1);
        assert_eq!(c.channel(Channel::Green), 0.2);
        assert_eq!(c.channel(Channel::Blue), 0.3);
    }

    #[test]
    fn from_u8_maps_full_range() {
        let c = Rgb::from_u8(0, 128, 255);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.b, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-12);
    }
}
