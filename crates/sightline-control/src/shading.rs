//! Compose control metrics into per-square RGB shading.
//!
//! Each metric owns a channel: central importance brightens blue, attacking
//! control green, defending control red. A layer scales its channel's
//! remaining headroom by `weight / max`, so the busiest square saturates and
//! layers compose without clobbering each other.

use shakmaty::Square;

use crate::weights::SquareWeights;

/// One square's shading color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#rrggbb` form, for textual output.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// RGB shading for each of the 64 squares, indexed by [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardShading([Rgb; 64]);

/// Which channel a layer brightens.
enum Channel {
    Red,
    Green,
    Blue,
}

impl BoardShading {
    /// Unshaded board: every square black.
    pub fn new() -> BoardShading {
        BoardShading([Rgb::default(); 64])
    }

    /// The color on `square`.
    pub fn get(&self, square: Square) -> Rgb {
        self.0[usize::from(square)]
    }

    /// Layer central importance onto the blue channel.
    pub fn with_central(&self, weights: &SquareWeights) -> BoardShading {
        self.with_channel(weights, Channel::Blue)
    }

    /// Layer attacking control onto the green channel.
    pub fn with_attacking(&self, weights: &SquareWeights) -> BoardShading {
        self.with_channel(weights, Channel::Green)
    }

    /// Layer defending control onto the red channel.
    pub fn with_defending(&self, weights: &SquareWeights) -> BoardShading {
        self.with_channel(weights, Channel::Red)
    }

    /// Brighten one channel everywhere in proportion to `weights`, scaled so
    /// the heaviest square saturates. An all-zero grid changes nothing.
    fn with_channel(&self, weights: &SquareWeights, channel: Channel) -> BoardShading {
        let max = weights.max();
        if max == 0 {
            return *self;
        }
        let mut shaded = *self;
        for square in Square::ALL {
            let color = &mut shaded.0[usize::from(square)];
            let target = match channel {
                Channel::Red => &mut color.r,
                Channel::Green => &mut color.g,
                Channel::Blue => &mut color.b,
            };
            *target = brighten(*target, weights.get(square), max);
        }
        shaded
    }
}

impl Default for BoardShading {
    fn default() -> Self {
        BoardShading::new()
    }
}

/// `value + headroom * weight / max`, rounded, capped at 255.
fn brighten(value: u8, weight: u32, max: u32) -> u8 {
    let headroom = 255 - u32::from(value);
    let boost = (headroom * weight + max / 2) / max;
    (u32::from(value) + boost).min(255) as u8
}
