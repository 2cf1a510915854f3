//! Channel descriptors and channel-list queries.
//!
//! A [`Channel`] is a semantic type mask over {red, green, blue, alpha} plus a
//! bit depth. A pixel is the concatenation of its channels in list order.

use core::fmt;
use core::ops::{BitAnd, BitOr};

/// Semantic type of a channel: a bitmask over red, green, blue and alpha.
///
/// A channel may stand for several components at once. [`ChannelType::GRAY`]
/// is a single value shared by red, green and blue; [`ChannelType::MONO`]
/// additionally covers alpha.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelType(u8);

impl ChannelType {
    pub const NONE: Self = Self(0);
    pub const RED: Self = Self(0x1);
    pub const GREEN: Self = Self(0x2);
    pub const BLUE: Self = Self(0x4);
    pub const ALPHA: Self = Self(0x8);
    pub const GRAY: Self = Self(0x1 | 0x2 | 0x4);
    pub const MONO: Self = Self(0x1 | 0x2 | 0x4 | 0x8);

    /// Build a type from raw mask bits. Bits above alpha are discarded.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MONO.0)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if the two masks share at least one component.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any color component (red, green or blue) is present.
    #[inline]
    pub const fn is_color(self) -> bool {
        self.intersects(Self::GRAY)
    }

    #[inline]
    pub const fn is_alpha(self) -> bool {
        self.intersects(Self::ALPHA)
    }
}

impl BitOr for ChannelType {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for ChannelType {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => return f.write_str("NONE"),
            Self::GRAY => return f.write_str("GRAY"),
            Self::MONO => return f.write_str("MONO"),
            _ => {}
        }
        let mut first = true;
        for (mask, name) in [
            (Self::RED, "RED"),
            (Self::GREEN, "GREEN"),
            (Self::BLUE, "BLUE"),
            (Self::ALPHA, "ALPHA"),
        ] {
            if self.contains(mask) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// One channel of a pixel: what it means and how many bits it occupies.
///
/// Two channels are equal iff both type and depth match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Channel {
    pub kind: ChannelType,
    pub depth: u32,
}

impl Channel {
    #[inline]
    pub const fn new(kind: ChannelType, depth: u32) -> Self {
        Self { kind, depth }
    }

    pub const fn red(depth: u32) -> Self {
        Self::new(ChannelType::RED, depth)
    }

    pub const fn green(depth: u32) -> Self {
        Self::new(ChannelType::GREEN, depth)
    }

    pub const fn blue(depth: u32) -> Self {
        Self::new(ChannelType::BLUE, depth)
    }

    pub const fn alpha(depth: u32) -> Self {
        Self::new(ChannelType::ALPHA, depth)
    }

    pub const fn gray(depth: u32) -> Self {
        Self::new(ChannelType::GRAY, depth)
    }

    pub const fn mono(depth: u32) -> Self {
        Self::new(ChannelType::MONO, depth)
    }
}

// ---------------------------------------------------------------------------
// Channel-list queries
// ---------------------------------------------------------------------------

/// True if any channel carries a color component.
pub fn has_color(channels: &[Channel]) -> bool {
    channels.iter().any(|c| c.kind.is_color())
}

/// True if any channel carries alpha.
pub fn has_alpha(channels: &[Channel]) -> bool {
    channels.iter().any(|c| c.kind.is_alpha())
}

/// Bits per pixel: the sum of all channel depths.
pub fn pixel_depth(channels: &[Channel]) -> u32 {
    channels.iter().map(|c| c.depth).sum()
}

/// Deepest channel that has a non-empty type.
pub fn component_depth(channels: &[Channel]) -> u32 {
    max_depth(channels, |kind| !kind.is_empty())
}

/// Deepest channel carrying a color component.
pub fn color_depth(channels: &[Channel]) -> u32 {
    max_depth(channels, ChannelType::is_color)
}

/// Deepest channel carrying alpha.
pub fn alpha_depth(channels: &[Channel]) -> u32 {
    max_depth(channels, ChannelType::is_alpha)
}

fn max_depth(channels: &[Channel], filter: impl Fn(ChannelType) -> bool) -> u32 {
    channels
        .iter()
        .filter(|c| filter(c.kind))
        .map(|c| c.depth)
        .max()
        .unwrap_or(0)
}
