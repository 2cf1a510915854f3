//! Named channel layouts.
//!
//! Codecs and upload paths speak in terms of fixed formats ("RGBA, 8 bits").
//! This is where those names become channel lists and back.

use alloc::vec::Vec;

use crate::channel::{Channel, ChannelType, component_depth, has_alpha, has_color};

/// A named arrangement of channels with one shared depth.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Layout {
    Alpha,
    /// One channel standing for color and alpha at once.
    Intensity,
    Gray,
    GrayAlpha,
    Rgb,
    Bgr,
    Rgba,
    Bgra,
    Argb,
    Abgr,
}

use ChannelType as T;

impl Layout {
    pub const ALL: [Layout; 10] = [
        Layout::Alpha,
        Layout::Intensity,
        Layout::Gray,
        Layout::GrayAlpha,
        Layout::Rgb,
        Layout::Bgr,
        Layout::Rgba,
        Layout::Bgra,
        Layout::Argb,
        Layout::Abgr,
    ];

    /// Channel types in storage order.
    pub const fn types(self) -> &'static [ChannelType] {
        match self {
            Layout::Alpha => &[T::ALPHA],
            Layout::Intensity => &[T::MONO],
            Layout::Gray => &[T::GRAY],
            Layout::GrayAlpha => &[T::GRAY, T::ALPHA],
            Layout::Rgb => &[T::RED, T::GREEN, T::BLUE],
            Layout::Bgr => &[T::BLUE, T::GREEN, T::RED],
            Layout::Rgba => &[T::RED, T::GREEN, T::BLUE, T::ALPHA],
            Layout::Bgra => &[T::BLUE, T::GREEN, T::RED, T::ALPHA],
            Layout::Argb => &[T::ALPHA, T::RED, T::GREEN, T::BLUE],
            Layout::Abgr => &[T::ALPHA, T::BLUE, T::GREEN, T::RED],
        }
    }

    #[inline]
    pub const fn channel_count(self) -> usize {
        self.types().len()
    }

    /// Bytes per pixel at 8 bits per channel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self.channel_count()
    }

    /// The channel list for this layout with every channel `depth` bits deep.
    pub fn channels(self, depth: u32) -> Vec<Channel> {
        assert!((1..=32).contains(&depth), "layout depth must be 1..=32, got {depth}");
        self.types().iter().map(|&kind| Channel::new(kind, depth)).collect()
    }

    /// Recognize a channel list that is exactly one of the named layouts with
    /// a uniform depth.
    pub fn detect(channels: &[Channel]) -> Option<(Layout, u32)> {
        let depth = channels.first()?.depth;
        if depth == 0 || channels.iter().any(|c| c.depth != depth) {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|layout| {
                let types = layout.types();
                types.len() == channels.len()
                    && types.iter().zip(channels).all(|(&t, c)| t == c.kind)
            })
            .map(|layout| (layout, depth))
    }

    /// Closest canonical layout able to carry `channels`, and the smallest
    /// standard depth (8, 16 or 32 bits) that holds their deepest component.
    pub fn nearest(channels: &[Channel]) -> (Layout, u32) {
        let is_split_color = |c: &Channel| {
            c.kind == T::RED || c.kind == T::GREEN || c.kind == T::BLUE
        };
        let layout = if has_color(channels) {
            if has_alpha(channels) {
                if channels.iter().any(is_split_color) {
                    Layout::Rgba
                } else if channels.iter().any(|c| c.kind == T::GRAY || c.kind == T::ALPHA) {
                    Layout::GrayAlpha
                } else {
                    Layout::Intensity
                }
            } else if channels.iter().any(is_split_color) {
                Layout::Rgb
            } else {
                Layout::Gray
            }
        } else if has_alpha(channels) {
            Layout::Alpha
        } else {
            Layout::Gray
        };
        let depth = match component_depth(channels) {
            0..=8 => 8,
            9..=16 => 16,
            _ => 32,
        };
        (layout, depth)
    }
}
