//! The raster image value and its row-pitch arithmetic.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::bits::BitCursor;
use crate::channel::{Channel, pixel_depth};

/// Largest row alignment accepted by [`Image::new`], in bytes.
pub const MAX_ALIGNMENT: usize = 128;

/// Deepest channel the bit accessor can address.
pub const MAX_CHANNEL_DEPTH: u32 = 32;

/// Image dimensions in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Why a buffer does not describe a valid image.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum LayoutError {
    /// Exactly one of width and height is zero.
    DegenerateSize { width: usize, height: usize },
    /// A channel is deeper than [`MAX_CHANNEL_DEPTH`] bits.
    ChannelTooDeep { depth: u32 },
    /// Row alignment exceeds [`MAX_ALIGNMENT`] bytes.
    AlignmentTooLarge { alignment: usize },
    /// The buffer length disagrees with size, channels and alignment.
    DataLength { expected: usize, actual: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DegenerateSize { width, height } => {
                write!(f, "degenerate image size {width}x{height}")
            }
            Self::ChannelTooDeep { depth } => {
                write!(f, "channel depth {depth} exceeds {MAX_CHANNEL_DEPTH} bits")
            }
            Self::AlignmentTooLarge { alignment } => {
                write!(f, "row alignment {alignment} exceeds {MAX_ALIGNMENT} bytes")
            }
            Self::DataLength { expected, actual } => {
                write!(f, "image data is {actual} bytes, layout requires {expected}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

// ---------------------------------------------------------------------------
// Pitch arithmetic
// ---------------------------------------------------------------------------

/// Bytes per row when rows are padded to a multiple of `alignment` bytes.
///
/// `alignment` must be non-zero.
#[inline]
pub const fn byte_pitch(width: usize, depth: u32, alignment: usize) -> usize {
    let bytes = (width * depth as usize).div_ceil(8);
    bytes.div_ceil(alignment) * alignment
}

/// Bits from the start of one row to the start of the next.
#[inline]
pub const fn bit_pitch(width: usize, depth: u32, alignment: usize) -> usize {
    if alignment == 0 {
        width * depth as usize
    } else {
        byte_pitch(width, depth, alignment) * 8
    }
}

/// Total buffer length for an image of this layout.
#[inline]
pub const fn data_len(size: Size, depth: u32, alignment: usize) -> usize {
    if alignment == 0 {
        (size.width * size.height * depth as usize).div_ceil(8)
    } else {
        byte_pitch(size.width, depth, alignment) * size.height
    }
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// A self-describing raster: dimensions, channel layout, row alignment and
/// the raw bytes.
///
/// `alignment == 0` means rows are bit-packed back to back; otherwise every
/// row starts on a multiple of `alignment` bytes. Cloning deep-copies the
/// buffer. Two images are equal when every field is equal, so the same
/// channels in a different order are a different image.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Image {
    pub size: Size,
    pub channels: Vec<Channel>,
    pub alignment: usize,
    pub data: Vec<u8>,
}

impl Image {
    /// Wrap an existing buffer after checking that it matches the layout.
    pub fn new(
        size: Size,
        channels: Vec<Channel>,
        alignment: usize,
        data: Vec<u8>,
    ) -> Result<Self, LayoutError> {
        check_layout(size, &channels, alignment)?;
        let expected = data_len(size, pixel_depth(&channels), alignment);
        if data.len() != expected {
            return Err(LayoutError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            size,
            channels,
            alignment,
            data,
        })
    }

    /// An image of the given layout with every bit cleared.
    pub fn zeroed(size: Size, channels: Vec<Channel>, alignment: usize) -> Result<Self, LayoutError> {
        check_layout(size, &channels, alignment)?;
        Ok(Self::blank(size, channels, alignment))
    }

    /// Zeroed image without validation, for transforms whose inputs were
    /// already valid.
    pub(crate) fn blank(size: Size, channels: Vec<Channel>, alignment: usize) -> Self {
        let len = data_len(size, pixel_depth(&channels), alignment);
        Self {
            size,
            channels,
            alignment,
            data: vec![0; len],
        }
    }

    /// Bits per pixel.
    #[inline]
    pub fn pixel_depth(&self) -> u32 {
        pixel_depth(&self.channels)
    }

    /// Bits from one row start to the next, padding included.
    #[inline]
    pub fn bit_pitch(&self) -> usize {
        bit_pitch(self.size.width, self.pixel_depth(), self.alignment)
    }

    /// Significant bytes in one row, padding excluded, rounded up.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        (self.size.width * self.pixel_depth() as usize).div_ceil(8)
    }

    /// Bit offset of pixel `(x, y)` from the start of the buffer.
    #[inline]
    pub fn pixel_offset(&self, x: usize, y: usize) -> usize {
        y * self.bit_pitch() + x * self.pixel_depth() as usize
    }

    /// Normalized components of pixel `(x, y)`, one per channel.
    pub fn pixel(&self, x: usize, y: usize) -> Vec<f64> {
        assert!(x < self.size.width && y < self.size.height, "pixel out of bounds");
        let mut cursor = BitCursor::new(&self.data[..], self.pixel_offset(x, y));
        self.channels
            .iter()
            .map(|c| cursor.read_unit(c.depth))
            .collect()
    }

    /// Debug-build check that `data` matches the declared layout.
    #[inline]
    pub(crate) fn debug_check(&self) {
        debug_assert_eq!(self.size.width == 0, self.size.height == 0, "degenerate size");
        debug_assert_eq!(
            self.data.len(),
            data_len(self.size, self.pixel_depth(), self.alignment),
            "image data does not match its layout"
        );
    }
}

fn check_layout(size: Size, channels: &[Channel], alignment: usize) -> Result<(), LayoutError> {
    if (size.width == 0) != (size.height == 0) {
        return Err(LayoutError::DegenerateSize {
            width: size.width,
            height: size.height,
        });
    }
    if let Some(c) = channels.iter().find(|c| c.depth > MAX_CHANNEL_DEPTH) {
        return Err(LayoutError::ChannelTooDeep { depth: c.depth });
    }
    if alignment > MAX_ALIGNMENT {
        return Err(LayoutError::AlignmentTooLarge { alignment });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn rgb8() -> Vec<Channel> {
        vec![Channel::red(8), Channel::green(8), Channel::blue(8)]
    }

    #[test]
    fn pitch_math() {
        // 3 px * 24 bits = 9 bytes, padded to 12
        assert_eq!(byte_pitch(3, 24, 4), 12);
        assert_eq!(byte_pitch(4, 24, 4), 12);
        assert_eq!(byte_pitch(5, 1, 1), 1);
        assert_eq!(bit_pitch(5, 1, 0), 5);
        assert_eq!(bit_pitch(5, 1, 2), 16);
        assert_eq!(data_len(Size::new(5, 3), 1, 0), 2);
        assert_eq!(data_len(Size::new(5, 3), 1, 1), 3);
        assert_eq!(data_len(Size::new(0, 0), 32, 4), 0);
    }

    #[test]
    fn new_validates_length() {
        let err = Image::new(Size::new(2, 2), rgb8(), 4, vec![0; 12]).unwrap_err();
        assert_eq!(err, LayoutError::DataLength { expected: 16, actual: 12 });
        assert!(Image::new(Size::new(2, 2), rgb8(), 4, vec![0; 16]).is_ok());
        assert!(Image::new(Size::new(2, 2), rgb8(), 0, vec![0; 12]).is_ok());
    }

    #[test]
    fn new_rejects_degenerate() {
        let err = Image::new(Size::new(0, 3), rgb8(), 0, vec![]).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateSize { .. }));
        assert!(Image::new(Size::new(0, 0), rgb8(), 0, vec![]).is_ok());
    }

    #[test]
    fn new_rejects_deep_channels_and_wild_alignment() {
        let err = Image::zeroed(Size::new(1, 1), vec![Channel::gray(33)], 0).unwrap_err();
        assert_eq!(err, LayoutError::ChannelTooDeep { depth: 33 });
        let err = Image::zeroed(Size::new(1, 1), vec![Channel::gray(8)], 256).unwrap_err();
        assert_eq!(err.to_string(), "row alignment 256 exceeds 128 bytes");
    }

    #[test]
    fn pixel_reads_components() {
        let img = Image::new(Size::new(2, 1), rgb8(), 0, vec![255, 0, 51, 0, 255, 0]).unwrap();
        assert_eq!(img.pixel(0, 0), [1.0, 0.0, 0.2]);
        assert_eq!(img.pixel(1, 0), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn pixel_offset_honors_padding() {
        let img = Image::zeroed(Size::new(3, 2), vec![Channel::gray(4)], 4).unwrap();
        assert_eq!(img.bit_pitch(), 32);
        assert_eq!(img.pixel_offset(2, 1), 40);
        assert_eq!(img.row_bytes(), 2);
    }
}
