//! Mirroring along one or both axes.

use alloc::borrow::Cow;

use crate::bits::BitCursor;
use crate::image::Image;

/// Which axes to reverse.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Axes {
    /// Reverse the pixels within each row (left-right mirror).
    pub x: bool,
    /// Reverse the order of rows (upside down).
    pub y: bool,
}

impl Axes {
    pub const NONE: Axes = Axes { x: false, y: false };
    pub const X: Axes = Axes { x: true, y: false };
    pub const Y: Axes = Axes { x: false, y: true };
    pub const XY: Axes = Axes { x: true, y: true };

    #[inline]
    pub const fn is_none(self) -> bool {
        !self.x && !self.y
    }
}

/// Mirror `img` along `axes`. Works at bit granularity, so sub-byte pixels
/// move intact; padding bits of the result are zero.
pub fn flip(img: &Image, axes: Axes) -> Cow<'_, Image> {
    img.debug_check();
    if axes.is_none() {
        return Cow::Borrowed(img);
    }
    let mut dst = Image::blank(img.size, img.channels.clone(), img.alignment);
    let (width, height) = (img.size.width, img.size.height);
    let depth = img.pixel_depth() as usize;
    let pitch = img.bit_pitch();
    let mut src = BitCursor::new(&img.data[..], 0);
    let mut out = BitCursor::new(&mut dst.data[..], 0);
    for y in 0..height {
        let dy = if axes.y { height - 1 - y } else { y };
        src.seek(y * pitch);
        if !axes.x {
            out.seek(dy * pitch);
            out.copy_from(&mut src, width * depth);
            continue;
        }
        for x in 0..width {
            out.seek(dy * pitch + (width - 1 - x) * depth);
            out.copy_from(&mut src, depth);
        }
    }
    Cow::Owned(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::image::Size;
    use crate::layout::Layout;
    use alloc::vec;

    #[test]
    fn none_borrows() {
        let img = Image::zeroed(Size::new(2, 2), Layout::Rgb.channels(8), 0).unwrap();
        assert!(matches!(flip(&img, Axes::NONE), Cow::Borrowed(_)));
    }

    #[test]
    fn bytes_mirror() {
        let img = Image::new(Size::new(3, 2), vec![Channel::gray(8)], 4, vec![1, 2, 3, 0, 4, 5, 6, 0])
            .unwrap();
        assert_eq!(flip(&img, Axes::X).data, [3, 2, 1, 0, 6, 5, 4, 0]);
        assert_eq!(flip(&img, Axes::Y).data, [4, 5, 6, 0, 1, 2, 3, 0]);
        assert_eq!(flip(&img, Axes::XY).data, [6, 5, 4, 0, 3, 2, 1, 0]);
    }

    #[test]
    fn sub_byte_pixels_mirror() {
        // 3 px of 3 bits per row, packed: 101 110 011 | 000 111 001
        let img = Image::new(
            Size::new(3, 2),
            vec![Channel::gray(3)],
            0,
            vec![0b1011_1001, 0b1000_1110, 0b0100_0000],
        )
        .unwrap();
        // 011 110 101 | 001 111 000
        assert_eq!(flip(&img, Axes::X).data, [0b0111_1010, 0b1001_1110, 0b0000_0000]);
        // 000 111 001 | 101 110 011
        assert_eq!(flip(&img, Axes::Y).data, [0b0001_1100, 0b1101_1100, 0b1100_0000]);
    }

    #[test]
    fn involution_on_padded_rows() {
        let img = Image::new(
            Size::new(3, 3),
            vec![Channel::red(5), Channel::green(6), Channel::blue(5)],
            4,
            vec![
                0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0, 0, //
                0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0, 0, //
                0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0, 0,
            ],
        )
        .unwrap();
        for axes in [Axes::NONE, Axes::X, Axes::Y, Axes::XY] {
            let once = flip(&img, axes);
            assert_eq!(*flip(&once, axes), img, "{axes:?}");
        }
    }
}
