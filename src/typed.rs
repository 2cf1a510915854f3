//! Bridges between [`rgb`] pixel slices and [`Image`].
//!
//! ```rust
//! use rgb::{Bgra, Rgb};
//! use pixfmt::{Size, typed};
//!
//! let pixels = vec![Rgb::new(255u8, 0, 128); 4];
//! let img = typed::from_pixels(&pixels, Size::new(2, 2))?;
//! let bgra: Vec<Bgra<u8>> = typed::to_pixels(&img);
//! assert_eq!(bgra[0], Bgra { b: 128, g: 0, r: 255, a: 255 });
//! # Ok::<(), pixfmt::LayoutError>(())
//! ```

use alloc::vec::Vec;

use rgb::{Bgr, Bgra, Gray, GrayAlpha, Rgb, Rgba};

use crate::convert::convert_aligned;
use crate::image::{Image, LayoutError, Size};
use crate::layout::Layout;

/// An 8-bit pixel type with a fixed channel layout.
pub trait Pixel: bytemuck::Pod {
    const LAYOUT: Layout;
}

impl Pixel for Rgb<u8> {
    const LAYOUT: Layout = Layout::Rgb;
}
impl Pixel for Bgr<u8> {
    const LAYOUT: Layout = Layout::Bgr;
}
impl Pixel for Rgba<u8> {
    const LAYOUT: Layout = Layout::Rgba;
}
impl Pixel for Bgra<u8> {
    const LAYOUT: Layout = Layout::Bgra;
}
impl Pixel for Gray<u8> {
    const LAYOUT: Layout = Layout::Gray;
}
impl Pixel for GrayAlpha<u8> {
    const LAYOUT: Layout = Layout::GrayAlpha;
}

/// Copy row-major `pixels` into a packed [`Image`] of `size`.
///
/// Fails when `pixels.len()` is not `size.width * size.height`.
pub fn from_pixels<P: Pixel>(pixels: &[P], size: Size) -> Result<Image, LayoutError> {
    debug_assert_eq!(size_of::<P>(), P::LAYOUT.bytes_per_pixel());
    let bytes: &[u8] = bytemuck::cast_slice(pixels);
    Image::new(size, P::LAYOUT.channels(8), 0, bytes.to_vec())
}

/// Row-major pixels of `img`, converted to `P`'s layout if needed.
pub fn to_pixels<P: Pixel>(img: &Image) -> Vec<P> {
    let packed = convert_aligned(img, &P::LAYOUT.channels(8), 0);
    bytemuck::allocation::pod_collect_to_vec(&packed.data)
}
