//! Bridges between [`imgref`] buffers and [`Image`].
//!
//! ```rust
//! use rgb::{Gray, Rgba};
//! use imgref::ImgVec;
//! use pixfmt::img;
//!
//! let src = ImgVec::new(vec![Rgba::new(90u8, 90, 90, 255); 6], 3, 2);
//! let image = img::from_img(src.as_ref())?;
//! let gray: ImgVec<Gray<u8>> = img::to_img(&image);
//! assert_eq!(gray.buf()[0], Gray::new(90));
//! # Ok::<(), pixfmt::LayoutError>(())
//! ```

use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};

use crate::image::{Image, LayoutError, Size};
use crate::typed::{Pixel, from_pixels, to_pixels};

/// Copy an image view into a packed [`Image`], dropping stride padding.
///
/// Fails only for views with one zero dimension.
pub fn from_img<P: Pixel>(img: ImgRef<'_, P>) -> Result<Image, LayoutError> {
    let pixels: Vec<P> = img.pixels().collect();
    from_pixels(&pixels, Size::new(img.width(), img.height()))
}

/// Copy `img` into a tightly strided [`ImgVec`] of `P`, converting as needed.
pub fn to_img<P: Pixel>(img: &Image) -> ImgVec<P> {
    ImgVec::new(to_pixels(img), img.size.width, img.size.height)
}
