//! # pixfmt
//!
//! *Any pixels in, any pixels out.*
//!
//! Conversion and resampling of raw raster images whose layout is described
//! at run time: any list of channels, any depth from 1 to 32 bits per
//! channel, bit-packed or byte-padded rows. Loaders and texture upload paths
//! use it to move decoded pixels into whatever layout they need.
//!
//! ## Model
//!
//! An [`Image`] is a size, an ordered list of [`Channel`]s, a row alignment
//! and a byte buffer. Components are stored as a big-endian bit stream, so a
//! 5-6-5 pixel or a 1-bit mask is just a different channel list.
//!
//! ## Operations
//!
//! - [`convert`] / [`convert_aligned`] change the channel layout. Common
//!   cases (reordering bytes, adding or dropping alpha, gray to color,
//!   1-bit masks to bytes) skip the per-component float path and, for 8-bit
//!   layouts, run SIMD row kernels.
//! - [`scale`] resamples with an alpha-weighted box filter.
//! - [`flip`] mirrors along either axis at bit granularity.
//! - [`align`] / [`is_aligned`] repack rows to a different alignment.
//!
//! Every operation borrows its input and returns a [`Cow`]: borrowed when
//! there was nothing to do, owned otherwise.
//!
//! ```rust
//! use pixfmt::{Channel, Image, Layout, Size, convert};
//!
//! let rgb = Image::new(Size::new(1, 1), Layout::Rgb.channels(8), 0, vec![255, 0, 0])?;
//! let gray = convert(&rgb, &[Channel::gray(8)]);
//! assert_eq!(gray.data, [85]);
//! # Ok::<(), pixfmt::LayoutError>(())
//! ```
//!
//! ## Feature flags
//!
//! - **`std`** (default): runtime CPU feature detection for the row kernels.
//! - **`rgb`**: [`typed`] adapters between [`rgb`] pixel slices and [`Image`].
//! - **`imgref`**: [`img`] adapters for [`imgref`] buffers. Implies `rgb`.
//!
//! [`Cow`]: alloc::borrow::Cow

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod align;
pub mod bits;
mod channel;
mod convert;
mod flip;
mod image;
mod kernels;
mod layout;
pub mod plan;
mod scale;

pub use align::{align, is_aligned};
pub use channel::{
    Channel, ChannelType, alpha_depth, color_depth, component_depth, has_alpha, has_color,
    pixel_depth,
};
pub use convert::{convert, convert_aligned};
pub use flip::{Axes, flip};
pub use image::{
    Image, LayoutError, MAX_ALIGNMENT, MAX_CHANNEL_DEPTH, Size, bit_pitch, byte_pitch, data_len,
};
pub use layout::Layout;
pub use plan::{Strategy, plan};
pub use scale::scale;

#[cfg(feature = "rgb")]
pub mod typed;

#[cfg(feature = "imgref")]
pub mod img;
