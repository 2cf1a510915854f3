//! Box-filter resampling with alpha-weighted color.
//!
//! Each destination pixel covers a rectangle of source space. Source pixels
//! under the rectangle contribute in proportion to the area they share with
//! it; pixels cut by the edge of the rectangle get fractional weight. When
//! the layout has alpha, color is additionally weighted by the pixel's mean
//! alpha so that transparent pixels do not bleed their color into opaque
//! neighbours.
//!
//! When enlarging, the rectangle shrinks to one source pixel wide and slides
//! in sub-pixel steps, so neighbouring source pixels blend linearly.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use crate::bits::{BitCursor, write_component};
use crate::image::{Image, Size};

/// Source pixels along one axis that feed one destination pixel.
#[derive(Clone, Copy, PartialEq, Debug)]
struct Footprint {
    start: usize,
    len: usize,
    /// Weight of the first pixel.
    first: f32,
    /// Weight of the last pixel; interior pixels weigh 1.
    last: f32,
}

impl Footprint {
    #[inline]
    fn weight(&self, i: usize) -> f32 {
        if i == 0 {
            self.first
        } else if i == self.len - 1 {
            self.last
        } else {
            1.0
        }
    }
}

/// Smallest integer not below `x`, for `x > 0`.
#[inline]
fn ceil(x: f32) -> usize {
    let t = x as usize;
    if (t as f32) < x { t + 1 } else { t }
}

/// `x` minus its integer part, keeping the sign of `x`.
#[inline]
fn fract(x: f32) -> f32 {
    x - (x as i32) as f32
}

fn footprints(src_len: usize, dst_len: usize) -> Vec<Footprint> {
    let scale = src_len as f32 / dst_len as f32;
    let (mut offset, size) = if scale < 1.0 {
        ((scale - 1.0) / 2.0, 1.0)
    } else {
        (0.0, scale)
    };
    let mut start = 0usize;
    (0..dst_len)
        .map(|_| {
            let end = offset + size;
            let mut len = ceil(end).max(1);
            let first = 1.0 - offset;
            let mut last = 1.0 - (len as f32 - end);
            let start_here = start.min(src_len - 1);
            if start_here + len > src_len {
                len = src_len - start_here;
                last = 1.0;
            }
            offset += scale;
            // negative offsets saturate to a zero step
            let delta = offset as usize;
            offset = fract(offset);
            start += delta;
            Footprint {
                start: start_here,
                len,
                first,
                last,
            }
        })
        .collect()
}

/// Resample `img` to `size` with a box filter. Channels and alignment are
/// kept.
///
/// Returns the input unchanged when `size` already matches. Scaling an
/// empty image yields a zeroed one.
///
/// # Panics
///
/// If exactly one of `size.width` and `size.height` is zero.
pub fn scale(img: &Image, size: Size) -> Cow<'_, Image> {
    img.debug_check();
    if size == img.size {
        return Cow::Borrowed(img);
    }
    assert_eq!(
        size.width == 0,
        size.height == 0,
        "degenerate target size {}x{}",
        size.width,
        size.height
    );
    log::trace!(
        "scale {}x{} -> {}x{}",
        img.size.width,
        img.size.height,
        size.width,
        size.height
    );
    let mut dst = Image::blank(size, img.channels.clone(), img.alignment);
    if img.size.is_empty() || size.is_empty() {
        return Cow::Owned(dst);
    }

    let columns = footprints(img.size.width, size.width);
    let rows = footprints(img.size.height, size.height);

    // (bit offset within the pixel, depth, is alpha) per channel
    let layout: Vec<(usize, u32, bool)> = img
        .channels
        .iter()
        .scan(0usize, |offset, c| {
            let here = *offset;
            *offset += c.depth as usize;
            Some((here, c.depth, c.kind.is_alpha()))
        })
        .collect();
    let alpha_channels = layout.iter().filter(|(_, _, a)| *a).count();

    let mut components = vec![0.0f64; layout.len()];
    let mut sums = vec![0.0f64; layout.len()];
    for (dy, fy) in rows.iter().enumerate() {
        for (dx, fx) in columns.iter().enumerate() {
            sums.fill(0.0);
            let mut total = 0.0f64;
            let mut total_color = 0.0f64;
            for i in 0..fy.len {
                let row_weight = f64::from(fy.weight(i));
                for j in 0..fx.len {
                    let coverage = row_weight * f64::from(fx.weight(j));
                    let base = img.pixel_offset(fx.start + j, fy.start + i);
                    for (value, &(offset, depth, _)) in components.iter_mut().zip(&layout) {
                        *value = BitCursor::new(&img.data[..], base + offset).read_unit(depth);
                    }
                    let color_coverage = if alpha_channels == 0 {
                        coverage
                    } else {
                        let alpha: f64 = components
                            .iter()
                            .zip(&layout)
                            .filter(|(_, (_, _, a))| *a)
                            .map(|(v, _)| *v)
                            .sum();
                        coverage * alpha / alpha_channels as f64
                    };
                    total += coverage;
                    total_color += color_coverage;
                    for ((sum, value), &(_, _, is_alpha)) in
                        sums.iter_mut().zip(&components).zip(&layout)
                    {
                        *sum += value * if is_alpha { coverage } else { color_coverage };
                    }
                }
            }
            let out = dst.pixel_offset(dx, dy);
            for (sum, &(offset, depth, is_alpha)) in sums.iter().zip(&layout) {
                let weight = if is_alpha { total } else { total_color };
                let value = if weight > 0.0 { sum / weight } else { 0.0 };
                write_component(&mut dst.data, out + offset, depth, value);
            }
        }
    }
    Cow::Owned(dst)
}
