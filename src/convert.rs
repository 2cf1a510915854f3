//! Channel-layout conversion.
//!
//! [`convert`] plans the conversion with [`crate::plan`] and hands it to the
//! executor of the selected [`Strategy`]. The byte tiers (swizzle and blend
//! of 8-bit channels) first try to reduce the plan to a lane map and run a
//! SIMD row kernel; everything else goes through per-pixel loops.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::align::align;
use crate::bits::{BitCursor, quantize, to_unit, write_component};
use crate::channel::Channel;
use crate::image::Image;
use crate::kernels::{Kernel, Lane};
use crate::plan::{Plan, Strategy, plan};

/// Convert `img` to the `channels` layout, keeping its row alignment.
///
/// Returns the input unchanged when the layouts are equal.
///
/// ```
/// use pixfmt::{Image, Layout, Size, convert};
///
/// let rgb = Image::new(Size::new(1, 1), Layout::Rgb.channels(8), 0, vec![10, 20, 30])?;
/// let bgr = convert(&rgb, &Layout::Bgr.channels(8));
/// assert_eq!(bgr.data, [30, 20, 10]);
/// # Ok::<(), pixfmt::LayoutError>(())
/// ```
pub fn convert<'a>(img: &'a Image, channels: &[Channel]) -> Cow<'a, Image> {
    convert_aligned(img, channels, img.alignment)
}

/// Convert `img` to the `channels` layout with rows padded to `alignment`
/// bytes (`0` for bit-packed rows).
///
/// Equal layouts reduce to [`align`].
pub fn convert_aligned<'a>(img: &'a Image, channels: &[Channel], alignment: usize) -> Cow<'a, Image> {
    img.debug_check();
    let plan = plan(&img.channels, channels);
    log::trace!(
        "convert {:?} -> {:?} ({}x{}): {:?}",
        img.channels,
        channels,
        img.size.width,
        img.size.height,
        plan.strategy()
    );
    let execute: fn(&Image, &mut Image, &Plan) = match plan.strategy() {
        Strategy::Identity => return align(img, alignment),
        Strategy::BitExpand => bit_expand,
        Strategy::Swizzle => swizzle,
        Strategy::ByteBlend => byte_blend,
        Strategy::Generic => generic,
    };
    let mut dst = Image::blank(img.size, channels.to_vec(), alignment);
    execute(img, &mut dst, &plan);
    Cow::Owned(dst)
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Each 1-bit component becomes a byte of 0 or 255.
fn bit_expand(src: &Image, dst: &mut Image, _: &Plan) {
    let bits_per_row = src.size.width * src.channels.len();
    let src_pitch = src.bit_pitch();
    let dst_pitch = dst.bit_pitch() / 8;
    for y in 0..src.size.height {
        let mut cursor = BitCursor::new(&src.data[..], y * src_pitch);
        let row = &mut dst.data[y * dst_pitch..][..bits_per_row];
        for out in row {
            *out = if cursor.read(1) == 1 { 0xFF } else { 0 };
        }
    }
}

/// Whole-byte components copied one-to-one.
fn swizzle(src: &Image, dst: &mut Image, plan: &Plan) {
    if try_kernel(src, dst, plan) {
        return;
    }
    // (source byte, target byte, byte count) per component
    let moves: Vec<(usize, usize, usize)> = plan
        .steps()
        .iter()
        .map(|step| {
            let (s, t) = (step.sources[0], step.targets[0]);
            (s.offset as usize / 8, t.offset as usize / 8, t.depth as usize / 8)
        })
        .collect();
    for_each_pixel_bytes(src, dst, |s, d| {
        for &(from, to, len) in &moves {
            d[to..to + len].copy_from_slice(&s[from..from + len]);
        }
    });
}

struct ByteStep {
    sources: Vec<usize>,
    targets: Vec<usize>,
    fill: u8,
}

/// 8-bit components averaged, broadcast and filled byte by byte.
fn byte_blend(src: &Image, dst: &mut Image, plan: &Plan) {
    if try_kernel(src, dst, plan) {
        return;
    }
    let steps: Vec<ByteStep> = plan
        .steps()
        .iter()
        .map(|step| ByteStep {
            sources: step.sources.iter().map(|c| c.offset as usize / 8).collect(),
            targets: step.targets.iter().map(|c| c.offset as usize / 8).collect(),
            fill: if step.fill >= 1.0 { 0xFF } else { 0 },
        })
        .collect();
    for_each_pixel_bytes(src, dst, |s, d| {
        for step in &steps {
            let value = match step.sources.len() {
                0 => step.fill,
                1 => s[step.sources[0]],
                n => {
                    let levels = step.sources.iter().map(|&i| to_unit(u32::from(s[i]), 8));
                    quantize(mean(levels, n), 8) as u8
                }
            };
            for &t in &step.targets {
                d[t] = value;
            }
        }
    });
}

/// Any depth, any alignment: every component goes through `[0, 1]`.
fn generic(src: &Image, dst: &mut Image, plan: &Plan) {
    let targets = plan.targets_in_order();
    let mut values = Vec::with_capacity(plan.steps().len());
    for y in 0..src.size.height {
        for x in 0..src.size.width {
            let base = src.pixel_offset(x, y);
            values.clear();
            values.extend(plan.steps().iter().map(|step| {
                if step.is_fill() {
                    return step.fill;
                }
                let levels = step
                    .sources
                    .iter()
                    .map(|c| BitCursor::new(&src.data[..], base + c.offset as usize).read_unit(c.depth));
                mean(levels, step.sources.len())
            }));
            let out = dst.pixel_offset(x, y);
            for &(t, step) in &targets {
                write_component(&mut dst.data, out + t.offset as usize, t.depth, values[step]);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Average of normalized component values. Every averaging tier goes through
/// here so exact halves round the same way on each path.
#[inline]
fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    values.sum::<f64>() / n as f64
}

/// Run `f` on the bytes of every source pixel and its destination pixel.
/// Both layouts must have whole-byte pixels.
fn for_each_pixel_bytes(src: &Image, dst: &mut Image, mut f: impl FnMut(&[u8], &mut [u8])) {
    let (sbpp, dbpp) = (src.pixel_depth() as usize / 8, dst.pixel_depth() as usize / 8);
    if dbpp == 0 {
        return;
    }
    let (src_pitch, dst_pitch) = (src.bit_pitch() / 8, dst.bit_pitch() / 8);
    let width = src.size.width;
    for y in 0..src.size.height {
        let src_row = &src.data[y * src_pitch..][..width * sbpp];
        let dst_row = &mut dst.data[y * dst_pitch..][..width * dbpp];
        if sbpp == 0 {
            dst_row.chunks_exact_mut(dbpp).for_each(|d| f(&[], d));
        } else {
            for (s, d) in src_row.chunks_exact(sbpp).zip(dst_row.chunks_exact_mut(dbpp)) {
                f(s, d);
            }
        }
    }
}

/// Reduce an all-8-bit plan to one lane per destination byte.
///
/// Returns `None` when a step averages several sources or a depth is not 8.
fn lane_map(src: &[Channel], dst: &[Channel], plan: &Plan) -> Option<Vec<Lane>> {
    if !src.iter().chain(dst).all(|c| c.depth == 8) {
        return None;
    }
    plan.targets_in_order()
        .into_iter()
        .map(|(_, i)| {
            let step = &plan.steps()[i];
            match step.sources[..] {
                [] => Some(Lane::Fill(if step.fill >= 1.0 { 0xFF } else { 0 })),
                [s] => u8::try_from(s.offset / 8).ok().map(Lane::Src),
                _ => None,
            }
        })
        .collect()
}

/// Run a row kernel if the plan has a known lane map.
fn try_kernel(src: &Image, dst: &mut Image, plan: &Plan) -> bool {
    let Some(lanes) = lane_map(&src.channels, &dst.channels, plan) else {
        return false;
    };
    let src_bpp = src.channels.len();
    let Some(kernel) = Kernel::find(src_bpp, &lanes) else {
        return false;
    };
    log::trace!("convert: row kernel {kernel:?}");
    let (src_pitch, dst_pitch) = (src.bit_pitch() / 8, dst.bit_pitch() / 8);
    kernel.run(
        &src.data,
        src_pitch,
        &mut dst.data,
        dst_pitch,
        src.size.width,
        src.size.height,
    );
    true
}
