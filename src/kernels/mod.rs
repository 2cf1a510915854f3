// ---------------------------------------------------------------------------
// 8-bit row kernels with SIMD dispatch.
//
// The byte tiers of the converter reduce a plan to a lane map: for every
// destination byte of a pixel, either a source byte index or a constant.
// Lane maps with a known shape run one of these kernels row by row.
//
// Architecture: #[rite] row functions contain the SIMD loops, #[arcane]
// wrappers loop over rows, and incant! picks the tier once per call.
// ---------------------------------------------------------------------------

use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(test)]
mod tests;

/// Where one destination byte of a pixel comes from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Lane {
    /// Byte index within the source pixel.
    Src(u8),
    /// Constant byte.
    Fill(u8),
}

/// A row kernel for a fixed 8-bit source and destination layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) enum Kernel {
    /// 4→4, bytes 0↔2 swapped (RGBA↔BGRA).
    SwapBr,
    /// 3→3, bytes 0↔2 swapped (RGB↔BGR).
    ReverseRgb,
    /// 3→4, order kept, byte 3 = 255 (RGB→RGBA).
    AppendAlpha,
    /// 3→4, bytes 0↔2 swapped, byte 3 = 255 (RGB→BGRA).
    ReverseAppendAlpha,
    /// 1→4, gray copied to bytes 0..3, byte 3 = 255.
    SplatGray,
    /// 2→4, gray copied to bytes 0..3, alpha to byte 3.
    SplatGrayAlpha,
    /// 4→3, byte 3 dropped (RGBA→RGB).
    DropAlpha,
    /// 4→3, byte 3 dropped and bytes 0↔2 swapped (BGRA→RGB).
    ReverseDropAlpha,
}

impl Kernel {
    /// Find the kernel implementing `lanes` for a `src_bpp`-byte source pixel.
    pub(crate) fn find(src_bpp: usize, lanes: &[Lane]) -> Option<Kernel> {
        use Lane::{Fill as F, Src as S};
        let kernel = match (src_bpp, lanes) {
            (4, [S(2), S(1), S(0), S(3)]) => Kernel::SwapBr,
            (3, [S(2), S(1), S(0)]) => Kernel::ReverseRgb,
            (3, [S(0), S(1), S(2), F(255)]) => Kernel::AppendAlpha,
            (3, [S(2), S(1), S(0), F(255)]) => Kernel::ReverseAppendAlpha,
            (1, [S(0), S(0), S(0), F(255)]) => Kernel::SplatGray,
            (2, [S(0), S(0), S(0), S(1)]) => Kernel::SplatGrayAlpha,
            (4, [S(0), S(1), S(2)]) => Kernel::DropAlpha,
            (4, [S(2), S(1), S(0)]) => Kernel::ReverseDropAlpha,
            _ => return None,
        };
        Some(kernel)
    }

    pub(crate) const fn src_bpp(self) -> usize {
        match self {
            Kernel::SwapBr | Kernel::DropAlpha | Kernel::ReverseDropAlpha => 4,
            Kernel::ReverseRgb | Kernel::AppendAlpha | Kernel::ReverseAppendAlpha => 3,
            Kernel::SplatGrayAlpha => 2,
            Kernel::SplatGray => 1,
        }
    }

    pub(crate) const fn dst_bpp(self) -> usize {
        match self {
            Kernel::ReverseRgb | Kernel::DropAlpha | Kernel::ReverseDropAlpha => 3,
            _ => 4,
        }
    }

    /// Convert `height` rows of `width` pixels. Row `y` starts at
    /// `y * src_pitch` in `src` and `y * dst_pitch` in `dst`; bytes between
    /// the end of a row and the next pitch boundary are left alone.
    pub(crate) fn run(
        self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
    ) {
        if width == 0 || height == 0 {
            return;
        }
        debug_assert!(src_pitch >= width * self.src_bpp());
        debug_assert!(dst_pitch >= width * self.dst_bpp());
        debug_assert!(src.len() >= (height - 1) * src_pitch + width * self.src_bpp());
        debug_assert!(dst.len() >= (height - 1) * dst_pitch + width * self.dst_bpp());
        let (w, h, ss, ds) = (width, height, src_pitch, dst_pitch);
        match self {
            Kernel::SwapBr => {
                incant!(swap_br_strided(src, dst, w, h, ss, ds), [v3, scalar]);
            }
            Kernel::ReverseRgb => {
                incant!(reverse_rgb_strided(src, dst, w, h, ss, ds), [v3, scalar]);
            }
            Kernel::AppendAlpha => {
                incant!(append_alpha_strided(src, dst, w, h, ss, ds), [v3, scalar]);
            }
            Kernel::ReverseAppendAlpha => {
                incant!(
                    reverse_append_alpha_strided(src, dst, w, h, ss, ds),
                    [v3, scalar]
                );
            }
            Kernel::SplatGray => {
                incant!(splat_gray_strided(src, dst, w, h, ss, ds), [v3, scalar]);
            }
            Kernel::SplatGrayAlpha => {
                incant!(splat_gray_alpha_strided(src, dst, w, h, ss, ds), [v3, scalar]);
            }
            Kernel::DropAlpha => {
                incant!(drop_alpha_strided(src, dst, w, h, ss, ds), [v3, scalar]);
            }
            Kernel::ReverseDropAlpha => {
                incant!(
                    reverse_drop_alpha_strided(src, dst, w, h, ss, ds),
                    [v3, scalar]
                );
            }
        }
    }
}
