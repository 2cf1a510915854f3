extern crate std;
use super::*;
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

use Lane::{Fill as F, Src as S};

const ALL_KERNELS: [(Kernel, &[Lane]); 8] = [
    (Kernel::SwapBr, &[S(2), S(1), S(0), S(3)]),
    (Kernel::ReverseRgb, &[S(2), S(1), S(0)]),
    (Kernel::AppendAlpha, &[S(0), S(1), S(2), F(255)]),
    (Kernel::ReverseAppendAlpha, &[S(2), S(1), S(0), F(255)]),
    (Kernel::SplatGray, &[S(0), S(0), S(0), F(255)]),
    (Kernel::SplatGrayAlpha, &[S(0), S(0), S(0), S(1)]),
    (Kernel::DropAlpha, &[S(0), S(1), S(2)]),
    (Kernel::ReverseDropAlpha, &[S(2), S(1), S(0)]),
];

fn make_pixels(n_pixels: usize, bpp: usize) -> Vec<u8> {
    (0..n_pixels * bpp).map(|i| (i % 251) as u8).collect()
}

/// Apply a lane map one pixel at a time.
fn ref_lanes(src: &[u8], src_bpp: usize, lanes: &[Lane]) -> Vec<u8> {
    src.chunks_exact(src_bpp)
        .flat_map(|px| {
            lanes.iter().map(move |lane| match *lane {
                Lane::Src(i) => px[i as usize],
                Lane::Fill(v) => v,
            })
        })
        .collect()
}

// Small counts hit only the tail; larger ones cover whole SIMD blocks plus tail.
const TEST_PIXEL_COUNTS: &[usize] = &[1, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33, 64, 100];

#[test]
fn find_recognizes_every_kernel() {
    for (kernel, lanes) in ALL_KERNELS {
        assert_eq!(Kernel::find(kernel.src_bpp(), lanes), Some(kernel));
        assert_eq!(lanes.len(), kernel.dst_bpp());
    }
}

#[test]
fn find_rejects_unknown_maps() {
    // identity copy is not a kernel
    assert_eq!(Kernel::find(4, &[S(0), S(1), S(2), S(3)]), None);
    // right shape, wrong source width
    assert_eq!(Kernel::find(4, &[S(2), S(1), S(0), F(255)]), None);
    // transparent fill is not AppendAlpha
    assert_eq!(Kernel::find(3, &[S(0), S(1), S(2), F(0)]), None);
    assert_eq!(Kernel::find(1, &[]), None);
}

#[test]
fn permutation_contiguous_rows() {
    let report = for_each_token_permutation(policy(), |perm| {
        for (kernel, lanes) in ALL_KERNELS {
            for &n in TEST_PIXEL_COUNTS {
                let src = make_pixels(n, kernel.src_bpp());
                let expected = ref_lanes(&src, kernel.src_bpp(), lanes);
                let mut dst = vec![0u8; n * kernel.dst_bpp()];
                kernel.run(
                    &src,
                    n * kernel.src_bpp(),
                    &mut dst,
                    n * kernel.dst_bpp(),
                    n,
                    1,
                );
                assert_eq!(dst, expected, "{kernel:?} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("contiguous rows: {report}");
}

#[test]
fn permutation_strided_rows_keep_padding() {
    let report = for_each_token_permutation(policy(), |perm| {
        let (w, h) = (13, 4);
        for (kernel, lanes) in ALL_KERNELS {
            let (sb, db) = (kernel.src_bpp(), kernel.dst_bpp());
            let src_stride = w * sb + 5;
            let dst_stride = w * db + 7;
            let src: Vec<u8> = (0..src_stride * h).map(|i| (i * 7 % 253) as u8).collect();
            let mut dst = vec![0xEEu8; dst_stride * h];
            kernel.run(&src, src_stride, &mut dst, dst_stride, w, h);
            for y in 0..h {
                let row = &src[y * src_stride..][..w * sb];
                let expected = ref_lanes(row, sb, lanes);
                assert_eq!(
                    &dst[y * dst_stride..][..w * db],
                    &expected[..],
                    "{kernel:?} y={y} tier={perm}"
                );
                for i in w * db..dst_stride {
                    assert_eq!(
                        dst[y * dst_stride + i],
                        0xEE,
                        "{kernel:?} padding corrupted y={y} i={i} tier={perm}"
                    );
                }
            }
        }
    });
    std::eprintln!("strided rows: {report}");
}

#[test]
fn empty_extent_is_noop() {
    let mut dst = vec![0xAAu8; 8];
    Kernel::SwapBr.run(&[], 0, &mut dst, 0, 0, 5);
    Kernel::AppendAlpha.run(&[1, 2, 3], 3, &mut dst, 4, 1, 0);
    assert!(dst.iter().all(|&b| b == 0xAA));
}
