use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{
    _mm_loadu_si128, _mm_storeu_si128, _mm256_loadu_si256, _mm256_storeu_si256,
};

// ===========================================================================
// Shuffle tables
// ===========================================================================

const BR_SHUF_MASK_AVX: [i8; 32] = [
    2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14, 13, 12, 15, 2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14,
    13, 12, 15,
];

const ALPHA_FF_MASK_AVX: [i8; 32] = [
    0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0,
    0, 0, -1,
];

const GRAY_SPLAT_MASK_AVX: [i8; 32] = [
    0, 0, 0, -128, 1, 1, 1, -128, 2, 2, 2, -128, 3, 3, 3, -128, 4, 4, 4, -128, 5, 5, 5, -128, 6, 6,
    6, -128, 7, 7, 7, -128,
];

const GA_SPLAT_MASK_AVX: [i8; 32] = [
    0, 0, 0, 1, 2, 2, 2, 3, 4, 4, 4, 5, 6, 6, 6, 7, 8, 8, 8, 9, 10, 10, 10, 11, 12, 12, 12, 13, 14,
    14, 14, 15,
];

// Spread 24 packed bytes so each 16-byte lane holds 12 of them.
const SPREAD_3X4_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0,
];

const RGB_REVERSE_PAD_SHUF_AVX: [i8; 32] = [
    2, 1, 0, -128, 5, 4, 3, -128, 8, 7, 6, -128, 11, 10, 9, -128, 2, 1, 0, -128, 5, 4, 3, -128, 8,
    7, 6, -128, 11, 10, 9, -128,
];

const RGB_PAD_SHUF_AVX: [i8; 32] = [
    0, 1, 2, -128, 3, 4, 5, -128, 6, 7, 8, -128, 9, 10, 11, -128, 0, 1, 2, -128, 3, 4, 5, -128, 6,
    7, 8, -128, 9, 10, 11, -128,
];

// Reverse each 3-byte group; bytes 12..16 pass through.
const RGB_REVERSE_SHUF_SSE: [i8; 16] = [2, 1, 0, 5, 4, 3, 8, 7, 6, 11, 10, 9, 12, 13, 14, 15];

const DROP_ALPHA_SHUF_AVX: [i8; 32] = [
    0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14, -128, -128, -128, -128, 0, 1, 2, 4, 5, 6, 8, 9, 10, 12,
    13, 14, -128, -128, -128, -128,
];

const REVERSE_DROP_ALPHA_SHUF_AVX: [i8; 32] = [
    2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, -128, -128, -128, -128, 2, 1, 0, 6, 5, 4, 10, 9, 8, 14,
    13, 12, -128, -128, -128, -128,
];

// Gather the 12 live bytes of each lane into 24 contiguous bytes.
const PACK_3X4_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// ===========================================================================
// Row implementations
// ===========================================================================

#[rite]
pub(super) fn swap_br_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm256_loadu_si256(&BR_SHUF_MASK_AVX);
    let (src_blocks, src_tail) = src.as_chunks::<32>();
    let (dst_blocks, dst_tail) = dst.as_chunks_mut::<32>();
    for (s, d) in src_blocks.iter().zip(dst_blocks.iter_mut()) {
        let v = _mm256_loadu_si256(s);
        _mm256_storeu_si256(d, _mm256_shuffle_epi8(v, mask));
    }
    for (s, d) in src_tail.chunks_exact(4).zip(dst_tail.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[2], s[1], s[0], s[3]]);
    }
}

#[rite]
pub(super) fn reverse_rgb_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm_loadu_si128(&RGB_REVERSE_SHUF_SSE);
    let mut i = 0;
    // 16-byte stores advancing by 12; the 4 passthrough bytes are rewritten
    // by the next iteration or the tail.
    while let (Some(s), Some(d)) = (
        src[i..].first_chunk::<16>(),
        dst[i..].first_chunk_mut::<16>(),
    ) {
        let v = _mm_loadu_si128(s);
        _mm_storeu_si128(d, _mm_shuffle_epi8(v, mask));
        i += 12;
    }
    for (s, d) in src[i..].chunks_exact(3).zip(dst[i..].chunks_exact_mut(3)) {
        d.copy_from_slice(&[s[2], s[1], s[0]]);
    }
}

/// Shared body of the 3→4 kernels: `shuf` places three bytes per pixel and
/// leaves byte 3 zero, then alpha is OR-ed in.
#[rite]
fn pad_rgb_row_v3(
    _token: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    shuf_table: &[i8; 32],
    reverse: bool,
) {
    let perm = _mm256_loadu_si256(&SPREAD_3X4_PERM_AVX);
    let shuf = _mm256_loadu_si256(shuf_table);
    let alpha = _mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let (mut is, mut id) = (0, 0);
    // loads 32 bytes, consumes 24
    while let (Some(s), Some(d)) = (
        src[is..].first_chunk::<32>(),
        dst[id..].first_chunk_mut::<32>(),
    ) {
        let rgb = _mm256_loadu_si256(s);
        let spread = _mm256_permutevar8x32_epi32(rgb, perm);
        let padded = _mm256_shuffle_epi8(spread, shuf);
        _mm256_storeu_si256(d, _mm256_or_si256(padded, alpha));
        is += 24;
        id += 32;
    }
    for (s, d) in src[is..].chunks_exact(3).zip(dst[id..].chunks_exact_mut(4)) {
        if reverse {
            d.copy_from_slice(&[s[2], s[1], s[0], 0xFF]);
        } else {
            d.copy_from_slice(&[s[0], s[1], s[2], 0xFF]);
        }
    }
}

#[rite]
pub(super) fn append_alpha_row_v3(token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    pad_rgb_row_v3(token, src, dst, &RGB_PAD_SHUF_AVX, false);
}

#[rite]
pub(super) fn reverse_append_alpha_row_v3(token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    pad_rgb_row_v3(token, src, dst, &RGB_REVERSE_PAD_SHUF_AVX, true);
}

#[rite]
pub(super) fn splat_gray_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let splat = _mm256_loadu_si256(&GRAY_SPLAT_MASK_AVX);
    let alpha = _mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let (src_blocks, src_tail) = src.as_chunks::<8>();
    let (dst_blocks, dst_tail) = dst.as_chunks_mut::<32>();
    for (s, d) in src_blocks.iter().zip(dst_blocks.iter_mut()) {
        let grays = _mm256_set1_epi64x(i64::from_ne_bytes(*s));
        let expanded = _mm256_shuffle_epi8(grays, splat);
        _mm256_storeu_si256(d, _mm256_or_si256(expanded, alpha));
    }
    for (&g, d) in src_tail.iter().zip(dst_tail.chunks_exact_mut(4)) {
        d.copy_from_slice(&[g, g, g, 0xFF]);
    }
}

#[rite]
pub(super) fn splat_gray_alpha_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let splat = _mm256_loadu_si256(&GA_SPLAT_MASK_AVX);
    let (src_blocks, src_tail) = src.as_chunks::<16>();
    let (dst_blocks, dst_tail) = dst.as_chunks_mut::<32>();
    for (s, d) in src_blocks.iter().zip(dst_blocks.iter_mut()) {
        let [lo, hi]: &[[u8; 8]; 2] = bytemuck::cast_ref(s);
        let (lo, hi) = (i64::from_ne_bytes(*lo), i64::from_ne_bytes(*hi));
        let pairs = _mm256_set_epi64x(hi, lo, hi, lo);
        _mm256_storeu_si256(d, _mm256_shuffle_epi8(pairs, splat));
    }
    for (s, d) in src_tail.chunks_exact(2).zip(dst_tail.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[0], s[0], s[0], s[1]]);
    }
}

/// Shared body of the 4→3 kernels.
#[rite]
fn strip_alpha_row_v3(
    _token: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    shuf_table: &[i8; 32],
    reverse: bool,
) {
    let shuf = _mm256_loadu_si256(shuf_table);
    let pack = _mm256_loadu_si256(&PACK_3X4_PERM_AVX);
    let (src_blocks, src_tail) = src.as_chunks::<32>();
    let (dst_blocks, dst_tail) = dst.as_chunks_mut::<24>();
    for (s, d) in src_blocks.iter().zip(dst_blocks.iter_mut()) {
        let v = _mm256_loadu_si256(s);
        let stripped = _mm256_shuffle_epi8(v, shuf);
        let packed = _mm256_permutevar8x32_epi32(stripped, pack);
        let mut tmp = [0u8; 32];
        _mm256_storeu_si256(&mut tmp, packed);
        d.copy_from_slice(&tmp[..24]);
    }
    for (s, d) in src_tail.chunks_exact(4).zip(dst_tail.chunks_exact_mut(3)) {
        if reverse {
            d.copy_from_slice(&[s[2], s[1], s[0]]);
        } else {
            d.copy_from_slice(&s[..3]);
        }
    }
}

#[rite]
pub(super) fn drop_alpha_row_v3(token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    strip_alpha_row_v3(token, src, dst, &DROP_ALPHA_SHUF_AVX, false);
}

#[rite]
pub(super) fn reverse_drop_alpha_row_v3(token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    strip_alpha_row_v3(token, src, dst, &REVERSE_DROP_ALPHA_SHUF_AVX, true);
}

// ===========================================================================
// Strided wrappers (dispatch targets for incant!)
// ===========================================================================

#[arcane]
pub(super) fn swap_br_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        swap_br_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn reverse_rgb_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        reverse_rgb_row_v3(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 3]);
    }
}
#[arcane]
pub(super) fn append_alpha_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        append_alpha_row_v3(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn reverse_append_alpha_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        reverse_append_alpha_row_v3(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn splat_gray_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        splat_gray_row_v3(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn splat_gray_alpha_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        splat_gray_alpha_row_v3(t, &src[y * ss..][..w * 2], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn drop_alpha_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        drop_alpha_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}
#[arcane]
pub(super) fn reverse_drop_alpha_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        reverse_drop_alpha_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}
