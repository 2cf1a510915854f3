//! Row alignment: moving between bit-packed rows and byte-padded rows.

use alloc::borrow::Cow;

use crate::bits::BitCursor;
use crate::image::{Image, byte_pitch};

/// Whether storing `img` with rows aligned to `alignment` bytes would give
/// exactly the bytes it already has.
///
/// Two non-zero alignments agree when they produce the same row pitch. A
/// packed layout agrees with an aligned one when each packed row is a whole
/// number of bytes and that number is a multiple of the alignment.
pub fn is_aligned(img: &Image, alignment: usize) -> bool {
    if img.alignment == alignment {
        return true;
    }
    let depth = img.pixel_depth();
    let width = img.size.width;
    match (img.alignment, alignment) {
        (0, n) | (n, 0) => {
            let row_bits = width * depth as usize;
            row_bits % 8 == 0 && (row_bits / 8) % n == 0
        }
        (a, b) => byte_pitch(width, depth, a) == byte_pitch(width, depth, b),
    }
}

/// Store `img` with rows aligned to `alignment` bytes (`0` packs rows bit to
/// bit).
///
/// Returns the input unchanged if the alignment already matches. If the
/// bytes would be identical the buffer is reused and only the recorded
/// alignment changes.
pub fn align(img: &Image, alignment: usize) -> Cow<'_, Image> {
    img.debug_check();
    if img.alignment == alignment {
        return Cow::Borrowed(img);
    }
    if is_aligned(img, alignment) {
        log::trace!("align {} -> {alignment}: same bytes", img.alignment);
        return Cow::Owned(Image {
            alignment,
            ..img.clone()
        });
    }
    log::trace!("align {} -> {alignment}: repack rows", img.alignment);
    Cow::Owned(repack(img, alignment))
}

fn repack(img: &Image, alignment: usize) -> Image {
    let mut dst = Image::blank(img.size, img.channels.clone(), alignment);
    let row_bits = img.size.width * img.pixel_depth() as usize;
    let (src_pitch, dst_pitch) = (img.bit_pitch(), dst.bit_pitch());
    if img.alignment != 0 && alignment != 0 {
        let row_bytes = row_bits.div_ceil(8);
        let (sp, dp) = (src_pitch / 8, dst_pitch / 8);
        for y in 0..img.size.height {
            dst.data[y * dp..][..row_bytes].copy_from_slice(&img.data[y * sp..][..row_bytes]);
        }
        return dst;
    }
    let mut src = BitCursor::new(&img.data[..], 0);
    let mut out = BitCursor::new(&mut dst.data[..], 0);
    for y in 0..img.size.height {
        src.seek(y * src_pitch);
        out.seek(y * dst_pitch);
        out.copy_from(&mut src, row_bits);
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::image::Size;
    use crate::layout::Layout;
    use alloc::vec;
    use alloc::vec::Vec;

    fn gray4(w: usize, h: usize, alignment: usize, data: Vec<u8>) -> Image {
        Image::new(Size::new(w, h), vec![Channel::gray(4)], alignment, data).unwrap()
    }

    #[test]
    fn same_alignment_borrows() {
        let img = gray4(3, 2, 4, vec![0; 8]);
        assert!(matches!(align(&img, 4), Cow::Borrowed(_)));
    }

    #[test]
    fn aligned_pitches_compare() {
        let img = Image::zeroed(Size::new(4, 3), Layout::Rgb.channels(8), 4).unwrap();
        // 12-byte rows
        assert!(is_aligned(&img, 1));
        assert!(is_aligned(&img, 2));
        assert!(is_aligned(&img, 0));
        assert!(!is_aligned(&img, 8));
    }

    #[test]
    fn packed_needs_whole_byte_rows() {
        let img = gray4(3, 2, 0, vec![0; 3]);
        assert!(!is_aligned(&img, 1));
        let img = gray4(4, 2, 0, vec![0; 4]);
        assert!(is_aligned(&img, 1));
        assert!(is_aligned(&img, 2));
        assert!(!is_aligned(&img, 4));
    }

    #[test]
    fn empty_is_aligned_everywhere() {
        let img = gray4(0, 0, 0, vec![]);
        assert!(is_aligned(&img, 8));
        assert_eq!(align(&img, 8).alignment, 8);
    }

    #[test]
    fn same_bytes_only_relabel() {
        let img = Image::new(Size::new(2, 1), vec![Channel::gray(8)], 1, vec![9, 8]).unwrap();
        let out = align(&img, 2);
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(out.data, img.data);
        assert_eq!(out.alignment, 2);
    }

    #[test]
    fn packed_to_aligned_shifts_rows() {
        // rows 0xA,0xB,0xC | 0x1,0x2,0x3 packed into 3 bytes
        let img = gray4(3, 2, 0, vec![0xAB, 0xC1, 0x23]);
        let out = align(&img, 2);
        assert_eq!(out.data, [0xAB, 0xC0, 0x12, 0x30]);
        let back = align(&out, 0);
        assert_eq!(back.data, img.data);
        assert_eq!(back.alignment, 0);
    }

    #[test]
    fn aligned_to_aligned_copies_prefix() {
        let img = gray4(3, 2, 4, vec![0xAB, 0xC0, 0, 0, 0x12, 0x30, 0, 0]);
        let out = align(&img, 1);
        assert_eq!(out.data, [0xAB, 0xC0, 0x12, 0x30]);
        let wide = align(&out, 8);
        assert_eq!(wide.data.len(), 16);
        assert_eq!(&wide.data[8..10], &[0x12, 0x30]);
    }

    #[test]
    fn relabel_matches_repack() {
        let data: Vec<u8> = (0..24).collect();
        let img = Image::new(Size::new(2, 4), Layout::Rgb.channels(8), 0, data).unwrap();
        for n in [1, 2, 3, 6] {
            assert!(is_aligned(&img, n));
            assert_eq!(*align(&img, n), repack(&img, n), "alignment {n}");
        }
        let img = gray4(4, 3, 2, vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC]);
        assert!(is_aligned(&img, 0));
        assert_eq!(*align(&img, 0), repack(&img, 0));
    }
}
