//! Bit-level component access.
//!
//! Pixel data is a big-endian bit stream: sub-byte components are stored
//! MSB-first within a byte and wider components most-significant byte first.
//! [`BitCursor`] is the only place that knows about shifts and carries; every
//! transform in the crate reads and writes components through it.

/// A byte buffer plus a bit position.
///
/// Reading works on any `AsRef<[u8]>`; writing additionally needs
/// `AsMut<[u8]>`. Both advance the cursor by the number of bits processed.
#[derive(Debug, Clone)]
pub struct BitCursor<B> {
    buf: B,
    pos: usize,
}

impl<B> BitCursor<B> {
    #[inline]
    pub fn new(buf: B, bit_offset: usize) -> Self {
        Self { buf, pos: bit_offset }
    }

    /// Current bit position from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn seek(&mut self, bit_offset: usize) {
        self.pos = bit_offset;
    }

}

impl<B: AsRef<[u8]>> BitCursor<B> {
    /// Read `count` bits (at most 32) as an unsigned integer.
    pub fn read(&mut self, count: u32) -> u32 {
        debug_assert!(count <= 32);
        let data = self.buf.as_ref();
        let mut value = 0u32;
        let mut remaining = count;
        while remaining > 0 {
            let shift = (self.pos % 8) as u32;
            let avail = 8 - shift;
            let take = avail.min(remaining);
            let byte = u32::from(data[self.pos / 8]);
            let bits = (byte >> (avail - take)) & ((1 << take) - 1);
            value = (value << take) | bits;
            self.pos += take as usize;
            remaining -= take;
        }
        value
    }

    /// Read `count` bits and normalize them to `[0, 1]`.
    #[inline]
    pub fn read_unit(&mut self, count: u32) -> f64 {
        let value = self.read(count);
        to_unit(value, count)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BitCursor<B> {
    /// OR the low `count` bits of `value` into the buffer at the cursor.
    ///
    /// Bits outside the written run are untouched. The destination bits must
    /// be zero beforehand; callers allocate zeroed output buffers.
    pub fn write(&mut self, count: u32, value: u32) {
        debug_assert!(count <= 32);
        let data = self.buf.as_mut();
        let mut remaining = count;
        while remaining > 0 {
            let shift = (self.pos % 8) as u32;
            let avail = 8 - shift;
            let take = avail.min(remaining);
            let bits = (value >> (remaining - take)) & ((1 << take) - 1);
            data[self.pos / 8] |= (bits << (avail - take)) as u8;
            self.pos += take as usize;
            remaining -= take;
        }
    }

    /// Quantize `value` (clamped to `[0, 1]`) to `count` bits, rounding to
    /// nearest, and write it.
    #[inline]
    pub fn write_unit(&mut self, count: u32, value: f64) {
        self.write(count, quantize(value, count));
    }

    /// Copy `bits` bits from `src` at its cursor to this cursor, in chunks of
    /// at most 32 bits. Both cursors advance.
    pub fn copy_from<S: AsRef<[u8]>>(&mut self, src: &mut BitCursor<S>, bits: usize) {
        let mut remaining = bits;
        while remaining > 0 {
            let n = remaining.min(32) as u32;
            let v = src.read(n);
            self.write(n, v);
            remaining -= n as usize;
        }
    }
}

/// Largest value representable in `depth` bits.
#[inline]
pub const fn max_value(depth: u32) -> u32 {
    if depth >= 32 {
        u32::MAX
    } else {
        (1u32 << depth) - 1
    }
}

/// Normalize a `depth`-bit level to `[0, 1]`.
///
/// `f64` holds every level of a 32-bit field exactly, so
/// `quantize(to_unit(v, d), d) == v`.
#[inline]
pub fn to_unit(value: u32, depth: u32) -> f64 {
    let max = max_value(depth);
    if max == 0 {
        return 0.0;
    }
    f64::from(value) / f64::from(max)
}

/// Map a normalized value to the nearest integer level of a `depth`-bit field.
#[inline]
pub fn quantize(value: f64, depth: u32) -> u32 {
    let v = if value > 1.0 {
        1.0
    } else if value > 0.0 {
        value
    } else {
        // also catches NaN
        0.0
    };
    // float-to-int casts saturate; + 0.5 then truncate rounds half up
    (v * f64::from(max_value(depth)) + 0.5) as u32
}

/// Read one component at `bit_offset` and normalize it to `[0, 1]`.
#[inline]
pub fn read_component(buf: &[u8], bit_offset: usize, bit_size: u32) -> f64 {
    BitCursor::new(buf, bit_offset).read_unit(bit_size)
}

/// Quantize `value` to `bit_size` bits and OR it into `buf` at `bit_offset`.
///
/// The target bits must be zero.
#[inline]
pub fn write_component(buf: &mut [u8], bit_offset: usize, bit_size: u32, value: f64) {
    BitCursor::new(buf, bit_offset).write_unit(bit_size, value);
}
