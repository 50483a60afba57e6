//! Primitive encoding/decoding for the blueprint binary format.
//!
//! Fixed-width little-endian integers, floats, UUIDs and the packed
//! morph-scale word.

use uuid::Uuid;

use crate::error::DecodeError;
use crate::limits::{
    MORPH_SCALE_BITS, MORPH_SCALE_COUNT, MORPH_SCALE_MASK, MORPH_SCALE_UNITS, UUID_LEN,
};

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and tracks the current offset. Every read is bounds
/// checked up front, so a failed read leaves the offset where it was.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining_len();
        if n > remaining {
            return Err(DecodeError::OutOfBounds {
                field,
                offset: self.pos,
                needed: n,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, field)?);
        Ok(out)
    }

    /// Reads an unsigned byte.
    #[inline]
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>(field)?[0])
    }

    /// Reads a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array(field)?))
    }

    /// Reads a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array(field)?))
    }

    /// Reads a little-endian u64.
    #[inline]
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array(field)?))
    }

    /// Reads two consecutive little-endian f32 values.
    ///
    /// Both values are bounds checked together; a short buffer consumes neither.
    pub fn read_f32_pair(&mut self, field: &'static str) -> Result<(f32, f32), DecodeError> {
        let bytes: [u8; 8] = self.read_array(field)?;
        let first = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let second = f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok((first, second))
    }

    /// Reads a 16-byte UUID in RFC 4122 byte order.
    #[inline]
    pub fn read_uuid(&mut self, field: &'static str) -> Result<Uuid, DecodeError> {
        Ok(Uuid::from_bytes(self.read_array::<UUID_LEN>(field)?))
    }

    /// Reads `len` bytes of UTF-8 text.
    ///
    /// Errors report the offset where the text span starts.
    pub fn read_str(&mut self, len: usize, field: &'static str) -> Result<String, DecodeError> {
        let offset = self.pos;
        let bytes = self.read_bytes(len, field)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::MalformedText { field, offset })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
///
/// Writing is pure append and never fails.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Writes an unsigned byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a little-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian i32.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian u64.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian f32.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes two consecutive little-endian f32 values.
    pub fn write_f32_pair(&mut self, first: f32, second: f32) {
        self.write_f32(first);
        self.write_f32(second);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a 16-byte UUID in RFC 4122 byte order.
    #[inline]
    pub fn write_uuid(&mut self, id: &Uuid) {
        self.buf.extend_from_slice(id.as_bytes());
    }
}

// =============================================================================
// MORPH SCALE PACKING
// =============================================================================

/// Unpacks the 64-bit scale word into ten quarter-unit ratios.
///
/// Lane `i` occupies bits `[6i, 6i + 6)`; bits 60-63 are unused.
pub fn unpack_morph_scales(word: u64) -> [f32; MORPH_SCALE_COUNT] {
    let mut scales = [0.0; MORPH_SCALE_COUNT];
    for (i, scale) in scales.iter_mut().enumerate() {
        let raw = (word >> (i as u32 * MORPH_SCALE_BITS)) & MORPH_SCALE_MASK;
        *scale = raw as f32 / MORPH_SCALE_UNITS;
    }
    scales
}

/// Packs ten ratios into the 64-bit scale word.
///
/// Each ratio is multiplied by four, truncated toward zero and masked to six
/// bits, so out-of-range values wrap rather than spill into neighbouring lanes.
pub fn pack_morph_scales(scales: &[f32; MORPH_SCALE_COUNT]) -> u64 {
    scales.iter().enumerate().fold(0u64, |word, (i, scale)| {
        let raw = (scale * MORPH_SCALE_UNITS) as i64 as u64 & MORPH_SCALE_MASK;
        word | (raw << (i as u32 * MORPH_SCALE_BITS))
    })
}
