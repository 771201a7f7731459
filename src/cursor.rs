//! Offset-tracked binary reader and writer.
//!
//! [`ByteCursor`] reads primitives off a byte slice and [`ByteWriter`]
//! appends them to a growable buffer. Both track their position so callers
//! can account for exactly how many bytes a structure consumed or produced.
//! All multi-byte values are little-endian regardless of host order; the
//! on-disk format predates portable byte-order handling and is fixed.
//!
//! Neither type knows anything about the record layout itself; that lives
//! in [`crate::legacy`].

use thiserror::Error;

/// Errors raised by [`ByteCursor`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The source ran out before the requested value could be read. The
    /// offset is the position at which the failed read began; the cursor
    /// does not advance past it.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEndOfData { offset: usize },
}

/// Sequential reader over a byte slice.
///
/// Every read consumes an exact number of bytes or fails with
/// [`CursorError::UnexpectedEndOfData`] without consuming anything. A
/// failed multi-byte read never produces a partial value.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position from the start of the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the source.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Takes the next `n` bytes, advancing only on success.
    fn take(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        if self.remaining() < n {
            return Err(CursorError::UnexpectedEndOfData { offset: self.pos });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, CursorError> {
        Ok(self.take(1)?[0] as i8)
    }

    /// Reads an unsigned 16-bit integer, least significant byte first.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16, CursorError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Reads a signed 16-bit integer, least significant byte first.
    #[inline]
    pub fn read_i16_le(&mut self) -> Result<i16, CursorError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    /// Reads a signed 32-bit integer, least significant byte first.
    #[inline]
    pub fn read_i32_le(&mut self) -> Result<i32, CursorError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads an IEEE-754 single-precision float from its little-endian bit
    /// pattern. This is a reinterpretation, not a numeric conversion.
    #[inline]
    pub fn read_f32_le(&mut self) -> Result<f32, CursorError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a fixed-width NUL-terminated string field.
    ///
    /// Always consumes exactly `width` bytes. The result is the text before
    /// the first NUL, or all `width` bytes if no NUL is present. Bytes above
    /// 0x7F map through Latin-1, so no field content can fail to decode.
    pub fn read_fixed_string(&mut self, width: usize) -> Result<String, CursorError> {
        let field = self.take(width)?;
        let text = match field.iter().position(|&b| b == 0) {
            Some(nul) => &field[..nul],
            None => field,
        };
        Ok(text.iter().map(|&b| b as char).collect())
    }

    /// Reads `n` bytes verbatim.
    pub fn read_raw(&mut self, n: usize) -> Result<Vec<u8>, CursorError> {
        Ok(self.take(n)?.to_vec())
    }
}

/// Sequential writer appending to an owned buffer.
///
/// Writes mirror the cursor reads and cannot fail; the buffer grows as
/// needed. Fixed-width fields truncate and zero-fill deterministically.
#[derive(Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with space reserved for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Consumes the writer and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn write_i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    /// Writes an unsigned 16-bit integer, least significant byte first.
    #[inline]
    pub fn write_u16_le(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes a signed 16-bit integer, least significant byte first.
    #[inline]
    pub fn write_i16_le(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes a signed 32-bit integer, least significant byte first.
    #[inline]
    pub fn write_i32_le(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes a single-precision float as its little-endian bit pattern.
    #[inline]
    pub fn write_f32_le(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes a fixed-width NUL-terminated string field.
    ///
    /// Emits `min(text length, width)` bytes of text, one NUL terminator if
    /// room remains, then zero-fills to exactly `width` bytes. Text longer
    /// than `width` is truncated, not rejected. Characters above U+00FF have
    /// no single-byte encoding and are written as `?`.
    pub fn write_fixed_string(&mut self, text: &str, width: usize) {
        let start = self.buf.len();
        for ch in text.chars().take(width) {
            let b = if (ch as u32) <= 0xFF { ch as u8 } else { b'?' };
            self.buf.push(b);
        }
        while self.buf.len() < start + width {
            self.buf.push(0);
        }
    }

    /// Writes a raw byte block of exactly `width` bytes, truncating or
    /// zero-filling `bytes` as needed.
    pub fn write_raw(&mut self, bytes: &[u8], width: usize) {
        let n = bytes.len().min(width);
        self.buf.extend_from_slice(&bytes[..n]);
        for _ in n..width {
            self.buf.push(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let data = [0x34, 0x12, 0x01, 0x00, 0x00, 0x00];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_u16_le().unwrap(), 0x1234);
        assert_eq!(cur.read_i32_le().unwrap(), 1);
        assert_eq!(cur.position(), 6);
    }

    #[test]
    fn reads_signed_values() {
        let data = [0xFF, 0xFE, 0xFF];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_i8().unwrap(), -1);
        assert_eq!(cur.read_i16_le().unwrap(), -2);
    }

    #[test]
    fn reads_f32_bit_pattern() {
        let mut w = ByteWriter::new();
        w.write_f32_le(100.0);
        let bytes = w.into_bytes();
        assert_eq!(bytes, 100.0f32.to_le_bytes());
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(cur.read_f32_le().unwrap(), 100.0);
    }

    #[test]
    fn fixed_string_stops_at_nul_but_consumes_width() {
        let data = b"abc\0xyz\0";
        let mut cur = ByteCursor::new(data);
        assert_eq!(cur.read_fixed_string(8).unwrap(), "abc");
        assert_eq!(cur.position(), 8);
    }

    #[test]
    fn fixed_string_without_nul_returns_full_width() {
        let data = b"abcdefgh";
        let mut cur = ByteCursor::new(data);
        assert_eq!(cur.read_fixed_string(8).unwrap(), "abcdefgh");
        assert_eq!(cur.position(), 8);
    }

    #[test]
    fn fixed_string_nul_at_every_position() {
        let width = 8;
        for k in 0..width {
            let mut data = vec![b'x'; width];
            data[k] = 0;
            let mut cur = ByteCursor::new(&data);
            let s = cur.read_fixed_string(width).unwrap();
            assert_eq!(s.len(), k, "terminator at {k}");
            assert_eq!(cur.position(), width);
        }
    }

    #[test]
    fn fixed_string_maps_high_bytes_through_latin1() {
        let data = [0xE9, 0x00, 0x00, 0x00];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_fixed_string(4).unwrap(), "\u{e9}");
    }

    #[test]
    fn short_read_reports_offset_and_does_not_advance() {
        let data = [0x01, 0x02, 0x03];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_u16_le().unwrap(), 0x0201);
        let err = cur.read_u16_le().unwrap_err();
        assert_eq!(err, CursorError::UnexpectedEndOfData { offset: 2 });
        assert_eq!(cur.position(), 2);
        // The remaining byte is still readable after the failure.
        assert_eq!(cur.read_u8().unwrap(), 0x03);
    }

    #[test]
    fn empty_source_fails_at_offset_zero() {
        let mut cur = ByteCursor::new(&[]);
        let err = cur.read_u8().unwrap_err();
        assert_eq!(err, CursorError::UnexpectedEndOfData { offset: 0 });
    }

    #[test]
    fn writer_terminates_and_pads_strings() {
        let mut w = ByteWriter::new();
        w.write_fixed_string("abc", 6);
        assert_eq!(w.into_bytes(), b"abc\0\0\0");
    }

    #[test]
    fn writer_truncates_overlong_strings_without_terminator() {
        let mut w = ByteWriter::new();
        w.write_fixed_string("abcdefgh", 4);
        assert_eq!(w.into_bytes(), b"abcd");
    }

    #[test]
    fn writer_exact_width_string_has_no_terminator() {
        let mut w = ByteWriter::new();
        w.write_fixed_string("abcd", 4);
        let bytes = w.into_bytes();
        assert_eq!(bytes, b"abcd");
        // Round-trips: no NUL means the reader takes the full width.
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(cur.read_fixed_string(4).unwrap(), "abcd");
    }

    #[test]
    fn writer_replaces_unencodable_chars() {
        let mut w = ByteWriter::new();
        w.write_fixed_string("a\u{1F4BE}b", 5);
        assert_eq!(w.into_bytes(), b"a?b\0\0");
    }

    #[test]
    fn writer_raw_truncates_and_pads() {
        let mut w = ByteWriter::new();
        w.write_raw(&[1, 2], 4);
        w.write_raw(&[9, 9, 9, 9], 2);
        assert_eq!(w.into_bytes(), [1, 2, 0, 0, 9, 9]);
    }

    #[test]
    fn string_round_trip_through_writer_and_cursor() {
        let mut w = ByteWriter::new();
        w.write_fixed_string("SYSOP", 21);
        w.write_u16_le(500);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 23);
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(cur.read_fixed_string(21).unwrap(), "SYSOP");
        assert_eq!(cur.read_u16_le().unwrap(), 500);
    }
}
