//! Decode, encode, and validation passes over the record field table.
//!
//! Each pass is a [`FieldVisitor`] driven by
//! [`ConfigRecord::for_each_field`], so field order and widths exist in one
//! place only. Decoding is all-or-nothing; encoding is total and always
//! yields exactly [`CONFIG_RECORD_LEN`] bytes.

use std::convert::Infallible;

use log::debug;
use thiserror::Error;

use crate::cursor::{ByteCursor, ByteWriter, CursorError};
use crate::legacy::layout::CONFIG_RECORD_LEN;
use crate::legacy::record::{ConfigRecord, FieldVisitor};

/// Errors raised while decoding or validating a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The source ended inside a field; the offset is where the incomplete
    /// field began. No partial record is produced.
    #[error("record truncated at offset {offset}")]
    Truncated { offset: usize },

    /// A field holds more data than its on-disk slot. Raised only by
    /// [`ConfigRecord::validate`]; encoding truncates instead.
    #[error("field {field} holds {len} chars but its slot is {width} bytes")]
    FieldTooLong {
        field: &'static str,
        width: usize,
        len: usize,
    },

    /// A string field holds a character its single-byte on-disk form does
    /// not carry back: an interior NUL reads back as the terminator, and
    /// anything above U+00FF is written as `?`. Raised only by
    /// [`ConfigRecord::validate`]; encoding stays total.
    #[error("field {field} contains {ch:?}, which cannot be stored in a single-byte string")]
    UnencodableChar { field: &'static str, ch: char },
}

impl From<CursorError> for CodecError {
    fn from(e: CursorError) -> Self {
        match e {
            CursorError::UnexpectedEndOfData { offset } => CodecError::Truncated { offset },
        }
    }
}

/// Fills record fields from a cursor.
struct RecordReader<'a> {
    cur: ByteCursor<'a>,
}

impl FieldVisitor for RecordReader<'_> {
    type Error = CursorError;

    fn visit_u8(&mut self, _name: &'static str, value: &mut u8) -> Result<(), CursorError> {
        *value = self.cur.read_u8()?;
        Ok(())
    }

    fn visit_u16(&mut self, _name: &'static str, value: &mut u16) -> Result<(), CursorError> {
        *value = self.cur.read_u16_le()?;
        Ok(())
    }

    fn visit_i16(&mut self, _name: &'static str, value: &mut i16) -> Result<(), CursorError> {
        *value = self.cur.read_i16_le()?;
        Ok(())
    }

    fn visit_i32(&mut self, _name: &'static str, value: &mut i32) -> Result<(), CursorError> {
        *value = self.cur.read_i32_le()?;
        Ok(())
    }

    fn visit_f32(&mut self, _name: &'static str, value: &mut f32) -> Result<(), CursorError> {
        *value = self.cur.read_f32_le()?;
        Ok(())
    }

    fn visit_string(
        &mut self,
        _name: &'static str,
        width: usize,
        value: &mut String,
    ) -> Result<(), CursorError> {
        *value = self.cur.read_fixed_string(width)?;
        Ok(())
    }

    fn visit_raw(
        &mut self,
        _name: &'static str,
        width: usize,
        value: &mut Vec<u8>,
    ) -> Result<(), CursorError> {
        *value = self.cur.read_raw(width)?;
        Ok(())
    }
}

/// Streams record fields into a writer. Writes cannot fail.
struct RecordWriter {
    out: ByteWriter,
}

impl FieldVisitor for RecordWriter {
    type Error = Infallible;

    fn visit_u8(&mut self, _name: &'static str, value: &mut u8) -> Result<(), Infallible> {
        self.out.write_u8(*value);
        Ok(())
    }

    fn visit_u16(&mut self, _name: &'static str, value: &mut u16) -> Result<(), Infallible> {
        self.out.write_u16_le(*value);
        Ok(())
    }

    fn visit_i16(&mut self, _name: &'static str, value: &mut i16) -> Result<(), Infallible> {
        self.out.write_i16_le(*value);
        Ok(())
    }

    fn visit_i32(&mut self, _name: &'static str, value: &mut i32) -> Result<(), Infallible> {
        self.out.write_i32_le(*value);
        Ok(())
    }

    fn visit_f32(&mut self, _name: &'static str, value: &mut f32) -> Result<(), Infallible> {
        self.out.write_f32_le(*value);
        Ok(())
    }

    fn visit_string(
        &mut self,
        _name: &'static str,
        width: usize,
        value: &mut String,
    ) -> Result<(), Infallible> {
        self.out.write_fixed_string(value, width);
        Ok(())
    }

    fn visit_raw(
        &mut self,
        _name: &'static str,
        width: usize,
        value: &mut Vec<u8>,
    ) -> Result<(), Infallible> {
        self.out.write_raw(value, width);
        Ok(())
    }
}

/// Reports the first field whose value would not survive encoding.
struct WidthCheck;

impl FieldVisitor for WidthCheck {
    type Error = CodecError;

    fn visit_u8(&mut self, _name: &'static str, _value: &mut u8) -> Result<(), CodecError> {
        Ok(())
    }

    fn visit_u16(&mut self, _name: &'static str, _value: &mut u16) -> Result<(), CodecError> {
        Ok(())
    }

    fn visit_i16(&mut self, _name: &'static str, _value: &mut i16) -> Result<(), CodecError> {
        Ok(())
    }

    fn visit_i32(&mut self, _name: &'static str, _value: &mut i32) -> Result<(), CodecError> {
        Ok(())
    }

    fn visit_f32(&mut self, _name: &'static str, _value: &mut f32) -> Result<(), CodecError> {
        Ok(())
    }

    fn visit_string(
        &mut self,
        name: &'static str,
        width: usize,
        value: &mut String,
    ) -> Result<(), CodecError> {
        // One encoded byte per char, so char count is the on-disk length.
        let len = value.chars().count();
        if len > width {
            return Err(CodecError::FieldTooLong {
                field: name,
                width,
                len,
            });
        }
        // An interior NUL or anything above U+00FF encodes, but decodes
        // back as something else.
        if let Some(ch) = value.chars().find(|&ch| ch == '\0' || (ch as u32) > 0xFF) {
            return Err(CodecError::UnencodableChar { field: name, ch });
        }
        Ok(())
    }

    fn visit_raw(
        &mut self,
        name: &'static str,
        width: usize,
        value: &mut Vec<u8>,
    ) -> Result<(), CodecError> {
        if value.len() > width {
            return Err(CodecError::FieldTooLong {
                field: name,
                width,
                len: value.len(),
            });
        }
        Ok(())
    }
}

impl ConfigRecord {
    /// Decodes a record from the first [`CONFIG_RECORD_LEN`] bytes of
    /// `source`.
    ///
    /// All-or-nothing: the first short read aborts with
    /// [`CodecError::Truncated`] carrying the offset where the incomplete
    /// field began, and no partial record is returned. Trailing bytes past
    /// the record are ignored; rejecting oversized files is the file
    /// store's job.
    pub fn decode(source: &[u8]) -> Result<Self, CodecError> {
        let mut reader = RecordReader {
            cur: ByteCursor::new(source),
        };
        let mut rec = ConfigRecord::default();
        rec.for_each_field(&mut reader)?;
        debug_assert_eq!(reader.cur.position(), CONFIG_RECORD_LEN);
        debug!("decoded configuration record, {} bytes", reader.cur.position());
        Ok(rec)
    }

    /// Encodes the record into exactly [`CONFIG_RECORD_LEN`] bytes.
    ///
    /// Never fails: strings longer than their slot are truncated, characters
    /// above U+00FF become `?`, and short raw regions are zero-filled.
    /// Callers that must not lose data run [`validate`](Self::validate)
    /// first.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = RecordWriter {
            out: ByteWriter::with_capacity(CONFIG_RECORD_LEN),
        };
        // The field walk is mutable so one table can serve both directions;
        // encoding only reads, so it runs over a scratch copy.
        let mut scratch = self.clone();
        match scratch.for_each_field(&mut writer) {
            Ok(()) => {}
            Err(e) => match e {},
        }
        let bytes = writer.out.into_bytes();
        debug_assert_eq!(bytes.len(), CONFIG_RECORD_LEN);
        bytes
    }

    /// Checks that every field encodes without loss: strings must fit
    /// their on-disk slot ([`CodecError::FieldTooLong`]) and hold only
    /// characters that survive the single-byte form
    /// ([`CodecError::UnencodableChar`]). A record that passes round-trips
    /// through [`encode`](Self::encode) and [`decode`](Self::decode)
    /// exactly.
    pub fn validate(&self) -> Result<(), CodecError> {
        self.clone().for_each_field(&mut WidthCheck)
    }

    /// Encoded length of the record in bytes.
    pub const fn record_len() -> usize {
        CONFIG_RECORD_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sums the on-disk width of every visited field.
    struct SizeTally {
        total: usize,
    }

    impl FieldVisitor for SizeTally {
        type Error = Infallible;

        fn visit_u8(&mut self, _name: &'static str, _value: &mut u8) -> Result<(), Infallible> {
            self.total += 1;
            Ok(())
        }

        fn visit_u16(&mut self, _name: &'static str, _value: &mut u16) -> Result<(), Infallible> {
            self.total += 2;
            Ok(())
        }

        fn visit_i16(&mut self, _name: &'static str, _value: &mut i16) -> Result<(), Infallible> {
            self.total += 2;
            Ok(())
        }

        fn visit_i32(&mut self, _name: &'static str, _value: &mut i32) -> Result<(), Infallible> {
            self.total += 4;
            Ok(())
        }

        fn visit_f32(&mut self, _name: &'static str, _value: &mut f32) -> Result<(), Infallible> {
            self.total += 4;
            Ok(())
        }

        fn visit_string(
            &mut self,
            _name: &'static str,
            width: usize,
            _value: &mut String,
        ) -> Result<(), Infallible> {
            self.total += width;
            Ok(())
        }

        fn visit_raw(
            &mut self,
            _name: &'static str,
            width: usize,
            _value: &mut Vec<u8>,
        ) -> Result<(), Infallible> {
            self.total += width;
            Ok(())
        }
    }

    #[test]
    fn field_table_widths_sum_to_the_record_length() {
        let mut tally = SizeTally { total: 0 };
        let mut rec = ConfigRecord::default();
        match rec.for_each_field(&mut tally) {
            Ok(()) => {}
            Err(e) => match e {},
        }
        assert_eq!(tally.total, CONFIG_RECORD_LEN);
    }

    #[test]
    fn default_record_encodes_to_all_zero_bytes() {
        let bytes = ConfigRecord::default().encode();
        assert_eq!(bytes.len(), CONFIG_RECORD_LEN);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn all_zero_source_decodes_cleanly() {
        let rec = ConfigRecord::decode(&vec![0u8; CONFIG_RECORD_LEN]).unwrap();
        assert_eq!(rec, ConfigRecord::default());
    }

    #[test]
    fn decode_rejects_empty_source_at_offset_zero() {
        let err = ConfigRecord::decode(&[]).unwrap_err();
        assert_eq!(err, CodecError::Truncated { offset: 0 });
    }

    #[test]
    fn decode_reports_the_start_of_the_incomplete_field() {
        // 30 bytes covers new_user_password (21) but not system_password.
        let err = ConfigRecord::decode(&vec![0u8; 30]).unwrap_err();
        assert_eq!(err, CodecError::Truncated { offset: 21 });
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut source = vec![0u8; CONFIG_RECORD_LEN + 64];
        source[CONFIG_RECORD_LEN..].fill(0xAA);
        let rec = ConfigRecord::decode(&source).unwrap();
        assert_eq!(rec, ConfigRecord::default());
    }

    #[test]
    fn round_trip_preserves_edited_fields() {
        let mut rec = ConfigRecord::default();
        rec.system_name = "Amber Shores BBS".to_string();
        rec.system_number = 5283;
        rec.new_user_gold = 100.0;
        rec.sl[200].ability = 0x30;
        rec.autoval[3].restrict = 0x0404;
        rec.arcs[1].extension = "LZH".to_string();
        rec.user_rec_len = 1024;
        rec.reserved[399] = 7;
        let back = ConfigRecord::decode(&rec.encode()).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn validate_flags_an_overlong_field_by_name() {
        let mut rec = ConfigRecord::default();
        rec.system_phone = "1-800-555-0199".to_string();
        let err = rec.validate().unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldTooLong {
                field: "system_phone",
                width: 13,
                len: 14,
            }
        );
    }

    #[test]
    fn validate_accepts_a_field_exactly_at_width() {
        let mut rec = ConfigRecord::default();
        rec.system_phone = "212-555-0134!".to_string();
        assert_eq!(rec.system_phone.len(), 13);
        rec.validate().unwrap();
        // Width-exact fields round-trip with no terminator byte.
        let back = ConfigRecord::decode(&rec.encode()).unwrap();
        assert_eq!(back.system_phone, rec.system_phone);
    }

    #[test]
    fn encode_truncates_what_validate_rejects() {
        let mut rec = ConfigRecord::default();
        rec.modem_type = "HAYES12345".to_string();
        assert!(rec.validate().is_err());
        let back = ConfigRecord::decode(&rec.encode()).unwrap();
        assert_eq!(back.modem_type, "HAYES1234");
    }

    #[test]
    fn validate_rejects_an_interior_nul() {
        let mut rec = ConfigRecord::default();
        rec.system_name = "AB\0CD".to_string();
        let err = rec.validate().unwrap_err();
        assert_eq!(
            err,
            CodecError::UnencodableChar {
                field: "system_name",
                ch: '\0',
            }
        );
        // Encoding stays total; the NUL reads back as the terminator.
        let back = ConfigRecord::decode(&rec.encode()).unwrap();
        assert_eq!(back.system_name, "AB");
    }

    #[test]
    fn validate_rejects_chars_above_the_single_byte_range() {
        let mut rec = ConfigRecord::default();
        rec.sysop_name = "\u{1F4BE} disk".to_string();
        let err = rec.validate().unwrap_err();
        assert_eq!(
            err,
            CodecError::UnencodableChar {
                field: "sysop_name",
                ch: '\u{1F4BE}',
            }
        );
        // Encoding stays total; the char reads back as the replacement.
        let back = ConfigRecord::decode(&rec.encode()).unwrap();
        assert_eq!(back.sysop_name, "? disk");
    }

    #[test]
    fn validate_accepts_latin1_text_that_round_trips() {
        let mut rec = ConfigRecord::default();
        rec.system_name = "Caf\u{e9} R\u{fc}cksto\u{df}".to_string();
        rec.validate().unwrap();
        let back = ConfigRecord::decode(&rec.encode()).unwrap();
        assert_eq!(back.system_name, rec.system_name);
    }

    #[test]
    fn validate_flags_an_oversized_reserved_region() {
        let mut rec = ConfigRecord::default();
        rec.reserved = vec![0; 401];
        let err = rec.validate().unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldTooLong {
                field: "reserved",
                width: 400,
                len: 401,
            }
        );
    }
}
