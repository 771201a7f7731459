//! Exhaustive truncated-decode tests: every short length reports the field it cut.

use std::convert::Infallible;

use wwivcfg::legacy::layout::{
    ARCS_OFFSET, AUTOVAL_OFFSET, CONFIG_RECORD_LEN, RESERVED_OFFSET, SL_TABLE_OFFSET,
};
use wwivcfg::legacy::{CodecError, ConfigRecord, FieldVisitor};

/// Records the byte span of every primitive field, in on-disk order.
struct Boundaries {
    pos: usize,
    spans: Vec<(usize, usize)>,
}

impl Boundaries {
    fn claim(&mut self, width: usize) {
        self.spans.push((self.pos, width));
        self.pos += width;
    }
}

impl FieldVisitor for Boundaries {
    type Error = Infallible;

    fn visit_u8(&mut self, _: &'static str, _: &mut u8) -> Result<(), Infallible> {
        self.claim(1);
        Ok(())
    }

    fn visit_u16(&mut self, _: &'static str, _: &mut u16) -> Result<(), Infallible> {
        self.claim(2);
        Ok(())
    }

    fn visit_i16(&mut self, _: &'static str, _: &mut i16) -> Result<(), Infallible> {
        self.claim(2);
        Ok(())
    }

    fn visit_i32(&mut self, _: &'static str, _: &mut i32) -> Result<(), Infallible> {
        self.claim(4);
        Ok(())
    }

    fn visit_f32(&mut self, _: &'static str, _: &mut f32) -> Result<(), Infallible> {
        self.claim(4);
        Ok(())
    }

    fn visit_string(&mut self, _: &'static str, width: usize, _: &mut String) -> Result<(), Infallible> {
        self.claim(width);
        Ok(())
    }

    fn visit_raw(&mut self, _: &'static str, width: usize, _: &mut Vec<u8>) -> Result<(), Infallible> {
        self.claim(width);
        Ok(())
    }
}

fn field_spans() -> Vec<(usize, usize)> {
    let mut bounds = Boundaries {
        pos: 0,
        spans: Vec::new(),
    };
    let mut rec = ConfigRecord::default();
    match rec.for_each_field(&mut bounds) {
        Ok(()) => {}
        Err(e) => match e {},
    }
    assert_eq!(bounds.pos, CONFIG_RECORD_LEN, "spans must tile the record");
    bounds.spans
}

#[test]
fn test_every_short_length_reports_the_cut_field_start() {
    // For each byte position, the start of the field that owns it. A source
    // of length len is missing byte len first, so decode must fail at the
    // owning field's start.
    let mut owner = vec![0usize; CONFIG_RECORD_LEN];
    for (start, width) in field_spans() {
        for pos in start..start + width {
            owner[pos] = start;
        }
    }

    let full = vec![0u8; CONFIG_RECORD_LEN];
    for len in 0..CONFIG_RECORD_LEN {
        let err = ConfigRecord::decode(&full[..len]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated { offset: owner[len] },
            "source length {len}"
        );
    }
    ConfigRecord::decode(&full).unwrap();
}

#[test]
fn test_spans_are_contiguous_and_start_where_documented() {
    let spans = field_spans();
    let mut expected_start = 0;
    for (start, width) in &spans {
        assert_eq!(*start, expected_start, "gap before offset {start}");
        expected_start = start + width;
    }
    assert_eq!(expected_start, CONFIG_RECORD_LEN);

    let starts: Vec<usize> = spans.iter().map(|(s, _)| *s).collect();
    for documented in [SL_TABLE_OFFSET, AUTOVAL_OFFSET, ARCS_OFFSET, RESERVED_OFFSET] {
        assert!(
            starts.contains(&documented),
            "no field starts at offset {documented}"
        );
    }
}

#[test]
fn test_truncation_inside_the_level_table_points_into_it() {
    // One byte into the 40th level leaves its first field, a two-byte
    // count, incomplete at a known offset.
    let level_start = SL_TABLE_OFFSET + 40 * 14;
    let err = ConfigRecord::decode(&vec![0u8; level_start + 1]).unwrap_err();
    assert_eq!(err, CodecError::Truncated { offset: level_start });
}

#[test]
fn test_one_byte_short_fails_inside_the_reserved_tail() {
    let err = ConfigRecord::decode(&vec![0u8; CONFIG_RECORD_LEN - 1]).unwrap_err();
    assert_eq!(
        err,
        CodecError::Truncated {
            offset: RESERVED_OFFSET
        }
    );
}
