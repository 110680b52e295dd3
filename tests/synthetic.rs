#![cfg(feature = "std")]

use tachograph::avec::frame::{Frame, IoCountMismatch};
use tachograph::avec::slice::Error;
use tachograph::sans::header::TimestampError;

/// Assemble a frame from encoded records.
fn frame(codec_id: u8, records: &[Vec<u8>]) -> Vec<u8> {
    let mut r = vec![codec_id, records.len() as u8];
    for record in records {
        r.extend_from_slice(record);
    }
    r
}

/// Encode a single record.
struct RecordBytes {
    millis: u64,
    priority: u8,
    gps: [u8; 15],
    event: u8,
    declared: u8,
    one: Vec<(u8, u8)>,
    two: Vec<(u8, u16)>,
    four: Vec<(u8, u32)>,
    eight: Vec<(u8, u64)>,
}

impl Default for RecordBytes {
    fn default() -> Self {
        Self {
            millis: 1_185_345_998_335,
            priority: 0,
            gps: [0; 15],
            event: 0,
            declared: 0,
            one: vec![],
            two: vec![],
            four: vec![],
            eight: vec![],
        }
    }
}

impl RecordBytes {
    fn encode(&self) -> Vec<u8> {
        let mut r = self.millis.to_be_bytes().to_vec();
        r.push(self.priority);
        r.extend_from_slice(&self.gps);
        r.push(self.event);
        r.push(self.declared);

        r.push(self.one.len() as u8);
        for (id, value) in &self.one {
            r.push(*id);
            r.push(*value);
        }
        r.push(self.two.len() as u8);
        for (id, value) in &self.two {
            r.push(*id);
            r.extend_from_slice(&value.to_be_bytes());
        }
        r.push(self.four.len() as u8);
        for (id, value) in &self.four {
            r.push(*id);
            r.extend_from_slice(&value.to_be_bytes());
        }
        r.push(self.eight.len() as u8);
        for (id, value) in &self.eight {
            r.push(*id);
            r.extend_from_slice(&value.to_be_bytes());
        }

        r
    }
}

#[test]
fn element_order_is_preserved() {
    let record = RecordBytes {
        declared: 2,
        one: vec![(1, 10), (2, 20)],
        ..Default::default()
    };
    let data = frame(0x08, &[record.encode()]);

    let frame = Frame::decode(&data).unwrap();

    assert_eq!(frame.trailing, 0);
    assert_eq!(frame.records[0].io.one_byte, vec![(1, 10), (2, 20)]);
    assert_eq!(frame.records[0].io.mismatch, None);
}

#[test]
fn repeated_identifiers_are_preserved() {
    let record = RecordBytes {
        declared: 3,
        one: vec![(21, 1), (21, 2)],
        two: vec![(21, 500)],
        ..Default::default()
    };
    let data = frame(0x08, &[record.encode()]);

    let frame = Frame::decode(&data).unwrap();

    assert_eq!(frame.records[0].io.one_byte, vec![(21, 1), (21, 2)]);
    assert_eq!(frame.records[0].io.two_byte, vec![(21, 500)]);
}

#[test]
fn empty_tiers_cost_one_byte_each() {
    let record = RecordBytes::default();
    let encoded = record.encode();

    // Leading fields, the section header, and four bare tier counts.
    assert_eq!(encoded.len(), 8 + 1 + 15 + 2 + 4);

    let data = frame(0x08, &[encoded]);
    let frame = Frame::decode(&data).unwrap();

    assert_eq!(frame.trailing, 0);

    let io = &frame.records[0].io;
    assert_eq!(io.counted(), 0);
    assert!(io.one_byte.is_empty());
    assert!(io.two_byte.is_empty());
    assert!(io.four_byte.is_empty());
    assert!(io.eight_byte.is_empty());
}

#[test]
fn all_tiers_decode_big_endian() {
    let record = RecordBytes {
        declared: 4,
        one: vec![(239, 1)],
        two: vec![(66, 0x3039)],
        four: vec![(16, 0x0001_E240)],
        eight: vec![(78, 0x0123_4567_89AB_CDEF)],
        ..Default::default()
    };
    let data = frame(0x08, &[record.encode()]);

    let io = &Frame::decode(&data).unwrap().records[0].io;

    assert_eq!(io.one_byte, vec![(239, 1)]);
    assert_eq!(io.two_byte, vec![(66, 12345)]);
    assert_eq!(io.four_byte, vec![(16, 123_456)]);
    assert_eq!(io.eight_byte, vec![(78, 0x0123_4567_89AB_CDEF)]);
}

#[test]
fn declared_total_mismatch_is_advisory() {
    let record = RecordBytes {
        declared: 5,
        one: vec![(1, 1), (2, 2)],
        ..Default::default()
    };
    let data = frame(0x08, &[record.encode()]);

    let frame = Frame::decode(&data).unwrap();

    let io = &frame.records[0].io;
    assert_eq!(io.one_byte, vec![(1, 1), (2, 2)]);
    assert_eq!(
        io.mismatch,
        Some(IoCountMismatch {
            declared: 5,
            counted: 2,
        })
    );
}

#[test]
fn truncation_is_detected_everywhere() {
    let record = RecordBytes {
        declared: 2,
        one: vec![(1, 10)],
        eight: vec![(78, 7)],
        ..Default::default()
    };
    let data = frame(0x08, &[record.encode()]);

    for cut in 2..data.len() {
        let err = Frame::decode(&data[..cut]).unwrap_err();

        assert!(matches!(err.error, Error::Truncated { .. }));
        assert!(err.partial.records.is_empty());
    }
}

#[test]
fn truncation_reports_the_offset() {
    let record = RecordBytes::default();
    let data = frame(0x08, &[record.encode()]);

    // Cut inside the timestamp, which begins at offset 2.
    let err = Frame::decode(&data[..6]).unwrap_err();

    match err.error {
        Error::Truncated {
            at,
            needed,
            available,
        } => {
            assert_eq!(at, 2);
            assert_eq!(needed, 8);
            assert_eq!(available, 4);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn partial_frames_keep_complete_records() {
    let complete = RecordBytes {
        declared: 1,
        one: vec![(1, 10)],
        ..Default::default()
    };
    let cut_short = RecordBytes {
        declared: 1,
        four: vec![(70, 349)],
        ..Default::default()
    };
    let data = frame(0x08, &[complete.encode(), cut_short.encode()]);

    // Cut the second record's final tier count.
    let err = Frame::decode(&data[..data.len() - 1]).unwrap_err();

    assert!(matches!(err.error, Error::Truncated { .. }));
    assert_eq!(err.partial.record_count, 2);
    assert_eq!(err.partial.records.len(), 1);
    assert_eq!(err.partial.records[0].io.one_byte, vec![(1, 10)]);
}

#[test]
fn unrepresentable_timestamps_fail() {
    let record = RecordBytes {
        millis: u64::MAX,
        ..Default::default()
    };
    let data = frame(0x08, &[record.encode()]);

    let err = Frame::decode(&data).unwrap_err();

    assert!(matches!(
        err.error,
        Error::Timestamp(TimestampError::OutOfRange(u64::MAX))
    ));
    assert!(err.partial.records.is_empty());
}

#[test]
fn empty_frames_decode() {
    let data = frame(0x08, &[]);

    let frame = Frame::decode(&data).unwrap();

    assert_eq!(frame.codec_id, 0x08);
    assert_eq!(frame.record_count, 0);
    assert!(frame.records.is_empty());
    assert_eq!(frame.trailing, 0);
}

#[test]
fn trailing_bytes_are_surfaced() {
    let record = RecordBytes::default();
    let mut data = frame(0x08, &[record.encode()]);
    data.push(0x01);

    let frame = Frame::decode(&data).unwrap();

    assert_eq!(frame.records.len(), 1);
    assert_eq!(frame.trailing, 1);
}
