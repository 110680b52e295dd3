//! Owned frame model and decoder implementation.
//!
//! _Requires Cargo feature `std`._

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::sans::gps::GpsFix;

use super::{FromRecord, FromRecords, slice};

extern crate std;

use std::vec::Vec;

/// A fully decoded telemetry frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    /// Identifier of the wire-format variant, passed through uninterpreted.
    pub codec_id: u8,
    /// Number of records declared by the frame header.
    pub record_count: u8,
    /// Decoded records, in frame order.
    pub records: Vec<Record>,
    /// Bytes left unconsumed at the tail of the slice.
    ///
    /// A well-formed frame is consumed exactly. Trackers commonly append a
    /// redundant copy of the record count after the final record; it is left
    /// here, along with anything else the transport delivered, for the caller
    /// to judge.
    pub trailing: usize,
}

impl Frame {
    /// Decode a frame from a slice into an owned value.
    ///
    /// On failure, records completed before the failure are returned inside
    /// the error, for callers able to use a partial frame.
    pub fn decode(r: &[u8]) -> Result<Self, Incomplete> {
        let mut frame = Self::default();

        match slice::decode(r, &mut frame) {
            Ok(consumed) => {
                frame.trailing = r.len() - consumed;
                Ok(frame)
            }
            Err(error) => Err(Incomplete {
                partial: frame,
                error,
            }),
        }
    }
}

impl FromRecords for Frame {
    fn add_header(&mut self, codec_id: u8, record_count: u8) {
        self.codec_id = codec_id;
        self.record_count = record_count;
        self.records.reserve(record_count as usize);
    }

    fn add_record(&mut self) -> Option<&mut dyn FromRecord> {
        self.records.push(Record::default());
        self.records.last_mut().map(|r| r as _)
    }
}

/// One telemetry record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    /// Moment the record was sampled.
    pub timestamp: DateTime<Utc>,
    /// Priority flag, passed through uninterpreted.
    pub priority: u8,
    /// Positioning fix.
    pub gps: GpsFix,
    /// Element section.
    pub io: IoSection,
}

impl FromRecord for Record {
    fn add_timestamp(&mut self, time: DateTime<Utc>) {
        self.timestamp = time;
    }

    fn add_priority(&mut self, priority: u8) {
        self.priority = priority;
    }

    fn add_gps(&mut self, fix: GpsFix) {
        self.gps = fix;
    }

    fn add_event(&mut self, id: u8) {
        self.io.event_id = id;
    }

    fn add_io_total(&mut self, declared: u8) {
        self.io.declared = declared;
    }

    fn add_u8(&mut self, id: u8, value: u8) {
        self.io.one_byte.push((id, value));
    }

    fn add_u16(&mut self, id: u8, value: u16) {
        self.io.two_byte.push((id, value));
    }

    fn add_u32(&mut self, id: u8, value: u32) {
        self.io.four_byte.push((id, value));
    }

    fn add_u64(&mut self, id: u8, value: u64) {
        self.io.eight_byte.push((id, value));
    }

    fn io_count_mismatch(&mut self, declared: u8, counted: u16) {
        self.io.mismatch = Some(IoCountMismatch { declared, counted });
    }
}

/// The elements of a record, grouped by value width.
///
/// Element sequences preserve frame order, and identifiers may repeat; the
/// order a device reports values in is meaningful.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IoSection {
    /// Identifier of the element triggering the record, zero on periodic
    /// records.
    pub event_id: u8,
    /// Element total declared by the record.
    pub declared: u8,
    /// One-byte elements, in frame order.
    pub one_byte: Vec<(u8, u8)>,
    /// Two-byte elements, in frame order.
    pub two_byte: Vec<(u8, u16)>,
    /// Four-byte elements, in frame order.
    pub four_byte: Vec<(u8, u32)>,
    /// Eight-byte elements, in frame order.
    pub eight_byte: Vec<(u8, u64)>,
    /// Advisory raised when [`declared`](Self::declared) disagrees with the
    /// decoded element count.
    pub mismatch: Option<IoCountMismatch>,
}

impl IoSection {
    /// The number of elements decoded, across all tiers.
    pub fn counted(&self) -> u16 {
        (self.one_byte.len() + self.two_byte.len() + self.four_byte.len() + self.eight_byte.len())
            as u16
    }
}

/// Advisory raised when a record's declared element total disagrees with the
/// decoded count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Declared ({declared}) and counted ({counted}) element totals do not match.")]
pub struct IoCountMismatch {
    pub declared: u8,
    pub counted: u16,
}

/// A failed decode, carrying the records completed before the failure.
#[derive(Debug, Error)]
#[error("Decoding ended after {} of {} records: {error}", .partial.records.len(), .partial.record_count)]
pub struct Incomplete {
    /// The frame as decoded up to the failure. Only complete records appear.
    pub partial: Frame,
    /// The failure that ended decoding.
    #[source]
    pub error: slice::Error,
}
