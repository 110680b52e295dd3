//! States processing the frame header and leading record fields.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::gps::Gps;

/// State token to decode a frame header.
#[derive(Debug)]
pub struct FrameHeader;

impl FrameHeader {
    /// Transition to another state by decoding a frame header.
    ///
    /// Returns the codec identifier and the number of records in this frame,
    /// and a successor state token. The codec identifier is passed through
    /// uninterpreted.
    pub fn advance(r: [u8; 2]) -> ((u8, u8), Timestamp) {
        ((r[0], r[1]), Timestamp(()))
    }
}

/// An error advancing over a record timestamp.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// Epoch value not representable as an instant.
    #[error("Timestamp ({0} ms) is outside the representable range.")]
    OutOfRange(u64),
}

/// State token to decode a record timestamp.
#[derive(Debug)]
pub struct Timestamp(pub(super) ());

impl Timestamp {
    /// Transition to another state by decoding a record timestamp.
    ///
    /// Interprets the bytes as a big-endian millisecond Unix epoch value.
    /// Returns the corresponding instant and a successor state token. Epoch
    /// values the instant type cannot hold are an error, never saturated.
    pub fn advance(
        self,
        r: [u8; 8],
    ) -> Result<(DateTime<Utc>, Priority), TimestampError> {
        let millis = u64::from_be_bytes(r);

        let time = i64::try_from(millis)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or(TimestampError::OutOfRange(millis))?;

        Ok((time, Priority(())))
    }
}

/// State token to decode a record priority.
#[derive(Debug)]
pub struct Priority(pub(super) ());

impl Priority {
    /// Transition to another state by decoding a record priority.
    ///
    /// Returns the priority, passed through uninterpreted, and a successor
    /// state token.
    pub fn advance(self, r: [u8; 1]) -> (u8, Gps) {
        (r[0], Gps(()))
    }
}
