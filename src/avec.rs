//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding records from frames
//! arriving as slices and readers, publishing to the [`FromRecords`] and
//! [`FromRecord`] traits.
//!
//! Applications wanting the whole frame as a value should use the owned model
//! in [`frame`]. Those picking out a handful of elements (especially on
//! constrained targets) can derive a receiver instead. See the
//! [`FromRecords`](macro@FromRecords) and [`FromRecord`](macro@FromRecord)
//! macros for details.

use chrono::{DateTime, Utc};

use crate::sans::gps::GpsFix;

#[cfg(feature = "std")]
pub mod frame;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

/// Derive [`FromRecords`] for a struct holding a collection of records.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// Add the `record` attribute to a `Vec<T>` struct field, where `T` is a type
/// implementing [`FromRecord`] and [`Default`], to collect every record in a
/// frame. To keep only the latest record, apply the attribute to an
/// `Option<T>` field instead; records received earlier are overwritten.
///
/// ```
/// #[derive(Debug, Default, FromRecords)]
/// struct Journey {
///     #[record]
///     positions: Vec<Position>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use tachograph_derive::FromRecords;

/// Produce record receivers for a frame.
///
/// See the [`FromRecords`](macro@FromRecords) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromRecords {
    /// Receive the frame header.
    ///
    /// The default implementation ignores the received values.
    fn add_header(&mut self, codec_id: u8, record_count: u8) {}

    /// Retrieve a receiver for the next record, if one is wanted.
    ///
    /// Returning `None` skips the record; the decoder still advances over its
    /// bytes.
    fn add_record(&mut self) -> Option<&mut dyn FromRecord>;
}

/// Derive [`FromRecord`] for a struct representing a single record.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a single value for an element, add the `io(N)` attribute to an
/// `Option<T>` struct field, where `N` is the element identifier and `T` is
/// the primitive for the tier it arrives in. Additional values received for
/// the same identifier will replace earlier ones.
///
/// To receive the fixed leading fields of a record, supply `timestamp`,
/// `priority`, `gps`, or `event` in place of an identifier.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct Position {
///     #[io(timestamp)]
///     timestamp: Option<DateTime<Utc>>,
///     #[io(gps)]
///     fix: Option<GpsFix>,
///     #[io(21)]
///     signal_strength: Option<u8>,
///     #[io(66)]
///     external_voltage: Option<u16>,
/// }
/// ```
///
/// Rather than decoding directly into domain types, it's recommended to store
/// the received primitives and process them afterward in an accessor.
///
/// ```
/// impl Position {
///     fn external_voltage(&self) -> Option<f32> {
///         // Convert from the stored millivolts to volts.
///         self.external_voltage.map(|mv| mv as f32 / 1000.0)
///     }
/// }
/// ```
///
/// Identifiers are not required to be unique within a record. To receive
/// every occurrence, supply an accumulator closure. Since the element type
/// cannot be inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct Geofences {
///     #[io(155, |v, z: u8| v.push(z))]
///     zones: Vec<u8>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use tachograph_derive::FromRecord;

/// Receive field values for a record.
///
/// The leading fields of a record are published first, in frame order, then
/// each element in its tier's sequence. Elements are published item-by-item;
/// identifiers repeat when the device reports a value more than once.
///
/// The default implementation of each method ignores received values.
///
/// See the [`FromRecord`](macro@FromRecord) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromRecord {
    /// Add the sampling instant to the record.
    fn add_timestamp(&mut self, time: DateTime<Utc>) {}
    /// Add the priority flag to the record.
    fn add_priority(&mut self, priority: u8) {}
    /// Add the positioning fix to the record.
    fn add_gps(&mut self, fix: GpsFix) {}
    /// Add the identifier of the element triggering the record, if any.
    fn add_event(&mut self, id: u8) {}
    /// Add the element total declared by the record.
    fn add_io_total(&mut self, declared: u8) {}

    /// Add a `u8` for an element to the record.
    fn add_u8(&mut self, id: u8, value: u8) {}
    /// Add a `u16` for an element to the record.
    fn add_u16(&mut self, id: u8, value: u16) {}
    /// Add a `u32` for an element to the record.
    fn add_u32(&mut self, id: u8, value: u32) {}
    /// Add a `u64` for an element to the record.
    fn add_u64(&mut self, id: u8, value: u64) {}

    /// Note a disagreement between the declared and decoded element totals.
    ///
    /// The declared total is informational: group counts are carried per
    /// tier, so decoding is unaffected by the disagreement.
    fn io_count_mismatch(&mut self, declared: u8, counted: u16) {}
}
