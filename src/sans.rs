//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a zero-size, non-copy token. Once enough
//! bytes are ready, transition to another state by calling the token's
//! `advance` method. This will return a successor state token, along with any
//! extracted data.
//!
//! A frame opens with a two-byte header naming the wire-format variant and
//! the number of records that follow. Each record then runs through a fixed
//! sequence of states: timestamp, priority, positioning fix, and the element
//! section. The element section carries four tiers of identifier/value
//! groups, distinguished only by position, in widening value widths; each
//! tier prefixes its groups with a count. The final tier hands back the
//! timestamp token for the next record.
//!
//! When decoding the element section, the finite-state machine performs a
//! second, interwoven pass over the group bytes. The first pass bounds and
//! counts a record's groups; the `Alt`-suffixed states then re-read the same
//! bytes to extract values. This keeps partially decoded records away from
//! receivers when a frame is cut short: a record is only published once its
//! bytes are known to be present. The bytes used to advance a sequence of
//! `Alt`-suffixed states must match those used to advance through their
//! first-pass counterparts.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! This architecture enables the compiler and type system to guide
//! applications toward a correct implementation. However, some areas of the
//! decoding process are not represented in the finite-state machine and must
//! be carefully written:
//!
//! - Reading bytes from the correct place in the frame, including buffering
//! or seeking as necessary.
//!
//! - Ending decoding once the number of records named by the frame header
//! have been read.
//!
//! - Comparing the element total declared by a record against the count of
//! groups actually decoded, and surfacing any disagreement.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod gps;
pub mod header;
pub mod io;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::FrameHeader;
