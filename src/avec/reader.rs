//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    header::{Timestamp, TimestampError},
    io::{TierCount, TierCountAlt, TierInner},
};

use super::{FromRecord, FromRecords};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Invalid record timestamp.
    #[error("Invalid record timestamp: {0}")]
    Timestamp(#[from] TimestampError),
}

/// Decode records from a reader of a frame, publishing to a receiver.
///
/// The reader is left positioned after the final record, ready for whatever
/// the transport carries next. On failure, records already published remain
/// with the receiver.
///
/// This method is also re-exported as `tachograph::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromRecords) -> Result<(), Error> {
    let ((codec_id, record_count), mut state) = Decoder::advance(take(r, None)?);

    o.add_header(codec_id, record_count);

    // Buffer of element group bytes, re-read when publishing.
    let d = &mut Vec::new();

    for _ in 0..record_count {
        state = decode_record(state, r, d, o)?;
    }

    Ok(())
}

fn decode_record(
    state: Timestamp,
    r: &mut impl Read,
    d: &mut Vec<u8>,
    o: &mut impl FromRecords,
) -> Result<Timestamp, Error> {
    let (time, state) = state.advance(take(r, None)?)?;
    let (priority, state) = state.advance(take(r, None)?);
    let (fix, state) = state.advance(take(r, None)?);
    let ((event, declared), (state, state_alt)) = state.advance(take(r, None)?);

    d.clear();

    // First pass: pull and count the element groups before publishing.
    let n = &mut 0;

    let state = count_tier(state, r, d, n)?;
    let state = count_tier(state, r, d, n)?;
    let state = count_tier(state, r, d, n)?;
    let state = count_tier(state, r, d, n)?;

    // Shadow the frame receiver with that of a single record.
    let mut o = o.add_record();

    if let Some(o) = &mut o {
        o.add_timestamp(time);
        o.add_priority(priority);
        o.add_gps(fix);
        o.add_event(event);
        o.add_io_total(declared);
    }

    let d = &mut d.as_slice();

    let state_alt = publish_tier(state_alt, d, o.as_deref_mut(), FromRecord::add_u8)?;
    let state_alt = publish_tier(state_alt, d, o.as_deref_mut(), FromRecord::add_u16)?;
    let state_alt = publish_tier(state_alt, d, o.as_deref_mut(), FromRecord::add_u32)?;
    publish_tier(state_alt, d, o.as_deref_mut(), FromRecord::add_u64)?;

    if *n != u16::from(declared) {
        if let Some(o) = &mut o {
            o.io_count_mismatch(declared, *n);
        }
    }

    Ok(state)
}

fn count_tier<T, const N: usize>(
    state: TierCount<T>,
    r: &mut impl Read,
    d: &mut Vec<u8>,
    n: &mut u16,
) -> Result<T::Next, Error>
where
    T: TierInner<From = [u8; N]>,
{
    let mut state = match state.advance(take(r, Some(d))?) {
        Left(state) => state,
        Right(successor) => return Ok(successor),
    };

    loop {
        *n += 1;

        state = match state.advance(take(r, Some(d))?) {
            Left(state) => state,
            Right(successor) => return Ok(successor),
        };
    }
}

fn publish_tier<T, O, const N: usize>(
    state: TierCountAlt<T>,
    d: &mut impl Read,

    mut o: Option<&mut O>,
    add: fn(&mut O, u8, T::Value),
) -> Result<T::NextAlt, Error>
where
    T: TierInner<From = [u8; N]>,
    O: FromRecord + ?Sized,
{
    let mut state = match state.advance(take(d, None)?) {
        Left(state) => state,
        Right(successor) => return Ok(successor),
    };

    loop {
        let ((id, value), successor) = state.advance(take(d, None)?);

        if let Some(o) = &mut o {
            add(o, id, value);
        }

        state = match successor {
            Left(state) => state,
            Right(successor) => return Ok(successor),
        };
    }
}

/// Take an exact number of bytes from a reader, optionally copying them into
/// a buffer for a later pass.
fn take<const N: usize>(r: &mut impl Read, d: Option<&mut Vec<u8>>) -> Result<[u8; N], Error> {
    let mut buf = [0; N];
    r.read_exact(&mut buf)?;

    if let Some(d) = d {
        d.extend_from_slice(&buf);
    }

    Ok(buf)
}
