//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    header::{Timestamp, TimestampError},
    io::{TierCount, TierCountAlt, TierInner},
};

use super::{FromRecord, FromRecords};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// Unexpectedly reached the end of the slice.
    #[error("Unexpectedly reached the end of the slice at offset {at} (needed {needed}, found {available}).")]
    Truncated {
        at: usize,
        needed: usize,
        available: usize,
    },
    /// Invalid record timestamp.
    #[error("Invalid record timestamp: {0}")]
    Timestamp(#[from] TimestampError),
}

/// Decode records from a slice of a frame, publishing to a receiver.
///
/// Returns the number of bytes consumed. A well-formed frame is consumed
/// exactly; a shorter consumption leaves the remainder for the caller to
/// judge. On failure, records already published remain with the receiver.
///
/// This method is also re-exported as `tachograph::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromRecords) -> Result<usize, Error> {
    let i = &mut 0; // Counter of bytes read, used to read bytes from the tip.

    let ((codec_id, record_count), mut state) = Decoder::advance(take(r, i)?);

    o.add_header(codec_id, record_count);

    for _ in 0..record_count {
        state = decode_record(state, r, i, o)?;
    }

    Ok(*i)
}

fn decode_record(
    state: Timestamp,
    r: &[u8],
    i: &mut usize,
    o: &mut impl FromRecords,
) -> Result<Timestamp, Error> {
    let (time, state) = state.advance(take(r, i)?)?;
    let (priority, state) = state.advance(take(r, i)?);
    let (fix, state) = state.advance(take(r, i)?);
    let ((event, declared), (state, state_alt)) = state.advance(take(r, i)?);

    // Offset to the start of the element groups, re-read when publishing.
    let mut j = *i;

    // First pass: bound and count the element groups before publishing.
    let n = &mut 0;

    let state = count_tier(state, r, i, n)?;
    let state = count_tier(state, r, i, n)?;
    let state = count_tier(state, r, i, n)?;
    let state = count_tier(state, r, i, n)?;

    // Shadow the frame receiver with that of a single record.
    let mut o = o.add_record();

    if let Some(o) = &mut o {
        o.add_timestamp(time);
        o.add_priority(priority);
        o.add_gps(fix);
        o.add_event(event);
        o.add_io_total(declared);
    }

    let j = &mut j;

    let state_alt = publish_tier(state_alt, r, j, o.as_deref_mut(), FromRecord::add_u8)?;
    let state_alt = publish_tier(state_alt, r, j, o.as_deref_mut(), FromRecord::add_u16)?;
    let state_alt = publish_tier(state_alt, r, j, o.as_deref_mut(), FromRecord::add_u32)?;
    publish_tier(state_alt, r, j, o.as_deref_mut(), FromRecord::add_u64)?;

    if *n != u16::from(declared) {
        if let Some(o) = &mut o {
            o.io_count_mismatch(declared, *n);
        }
    }

    Ok(state)
}

fn count_tier<T, const N: usize>(
    state: TierCount<T>,
    r: &[u8],
    i: &mut usize,
    n: &mut u16,
) -> Result<T::Next, Error>
where
    T: TierInner<From = [u8; N]>,
{
    let mut state = match state.advance(take(r, i)?) {
        Left(state) => state,
        Right(successor) => return Ok(successor),
    };

    loop {
        *n += 1;

        state = match state.advance(take(r, i)?) {
            Left(state) => state,
            Right(successor) => return Ok(successor),
        };
    }
}

fn publish_tier<T, O, const N: usize>(
    state: TierCountAlt<T>,
    r: &[u8],
    j: &mut usize,

    mut o: Option<&mut O>,
    add: fn(&mut O, u8, T::Value),
) -> Result<T::NextAlt, Error>
where
    T: TierInner<From = [u8; N]>,
    O: FromRecord + ?Sized,
{
    let mut state = match state.advance(take(r, j)?) {
        Left(state) => state,
        Right(successor) => return Ok(successor),
    };

    loop {
        let ((id, value), successor) = state.advance(take(r, j)?);

        if let Some(o) = &mut o {
            add(o, id, value);
        }

        state = match successor {
            Left(state) => state,
            Right(successor) => return Ok(successor),
        };
    }
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let s = *i;
    *i += N;

    Ok(r.get(s..*i)
        .ok_or(Error::Truncated {
            at: s,
            needed: N,
            available: r.len() - s,
        })?
        .try_into()
        .unwrap())
}
