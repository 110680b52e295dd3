//! States processing element sections.
//!
//! Elements are identifier/value groups carried in four tiers of widening
//! value width. Tiers are not tagged; they are distinguished by position
//! alone, so the states here form a fixed chain from the one-byte tier
//! through the eight-byte tier.

use core::marker::PhantomData;

use either::Either::{self, Left, Right};
use zerocopy::FromBytes;

use super::header::Timestamp;

/// State token to decode an element section header.
#[derive(Debug)]
pub struct IoHeader(pub(super) ());

impl IoHeader {
    /// Transition to another state by decoding an element section header.
    ///
    /// Returns the identifier of the element triggering the record (zero on
    /// periodic records) and the declared element total, along with state
    /// tokens for both passes over the element groups.
    pub fn advance(self, r: [u8; 2]) -> ((u8, u8), (TierCount<One>, TierCountAlt<One>)) {
        let tokens = (
            TierCount {
                _phantom: PhantomData,
            },
            TierCountAlt {
                _phantom: PhantomData,
            },
        );

        ((r[0], r[1]), tokens)
    }
}

/// State token to perform a first-pass decoding of a tier's group count.
#[derive(Debug)]
pub struct TierCount<T> {
    pub(super) _phantom: PhantomData<T>,
}

impl<T: TierInner> TierCount<T> {
    /// Transition to another state by performing a first-pass decoding of a
    /// tier's group count.
    ///
    /// Returns a successor state token.
    pub fn advance(self, r: [u8; 1]) -> Either<TierPair<T>, T::Next> {
        let groups_remaining = r[0];

        if groups_remaining != 0 {
            Left(TierPair {
                groups_remaining,
                _phantom: PhantomData,
            })
        } else {
            Right(T::next())
        }
    }
}

/// State token to perform a first-pass decoding of an element group.
#[derive(Debug)]
pub struct TierPair<T> {
    pub(super) groups_remaining: u8,
    pub(super) _phantom: PhantomData<T>,
}

impl<T: TierInner> TierPair<T> {
    /// Transition to another state by performing a first-pass decoding of an
    /// element group.
    ///
    /// Returns a successor state token.
    pub fn advance(self, _r: T::From) -> Either<Self, T::Next> {
        let groups_remaining = self.groups_remaining - 1;

        if groups_remaining != 0 {
            Left(Self {
                groups_remaining,
                _phantom: PhantomData,
            })
        } else {
            Right(T::next())
        }
    }
}

/// State token to decode a tier's group count.
pub struct TierCountAlt<T> {
    pub(super) _phantom: PhantomData<T>,
}

impl<T: TierInner> TierCountAlt<T> {
    /// Transition to another state by decoding a tier's group count.
    ///
    /// **This method expects bytes not read from the tip of the cursor.** See
    /// the architecture description in the [`crate::sans`] module
    /// documentation for clarification.
    ///
    /// Returns a successor state token.
    pub fn advance(self, r: [u8; 1]) -> Either<TierPairAlt<T>, T::NextAlt> {
        let groups_remaining = r[0];

        if groups_remaining != 0 {
            Left(TierPairAlt {
                groups_remaining,
                _phantom: PhantomData,
            })
        } else {
            Right(T::next_alt())
        }
    }
}

/// State token to decode an element group.
pub struct TierPairAlt<T> {
    pub(super) groups_remaining: u8,
    pub(super) _phantom: PhantomData<T>,
}

impl<T: TierInner> TierPairAlt<T> {
    /// Transition to another state by decoding an element group.
    ///
    /// **This method expects bytes not read from the tip of the cursor.** See
    /// the architecture description in the [`crate::sans`] module
    /// documentation for clarification.
    ///
    /// Returns the element identifier and value, and a successor state token.
    pub fn advance(self, r: T::From) -> ((u8, T::Value), Either<Self, T::NextAlt>) {
        let group = T::split(r);

        let groups_remaining = self.groups_remaining - 1;

        let successor = if groups_remaining != 0 {
            Left(Self {
                groups_remaining,
                _phantom: PhantomData,
            })
        } else {
            Right(T::next_alt())
        };

        (group, successor)
    }
}

/// Marker for a tier of element groups.
pub trait TierInner {
    /// The data storing one identifier/value group of this tier.
    type From;
    /// The primitive corresponding to this tier's value width.
    type Value;
    /// The state following this tier in a first pass.
    type Next;
    /// The state following this tier when extracting values.
    type NextAlt;

    /// Split a group into its identifier and big-endian value.
    fn split(r: Self::From) -> (u8, Self::Value);

    /// Produce the state token following this tier in a first pass.
    fn next() -> Self::Next;
    /// Produce the state token following this tier when extracting values.
    fn next_alt() -> Self::NextAlt;
}

macro_rules! tier_inner {
    ($t:ident, $value:ty, $width:literal, $next:ty, $next_expr:expr, $next_alt:ty, $next_alt_expr:expr, $(#[$attr:meta])*) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $t;

        impl TierInner for $t {
            type From = [u8; 1 + $width];
            type Value = $value;
            type Next = $next;
            type NextAlt = $next_alt;

            fn split(r: Self::From) -> (u8, Self::Value) {
                #[repr(C, packed)]
                #[derive(FromBytes)]
                struct Group {
                    id: u8,
                    value: [u8; $width],
                }

                let Group { id, value } = zerocopy::transmute!(r);

                (id, <$value>::from_be_bytes(value))
            }

            fn next() -> Self::Next {
                $next_expr
            }

            fn next_alt() -> Self::NextAlt {
                $next_alt_expr
            }
        }
    };
}

tier_inner!(
    One, u8, 1,
    TierCount<Two>, TierCount { _phantom: PhantomData },
    TierCountAlt<Two>, TierCountAlt { _phantom: PhantomData },
    /** One-byte element values. */
);
tier_inner!(
    Two, u16, 2,
    TierCount<Four>, TierCount { _phantom: PhantomData },
    TierCountAlt<Four>, TierCountAlt { _phantom: PhantomData },
    /** Two-byte element values. */
);
tier_inner!(
    Four, u32, 4,
    TierCount<Eight>, TierCount { _phantom: PhantomData },
    TierCountAlt<Eight>, TierCountAlt { _phantom: PhantomData },
    /** Four-byte element values. */
);
tier_inner!(
    Eight, u64, 8,
    Timestamp, Timestamp(()),
    (), (),
    /** Eight-byte element values. */
);
