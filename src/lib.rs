#![no_std]

//! An efficient deserializer for AVL telemetry frames from GPS fleet
//! trackers.
//!
//! Tachograph provides a set of ergonomic interfaces for common decoding
//! patterns, and exposes its underlying finite-state machine for applications
//! needing finer control over internals (such as those running on embedded
//! systems).
//!
//! Most users should begin with the functions and derive macros in the
//! [`avec`] module. These are suited to extracting records from frames
//! arriving as slices or readers, either into the owned frame model or into
//! receivers of a known shape. If these prove insufficient, consider
//! implementing a decoder as described in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder and owned frame model (default).

pub mod avec;
pub mod sans;
