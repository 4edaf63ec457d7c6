//! Integration-test support for the skysim simulation libraries.
//!
//! The libraries under test keep FITS persistence and the spherical
//! transform engine behind traits; this crate provides the in-memory
//! stand-ins ([`fixtures`]) and a byte-level determinism harness
//! ([`determinism`]) the `tests/` suites build on.

pub mod determinism;
pub mod fixtures;
