//! Test utilities for the bookshelf crate.
//!
//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

mod clock;

pub use clock::MutableClock;

/// Signing secret long enough to pass the release-mode length check.
pub const TEST_TOKEN_SECRET: &[u8] = b"bookshelf-test-secret-0123456789";

/// bcrypt work factor for tests; the minimum the algorithm accepts.
pub const TEST_BCRYPT_COST: u32 = 4;
