//! Shared fixtures for the unit tests in this crate. `u32` stands in as a
//! minimal `Key` (a build graph's keys are usually interned strings or
//! content fingerprints; a bare integer is enough to exercise the focuser's
//! traversal logic without pulling in `hashing` from every test module).

use crate::key::Key;

impl Key for u32 {
    fn is_filesystem_witness(&self) -> bool {
        // By convention in these tests, values >= WITNESS_BASE are treated
        // as filesystem witnesses (see `witness`/`is_witness` below).
        *self >= WITNESS_BASE
    }
}

pub const WITNESS_BASE: u32 = 1_000_000;

/// Builds a witness key from a small ordinal, for readability in test graphs.
pub fn witness(n: u32) -> u32 {
    WITNESS_BASE + n
}

#[derive(Default)]
pub struct UnitValue;

impl crate::value::NodeValue for UnitValue {}
