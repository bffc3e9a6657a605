//! Market clock port trait.

/// Gates whether trading should occur; the ledger itself never consults it.
pub trait ClockPort {
    fn is_open(&self) -> bool;
}
