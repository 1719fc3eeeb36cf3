//! Reports for the finance tracker

pub mod breakdown;

pub use breakdown::{split_by_sign, BreakdownReport, BreakdownSlice, SignedBreakdown};
