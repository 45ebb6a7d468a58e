//! Gate Module
//!
//! Admission control that bounds the number of requests processed at once.

mod limiter;

pub use limiter::{ConcurrencyGate, GatePermit};
