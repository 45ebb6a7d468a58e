//! Service Module
//!
//! Orchestrates admission, cache lookup, rendering and cache population.

mod component;

pub use component::{ComponentCache, ComponentKey, ComponentService, Fetched};
