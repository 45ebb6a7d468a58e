//! Localized Components - A localized UI component server
//!
//! Serves pre-rendered component templates through a TTL/LRU cache, with a
//! concurrency gate limiting how many requests are processed at once.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod render;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ServiceError};
pub use service::{ComponentService, Fetched};
