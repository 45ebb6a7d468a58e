//! Request and Response models for the component server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ComponentQuery;
pub use responses::{
    ClearResponse, ComponentResponse, ErrorResponse, HealthResponse, StatsResponse,
};
