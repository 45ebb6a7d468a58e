//! API Module
//!
//! HTTP handlers and routing for the component server REST API.
//!
//! # Endpoints
//! - `GET /api/component/:component_type?lang=xx` - Fetch a localized component
//! - `DELETE /api/cache` - Drop every cached component
//! - `GET /stats` - Cache statistics and gate snapshot
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
