//! API module for HTTP endpoints
//!
//! This module provides the ingestion routes and the REST endpoints the
//! operator views read from.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
