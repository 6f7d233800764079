//! Server module for building the catalog HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - Catalog routes (product queries, classification metadata)
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
