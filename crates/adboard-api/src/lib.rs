//! HTTP API layer for Adboard.
//!
//! Exposes the authentication and role-administration endpoints over Axum,
//! maps domain errors to HTTP responses, and owns the cookie handling for
//! browser clients.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
