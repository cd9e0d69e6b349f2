//! # adboard-database
//!
//! PostgreSQL connection management and concrete repository implementations
//! for the Adboard entities.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
