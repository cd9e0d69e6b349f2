//! # adboard-cache
//!
//! Cache provider implementations for Adboard. The built-in backend is an
//! in-process cache using [moka](https://crates.io/crates/moka); the
//! provider is selected at runtime based on configuration.
//!
//! Session records and expanded permission sets are the main tenants, so
//! every entry carries its own TTL rather than sharing a cache-wide one.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
