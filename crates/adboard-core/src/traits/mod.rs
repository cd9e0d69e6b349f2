//! Core traits defined in `adboard-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
