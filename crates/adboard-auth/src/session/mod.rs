//! Server-side session records over the cache provider.

pub mod store;

pub use store::SessionStore;
