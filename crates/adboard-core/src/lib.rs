//! # adboard-core
//!
//! Core crate for the Adboard backend. Contains the unified error system,
//! configuration schemas, the injectable clock, and the traits implemented
//! by the infrastructure crates.
//!
//! This crate has **no** internal dependencies on other Adboard crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use clock::{Clock, SystemClock};
pub use error::AppError;
pub use result::AppResult;
