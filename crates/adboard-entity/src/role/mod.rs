//! Role and permission domain entities.

pub mod model;

pub use model::{Permission, Role};
