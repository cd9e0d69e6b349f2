//! Access token encoding plus opaque refresh token storage and rotation.

pub mod claims;
pub mod cleanup;
pub mod codec;
pub mod hash;
pub mod memory;
pub mod store;

pub use claims::Claims;
pub use cleanup::TokenCleanup;
pub use codec::TokenCodec;
pub use hash::{generate_refresh_token, hash_token};
pub use memory::MemoryRefreshTokenStore;
pub use store::RefreshTokenStore;
