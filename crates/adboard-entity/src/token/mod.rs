//! Token domain entities: the persisted refresh-token record and the
//! issued token value types returned to callers.

pub mod pair;
pub mod record;

pub use pair::{AccessToken, IssuedRefreshToken, TokenPair};
pub use record::RefreshTokenRecord;
