//! Opaque refresh token generation and one-way hashing.

use rand::TryRngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use adboard_core::error::AppError;
use adboard_core::result::AppResult;

/// Number of random bytes backing a refresh token.
const TOKEN_BYTES: usize = 64;

/// Hashes a plaintext token for storage and lookup.
///
/// Only this digest is ever persisted or compared.
pub fn hash_token(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a new opaque refresh token from OS randomness.
///
/// The result is 128 hex characters encoding 64 random bytes.
pub fn generate_refresh_token() -> AppResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::internal(format!("Failed to generate refresh token: {e}")))?;
    Ok(hex::encode(bytes))
}
