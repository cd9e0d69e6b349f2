//! Signed access token encoding and decoding.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use adboard_core::error::AppError;
use adboard_core::result::AppResult;

use super::claims::Claims;

/// Maps a configured algorithm name onto the HMAC family.
///
/// Names are matched case-insensitively after trimming, and a blank name
/// selects the default. Unknown names are rejected so a configuration
/// typo fails startup instead of issuing tokens under an unexpected
/// algorithm.
fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
    match name.trim().to_lowercase().as_str() {
        "" | "sha256" | "hs256" => Ok(Algorithm::HS256),
        "sha384" | "hs384" => Ok(Algorithm::HS384),
        "sha512" | "hs512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unknown token algorithm: '{other}'. Supported: sha256, sha384, sha512"
        ))),
    }
}

/// Encodes and decodes signed access tokens.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signing algorithm resolved from configuration.
    algorithm: Algorithm,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from the configured secret and algorithm name.
    pub fn new(secret: &str, algorithm_name: &str) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::configuration("Token secret must not be empty"));
        }

        let algorithm = parse_algorithm(algorithm_name)?;

        let mut validation = Validation::new(algorithm);
        // Callers check expiry against their own clock.
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
        })
    }

    /// Signs the given claims into a compact token string.
    pub fn encode(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }

    /// Verifies the signature and returns the embedded claims.
    ///
    /// Expired tokens decode successfully; see [`Claims::is_expired`].
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}
