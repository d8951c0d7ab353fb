//! API token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "bt";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Generate a fresh bearer token: `bt_` followed by hex-encoded random bytes.
#[must_use]
pub fn generate_api_token() -> String {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    format!("{API_TOKEN_PREFIX}_{}", encode_hex(&secret))
}

/// The stored form of a token: lowercase hex SHA-256 of the full token string.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    encode_hex(&digest)
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_have_prefix_and_length() {
        let token = generate_api_token();

        assert!(token.starts_with("bt_"));
        assert_eq!(token.len(), 3 + API_TOKEN_SECRET_BYTES * 2);
    }

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(generate_api_token(), generate_api_token());
    }

    #[test]
    fn hashing_is_deterministic_and_not_identity() {
        let token = "bt_00";

        assert_eq!(hash_api_token(token), hash_api_token(token));
        assert_ne!(hash_api_token(token), token);
        assert_eq!(hash_api_token(token).len(), 64);
    }
}
