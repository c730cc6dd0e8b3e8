//! services/api/src/adapters/token.rs
//!
//! This module contains the token adapter, the concrete implementation of the
//! `TokenService` port. Tokens are a JSON claims payload signed with
//! HMAC-SHA256: `hex(payload) "." hex(signature)`.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use notes_core::domain::AuthClaims;
use notes_core::ports::{PortError, PortResult, TokenService};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The wire form of the claims carried inside a token.
#[derive(Serialize, Deserialize)]
struct WireClaims {
    sub: i64,
    email: String,
    exp: i64,
}

/// A token adapter that implements the `TokenService` port.
pub struct HmacTokenAdapter {
    key: Vec<u8>,
    ttl: Duration,
}

impl HmacTokenAdapter {
    /// Creates a new `HmacTokenAdapter` signing with `secret` and issuing
    /// tokens valid for `ttl`.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            ttl,
        }
    }

    fn mac(&self) -> PortResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| PortError::Unexpected(format!("Invalid signing key: {}", e)))
    }
}

impl TokenService for HmacTokenAdapter {
    fn issue(&self, user_id: i64, email: &str) -> PortResult<String> {
        let claims = WireClaims {
            sub: user_id,
            email: email.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| PortError::Unexpected(format!("Failed to encode claims: {}", e)))?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}.{}", hex::encode(payload), hex::encode(signature)))
    }

    fn validate(&self, token: &str) -> PortResult<AuthClaims> {
        let (payload_hex, signature_hex) =
            token.split_once('.').ok_or(PortError::Unauthorized)?;
        let payload = hex::decode(payload_hex).map_err(|_| PortError::Unauthorized)?;
        let signature = hex::decode(signature_hex).map_err(|_| PortError::Unauthorized)?;

        // Constant-time comparison; a tampered payload or signature fails here.
        let mut mac = self.mac()?;
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| PortError::Unauthorized)?;

        let claims: WireClaims =
            serde_json::from_slice(&payload).map_err(|_| PortError::Unauthorized)?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(PortError::Unauthorized);
        }

        Ok(AuthClaims {
            subject: claims.sub,
            email: claims.email,
        })
    }
}
