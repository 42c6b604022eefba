use chrono::{DateTime, Utc};
use tracing::debug;

use crate::claims::{Claim, Header, Payload};
use crate::codec;
use crate::config::TokenConfig;
use crate::error::{TokenError, TokenResult};

/// Issues, verifies, and refreshes three-segment HS256 tokens. Holds the
/// resolved configuration as an immutable value; cloning is cheap and every
/// method is safe to call from concurrent threads.
#[derive(Debug, Clone)]
pub struct JwtAuthority {
    config: TokenConfig,
}

impl JwtAuthority {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Build a token for `claim`, expiring one expiry window from now.
    pub fn build(&self, claim: &Claim) -> TokenResult<String> {
        self.build_at(claim, Utc::now())
    }

    /// Build a token as of an explicit instant. Split out from [`build`]
    /// so expiry behavior can be tested without sleeping.
    ///
    /// [`build`]: JwtAuthority::build
    pub fn build_at(&self, claim: &Claim, now: DateTime<Utc>) -> TokenResult<String> {
        let payload = Payload::new(claim, now + self.config.expiry, now);
        let header = codec::encode(&Header::hs256())?;
        let payload = codec::encode(&payload)?;
        Ok(self.assemble(&header, &payload))
    }

    /// Check a presented token and return its decoded payload. Precondition
    /// order matters: the signature is verified over the unmodified segments
    /// before the payload is decoded, so nothing from a forged token is
    /// ever interpreted.
    pub fn verify(&self, token: &str) -> TokenResult<Payload> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> TokenResult<Payload> {
        let (header, payload, signature) = split_segments(token)?;
        self.check_signature(header, payload, signature)?;
        let payload: Payload = codec::decode(payload)?;
        if now < payload.exp {
            debug!("token verified");
            Ok(payload)
        } else {
            Err(TokenError::Expired)
        }
    }

    /// Boolean collapse of [`verify`]: structural, signature, and expiry
    /// failures are all indistinguishable to the caller so that probing
    /// tokens reveals nothing about why one was rejected.
    ///
    /// [`verify`]: JwtAuthority::verify
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify_at(token, now).is_ok()
    }

    /// Re-issue a token whose expiry has not drifted past the refresh grace
    /// window, preserving its claim data verbatim. The signature is checked
    /// against the original segments before any window math, so a forged
    /// token can never reach the window check.
    pub fn refresh(&self, token: &str) -> TokenResult<String> {
        self.refresh_at(token, Utc::now())
    }

    pub fn refresh_at(&self, token: &str, now: DateTime<Utc>) -> TokenResult<String> {
        let (header, payload, signature) = split_segments(token)?;
        self.check_signature(header, payload, signature)?;
        let original: Payload = codec::decode(payload)?;
        if now >= original.exp + self.config.refresh {
            return Err(TokenError::RefreshWindowExceeded);
        }
        let renewed = Payload {
            data: original.data,
            exp: now + self.config.expiry,
            iat: Some(now),
        };
        let payload = codec::encode(&renewed)?;
        Ok(self.assemble(header, &payload))
    }

    fn assemble(&self, header: &str, payload: &str) -> String {
        let tag = self
            .config
            .secret
            .sign(format!("{header}.{payload}").as_bytes());
        format!("{header}.{payload}.{}", codec::encode_bytes(&tag))
    }

    fn check_signature(&self, header: &str, payload: &str, signature: &str) -> TokenResult<()> {
        let tag = codec::decode_bytes(signature)?;
        let message = format!("{header}.{payload}");
        if self.config.secret.verify(message.as_bytes(), &tag) {
            Ok(())
        } else {
            Err(TokenError::SignatureMismatch)
        }
    }
}

fn split_segments(token: &str) -> TokenResult<(&str, &str, &str)> {
    let mut segments = token.split('.');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(TokenError::Malformed),
    }
}
