use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 authentication tag in bytes.
pub const TAG_LENGTH: usize = 32;

/// Errors produced by the common-crypto helpers.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("signing key material is empty")]
    EmptyKey,
}

/// Wrapper around the HMAC signing secret. Key bytes are zeroized on drop
/// and never appear in debug output.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Construct a signing key from raw bytes. Empty key material is rejected.
    pub fn from_bytes<B>(bytes: B) -> Result<Self, CryptoError>
    where
        B: AsRef<[u8]>,
    {
        let slice = bytes.as_ref();
        if slice.is_empty() {
            return Err(CryptoError::EmptyKey);
        }
        Ok(Self(Zeroizing::new(slice.to_vec())))
    }

    /// Produce a deterministic HMAC-SHA256 tag over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; TAG_LENGTH] {
        let mut mac = self.mac();
        mac.update(message);
        mac.finalize().into_bytes().into()
    }

    /// Recompute the tag over `message` and compare it against `tag` in
    /// constant time. Plain byte equality would leak timing information.
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        let mut mac = self.mac();
        mac.update(message);
        mac.verify_slice(tag).is_ok()
    }

    fn mac(&self) -> HmacSha256 {
        <HmacSha256 as Mac>::new_from_slice(&self.0).expect("hmac accepts any key length")
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"***redacted***")
            .finish()
    }
}
