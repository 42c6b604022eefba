use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{TokenError, TokenResult};

/// Serialize a record to JSON and encode it as an unpadded base64url segment.
pub fn encode<T: Serialize>(record: &T) -> TokenResult<String> {
    let json = serde_json::to_vec(record).map_err(|err| TokenError::Serialize(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a base64url segment back into a structured record.
pub fn decode<T: DeserializeOwned>(segment: &str) -> TokenResult<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenError::Decode(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| TokenError::Deserialize(err.to_string()))
}

/// Decode a raw binary segment (the signature is not JSON).
pub fn decode_bytes(segment: &str) -> TokenResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenError::Decode(err.to_string()))
}

/// Encode raw bytes as an unpadded base64url segment.
pub fn encode_bytes(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
