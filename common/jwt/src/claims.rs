use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TokenError, TokenResult};

/// Caller-supplied data carried in the token payload. The value is treated
/// as opaque: it is serialized under the `data` key and round-tripped
/// verbatim through refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub data: serde_json::Value,
}

impl Claim {
    /// Wrap any serializable value as claim data.
    pub fn new<T: Serialize>(data: T) -> TokenResult<Self> {
        let data =
            serde_json::to_value(data).map_err(|err| TokenError::Serialize(err.to_string()))?;
        Ok(Self { data })
    }
}

/// Token header. Constant for every token this crate produces; carried so a
/// reader can recognize the signing algorithm. The field is named `type`
/// rather than the standard `typ` for wire compatibility with previously
/// issued tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(rename = "type")]
    pub typ: String,
}

impl Header {
    pub fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Token payload. `iat` is optional on decode to tolerate tokens issued by
/// the oldest wire-format variant, which omitted it; every token built or
/// refreshed here carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: serde_json::Value,
    pub exp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<DateTime<Utc>>,
}

impl Payload {
    pub fn new(claim: &Claim, exp: DateTime<Utc>, iat: DateTime<Utc>) -> Self {
        Self {
            data: claim.data.clone(),
            exp,
            iat: Some(iat),
        }
    }
}
