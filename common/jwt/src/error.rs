use thiserror::Error;

pub type TokenResult<T> = Result<T, TokenError>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret is missing or empty")]
    MissingSecret,
    #[error("configuration value for '{0}' is not a valid number of seconds")]
    InvalidConfigValue(String),
    #[error("token must have exactly three segments")]
    Malformed,
    #[error("segment is not valid base64url: {0}")]
    Decode(String),
    #[error("payload does not match the expected shape: {0}")]
    Deserialize(String),
    #[error("record could not be serialized: {0}")]
    Serialize(String),
    #[error("token signature does not match")]
    SignatureMismatch,
    #[error("token is past its expiry")]
    Expired,
    #[error("token is outside its refresh window")]
    RefreshWindowExceeded,
}
