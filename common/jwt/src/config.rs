use std::collections::HashMap;

use chrono::Duration;
use common_crypto::SigningKey;
use tracing::warn;

use crate::error::{TokenError, TokenResult};

const DEFAULT_EXPIRY_SECS: i64 = 60 * 60 * 24;
const DEFAULT_REFRESH_SECS: i64 = 60 * 60 * 48;

/// Key-value source the resolver reads settings from. Keeping this a trait
/// means the library itself never touches the process environment; callers
/// decide where settings come from.
pub trait SettingsSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Adapter so a plain lookup function can serve as a settings source.
pub struct FnSource<F>(pub F);

impl<F> SettingsSource for FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Names the resolver looks settings up under. Overridable so callers can
/// repoint resolution at differently named settings without code changes.
#[derive(Debug, Clone)]
pub struct SettingNames {
    pub secret: String,
    pub expiry: String,
    pub refresh: String,
}

impl Default for SettingNames {
    fn default() -> Self {
        Self {
            secret: "JWT_SECRET".to_string(),
            expiry: "JWT_EXPIRY".to_string(),
            refresh: "JWT_REFRESH".to_string(),
        }
    }
}

/// Immutable runtime configuration for token operations. Constructed once
/// and passed into [`crate::JwtAuthority`]; there is no global state.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret used to key the HMAC signature.
    pub secret: SigningKey,
    /// Duration after issuance during which a token authenticates.
    pub expiry: Duration,
    /// Grace duration after `exp` during which a token may still be refreshed.
    pub refresh: Duration,
}

impl TokenConfig {
    /// Construct config with the default windows (24 hour expiry, 48 hour
    /// refresh grace).
    pub fn new(secret: SigningKey) -> Self {
        Self {
            secret,
            expiry: Duration::seconds(DEFAULT_EXPIRY_SECS),
            refresh: Duration::seconds(DEFAULT_REFRESH_SECS),
        }
    }

    /// Adjust the expiry window.
    pub fn with_expiry(mut self, window: Duration) -> Self {
        self.expiry = window;
        self
    }

    /// Adjust the refresh grace window.
    pub fn with_refresh(mut self, window: Duration) -> Self {
        self.refresh = window;
        self
    }
}

/// Resolves a [`TokenConfig`] from an external settings source. The secret
/// is mandatory; the two windows fall back to defaults with a warning,
/// suppressible for callers that expect to run on defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    names: SettingNames,
    mute_fallback_logs: bool,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: SettingNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_muted_fallbacks(mut self, mute: bool) -> Self {
        self.mute_fallback_logs = mute;
        self
    }

    pub fn resolve<S>(&self, source: &S) -> TokenResult<TokenConfig>
    where
        S: SettingsSource + ?Sized,
    {
        let secret = source
            .get(&self.names.secret)
            .ok_or(TokenError::MissingSecret)?;
        let secret = SigningKey::from_bytes(secret).map_err(|_| TokenError::MissingSecret)?;

        let expiry = self.window(source, &self.names.expiry, DEFAULT_EXPIRY_SECS);
        let refresh = self.window(source, &self.names.refresh, DEFAULT_REFRESH_SECS);

        Ok(TokenConfig {
            secret,
            expiry,
            refresh,
        })
    }

    fn window<S>(&self, source: &S, key: &str, default_secs: i64) -> Duration
    where
        S: SettingsSource + ?Sized,
    {
        let parsed = source
            .get(key)
            .ok_or_else(|| TokenError::InvalidConfigValue(key.to_string()))
            .and_then(|raw| parse_seconds(&raw, key));
        match parsed {
            Ok(window) => window,
            Err(err) => {
                if !self.mute_fallback_logs {
                    warn!(key, %err, "setting not present or invalid, using default");
                }
                Duration::seconds(default_secs)
            }
        }
    }
}

fn parse_seconds(raw: &str, key: &str) -> TokenResult<Duration> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| TokenError::InvalidConfigValue(key.to_string()))
}
