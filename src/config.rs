//! Client configuration.
//!
//! All settings are carried by an explicit [`SpeechConfig`] handed to the
//! client at construction. Nothing reads ambient process state at request
//! time; [`SpeechConfig::from_env`] is the one place environment variables
//! are consulted.

use std::env;
use std::time::Duration;

use keyring::Entry;

use crate::synthesis::{ModelId, VoiceSettings};
use crate::{Error, ErrorContext, Result};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Environment variable holding the voice identifier.
pub const VOICE_ID_ENV: &str = "ELEVENLABS_VOICE_ID";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Environment variable overriding the request timeout (seconds).
pub const TIMEOUT_ENV: &str = "VOICE_HTTP_TIMEOUT_SECS";

const KEYRING_SERVICE: &str = "voice-lib-rust";
const KEYRING_PROVIDER: &str = "elevenlabs";

/// Configuration for a [`SpeechClient`](crate::SpeechClient).
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Voice to synthesize with; interpolated into the endpoint path.
    pub voice_id: String,
    /// Credential sent as the `xi-api-key` header.
    pub api_key: String,
    /// API origin, without a trailing slash.
    pub base_url: String,
    /// Model identifier sent in every request body.
    pub model: ModelId,
    /// Voice rendering parameters sent in every request body.
    pub voice_settings: VoiceSettings,
    /// Request timeout applied to the whole exchange.
    pub timeout: Duration,
}

impl SpeechConfig {
    /// Create a configuration with the library defaults for everything but
    /// the two required values.
    pub fn new(voice_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: ModelId::default(),
            voice_settings: VoiceSettings::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// The voice id comes from `ELEVENLABS_VOICE_ID`. The credential is
    /// resolved from the OS keyring first, then `ELEVENLABS_API_KEY`.
    /// `VOICE_HTTP_TIMEOUT_SECS` overrides the 30s request timeout.
    pub fn from_env() -> Result<Self> {
        let voice_id = env::var(VOICE_ID_ENV).map_err(|_| {
            Error::configuration_with_context(
                format!("{} is not set", VOICE_ID_ENV),
                ErrorContext::new().with_field_path("config.voice_id"),
            )
        })?;
        let api_key = resolve_api_key().ok_or_else(|| {
            Error::configuration_with_context(
                format!("no credential in keyring or {}", API_KEY_ENV),
                ErrorContext::new().with_field_path("config.api_key"),
            )
        })?;

        let mut config = Self::new(voice_id, api_key);
        if let Some(secs) = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Check the configuration for values the remote API would reject.
    pub fn validate(&self) -> Result<()> {
        if self.voice_id.is_empty() {
            return Err(Error::configuration_with_context(
                "voice id must not be empty",
                ErrorContext::new().with_field_path("config.voice_id"),
            ));
        }
        if self.api_key.is_empty() {
            return Err(Error::configuration_with_context(
                "API key must not be empty",
                ErrorContext::new().with_field_path("config.api_key"),
            ));
        }
        self.voice_settings.validate()
    }
}

pub(crate) fn resolve_api_key() -> Option<String> {
    // 1. Try Keyring
    if let Ok(entry) = Entry::new(KEYRING_SERVICE, KEYRING_PROVIDER) {
        if let Ok(key) = entry.get_password() {
            return Some(key);
        }
    }

    // 2. Try Environment Variable
    env::var(API_KEY_ENV).ok()
}
