//! Speech synthesis client.

use tracing::debug;

use super::types::{AudioFormat, AudioOutput, SpeechRequest};
use crate::config::SpeechConfig;
use crate::{Error, ErrorContext, Result};

/// Client for text-to-speech synthesis.
///
/// One call to [`synthesize`](Self::synthesize) is one awaited HTTP POST; the
/// client holds no mutable state, so concurrent calls are independent.
pub struct SpeechClient {
    http_client: reqwest::Client,
    config: SpeechConfig,
}

impl SpeechClient {
    pub fn builder() -> SpeechClientBuilder {
        SpeechClientBuilder::new()
    }

    /// Create a client from an explicit configuration.
    pub fn new(config: SpeechConfig) -> Result<Self> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Synthesize `text` into an audio payload.
    ///
    /// The text is passed through unvalidated; length and encoding limits are
    /// the remote API's to enforce. Model and voice parameters come from the
    /// configuration, not the call site. No retries are attempted.
    pub async fn synthesize(&self, text: &str) -> Result<AudioOutput> {
        let endpoint = format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
        );
        let body = SpeechRequest {
            text,
            model_id: &self.config.model,
            voice_settings: self.config.voice_settings,
        };
        debug!(
            endpoint = %endpoint,
            model = body.model_id.as_wire_str(),
            chars = text.len(),
            "sending synthesis request"
        );
        let response = self
            .http_client
            .post(&endpoint)
            .header("Accept", AudioFormat::Mp3.mime_type())
            .header("Content-Type", "application/json")
            .header("xi-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Synthesis request failed: {}", e),
                    ErrorContext::new().with_source("synthesis"),
                )
            })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            Error::network_with_context(
                format!("Failed to read synthesis response: {}", e),
                ErrorContext::new().with_source("synthesis"),
            )
        })?;
        if !status.is_success() {
            let body_str = String::from_utf8_lossy(&bytes);
            return Err(Error::api(status.as_u16(), body_str.into_owned()));
        }
        debug!(bytes = bytes.len(), "synthesis response received");
        Ok(AudioOutput {
            data: bytes,
            format: AudioFormat::Mp3,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    pub fn voice_id(&self) -> &str {
        &self.config.voice_id
    }
}

pub struct SpeechClientBuilder {
    voice_id: Option<String>,
    api_key: Option<String>,
    config: SpeechConfig,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self {
            voice_id: None,
            api_key: None,
            config: SpeechConfig::new("", ""),
        }
    }

    pub fn voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn model(mut self, model: super::types::ModelId) -> Self {
        self.config.model = model;
        self
    }

    pub fn voice_settings(mut self, settings: super::types::VoiceSettings) -> Self {
        self.config.voice_settings = settings;
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Finish the builder. The voice id falls back to `ELEVENLABS_VOICE_ID`
    /// and the credential to the keyring / `ELEVENLABS_API_KEY`, in that
    /// order, when not given explicitly.
    pub fn build(mut self) -> Result<SpeechClient> {
        self.config.voice_id = self
            .voice_id
            .or_else(|| std::env::var(crate::config::VOICE_ID_ENV).ok())
            .ok_or_else(|| Error::configuration("Voice id must be specified"))?;
        self.config.api_key = self
            .api_key
            .or_else(crate::config::resolve_api_key)
            .ok_or_else(|| Error::configuration("API key required"))?;
        SpeechClient::new(self.config)
    }
}

impl Default for SpeechClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
