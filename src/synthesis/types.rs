//! Speech synthesis types.

use bytes::Bytes;
use serde::Serialize;

use crate::{Error, ErrorContext, Result};

/// Provider model identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelId {
    /// Monolingual (English) model v1.
    #[default]
    MonolingualV1,
    /// Multilingual model v2.
    MultilingualV2,
    /// Flash model v2.5 (low latency).
    FlashV2_5,
    /// Turbo model v2.5 (balanced speed/quality).
    TurboV2_5,
    /// Custom provider-specific model identifier.
    Custom(String),
}

impl ModelId {
    /// The identifier sent in the request body.
    pub fn as_wire_str(&self) -> &str {
        match self {
            Self::MonolingualV1 => "eleven_monolingual_v1",
            Self::MultilingualV2 => "eleven_multilingual_v2",
            Self::FlashV2_5 => "eleven_flash_v2_5",
            Self::TurboV2_5 => "eleven_turbo_v2_5",
            Self::Custom(id) => id,
        }
    }
}

impl Serialize for ModelId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire_str())
    }
}

/// Voice rendering parameters carried in every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    /// Consistency of the voice across generations, in `[0.0, 1.0]`.
    pub stability: f32,
    /// Adherence to the original voice, in `[0.0, 1.0]`.
    pub similarity_boost: f32,
    /// Speaking rate multiplier, strictly positive.
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            speed: 1.0,
        }
    }
}

impl VoiceSettings {
    /// Check the documented parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.stability) {
            return Err(Error::validation_with_context(
                format!("stability must be within [0.0, 1.0], got {}", self.stability),
                ErrorContext::new().with_field_path("voice_settings.stability"),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(Error::validation_with_context(
                format!(
                    "similarity_boost must be within [0.0, 1.0], got {}",
                    self.similarity_boost
                ),
                ErrorContext::new().with_field_path("voice_settings.similarity_boost"),
            ));
        }
        if self.speed <= 0.0 {
            return Err(Error::validation_with_context(
                format!("speed must be positive, got {}", self.speed),
                ErrorContext::new().with_field_path("voice_settings.speed"),
            ));
        }
        Ok(())
    }
}

/// Request body for the text-to-speech endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a ModelId,
    pub voice_settings: VoiceSettings,
}

/// Synthesized audio returned by the provider.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl AudioOutput {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }
}
