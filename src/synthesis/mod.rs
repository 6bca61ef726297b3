//! Speech synthesis: one POST to the provider's text-to-speech endpoint,
//! one MPEG payload back.

mod client;
mod types;

pub use client::{SpeechClient, SpeechClientBuilder};
pub use types::{AudioFormat, AudioOutput, ModelId, SpeechRequest, VoiceSettings};
