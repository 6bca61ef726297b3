//! # voice-lib-rust
//!
//! Speech synthesis client for the ElevenLabs text-to-speech API with
//! revocable in-memory clips and local playback.
//!
//! ## Overview
//!
//! One call sends text to the provider's `/v1/text-to-speech/{voice_id}`
//! endpoint, receives an MPEG payload, registers it as a revocable clip, and
//! plays it through the system output. The three steps — synthesize,
//! register, play — are separate, composable operations; [`SpeechService`]
//! glues them back together for the common "say this" case.
//!
//! ## Core Philosophy
//!
//! - **Explicit configuration**: a [`SpeechConfig`] injected at construction,
//!   never ambient process state read per call
//! - **Errors are values**: every operation returns [`Result`]; the
//!   log-and-continue mode is one opt-in method, not the default
//! - **Fetch and play are separate**: playback is observable and cancellable
//!   through [`Playback`](playback::Playback), or detachable by dropping it
//! - **Explicit release**: clip handles live until the caller revokes them
//!
//! ## Quick Start
//!
//! With the `playback` feature enabled:
//!
//! ```rust,no_run
//! # #[cfg(feature = "playback")]
//! # async fn demo() -> voice_lib_rust::Result<()> {
//! use std::sync::Arc;
//! use voice_lib_rust::{RodioPlayer, SpeechClient, SpeechConfig, SpeechService};
//!
//! let client = SpeechClient::new(SpeechConfig::from_env()?)?;
//! let service = SpeechService::new(client, Arc::new(RodioPlayer::new()));
//!
//! let utterance = service.speak("Hello from Rust").await?;
//! utterance.playback.wait().await?;
//! service.registry().revoke(&utterance.handle);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Client configuration and environment loading |
//! | [`synthesis`] | HTTP client for the text-to-speech endpoint |
//! | [`playback`] | Clip registry, audio players, playback control |
//! | [`service`] | Composition of the above into a speech service |

pub mod config;
pub mod playback;
pub mod service;
pub mod synthesis;

// Re-export main types for convenience
pub use config::SpeechConfig;
#[cfg(feature = "playback")]
pub use playback::RodioPlayer;
pub use playback::{AudioPlayer, ClipHandle, ClipRegistry, NullPlayer, Playback, PlaybackState};
pub use service::{SpeechService, Utterance};
pub use synthesis::{
    AudioFormat, AudioOutput, ModelId, SpeechClient, SpeechClientBuilder, VoiceSettings,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
