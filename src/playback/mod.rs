//! Audio clip registry and output devices.
//!
//! Synthesized audio enters a [`ClipRegistry`], which hands out revocable
//! [`ClipHandle`]s; an [`AudioPlayer`] turns a registered clip into sound.
//! Fetching and playing are separate operations, composed by
//! [`SpeechService`](crate::SpeechService).

mod player;
mod registry;

#[cfg(feature = "playback")]
pub use player::RodioPlayer;
pub use player::{AudioPlayer, NullPlayer, Playback, PlaybackState};
pub use registry::{ClipHandle, ClipRegistry};
