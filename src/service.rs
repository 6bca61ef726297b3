//! High-level speech service: synthesize, register, play.

use std::sync::Arc;

use tracing::warn;

use crate::playback::{AudioPlayer, ClipHandle, ClipRegistry, Playback};
use crate::synthesis::SpeechClient;
use crate::Result;

/// One spoken clip: the registry handle plus the in-flight playback.
///
/// Await `playback.wait()` to sequence clips, call `playback.stop()` to cut
/// it short, or drop the whole value to detach. The `handle` stays valid in
/// the registry either way until it is revoked.
#[derive(Debug)]
pub struct Utterance {
    pub handle: ClipHandle,
    pub playback: Playback,
}

/// Composes a [`SpeechClient`], a [`ClipRegistry`] and an [`AudioPlayer`]
/// into the one-call "say this" surface.
///
/// Calls are independent; two concurrent [`speak`](Self::speak) calls issue
/// two requests and yield two handles, and their playback overlaps without
/// mixing control (that is the platform's job).
pub struct SpeechService {
    client: SpeechClient,
    registry: Arc<ClipRegistry>,
    player: Arc<dyn AudioPlayer>,
}

impl SpeechService {
    pub fn new(client: SpeechClient, player: Arc<dyn AudioPlayer>) -> Self {
        Self {
            client,
            registry: Arc::new(ClipRegistry::new()),
            player,
        }
    }

    /// Synthesize `text`, register the clip, and start playback.
    ///
    /// Returns as soon as playback has started. Clip release is the caller's
    /// responsibility: pass `handle` to [`ClipRegistry::revoke`] once the
    /// clip is no longer needed.
    pub async fn speak(&self, text: &str) -> Result<Utterance> {
        let clip = Arc::new(self.client.synthesize(text).await?);
        let handle = self.registry.insert_arc(Arc::clone(&clip));
        let playback = match self.player.play(clip) {
            Ok(playback) => playback,
            Err(e) => {
                // Don't leave an unplayable clip behind.
                self.registry.revoke(&handle);
                return Err(e);
            }
        };
        Ok(Utterance { handle, playback })
    }

    /// Availability-mode [`speak`](Self::speak): any failure is logged and
    /// swallowed, and playback is detached.
    ///
    /// `None` means the call failed; the caller cannot distinguish the
    /// failure classes and is expected not to care. Use [`speak`](Self::speak)
    /// where the error matters.
    pub async fn speak_detached(&self, text: &str) -> Option<ClipHandle> {
        match self.speak(text).await {
            Ok(utterance) => Some(utterance.handle),
            Err(e) => {
                warn!(error = %e, "speech synthesis failed, continuing without audio");
                None
            }
        }
    }

    /// The registry holding this service's clips.
    pub fn registry(&self) -> &ClipRegistry {
        &self.registry
    }

    pub fn client(&self) -> &SpeechClient {
        &self.client
    }
}
