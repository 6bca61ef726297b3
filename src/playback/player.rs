//! Audio output devices.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::oneshot;

use crate::synthesis::AudioOutput;
use crate::{Error, ErrorContext, Result};

/// Playback state enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Audio is currently playing
    Playing,
    /// Audio ran to completion
    Finished,
    /// Audio was stopped before completion
    Stopped,
    /// Audio playback encountered an error
    Error,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Playing => write!(f, "Playing"),
            Self::Finished => write!(f, "Finished"),
            Self::Stopped => write!(f, "Stopped"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// An in-flight playback.
///
/// Returned by [`AudioPlayer::play`] once playback has started. Await
/// [`wait`](Self::wait) for completion, call [`stop`](Self::stop) to cancel,
/// or drop the value to detach and let the audio run out on its own.
#[derive(Debug)]
pub struct Playback {
    stop: Arc<AtomicBool>,
    state: Arc<RwLock<PlaybackState>>,
    done: oneshot::Receiver<Result<()>>,
}

impl Playback {
    /// Request cancellation. Takes effect at the device's next poll; already
    /// finished playback is unaffected.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Current state as observed by the playback worker.
    pub fn state(&self) -> PlaybackState {
        *self.state.read().expect("playback state lock poisoned")
    }

    /// Wait for playback to end. Resolves `Ok(())` both when the clip ran to
    /// completion and when it was stopped; device and decode failures come
    /// back as [`Error::Audio`].
    pub async fn wait(self) -> Result<()> {
        match self.done.await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::audio_with_context(
                "playback worker exited without reporting",
                ErrorContext::new().with_source("playback"),
            )),
        }
    }
}

/// An audio output device that can start playback of a synthesized clip.
///
/// `play` must return as soon as playback has started; completion is
/// observed through the returned [`Playback`]. Implementations are shared
/// across calls, and overlapping playback is the platform mixer's concern.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, clip: Arc<AudioOutput>) -> Result<Playback>;
}

/// Output device that discards audio and completes immediately.
///
/// For platforms without audio support and for tests; counts how many clips
/// were handed to it.
#[derive(Debug, Default)]
pub struct NullPlayer {
    plays: AtomicUsize,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clips played so far.
    pub fn play_count(&self) -> usize {
        self.plays.load(Ordering::Relaxed)
    }
}

impl AudioPlayer for NullPlayer {
    fn play(&self, _clip: Arc<AudioOutput>) -> Result<Playback> {
        self.plays.fetch_add(1, Ordering::Relaxed);
        let (done_tx, done_rx) = oneshot::channel();
        let _ = done_tx.send(Ok(()));
        Ok(Playback {
            stop: Arc::new(AtomicBool::new(false)),
            state: Arc::new(RwLock::new(PlaybackState::Finished)),
            done: done_rx,
        })
    }
}

/// Output device backed by rodio and the default system output.
///
/// Each `play` decodes the MPEG payload and drives it on a dedicated worker
/// thread, polling the stop flag between buffer checks.
#[cfg(feature = "playback")]
#[derive(Debug, Default)]
pub struct RodioPlayer;

#[cfg(feature = "playback")]
impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "playback")]
impl AudioPlayer for RodioPlayer {
    fn play(&self, clip: Arc<AudioOutput>) -> Result<Playback> {
        let stop = Arc::new(AtomicBool::new(false));
        let state = Arc::new(RwLock::new(PlaybackState::Playing));
        let (done_tx, done_rx) = oneshot::channel();

        let worker_stop = Arc::clone(&stop);
        let worker_state = Arc::clone(&state);
        let data = clip.data.clone();
        std::thread::Builder::new()
            .name("voice-playback".to_string())
            .spawn(move || {
                let outcome = play_blocking(data, &worker_stop);
                let final_state = match &outcome {
                    Ok(true) => PlaybackState::Finished,
                    Ok(false) => PlaybackState::Stopped,
                    Err(_) => PlaybackState::Error,
                };
                *worker_state.write().expect("playback state lock poisoned") = final_state;
                let _ = done_tx.send(outcome.map(|_| ()));
            })
            .map_err(|e| {
                Error::audio_with_context(
                    format!("Failed to spawn playback thread: {}", e),
                    ErrorContext::new().with_source("playback"),
                )
            })?;

        Ok(Playback { stop, state, done: done_rx })
    }
}

/// Drive one clip to completion. Returns `Ok(false)` when stopped early.
#[cfg(feature = "playback")]
fn play_blocking(data: bytes::Bytes, stop: &AtomicBool) -> Result<bool> {
    use std::io::Cursor;
    use std::time::Duration;

    let (_stream, handle) = rodio::OutputStream::try_default().map_err(|e| {
        Error::audio_with_context(
            format!("No audio output device: {}", e),
            ErrorContext::new().with_source("playback"),
        )
    })?;
    let sink = rodio::Sink::try_new(&handle).map_err(|e| {
        Error::audio_with_context(
            format!("Failed to open audio sink: {}", e),
            ErrorContext::new().with_source("playback"),
        )
    })?;
    let source = rodio::Decoder::new(Cursor::new(data)).map_err(|e| {
        Error::audio_with_context(
            format!("Failed to decode audio payload: {}", e),
            ErrorContext::new().with_source("playback"),
        )
    })?;
    sink.append(source);
    while !sink.empty() {
        if stop.load(Ordering::Relaxed) {
            sink.stop();
            return Ok(false);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::AudioFormat;
    use bytes::Bytes;

    fn clip() -> Arc<AudioOutput> {
        Arc::new(AudioOutput {
            data: Bytes::from_static(b"not-real-mpeg"),
            format: AudioFormat::Mp3,
        })
    }

    #[tokio::test]
    async fn test_null_player_counts_and_completes() {
        let player = NullPlayer::new();
        let playback = player.play(clip()).unwrap();
        assert_eq!(player.play_count(), 1);
        assert_eq!(playback.state(), PlaybackState::Finished);
        playback.wait().await.unwrap();

        player.play(clip()).unwrap();
        assert_eq!(player.play_count(), 2);
    }

    #[tokio::test]
    async fn test_stop_before_finish_is_not_an_error() {
        let player = NullPlayer::new();
        let playback = player.play(clip()).unwrap();
        playback.stop();
        playback.wait().await.unwrap();
    }
}
