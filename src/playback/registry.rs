//! Revocable in-memory audio clips.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::synthesis::AudioOutput;

/// Handle naming a registered audio clip.
///
/// The handle is a URL-like string (`audio://<uuid>`) and is cheap to clone.
/// It stays valid until [`ClipRegistry::revoke`] releases the clip behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipHandle(String);

impl ClipHandle {
    fn generate() -> Self {
        Self(format!("audio://{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory store of synthesized clips, keyed by [`ClipHandle`].
///
/// Clips are never released implicitly. Every `insert` holds its clip until
/// the caller passes the handle to [`revoke`](Self::revoke); dropping the
/// handle alone keeps the bytes alive in the registry.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    clips: RwLock<HashMap<String, Arc<AudioOutput>>>,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a clip and return a fresh handle for it.
    pub fn insert(&self, clip: AudioOutput) -> ClipHandle {
        self.insert_arc(Arc::new(clip))
    }

    /// Store an already-shared clip and return a fresh handle for it.
    pub fn insert_arc(&self, clip: Arc<AudioOutput>) -> ClipHandle {
        let handle = ClipHandle::generate();
        self.clips
            .write()
            .expect("clip registry lock poisoned")
            .insert(handle.0.clone(), clip);
        handle
    }

    /// Resolve a handle to its clip, if it has not been revoked.
    pub fn get(&self, handle: &ClipHandle) -> Option<Arc<AudioOutput>> {
        self.clips
            .read()
            .expect("clip registry lock poisoned")
            .get(&handle.0)
            .cloned()
    }

    /// Release the clip behind `handle`. Returns whether anything was held.
    ///
    /// Outstanding `Arc` references (an in-flight playback, for instance)
    /// keep the bytes alive until they drop; the registry just stops handing
    /// them out.
    pub fn revoke(&self, handle: &ClipHandle) -> bool {
        self.clips
            .write()
            .expect("clip registry lock poisoned")
            .remove(&handle.0)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.clips
            .read()
            .expect("clip registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::AudioFormat;
    use bytes::Bytes;

    fn clip(payload: &'static [u8]) -> AudioOutput {
        AudioOutput {
            data: Bytes::from_static(payload),
            format: AudioFormat::Mp3,
        }
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let registry = ClipRegistry::new();
        let handle = registry.insert(clip(b"mp3-bytes"));
        assert!(handle.as_str().starts_with("audio://"));

        let stored = registry.get(&handle).unwrap();
        assert_eq!(&stored.data[..], b"mp3-bytes");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_handles_are_unique() {
        let registry = ClipRegistry::new();
        let a = registry.insert(clip(b"a"));
        let b = registry.insert(clip(b"b"));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_revoke_releases_clip() {
        let registry = ClipRegistry::new();
        let handle = registry.insert(clip(b"a"));
        assert!(registry.revoke(&handle));
        assert!(registry.get(&handle).is_none());
        assert!(!registry.revoke(&handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_outstanding_reference_survives_revoke() {
        let registry = ClipRegistry::new();
        let handle = registry.insert(clip(b"still-playing"));
        let held = registry.get(&handle).unwrap();
        registry.revoke(&handle);
        assert_eq!(&held.data[..], b"still-playing");
    }
}
